//! Field classification and rule dispatch.
//!
//! [`classify`] inspects a field descriptor, its container type and the
//! thread-through state and produces exactly one [`FieldRule`];
//! [`compile_field`] matches the rule exhaustively and runs it. Precedence:
//! a custom Cypher override always wins; a relationship container routes to
//! the endpoint rules; everything else is a node-side traversal. Plain
//! scalar/property fields never reach this module (the surrounding
//! projection driver handles them directly).

use log::debug;

use crate::graph_schema::{RelationDescriptor, SchemaTypeDef, TypeKind};

use super::custom_query::custom_query_field;
use super::errors::ProjectionError;
use super::field::{CompiledField, FieldDescriptor, RootVariableNames, ThreadState};
use super::node_relation::{relation_field_on_node_type, relation_type_field_on_node_type};
use super::relation_endpoint::{
    general_endpoint_field, mutation_payload_field, reflexive_alias_field,
    reflexive_renamed_field,
};

/// Closed set of translation rules. Exactly one applies per field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule<'a> {
    /// User-supplied Cypher fragment overrides the traversal
    CustomQuery { fragment: &'a str },
    /// Node container, node target: traverse the declared relationship
    NodeRelation {
        rel_type: &'a str,
        target_type: &'a str,
    },
    /// Node container, relationship-typed target: project the relationship
    RelationTypeOnNode { relation: &'a RelationDescriptor },
    /// Endpoint field on a relationship-mutation payload: project a
    /// pre-bound root variable
    MutationPayload { root: RootVariableNames },
    /// Reflexive relationship, literal `from`/`to` field: re-derived traversal
    ReflexiveAlias { relation: &'a RelationDescriptor },
    /// Reflexive relationship, renamed directed field: project the
    /// relationship's own variable
    ReflexiveRenamed,
    /// Distinct endpoint types: traverse from the opposite endpoint
    GeneralEndpoint {
        relation: &'a RelationDescriptor,
        target_type: &'a str,
    },
}

impl FieldRule<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FieldRule::CustomQuery { .. } => "custom-query",
            FieldRule::NodeRelation { .. } => "node-relation",
            FieldRule::RelationTypeOnNode { .. } => "relation-type-on-node",
            FieldRule::MutationPayload { .. } => "mutation-payload",
            FieldRule::ReflexiveAlias { .. } => "reflexive-alias",
            FieldRule::ReflexiveRenamed => "reflexive-renamed",
            FieldRule::GeneralEndpoint { .. } => "general-endpoint",
        }
    }
}

/// Resolve the label source for a traversal target: the target schema type,
/// unless an inline fragment supplies the concrete label.
fn target_type_name<'a>(
    field: &FieldDescriptor,
    container: &SchemaTypeDef,
    target: Option<&'a SchemaTypeDef>,
) -> Result<&'a str, ProjectionError> {
    match target {
        Some(target) => Ok(target.name.as_str()),
        None if field.inline_fragment.is_some() => Ok(""),
        None => Err(ProjectionError::MissingTargetType {
            field_name: field.field_name.clone(),
            type_name: container.name.clone(),
        }),
    }
}

/// Classify a field by schema shape. Pure; no side effects.
pub fn classify<'a>(
    field: &'a FieldDescriptor,
    container: &'a SchemaTypeDef,
    target: Option<&'a SchemaTypeDef>,
    custom_cypher: Option<&'a str>,
    state: &ThreadState,
) -> Result<FieldRule<'a>, ProjectionError> {
    if let Some(fragment) = custom_cypher {
        return Ok(FieldRule::CustomQuery { fragment });
    }

    if container.kind == TypeKind::Relationship {
        let relation = container.relation.as_ref().ok_or_else(|| {
            ProjectionError::MissingRelationDescriptor {
                type_name: container.name.clone(),
                field_name: field.field_name.clone(),
            }
        })?;

        if let Some(root) = &state.root_variable_names {
            return Ok(FieldRule::MutationPayload { root: root.clone() });
        }

        if relation.is_reflexive() {
            if field.field_name == "from" || field.field_name == "to" {
                return Ok(FieldRule::ReflexiveAlias { relation });
            }
            return Ok(FieldRule::ReflexiveRenamed);
        }

        let is_from = field.field_name == relation.from_type || field.field_name == "from";
        let is_to = field.field_name == relation.to_type || field.field_name == "to";
        if is_from == is_to {
            return Err(ProjectionError::UnresolvedEndpointField {
                field_name: field.field_name.clone(),
                type_name: container.name.clone(),
            });
        }
        let target_type = target_type_name(field, container, target)?;
        return Ok(FieldRule::GeneralEndpoint {
            relation,
            target_type,
        });
    }

    if let Some(target_def) = target {
        if target_def.kind == TypeKind::Relationship {
            let relation = target_def.relation.as_ref().ok_or_else(|| {
                ProjectionError::MissingRelationDescriptor {
                    type_name: target_def.name.clone(),
                    field_name: field.field_name.clone(),
                }
            })?;
            return Ok(FieldRule::RelationTypeOnNode { relation });
        }
    }

    let rel_type = field
        .rel_type
        .as_deref()
        .ok_or_else(|| ProjectionError::MissingRelationType {
            field_name: field.field_name.clone(),
            type_name: container.name.clone(),
        })?;
    let target_type = target_type_name(field, container, target)?;
    Ok(FieldRule::NodeRelation {
        rel_type,
        target_type,
    })
}

/// Compile one field: classify it, run the matching rule, and return the
/// augmented accumulator plus the thread-through state for the next sibling.
pub fn compile_field(
    initial: &str,
    field: &FieldDescriptor,
    container: &SchemaTypeDef,
    target: Option<&SchemaTypeDef>,
    custom_cypher: Option<&str>,
    state: ThreadState,
) -> Result<CompiledField, ProjectionError> {
    let rule = classify(field, container, target, custom_cypher, &state)?;
    debug!(
        "dispatcher: field '{}' on '{}' -> {}",
        field.field_name,
        container.name,
        rule.name()
    );
    match rule {
        FieldRule::CustomQuery { fragment } => custom_query_field(
            initial,
            field,
            fragment,
            container.is_relationship(),
            state,
        ),
        FieldRule::NodeRelation {
            rel_type,
            target_type,
        } => Ok(relation_field_on_node_type(
            initial, field, rel_type, target_type, state,
        )),
        FieldRule::RelationTypeOnNode { relation } => Ok(relation_type_field_on_node_type(
            initial,
            field,
            &container.name,
            relation,
            state,
        )),
        FieldRule::MutationPayload { root } => {
            Ok(mutation_payload_field(initial, field, &root, state))
        }
        FieldRule::ReflexiveAlias { relation } => {
            Ok(reflexive_alias_field(initial, field, relation, state))
        }
        FieldRule::ReflexiveRenamed => Ok(reflexive_renamed_field(initial, field, state)),
        FieldRule::GeneralEndpoint {
            relation,
            target_type,
        } => Ok(general_endpoint_field(
            initial, field, relation, target_type, state,
        )),
    }
}
