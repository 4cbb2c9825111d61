//! Traversal rules for fields declared on node and interface types.
//!
//! Two shapes exist: a field whose target is another node type (traverse the
//! declared relationship and project the node), and a field whose target is
//! itself a relationship type (traverse it and project the relationship
//! entity's own properties).

use crate::graph_schema::RelationDescriptor;

use super::common::{head_close, head_open, left_arrow, projection_body, right_arrow, target_label};
use super::field::{CompiledField, FieldDescriptor, RelDirection, ThreadState};

/// Compile a node-to-node traversal field:
/// `field: [(var)<-[:REL]-(nested:Label {params}) | nested {body}]`
/// with arrows on the side matching the declared direction and a `head(...)`
/// wrapper for singular cardinality.
pub(crate) fn relation_field_on_node_type(
    initial: &str,
    field: &FieldDescriptor,
    rel_type: &str,
    target_type_name: &str,
    state: ThreadState,
) -> CompiledField {
    let label = target_label(field.inline_fragment.as_deref(), target_type_name);
    let body = projection_body(field.inline_fragment.as_deref(), field.sub_selection());
    let initial = format!(
        "{}{}: {}[({}){}-[:{}]-{}({}:{}{}) | {} {{{}}}]{}{} {}",
        initial,
        field.field_name,
        head_open(field.cardinality),
        field.variable_name,
        left_arrow(field.rel_direction == RelDirection::In),
        rel_type,
        right_arrow(field.rel_direction == RelDirection::Out),
        field.nested_variable,
        label,
        field.query_params,
        field.nested_variable,
        body,
        head_close(field.cardinality),
        field.skip_limit,
        field.comma_if_tail,
    );
    CompiledField {
        initial,
        tail: state,
    }
}

/// Compile a field on a node type whose target type is a relationship type.
///
/// The relationship entity itself is projected, bound to
/// `<nested>_relation`. Reflexive targets cannot orient the pattern from the
/// container type alone, so they degrade to a direct map projection with no
/// traversal.
pub(crate) fn relation_type_field_on_node_type(
    initial: &str,
    field: &FieldDescriptor,
    container_type_name: &str,
    relation: &RelationDescriptor,
    state: ThreadState,
) -> CompiledField {
    if relation.is_reflexive() {
        let initial = format!(
            "{}{}: {{{}}}{} {}",
            initial,
            field.field_name,
            field.sub_selection(),
            field.skip_limit,
            field.comma_if_tail,
        );
        return CompiledField {
            initial,
            tail: state,
        };
    }

    let container_is_from = container_type_name == relation.from_type;
    let container_is_to = container_type_name == relation.to_type;
    let opposite_type = if container_is_from {
        &relation.to_type
    } else {
        &relation.from_type
    };
    let initial = format!(
        "{}{}: {}[({}){}-[{}_relation:{}{}]-{}(:{}) | {}_relation {{{}}}]{}{} {}",
        initial,
        field.field_name,
        head_open(field.cardinality),
        field.variable_name,
        left_arrow(container_is_to),
        field.nested_variable,
        relation.name,
        field.query_params,
        right_arrow(container_is_from),
        opposite_type,
        field.nested_variable,
        field.sub_selection(),
        head_close(field.cardinality),
        field.skip_limit,
        field.comma_if_tail,
    );
    CompiledField {
        initial,
        tail: state,
    }
}
