//! Endpoint rules for fields declared on relationship types.
//!
//! A field on a relationship type denotes one of the relationship's two
//! endpoint nodes. Three sub-modes exist, selected by pure data inspection:
//!
//! - **Mutation payload**: both endpoints were already bound by an enclosing
//!   write operation, so the field projects a pre-bound root variable and the
//!   thread-through state swaps which root variable the next sibling binds.
//! - **Reflexive**: both endpoints share one node type, so orientation is
//!   re-derived from the literal `from`/`to` alias; any other field name
//!   references the relationship's own properties under an alias and
//!   projects the relationship variable directly.
//! - **General**: distinct endpoint types; traverse from the opposite
//!   endpoint's label through the bound relationship-identity variable into
//!   a freshly bound node of the requested type.

use crate::graph_schema::RelationDescriptor;

use super::common::{head_close, head_open, left_arrow, projection_body, right_arrow, target_label};
use super::field::{CompiledField, FieldDescriptor, RootVariableNames, ThreadState};

/// Project a pre-bound mutation root variable, no traversal.
///
/// The returned state keeps `root_variable_names` intact and names the
/// opposite root variable in `next_variable`, so sibling `from`/`to` fields
/// each resolve to the correct opposite-bound node.
pub(crate) fn mutation_payload_field(
    initial: &str,
    field: &FieldDescriptor,
    root: &RootVariableNames,
    state: ThreadState,
) -> CompiledField {
    let next_variable = if field.field_name == "from" {
        root.to.clone()
    } else {
        root.from.clone()
    };
    let initial = format!(
        "{}{}: {} {{{}}}{} {}",
        initial,
        field.field_name,
        field.variable_name,
        field.sub_selection(),
        field.skip_limit,
        field.comma_if_tail,
    );
    let mut tail = state;
    tail.next_variable = Some(next_variable);
    CompiledField { initial, tail }
}

/// Reflexive relationship, field named literally `from` or `to`: traverse
/// from the bound relationship variable to a fresh node of the shared type,
/// binding the relationship identity as `<var>_from_relation` /
/// `<var>_to_relation` and projecting it.
pub(crate) fn reflexive_alias_field(
    initial: &str,
    field: &FieldDescriptor,
    relation: &RelationDescriptor,
    state: ThreadState,
) -> CompiledField {
    let is_from = field.field_name == "from";
    let relationship_variable = format!(
        "{}_{}_relation",
        field.variable_name,
        if is_from { "from" } else { "to" }
    );
    let label = target_label(field.inline_fragment.as_deref(), &relation.from_type);
    let body = projection_body(field.inline_fragment.as_deref(), field.sub_selection());
    let initial = format!(
        "{}{}: {}[({}){}-[{}:{}{}]-{}({}:{}) | {} {{{}}}]{}{} {}",
        initial,
        field.field_name,
        head_open(field.cardinality),
        field.variable_name,
        left_arrow(is_from),
        relationship_variable,
        relation.name,
        field.query_params,
        right_arrow(!is_from),
        field.nested_variable,
        label,
        relationship_variable,
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

/// Reflexive relationship, renamed directed field: the field aliases the
/// relationship's own properties, so project the relationship variable with
/// no traversal.
pub(crate) fn reflexive_renamed_field(
    initial: &str,
    field: &FieldDescriptor,
    state: ThreadState,
) -> CompiledField {
    let initial = format!(
        "{}{}: {} {{{}}}{} {}",
        initial,
        field.field_name,
        field.variable_name,
        field.sub_selection(),
        field.skip_limit,
        field.comma_if_tail,
    );
    CompiledField {
        initial,
        tail: state,
    }
}

/// Distinct endpoint types: anchor the pattern at the opposite endpoint's
/// label and traverse through the bound relationship-identity variable into
/// a fresh node of the requested endpoint type.
pub(crate) fn general_endpoint_field(
    initial: &str,
    field: &FieldDescriptor,
    relation: &RelationDescriptor,
    target_type_name: &str,
    state: ThreadState,
) -> CompiledField {
    let is_from = field.field_name == relation.from_type || field.field_name == "from";
    let anchor_type = if is_from {
        &relation.to_type
    } else {
        &relation.from_type
    };
    let label = target_label(field.inline_fragment.as_deref(), target_type_name);
    let body = projection_body(field.inline_fragment.as_deref(), field.sub_selection());
    let initial = format!(
        "{}{}: {}[(:{}){}-[{}_relation]-{}({}:{}{}) | {} {{{}}}]{}{} {}",
        initial,
        field.field_name,
        head_open(field.cardinality),
        anchor_type,
        left_arrow(is_from),
        field.variable_name,
        right_arrow(!is_from),
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
