//! Cypher projection generation from field selections.
//!
//! Each field of a selection is compiled by exactly one translation rule,
//! chosen by schema shape: a custom Cypher override, a traversal from a node
//! type to a related node, a node field whose target is a relationship type,
//! or an endpoint field on a relationship type (with reflexive and
//! mutation-payload sub-cases). Rules are pure functions: they append one
//! `fieldName: <expression>` clause to the accumulated projection body and
//! return updated thread-through state for the next sibling.

mod common;
mod custom_query;
mod dispatcher;
mod errors;
mod field;
mod node_relation;
mod relation_endpoint;

pub use dispatcher::{classify, compile_field, FieldRule};
pub use errors::ProjectionError;
pub use field::{
    Cardinality, CompiledField, FieldDescriptor, RelDirection, RootVariableNames, ThreadState,
};
