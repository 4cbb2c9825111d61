//! Graph schema metadata consumed by the projection compiler.
//!
//! The compiler never validates schema correctness; it only reads the shape
//! of types (node vs relationship vs interface) and relationship endpoint
//! declarations to pick a translation rule.

mod errors;
mod types;

pub use errors::GraphSchemaError;
pub use types::{RelationDescriptor, SchemaRegistry, SchemaTypeDef, TypeKind};
