//! Cypherproj - Cypher projection compiler for typed graph schemas
//!
//! This crate compiles a hierarchical field-selection tree, defined over a
//! typed graph schema (node types, relationship types, interfaces), into a
//! single nested Cypher map-comprehension expression that performs the
//! equivalent traversal and projection in one round trip.
//!
//! The crate provides:
//! - Schema metadata types and a name-keyed registry (`graph_schema`)
//! - Per-field translation rules and the rule dispatcher
//!   (`cypher_projection_generator`)
//!
//! Selection-tree parsing, parameter serialization, pagination clause
//! construction and query execution are owned by the surrounding system;
//! this crate consumes their outputs as pre-rendered text.

pub mod cypher_projection_generator;
pub mod graph_schema;
