//! Schema type definitions and the name-keyed registry.
//!
//! Registries can be built in code or loaded from YAML:
//!
//! ```yaml
//! types:
//!   - name: Person
//!     kind: node
//!   - name: Movie
//!     kind: node
//!   - name: ACTED_IN
//!     kind: relationship
//!     relation:
//!       name: ACTED_IN
//!       from_type: Person
//!       to_type: Movie
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::GraphSchemaError;

/// Category of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A node (vertex) type
    Node,
    /// A relationship (edge) type; carries a [`RelationDescriptor`]
    Relationship,
    /// An interface implemented by one or more node types
    Interface,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Node => "node",
            TypeKind::Relationship => "relationship",
            TypeKind::Interface => "interface",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Endpoint declaration of a relationship type.
///
/// `from_type == to_type` marks a reflexive relationship (both endpoints
/// share one node type), which the endpoint rule treats as a distinguished
/// sub-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    /// Relationship type name as it appears in the generated pattern
    pub name: String,
    /// Node type bound to the tail of the edge
    pub from_type: String,
    /// Node type bound to the head of the edge
    pub to_type: String,
}

impl RelationDescriptor {
    pub fn new(
        name: impl Into<String>,
        from_type: impl Into<String>,
        to_type: impl Into<String>,
    ) -> Self {
        RelationDescriptor {
            name: name.into(),
            from_type: from_type.into(),
            to_type: to_type.into(),
        }
    }

    /// True when both endpoints are the same node type.
    pub fn is_reflexive(&self) -> bool {
        self.from_type == self.to_type
    }
}

/// A named type in the graph schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTypeDef {
    pub name: String,
    pub kind: TypeKind,
    /// Endpoint metadata; present iff `kind` is [`TypeKind::Relationship`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationDescriptor>,
}

impl SchemaTypeDef {
    pub fn node(name: impl Into<String>) -> Self {
        SchemaTypeDef {
            name: name.into(),
            kind: TypeKind::Node,
            relation: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        SchemaTypeDef {
            name: name.into(),
            kind: TypeKind::Interface,
            relation: None,
        }
    }

    /// A relationship type whose pattern name matches the type name.
    pub fn relationship(
        name: impl Into<String>,
        from_type: impl Into<String>,
        to_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let relation = RelationDescriptor::new(name.clone(), from_type, to_type);
        SchemaTypeDef {
            name,
            kind: TypeKind::Relationship,
            relation: Some(relation),
        }
    }

    pub fn is_relationship(&self) -> bool {
        self.kind == TypeKind::Relationship
    }
}

/// Schema types keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, SchemaTypeDef>,
}

/// On-disk shape of a registry (YAML/JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryConfig {
    types: Vec<SchemaTypeDef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// Insert a type definition, replacing any previous definition of the
    /// same name.
    pub fn insert(&mut self, def: SchemaTypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&SchemaTypeDef> {
        self.types.get(name)
    }

    /// Look up a type, failing with a typed error for unknown names.
    pub fn resolve(&self, name: &str) -> Result<&SchemaTypeDef, GraphSchemaError> {
        self.types.get(name).ok_or_else(|| GraphSchemaError::UnknownType {
            type_name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Load a registry from a YAML document (see module docs for the format).
    pub fn from_yaml(yaml: &str) -> Result<Self, GraphSchemaError> {
        let config: RegistryConfig =
            serde_yaml::from_str(yaml).map_err(|e| GraphSchemaError::ConfigParseError {
                error: e.to_string(),
            })?;
        let mut registry = SchemaRegistry::new();
        for def in config.types {
            registry.insert(def);
        }
        Ok(registry)
    }
}
