use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphSchemaError {
    #[error("No schema type found for `{type_name}`")]
    UnknownType { type_name: String },
    #[error("Failed to parse schema configuration: {error}")]
    ConfigParseError { error: String },
}
