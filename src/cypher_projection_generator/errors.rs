use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Type '{type_name}' is a relationship type but carries no relation descriptor (while compiling field '{field_name}')")]
    MissingRelationDescriptor {
        type_name: String,
        field_name: String,
    },
    #[error("Field '{field_name}' on relationship type '{type_name}' matches neither an endpoint type name nor 'from'/'to'")]
    UnresolvedEndpointField {
        field_name: String,
        type_name: String,
    },
    #[error("Field '{field_name}' on type '{type_name}' has no relationship type to traverse")]
    MissingRelationType {
        field_name: String,
        type_name: String,
    },
    #[error("Field '{field_name}' on type '{type_name}' has no target type or interface label to project")]
    MissingTargetType {
        field_name: String,
        type_name: String,
    },
    #[error("Custom query for field '{field_name}' has no terminal RETURN variable")]
    MissingReturnVariable { field_name: String },
}
