use crate::types::Transform;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("Transform of field '{field}' is already set to {existing}, cannot set it to {requested}")]
    TransformAlreadySet {
        field: String,
        existing: Transform,
        requested: Transform,
    },

    #[error("Unknown date unit: {0}")]
    UnknownDateUnit(String),

    #[error("Unknown transform: {0}")]
    UnknownTransform(String),

    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),
}
