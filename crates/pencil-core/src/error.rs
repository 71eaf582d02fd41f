use thiserror::Error;

#[derive(Debug, Error)]
pub enum PencilError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PencilError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PencilError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PencilError {
    fn from(e: serde_json::Error) -> Self {
        PencilError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for PencilError {
    fn from(e: serde_yaml::Error) -> Self {
        PencilError::SerializationError(e.to_string())
    }
}
