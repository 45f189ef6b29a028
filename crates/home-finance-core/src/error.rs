use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl HomeFinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        HomeFinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for HomeFinanceError {
    fn from(e: serde_json::Error) -> Self {
        HomeFinanceError::SerializationError(e.to_string())
    }
}
