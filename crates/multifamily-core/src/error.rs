use thiserror::Error;

#[derive(Debug, Error)]
pub enum MultifamilyError {
    #[error("Missing input: {field} is required and must be a positive amount")]
    MissingInput { field: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid loan term: {reason}")]
    InvalidLoanTerm { reason: String },

    #[error("Invalid rate in {context}: amortization factor degenerates")]
    InvalidRate { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MultifamilyError {
    fn from(e: serde_json::Error) -> Self {
        MultifamilyError::SerializationError(e.to_string())
    }
}
