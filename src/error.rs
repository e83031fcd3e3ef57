use thiserror::Error;

/// Errors raised by the digit model and the transition engine.
///
/// Every variant aborts the current `initialize`/`trigger` call. Nothing is
/// retried and nothing already written to the surface is rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlipError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("No column rendered for place value {place_value}")]
    ColumnNotFound { place_value: u64 },

    #[error("No card {digit} in column for place value {place_value}")]
    CardNotFound { place_value: u64, digit: u8 },
}

impl FlipError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FlipError::InvalidInput {
            message: message.into(),
        }
    }
}
