use thiserror::Error;

pub type PinchResult<T> = Result<T, PinchError>;

/// Failures raised by any stage of a pinch analysis.
///
/// Every stage fails fast; a run that returns one of these produced no
/// partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PinchError {
    #[error("Format error: {what}")]
    Format { what: String },

    #[error("Insufficient data: {what} (got {got}, need at least {need})")]
    InsufficientData {
        what: &'static str,
        got: usize,
        need: usize,
    },

    #[error("Pocket deletion failed: {what}")]
    PocketDeletion { what: String },

    #[error("Numeric degeneracy: {what}")]
    NumericDegeneracy { what: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl PinchError {
    pub fn format(what: impl Into<String>) -> Self {
        PinchError::Format { what: what.into() }
    }

    pub fn degenerate(what: impl Into<String>) -> Self {
        PinchError::NumericDegeneracy { what: what.into() }
    }
}
