use thiserror::Error;

/// Errors raised by the bit helpers and by [`Bits`](crate::Bits).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitsError {
    /// A value that has to be an integer was not one.
    #[error("type error: {0}")]
    Type(String),

    /// Conflicting width arguments, a width below the legal minimum, or a
    /// value that does not fit the requested width.
    #[error("bit error: {0}")]
    Width(String),

    /// Arithmetic that has no result, such as division by zero.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// The operation is deliberately not provided.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl BitsError {
    /// Returns true for width/domain errors.
    pub fn is_width(&self) -> bool {
        matches!(self, BitsError::Width(_))
    }

    /// Returns true for type errors.
    pub fn is_type(&self) -> bool {
        matches!(self, BitsError::Type(_))
    }

    /// Returns true for unsupported operations.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, BitsError::Unsupported(_))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BitsError>;
