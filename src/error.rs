use thiserror::Error;

/// Error type for matrix operations and text parsing.
///
/// Two classes exist: invalid-operation errors ([`NotInvertible`],
/// [`WrongFieldCount`]) and format errors ([`InvalidNumber`]). Arithmetic
/// never errors; overflow and bad angles just produce IEEE Inf/NaN
/// coefficients.
///
/// [`NotInvertible`]: MatrixError::NotInvertible
/// [`WrongFieldCount`]: MatrixError::WrongFieldCount
/// [`InvalidNumber`]: MatrixError::InvalidNumber
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Tried to invert a matrix with a zero determinant.
    #[error("matrix is not invertible (determinant is zero)")]
    NotInvertible,
    /// Text form is neither `Identity` nor exactly six delimited fields.
    #[error("expected 'Identity' or 6 fields, got {found}")]
    WrongFieldCount { found: usize },
    /// A field in a six-field text form is not a valid number.
    #[error("invalid number '{token}'")]
    InvalidNumber { token: String },
}
