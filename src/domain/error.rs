//! Errors raised while reading a fraction from text

use thiserror::Error;

/// Why a piece of text could not be turned into a [`Fraction`](super::Fraction)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    /// Wrong number of tokens, or no usable separator
    #[error("{0}")]
    Format(&'static str),
    /// A token was present but is not an integer
    #[error("Numerator and denominator must be integers.")]
    NotInteger,
    #[error("Denominator cannot be zero.")]
    ZeroDenominator,
    /// The result does not fit in a 64-bit numerator
    #[error("Fraction is out of range.")]
    Overflow,
}

impl FractionError {
    pub(crate) const SLASH_FORMAT: Self =
        Self::Format("Invalid fraction format. Use numerator/denominator.");
    pub(crate) const SPACE_FORMAT: Self =
        Self::Format("Invalid input. Use 'numerator/denominator' or 'numerator denominator'.");
}

pub type Result<T> = std::result::Result<T, FractionError>;
