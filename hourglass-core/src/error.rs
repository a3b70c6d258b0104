#![forbid(unsafe_code)]

//! Common error type for Hourglass crates.
//!
//! Arithmetic range failures and malformed input are errors. An invalid proof
//! is *not* an error: verification reports it as a plain `false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VdfError {
    /// Byte string wider than the supported width, or a value that does not
    /// fit a fixed-size field.
    #[error("malformed input: {len} bytes exceeds the {max}-byte limit")]
    MalformedInput { len: usize, max: usize },

    /// Addition result exceeds the maximum representable width.
    #[error("arithmetic overflow: result exceeds {max_bits} bits")]
    Overflow { max_bits: usize },

    /// Subtraction with minuend < subtrahend.
    #[error("arithmetic underflow: minuend is smaller than subtrahend")]
    Underflow,

    /// Zero or otherwise unusable modulus.
    #[error("invalid modulus: {0}")]
    InvalidModulus(&'static str),

    /// Hash-to-prime search ran out of attempts.
    #[error("no prime found after {attempts} candidates")]
    PrimeSearchExhausted { attempts: usize },

    /// Hex text could not be decoded.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// I/O related failures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing failures.
    #[error("config parse error: {0}")]
    ConfigParse(toml::de::Error),

    /// Configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl VdfError {
    /// `true` for errors caused by the shape of caller-supplied data, as
    /// opposed to configuration or environment problems.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            VdfError::MalformedInput { .. }
                | VdfError::Overflow { .. }
                | VdfError::Underflow
                | VdfError::Hex(_)
        )
    }
}

/// Convenient alias for results throughout Hourglass crates.
pub type VdfResult<T> = Result<T, VdfError>;
