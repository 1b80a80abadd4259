//! Error type for synthesis operations

use thiserror::Error;

/// Errors raised while generating or shaping a buffer
///
/// Every operation validates its parameters up front, so a returned error
/// never comes with a partially written result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A numeric parameter is out of range, non-finite, or buffers disagree in length
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The waveform name is not one of the known shapes
    #[error("waveform \"{0}\" not implemented")]
    UnsupportedWaveform(String),

    /// Normalization of a buffer whose peak is zero
    #[error("division by zero: {0}")]
    DivisionByZero(String),
}

impl SynthError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SynthError::InvalidArgument(msg.into())
    }
}

/// Result alias used across the synth modules
pub type Result<T> = std::result::Result<T, SynthError>;

/// Reject NaN, infinities and values `<= 0`
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SynthError::invalid(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Reject NaN, infinities and values `< 0`
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SynthError::invalid(format!(
            "{} must be a non-negative finite number, got {}",
            name, value
        )));
    }
    Ok(())
}
