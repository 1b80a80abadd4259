//! Buffer helpers: normalization, gain conversion, time axes

use crate::error::{ensure_non_negative, ensure_positive, Result, SynthError};

/// Longest buffer of `f64` samples a `Vec` can hold
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Number of samples covering `duration` seconds, rounded to the nearest sample
///
/// Fails when the count would not fit in a buffer.
pub fn sample_count(duration: f64, sample_rate: f64) -> Result<usize> {
    ensure_non_negative("duration", duration)?;
    ensure_positive("sample rate", sample_rate)?;
    let count = (duration * sample_rate).round();
    if count >= MAX_SAMPLES as f64 {
        return Err(SynthError::invalid(format!(
            "{}s at {} Hz is more samples than a buffer can hold",
            duration, sample_rate
        )));
    }
    Ok(count as usize)
}

/// Time in seconds of each of `len` samples: `t[i] = i / sample_rate`
pub fn time_points(len: usize, sample_rate: f64) -> Result<Vec<f64>> {
    ensure_positive("sample rate", sample_rate)?;
    Ok((0..len).map(|i| i as f64 / sample_rate).collect())
}

/// `len` evenly spaced values from `start` to `end`, both ends included
pub fn linspace(start: f64, end: f64, len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (len - 1) as f64;
            (0..len)
                .map(|i| if i == len - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Decibels to linear amplitude: `10^(gain_db / 20)`
pub fn gain_to_amplitude(gain_db: f64) -> f64 {
    10f64.powf(gain_db / 20.0)
}

/// Largest absolute sample value, 0.0 for an empty buffer
pub fn peak(buffer: &[f64]) -> f64 {
    buffer.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()))
}

/// Scale so that the peak absolute value becomes `target_amplitude`
pub fn normalize(buffer: &[f64], target_amplitude: f64) -> Result<Vec<f64>> {
    ensure_non_negative("target amplitude", target_amplitude)?;
    let max = peak(buffer);
    if max == 0.0 {
        return Err(SynthError::DivisionByZero(
            "cannot normalize a buffer whose peak is zero".to_string(),
        ));
    }
    if !max.is_finite() {
        return Err(SynthError::invalid("buffer contains non-finite samples"));
    }
    let scale = target_amplitude / max;
    Ok(buffer.iter().map(|&s| s * scale).collect())
}

/// Multiply every sample by the linear equivalent of `gain_db`
pub fn scale_signal(buffer: &[f64], gain_db: f64) -> Result<Vec<f64>> {
    if !gain_db.is_finite() {
        return Err(SynthError::invalid(format!(
            "gain must be finite, got {} dB",
            gain_db
        )));
    }
    let amplitude = gain_to_amplitude(gain_db);
    Ok(buffer.iter().map(|&s| s * amplitude).collect())
}
