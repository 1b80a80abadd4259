//! Direct tone and noise generators

use super::util::{sample_count, time_points};
use crate::error::{ensure_non_negative, ensure_positive, Result, SynthError};
use rand::distr::{Distribution, Uniform};
use rand::Rng;
use std::f64::consts::TAU;

/// `amplitude · sin(2π·frequency·t)` computed per sample, without a table
pub fn sine_tone(frequency: f64, duration: f64, amplitude: f64, sample_rate: f64) -> Result<Vec<f64>> {
    ensure_positive("frequency", frequency)?;
    if !amplitude.is_finite() {
        return Err(SynthError::invalid(format!(
            "amplitude must be finite, got {}",
            amplitude
        )));
    }
    let len = sample_count(duration, sample_rate)?;
    Ok(time_points(len, sample_rate)?
        .into_iter()
        .map(|t| amplitude * (TAU * frequency * t).sin())
        .collect())
}

/// Uniform white noise in `[-amplitude, amplitude]` from the thread-local RNG
pub fn white_noise(duration: f64, amplitude: f64, sample_rate: f64) -> Result<Vec<f64>> {
    white_noise_with(&mut rand::rng(), duration, amplitude, sample_rate)
}

/// Uniform white noise drawn from a caller-supplied random source
pub fn white_noise_with<R: Rng>(
    rng: &mut R,
    duration: f64,
    amplitude: f64,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    ensure_non_negative("amplitude", amplitude)?;
    let len = sample_count(duration, sample_rate)?;
    let dist = Uniform::new_inclusive(-amplitude, amplitude).map_err(|e| {
        SynthError::invalid(format!("no noise range for amplitude {}: {}", amplitude, e))
    })?;
    Ok(dist.sample_iter(rng).take(len).collect())
}

/// Sample-wise sum of equally long buffers
pub fn mix(buffers: &[&[f64]]) -> Result<Vec<f64>> {
    let first = buffers
        .first()
        .ok_or_else(|| SynthError::invalid("nothing to mix"))?;
    if let Some(other) = buffers.iter().find(|b| b.len() != first.len()) {
        return Err(SynthError::invalid(format!(
            "cannot mix buffers of {} and {} samples",
            first.len(),
            other.len()
        )));
    }

    let mut out = vec![0.0; first.len()];
    for buffer in buffers {
        for (acc, &s) in out.iter_mut().zip(buffer.iter()) {
            *acc += s;
        }
    }
    Ok(out)
}
