//! ADSR envelope and raised-cosine fades
//!
//! Both shape an existing buffer in place.

use super::util::{linspace, sample_count};
use crate::error::{ensure_non_negative, ensure_positive, Result, SynthError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Attack-Decay-Sustain-Release parameters
///
/// Times are in seconds, `sustain` is a gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.01,  // 10ms
            decay: 0.1,    // 100ms
            sustain: 0.7,  // 70% level
            release: 0.3,  // 300ms
        }
    }
}

/// Sample counts of the four envelope stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSegments {
    pub attack: usize,
    pub decay: usize,
    pub sustain: usize,
    pub release: usize,
}

impl Adsr {
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Check every field is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("attack", self.attack)?;
        ensure_non_negative("decay", self.decay)?;
        ensure_non_negative("sustain level", self.sustain)?;
        ensure_non_negative("release", self.release)?;
        Ok(())
    }

    /// Split a buffer of `len` samples into the four stages
    ///
    /// The sustain stage takes whatever the other three leave over; if they
    /// need more than `len` samples the envelope does not fit.
    pub fn segments(&self, len: usize, sample_rate: f64) -> Result<EnvelopeSegments> {
        self.validate()?;
        ensure_positive("sample rate", sample_rate)?;

        let attack = sample_count(self.attack, sample_rate)?;
        let decay = sample_count(self.decay, sample_rate)?;
        let release = sample_count(self.release, sample_rate)?;
        let ramps = attack
            .checked_add(decay)
            .and_then(|n| n.checked_add(release))
            .ok_or_else(|| SynthError::invalid("envelope stages are too long to add up"))?;

        if ramps > len {
            return Err(SynthError::invalid(format!(
                "envelope needs {} samples for attack/decay/release but the buffer has {}",
                ramps, len
            )));
        }

        Ok(EnvelopeSegments {
            attack,
            decay,
            sustain: len - ramps,
            release,
        })
    }

    /// Per-sample gain curve of length `len`
    pub fn curve(&self, len: usize, sample_rate: f64) -> Result<Vec<f64>> {
        let seg = self.segments(len, sample_rate)?;

        let mut curve = Vec::with_capacity(len);
        curve.extend(linspace(0.0, 1.0, seg.attack));
        curve.extend(linspace(1.0, self.sustain, seg.decay));
        curve.extend(std::iter::repeat_n(self.sustain, seg.sustain));
        curve.extend(linspace(self.sustain, 0.0, seg.release));
        Ok(curve)
    }
}

/// Multiply `buffer` by the ADSR curve
pub fn apply_envelope(buffer: &mut [f64], adsr: &Adsr, sample_rate: f64) -> Result<()> {
    let curve = adsr.curve(buffer.len(), sample_rate)?;
    log::debug!("applying {:?} over {} samples", adsr, buffer.len());
    for (sample, gain) in buffer.iter_mut().zip(curve) {
        *sample *= gain;
    }
    Ok(())
}

/// Rising half of a Hann window: `0.5 * (1 - cos(π·i/(len-1)))`
pub fn fade_in_curve(len: usize) -> Vec<f64> {
    linspace(0.0, PI, len)
        .into_iter()
        .map(|x| 0.5 * (1.0 - x.cos()))
        .collect()
}

/// Raised-cosine fade over the first and last `fade_length` samples
pub fn apply_fade(buffer: &mut [f64], fade_length: usize) -> Result<()> {
    let len = buffer.len();
    if fade_length.saturating_mul(2) > len {
        return Err(SynthError::invalid(format!(
            "fades of {} samples at each end overlap in a buffer of {}",
            fade_length, len
        )));
    }

    let fade_in = fade_in_curve(fade_length);
    for (sample, gain) in buffer[..fade_length].iter_mut().zip(&fade_in) {
        *sample *= gain;
    }
    for (sample, gain) in buffer[len - fade_length..]
        .iter_mut()
        .zip(fade_in.iter().rev())
    {
        *sample *= gain;
    }
    Ok(())
}
