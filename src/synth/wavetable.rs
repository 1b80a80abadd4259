//! Single-cycle wavetables
//!
//! A table holds one period of a waveform sampled at `len` evenly spaced
//! points over [0, 2π). It is built once and only read afterwards, so a
//! single table can feed any number of oscillators, on any thread.

use super::Waveform;
use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Default table length
pub const DEFAULT_TABLE_LENGTH: usize = 64;

/// How a fractional table index is turned into a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Value at `floor(index)`
    #[default]
    Nearest,
    /// Weighted average of the two neighbouring entries, wrapping at the end
    Linear,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Nearest => f.write_str("nearest"),
            Interpolation::Linear => f.write_str("linear"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "none" => Ok(Interpolation::Nearest),
            "linear" => Ok(Interpolation::Linear),
            other => Err(SynthError::invalid(format!(
                "unknown interpolation mode \"{}\"",
                other
            ))),
        }
    }
}

/// One period of a waveform
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Vec<f64>,
}

impl Wavetable {
    /// Sample `waveform` at `length` points: entry n = waveform(2π·n/length)
    pub fn new(waveform: Waveform, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(SynthError::invalid("wavetable length must be > 0"));
        }
        let samples = (0..length)
            .map(|n| waveform.sample(TAU * n as f64 / length as f64))
            .collect();
        log::debug!("built {} wavetable with {} entries", waveform, length);
        Ok(Self { samples })
    }

    /// Build a table from caller-supplied samples
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SynthError::invalid("wavetable must not be empty"));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(SynthError::invalid("wavetable samples must be finite"));
        }
        Ok(Self { samples })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Read the table at a fractional position
    ///
    /// `index` is first wrapped into `[0, len)`, so any finite value is
    /// accepted and the read never leaves the table.
    pub fn lookup(&self, index: f64, interpolation: Interpolation) -> f64 {
        let len = self.samples.len();
        let index = wrap_index(index, len);
        let i0 = (index.floor() as usize).min(len - 1);

        match interpolation {
            Interpolation::Nearest => self.samples[i0],
            Interpolation::Linear => {
                let i1 = (i0 + 1) % len;
                let frac = index - i0 as f64;
                (1.0 - frac) * self.samples[i0] + frac * self.samples[i1]
            }
        }
    }
}

/// Bring a phase index into `[0, len)`
pub(crate) fn wrap_index(index: f64, len: usize) -> f64 {
    let len = len as f64;
    let wrapped = index.rem_euclid(len);
    // rem_euclid can round up to exactly `len` for tiny negative inputs
    if wrapped >= len {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_length() {
        for len in [1, 2, 3, 4, 64, 100, 2048] {
            let table = Wavetable::new(Waveform::Sine, len).unwrap();
            assert_eq!(table.len(), len);
            assert!(!table.is_empty());
        }
    }

    #[test]
    fn test_single_entry_is_phase_zero() {
        for shape in Waveform::ALL {
            let table = Wavetable::new(shape, 1).unwrap();
            assert_eq!(table.as_slice()[0], shape.sample(0.0));
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = Wavetable::new(Waveform::Sine, 0).unwrap_err();
        assert!(matches!(err, SynthError::InvalidArgument(_)));
        assert!(Wavetable::from_samples(Vec::new()).is_err());
        assert!(Wavetable::from_samples(vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_table_entries() {
        let table = Wavetable::new(Waveform::Sine, 4).unwrap();
        let s = table.as_slice();
        assert!(s[0].abs() < 1e-12);
        assert!((s[1] - 1.0).abs() < 1e-12);
        assert!(s[2].abs() < 1e-12);
        assert!((s[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_lookup() {
        let table = Wavetable::from_samples(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(table.lookup(0.0, Interpolation::Nearest), 0.0);
        assert_eq!(table.lookup(1.9, Interpolation::Nearest), 1.0);
        assert_eq!(table.lookup(3.999, Interpolation::Nearest), 3.0);
        // Out-of-range indices wrap instead of panicking
        assert_eq!(table.lookup(4.0, Interpolation::Nearest), 0.0);
        assert_eq!(table.lookup(-0.5, Interpolation::Nearest), 3.0);
        assert_eq!(table.lookup(-1e-18, Interpolation::Nearest), 0.0);
    }

    #[test]
    fn test_linear_lookup() {
        let table = Wavetable::from_samples(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(table.lookup(1.0, Interpolation::Linear), 1.0);
        assert!((table.lookup(1.25, Interpolation::Linear) - 1.25).abs() < 1e-12);
        assert!((table.lookup(2.5, Interpolation::Linear) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_lookup_wraps_at_seam() {
        let table = Wavetable::from_samples(vec![0.8, 0.1, -0.3, 0.4]).unwrap();
        // Halfway between the last and the first entry
        let v = table.lookup(3.5, Interpolation::Linear);
        assert!((v - (0.4 + 0.8) / 2.0).abs() < 1e-12);
        let v = table.lookup(3.75, Interpolation::Linear);
        assert!((v - (0.25 * 0.4 + 0.75 * 0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(5.5, 4), 1.5);
        assert_eq!(wrap_index(-1.0, 4), 3.0);
        assert_eq!(wrap_index(-1e-18, 4), 0.0);
        assert!(wrap_index(1234.567, 64) < 64.0);
    }

    #[test]
    fn test_interpolation_from_str() {
        assert_eq!("linear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
        assert_eq!("Nearest".parse::<Interpolation>().unwrap(), Interpolation::Nearest);
        assert!("cubic".parse::<Interpolation>().is_err());
    }
}
