//! Single-pole IIR filters
//!
//! Lowpass is an exponential moving average; highpass subtracts the slowly
//! varying part by following input differences. Both run in one causal pass
//! and keep only the previous input and output sample as state.

use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Filter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    #[serde(alias = "lowpass")]
    LowPass,
    #[serde(alias = "highpass")]
    HighPass,
}

/// One-pole lowpass/highpass filter
#[derive(Debug, Clone)]
pub struct OnePole {
    filter_type: FilterType,
    alpha: f64,

    prev_input: f64,
    prev_output: f64,
    primed: bool,
}

impl OnePole {
    /// Create a filter from the sample period `dt` and time constant `rc`
    pub fn new(filter_type: FilterType, dt: f64, rc: f64) -> Result<Self> {
        ensure_positive("dt", dt)?;
        ensure_positive("rc", rc)?;

        let alpha = match filter_type {
            FilterType::LowPass => dt / (rc + dt),
            FilterType::HighPass => rc / (rc + dt),
        };
        log::debug!(
            "one-pole {:?}: dt={:e} rc={:e} alpha={:.6}",
            filter_type,
            dt,
            rc,
            alpha
        );

        Ok(Self {
            filter_type,
            alpha,
            prev_input: 0.0,
            prev_output: 0.0,
            primed: false,
        })
    }

    pub fn lowpass(dt: f64, rc: f64) -> Result<Self> {
        Self::new(FilterType::LowPass, dt, rc)
    }

    pub fn highpass(dt: f64, rc: f64) -> Result<Self> {
        Self::new(FilterType::HighPass, dt, rc)
    }

    /// Create a filter from a -3 dB cutoff frequency: rc = 1 / (2π·cutoff)
    pub fn from_cutoff(filter_type: FilterType, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        ensure_positive("cutoff", cutoff_hz)?;
        ensure_positive("sample rate", sample_rate)?;
        Self::new(filter_type, 1.0 / sample_rate, 1.0 / (TAU * cutoff_hz))
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Smoothing coefficient derived from `dt` and `rc`
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Reset filter state (clear history)
    pub fn reset(&mut self) {
        self.prev_input = 0.0;
        self.prev_output = 0.0;
        self.primed = false;
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, input: f64) -> f64 {
        let output = match (self.filter_type, self.primed) {
            (FilterType::LowPass, false) => self.alpha * input,
            (FilterType::LowPass, true) => {
                self.prev_output + self.alpha * (input - self.prev_output)
            }
            (FilterType::HighPass, false) => input,
            (FilterType::HighPass, true) => {
                self.alpha * (self.prev_output + input - self.prev_input)
            }
        };

        self.prev_input = input;
        self.prev_output = output;
        self.primed = true;
        output
    }

    /// Process a buffer of samples in place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Lowpass-filter `input` into a new buffer of the same length
pub fn lowpass(input: &[f64], dt: f64, rc: f64) -> Result<Vec<f64>> {
    let mut filter = OnePole::lowpass(dt, rc)?;
    let mut output = input.to_vec();
    filter.process_buffer(&mut output);
    Ok(output)
}

/// Highpass-filter `input` into a new buffer of the same length
pub fn highpass(input: &[f64], dt: f64, rc: f64) -> Result<Vec<f64>> {
    let mut filter = OnePole::highpass(dt, rc)?;
    let mut output = input.to_vec();
    filter.process_buffer(&mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SynthError;

    const DT: f64 = 1.0 / 44100.0;

    fn sine(freq: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (TAU * freq * i as f64 / 44100.0).sin())
            .collect()
    }

    #[test]
    fn test_alpha() {
        let lp = OnePole::lowpass(1.0, 3.0).unwrap();
        assert_eq!(lp.alpha(), 0.25);
        let hp = OnePole::highpass(1.0, 3.0).unwrap();
        assert_eq!(hp.alpha(), 0.75);
    }

    #[test]
    fn test_invalid_parameters() {
        for (dt, rc) in [(0.0, 1.0), (1.0, 0.0), (-1.0, 1.0), (1.0, -1.0), (f64::NAN, 1.0)] {
            assert!(matches!(lowpass(&[1.0], dt, rc), Err(SynthError::InvalidArgument(_))));
            assert!(matches!(highpass(&[1.0], dt, rc), Err(SynthError::InvalidArgument(_))));
        }
        assert!(OnePole::from_cutoff(FilterType::LowPass, 0.0, 44100.0).is_err());
    }

    #[test]
    fn test_lowpass_recurrence() {
        // alpha = 0.25
        let out = lowpass(&[1.0, 1.0, 0.0], 1.0, 3.0).unwrap();
        assert_eq!(out, vec![0.25, 0.4375, 0.328125]);
    }

    #[test]
    fn test_highpass_recurrence() {
        // alpha = 0.75
        let out = highpass(&[1.0, 1.0, 0.0], 1.0, 3.0).unwrap();
        assert_eq!(out, vec![1.0, 0.75, -0.1875]);
    }

    #[test]
    fn test_lowpass_constant_settles_to_constant() {
        let input = vec![0.6; 20_000];
        let out = lowpass(&input, DT, 0.001).unwrap();
        assert_eq!(out.len(), input.len());
        assert!((out[out.len() - 1] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_highpass_constant_settles_to_zero() {
        let input = vec![0.6; 20_000];
        let out = highpass(&input, DT, 0.001).unwrap();
        assert_eq!(out[0], 0.6);
        assert!(out[out.len() - 1].abs() < 1e-9);
    }

    #[test]
    fn test_lowpass_then_highpass_of_constant() {
        let input = vec![1.0; 20_000];
        let smoothed = lowpass(&input, DT, 0.001).unwrap();
        let out = highpass(&smoothed, DT, 0.001).unwrap();
        assert!(out[out.len() - 1].abs() < 1e-6);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(lowpass(&[], DT, 0.01).unwrap().is_empty());
        assert!(highpass(&[], DT, 0.01).unwrap().is_empty());
    }

    #[test]
    fn test_lowpass_attenuates_high_frequencies() {
        let input = sine(5000.0, 4410);
        let mut filter = OnePole::from_cutoff(FilterType::LowPass, 100.0, 44100.0).unwrap();
        let mut out = input.clone();
        filter.process_buffer(&mut out);

        let max_out = out[1000..].iter().fold(0.0f64, |a, &b| a.max(b.abs()));
        assert!(max_out < 0.1, "Expected attenuation, got {}", max_out);
    }

    #[test]
    fn test_highpass_attenuates_low_frequencies() {
        let input = sine(20.0, 44100);
        let mut filter = OnePole::from_cutoff(FilterType::HighPass, 2000.0, 44100.0).unwrap();
        let mut out = input.clone();
        filter.process_buffer(&mut out);

        let max_out = out[1000..].iter().fold(0.0f64, |a, &b| a.max(b.abs()));
        assert!(max_out < 0.05, "Expected attenuation, got {}", max_out);
    }

    #[test]
    fn test_filter_reset() {
        let mut filter = OnePole::highpass(DT, 0.01).unwrap();
        for _ in 0..100 {
            filter.process(1.0);
        }
        filter.reset();
        // First sample after reset passes straight through
        assert_eq!(filter.process(0.3), 0.3);
    }
}
