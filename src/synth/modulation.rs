//! Amplitude and frequency modulation of a sine carrier
//!
//! The modulator buffer sets the output length; the result is normalized to
//! the requested peak amplitude.

use super::util::{normalize, time_points};
use crate::error::{ensure_positive, Result, SynthError};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Modulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulationKind {
    #[serde(alias = "amplitude")]
    Am,
    #[serde(alias = "frequency")]
    Fm,
}

fn check_inputs(
    carrier_frequency: f64,
    modulator: &[f64],
    modulation_index: f64,
    sample_rate: f64,
) -> Result<()> {
    if modulator.is_empty() {
        return Err(SynthError::invalid("modulator must hold at least one sample"));
    }
    if !carrier_frequency.is_finite() {
        return Err(SynthError::invalid(format!(
            "carrier frequency must be finite, got {}",
            carrier_frequency
        )));
    }
    if !modulation_index.is_finite() {
        return Err(SynthError::invalid(format!(
            "modulation index must be finite, got {}",
            modulation_index
        )));
    }
    ensure_positive("sample rate", sample_rate)
}

/// `(1 + index·m[i]) · sin(2π·carrier·t[i])`, normalized to `amplitude`
pub fn amplitude_modulation(
    carrier_frequency: f64,
    modulator: &[f64],
    modulation_index: f64,
    amplitude: f64,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    check_inputs(carrier_frequency, modulator, modulation_index, sample_rate)?;

    let t = time_points(modulator.len(), sample_rate)?;
    let wave: Vec<f64> = modulator
        .iter()
        .zip(&t)
        .map(|(&m, &t)| (1.0 + modulation_index * m) * (TAU * carrier_frequency * t).sin())
        .collect();
    normalize(&wave, amplitude)
}

/// `sin(2π·carrier·t[i] + index·m[i])`, normalized to `amplitude`
pub fn frequency_modulation(
    carrier_frequency: f64,
    modulator: &[f64],
    modulation_index: f64,
    amplitude: f64,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    check_inputs(carrier_frequency, modulator, modulation_index, sample_rate)?;

    let t = time_points(modulator.len(), sample_rate)?;
    let wave: Vec<f64> = modulator
        .iter()
        .zip(&t)
        .map(|(&m, &t)| (TAU * carrier_frequency * t + modulation_index * m).sin())
        .collect();
    normalize(&wave, amplitude)
}

/// Dispatch on `kind`
pub fn modulate(
    kind: ModulationKind,
    carrier_frequency: f64,
    modulator: &[f64],
    modulation_index: f64,
    amplitude: f64,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    match kind {
        ModulationKind::Am => amplitude_modulation(
            carrier_frequency,
            modulator,
            modulation_index,
            amplitude,
            sample_rate,
        ),
        ModulationKind::Fm => frequency_modulation(
            carrier_frequency,
            modulator,
            modulation_index,
            amplitude,
            sample_rate,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::generators::sine_tone;
    use crate::synth::util::peak;

    #[test]
    fn test_am_output() {
        let modulator = sine_tone(217.0, 0.5, 0.5, 44100.0).unwrap();
        let out = amplitude_modulation(220.0, &modulator, 0.5, 0.5, 44100.0).unwrap();
        assert_eq!(out.len(), modulator.len());
        assert!((peak(&out) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_am_zero_modulator_is_plain_carrier() {
        let modulator = vec![0.0; 400];
        let out = amplitude_modulation(100.0, &modulator, 0.5, 1.0, 400.0).unwrap();
        // 100 Hz at 400 Hz sample rate: 0, 1, 0, -1, ...
        assert!(out[0].abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);
        assert!((out[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_am_envelope_follows_modulator() {
        // Constant modulator of 1.0 with index 1.0 doubles the carrier before normalizing
        let modulator = vec![1.0; 400];
        let plain = amplitude_modulation(100.0, &[0.0; 400], 1.0, 1.0, 400.0).unwrap();
        let doubled = amplitude_modulation(100.0, &modulator, 1.0, 1.0, 400.0).unwrap();
        for (a, b) in plain.iter().zip(&doubled) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fm_output() {
        let modulator = sine_tone(5.0, 0.5, 1.0, 44100.0).unwrap();
        let out = frequency_modulation(440.0, &modulator, 2.0, 0.5, 44100.0).unwrap();
        assert_eq!(out.len(), modulator.len());
        assert!((peak(&out) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fm_phase_offset() {
        // A constant modulator shifts the carrier phase
        let modulator = vec![std::f64::consts::FRAC_PI_2; 8];
        let out = frequency_modulation(100.0, &modulator, 1.0, 1.0, 400.0).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!(out[1].abs() < 1e-12);
        assert!((out[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_modulator_rejected() {
        assert!(matches!(
            amplitude_modulation(220.0, &[], 0.5, 0.5, 44100.0),
            Err(SynthError::InvalidArgument(_))
        ));
        assert!(matches!(
            frequency_modulation(220.0, &[], 0.5, 0.5, 44100.0),
            Err(SynthError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_silent_result_is_division_by_zero() {
        // One sample at t = 0 is sin(0) = 0 for AM
        let err = amplitude_modulation(220.0, &[0.3], 0.5, 0.5, 44100.0).unwrap_err();
        assert!(matches!(err, SynthError::DivisionByZero(_)));
    }

    #[test]
    fn test_modulate_dispatch() {
        let modulator = sine_tone(3.0, 0.1, 1.0, 8000.0).unwrap();
        let a = modulate(ModulationKind::Am, 200.0, &modulator, 0.5, 0.5, 8000.0).unwrap();
        let b = amplitude_modulation(200.0, &modulator, 0.5, 0.5, 8000.0).unwrap();
        assert_eq!(a, b);
        assert!(modulate(ModulationKind::Fm, 200.0, &modulator, 0.5, 0.5, 0.0).is_err());
    }
}
