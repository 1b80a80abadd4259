//! Configuration schema definitions

use crate::synth::{Adsr, FilterType, Interpolation, ModulationKind, Waveform, DEFAULT_TABLE_LENGTH};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for a render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Audio settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Oscillator settings
    #[serde(default)]
    pub tone: ToneConfig,

    /// Final level
    #[serde(default)]
    pub output: OutputConfig,

    /// Optional AM/FM stage using the oscillator as modulator
    #[serde(default)]
    pub modulation: Option<ModulationConfig>,

    /// Optional one-pole filter
    #[serde(default)]
    pub filter: Option<FilterConfig>,

    /// Optional ADSR envelope
    #[serde(default)]
    pub envelope: Option<Adsr>,

    /// Optional fade in/out
    #[serde(default)]
    pub fade: Option<FadeConfig>,
}

impl SynthConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }

        // Validate tone settings
        if !(self.tone.frequency.is_finite() && self.tone.frequency > 0.0) {
            bail!("Frequency must be a positive number");
        }
        if !(self.tone.duration.is_finite() && self.tone.duration >= 0.0) {
            bail!("Duration must not be negative");
        }
        if self.tone.table_length == 0 {
            bail!("Wavetable length must be greater than 0");
        }

        // Validate output level
        if !(self.output.amplitude.is_finite() && self.output.amplitude >= 0.0) {
            bail!("Output amplitude must not be negative");
        }
        if !self.output.gain_db.is_finite() {
            bail!("Output gain must be a finite number of dB");
        }

        if let Some(modulation) = &self.modulation {
            if !(modulation.carrier_frequency.is_finite() && modulation.carrier_frequency > 0.0) {
                bail!("Carrier frequency must be a positive number");
            }
            if !modulation.index.is_finite() {
                bail!("Modulation index must be a finite number");
            }
        }

        if let Some(filter) = &self.filter {
            match (filter.rc, filter.cutoff_hz) {
                (Some(_), Some(_)) => bail!("Filter takes either rc or cutoff_hz, not both"),
                (None, None) => bail!("Filter needs rc or cutoff_hz"),
                (Some(rc), None) if !(rc.is_finite() && rc > 0.0) => {
                    bail!("Filter rc must be a positive number")
                }
                (None, Some(hz)) if !(hz.is_finite() && hz > 0.0) => {
                    bail!("Filter cutoff must be a positive number")
                }
                _ => {}
            }
        }

        if let Some(envelope) = &self.envelope {
            envelope.validate()?;
        }

        Ok(())
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_sample_rate() -> u32 { 44100 }

/// Oscillator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneConfig {
    /// Waveform shape (default: sine)
    #[serde(default)]
    pub waveform: Waveform,

    /// Frequency in Hz (default: 440)
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Duration in seconds (default: 1.0)
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Wavetable entries (default: 64)
    #[serde(default = "default_table_length")]
    pub table_length: usize,

    /// Table lookup mode (default: nearest)
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::default(),
            frequency: default_frequency(),
            duration: default_duration(),
            table_length: default_table_length(),
            interpolation: Interpolation::default(),
        }
    }
}

fn default_frequency() -> f64 { 440.0 }
fn default_duration() -> f64 { 1.0 }
fn default_table_length() -> usize { DEFAULT_TABLE_LENGTH }

/// Final level of the rendered buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Normalize to `amplitude` (true) or scale by `gain_db` (false)
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Peak amplitude when normalizing (default: 0.5)
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Gain in dB when not normalizing (default: -20)
    #[serde(default = "default_gain_db")]
    pub gain_db: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            normalize: default_normalize(),
            amplitude: default_amplitude(),
            gain_db: default_gain_db(),
        }
    }
}

fn default_normalize() -> bool { true }
fn default_amplitude() -> f64 { 0.5 }
fn default_gain_db() -> f64 { -20.0 }

/// Modulation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationConfig {
    /// AM or FM
    pub kind: ModulationKind,

    /// Sine carrier frequency in Hz
    pub carrier_frequency: f64,

    /// Modulation index (default: 0.5)
    #[serde(default = "default_modulation_index")]
    pub index: f64,
}

fn default_modulation_index() -> f64 { 0.5 }

/// One-pole filter stage
///
/// Exactly one of `rc` and `cutoff_hz` must be given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Lowpass or highpass
    pub kind: FilterType,

    /// Time constant in seconds
    #[serde(default)]
    pub rc: Option<f64>,

    /// Cutoff frequency in Hz, converted to rc = 1 / (2π·cutoff)
    #[serde(default)]
    pub cutoff_hz: Option<f64>,
}

/// Fade in/out stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Fade length in samples at each end (default: 1000)
    #[serde(default = "default_fade_length")]
    pub length: usize,
}

fn default_fade_length() -> usize { 1000 }
