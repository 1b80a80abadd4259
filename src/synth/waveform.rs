//! Periodic waveform shapes
//!
//! Each shape maps a phase angle in radians to a sample value and repeats
//! every 2π.

use crate::error::SynthError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    #[serde(alias = "sin")]
    Sine,
    #[serde(alias = "saw")]
    Sawtooth,
    Square,
    #[serde(alias = "tri")]
    Triangle,
}

impl Waveform {
    /// All supported shapes
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Triangle,
    ];

    /// Evaluate the shape at phase angle `theta` (radians, any real value)
    pub fn sample(self, theta: f64) -> f64 {
        match self {
            Waveform::Sine => sine(theta),
            Waveform::Sawtooth => sawtooth(theta),
            Waveform::Square => square(theta),
            Waveform::Triangle => triangle(theta),
        }
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "square" => Ok(Waveform::Square),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            _ => Err(SynthError::UnsupportedWaveform(s.to_string())),
        }
    }
}

pub fn sine(theta: f64) -> f64 {
    theta.sin()
}

/// Linear ramp from -1 to +1 over each period, jumping back at θ = π
pub fn sawtooth(theta: f64) -> f64 {
    // rem_euclid keeps negative phases inside [0, 2π)
    (theta + PI).rem_euclid(TAU) / PI - 1.0
}

/// ±0.5 depending on the sign of sin θ, zero where sin θ is exactly zero
pub fn square(theta: f64) -> f64 {
    let s = theta.sin();
    if s > 0.0 {
        0.5
    } else if s < 0.0 {
        -0.5
    } else {
        0.0
    }
}

/// Half-scaled arcsine of the sine; peaks at ±π/4
pub fn triangle(theta: f64) -> f64 {
    0.5 * theta.sin().asin()
}
