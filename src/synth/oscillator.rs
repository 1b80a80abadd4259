//! Wavetable oscillator
//!
//! A fractional phase index walks the table at `frequency * len / sample_rate`
//! entries per sample and wraps modulo the table length. The index is never
//! rounded, so any output frequency can be produced from a fixed table.

use super::util::sample_count;
use super::wavetable::wrap_index;
use super::{Interpolation, Wavetable};
use crate::error::{ensure_positive, Result};

/// A phase-accumulating reader over a borrowed wavetable
#[derive(Debug, Clone)]
pub struct Oscillator<'a> {
    table: &'a Wavetable,
    interpolation: Interpolation,
    sample_rate: f64,
    frequency: f64,
    index: f64,
    increment: f64,
}

impl<'a> Oscillator<'a> {
    /// Create a new oscillator starting at phase 0
    pub fn new(
        table: &'a Wavetable,
        frequency: f64,
        sample_rate: f64,
        interpolation: Interpolation,
    ) -> Result<Self> {
        ensure_positive("frequency", frequency)?;
        ensure_positive("sample rate", sample_rate)?;
        if table.is_empty() {
            return Err(crate::SynthError::invalid("wavetable must not be empty"));
        }
        Ok(Self {
            table,
            interpolation,
            sample_rate,
            frequency,
            index: 0.0,
            increment: frequency * table.len() as f64 / sample_rate,
        })
    }

    /// Set the frequency; the phase carries over
    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        ensure_positive("frequency", frequency)?;
        self.frequency = frequency;
        self.increment = frequency * self.table.len() as f64 / self.sample_rate;
        Ok(())
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Table entries advanced per output sample
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Current table position, always in `[0, table.len())`
    pub fn phase(&self) -> f64 {
        self.index
    }

    /// Reset the phase
    pub fn reset(&mut self) {
        self.index = 0.0;
    }

    /// Emit the sample at the current phase, then advance and wrap
    pub fn generate(&mut self) -> f64 {
        let sample = self.table.lookup(self.index, self.interpolation);
        self.index = wrap_index(self.index + self.increment, self.table.len());
        sample
    }

    /// Overwrite `buffer` with consecutive samples
    pub fn fill_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.generate();
        }
    }
}

/// Render `duration` seconds of `table` played at `frequency`
///
/// The result holds `round(duration * sample_rate)` samples.
pub fn synthesize(
    table: &Wavetable,
    sample_rate: f64,
    frequency: f64,
    duration: f64,
    interpolation: Interpolation,
) -> Result<Vec<f64>> {
    let mut osc = Oscillator::new(table, frequency, sample_rate, interpolation)?;
    let len = sample_count(duration, sample_rate)?;
    log::debug!(
        "synthesizing {} samples at {} Hz (increment {:.5}, {} interpolation)",
        len,
        frequency,
        osc.increment(),
        interpolation
    );

    let mut output = vec![0.0; len];
    osc.fill_buffer(&mut output);
    Ok(output)
}
