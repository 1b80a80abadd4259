//! WAV file recorder
//!
//! Writes mono 32-bit float WAV files.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Streams `f64` buffers into a mono float WAV file
///
/// Samples outside [-1, 1] are written unchanged and counted; players will
/// clip them.
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    samples_written: u64,
    clipped: u64,
}

impl Recorder {
    pub fn create(path: &Path, sample_rate: u32) -> Result<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("cannot create {:?}", path))?;

        Ok(Self {
            writer,
            samples_written: 0,
            clipped: 0,
        })
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Samples written so far that lie outside [-1, 1]
    pub fn clipped(&self) -> u64 {
        self.clipped
    }

    pub fn write_buffer(&mut self, buffer: &[f64]) -> Result<()> {
        for &sample in buffer {
            if sample.abs() > 1.0 {
                self.clipped += 1;
            }
            self.writer
                .write_sample(sample as f32)
                .context("failed to write sample")?;
        }
        self.samples_written += buffer.len() as u64;
        Ok(())
    }

    /// Patch the header and close the file, returning the clipped count
    pub fn finish(self) -> Result<u64> {
        let clipped = self.clipped;
        self.writer
            .finalize()
            .context("failed to finalize WAV file")?;
        Ok(clipped)
    }
}

/// Write `buffer` to a new WAV file at `path`
pub fn write_wav(path: &Path, buffer: &[f64], sample_rate: u32) -> Result<()> {
    let mut recorder = Recorder::create(path, sample_rate)?;
    recorder.write_buffer(buffer)?;
    let written = recorder.samples_written();
    let clipped = recorder.finish()?;

    if clipped > 0 {
        log::warn!("{} of {} samples lie outside [-1, 1]", clipped, written);
    }
    log::info!(
        "wrote {:.2}s ({} samples) to {:?}",
        written as f64 / sample_rate as f64,
        written,
        path
    );
    Ok(())
}
