//! Render engine
//!
//! Turns a [`SynthConfig`] into a finished buffer and hands it to the WAV
//! recorder or the playback sink.

mod player;
mod recorder;

pub use player::{default_device_name, list_output_devices, play_buffer};
pub use recorder::{write_wav, Recorder};

use crate::config::{FilterConfig, SynthConfig};
use crate::synth::{
    apply_envelope, apply_fade, modulate, normalize, scale_signal, synthesize, OnePole, Wavetable,
};
use anyhow::{bail, Context, Result};

/// Renders buffers from one configuration
///
/// The wavetable is built once in [`Engine::new`] and shared by every render.
pub struct Engine {
    config: SynthConfig,
    table: Wavetable,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: SynthConfig) -> Result<Self> {
        config.validate()?;
        let table = Wavetable::new(config.tone.waveform, config.tone.table_length)?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn table(&self) -> &Wavetable {
        &self.table
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.config.audio.sample_rate as f64
    }

    /// Render at the configured frequency
    pub fn render(&self) -> Result<Vec<f64>> {
        self.render_at(self.config.tone.frequency)
    }

    /// Render the full chain with the oscillator at `frequency`
    pub fn render_at(&self, frequency: f64) -> Result<Vec<f64>> {
        let cfg = &self.config;
        let sample_rate = self.sample_rate();

        log::info!(
            "rendering {:.2}s of {} at {} Hz ({} Hz sample rate)",
            cfg.tone.duration,
            cfg.tone.waveform,
            frequency,
            cfg.audio.sample_rate
        );

        let mut buffer = synthesize(
            &self.table,
            sample_rate,
            frequency,
            cfg.tone.duration,
            cfg.tone.interpolation,
        )
        .context("oscillator failed")?;

        if let Some(m) = &cfg.modulation {
            buffer = modulate(m.kind, m.carrier_frequency, &buffer, m.index, 1.0, sample_rate)
                .with_context(|| format!("{:?} modulation failed", m.kind))?;
        }

        if let Some(f) = &cfg.filter {
            let mut filter = build_filter(f, sample_rate)?;
            filter.process_buffer(&mut buffer);
        }

        if let Some(adsr) = &cfg.envelope {
            apply_envelope(&mut buffer, adsr, sample_rate).context("envelope failed")?;
        }

        if let Some(fade) = &cfg.fade {
            apply_fade(&mut buffer, fade.length).context("fade failed")?;
        }

        let buffer = if cfg.output.normalize {
            normalize(&buffer, cfg.output.amplitude).context("normalization failed")?
        } else {
            scale_signal(&buffer, cfg.output.gain_db)?
        };

        log::debug!("rendered {} samples", buffer.len());
        Ok(buffer)
    }

    /// Render one buffer per frequency, each on its own thread
    pub fn render_batch(&self, frequencies: &[f64]) -> Result<Vec<Vec<f64>>> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = frequencies
                .iter()
                .map(|&f| scope.spawn(move || self.render_at(f)))
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(result) => result,
                    Err(_) => bail!("render thread panicked"),
                })
                .collect()
        })
    }
}

fn build_filter(config: &FilterConfig, sample_rate: f64) -> Result<OnePole> {
    let filter = match (config.rc, config.cutoff_hz) {
        (Some(rc), None) => OnePole::new(config.kind, 1.0 / sample_rate, rc)?,
        (None, Some(hz)) => OnePole::from_cutoff(config.kind, hz, sample_rate)?,
        _ => bail!("filter needs exactly one of rc or cutoff_hz"),
    };
    Ok(filter)
}

/// Render a configuration in one call
pub fn render(config: &SynthConfig) -> Result<Vec<f64>> {
    Engine::new(config.clone())?.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FadeConfig, ModulationConfig};
    use crate::synth::{peak, Adsr, FilterType, ModulationKind, Waveform};

    fn test_config() -> SynthConfig {
        let mut config = SynthConfig::default();
        config.tone.duration = 0.1;
        config
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(test_config()).unwrap();
        assert_eq!(engine.sample_rate(), 44100.0);
        assert_eq!(engine.table().len(), 64);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut config = test_config();
        config.tone.frequency = -1.0;
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_render_default_chain() {
        let buffer = render(&test_config()).unwrap();
        assert_eq!(buffer.len(), 4410);
        assert!((peak(&buffer) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_render_with_gain() {
        let mut config = test_config();
        config.output.normalize = false;
        config.output.gain_db = -20.0;
        let buffer = render(&config).unwrap();
        // Raw sine table peaks at 1.0
        assert!((peak(&buffer) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_render_full_chain() {
        let mut config = test_config();
        config.tone.waveform = Waveform::Sawtooth;
        config.modulation = Some(ModulationConfig {
            kind: ModulationKind::Fm,
            carrier_frequency: 220.0,
            index: 1.0,
        });
        config.filter = Some(FilterConfig {
            kind: FilterType::LowPass,
            rc: None,
            cutoff_hz: Some(3000.0),
        });
        config.envelope = Some(Adsr::new(0.01, 0.01, 0.5, 0.01));
        config.fade = Some(FadeConfig { length: 100 });

        let buffer = render(&config).unwrap();
        assert_eq!(buffer.len(), 4410);
        assert!(buffer[0].abs() < 1e-12);
        assert!(buffer[buffer.len() - 1].abs() < 1e-12);
        assert!((peak(&buffer) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_render_envelope_too_long() {
        let mut config = test_config();
        config.envelope = Some(Adsr::new(0.1, 0.1, 0.5, 0.1));
        assert!(render(&config).is_err());
    }

    #[test]
    fn test_render_batch() {
        let engine = Engine::new(test_config()).unwrap();
        let buffers = engine.render_batch(&[220.0, 440.0, 880.0]).unwrap();
        assert_eq!(buffers.len(), 3);
        assert_eq!(buffers[1], engine.render_at(440.0).unwrap());
        assert!(buffers.iter().all(|b| b.len() == 4410));
    }
}
