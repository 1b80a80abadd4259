//! Buffer playback using cpal

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Play `buffer` on the default output device and block until it has finished
///
/// The stream is opened at `sample_rate`; every output channel gets the same
/// mono signal.
pub fn play_buffer(buffer: &[f64], sample_rate: u32) -> Result<()> {
    if buffer.is_empty() {
        return Ok(());
    }

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    let supported = device.default_output_config()?;
    let sample_format = supported.sample_format();
    let mut config: StreamConfig = supported.into();
    config.sample_rate = SampleRate(sample_rate);

    let samples: Arc<[f32]> = buffer.iter().map(|&s| s as f32).collect();
    let finished = Arc::new(AtomicBool::new(false));

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, finished.clone())?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, finished.clone())?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, samples, finished.clone())?,
        _ => return Err(anyhow!("Unsupported sample format")),
    };

    log::info!(
        "playing {:.2}s on {}",
        buffer.len() as f64 / sample_rate as f64,
        device.name().unwrap_or_else(|_| "Unknown".to_string())
    );
    stream.play()?;

    while !finished.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(10));
    }
    // Let the device drain its last period
    std::thread::sleep(Duration::from_millis(100));

    Ok(())
}

fn build_stream<T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<[f32]>,
    finished: Arc<AtomicBool>,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let position = AtomicUsize::new(0);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut pos = position.load(Ordering::Relaxed);
            for frame in data.chunks_mut(channels) {
                // Silence once the buffer is exhausted
                let sample = samples.get(pos).copied().unwrap_or(0.0);
                for channel_sample in frame.iter_mut() {
                    *channel_sample = T::from_sample(sample);
                }
                pos += 1;
            }
            position.store(pos, Ordering::Relaxed);

            if pos >= samples.len() {
                finished.store(true, Ordering::SeqCst);
            }
        },
        |err| {
            log::error!("Audio stream error: {}", err);
        },
        None,
    )?;

    Ok(stream)
}

/// Name of the host's default output device, if there is one
pub fn default_device_name() -> Option<String> {
    cpal::default_host().default_output_device()?.name().ok()
}

/// Output devices that report a default config, paired with that config
pub fn list_output_devices() -> Result<Vec<(String, StreamConfig)>> {
    let devices = cpal::default_host()
        .output_devices()
        .context("failed to enumerate output devices")?;

    Ok(devices
        .filter_map(|device| {
            let name = device.name().ok()?;
            match device.default_output_config() {
                Ok(config) => Some((name, config.into())),
                Err(e) => {
                    log::debug!("skipping {}: {}", name, e);
                    None
                }
            }
        })
        .collect())
}
