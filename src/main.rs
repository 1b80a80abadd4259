//! Tablesynth - wavetable synthesis from the command line

use anyhow::Result;
use clap::Parser;
use tablesynth::config::{self, SynthConfig};
use tablesynth::engine::{self, Engine};
use tablesynth::synth::white_noise;

mod cli;

use cli::{Cli, Commands, ToneArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Render { tone, output } => {
            let cfg = resolve_config(&tone)?;
            let renderer = Engine::new(cfg)?;
            let buffer = renderer.render()?;
            engine::write_wav(&output, &buffer, renderer.config().audio.sample_rate)?;
            println!("Rendered to {:?}", output);
        }

        Commands::Play { tone } => {
            let cfg = resolve_config(&tone)?;
            let renderer = Engine::new(cfg)?;
            let buffer = renderer.render()?;
            engine::play_buffer(&buffer, renderer.config().audio.sample_rate)?;
        }

        Commands::Noise {
            output,
            duration,
            amplitude,
            sample_rate,
        } => {
            let buffer = white_noise(duration, amplitude, sample_rate as f64)?;
            engine::write_wav(&output, &buffer, sample_rate)?;
            println!("Wrote {}s of noise to {:?}", duration, output);
        }

        Commands::Devices => {
            println!("Available audio devices:\n");

            if let Some(name) = engine::default_device_name() {
                println!("Default output: {}\n", name);
            }

            println!("Output devices:");
            for (name, config) in engine::list_output_devices()? {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!(
                        "  Tone: {} at {} Hz for {}s",
                        cfg.tone.waveform, cfg.tone.frequency, cfg.tone.duration
                    );
                    println!(
                        "  Wavetable: {} entries, {} interpolation",
                        cfg.tone.table_length, cfg.tone.interpolation
                    );
                    if cfg.output.normalize {
                        println!("  Output: normalized to {}", cfg.output.amplitude);
                    } else {
                        println!("  Output: {} dB", cfg.output.gain_db);
                    }
                    if let Some(m) = &cfg.modulation {
                        println!(
                            "  Modulation: {:?} on {} Hz carrier, index {}",
                            m.kind, m.carrier_frequency, m.index
                        );
                    }
                    if let Some(f) = &cfg.filter {
                        println!("  Filter: {:?}", f.kind);
                    }
                    if let Some(e) = &cfg.envelope {
                        println!(
                            "  Envelope: A {}s D {}s S {} R {}s",
                            e.attack, e.decay, e.sustain, e.release
                        );
                    }
                    if let Some(fade) = &cfg.fade {
                        println!("  Fade: {} samples", fade.length);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../tablesynth.example.yaml");

            let path = "tablesynth.yaml";
            if std::path::Path::new(path).exists() {
                println!("tablesynth.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created tablesynth.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the config file (or defaults) and apply command-line overrides
fn resolve_config(args: &ToneArgs) -> Result<SynthConfig> {
    let mut cfg = match &args.config {
        Some(path) => config::load_config(path)?,
        None => SynthConfig::default(),
    };

    if let Some(waveform) = args.waveform {
        cfg.tone.waveform = waveform;
    }
    if let Some(frequency) = args.frequency {
        cfg.tone.frequency = frequency;
    }
    if let Some(duration) = args.duration {
        cfg.tone.duration = duration;
    }
    if let Some(interpolation) = args.interpolation {
        cfg.tone.interpolation = interpolation;
    }

    cfg.validate()?;
    Ok(cfg)
}
