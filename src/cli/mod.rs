//! CLI interface for Tablesynth

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tablesynth::synth::{Interpolation, Waveform};

/// Wavetable synthesis to WAV files or the speakers
#[derive(Parser)]
#[command(name = "tablesynth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a tone to a WAV file
    Render {
        #[command(flatten)]
        tone: ToneArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render a tone and play it on the default output device
    Play {
        #[command(flatten)]
        tone: ToneArgs,
    },

    /// Write uniform white noise to a WAV file
    Noise {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "1.0")]
        duration: f64,

        /// Peak amplitude
        #[arg(short, long, default_value = "0.5")]
        amplitude: f64,

        /// Sample rate in Hz
        #[arg(short, long, default_value = "44100")]
        sample_rate: u32,
    },

    /// List available audio devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "tablesynth.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}

/// Configuration file plus per-run overrides
#[derive(Args)]
pub struct ToneArgs {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Waveform: sine, sawtooth, square or triangle
    #[arg(short, long)]
    pub waveform: Option<Waveform>,

    /// Frequency in Hz
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Duration in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Table lookup: nearest or linear
    #[arg(short, long)]
    pub interpolation: Option<Interpolation>,
}
