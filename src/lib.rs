//! Tablesynth - wavetable oscillators and buffer shaping for offline audio
//!
//! Builds single-cycle wavetables, plays them back at any frequency through
//! a phase accumulator, and shapes the result with one-pole filters, ADSR
//! envelopes, fades and AM/FM. Everything works on in-memory buffers; the
//! engine module adds WAV output and playback on top.

pub mod config;
pub mod engine;
pub mod error;
pub mod synth;

pub use config::SynthConfig;
pub use engine::render;
pub use error::{Result, SynthError};
