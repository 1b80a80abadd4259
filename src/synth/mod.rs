//! Synthesis primitives
//!
//! Waveforms, wavetables and oscillators produce buffers; filters,
//! envelopes and modulation reshape them.

mod envelope;
mod filter;
mod generators;
mod modulation;
mod oscillator;
mod util;
mod waveform;
mod wavetable;

pub use envelope::{apply_envelope, apply_fade, fade_in_curve, Adsr, EnvelopeSegments};
pub use filter::{highpass, lowpass, FilterType, OnePole};
pub use generators::{mix, sine_tone, white_noise, white_noise_with};
pub use modulation::{amplitude_modulation, frequency_modulation, modulate, ModulationKind};
pub use oscillator::{synthesize, Oscillator};
pub use util::{
    gain_to_amplitude, linspace, normalize, peak, sample_count, scale_signal, time_points,
    MAX_SAMPLES,
};
pub use waveform::Waveform;
pub use wavetable::{Interpolation, Wavetable, DEFAULT_TABLE_LENGTH};
