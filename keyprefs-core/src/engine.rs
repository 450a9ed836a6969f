//! Domain rules for the key-detection engine's parameters.
//!
//! The same rules serve two callers: the preference mutators reject a value that
//! breaks them, and `PreferenceSet::load` resets a stored value that breaks them
//! to its default.

use std::fmt;

use keyprefs_types::{EngineParameters, LOWEST_A_HZ};

/// Highest octave (above A0) the analysis may start on.
pub const HIGHEST_STARTING_OCTAVE: i32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Count fields must be at least 1.
    Zero { field: &'static str },
    NotPowerOfTwo { field: &'static str, value: u32 },
    NotMultipleOf { field: &'static str, value: u32, multiple: u32 },
    OutOfRange { field: &'static str, value: f32 },
    /// Starting frequency is not one of A0..A7.
    NotAnA { value: f32 },
    ToneProfileLength { expected: usize, actual: usize },
    NonFiniteProfile { index: usize },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero { field } => write!(f, "{} must be at least 1", field),
            Self::NotPowerOfTwo { field, value } => {
                write!(f, "{} must be a power of two, got {}", field, value)
            }
            Self::NotMultipleOf { field, value, multiple } => {
                write!(f, "{} must be a multiple of {}, got {}", field, multiple, value)
            }
            Self::OutOfRange { field, value } => write!(f, "{} out of range: {}", field, value),
            Self::NotAnA { value } => {
                write!(f, "starting frequency must be an A between A0 and A7, got {} Hz", value)
            }
            Self::ToneProfileLength { expected, actual } => write!(
                f,
                "custom tone profile needs {} values (octaves x bins per octave), got {}",
                expected, actual
            ),
            Self::NonFiniteProfile { index } => {
                write!(f, "custom tone profile value {} is not a finite number", index)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// One check per engine field.
pub mod validate {
    use super::*;

    fn at_least_one(field: &'static str, value: u32) -> Result<u32, ParameterError> {
        if value == 0 {
            Err(ParameterError::Zero { field })
        } else {
            Ok(value)
        }
    }

    pub fn fft_frame_size(value: u32) -> Result<u32, ParameterError> {
        if value.is_power_of_two() {
            Ok(value)
        } else {
            Err(ParameterError::NotPowerOfTwo { field: "fft_frame_size", value })
        }
    }

    pub fn hops_per_frame(value: u32) -> Result<u32, ParameterError> {
        at_least_one("hops_per_frame", value)
    }

    pub fn octaves(value: u32) -> Result<u32, ParameterError> {
        at_least_one("octaves", value)
    }

    pub fn bins_per_octave(value: u32) -> Result<u32, ParameterError> {
        at_least_one("bins_per_octave", value)?;
        if value % 12 != 0 {
            return Err(ParameterError::NotMultipleOf { field: "bins_per_octave", value, multiple: 12 });
        }
        Ok(value)
    }

    pub fn arbitrary_segments(value: u32) -> Result<u32, ParameterError> {
        at_least_one("arbitrary_segments", value)
    }

    pub fn seg_peak_picking_neighbours(value: u32) -> Result<u32, ParameterError> {
        at_least_one("seg_peak_picking_neighbours", value)
    }

    pub fn seg_gaussian_size(value: u32) -> Result<u32, ParameterError> {
        at_least_one("seg_gaussian_size", value)
    }

    fn positive(field: &'static str, value: f32) -> Result<f32, ParameterError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::OutOfRange { field, value })
        }
    }

    pub fn seg_gaussian_sigma(value: f32) -> Result<f32, ParameterError> {
        positive("seg_gaussian_sigma", value)
    }

    pub fn direct_sk_stretch(value: f32) -> Result<f32, ParameterError> {
        positive("direct_sk_stretch", value)
    }

    pub fn detuned_band_weight(value: f32) -> Result<f32, ParameterError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::OutOfRange { field: "detuned_band_weight", value })
        }
    }

    pub fn starting_freq_a(value: f32) -> Result<f32, ParameterError> {
        if value.is_finite() && value > 0.0 {
            let octave = (value / LOWEST_A_HZ).log2().round() as i32;
            if (0..=HIGHEST_STARTING_OCTAVE).contains(&octave) {
                let exact = LOWEST_A_HZ * 2f32.powi(octave);
                if (value - exact).abs() < 1e-3 {
                    return Ok(exact);
                }
            }
        }
        Err(ParameterError::NotAnA { value })
    }

    /// An empty profile always passes; otherwise it must cover every band.
    pub fn custom_tone_profile(
        profile: &[f32],
        octaves: u32,
        bins_per_octave: u32,
    ) -> Result<(), ParameterError> {
        if profile.is_empty() {
            return Ok(());
        }
        let expected = octaves as usize * bins_per_octave as usize;
        if profile.len() != expected {
            return Err(ParameterError::ToneProfileLength { expected, actual: profile.len() });
        }
        if let Some(index) = profile.iter().position(|v| !v.is_finite()) {
            return Err(ParameterError::NonFiniteProfile { index });
        }
        Ok(())
    }
}

/// Check a hand-built parameter record, collecting every violation.
pub fn validate_all(params: &EngineParameters) -> Result<(), Vec<ParameterError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate::fft_frame_size(params.fft_frame_size) {
        errors.push(e);
    }
    if let Err(e) = validate::hops_per_frame(params.hops_per_frame) {
        errors.push(e);
    }
    if let Err(e) = validate::octaves(params.octaves) {
        errors.push(e);
    }
    if let Err(e) = validate::bins_per_octave(params.bins_per_octave) {
        errors.push(e);
    }
    if let Err(e) = validate::arbitrary_segments(params.arbitrary_segments) {
        errors.push(e);
    }
    if let Err(e) = validate::seg_peak_picking_neighbours(params.seg_peak_picking_neighbours) {
        errors.push(e);
    }
    if let Err(e) = validate::seg_gaussian_size(params.seg_gaussian_size) {
        errors.push(e);
    }
    if let Err(e) = validate::seg_gaussian_sigma(params.seg_gaussian_sigma) {
        errors.push(e);
    }
    if let Err(e) = validate::starting_freq_a(params.starting_freq_a) {
        errors.push(e);
    }
    if let Err(e) = validate::direct_sk_stretch(params.direct_sk_stretch) {
        errors.push(e);
    }
    if let Err(e) = validate::detuned_band_weight(params.detuned_band_weight) {
        errors.push(e);
    }
    if let Err(e) = validate::custom_tone_profile(
        &params.custom_tone_profile,
        params.octaves,
        params.bins_per_octave,
    ) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
