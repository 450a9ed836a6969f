//! Parameter record handed to the key-detection engine.
//!
//! The engine itself lives elsewhere; this crate only describes what it is fed.

use serde::{Deserialize, Serialize};

define_ordinal_enum! {
    /// Window applied to each FFT frame.
    pub enum TemporalWindow {
        Blackman => 0, "blackman",
        Hann => 1, "hann",
        Hamming => 2, "hamming",
    }
}

define_ordinal_enum! {
    /// How the chromagram is split into segments before key estimation.
    pub enum Segmentation {
        None => 0, "none",
        Arbitrary => 1, "arbitrary",
        Cosine => 2, "cosine",
        Harte => 3, "harte",
    }
}

define_ordinal_enum! {
    pub enum SimilarityMeasure {
        Cosine => 0, "cosine",
        Correlation => 1, "correlation",
    }
}

define_ordinal_enum! {
    pub enum TuningMethod {
        Harte => 0, "harte",
        BandAdaptive => 1, "band-adaptive",
    }
}

define_ordinal_enum! {
    /// Reference key profile the chroma vector is compared against.
    pub enum ToneProfile {
        Temperley => 0, "temperley",
        Gomez => 1, "gomez",
        Shaath => 2, "shaath",
        Krumhansl => 3, "krumhansl",
        /// Uses [`EngineParameters::custom_tone_profile`] when it is usable.
        Custom => 4, "custom",
    }
}

/// Lowest A the spectral analysis may start on (A0).
pub const LOWEST_A_HZ: f32 = 27.5;

/// Configuration consumed by the key-detection engine.
///
/// Built and validated by the preferences layer; read-only once a batch run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParameters {
    pub offset_to_c: bool,
    pub temporal_window: TemporalWindow,
    pub segmentation: Segmentation,
    pub similarity_measure: SimilarityMeasure,
    pub tuning_method: TuningMethod,
    pub tone_profile: ToneProfile,
    pub fft_frame_size: u32,
    pub hops_per_frame: u32,
    pub octaves: u32,
    pub bins_per_octave: u32,
    pub arbitrary_segments: u32,
    pub seg_peak_picking_neighbours: u32,
    pub seg_gaussian_size: u32,
    pub seg_gaussian_sigma: f32,
    pub starting_freq_a: f32,
    pub direct_sk_stretch: f32,
    pub detuned_band_weight: f32,
    /// One weight per analysis band; empty when no custom profile is set.
    pub custom_tone_profile: Vec<f32>,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            offset_to_c: true,
            temporal_window: TemporalWindow::Blackman,
            segmentation: Segmentation::None,
            similarity_measure: SimilarityMeasure::Cosine,
            tuning_method: TuningMethod::Harte,
            tone_profile: ToneProfile::Shaath,
            fft_frame_size: 16384,
            hops_per_frame: 4,
            octaves: 6,
            bins_per_octave: 12,
            arbitrary_segments: 3,
            seg_peak_picking_neighbours: 4,
            seg_gaussian_size: 35,
            seg_gaussian_sigma: 8.0,
            starting_freq_a: LOWEST_A_HZ,
            direct_sk_stretch: 0.8,
            detuned_band_weight: 0.2,
            custom_tone_profile: Vec::new(),
        }
    }
}

impl EngineParameters {
    /// Total number of analysis bands.
    pub fn band_count(&self) -> usize {
        self.octaves as usize * self.bins_per_octave as usize
    }

    /// Centre frequency of the highest analysis band.
    pub fn last_freq(&self) -> f32 {
        let bpo = self.bins_per_octave.max(1) as f32;
        let top_band = self.octaves.saturating_mul(self.bins_per_octave).saturating_sub(1) as f32;
        self.starting_freq_a * 2f32.powf(top_band / bpo)
    }

    /// The custom profile, if one is set and still matches the band layout.
    pub fn effective_custom_tone_profile(&self) -> Option<&[f32]> {
        if self.custom_tone_profile.is_empty() || self.custom_tone_profile.len() != self.band_count() {
            None
        } else {
            Some(&self.custom_tone_profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_freq_of_default_layout_is_g_sharp_6() {
        let params = EngineParameters::default();
        // 27.5 * 2^(71/12)
        assert!((params.last_freq() - 1661.22).abs() < 0.1);
    }

    #[test]
    fn custom_profile_requires_matching_length() {
        let mut params = EngineParameters::default();
        assert!(params.effective_custom_tone_profile().is_none());

        params.custom_tone_profile = vec![1.0; 72];
        assert_eq!(params.effective_custom_tone_profile().map(<[f32]>::len), Some(72));

        params.octaves = 5;
        assert!(params.effective_custom_tone_profile().is_none());
    }
}
