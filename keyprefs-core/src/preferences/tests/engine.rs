use std::sync::Arc;

use keyprefs_types::{EngineParameters, ToneProfile};

use crate::engine::{validate_all, ParameterError};
use crate::store::MemoryStore;

use super::PreferenceSet;

#[test]
fn rejected_fft_size_keeps_previous_value() {
    let mut prefs = PreferenceSet::default();
    assert_eq!(
        prefs.set_fft_frame_size(1000),
        Err(ParameterError::NotPowerOfTwo { field: "fft_frame_size", value: 1000 })
    );
    assert_eq!(prefs.engine().fft_frame_size, 16384);

    prefs.set_fft_frame_size(4096).unwrap();
    assert_eq!(prefs.engine().fft_frame_size, 4096);
}

#[test]
fn zero_counts_are_rejected() {
    let mut prefs = PreferenceSet::default();
    assert!(matches!(prefs.set_octaves(0), Err(ParameterError::Zero { field: "octaves" })));
    assert!(prefs.set_hops_per_frame(0).is_err());
    assert!(prefs.set_arbitrary_segments(0).is_err());
    assert!(prefs.set_seg_peak_picking_neighbours(0).is_err());
    assert!(prefs.set_seg_gaussian_size(0).is_err());
    assert_eq!(prefs, PreferenceSet::default());
}

#[test]
fn real_parameters_are_range_checked() {
    let mut prefs = PreferenceSet::default();
    assert!(prefs.set_seg_gaussian_sigma(0.0).is_err());
    assert!(prefs.set_direct_sk_stretch(f32::INFINITY).is_err());
    assert!(prefs.set_detuned_band_weight(-0.1).is_err());
    prefs.set_detuned_band_weight(0.0).unwrap();
    assert_eq!(prefs.engine().detuned_band_weight, 0.0);
}

#[test]
fn starting_frequency_moves_last_frequency() {
    let mut prefs = PreferenceSet::default();
    assert!(matches!(
        prefs.set_starting_freq_a(100.0),
        Err(ParameterError::NotAnA { .. })
    ));
    assert_eq!(prefs.engine().starting_freq_a, 27.5);

    let before = prefs.engine().last_freq();
    prefs.set_starting_freq_a(55.0).unwrap();
    let after = prefs.engine().last_freq();
    assert!((after / before - 2.0).abs() < 1e-3);
}

#[test]
fn tone_profile_length_follows_layout() {
    let mut prefs = PreferenceSet::default();
    assert_eq!(
        prefs.set_custom_tone_profile(vec![1.0; 12]),
        Err(ParameterError::ToneProfileLength { expected: 72, actual: 12 })
    );
    assert!(prefs.engine().custom_tone_profile.is_empty());

    prefs.set_custom_tone_profile(vec![1.0; 72]).unwrap();
    prefs.set_tone_profile(ToneProfile::Custom);
    assert_eq!(prefs.engine().effective_custom_tone_profile().map(<[f32]>::len), Some(72));

    // Same layout again keeps the profile.
    prefs.set_octaves(6).unwrap();
    assert_eq!(prefs.engine().custom_tone_profile.len(), 72);

    prefs.clear_custom_tone_profile();
    assert!(prefs.engine().custom_tone_profile.is_empty());
}

#[test]
fn layout_change_drops_mismatched_tone_profile() {
    let mut prefs = PreferenceSet::default();
    prefs.set_custom_tone_profile(vec![0.25; 72]).unwrap();
    prefs.set_octaves(4).unwrap();

    assert_eq!(prefs.engine().octaves, 4);
    assert!(prefs.engine().custom_tone_profile.is_empty());
    assert_eq!(validate_all(&prefs.engine_snapshot()), Ok(()));

    let mut store = MemoryStore::new();
    prefs.save(&mut store).unwrap();
    assert_eq!(PreferenceSet::load(&store), prefs);
}

#[test]
fn bins_change_drops_mismatched_tone_profile() {
    let mut prefs = PreferenceSet::default();
    prefs.set_custom_tone_profile(vec![1.0; 72]).unwrap();
    prefs.set_bins_per_octave(24).unwrap();

    assert!(prefs.engine().custom_tone_profile.is_empty());
    assert_eq!(validate_all(&prefs.engine_snapshot()), Ok(()));
}

#[test]
fn snapshot_is_isolated_from_later_changes() {
    let mut prefs = PreferenceSet::default();
    prefs.set_hops_per_frame(8).unwrap();
    let snapshot = prefs.engine_snapshot();

    prefs.set_hops_per_frame(2).unwrap();
    prefs.set_tone_profile(ToneProfile::Krumhansl);

    assert_eq!(snapshot.hops_per_frame, 8);
    assert_eq!(snapshot.tone_profile, ToneProfile::Shaath);
}

#[test]
fn snapshot_is_shared_read_only_across_workers() {
    let prefs = PreferenceSet::default();
    let snapshot: Arc<EngineParameters> = prefs.engine_snapshot();

    let seen: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let params = Arc::clone(&snapshot);
                scope.spawn(move || params.band_count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(seen.iter().all(|&bands| bands == 72));
    assert_eq!(Arc::strong_count(&snapshot), 1);
}
