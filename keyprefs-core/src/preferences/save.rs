use keyprefs_types::{LibraryKind, MetadataField, Ordinal, WindowBlob};

use crate::store::SettingValue;

use super::{keys, PreferenceSet};

fn ordinal<T: Ordinal>(value: T) -> SettingValue {
    SettingValue::Int(value.ordinal())
}

fn count(value: u32) -> SettingValue {
    SettingValue::Int(i64::from(value))
}

fn real(value: f32) -> SettingValue {
    SettingValue::Float(f64::from(value))
}

/// Every field as a store entry. Full overwrite, no diffing.
pub(super) fn entries(prefs: &PreferenceSet) -> Vec<(&'static str, SettingValue)> {
    let engine = &prefs.engine;
    let custom_key_codes = prefs
        .key_codes
        .custom()
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let mut entries = vec![
        (keys::WRITE_TO_FILES_AUTOMATICALLY, SettingValue::Bool(prefs.write_to_files_automatically)),
        (keys::PARALLEL_BATCH_JOBS, SettingValue::Bool(prefs.parallel_batch_jobs)),
        (keys::SKIP_FILES_WITH_EXISTING_TAGS, SettingValue::Bool(prefs.skip_files_with_existing_tags)),
        (keys::MAX_DURATION, count(prefs.max_duration)),
        (keys::METADATA_FORMAT, ordinal(prefs.metadata_format)),
        (keys::METADATA_DELIMITER, SettingValue::Text(prefs.metadata_delimiter.clone())),
        (keys::CUSTOM_KEY_CODES, SettingValue::TextList(custom_key_codes)),
        (keys::CHROMAGRAM_THEME, ordinal(prefs.chromagram_theme)),
    ];

    for field in MetadataField::ALL {
        entries.push((keys::metadata_write(field), ordinal(prefs.metadata_write(field))));
    }
    for kind in LibraryKind::ALL {
        entries.push((keys::library_path(kind), SettingValue::Text(prefs.library_path(kind).to_string())));
    }
    for blob in WindowBlob::ALL {
        entries.push((keys::window_blob(blob), SettingValue::Blob(prefs.window_blob(blob).to_vec())));
    }

    entries.extend([
        (keys::OFFSET_TO_C, SettingValue::Bool(engine.offset_to_c)),
        (keys::TEMPORAL_WINDOW, ordinal(engine.temporal_window)),
        (keys::SEGMENTATION, ordinal(engine.segmentation)),
        (keys::SIMILARITY_MEASURE, ordinal(engine.similarity_measure)),
        (keys::TUNING_METHOD, ordinal(engine.tuning_method)),
        (keys::TONE_PROFILE, ordinal(engine.tone_profile)),
        (keys::FFT_FRAME_SIZE, count(engine.fft_frame_size)),
        (keys::HOPS_PER_FRAME, count(engine.hops_per_frame)),
        (keys::OCTAVES, count(engine.octaves)),
        (keys::BINS_PER_OCTAVE, count(engine.bins_per_octave)),
        (keys::ARBITRARY_SEGMENTS, count(engine.arbitrary_segments)),
        (keys::SEG_PEAK_PICKING_NEIGHBOURS, count(engine.seg_peak_picking_neighbours)),
        (keys::SEG_GAUSSIAN_SIZE, count(engine.seg_gaussian_size)),
        (keys::SEG_GAUSSIAN_SIGMA, real(engine.seg_gaussian_sigma)),
        (keys::STARTING_FREQ_A, real(engine.starting_freq_a)),
        (keys::DIRECT_SK_STRETCH, real(engine.direct_sk_stretch)),
        (keys::DETUNED_BAND_WEIGHT, real(engine.detuned_band_weight)),
        (
            keys::CUSTOM_TONE_PROFILE,
            SettingValue::FloatList(engine.custom_tone_profile.iter().map(|&v| f64::from(v)).collect()),
        ),
    ]);

    entries
}
