use std::fmt::Debug;

use keyprefs_types::{
    EngineParameters, KeyCodeCatalog, LibraryKind, MetadataField, Ordinal, WindowBlob, KEY_COUNT,
};

use crate::engine::{validate, ParameterError};
use crate::store::{SettingValue, SettingsStore};

use super::{keys, PreferenceSet};

/// Reads typed values out of a store, replacing anything unusable with the
/// caller's default and logging what was replaced.
struct Reader<'a> {
    store: &'a dyn SettingsStore,
    recovered: usize,
}

impl<'a> Reader<'a> {
    fn new(store: &'a dyn SettingsStore) -> Self {
        Self { store, recovered: 0 }
    }

    /// The stored value, or `default` when the key was never written or the
    /// store could not be read.
    fn value(&mut self, key: &str, default: SettingValue) -> SettingValue {
        match self.store.get_or(key, default.clone()) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(target: "preferences", "could not read '{}': {}; using default", key, e);
                self.recovered += 1;
                default
            }
        }
    }

    fn reject<T: Debug>(&mut self, key: &str, reason: impl std::fmt::Display, default: T) -> T {
        log::warn!(
            target: "preferences",
            "ignoring stored '{}' ({}); using default {:?}",
            key, reason, default
        );
        self.recovered += 1;
        default
    }

    fn bool(&mut self, key: &str, default: bool) -> bool {
        match self.value(key, SettingValue::Bool(default)) {
            SettingValue::Bool(b) => b,
            other => self.reject(key, format!("expected bool, found {}", other.kind()), default),
        }
    }

    fn choice<T: Ordinal + Debug>(&mut self, key: &str, default: T) -> T {
        match self.value(key, SettingValue::Int(default.ordinal())) {
            SettingValue::Int(ordinal) => match T::from_ordinal(ordinal) {
                Some(value) => value,
                None => self.reject(key, format!("unknown ordinal {}", ordinal), default),
            },
            other => self.reject(key, format!("expected ordinal, found {}", other.kind()), default),
        }
    }

    fn unsigned(&mut self, key: &str, default: u32) -> u32 {
        self.count(key, default, Ok)
    }

    fn count(
        &mut self,
        key: &str,
        default: u32,
        check: fn(u32) -> Result<u32, ParameterError>,
    ) -> u32 {
        match self.value(key, SettingValue::Int(i64::from(default))) {
            SettingValue::Int(i) => match u32::try_from(i) {
                Ok(value) => match check(value) {
                    Ok(value) => value,
                    Err(e) => self.reject(key, e, default),
                },
                Err(_) => self.reject(key, format!("{} is out of range", i), default),
            },
            other => self.reject(key, format!("expected int, found {}", other.kind()), default),
        }
    }

    fn real(
        &mut self,
        key: &str,
        default: f32,
        check: fn(f32) -> Result<f32, ParameterError>,
    ) -> f32 {
        match self.value(key, SettingValue::Float(f64::from(default))) {
            SettingValue::Float(f) => match check(f as f32) {
                Ok(value) => value,
                Err(e) => self.reject(key, e, default),
            },
            other => self.reject(key, format!("expected float, found {}", other.kind()), default),
        }
    }

    fn text(&mut self, key: &str, default: String) -> String {
        match self.value(key, SettingValue::Text(default.clone())) {
            SettingValue::Text(s) => s,
            other => self.reject(key, format!("expected text, found {}", other.kind()), default),
        }
    }

    fn non_empty_text(&mut self, key: &str, default: String) -> String {
        let text = self.text(key, default.clone());
        if text.is_empty() {
            return self.reject(key, "empty", default);
        }
        text
    }

    fn text_list(&mut self, key: &str) -> Vec<String> {
        match self.value(key, SettingValue::TextList(Vec::new())) {
            SettingValue::TextList(list) => list,
            other => self.reject(key, format!("expected text list, found {}", other.kind()), Vec::new()),
        }
    }

    fn float_list(&mut self, key: &str) -> Vec<f32> {
        match self.value(key, SettingValue::FloatList(Vec::new())) {
            SettingValue::FloatList(list) => list.into_iter().map(|v| v as f32).collect(),
            other => self.reject(key, format!("expected float list, found {}", other.kind()), Vec::new()),
        }
    }

    fn blob(&mut self, key: &str) -> Vec<u8> {
        match self.value(key, SettingValue::Blob(Vec::new())) {
            SettingValue::Blob(bytes) => bytes,
            other => self.reject(key, format!("expected blob, found {}", other.kind()), Vec::new()),
        }
    }
}

pub(super) fn load(store: &dyn SettingsStore) -> PreferenceSet {
    let defaults = PreferenceSet::default();
    let mut r = Reader::new(store);

    let key_codes = {
        let labels = r.text_list(keys::CUSTOM_KEY_CODES);
        match labels.len() {
            0 => KeyCodeCatalog::new(),
            KEY_COUNT => match KeyCodeCatalog::with_custom(labels) {
                Ok(catalog) => catalog,
                Err(e) => r.reject(keys::CUSTOM_KEY_CODES, e, KeyCodeCatalog::new()),
            },
            n => r.reject(
                keys::CUSTOM_KEY_CODES,
                format!("{} labels instead of {}", n, KEY_COUNT),
                KeyCodeCatalog::new(),
            ),
        }
    };

    let engine = load_engine(&mut r, &defaults.engine);

    let prefs = PreferenceSet {
        write_to_files_automatically: r.bool(
            keys::WRITE_TO_FILES_AUTOMATICALLY,
            defaults.write_to_files_automatically,
        ),
        parallel_batch_jobs: r.bool(keys::PARALLEL_BATCH_JOBS, defaults.parallel_batch_jobs),
        skip_files_with_existing_tags: r.bool(
            keys::SKIP_FILES_WITH_EXISTING_TAGS,
            defaults.skip_files_with_existing_tags,
        ),
        max_duration: r.unsigned(keys::MAX_DURATION, defaults.max_duration),
        metadata_write_comment: r.choice(
            keys::metadata_write(MetadataField::Comment),
            defaults.metadata_write_comment,
        ),
        metadata_write_grouping: r.choice(
            keys::metadata_write(MetadataField::Grouping),
            defaults.metadata_write_grouping,
        ),
        metadata_write_key: r.choice(
            keys::metadata_write(MetadataField::Key),
            defaults.metadata_write_key,
        ),
        metadata_write_filename: r.choice(
            keys::metadata_write(MetadataField::Filename),
            defaults.metadata_write_filename,
        ),
        metadata_format: r.choice(keys::METADATA_FORMAT, defaults.metadata_format),
        metadata_delimiter: r.text(keys::METADATA_DELIMITER, defaults.metadata_delimiter),
        key_codes,
        itunes_library_path: r.non_empty_text(
            keys::library_path(LibraryKind::ITunes),
            defaults.itunes_library_path,
        ),
        traktor_library_path: r.non_empty_text(
            keys::library_path(LibraryKind::Traktor),
            defaults.traktor_library_path,
        ),
        serato_library_path: r.non_empty_text(
            keys::library_path(LibraryKind::Serato),
            defaults.serato_library_path,
        ),
        batch_window_state: r.blob(keys::window_blob(WindowBlob::State)),
        batch_window_geometry: r.blob(keys::window_blob(WindowBlob::Geometry)),
        batch_window_splitter_state: r.blob(keys::window_blob(WindowBlob::SplitterState)),
        chromagram_theme: r.choice(keys::CHROMAGRAM_THEME, defaults.chromagram_theme),
        engine,
    };

    if r.recovered > 0 {
        log::warn!(target: "preferences", "{} stored preference(s) replaced by defaults", r.recovered);
    } else {
        log::debug!(target: "preferences", "preferences loaded");
    }
    prefs
}

fn load_engine(r: &mut Reader<'_>, defaults: &EngineParameters) -> EngineParameters {
    let octaves = r.count(keys::OCTAVES, defaults.octaves, validate::octaves);
    let bins_per_octave = r.count(keys::BINS_PER_OCTAVE, defaults.bins_per_octave, validate::bins_per_octave);

    let profile = r.float_list(keys::CUSTOM_TONE_PROFILE);
    let custom_tone_profile = match validate::custom_tone_profile(&profile, octaves, bins_per_octave) {
        Ok(()) => profile,
        Err(e) => r.reject(keys::CUSTOM_TONE_PROFILE, e, Vec::new()),
    };

    EngineParameters {
        offset_to_c: r.bool(keys::OFFSET_TO_C, defaults.offset_to_c),
        temporal_window: r.choice(keys::TEMPORAL_WINDOW, defaults.temporal_window),
        segmentation: r.choice(keys::SEGMENTATION, defaults.segmentation),
        similarity_measure: r.choice(keys::SIMILARITY_MEASURE, defaults.similarity_measure),
        tuning_method: r.choice(keys::TUNING_METHOD, defaults.tuning_method),
        tone_profile: r.choice(keys::TONE_PROFILE, defaults.tone_profile),
        fft_frame_size: r.count(keys::FFT_FRAME_SIZE, defaults.fft_frame_size, validate::fft_frame_size),
        hops_per_frame: r.count(keys::HOPS_PER_FRAME, defaults.hops_per_frame, validate::hops_per_frame),
        octaves,
        bins_per_octave,
        arbitrary_segments: r.count(
            keys::ARBITRARY_SEGMENTS,
            defaults.arbitrary_segments,
            validate::arbitrary_segments,
        ),
        seg_peak_picking_neighbours: r.count(
            keys::SEG_PEAK_PICKING_NEIGHBOURS,
            defaults.seg_peak_picking_neighbours,
            validate::seg_peak_picking_neighbours,
        ),
        seg_gaussian_size: r.count(
            keys::SEG_GAUSSIAN_SIZE,
            defaults.seg_gaussian_size,
            validate::seg_gaussian_size,
        ),
        seg_gaussian_sigma: r.real(
            keys::SEG_GAUSSIAN_SIGMA,
            defaults.seg_gaussian_sigma,
            validate::seg_gaussian_sigma,
        ),
        starting_freq_a: r.real(keys::STARTING_FREQ_A, defaults.starting_freq_a, validate::starting_freq_a),
        direct_sk_stretch: r.real(
            keys::DIRECT_SK_STRETCH,
            defaults.direct_sk_stretch,
            validate::direct_sk_stretch,
        ),
        detuned_band_weight: r.real(
            keys::DETUNED_BAND_WEIGHT,
            defaults.detuned_band_weight,
            validate::detuned_band_weight,
        ),
        custom_tone_profile,
    }
}
