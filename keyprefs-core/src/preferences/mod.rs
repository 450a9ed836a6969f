//! The validated preference model.
//!
//! A `PreferenceSet` is an explicitly constructed value: build one with
//! [`PreferenceSet::default`] or [`PreferenceSet::load`], pass it to whatever needs
//! it, and persist it with [`PreferenceSet::save`]. Mutators only touch memory.
//!
//! Engine parameters are validated when they are set (a bad value is rejected and
//! the previous one kept). Everything is validated again on load, where a bad stored
//! value is replaced by that field's default instead.

pub mod keys;
mod load;
mod save;
#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use keyprefs_types::{
    ChromaTheme, EngineParameters, KeyCodeCatalog, KeyCodeError, LibraryKind, MetadataField,
    MetadataFormat, MetadataWrite, Rgb, Segmentation, SimilarityMeasure, TemporalWindow,
    ToneProfile, TuningMethod, WindowBlob,
};

use crate::engine::{validate, ParameterError};
use crate::palette;
use crate::store::{SettingsStore, StoreResult};

/// Default tag delimiter between custom and canonical key codes.
pub const DEFAULT_METADATA_DELIMITER: &str = " - ";

/// Default batch duration limit in seconds (0 = unlimited).
pub const DEFAULT_MAX_DURATION: u32 = 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceError {
    EmptyLibraryPath(LibraryKind),
    KeyCodes(KeyCodeError),
    Parameter(ParameterError),
}

impl From<KeyCodeError> for PreferenceError {
    fn from(e: KeyCodeError) -> Self {
        Self::KeyCodes(e)
    }
}

impl From<ParameterError> for PreferenceError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLibraryPath(kind) => write!(f, "{} library path must not be empty", kind.name()),
            Self::KeyCodes(e) => write!(f, "{}", e),
            Self::Parameter(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Every user preference, validated.
///
/// `Clone` is a deep copy: blobs, labels and the tone profile are owned.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSet {
    // batch behaviour
    write_to_files_automatically: bool,
    parallel_batch_jobs: bool,
    skip_files_with_existing_tags: bool,
    max_duration: u32,

    // metadata policy
    metadata_write_comment: MetadataWrite,
    metadata_write_grouping: MetadataWrite,
    metadata_write_key: MetadataWrite,
    metadata_write_filename: MetadataWrite,
    metadata_format: MetadataFormat,
    metadata_delimiter: String,
    key_codes: KeyCodeCatalog,

    itunes_library_path: String,
    traktor_library_path: String,
    serato_library_path: String,

    // opaque front-end state
    batch_window_state: Vec<u8>,
    batch_window_geometry: Vec<u8>,
    batch_window_splitter_state: Vec<u8>,

    chromagram_theme: ChromaTheme,

    engine: EngineParameters,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            write_to_files_automatically: false,
            parallel_batch_jobs: true,
            skip_files_with_existing_tags: false,
            max_duration: DEFAULT_MAX_DURATION,
            metadata_write_comment: MetadataField::Comment.default_write(),
            metadata_write_grouping: MetadataField::Grouping.default_write(),
            metadata_write_key: MetadataField::Key.default_write(),
            metadata_write_filename: MetadataField::Filename.default_write(),
            metadata_format: MetadataFormat::default(),
            metadata_delimiter: DEFAULT_METADATA_DELIMITER.to_string(),
            key_codes: KeyCodeCatalog::new(),
            itunes_library_path: default_library_path(LibraryKind::ITunes),
            traktor_library_path: default_library_path(LibraryKind::Traktor),
            serato_library_path: default_library_path(LibraryKind::Serato),
            batch_window_state: Vec::new(),
            batch_window_geometry: Vec::new(),
            batch_window_splitter_state: Vec::new(),
            chromagram_theme: ChromaTheme::default(),
            engine: EngineParameters::default(),
        }
    }
}

/// Where each DJ library usually lives, under the user's home directory.
pub fn default_library_path(kind: LibraryKind) -> String {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = match kind {
        LibraryKind::ITunes => home.join("Music").join("iTunes").join("iTunes Music Library.xml"),
        LibraryKind::Traktor => home
            .join("Documents")
            .join("Native Instruments")
            .join("Traktor")
            .join("collection.nml"),
        LibraryKind::Serato => home.join("Music").join("_Serato_").join("database V2"),
    };
    path.to_string_lossy().into_owned()
}

impl PreferenceSet {
    /// Read every field from `store`. Never fails: anything missing or unusable
    /// takes that field's default.
    pub fn load(store: &dyn SettingsStore) -> Self {
        load::load(store)
    }

    /// Write every field to `store`, whether or not it changed.
    pub fn save(&self, store: &mut dyn SettingsStore) -> StoreResult<()> {
        store.put_batch(save::entries(self))?;
        log::info!(target: "preferences", "preferences saved");
        Ok(())
    }

    // ---- batch behaviour ----

    pub fn write_to_files_automatically(&self) -> bool {
        self.write_to_files_automatically
    }

    pub fn set_write_to_files_automatically(&mut self, value: bool) {
        self.write_to_files_automatically = value;
    }

    pub fn parallel_batch_jobs(&self) -> bool {
        self.parallel_batch_jobs
    }

    pub fn set_parallel_batch_jobs(&mut self, value: bool) {
        self.parallel_batch_jobs = value;
    }

    pub fn skip_files_with_existing_tags(&self) -> bool {
        self.skip_files_with_existing_tags
    }

    pub fn set_skip_files_with_existing_tags(&mut self, value: bool) {
        self.skip_files_with_existing_tags = value;
    }

    /// Longest file (in seconds) a batch run will analyse; 0 means no limit.
    pub fn max_duration(&self) -> u32 {
        self.max_duration
    }

    pub fn set_max_duration(&mut self, seconds: u32) {
        self.max_duration = seconds;
    }

    // ---- metadata policy ----

    pub fn metadata_write(&self, field: MetadataField) -> MetadataWrite {
        match field {
            MetadataField::Comment => self.metadata_write_comment,
            MetadataField::Grouping => self.metadata_write_grouping,
            MetadataField::Key => self.metadata_write_key,
            MetadataField::Filename => self.metadata_write_filename,
        }
    }

    pub fn set_metadata_write(&mut self, field: MetadataField, mode: MetadataWrite) {
        let slot = match field {
            MetadataField::Comment => &mut self.metadata_write_comment,
            MetadataField::Grouping => &mut self.metadata_write_grouping,
            MetadataField::Key => &mut self.metadata_write_key,
            MetadataField::Filename => &mut self.metadata_write_filename,
        };
        *slot = mode;
    }

    pub fn metadata_format(&self) -> MetadataFormat {
        self.metadata_format
    }

    pub fn set_metadata_format(&mut self, format: MetadataFormat) {
        self.metadata_format = format;
    }

    pub fn metadata_delimiter(&self) -> &str {
        &self.metadata_delimiter
    }

    pub fn set_metadata_delimiter(&mut self, delimiter: impl Into<String>) {
        self.metadata_delimiter = delimiter.into();
    }

    pub fn key_codes(&self) -> &KeyCodeCatalog {
        &self.key_codes
    }

    /// Override all 24 key codes at once. Any other count is rejected.
    pub fn set_custom_key_codes(&mut self, labels: Vec<String>) -> Result<(), PreferenceError> {
        self.key_codes.set_custom(labels)?;
        Ok(())
    }

    pub fn clear_custom_key_codes(&mut self) {
        self.key_codes.clear_custom();
    }

    /// Text to write into a tag for the key at `index`, per the metadata format.
    pub fn tag_text(&self, index: usize) -> Result<String, KeyCodeError> {
        self.key_codes
            .tag_text(index, self.metadata_format, &self.metadata_delimiter)
    }

    // ---- library paths ----

    pub fn library_path(&self, kind: LibraryKind) -> &str {
        match kind {
            LibraryKind::ITunes => &self.itunes_library_path,
            LibraryKind::Traktor => &self.traktor_library_path,
            LibraryKind::Serato => &self.serato_library_path,
        }
    }

    pub fn set_library_path(
        &mut self,
        kind: LibraryKind,
        path: impl Into<String>,
    ) -> Result<(), PreferenceError> {
        let path = path.into();
        if path.is_empty() {
            return Err(PreferenceError::EmptyLibraryPath(kind));
        }
        let slot = match kind {
            LibraryKind::ITunes => &mut self.itunes_library_path,
            LibraryKind::Traktor => &mut self.traktor_library_path,
            LibraryKind::Serato => &mut self.serato_library_path,
        };
        *slot = path;
        Ok(())
    }

    // ---- opaque window state ----

    pub fn window_blob(&self, blob: WindowBlob) -> &[u8] {
        match blob {
            WindowBlob::State => &self.batch_window_state,
            WindowBlob::Geometry => &self.batch_window_geometry,
            WindowBlob::SplitterState => &self.batch_window_splitter_state,
        }
    }

    pub fn set_window_blob(&mut self, blob: WindowBlob, bytes: Vec<u8>) {
        let slot = match blob {
            WindowBlob::State => &mut self.batch_window_state,
            WindowBlob::Geometry => &mut self.batch_window_geometry,
            WindowBlob::SplitterState => &mut self.batch_window_splitter_state,
        };
        *slot = bytes;
    }

    // ---- display ----

    pub fn chromagram_theme(&self) -> ChromaTheme {
        self.chromagram_theme
    }

    pub fn set_chromagram_theme(&mut self, theme: ChromaTheme) {
        self.chromagram_theme = theme;
    }

    /// Swatch colour for a key index under the current chromagram theme.
    pub fn key_colour(&self, index: usize) -> Result<Rgb, KeyCodeError> {
        palette::key_colour(index, self.chromagram_theme)
    }

    // ---- engine parameters ----

    pub fn engine(&self) -> &EngineParameters {
        &self.engine
    }

    /// Immutable copy for a batch run. Workers share it read-only; later changes
    /// to this `PreferenceSet` do not reach it.
    pub fn engine_snapshot(&self) -> Arc<EngineParameters> {
        Arc::new(self.engine.clone())
    }

    pub fn set_offset_to_c(&mut self, value: bool) {
        self.engine.offset_to_c = value;
    }

    pub fn set_temporal_window(&mut self, window: TemporalWindow) {
        self.engine.temporal_window = window;
    }

    pub fn set_segmentation(&mut self, segmentation: Segmentation) {
        self.engine.segmentation = segmentation;
    }

    pub fn set_similarity_measure(&mut self, measure: SimilarityMeasure) {
        self.engine.similarity_measure = measure;
    }

    pub fn set_tuning_method(&mut self, method: TuningMethod) {
        self.engine.tuning_method = method;
    }

    pub fn set_tone_profile(&mut self, profile: ToneProfile) {
        self.engine.tone_profile = profile;
    }

    pub fn set_fft_frame_size(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.fft_frame_size = validate::fft_frame_size(value)?;
        Ok(())
    }

    pub fn set_hops_per_frame(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.hops_per_frame = validate::hops_per_frame(value)?;
        Ok(())
    }

    /// A custom tone profile sized for the old layout is dropped.
    pub fn set_octaves(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.octaves = validate::octaves(value)?;
        self.drop_mismatched_tone_profile();
        Ok(())
    }

    /// A custom tone profile sized for the old layout is dropped.
    pub fn set_bins_per_octave(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.bins_per_octave = validate::bins_per_octave(value)?;
        self.drop_mismatched_tone_profile();
        Ok(())
    }

    fn drop_mismatched_tone_profile(&mut self) {
        let engine = &mut self.engine;
        if !engine.custom_tone_profile.is_empty()
            && engine.custom_tone_profile.len() != engine.band_count()
        {
            log::info!(
                target: "preferences",
                "custom tone profile has {} values but the layout needs {}; dropped",
                engine.custom_tone_profile.len(),
                engine.band_count()
            );
            engine.custom_tone_profile.clear();
        }
    }

    pub fn set_arbitrary_segments(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.arbitrary_segments = validate::arbitrary_segments(value)?;
        Ok(())
    }

    pub fn set_seg_peak_picking_neighbours(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.seg_peak_picking_neighbours = validate::seg_peak_picking_neighbours(value)?;
        Ok(())
    }

    pub fn set_seg_gaussian_size(&mut self, value: u32) -> Result<(), ParameterError> {
        self.engine.seg_gaussian_size = validate::seg_gaussian_size(value)?;
        Ok(())
    }

    pub fn set_seg_gaussian_sigma(&mut self, value: f32) -> Result<(), ParameterError> {
        self.engine.seg_gaussian_sigma = validate::seg_gaussian_sigma(value)?;
        Ok(())
    }

    pub fn set_starting_freq_a(&mut self, value: f32) -> Result<(), ParameterError> {
        self.engine.starting_freq_a = validate::starting_freq_a(value)?;
        Ok(())
    }

    pub fn set_direct_sk_stretch(&mut self, value: f32) -> Result<(), ParameterError> {
        self.engine.direct_sk_stretch = validate::direct_sk_stretch(value)?;
        Ok(())
    }

    pub fn set_detuned_band_weight(&mut self, value: f32) -> Result<(), ParameterError> {
        self.engine.detuned_band_weight = validate::detuned_band_weight(value)?;
        Ok(())
    }

    /// Must hold exactly `octaves * bins_per_octave` finite values.
    pub fn set_custom_tone_profile(&mut self, profile: Vec<f32>) -> Result<(), ParameterError> {
        validate::custom_tone_profile(&profile, self.engine.octaves, self.engine.bins_per_octave)?;
        self.engine.custom_tone_profile = profile;
        Ok(())
    }

    pub fn clear_custom_tone_profile(&mut self) {
        self.engine.custom_tone_profile.clear();
    }
}
