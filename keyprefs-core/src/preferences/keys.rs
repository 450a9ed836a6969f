//! Persisted key names. Renaming any of these orphans existing user settings.

use keyprefs_types::{LibraryKind, MetadataField, WindowBlob};

pub const WRITE_TO_FILES_AUTOMATICALLY: &str = "batch/write_to_files_automatically";
pub const PARALLEL_BATCH_JOBS: &str = "batch/parallel_batch_jobs";
pub const SKIP_FILES_WITH_EXISTING_TAGS: &str = "batch/skip_files_with_existing_tags";
pub const MAX_DURATION: &str = "batch/max_duration_seconds";

pub const METADATA_WRITE_COMMENT: &str = "metadata/write_comment";
pub const METADATA_WRITE_GROUPING: &str = "metadata/write_grouping";
pub const METADATA_WRITE_KEY: &str = "metadata/write_key";
pub const METADATA_WRITE_FILENAME: &str = "metadata/write_filename";
pub const METADATA_FORMAT: &str = "metadata/format";
pub const METADATA_DELIMITER: &str = "metadata/delimiter";
pub const CUSTOM_KEY_CODES: &str = "metadata/custom_key_codes";

pub const ITUNES_LIBRARY_PATH: &str = "library/itunes_path";
pub const TRAKTOR_LIBRARY_PATH: &str = "library/traktor_path";
pub const SERATO_LIBRARY_PATH: &str = "library/serato_path";

pub const BATCH_WINDOW_STATE: &str = "ui/batch_window_state";
pub const BATCH_WINDOW_GEOMETRY: &str = "ui/batch_window_geometry";
pub const BATCH_WINDOW_SPLITTER_STATE: &str = "ui/batch_window_splitter_state";

pub const CHROMAGRAM_THEME: &str = "display/chromagram_theme";

pub const OFFSET_TO_C: &str = "engine/offset_to_c";
pub const TEMPORAL_WINDOW: &str = "engine/temporal_window";
pub const SEGMENTATION: &str = "engine/segmentation";
pub const SIMILARITY_MEASURE: &str = "engine/similarity_measure";
pub const TUNING_METHOD: &str = "engine/tuning_method";
pub const TONE_PROFILE: &str = "engine/tone_profile";
pub const FFT_FRAME_SIZE: &str = "engine/fft_frame_size";
pub const HOPS_PER_FRAME: &str = "engine/hops_per_frame";
pub const OCTAVES: &str = "engine/octaves";
pub const BINS_PER_OCTAVE: &str = "engine/bins_per_octave";
pub const ARBITRARY_SEGMENTS: &str = "engine/arbitrary_segments";
pub const SEG_PEAK_PICKING_NEIGHBOURS: &str = "engine/seg_peak_picking_neighbours";
pub const SEG_GAUSSIAN_SIZE: &str = "engine/seg_gaussian_size";
pub const SEG_GAUSSIAN_SIGMA: &str = "engine/seg_gaussian_sigma";
pub const STARTING_FREQ_A: &str = "engine/starting_freq_a";
pub const DIRECT_SK_STRETCH: &str = "engine/direct_sk_stretch";
pub const DETUNED_BAND_WEIGHT: &str = "engine/detuned_band_weight";
pub const CUSTOM_TONE_PROFILE: &str = "engine/custom_tone_profile";

pub fn metadata_write(field: MetadataField) -> &'static str {
    match field {
        MetadataField::Comment => METADATA_WRITE_COMMENT,
        MetadataField::Grouping => METADATA_WRITE_GROUPING,
        MetadataField::Key => METADATA_WRITE_KEY,
        MetadataField::Filename => METADATA_WRITE_FILENAME,
    }
}

pub fn library_path(kind: LibraryKind) -> &'static str {
    match kind {
        LibraryKind::ITunes => ITUNES_LIBRARY_PATH,
        LibraryKind::Traktor => TRAKTOR_LIBRARY_PATH,
        LibraryKind::Serato => SERATO_LIBRARY_PATH,
    }
}

pub fn window_blob(blob: WindowBlob) -> &'static str {
    match blob {
        WindowBlob::State => BATCH_WINDOW_STATE,
        WindowBlob::Geometry => BATCH_WINDOW_GEOMETRY,
        WindowBlob::SplitterState => BATCH_WINDOW_SPLITTER_STATE,
    }
}
