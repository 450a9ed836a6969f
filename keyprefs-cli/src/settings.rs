//! Text rendering and parsing of single preferences, addressed by store key.

use std::fmt;
use std::str::FromStr;

use keyprefs_core::preferences::keys;
use keyprefs_core::{PreferenceError, PreferenceSet};
use keyprefs_types::{
    ChromaTheme, LibraryKind, MetadataField, MetadataFormat, MetadataWrite, Segmentation,
    SimilarityMeasure, TemporalWindow, ToneProfile, TuningMethod, WindowBlob,
};

#[derive(Debug)]
pub enum SettingError {
    Unknown(String),
    /// Front-end state and key codes are not edited through `set`.
    ReadOnly(&'static str),
    BadValue { name: String, value: String, expected: String },
    Rejected(PreferenceError),
}

impl From<PreferenceError> for SettingError {
    fn from(e: PreferenceError) -> Self {
        Self::Rejected(e)
    }
}

impl From<keyprefs_core::engine::ParameterError> for SettingError {
    fn from(e: keyprefs_core::engine::ParameterError) -> Self {
        Self::Rejected(e.into())
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "unknown setting '{}' (try `keyprefs show`)", name),
            Self::ReadOnly(name) => write!(f, "'{}' cannot be set from the command line", name),
            Self::BadValue { name, value, expected } => {
                write!(f, "bad value '{}' for {}: expected {}", value, name, expected)
            }
            Self::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SettingError {}

/// Every setting name, in display order.
pub const NAMES: &[&str] = &[
    keys::WRITE_TO_FILES_AUTOMATICALLY,
    keys::PARALLEL_BATCH_JOBS,
    keys::SKIP_FILES_WITH_EXISTING_TAGS,
    keys::MAX_DURATION,
    keys::METADATA_WRITE_COMMENT,
    keys::METADATA_WRITE_GROUPING,
    keys::METADATA_WRITE_KEY,
    keys::METADATA_WRITE_FILENAME,
    keys::METADATA_FORMAT,
    keys::METADATA_DELIMITER,
    keys::CUSTOM_KEY_CODES,
    keys::ITUNES_LIBRARY_PATH,
    keys::TRAKTOR_LIBRARY_PATH,
    keys::SERATO_LIBRARY_PATH,
    keys::BATCH_WINDOW_STATE,
    keys::BATCH_WINDOW_GEOMETRY,
    keys::BATCH_WINDOW_SPLITTER_STATE,
    keys::CHROMAGRAM_THEME,
    keys::OFFSET_TO_C,
    keys::TEMPORAL_WINDOW,
    keys::SEGMENTATION,
    keys::SIMILARITY_MEASURE,
    keys::TUNING_METHOD,
    keys::TONE_PROFILE,
    keys::FFT_FRAME_SIZE,
    keys::HOPS_PER_FRAME,
    keys::OCTAVES,
    keys::BINS_PER_OCTAVE,
    keys::ARBITRARY_SEGMENTS,
    keys::SEG_PEAK_PICKING_NEIGHBOURS,
    keys::SEG_GAUSSIAN_SIZE,
    keys::SEG_GAUSSIAN_SIGMA,
    keys::STARTING_FREQ_A,
    keys::DIRECT_SK_STRETCH,
    keys::DETUNED_BAND_WEIGHT,
    keys::CUSTOM_TONE_PROFILE,
];

fn metadata_field(name: &str) -> Option<MetadataField> {
    MetadataField::ALL.into_iter().find(|&f| keys::metadata_write(f) == name)
}

fn library_kind(name: &str) -> Option<LibraryKind> {
    LibraryKind::ALL.into_iter().find(|&k| keys::library_path(k) == name)
}

fn window_blob(name: &str) -> Option<WindowBlob> {
    WindowBlob::ALL.into_iter().find(|&b| keys::window_blob(b) == name)
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(T::to_string).collect::<Vec<_>>().join(",")
}

/// Current value of `name` as text, or `None` for an unknown name.
pub fn render(prefs: &PreferenceSet, name: &str) -> Option<String> {
    if let Some(field) = metadata_field(name) {
        return Some(prefs.metadata_write(field).to_string());
    }
    if let Some(kind) = library_kind(name) {
        return Some(prefs.library_path(kind).to_string());
    }
    if let Some(blob) = window_blob(name) {
        return Some(format!("<{} bytes>", prefs.window_blob(blob).len()));
    }

    let engine = prefs.engine();
    let text = match name {
        keys::WRITE_TO_FILES_AUTOMATICALLY => prefs.write_to_files_automatically().to_string(),
        keys::PARALLEL_BATCH_JOBS => prefs.parallel_batch_jobs().to_string(),
        keys::SKIP_FILES_WITH_EXISTING_TAGS => prefs.skip_files_with_existing_tags().to_string(),
        keys::MAX_DURATION => prefs.max_duration().to_string(),
        keys::METADATA_FORMAT => prefs.metadata_format().to_string(),
        keys::METADATA_DELIMITER => format!("{:?}", prefs.metadata_delimiter()),
        keys::CUSTOM_KEY_CODES => match prefs.key_codes().custom() {
            Some(labels) => join(labels),
            None => "<default>".to_string(),
        },
        keys::CHROMAGRAM_THEME => prefs.chromagram_theme().to_string(),
        keys::OFFSET_TO_C => engine.offset_to_c.to_string(),
        keys::TEMPORAL_WINDOW => engine.temporal_window.to_string(),
        keys::SEGMENTATION => engine.segmentation.to_string(),
        keys::SIMILARITY_MEASURE => engine.similarity_measure.to_string(),
        keys::TUNING_METHOD => engine.tuning_method.to_string(),
        keys::TONE_PROFILE => engine.tone_profile.to_string(),
        keys::FFT_FRAME_SIZE => engine.fft_frame_size.to_string(),
        keys::HOPS_PER_FRAME => engine.hops_per_frame.to_string(),
        keys::OCTAVES => engine.octaves.to_string(),
        keys::BINS_PER_OCTAVE => engine.bins_per_octave.to_string(),
        keys::ARBITRARY_SEGMENTS => engine.arbitrary_segments.to_string(),
        keys::SEG_PEAK_PICKING_NEIGHBOURS => engine.seg_peak_picking_neighbours.to_string(),
        keys::SEG_GAUSSIAN_SIZE => engine.seg_gaussian_size.to_string(),
        keys::SEG_GAUSSIAN_SIGMA => engine.seg_gaussian_sigma.to_string(),
        keys::STARTING_FREQ_A => format!(
            "{} (last band {:.2} Hz)",
            engine.starting_freq_a,
            engine.last_freq()
        ),
        keys::DIRECT_SK_STRETCH => engine.direct_sk_stretch.to_string(),
        keys::DETUNED_BAND_WEIGHT => engine.detuned_band_weight.to_string(),
        keys::CUSTOM_TONE_PROFILE => {
            if engine.custom_tone_profile.is_empty() {
                "<none>".to_string()
            } else {
                join(&engine.custom_tone_profile)
            }
        }
        _ => return None,
    };
    Some(text)
}

fn bad(name: &str, value: &str, expected: impl Into<String>) -> SettingError {
    SettingError::BadValue {
        name: name.to_string(),
        value: value.to_string(),
        expected: expected.into(),
    }
}

fn parse<T: FromStr>(name: &str, value: &str, expected: &str) -> Result<T, SettingError> {
    value.trim().parse().map_err(|_| bad(name, value, expected))
}

fn choice<T: Copy + fmt::Display>(
    name: &str,
    value: &str,
    all: &[T],
    from_name: fn(&str) -> Option<T>,
) -> Result<T, SettingError> {
    from_name(value.trim()).ok_or_else(|| {
        let names: Vec<String> = all.iter().map(T::to_string).collect();
        bad(name, value, format!("one of {}", names.join(", ")))
    })
}

/// Apply `value` to the setting `name` in memory.
pub fn apply(prefs: &mut PreferenceSet, name: &str, value: &str) -> Result<(), SettingError> {
    if let Some(field) = metadata_field(name) {
        let mode = choice(name, value, MetadataWrite::ALL, MetadataWrite::from_name)?;
        prefs.set_metadata_write(field, mode);
        return Ok(());
    }
    if let Some(kind) = library_kind(name) {
        prefs.set_library_path(kind, value)?;
        return Ok(());
    }
    if let Some(blob) = window_blob(name) {
        return Err(SettingError::ReadOnly(keys::window_blob(blob)));
    }

    match name {
        keys::WRITE_TO_FILES_AUTOMATICALLY => {
            prefs.set_write_to_files_automatically(parse(name, value, "true or false")?)
        }
        keys::PARALLEL_BATCH_JOBS => prefs.set_parallel_batch_jobs(parse(name, value, "true or false")?),
        keys::SKIP_FILES_WITH_EXISTING_TAGS => {
            prefs.set_skip_files_with_existing_tags(parse(name, value, "true or false")?)
        }
        keys::MAX_DURATION => prefs.set_max_duration(parse(name, value, "seconds")?),
        keys::METADATA_FORMAT => prefs.set_metadata_format(choice(
            name,
            value,
            MetadataFormat::ALL,
            MetadataFormat::from_name,
        )?),
        keys::METADATA_DELIMITER => prefs.set_metadata_delimiter(value),
        keys::CUSTOM_KEY_CODES => return Err(SettingError::ReadOnly(keys::CUSTOM_KEY_CODES)),
        keys::CHROMAGRAM_THEME => prefs.set_chromagram_theme(choice(
            name,
            value,
            ChromaTheme::ALL,
            ChromaTheme::from_name,
        )?),
        keys::OFFSET_TO_C => prefs.set_offset_to_c(parse(name, value, "true or false")?),
        keys::TEMPORAL_WINDOW => prefs.set_temporal_window(choice(
            name,
            value,
            TemporalWindow::ALL,
            TemporalWindow::from_name,
        )?),
        keys::SEGMENTATION => prefs.set_segmentation(choice(
            name,
            value,
            Segmentation::ALL,
            Segmentation::from_name,
        )?),
        keys::SIMILARITY_MEASURE => prefs.set_similarity_measure(choice(
            name,
            value,
            SimilarityMeasure::ALL,
            SimilarityMeasure::from_name,
        )?),
        keys::TUNING_METHOD => prefs.set_tuning_method(choice(
            name,
            value,
            TuningMethod::ALL,
            TuningMethod::from_name,
        )?),
        keys::TONE_PROFILE => prefs.set_tone_profile(choice(
            name,
            value,
            ToneProfile::ALL,
            ToneProfile::from_name,
        )?),
        keys::FFT_FRAME_SIZE => prefs.set_fft_frame_size(parse(name, value, "an integer")?)?,
        keys::HOPS_PER_FRAME => prefs.set_hops_per_frame(parse(name, value, "an integer")?)?,
        keys::OCTAVES => prefs.set_octaves(parse(name, value, "an integer")?)?,
        keys::BINS_PER_OCTAVE => prefs.set_bins_per_octave(parse(name, value, "an integer")?)?,
        keys::ARBITRARY_SEGMENTS => prefs.set_arbitrary_segments(parse(name, value, "an integer")?)?,
        keys::SEG_PEAK_PICKING_NEIGHBOURS => {
            prefs.set_seg_peak_picking_neighbours(parse(name, value, "an integer")?)?
        }
        keys::SEG_GAUSSIAN_SIZE => prefs.set_seg_gaussian_size(parse(name, value, "an integer")?)?,
        keys::SEG_GAUSSIAN_SIGMA => prefs.set_seg_gaussian_sigma(parse(name, value, "a number")?)?,
        keys::STARTING_FREQ_A => prefs.set_starting_freq_a(parse(name, value, "a frequency in Hz")?)?,
        keys::DIRECT_SK_STRETCH => prefs.set_direct_sk_stretch(parse(name, value, "a number")?)?,
        keys::DETUNED_BAND_WEIGHT => prefs.set_detuned_band_weight(parse(name, value, "a number")?)?,
        keys::CUSTOM_TONE_PROFILE => {
            if value.trim().is_empty() {
                prefs.clear_custom_tone_profile();
            } else {
                let profile = value
                    .split(',')
                    .map(|v| parse(name, v, "comma-separated numbers"))
                    .collect::<Result<Vec<f32>, _>>()?;
                prefs.set_custom_tone_profile(profile)?;
            }
        }
        _ => return Err(SettingError::Unknown(name.to_string())),
    }
    Ok(())
}

/// `key-codes --clear` drops the override; otherwise `args` are the 24 new labels.
pub fn apply_key_codes(prefs: &mut PreferenceSet, args: &[String]) -> Result<(), SettingError> {
    match args {
        [flag] if flag == "--clear" => prefs.clear_custom_key_codes(),
        labels => prefs.set_custom_key_codes(labels.to_vec())?,
    }
    Ok(())
}
