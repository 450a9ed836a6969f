//! The 24 key codes written into tags, and the user's override of them.
//!
//! Key indices are persisted by tag writers and used as palette indices, so the
//! canonical order below must never change: twelve pitch classes ascending from A,
//! each major key followed by its parallel minor.

use std::collections::HashSet;
use std::fmt;

use crate::metadata::MetadataFormat;

/// Number of distinct key codes.
pub const KEY_COUNT: usize = 24;

pub const DEFAULT_KEY_CODES: [&str; KEY_COUNT] = [
    "A", "Am", "Bb", "Bbm", "B", "Bm", "C", "Cm", "Db", "Dbm", "D", "Dm",
    "Eb", "Ebm", "E", "Em", "F", "Fm", "Gb", "Gbm", "G", "Gm", "Ab", "Abm",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCodeError {
    /// No key code lives at this index.
    IndexNotFound(usize),
    /// No active key code has this exact label.
    LabelNotFound(String),
    /// A custom list must hold exactly [`KEY_COUNT`] labels.
    WrongLength(usize),
    /// Every custom label must be unique, or index lookups become ambiguous.
    DuplicateLabel(String),
}

impl fmt::Display for KeyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexNotFound(index) => write!(f, "no key code at index {}", index),
            Self::LabelNotFound(label) => write!(f, "no key code labelled '{}'", label),
            Self::WrongLength(len) => {
                write!(f, "expected {} custom key codes, got {}", KEY_COUNT, len)
            }
            Self::DuplicateLabel(label) => write!(f, "key code '{}' is used more than once", label),
        }
    }
}

impl std::error::Error for KeyCodeError {}

/// Active key code labels: the canonical list, optionally overridden as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCodeCatalog {
    custom: Option<Vec<String>>,
}

impl KeyCodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom(labels: Vec<String>) -> Result<Self, KeyCodeError> {
        let mut catalog = Self::new();
        catalog.set_custom(labels)?;
        Ok(catalog)
    }

    /// Replace the override. Anything but exactly 24 distinct labels is rejected
    /// and the previous override stays in place.
    pub fn set_custom(&mut self, labels: Vec<String>) -> Result<(), KeyCodeError> {
        if labels.len() != KEY_COUNT {
            return Err(KeyCodeError::WrongLength(labels.len()));
        }
        let mut seen = HashSet::with_capacity(KEY_COUNT);
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(KeyCodeError::DuplicateLabel(label.clone()));
            }
        }
        self.custom = Some(labels);
        Ok(())
    }

    pub fn clear_custom(&mut self) {
        self.custom = None;
    }

    pub fn custom(&self) -> Option<&[String]> {
        self.custom.as_deref()
    }

    pub fn default_label_for(index: usize) -> Result<&'static str, KeyCodeError> {
        DEFAULT_KEY_CODES
            .get(index)
            .copied()
            .ok_or(KeyCodeError::IndexNotFound(index))
    }

    pub fn label_for(&self, index: usize) -> Result<&str, KeyCodeError> {
        match &self.custom {
            Some(custom) => custom
                .get(index)
                .map(String::as_str)
                .ok_or(KeyCodeError::IndexNotFound(index)),
            None => Self::default_label_for(index),
        }
    }

    /// Case-sensitive exact match against the active labels.
    pub fn index_for(&self, label: &str) -> Result<usize, KeyCodeError> {
        self.labels()
            .position(|candidate| candidate == label)
            .ok_or_else(|| KeyCodeError::LabelNotFound(label.to_string()))
    }

    /// Always yields [`KEY_COUNT`] labels in index order.
    pub fn labels(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match &self.custom {
            Some(custom) => Box::new(custom.iter().map(String::as_str)),
            None => Box::new(DEFAULT_KEY_CODES.iter().copied()),
        }
    }

    /// Text written into a tag for the key at `index`.
    pub fn tag_text(
        &self,
        index: usize,
        format: MetadataFormat,
        delimiter: &str,
    ) -> Result<String, KeyCodeError> {
        let canonical = Self::default_label_for(index)?;
        let text = match (format, &self.custom) {
            (MetadataFormat::KeysOnly, _) | (_, None) => canonical.to_string(),
            (MetadataFormat::CustomOnly, Some(_)) => self.label_for(index)?.to_string(),
            (MetadataFormat::Both, Some(_)) => {
                format!("{}{}{}", self.label_for(index)?, delimiter, canonical)
            }
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camelot() -> Vec<String> {
        [
            "11B", "8A", "6B", "3A", "1B", "10A", "8B", "5A", "3B", "12A", "10B", "7A",
            "5B", "2A", "12B", "9A", "7B", "4A", "2B", "11A", "9B", "6A", "4B", "1A",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn canonical_order_starts_at_a_major() {
        let catalog = KeyCodeCatalog::new();
        assert_eq!(catalog.label_for(0).unwrap(), "A");
        assert_eq!(catalog.label_for(1).unwrap(), "Am");
        assert_eq!(catalog.label_for(23).unwrap(), "Abm");
        assert_eq!(catalog.labels().count(), KEY_COUNT);
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        let catalog = KeyCodeCatalog::new();
        assert_eq!(catalog.label_for(24), Err(KeyCodeError::IndexNotFound(24)));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = KeyCodeCatalog::new();
        assert_eq!(catalog.index_for("Ebm"), Ok(13));
        assert_eq!(
            catalog.index_for("ebm"),
            Err(KeyCodeError::LabelNotFound("ebm".to_string()))
        );
    }

    #[test]
    fn wrong_length_override_keeps_previous_labels() {
        let mut catalog = KeyCodeCatalog::with_custom(camelot()).unwrap();
        let mut short = camelot();
        short.pop();
        assert_eq!(catalog.set_custom(short), Err(KeyCodeError::WrongLength(23)));
        assert_eq!(catalog.label_for(0).unwrap(), "11B");

        let mut long = camelot();
        long.push("extra".to_string());
        assert_eq!(catalog.set_custom(long), Err(KeyCodeError::WrongLength(25)));
    }

    #[test]
    fn repeated_label_is_rejected() {
        let mut catalog = KeyCodeCatalog::new();
        let mut labels = camelot();
        labels[1] = labels[0].clone();
        assert_eq!(
            catalog.set_custom(labels),
            Err(KeyCodeError::DuplicateLabel("11B".to_string()))
        );
        assert!(catalog.custom().is_none());
        assert_eq!(catalog.index_for("Am"), Ok(1));
    }

    #[test]
    fn custom_labels_invert() {
        let catalog = KeyCodeCatalog::with_custom(camelot()).unwrap();
        for index in 0..KEY_COUNT {
            let label = catalog.label_for(index).unwrap();
            assert_eq!(catalog.index_for(label), Ok(index));
        }
        // canonical names are no longer active labels
        assert!(catalog.index_for("Am").is_err());
    }

    #[test]
    fn tag_text_follows_format() {
        let plain = KeyCodeCatalog::new();
        assert_eq!(plain.tag_text(1, MetadataFormat::Both, " - ").unwrap(), "Am");

        let custom = KeyCodeCatalog::with_custom(camelot()).unwrap();
        assert_eq!(custom.tag_text(1, MetadataFormat::KeysOnly, " - ").unwrap(), "Am");
        assert_eq!(custom.tag_text(1, MetadataFormat::CustomOnly, " - ").unwrap(), "8A");
        assert_eq!(custom.tag_text(1, MetadataFormat::Both, " - ").unwrap(), "8A - Am");
        assert!(custom.tag_text(30, MetadataFormat::Both, " - ").is_err());
    }
}
