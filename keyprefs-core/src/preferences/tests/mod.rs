use crate::store::{MemoryStore, SettingValue, SettingsStore};

use super::{keys, PreferenceError, PreferenceSet};

mod engine;

/// A store holding the defaults plus one overwritten key.
fn store_with(key: &str, value: SettingValue) -> MemoryStore {
    let mut store = MemoryStore::new();
    PreferenceSet::default().save(&mut store).unwrap();
    store.put(key, value).unwrap();
    store
}

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
fn empty_store_loads_defaults() {
    let store = MemoryStore::new();
    assert_eq!(PreferenceSet::load(&store), PreferenceSet::default());
}

#[test]
fn saving_writes_every_key() {
    let mut store = MemoryStore::new();
    PreferenceSet::default().save(&mut store).unwrap();
    for key in [
        keys::WRITE_TO_FILES_AUTOMATICALLY,
        keys::METADATA_FORMAT,
        keys::CUSTOM_KEY_CODES,
        keys::BATCH_WINDOW_SPLITTER_STATE,
        keys::SERATO_LIBRARY_PATH,
        keys::CUSTOM_TONE_PROFILE,
        keys::DETUNED_BAND_WEIGHT,
        keys::CHROMAGRAM_THEME,
    ] {
        assert!(store.get(key).unwrap().is_some(), "{} not written", key);
    }
    assert_eq!(store.len(), 36);
}
