//! Preferences saved to disk and read back by a later process.

mod common;

use common::TempStore;
use keyprefs_core::palette;
use keyprefs_core::types::{
    ChromaTheme, IndexedImage, LibraryKind, MetadataField, MetadataFormat, MetadataWrite,
    PixelEncoding, Segmentation, WindowBlob,
};
use keyprefs_core::PreferenceSet;

#[test]
fn test_first_run_creates_database_and_loads_defaults() {
    let temp = TempStore::new();
    assert!(!temp.path.exists());

    let prefs = PreferenceSet::load(&temp.open());
    assert!(temp.path.exists());
    assert_eq!(prefs, PreferenceSet::default());
}

#[test]
fn test_batch_settings_survive_restart() {
    let temp = TempStore::new();
    let mut prefs = PreferenceSet::default();
    prefs.set_write_to_files_automatically(true);
    prefs.set_metadata_write(MetadataField::Filename, MetadataWrite::Append);
    prefs.set_metadata_format(MetadataFormat::Both);
    prefs.set_library_path(LibraryKind::Serato, "/Volumes/usb/_Serato_/database V2").unwrap();
    prefs.set_window_blob(WindowBlob::Geometry, vec![0x01, 0xd9, 0xd0, 0xcb]);
    prefs.set_segmentation(Segmentation::Cosine);
    prefs.set_hops_per_frame(16).unwrap();

    let loaded = temp.reload(&prefs);
    assert_eq!(loaded, prefs);
    assert_eq!(loaded.window_blob(WindowBlob::Geometry), &[0x01, 0xd9, 0xd0, 0xcb]);
}

#[test]
fn test_reset_overwrites_previous_values() {
    let temp = TempStore::new();
    let mut prefs = PreferenceSet::default();
    prefs.set_chromagram_theme(ChromaTheme::Predator);
    prefs.set_octaves(7).unwrap();
    temp.reload(&prefs);

    let loaded = temp.reload(&PreferenceSet::default());
    assert_eq!(loaded, PreferenceSet::default());
}

#[test]
fn test_chromagram_uses_persisted_theme() {
    let temp = TempStore::new();
    let mut prefs = PreferenceSet::default();
    prefs.set_chromagram_theme(ChromaTheme::Hacker);
    let loaded = temp.reload(&prefs);

    let image = IndexedImage::new(3, 1, PixelEncoding::KeyIndex, vec![0, 12, 23]).unwrap();
    let out = palette::recolour(&image, loaded.chromagram_theme());
    for (x, index) in [0usize, 12, 23].into_iter().enumerate() {
        assert_eq!(out.get(x, 0), loaded.key_colour(index).ok());
    }
}
