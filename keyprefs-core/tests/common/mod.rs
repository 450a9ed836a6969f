#![allow(dead_code)]
//! Shared helpers for keyprefs-core integration tests.

use std::path::PathBuf;

use keyprefs_core::{PreferenceSet, SqliteStore};
use tempfile::TempDir;

/// A fresh settings database inside its own temporary directory.
pub struct TempStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("preferences.sqlite");
        Self { dir, path }
    }

    pub fn open(&self) -> SqliteStore {
        SqliteStore::open(&self.path).expect("open settings database")
    }

    /// Save `prefs`, close the database, and load it back from disk.
    pub fn reload(&self, prefs: &PreferenceSet) -> PreferenceSet {
        {
            let mut store = self.open();
            prefs.save(&mut store).expect("save preferences");
        }
        PreferenceSet::load(&self.open())
    }
}
