//! # keyprefs-core
//!
//! Typed, persisted preferences for a key-detection tool, plus the colour palette
//! used to draw key swatches and chromagrams.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keyprefs_core::config::Config;
//! use keyprefs_core::preferences::PreferenceSet;
//! use keyprefs_core::store::SqliteStore;
//!
//! let config = Config::load();
//! let mut store = SqliteStore::open(&config.storage_path())?;
//!
//! // Never fails; unusable stored values fall back to defaults.
//! let mut prefs = PreferenceSet::load(&store);
//! prefs.set_fft_frame_size(8192)?;
//! prefs.save(&mut store)?;
//!
//! // Hand the engine an immutable snapshot for the batch run.
//! let params = prefs.engine_snapshot();
//! ```
//!
//! ## Module Overview
//!
//! - [`store`]: `SettingsStore` trait, `MemoryStore`, `SqliteStore`
//! - [`preferences`]: `PreferenceSet`: defaults, load-time recovery, full-overwrite save
//! - [`engine`]: domain rules for the engine parameters, shared by mutators and load
//! - [`palette`]: key swatch colours per theme and pure image recolouring
//! - [`config`]: TOML configuration (embedded defaults + user override)

pub mod config;
pub mod engine;
pub mod palette;
pub mod preferences;
pub mod store;

pub use keyprefs_types as types;
pub use preferences::{PreferenceError, PreferenceSet};
pub use store::{MemoryStore, SettingValue, SettingsStore, SqliteStore, StoreError};
