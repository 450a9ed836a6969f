//! Key-value backends the preferences are persisted to.
//!
//! `SettingsStore` captures what the preferences layer needs from storage (read a
//! typed value by key, write one, write many) independently of where the values
//! end up. `MemoryStore` backs tests; `SqliteStore` is the on-disk store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::fmt;

/// Result type for store operations.
pub type StoreResult<T = ()> = Result<T, StoreError>;

/// A single stored value. Enumerations are stored as `Int(ordinal)`.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    TextList(Vec<String>),
    FloatList(Vec<f64>),
    Blob(Vec<u8>),
}

impl SettingValue {
    /// Short tag naming the variant, also used as the SQLite `kind` column.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Text(_) => "text",
            SettingValue::TextList(_) => "text_list",
            SettingValue::FloatList(_) => "float_list",
            SettingValue::Blob(_) => "blob",
        }
    }
}

/// Error from a store operation.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    /// The store refuses writes.
    ReadOnly,
    /// A stored row could not be turned back into a [`SettingValue`].
    Corrupt { key: String, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(e) => write!(f, "SQLite error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::ReadOnly => write!(f, "settings store is read-only"),
            Self::Corrupt { key, reason } => write!(f, "corrupt value for '{}': {}", key, reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sqlite(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::ReadOnly | Self::Corrupt { .. } => None,
        }
    }
}

/// Persistent key-value storage for preference values.
pub trait SettingsStore {
    /// The stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<SettingValue>>;

    fn put(&mut self, key: &str, value: SettingValue) -> StoreResult<()>;

    /// The stored value, or `default` if the key was never written.
    fn get_or(&self, key: &str, default: SettingValue) -> StoreResult<SettingValue> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Write several values. Backends that can should make this all-or-nothing.
    fn put_batch(&mut self, entries: Vec<(&'static str, SettingValue)>) -> StoreResult<()> {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(())
    }
}
