use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use super::{SettingValue, SettingsStore, StoreError, StoreResult};

/// Schema version for the settings table.
pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    value
);
";

const UPSERT_SQL: &str = "INSERT INTO settings (key, kind, value) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET kind = excluded.kind, value = excluded.value";

/// Settings persisted in a single SQLite table, one row per key.
///
/// Lists are stored as JSON text. Batched writes run inside one transaction, so a
/// failed save leaves the previously stored values untouched.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        log::debug!(target: "store", "opened settings database {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            params![SCHEMA_VERSION],
        )?;
        Ok(Self { conn })
    }
}

impl SettingsStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<SettingValue>> {
        let row: Option<(String, Value)> = self
            .conn
            .query_row(
                "SELECT kind, value FROM settings WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((kind, value)) => decode_value(key, &kind, value).map(Some),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, value: SettingValue) -> StoreResult<()> {
        self.conn
            .execute(UPSERT_SQL, params![key, value.kind(), encode_value(&value)?])?;
        Ok(())
    }

    fn put_batch(&mut self, entries: Vec<(&'static str, SettingValue)>) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_SQL)?;
            for (key, value) in &entries {
                stmt.execute(params![key, value.kind(), encode_value(value)?])?;
            }
        }
        tx.commit()?;
        log::debug!(target: "store", "wrote {} settings", entries.len());
        Ok(())
    }
}

fn encode_value(value: &SettingValue) -> StoreResult<Value> {
    Ok(match value {
        SettingValue::Bool(b) => Value::Integer(*b as i64),
        SettingValue::Int(i) => Value::Integer(*i),
        SettingValue::Float(f) => Value::Real(*f),
        SettingValue::Text(s) => Value::Text(s.clone()),
        SettingValue::TextList(list) => Value::Text(serde_json::to_string(list)?),
        SettingValue::FloatList(list) => Value::Text(serde_json::to_string(list)?),
        SettingValue::Blob(bytes) => Value::Blob(bytes.clone()),
    })
}

fn decode_value(key: &str, kind: &str, value: Value) -> StoreResult<SettingValue> {
    let decoded = match (kind, value) {
        ("bool", Value::Integer(i)) => SettingValue::Bool(i != 0),
        ("int", Value::Integer(i)) => SettingValue::Int(i),
        ("float", Value::Real(f)) => SettingValue::Float(f),
        ("float", Value::Integer(i)) => SettingValue::Float(i as f64),
        ("text", Value::Text(s)) => SettingValue::Text(s),
        ("text_list", Value::Text(s)) => SettingValue::TextList(serde_json::from_str(&s)?),
        ("float_list", Value::Text(s)) => SettingValue::FloatList(serde_json::from_str(&s)?),
        ("blob", Value::Blob(bytes)) => SettingValue::Blob(bytes),
        (kind, other) => {
            return Err(StoreError::Corrupt {
                key: key.to_string(),
                reason: format!("kind '{}' stored as {}", kind, other.data_type()),
            })
        }
    };
    Ok(decoded)
}
