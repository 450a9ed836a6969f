use std::collections::BTreeMap;

use super::{SettingValue, SettingsStore, StoreError, StoreResult};

/// In-process store. Nothing survives the process; used by tests and scratch runs.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, SettingValue>,
    writable: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            writable: true,
        }
    }

    /// When unwritable, every `put` fails with [`StoreError::ReadOnly`].
    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<SettingValue>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: SettingValue) -> StoreResult<()> {
        if !self.writable {
            return Err(StoreError::ReadOnly);
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn put_batch(&mut self, entries: Vec<(&'static str, SettingValue)>) -> StoreResult<()> {
        if !self.writable {
            return Err(StoreError::ReadOnly);
        }
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }
        Ok(())
    }
}
