use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const APP_DIR: &str = "keyprefs";

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct StorageConfig {
    file: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    verbose: Option<bool>,
}

/// Where preferences live and how chatty the front-end is.
pub struct Config {
    storage: StorageConfig,
    runtime: RuntimeConfig,
    warnings: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        let user = user_config_path().filter(|path| path.exists());
        Self::load_from(user.as_deref())
    }

    /// Embedded defaults overlaid with the file at `user_path`, if any. A file
    /// that cannot be read or parsed is ignored and reported in [`Config::warnings`].
    pub fn load_from(user_path: Option<&Path>) -> Self {
        let mut warnings = Vec::new();
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warnings.push(format!("embedded config.toml is invalid: {}", e));
            ConfigFile::default()
        });

        if let Some(path) = user_path {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                    Ok(user) => {
                        merge_storage(&mut base.storage, user.storage);
                        merge_runtime(&mut base.runtime, user.runtime);
                    }
                    Err(e) => {
                        warnings.push(format!("ignoring malformed config {}: {}", path.display(), e))
                    }
                },
                Err(e) => warnings.push(format!("could not read config {}: {}", path.display(), e)),
            }
        }

        Config {
            storage: base.storage,
            runtime: base.runtime,
            warnings,
        }
    }

    /// Problems met while loading, for the caller to log once its logger is up.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Settings database location. Relative paths resolve against the app's
    /// config directory.
    pub fn storage_path(&self) -> PathBuf {
        let file = self
            .storage
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from("preferences.sqlite"));
        if file.is_absolute() {
            file
        } else {
            config_dir().join(file)
        }
    }

    pub fn verbose(&self) -> bool {
        self.runtime.verbose.unwrap_or(false)
    }
}

/// `<platform config dir>/keyprefs`, or `./keyprefs` when the platform has none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

fn merge_storage(base: &mut StorageConfig, user: StorageConfig) {
    if user.file.is_some() {
        base.file = user.file;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.verbose.is_some() {
        base.verbose = user.verbose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_config() {
        let config = Config::load_from(None);
        assert!(!config.verbose());
        assert_eq!(config.storage_path(), config_dir().join("preferences.sqlite"));
    }

    #[test]
    fn test_user_file_overrides_set_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[runtime]\nverbose = true\n").unwrap();

        let config = Config::load_from(Some(&path));
        assert!(config.verbose());
        assert_eq!(config.storage_path(), config_dir().join("preferences.sqlite"));
    }

    #[test]
    fn test_absolute_storage_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("elsewhere.sqlite");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, format!("[storage]\nfile = {:?}\n", db.to_string_lossy())).unwrap();

        let config = Config::load_from(Some(&path));
        assert_eq!(config.storage_path(), db);
    }

    #[test]
    fn test_malformed_user_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[runtime\nverbose = yes").unwrap();

        let config = Config::load_from(Some(&path));
        assert!(!config.verbose());
        assert_eq!(config.warnings().len(), 1);
        assert!(config.warnings()[0].starts_with("ignoring malformed config"));
    }

    #[test]
    fn test_unreadable_user_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&dir.path().join("missing.toml")));
        assert!(config.warnings()[0].starts_with("could not read config"));
        assert!(Config::load_from(None).warnings().is_empty());
    }
}
