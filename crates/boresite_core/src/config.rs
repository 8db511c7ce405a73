//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Every resolved directory is absolute.
//! - Blank environment values are treated as unset.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

/// Directory holding the persisted project blob.
pub const DATA_DIR_ENV: &str = "BORESITE_DATA_DIR";
/// Directory for rolling log files.
pub const LOG_DIR_ENV: &str = "BORESITE_LOG_DIR";
/// One of `trace|debug|info|warn|error`.
pub const LOG_LEVEL_ENV: &str = "BORESITE_LOG_LEVEL";

const DEFAULT_DATA_DIR_NAME: &str = "boresite";
const LOG_SUBDIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults.
    ///
    /// - data dir: `$BORESITE_DATA_DIR`, else `<temp>/boresite`
    /// - log dir: `$BORESITE_LOG_DIR`, else `<data dir>/logs`
    /// - level: `$BORESITE_LOG_LEVEL`, else the build-mode default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = read(DATA_DIR_ENV)
            .map(|value| absolutize(Path::new(&value)))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME));
        let log_dir = read(LOG_DIR_ENV)
            .map(|value| absolutize(Path::new(&value)))
            .unwrap_or_else(|| data_dir.join(LOG_SUBDIR_NAME));
        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        Self {
            data_dir,
            log_dir,
            log_level,
        }
    }

    /// Overrides the data directory, keeping a derived log dir in step.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        let derived_log_dir = self.data_dir.join(LOG_SUBDIR_NAME);
        self.data_dir = absolutize(data_dir.as_ref());
        if self.log_dir == derived_log_dir {
            self.log_dir = self.data_dir.join(LOG_SUBDIR_NAME);
        }
        self
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| std::env::temp_dir().join(path))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DATA_DIR_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[(DATA_DIR_ENV, "   ")]));
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("boresite"));
        assert_eq!(config.log_dir, config.data_dir.join("logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn env_values_override_defaults() {
        let base = std::env::temp_dir();
        let data = base.join("bs-data");
        let logs = base.join("bs-logs");
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATA_DIR_ENV, data.to_str().unwrap()),
            (LOG_DIR_ENV, logs.to_str().unwrap()),
            (LOG_LEVEL_ENV, "warn"),
        ]));
        assert_eq!(config.data_dir, data);
        assert_eq!(config.log_dir, logs);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_data_dir_is_made_absolute() {
        let config = AppConfig::from_lookup(lookup_from(&[(DATA_DIR_ENV, "survey-data")]));
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("survey-data"));
    }

    #[test]
    fn overriding_data_dir_moves_derived_log_dir() {
        let target = std::env::temp_dir().join("override");
        let config = AppConfig::from_lookup(lookup_from(&[])).with_data_dir(&target);
        assert_eq!(config.log_dir, target.join("logs"));
    }
}
