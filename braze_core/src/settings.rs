//! # Settings
//!
//! Where reference PDFs live and how the document helpers behave. Settings
//! are stored as JSON; every field has a default, so a partial file (or no
//! file at all) is valid.
//!
//! ```json
//! {
//!   "files_dir": "files",
//!   "download_timeout_secs": 30,
//!   "min_table_rows": 2
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{GuideError, GuideResult};

/// Default directory for local copies of the reference documents
pub const DEFAULT_FILES_DIR: &str = "files";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    /// Directory holding the local PDF copies
    pub files_dir: PathBuf,

    /// Upper bound on a single document download
    pub download_timeout_secs: u64,

    /// Minimum rows for a text block to count as a table during extraction
    pub min_table_rows: usize,

    /// User-Agent header sent with downloads
    pub user_agent: String,
}

impl Default for GuideSettings {
    fn default() -> Self {
        GuideSettings {
            files_dir: PathBuf::from(DEFAULT_FILES_DIR),
            download_timeout_secs: 30,
            min_table_rows: 2,
            user_agent: format!("Brazeguide/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GuideSettings {
    /// Load settings from a JSON file.
    ///
    /// Missing fields take their defaults. A missing file is an error; use
    /// [`GuideSettings::load_or_default`] when the file is optional.
    pub fn load(path: &Path) -> GuideResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GuideError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings: GuideSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings if the file exists, otherwise defaults
    pub fn load_or_default(path: &Path) -> GuideResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> GuideResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| GuideError::file_error("write settings", path.display().to_string(), e.to_string()))
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    fn validate(&self) -> GuideResult<()> {
        if self.download_timeout_secs == 0 {
            return Err(GuideError::invalid_value(
                "download_timeout_secs",
                "0",
                "Timeout must be at least one second",
            ));
        }
        if self.min_table_rows == 0 {
            return Err(GuideError::invalid_value("min_table_rows", "0", "A table needs at least one row"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GuideSettings::default();
        assert_eq!(settings.files_dir, PathBuf::from("files"));
        assert_eq!(settings.download_timeout(), Duration::from_secs(30));
        assert_eq!(settings.min_table_rows, 2);
        assert!(settings.user_agent.starts_with("Brazeguide/"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "files_dir": "/srv/specs" }"#).unwrap();

        let settings = GuideSettings::load(&path).unwrap();
        assert_eq!(settings.files_dir, PathBuf::from("/srv/specs"));
        assert_eq!(settings.download_timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = GuideSettings {
            download_timeout_secs: 5,
            ..GuideSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(GuideSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(GuideSettings::load(&path).unwrap_err().error_code(), "FILE_ERROR");
        assert_eq!(GuideSettings::load_or_default(&path).unwrap(), GuideSettings::default());
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(GuideSettings::load(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "download_timeout_secs": 0 }"#).unwrap();
        assert_eq!(GuideSettings::load(&path).unwrap_err().error_code(), "INVALID_VALUE");
    }
}
