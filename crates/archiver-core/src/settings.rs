/// Persisted view settings — per-column display widths.
///
/// Settings are a plain value loaded from, and saved to, a path the caller
/// chooses. Nothing here is global; a presentation layer owns its own copy.
use crate::sort::ColumnKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Display widths, in whatever unit the presentation layer uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub column_widths: BTreeMap<ColumnKind, u16>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        let column_widths = ColumnKind::ALL
            .into_iter()
            .map(|column| (column, default_width(column)))
            .collect();
        Self { column_widths }
    }
}

/// Width used for a column with no saved value (terminal characters).
pub fn default_width(column: ColumnKind) -> u16 {
    match column {
        ColumnKind::Name => 32,
        ColumnKind::Extension => 9,
        ColumnKind::Size => 8,
        ColumnKind::DateModified | ColumnKind::DateAccessed | ColumnKind::DateCreated => 19,
        ColumnKind::Path => 40,
    }
}

impl ViewSettings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    ///
    /// Columns missing from the file keep their default width.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let saved: ViewSettings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut settings = Self::default();
        settings.column_widths.extend(saved.column_widths);
        Ok(settings)
    }

    /// Write settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }

    pub fn width(&self, column: ColumnKind) -> u16 {
        self.column_widths
            .get(&column)
            .copied()
            .unwrap_or_else(|| default_width(column))
    }

    pub fn set_width(&mut self, column: ColumnKind, width: u16) {
        self.column_widths.insert(column, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = ViewSettings::load(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(settings, ViewSettings::default());
        assert_eq!(settings.width(ColumnKind::Path), 40);
    }

    #[test]
    fn save_then_load_keeps_widths() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("view.json");

        let mut settings = ViewSettings::default();
        settings.set_width(ColumnKind::Name, 50);
        settings.set_width(ColumnKind::Size, 12);
        settings.save(&path).unwrap();

        let loaded = ViewSettings::load(&path).unwrap();
        assert_eq!(loaded.width(ColumnKind::Name), 50);
        assert_eq!(loaded.width(ColumnKind::Size), 12);
        assert_eq!(loaded.width(ColumnKind::Extension), 9);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("view.json");
        fs::write(&path, r#"{ "column_widths": { "Path": 70 } }"#).unwrap();

        let loaded = ViewSettings::load(&path).unwrap();
        assert_eq!(loaded.width(ColumnKind::Path), 70);
        assert_eq!(loaded.width(ColumnKind::Name), 32);
        assert_eq!(loaded.column_widths.len(), ColumnKind::ALL.len());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("view.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ViewSettings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
