// src/infrastructure/preferences.rs
//
// Persisted User Preferences
//
// RULES:
// - Reading never fails: a missing or unreadable file yields defaults
// - Writing is write-through: every change lands on disk immediately
// - The file is human-editable JSON

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::MovieSortOrder;
use crate::error::{AppError, AppResult};

/// On-disk preference document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    sort_order: MovieSortOrder,
}

/// JSON-file-backed preference store
///
/// Keeps the browsing sort order across runs, so the grid opens in
/// whatever order it was last left in.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at the default location: {APP_DATA}/cinegrid/preferences.json
    pub fn new() -> AppResult<Self> {
        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

        let cinegrid_dir = app_data_dir.join("cinegrid");
        fs::create_dir_all(&cinegrid_dir).map_err(AppError::Io)?;

        Ok(Self::at_path(cinegrid_dir.join("preferences.json")))
    }

    /// Store at an explicit path (used by tests)
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The persisted sort order, or POPULAR when nothing usable is stored
    pub fn sort_order(&self) -> MovieSortOrder {
        self.read().sort_order
    }

    /// Persist a new sort order
    pub fn set_sort_order(&self, order: MovieSortOrder) -> AppResult<()> {
        let mut prefs = self.read();
        prefs.sort_order = order;
        self.write(&prefs)
    }

    fn read(&self) -> Preferences {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Preferences::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(
                    "Ignoring unreadable preference file {}: {}",
                    self.path.display(),
                    e
                );
                Preferences::default()
            }
        }
    }

    fn write(&self, prefs: &Preferences) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, raw).map_err(AppError::Io)?;
        Ok(())
    }
}
