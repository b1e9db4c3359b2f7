use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::entry::SavedWorkspace;

/// File the history list is persisted to, inside the repository directory.
pub const HISTORY_FILE_NAME: &str = "recent_workspaces.json";

/// Owns the bounded, newest-first list of saved workspaces and the JSON
/// file backing it. Sole writer of that file.
///
/// Loading never fails: a missing file means empty history, and an
/// unreadable or malformed file is logged and treated the same way.
/// Inserts are transactional — the new list is staged, persisted, and only
/// committed in memory once the write has succeeded, so a failed save
/// leaves both the file and the in-memory list as they were.
pub struct HistoryRepository {
    dir: PathBuf,
    max_saved_workspaces: usize,
    workspaces: Vec<SavedWorkspace>,
}

impl HistoryRepository {
    /// Open the repository over `dir`, loading any existing history file.
    /// A history longer than the bound (e.g. after shrinking the limit)
    /// is trimmed from the tail at load.
    pub fn open(dir: impl Into<PathBuf>, max_saved_workspaces: usize) -> Self {
        let dir = dir.into();
        let mut workspaces = Self::load_or_empty(&dir.join(HISTORY_FILE_NAME));
        workspaces.truncate(max_saved_workspaces);
        Self {
            dir,
            max_saved_workspaces,
            workspaces,
        }
    }

    /// Saved workspaces, newest first.
    #[must_use]
    pub fn list(&self) -> &[SavedWorkspace] {
        &self.workspaces
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SavedWorkspace> {
        self.workspaces.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    #[must_use]
    pub fn max_saved_workspaces(&self) -> usize {
        self.max_saved_workspaces
    }

    /// Path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE_NAME)
    }

    /// Insert a snapshot at the front, evicting the oldest if the list
    /// would exceed the bound, and persist the full list.
    ///
    /// The blocking file write runs on a background thread; the call
    /// suspends until it completes. On any serialization or I/O failure
    /// the in-memory list is left untouched.
    pub async fn insert(&mut self, workspace: SavedWorkspace) -> Result<(), CoreError> {
        let mut staged = self.workspaces.clone();
        staged.insert(0, workspace);
        staged.truncate(self.max_saved_workspaces);

        let json = serde_json::to_string(&staged).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize workspace history: {e}"))
        })?;

        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &json))
            .await
            .map_err(|e| CoreError::FileIO(format!("Background write failed: {e}")))??;

        self.workspaces = staged;
        debug!(
            count = self.workspaces.len(),
            "persisted saved-workspace history"
        );
        Ok(())
    }

    fn load_or_empty(path: &Path) -> Vec<SavedWorkspace> {
        if !path.exists() {
            return Vec::new();
        }
        let result = fs::read_to_string(path)
            .map_err(CoreError::from)
            .and_then(|json| serde_json::from_str(&json).map_err(CoreError::from));
        match result {
            Ok(workspaces) => workspaces,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read workspace history, starting empty"
                );
                Vec::new()
            }
        }
    }
}

/// Write the serialized list to a sibling temp file, then rename it over
/// the target, so a crash mid-write never leaves a half-written file
/// where the next load will look.
fn write_atomic(dir: &Path, json: &str) -> Result<(), CoreError> {
    fs::create_dir_all(dir)?;
    let target = dir.join(HISTORY_FILE_NAME);
    let tmp = dir.join(format!("{HISTORY_FILE_NAME}.tmp"));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &target)?;
    Ok(())
}
