pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::BTreeMap;
use std::path::PathBuf;

use models::{
    entry::{Entry, SavedWorkspace},
    settings::Settings,
    workspace::{SaveState, Workspace},
};
use services::{summary_service::SummaryService, validation_service::ValidationService};
use storage::history::HistoryRepository;

use errors::CoreError;

/// Main entry point for the Sum Aggregator core library.
/// Holds the current entry set, the saved-workspace history, and the
/// save-state flag, and exposes every operation the UI layer needs.
#[must_use]
pub struct SumAggregator {
    workspace: Workspace,
    history: HistoryRepository,
    validation_service: ValidationService,
    summary_service: SummaryService,
    settings: Settings,
    save_state: SaveState,
}

impl std::fmt::Debug for SumAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SumAggregator")
            .field("entries", &self.workspace.len())
            .field("saved_workspaces", &self.history.len())
            .field("settings", &self.settings)
            .field("save_state", &self.save_state)
            .finish()
    }
}

impl SumAggregator {
    /// Open a session over `data_dir` with default settings, loading any
    /// existing workspace history from it. Never fails: a missing or
    /// unreadable history file degrades to empty history.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::open_with_settings(data_dir, Settings::default())
    }

    /// Open a session over `data_dir` with explicit settings.
    pub fn open_with_settings(data_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        let history = HistoryRepository::open(data_dir, settings.max_saved_workspaces);
        Self {
            workspace: Workspace::new(),
            history,
            validation_service: ValidationService::new(),
            summary_service: SummaryService::new(),
            settings,
            save_state: SaveState::NotSaved,
        }
    }

    /// Open a session over the platform's application-private data
    /// directory (e.g. `~/.local/share/sum-aggregator` on Linux).
    pub fn open_default() -> Result<Self, CoreError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| CoreError::FileIO("No platform data directory available".into()))?
            .join("sum-aggregator");
        Ok(Self::open(dir))
    }

    // ── Entry Management ────────────────────────────────────────────

    /// Validate raw textual input and add the resulting entry.
    ///
    /// On validation failure returns `CoreError::Validation` carrying one
    /// message per failed rule (newline-joined) and mutates nothing.
    /// On success the session becomes `NotSaved`.
    pub fn add_entry(
        &mut self,
        group_id: &str,
        item_id: &str,
        quantity: &str,
    ) -> Result<(), CoreError> {
        let entry = self
            .validation_service
            .validate(group_id, item_id, quantity, &self.settings)?;
        self.workspace.push(entry);
        self.save_state = SaveState::NotSaved;
        Ok(())
    }

    /// Remove the entry at `index`. Returns the removed entry.
    /// On success the session becomes `NotSaved`.
    pub fn remove_entry(&mut self, index: usize) -> Result<Entry, CoreError> {
        let entry = self
            .workspace
            .remove(index)
            .ok_or(CoreError::EntryNotFound(index))?;
        self.save_state = SaveState::NotSaved;
        Ok(entry)
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        self.workspace.entries()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.workspace.len()
    }

    /// Mutation version of the entry set. Bumped on every add, remove,
    /// and workspace load; the presentation layer polls it to know when
    /// to re-render.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.workspace.version()
    }

    // ── Summaries ───────────────────────────────────────────────────

    /// Total quantity per item ID, across all groups.
    #[must_use]
    pub fn summary_by_item(&self) -> BTreeMap<String, i64> {
        self.summary_service.by_item_id(self.workspace.entries())
    }

    /// Total quantity per item ID within each group (`None` = no group).
    #[must_use]
    pub fn summary_by_group_and_item(&self) -> BTreeMap<Option<String>, BTreeMap<String, i64>> {
        self.summary_service
            .by_group_and_item_id(self.workspace.entries())
    }

    // ── Save / Load ─────────────────────────────────────────────────

    /// Whether a save would currently be accepted: there are entries and
    /// the session has unsaved changes. The UI uses this to enable the
    /// save affordance (and to keep save requests serialized).
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.workspace.is_empty() && self.save_state == SaveState::NotSaved
    }

    /// Aggregate the current entries into a snapshot and persist it at
    /// the front of the bounded history. Suspends for the file write.
    ///
    /// Guards (checked before any I/O): fails with `NothingToSave` on an
    /// empty entry set and `AlreadySaved` if nothing changed since the
    /// last save or load. On persistence failure the history — in memory
    /// and on disk — is unchanged and the session stays `NotSaved`.
    pub async fn save_current_workspace(&mut self) -> Result<(), CoreError> {
        if self.save_state == SaveState::Saved {
            return Err(CoreError::AlreadySaved);
        }
        if self.workspace.is_empty() {
            return Err(CoreError::NothingToSave);
        }

        let snapshot = SavedWorkspace {
            saved_on: chrono::Local::now().naive_local(),
            entries: self
                .summary_service
                .merge_for_snapshot(self.workspace.entries()),
        };
        self.history.insert(snapshot).await?;
        self.save_state = SaveState::Saved;
        Ok(())
    }

    /// Replace the current entries wholesale with the snapshot at `index`
    /// in the history list, and mark the session `Saved`.
    ///
    /// Destructive to unsaved entries — callers should warn the user
    /// first when `has_unsaved_changes()` is true.
    pub fn load_workspace(&mut self, index: usize) -> Result<(), CoreError> {
        let snapshot = self
            .history
            .get(index)
            .ok_or(CoreError::WorkspaceNotFound(index))?;
        self.workspace.replace_all(snapshot.entries.clone());
        self.save_state = SaveState::Saved;
        Ok(())
    }

    /// Saved workspaces, newest first, capped at `max_saved_workspaces`.
    #[must_use]
    pub fn saved_workspaces(&self) -> &[SavedWorkspace] {
        self.history.list()
    }

    #[must_use]
    pub fn max_saved_workspaces(&self) -> usize {
        self.history.max_saved_workspaces()
    }

    // ── Save State ──────────────────────────────────────────────────

    #[must_use]
    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Returns `true` if the entry set has been modified since the last
    /// successful save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.save_state == SaveState::NotSaved
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
