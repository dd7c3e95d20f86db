//! Unified state store
//!
//! The `Store` is the single authority for reading and writing the
//! persisted `AppState` document. It owns an in-memory copy of the document
//! and an injected `StateBackend`.
//!
//! ## Contract
//!
//! - `load()` never fails. No stored document, an unavailable backend, or a
//!   document that does not parse all yield the defaults. Defaults are not
//!   written back by `load()`.
//! - `save()` replaces the stored document. Backend failures are logged and
//!   otherwise ignored.
//! - `update(patch)` loads, shallow-merges the patch at the top level, saves,
//!   and returns the merged document.
//!
//! Shallow merge means a patch replaces whole top-level values. To change one
//! week of one month, read `module_progress`, change the element, and pass
//! the whole vector back. `streaks` and `preferences` are replaced as units.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let state = store.load();
//! let streaks = Streaks { gratitude: state.streaks.gratitude + 1, ..state.streaks };
//! store.update(StatePatch::new().streaks(streaks));
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{
    AppState, JournalEntry, LegacyItem, ModuleProgress, PracticePath, Preferences,
    ServiceProject, Streaks,
};
use crate::storage::{FileBackend, MemoryBackend, StateBackend, StorageResult};

/// A partial update to the state document
///
/// Each present field replaces the top-level value of the same name.
/// Absent fields are left untouched. Deserializes from camelCase JSON, so
/// `{"streaks": {"gratitude": 1, "presence": 0}}` is a valid patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
    /// `Some(None)` clears the path back to unset
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<Option<PracticePath>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_progress: Option<Vec<ModuleProgress>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_entries: Option<Vec<JournalEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_projects: Option<Vec<ServiceProject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_items: Option<Vec<LegacyItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaks: Option<Streaks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

/// Distinguish an explicit `null` from a missing key
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl StatePatch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn onboarding_complete(mut self, complete: bool) -> Self {
        self.onboarding_complete = Some(complete);
        self
    }

    pub fn path(mut self, path: Option<PracticePath>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn goals(mut self, goals: Vec<String>) -> Self {
        self.goals = Some(goals);
        self
    }

    pub fn module_progress(mut self, progress: Vec<ModuleProgress>) -> Self {
        self.module_progress = Some(progress);
        self
    }

    pub fn journal_entries(mut self, entries: Vec<JournalEntry>) -> Self {
        self.journal_entries = Some(entries);
        self
    }

    pub fn service_projects(mut self, projects: Vec<ServiceProject>) -> Self {
        self.service_projects = Some(projects);
        self
    }

    pub fn legacy_items(mut self, items: Vec<LegacyItem>) -> Self {
        self.legacy_items = Some(items);
        self
    }

    pub fn streaks(mut self, streaks: Streaks) -> Self {
        self.streaks = Some(streaks);
        self
    }

    pub fn preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Whether the patch touches nothing
    pub fn is_empty(&self) -> bool {
        self.touched_keys().is_empty()
    }

    /// Top-level keys this patch replaces, in document order
    pub fn touched_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.onboarding_complete.is_some() {
            keys.push("onboardingComplete");
        }
        if self.path.is_some() {
            keys.push("path");
        }
        if self.goals.is_some() {
            keys.push("goals");
        }
        if self.module_progress.is_some() {
            keys.push("moduleProgress");
        }
        if self.journal_entries.is_some() {
            keys.push("journalEntries");
        }
        if self.service_projects.is_some() {
            keys.push("serviceProjects");
        }
        if self.legacy_items.is_some() {
            keys.push("legacyItems");
        }
        if self.streaks.is_some() {
            keys.push("streaks");
        }
        if self.preferences.is_some() {
            keys.push("preferences");
        }
        keys
    }

    /// Shallow-merge this patch over a document
    pub fn apply_to(self, state: &mut AppState) {
        if let Some(complete) = self.onboarding_complete {
            state.onboarding_complete = complete;
        }
        if let Some(path) = self.path {
            state.path = path;
        }
        if let Some(goals) = self.goals {
            state.goals = goals;
        }
        if let Some(progress) = self.module_progress {
            state.module_progress = progress;
        }
        if let Some(entries) = self.journal_entries {
            state.journal_entries = entries;
        }
        if let Some(projects) = self.service_projects {
            state.service_projects = projects;
        }
        if let Some(items) = self.legacy_items {
            state.legacy_items = items;
        }
        if let Some(streaks) = self.streaks {
            state.streaks = streaks;
        }
        if let Some(preferences) = self.preferences {
            state.preferences = preferences;
        }
    }
}

/// Single authority for the persisted state document
pub struct Store {
    /// Persistence backend
    backend: Box<dyn StateBackend>,
    /// Last document loaded or saved
    state: AppState,
}

impl Store {
    /// Open the store backed by the configured data directory
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: &Config) -> Self {
        Self::with_backend(FileBackend::from_config(config))
    }

    /// Open a store that keeps everything in memory
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open the store over any backend and load the current document
    pub fn with_backend(backend: impl StateBackend + 'static) -> Self {
        let mut store = Self {
            backend: Box::new(backend),
            state: AppState::default(),
        };
        store.load();
        store
    }

    /// Description of the backend, for status output
    pub fn backend_description(&self) -> String {
        self.backend.describe()
    }

    /// The document as of the last load or save
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Read the current document from the backend
    pub fn load(&mut self) -> AppState {
        self.state = self.read_document();
        self.state.clone()
    }

    /// Persist the full document, replacing whatever was stored
    pub fn save(&mut self, state: &AppState) {
        self.state = state.clone();
        if let Err(e) = self.write_document(state) {
            warn!(
                "Could not save state to {}, continuing without persisting: {}",
                self.backend.describe(),
                e
            );
            if let Some(suggestion) = e.recovery_suggestion() {
                warn!("{}", suggestion);
            }
        }
    }

    /// Load, shallow-merge `patch`, save, and return the merged document
    pub fn update(&mut self, patch: StatePatch) -> AppState {
        debug!("Updating state keys {:?}", patch.touched_keys());

        let mut state = self.load();
        patch.apply_to(&mut state);
        state.normalize();
        self.save(&state);
        state
    }

    fn read_document(&mut self) -> AppState {
        let bytes = match self.backend.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No stored state in {}, using defaults", self.backend.describe());
                return AppState::default();
            }
            Err(e) => {
                warn!("State storage unavailable, using defaults: {}", e);
                return AppState::default();
            }
        };

        match serde_json::from_slice::<AppState>(&bytes) {
            Ok(mut state) => {
                state.normalize();
                debug!("Loaded state from {}", self.backend.describe());
                state
            }
            Err(e) => {
                warn!(
                    "Stored state in {} is corrupted ({}), using defaults",
                    self.backend.describe(),
                    e
                );
                match self.backend.preserve_corrupt(&bytes) {
                    Ok(Some(path)) => warn!("Corrupted state copied to {:?}", path),
                    Ok(None) => {}
                    Err(e) => warn!("Could not keep a copy of the corrupted state: {}", e),
                }
                AppState::default()
            }
        }
    }

    fn write_document(&mut self, state: &AppState) -> StorageResult<()> {
        let bytes = serde_json::to_vec(state)?;
        self.backend.write(&bytes)?;
        debug!("Saved state ({} bytes)", bytes.len());
        Ok(())
    }
}
