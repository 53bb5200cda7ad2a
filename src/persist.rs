//! Client-side persisted state.
//!
//! Only progress, notification settings, and the sync identity are written
//! out. The task catalog is regenerated deterministically at startup and UI
//! state never persists.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{NotificationSettings, SyncInfo, TaskProgress};

/// On-disk state for one device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    #[serde(default)]
    pub task_progress: HashMap<String, TaskProgress>,
    #[serde(default)]
    pub notification_settings: NotificationSettings,
    #[serde(default)]
    pub sync_info: SyncInfo,
}

impl SavedState {
    /// Load saved state, or a fresh default when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read state file")?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    /// Save state, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        std::fs::write(path, content).context("Failed to write state file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgressState;
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_file_loads_as_fresh_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = SavedState::load(&dir.path().join("state.json")).unwrap();
        assert!(state.task_progress.is_empty());
        assert!(!state.sync_info.is_synced);
        assert!(state.notification_settings.enabled);
    }

    #[test]
    fn state_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut state = SavedState::default();
        state.task_progress.insert(
            "task-12".to_string(),
            TaskProgress {
                task_id: "task-12".to_string(),
                state: ProgressState::Completed {
                    at: Utc.with_ymd_and_hms(2026, 2, 25, 20, 0, 0).unwrap(),
                },
                notes: "done after dinner".to_string(),
            },
        );
        state.sync_info.is_synced = true;
        state.sync_info.sync_code = Some("PGMP-ABCD-EFGH".to_string());

        state.save(&path).unwrap();
        let loaded = SavedState::load(&path).unwrap();

        assert_eq!(loaded.task_progress, state.task_progress);
        assert_eq!(loaded.sync_info, state.sync_info);
    }
}
