//! Data model and wire types shared between the study store and the sync
//! server.
//!
//! Wire types use camelCase field names to stay compatible with the existing
//! web clients of the sync API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority level for study tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Section of the study material a topic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Principles,
    Domains,
    Lifecycle,
    Documents,
    Practice,
}

/// Display metadata for a study topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub category: TopicCategory,
    pub color: String,
    pub icon: String,
}

/// A single schedulable study activity, bound to a 1-based day offset from
/// the start of the study period. Generated once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTask {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Minutes; 0 for rest and exam days
    pub duration: u32,
    pub topic: Topic,
    pub day: u32,
    pub is_weekend: bool,
    pub priority: Priority,
    pub resources: Vec<String>,
    pub key_points: Vec<String>,
}

/// Completion state of a task. Every user action fully overwrites the
/// record, so a record is always in exactly one of these states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProgressState {
    Pending,
    Completed { at: DateTime<Utc> },
    Skipped { at: DateTime<Utc> },
    MovedToNextDay,
}

/// Mutable progress attached to one task. Absence of a record means the
/// task is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    pub task_id: String,
    pub state: ProgressState,
    pub notes: String,
}

impl TaskProgress {
    pub fn is_completed(&self) -> bool {
        matches!(self.state, ProgressState::Completed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.state, ProgressState::Skipped { .. })
    }

    /// Completed or skipped. Anything else keeps bleeding forward as
    /// backlog in the day-based queries.
    pub fn is_resolved(&self) -> bool {
        self.is_completed() || self.is_skipped()
    }

    /// Flatten to the wire form. `MovedToNextDay` has no wire
    /// representation and degrades to a pending record; only its note
    /// survives the round-trip.
    pub fn to_record(&self) -> ProgressRecord {
        let (completed, completed_at, skipped, skipped_at) = match self.state {
            ProgressState::Completed { at } => (true, Some(at), false, None),
            ProgressState::Skipped { at } => (false, None, true, Some(at)),
            ProgressState::Pending | ProgressState::MovedToNextDay => (false, None, false, None),
        };

        ProgressRecord {
            task_id: self.task_id.clone(),
            completed,
            completed_at,
            skipped,
            skipped_at,
            notes: self.notes.clone(),
        }
    }

    /// Rebuild from the wire form. A foreign record claiming both completed
    /// and skipped resolves to completed; a set flag with a missing
    /// timestamp borrows `received_at`.
    pub fn from_record(record: &ProgressRecord, received_at: DateTime<Utc>) -> Self {
        let state = if record.completed {
            ProgressState::Completed {
                at: record.completed_at.unwrap_or(received_at),
            }
        } else if record.skipped {
            ProgressState::Skipped {
                at: record.skipped_at.unwrap_or(received_at),
            }
        } else {
            ProgressState::Pending
        };

        Self {
            task_id: record.task_id.clone(),
            state,
            notes: record.notes.clone(),
        }
    }
}

/// Flat progress record as it travels over the sync API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub skipped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

/// A device registered against a sync identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub device_name: String,
    pub device_type: String,
    pub last_sync_at: DateTime<Utc>,
}

/// Local pairing state for this device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncInfo {
    pub is_synced: bool,
    pub user_id: Option<String>,
    pub device_id: Option<String>,
    pub sync_code: Option<String>,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub device_name: String,
    pub device_type: String,
}

impl Default for SyncInfo {
    fn default() -> Self {
        Self {
            is_synced: false,
            user_id: None,
            device_id: None,
            sync_code: None,
            last_sync_at: None,
            device_name: "Device".to_string(),
            device_type: "other".to_string(),
        }
    }
}

/// Reminder preferences carried in persisted client state. Scheduling is a
/// UI concern; the tracker only stores the knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enabled: bool,
    pub morning_reminder: bool,
    pub morning_time: String,
    pub evening_reminder: bool,
    pub evening_time: String,
    /// Minutes of lead time before a task reminder
    pub before_task_reminder: u32,
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    pub weekend_more_intensive: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            morning_reminder: true,
            morning_time: "08:00".to_string(),
            evening_reminder: true,
            evening_time: "19:00".to_string(),
            before_task_reminder: 15,
            quiet_hours_start: "22:00".to_string(),
            quiet_hours_end: "07:00".to_string(),
            weekend_more_intensive: true,
        }
    }
}

/// Request to create a fresh sync account. Device fields fall back to
/// placeholder values when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub success: bool,
    pub sync_code: String,
    pub user_id: String,
    pub device_id: String,
    pub message: String,
}

/// Request to join an existing account by sync code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinAccountRequest {
    #[serde(default)]
    pub sync_code: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
}

/// Join response; `task_progress` carries the identity's current records as
/// a list so the joining device can seed its local store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinAccountResponse {
    pub success: bool,
    pub user_id: String,
    pub device_id: String,
    pub sync_code: String,
    pub name: Option<String>,
    pub task_progress: Vec<ProgressRecord>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchProgressResponse {
    pub success: bool,
    pub task_progress: HashMap<String, ProgressRecord>,
    pub last_sync: DateTime<Utc>,
}

/// Single-record upsert body for the progress endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub skipped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

impl UpsertProgressRequest {
    /// Collapse into the stored wire record once the task id is validated
    pub fn into_record(self, task_id: String) -> ProgressRecord {
        ProgressRecord {
            task_id,
            completed: self.completed,
            completed_at: self.completed_at,
            skipped: self.skipped,
            skipped_at: self.skipped_at,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressResponse {
    pub success: bool,
    pub progress: ProgressRecord,
}

/// Full-map push body; the server merges per task id and answers with its
/// canonical map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushProgressRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub progress: Option<HashMap<String, ProgressRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushProgressResponse {
    pub success: bool,
    pub task_progress: HashMap<String, ProgressRecord>,
    pub last_sync: DateTime<Utc>,
    pub message: String,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 20, hour, 0, 0).unwrap()
    }

    #[test]
    fn completed_record_round_trips() {
        let progress = TaskProgress {
            task_id: "task-3".to_string(),
            state: ProgressState::Completed { at: at(9) },
            notes: "flashcards done".to_string(),
        };

        let record = progress.to_record();
        assert!(record.completed);
        assert_eq!(record.completed_at, Some(at(9)));
        assert!(!record.skipped);

        let back = TaskProgress::from_record(&record, at(12));
        assert_eq!(back, progress);
    }

    #[test]
    fn moved_state_degrades_to_pending_on_the_wire() {
        let progress = TaskProgress {
            task_id: "task-5".to_string(),
            state: ProgressState::MovedToNextDay,
            notes: "Moved to next day".to_string(),
        };

        let record = progress.to_record();
        assert!(!record.completed);
        assert!(!record.skipped);

        let back = TaskProgress::from_record(&record, at(12));
        assert_eq!(back.state, ProgressState::Pending);
        assert_eq!(back.notes, "Moved to next day");
    }

    #[test]
    fn completed_wins_over_skipped_from_foreign_writers() {
        let record = ProgressRecord {
            task_id: "task-1".to_string(),
            completed: true,
            completed_at: Some(at(8)),
            skipped: true,
            skipped_at: Some(at(9)),
            notes: String::new(),
        };

        let progress = TaskProgress::from_record(&record, at(12));
        assert_eq!(progress.state, ProgressState::Completed { at: at(8) });
    }

    #[test]
    fn missing_timestamp_falls_back_to_received_at() {
        let record = ProgressRecord {
            task_id: "task-1".to_string(),
            completed: true,
            completed_at: None,
            skipped: false,
            skipped_at: None,
            notes: String::new(),
        };

        let progress = TaskProgress::from_record(&record, at(12));
        assert_eq!(progress.state, ProgressState::Completed { at: at(12) });
    }

    #[test]
    fn wire_records_use_camel_case() {
        let record = ProgressRecord {
            task_id: "task-2".to_string(),
            completed: false,
            completed_at: None,
            skipped: true,
            skipped_at: Some(at(19)),
            notes: String::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["taskId"], "task-2");
        assert!(json["skippedAt"].is_string());

        let sparse: ProgressRecord =
            serde_json::from_str(r#"{"taskId":"task-9","completed":true}"#).unwrap();
        assert!(sparse.completed);
        assert_eq!(sparse.notes, "");
    }
}
