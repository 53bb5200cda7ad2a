//! Client-side study store: progress mutations, derived queries, and the
//! device half of the sync protocol.
//!
//! The store is local-first. Every mutation lands in the local map before
//! anything touches the network; when the device is paired, a best-effort
//! push follows and its failure is recorded in `sync_error` without rolling
//! the mutation back. All time-dependent methods take `now` explicitly, so
//! derived queries are pure functions of the tasks, the progress map, and
//! the supplied instant.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::calendar::Calendar;
use crate::config::StudyConfig;
use crate::models::{
    CreateAccountRequest, JoinAccountRequest, NotificationSettings, ProgressRecord, ProgressState,
    PushProgressRequest, StudyTask, SyncInfo, TaskProgress,
};
use crate::persist::SavedState;
use crate::plan;
use crate::sync::{SyncApi, SyncError};

pub struct StudyStore<A> {
    tasks: Vec<StudyTask>,
    progress: HashMap<String, TaskProgress>,
    calendar: Calendar,
    exam_date: NaiveDate,
    notification_settings: NotificationSettings,
    sync_info: SyncInfo,
    is_syncing: bool,
    sync_error: Option<String>,
    api: A,
}

impl<A: SyncApi> StudyStore<A> {
    pub fn new(tasks: Vec<StudyTask>, calendar: Calendar, exam_date: NaiveDate, api: A) -> Self {
        Self {
            tasks,
            progress: HashMap::new(),
            calendar,
            exam_date,
            notification_settings: NotificationSettings::default(),
            sync_info: SyncInfo::default(),
            is_syncing: false,
            sync_error: None,
            api,
        }
    }

    /// Build a store over the generated catalog for the configured calendar
    pub fn from_study_config(study: &StudyConfig, api: A) -> Self {
        let calendar = study.calendar();
        let tasks = plan::generate(&calendar);
        Self::new(tasks, calendar, study.exam_date, api)
    }

    pub fn tasks(&self) -> &[StudyTask] {
        &self.tasks
    }

    pub fn sync_info(&self) -> &SyncInfo {
        &self.sync_info
    }

    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    pub fn is_syncing(&self) -> bool {
        self.is_syncing
    }

    pub fn notification_settings(&self) -> &NotificationSettings {
        &self.notification_settings
    }

    pub fn set_notification_settings(&mut self, settings: NotificationSettings) {
        self.notification_settings = settings;
    }

    /// Snapshot of everything that persists between sessions
    pub fn saved_state(&self) -> SavedState {
        SavedState {
            task_progress: self.progress.clone(),
            notification_settings: self.notification_settings.clone(),
            sync_info: self.sync_info.clone(),
        }
    }

    /// Restore a previous session's snapshot
    pub fn restore(&mut self, state: SavedState) {
        self.progress = state.task_progress;
        self.notification_settings = state.notification_settings;
        self.sync_info = state.sync_info;
    }

    // ---- mutations -------------------------------------------------------

    /// Mark a task complete. Fully overwrites any prior record for the task.
    pub async fn mark_complete(
        &mut self,
        task_id: &str,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.progress.insert(
            task_id.to_string(),
            TaskProgress {
                task_id: task_id.to_string(),
                state: ProgressState::Completed { at: now },
                notes: notes.into(),
            },
        );
        self.push_if_paired(now).await;
    }

    /// Mark a task skipped. Notes are discarded; the record is re-asserted
    /// from scratch.
    pub async fn mark_skipped(&mut self, task_id: &str, now: DateTime<Utc>) {
        self.progress.insert(
            task_id.to_string(),
            TaskProgress {
                task_id: task_id.to_string(),
                state: ProgressState::Skipped { at: now },
                notes: String::new(),
            },
        );
        self.push_if_paired(now).await;
    }

    /// Flag a task as deferred to the next day. The task keeps its original
    /// `day`, so day-based queries still list it where it was scheduled, and
    /// the flag does not survive a sync round-trip. No-op for tasks on the
    /// last two days of the plan.
    pub async fn move_to_next_day(&mut self, task_id: &str, now: DateTime<Utc>) {
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return;
        };
        if task.day + 1 >= self.calendar.total_days {
            return;
        }

        self.progress.insert(
            task_id.to_string(),
            TaskProgress {
                task_id: task_id.to_string(),
                state: ProgressState::MovedToNextDay,
                notes: "Moved to next day".to_string(),
            },
        );
        self.push_if_paired(now).await;
    }

    /// Clear every progress record
    pub fn reset(&mut self) {
        self.progress.clear();
    }

    // ---- derived queries -------------------------------------------------

    /// The day number `now` falls on within the study period
    pub fn current_day(&self, now: DateTime<Utc>) -> u32 {
        self.calendar.current_day(now)
    }

    /// Today's scheduled tasks, prefixed by every unresolved task from
    /// earlier days. The backlog keeps bleeding forward until each task is
    /// completed or skipped.
    pub fn today_tasks(&self, now: DateTime<Utc>) -> Vec<&StudyTask> {
        let current = self.calendar.current_day(now);

        let mut tasks: Vec<&StudyTask> = self
            .tasks
            .iter()
            .filter(|task| task.day < current && !self.is_resolved(&task.id))
            .collect();
        tasks.extend(self.tasks.iter().filter(|task| task.day == current));
        tasks
    }

    /// Unresolved tasks scheduled strictly before today
    pub fn overdue_tasks(&self, now: DateTime<Utc>) -> Vec<&StudyTask> {
        let current = self.calendar.current_day(now);
        self.tasks
            .iter()
            .filter(|task| task.day < current && !self.is_resolved(&task.id))
            .collect()
    }

    /// Tasks scheduled on a calendar date
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&StudyTask> {
        let day = self.calendar.day_for_date(date);
        self.tasks
            .iter()
            .filter(|task| i64::from(task.day) == day)
            .collect()
    }

    /// Completed share of the whole catalog, as a whole-number percentage
    pub fn overall_progress(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        let completed = self.progress.values().filter(|p| p.is_completed()).count();
        percentage(completed, self.tasks.len())
    }

    /// Completed share of today's task list (backlog included)
    pub fn today_progress(&self, now: DateTime<Utc>) -> u32 {
        let today = self.today_tasks(now);
        if today.is_empty() {
            return 0;
        }
        let completed = today
            .iter()
            .filter(|task| self.is_completed(&task.id))
            .count();
        percentage(completed, today.len())
    }

    /// Count of consecutive fully-completed days immediately before today.
    /// A day with no scheduled tasks stops the walk.
    pub fn streak(&self, now: DateTime<Utc>) -> u32 {
        let current = self.calendar.current_day(now);
        let mut streak = 0;

        for day in (1..current).rev() {
            let mut day_tasks = self.tasks.iter().filter(|t| t.day == day).peekable();
            if day_tasks.peek().is_none() {
                break;
            }
            if day_tasks.all(|task| self.is_completed(&task.id)) {
                streak += 1;
            } else {
                break;
            }
        }

        streak
    }

    /// Days until the exam, floored at zero
    pub fn days_remaining(&self, now: DateTime<Utc>) -> u32 {
        (self.exam_date - now.date_naive()).num_days().max(0) as u32
    }

    pub fn task_progress(&self, task_id: &str) -> Option<&TaskProgress> {
        self.progress.get(task_id)
    }

    fn is_resolved(&self, task_id: &str) -> bool {
        self.progress
            .get(task_id)
            .is_some_and(TaskProgress::is_resolved)
    }

    fn is_completed(&self, task_id: &str) -> bool {
        self.progress
            .get(task_id)
            .is_some_and(TaskProgress::is_completed)
    }

    // ---- sync actions ----------------------------------------------------

    /// Create a fresh sync account and push any existing local progress to it
    pub async fn create_account(&mut self, name: Option<String>, now: DateTime<Utc>) {
        self.is_syncing = true;
        self.sync_error = None;

        let request = CreateAccountRequest {
            device_name: Some(self.sync_info.device_name.clone()),
            device_type: Some(self.sync_info.device_type.clone()),
            name,
        };

        match self.api.create_account(request).await {
            Ok(response) => {
                self.sync_info.is_synced = true;
                self.sync_info.user_id = Some(response.user_id);
                self.sync_info.device_id = Some(response.device_id);
                self.sync_info.sync_code = Some(response.sync_code);
                self.sync_info.last_sync_at = Some(now);
                self.is_syncing = false;
                self.sync_progress(now).await;
            }
            Err(error) => {
                self.sync_error = Some(error_message(&error, "Failed to create sync account"));
                self.is_syncing = false;
            }
        }
    }

    /// Join an existing account by sync code and seed local progress with
    /// the server's records. Seeding merges into local progress; records the
    /// server does not know about survive.
    pub async fn join_account(&mut self, sync_code: &str, now: DateTime<Utc>) {
        self.is_syncing = true;
        self.sync_error = None;

        let request = JoinAccountRequest {
            sync_code: Some(sync_code.to_string()),
            device_name: Some(self.sync_info.device_name.clone()),
            device_type: Some(self.sync_info.device_type.clone()),
        };

        match self.api.join_account(request).await {
            Ok(response) => {
                self.sync_info.is_synced = true;
                self.sync_info.user_id = Some(response.user_id);
                self.sync_info.device_id = Some(response.device_id);
                self.sync_info.sync_code = Some(response.sync_code);
                self.sync_info.last_sync_at = Some(now);
                for record in &response.task_progress {
                    self.progress.insert(
                        record.task_id.clone(),
                        TaskProgress::from_record(record, now),
                    );
                }
                self.is_syncing = false;
            }
            Err(error) => {
                self.sync_error = Some(error_message(&error, "Failed to join sync account"));
                self.is_syncing = false;
            }
        }
    }

    /// Push the full local progress map and replace it with the server's
    /// merged view. No-op when not paired.
    pub async fn sync_progress(&mut self, now: DateTime<Utc>) {
        if !self.sync_info.is_synced {
            return;
        }
        let (Some(user_id), Some(device_id)) = (
            self.sync_info.user_id.clone(),
            self.sync_info.device_id.clone(),
        ) else {
            return;
        };

        self.is_syncing = true;
        self.sync_error = None;

        let progress: HashMap<String, ProgressRecord> = self
            .progress
            .iter()
            .map(|(task_id, record)| (task_id.clone(), record.to_record()))
            .collect();

        let request = PushProgressRequest {
            user_id: Some(user_id),
            device_id: Some(device_id),
            progress: Some(progress),
        };

        match self.api.push_progress(request).await {
            Ok(response) => {
                self.progress = response
                    .task_progress
                    .iter()
                    .map(|(task_id, record)| {
                        (task_id.clone(), TaskProgress::from_record(record, now))
                    })
                    .collect();
                self.sync_info.last_sync_at = Some(response.last_sync);
                self.is_syncing = false;
            }
            Err(error) => {
                self.sync_error = Some(error_message(&error, "Sync failed. Will retry later."));
                self.is_syncing = false;
            }
        }
    }

    /// Drop the local pairing. The server keeps the identity and its other
    /// devices; only this device stops syncing.
    pub fn disconnect(&mut self) {
        let device_name = self.sync_info.device_name.clone();
        let device_type = self.sync_info.device_type.clone();
        self.sync_info = SyncInfo {
            device_name,
            device_type,
            ..SyncInfo::default()
        };
    }

    async fn push_if_paired(&mut self, now: DateTime<Utc>) {
        if self.sync_info.is_synced && self.sync_info.user_id.is_some() {
            self.sync_progress(now).await;
        }
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn error_message(error: &SyncError, fallback: &str) -> String {
    match error {
        SyncError::Rejected { message } => message.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateAccountResponse, FetchProgressResponse, JoinAccountResponse, PushProgressResponse,
        Topic, TopicCategory,
    };
    use async_trait::async_trait;
    use chrono::{NaiveTime, Weekday};
    use std::sync::{Arc, Mutex};

    fn calendar() -> Calendar {
        Calendar {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            total_days: 68,
            weekend: vec![Weekday::Sat, Weekday::Sun],
        }
    }

    fn topic() -> Topic {
        Topic {
            id: "principles".to_string(),
            name: "Program Management Principles".to_string(),
            category: TopicCategory::Principles,
            color: "#3b82f6".to_string(),
            icon: "BookOpen".to_string(),
        }
    }

    fn task(id: &str, day: u32) -> StudyTask {
        StudyTask {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            duration: 60,
            topic: topic(),
            day,
            is_weekend: false,
            priority: crate::models::Priority::Medium,
            resources: Vec::new(),
            key_points: Vec::new(),
        }
    }

    /// Midnight of a plan day; `current_day` resolves it to exactly `day`.
    fn at_day(day: u32) -> DateTime<Utc> {
        calendar()
            .date_for_day(day)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    /// Sync transport that always fails, for exercising the offline path
    struct OfflineApi;

    #[async_trait]
    impl SyncApi for OfflineApi {
        async fn create_account(
            &self,
            _request: CreateAccountRequest,
        ) -> Result<CreateAccountResponse, SyncError> {
            Err(SyncError::rejected("server unavailable"))
        }

        async fn join_account(
            &self,
            _request: JoinAccountRequest,
        ) -> Result<JoinAccountResponse, SyncError> {
            Err(SyncError::rejected("server unavailable"))
        }

        async fn push_progress(
            &self,
            _request: PushProgressRequest,
        ) -> Result<PushProgressResponse, SyncError> {
            Err(SyncError::rejected("server unavailable"))
        }

        async fn fetch_progress(
            &self,
            _user_id: &str,
        ) -> Result<FetchProgressResponse, SyncError> {
            Err(SyncError::rejected("server unavailable"))
        }
    }

    /// In-memory stand-in for the server, mirroring its merge semantics
    #[derive(Default, Clone)]
    struct FakeServer {
        progress: Arc<Mutex<HashMap<String, ProgressRecord>>>,
    }

    impl FakeServer {
        fn seed(&self, record: ProgressRecord) {
            self.progress
                .lock()
                .unwrap()
                .insert(record.task_id.clone(), record);
        }

        fn snapshot(&self) -> HashMap<String, ProgressRecord> {
            self.progress.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SyncApi for FakeServer {
        async fn create_account(
            &self,
            _request: CreateAccountRequest,
        ) -> Result<CreateAccountResponse, SyncError> {
            Ok(CreateAccountResponse {
                success: true,
                sync_code: "PGMP-TEST-CODE".to_string(),
                user_id: "user-1".to_string(),
                device_id: "device-1".to_string(),
                message: String::new(),
            })
        }

        async fn join_account(
            &self,
            _request: JoinAccountRequest,
        ) -> Result<JoinAccountResponse, SyncError> {
            Ok(JoinAccountResponse {
                success: true,
                user_id: "user-1".to_string(),
                device_id: "device-2".to_string(),
                sync_code: "PGMP-TEST-CODE".to_string(),
                name: None,
                task_progress: self.snapshot().into_values().collect(),
                message: String::new(),
            })
        }

        async fn push_progress(
            &self,
            request: PushProgressRequest,
        ) -> Result<PushProgressResponse, SyncError> {
            let mut progress = self.progress.lock().unwrap();
            for (task_id, record) in request.progress.unwrap_or_default() {
                progress.insert(task_id, record);
            }
            Ok(PushProgressResponse {
                success: true,
                task_progress: progress.clone(),
                last_sync: at_day(10),
                message: String::new(),
            })
        }

        async fn fetch_progress(
            &self,
            _user_id: &str,
        ) -> Result<FetchProgressResponse, SyncError> {
            Ok(FetchProgressResponse {
                success: true,
                task_progress: self.snapshot(),
                last_sync: at_day(10),
            })
        }
    }

    fn offline_store(tasks: Vec<StudyTask>) -> StudyStore<OfflineApi> {
        StudyStore::new(
            tasks,
            calendar(),
            NaiveDate::from_ymd_opt(2026, 4, 23).unwrap(),
            OfflineApi,
        )
    }

    fn completed_record(task_id: &str) -> ProgressRecord {
        ProgressRecord {
            task_id: task_id.to_string(),
            completed: true,
            completed_at: Some(at_day(3)),
            skipped: false,
            skipped_at: None,
            notes: String::new(),
        }
    }

    fn skipped_record(task_id: &str) -> ProgressRecord {
        ProgressRecord {
            task_id: task_id.to_string(),
            completed: false,
            completed_at: None,
            skipped: true,
            skipped_at: Some(at_day(3)),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn completing_twice_keeps_the_second_timestamp() {
        let mut store = offline_store(vec![task("task-1", 1)]);

        store.mark_complete("task-1", "first pass", at_day(1)).await;
        store.mark_complete("task-1", "second pass", at_day(2)).await;

        let progress = store.task_progress("task-1").unwrap();
        assert_eq!(progress.state, ProgressState::Completed { at: at_day(2) });
        assert_eq!(progress.notes, "second pass");
    }

    #[tokio::test]
    async fn skipping_overwrites_a_completion_and_discards_notes() {
        let mut store = offline_store(vec![task("task-1", 1)]);

        store.mark_complete("task-1", "notes to lose", at_day(1)).await;
        store.mark_skipped("task-1", at_day(2)).await;

        let progress = store.task_progress("task-1").unwrap();
        assert!(!progress.is_completed());
        assert_eq!(progress.state, ProgressState::Skipped { at: at_day(2) });
        assert_eq!(progress.notes, "");
    }

    #[tokio::test]
    async fn moving_flags_without_rescheduling() {
        let mut store = offline_store(vec![task("task-1", 5), task("task-2", 6)]);

        store.move_to_next_day("task-1", at_day(5)).await;

        let progress = store.task_progress("task-1").unwrap();
        assert_eq!(progress.state, ProgressState::MovedToNextDay);
        assert_eq!(progress.notes, "Moved to next day");

        // Still listed on its original day, and unresolved, so it turns up
        // as overdue the next day.
        let date = calendar().date_for_day(5);
        assert_eq!(store.tasks_for_date(date).len(), 1);
        let overdue = store.overdue_tasks(at_day(6));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "task-1");
    }

    #[tokio::test]
    async fn moving_the_final_days_is_a_noop() {
        let mut store = offline_store(vec![task("task-67", 67), task("task-68", 68)]);

        store.move_to_next_day("task-67", at_day(67)).await;
        store.move_to_next_day("task-68", at_day(67)).await;

        assert!(store.task_progress("task-67").is_none());
        assert!(store.task_progress("task-68").is_none());
    }

    #[tokio::test]
    async fn backlog_bleeds_into_today_as_a_prefix() {
        let mut store = offline_store(vec![
            task("task-1", 1),
            task("task-2", 2),
            task("task-5", 5),
        ]);
        store.mark_skipped("task-2", at_day(2)).await;

        let today = store.today_tasks(at_day(5));
        let ids: Vec<&str> = today.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-5"]);

        let overdue = store.overdue_tasks(at_day(5));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "task-1");
    }

    #[tokio::test]
    async fn streak_counts_back_from_yesterday() {
        let mut store = offline_store(vec![
            task("task-1", 1),
            task("task-2", 2),
            task("task-3", 3),
        ]);

        store.mark_complete("task-1", "", at_day(1)).await;
        store.mark_complete("task-2", "", at_day(2)).await;
        store.mark_complete("task-3", "", at_day(3)).await;
        assert_eq!(store.streak(at_day(4)), 3);

        // Yesterday incomplete kills the streak outright.
        store.mark_skipped("task-3", at_day(3)).await;
        assert_eq!(store.streak(at_day(4)), 0);

        // An earlier hole only truncates it.
        store.mark_complete("task-3", "", at_day(3)).await;
        store.mark_skipped("task-1", at_day(1)).await;
        assert_eq!(store.streak(at_day(4)), 2);
    }

    #[tokio::test]
    async fn streak_stops_at_an_empty_day() {
        let mut store = offline_store(vec![task("task-1", 1), task("task-3", 3)]);
        store.mark_complete("task-1", "", at_day(1)).await;
        store.mark_complete("task-3", "", at_day(3)).await;

        // Day 2 has no tasks: the walk stops there.
        assert_eq!(store.streak(at_day(4)), 1);
    }

    #[tokio::test]
    async fn progress_percentages_round() {
        let mut store = offline_store(vec![
            task("task-1", 1),
            task("task-2", 1),
            task("task-3", 2),
        ]);
        assert_eq!(store.overall_progress(), 0);

        store.mark_complete("task-1", "", at_day(1)).await;
        assert_eq!(store.overall_progress(), 33);

        store.mark_complete("task-2", "", at_day(1)).await;
        assert_eq!(store.overall_progress(), 67);
        assert_eq!(store.today_progress(at_day(1)), 100);
    }

    #[tokio::test]
    async fn reset_clears_all_records() {
        let mut store = offline_store(vec![task("task-1", 1)]);
        store.mark_complete("task-1", "", at_day(1)).await;
        store.reset();
        assert!(store.task_progress("task-1").is_none());
        assert_eq!(store.overall_progress(), 0);
    }

    #[tokio::test]
    async fn days_remaining_floors_at_zero() {
        let store = offline_store(Vec::new());
        assert_eq!(store.days_remaining(at_day(1)), 68);
        assert_eq!(store.days_remaining(at_day(68)), 1);

        let after_exam = NaiveDate::from_ymd_opt(2026, 12, 1)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc();
        assert_eq!(store.days_remaining(after_exam), 0);
    }

    #[tokio::test]
    async fn failed_sync_records_the_error_and_keeps_local_state() {
        let mut store = offline_store(vec![task("task-1", 1)]);
        store.sync_info.is_synced = true;
        store.sync_info.user_id = Some("user-1".to_string());
        store.sync_info.device_id = Some("device-1".to_string());

        store.mark_complete("task-1", "", at_day(1)).await;

        assert!(store.task_progress("task-1").unwrap().is_completed());
        assert_eq!(store.sync_error(), Some("server unavailable"));
        assert!(!store.is_syncing());
    }

    #[tokio::test]
    async fn join_seeds_local_state_without_destroying_it() {
        let server = FakeServer::default();
        server.seed(skipped_record("task-y"));

        let mut store = StudyStore::new(
            vec![task("task-x", 1), task("task-y", 2)],
            calendar(),
            NaiveDate::from_ymd_opt(2026, 4, 23).unwrap(),
            server,
        );
        store.mark_complete("task-x", "", at_day(1)).await;

        store.join_account("PGMP-TEST-CODE", at_day(2)).await;

        assert!(store.sync_info().is_synced);
        assert!(store.task_progress("task-x").unwrap().is_completed());
        assert!(store.task_progress("task-y").unwrap().is_skipped());
    }

    #[tokio::test]
    async fn push_adopts_the_merged_server_map() {
        let server = FakeServer::default();
        server.seed(completed_record("task-b"));

        let mut store = StudyStore::new(
            vec![task("task-a", 1), task("task-b", 2)],
            calendar(),
            NaiveDate::from_ymd_opt(2026, 4, 23).unwrap(),
            server.clone(),
        );
        store.create_account(None, at_day(1)).await;

        store.mark_complete("task-a", "", at_day(1)).await;

        // Union by overwrite on the server, adopted wholesale locally.
        assert!(server.snapshot().contains_key("task-a"));
        assert!(store.task_progress("task-a").unwrap().is_completed());
        assert!(store.task_progress("task-b").unwrap().is_completed());
        assert!(store.sync_error().is_none());
    }

    #[tokio::test]
    async fn moved_flag_is_lost_over_a_sync_round_trip() {
        let server = FakeServer::default();
        let mut store = StudyStore::new(
            vec![task("task-a", 1)],
            calendar(),
            NaiveDate::from_ymd_opt(2026, 4, 23).unwrap(),
            server,
        );
        store.create_account(None, at_day(1)).await;

        store.move_to_next_day("task-a", at_day(1)).await;

        let progress = store.task_progress("task-a").unwrap();
        assert_eq!(progress.state, ProgressState::Pending);
        assert_eq!(progress.notes, "Moved to next day");
    }

    #[tokio::test]
    async fn disconnect_is_local_only() {
        let server = FakeServer::default();
        let mut store = StudyStore::new(
            vec![task("task-a", 1)],
            calendar(),
            NaiveDate::from_ymd_opt(2026, 4, 23).unwrap(),
            server.clone(),
        );
        store.create_account(None, at_day(1)).await;
        store.mark_complete("task-a", "", at_day(1)).await;

        store.disconnect();

        assert!(!store.sync_info().is_synced);
        assert!(store.sync_info().user_id.is_none());
        // The server still holds the identity's progress.
        assert!(server.snapshot().contains_key("task-a"));

        // Further mutations stay local.
        store.mark_skipped("task-a", at_day(2)).await;
        assert!(server.snapshot()["task-a"].completed);
    }

    #[tokio::test]
    async fn saved_state_round_trips_through_the_store() {
        let mut store = offline_store(vec![task("task-1", 1)]);
        store.mark_complete("task-1", "keep me", at_day(1)).await;
        let snapshot = store.saved_state();

        let mut fresh = offline_store(vec![task("task-1", 1)]);
        fresh.restore(snapshot);
        assert_eq!(fresh.task_progress("task-1").unwrap().notes, "keep me");
    }
}
