//! Identity and progress registry for the sync server.
//!
//! The shipped implementation keeps everything in process memory: state is
//! lost on restart and not shared between server instances, so horizontally
//! scaled deployments would diverge. A durable backend plugs in behind
//! [`IdentityStore`] without touching the HTTP layer.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::models::{Device, ProgressRecord};

/// Alphabet for sync codes; drops 0/O, 1/I and other easily confused glyphs
/// so codes survive hand transcription between devices.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_PREFIX: &str = "PGMP";

/// One sync identity: the devices paired to it and their shared progress
/// map. All devices of an identity write into the same flat map.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub sync_code: String,
    pub name: Option<String>,
    pub devices: Vec<Device>,
    pub progress: HashMap<String, ProgressRecord>,
}

/// Identity handed to the device that created or joined an account
#[derive(Debug, Clone)]
pub struct PairGrant {
    pub user_id: String,
    pub device_id: String,
    pub sync_code: String,
    pub name: Option<String>,
    /// Progress already held by the identity, for seeding a joining device
    pub progress: Vec<ProgressRecord>,
}

/// Storage interface for the pairing and progress handlers
pub trait IdentityStore: Send + Sync {
    /// Mint a fresh identity plus sync code and register the first device
    fn create_account(
        &self,
        name: Option<String>,
        device_name: String,
        device_type: String,
        now: DateTime<Utc>,
    ) -> Result<PairGrant>;

    /// Join an identity by sync code (case-insensitive). `None` when the
    /// code is unknown.
    fn join_account(
        &self,
        sync_code: &str,
        device_name: String,
        device_type: String,
        now: DateTime<Utc>,
    ) -> Result<Option<PairGrant>>;

    /// Full progress map for a user; `None` when the user is unknown
    fn progress_for(&self, user_id: &str) -> Result<Option<HashMap<String, ProgressRecord>>>;

    /// Store one record, creating the user on demand
    fn upsert_record(&self, user_id: &str, record: ProgressRecord) -> Result<ProgressRecord>;

    /// Merge an incoming map into the canonical one, overwriting per task
    /// id. Keys the device did not send are left untouched. Returns the
    /// full merged map.
    fn merge_progress(
        &self,
        user_id: &str,
        device_id: &str,
        incoming: HashMap<String, ProgressRecord>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<String, ProgressRecord>>;
}

/// In-memory [`IdentityStore`]
#[derive(Default)]
pub struct MemoryRegistry {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    /// sync code -> user id
    codes: HashMap<String, String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

fn mint_code(codes: &HashMap<String, String>) -> String {
    let mut rng = rand::rng();
    loop {
        let mut code = String::with_capacity(14);
        code.push_str(CODE_PREFIX);
        for _ in 0..2 {
            code.push('-');
            for _ in 0..4 {
                let index = rng.random_range(0..CODE_ALPHABET.len());
                code.push(CODE_ALPHABET[index] as char);
            }
        }
        // Collision never surfaces to the caller; regenerate until free.
        if !codes.contains_key(&code) {
            return code;
        }
    }
}

fn new_device(device_name: String, device_type: String, now: DateTime<Utc>) -> Device {
    Device {
        id: Uuid::new_v4().to_string(),
        device_name,
        device_type,
        last_sync_at: now,
    }
}

fn ensure_user<'a>(users: &'a mut HashMap<String, UserRecord>, user_id: &str) -> &'a mut UserRecord {
    users.entry(user_id.to_string()).or_insert_with(|| UserRecord {
        id: user_id.to_string(),
        sync_code: String::new(),
        name: None,
        devices: Vec::new(),
        progress: HashMap::new(),
    })
}

impl IdentityStore for MemoryRegistry {
    fn create_account(
        &self,
        name: Option<String>,
        device_name: String,
        device_type: String,
        now: DateTime<Utc>,
    ) -> Result<PairGrant> {
        let mut inner = self.inner.lock().unwrap();

        let sync_code = mint_code(&inner.codes);
        let user_id = Uuid::new_v4().to_string();
        let device = new_device(device_name, device_type, now);
        let device_id = device.id.clone();

        inner.codes.insert(sync_code.clone(), user_id.clone());
        inner.users.insert(
            user_id.clone(),
            UserRecord {
                id: user_id.clone(),
                sync_code: sync_code.clone(),
                name: name.clone(),
                devices: vec![device],
                progress: HashMap::new(),
            },
        );

        Ok(PairGrant {
            user_id,
            device_id,
            sync_code,
            name,
            progress: Vec::new(),
        })
    }

    fn join_account(
        &self,
        sync_code: &str,
        device_name: String,
        device_type: String,
        now: DateTime<Utc>,
    ) -> Result<Option<PairGrant>> {
        let mut inner = self.inner.lock().unwrap();

        let normalized = sync_code.trim().to_uppercase();
        let Some(user_id) = inner.codes.get(&normalized).cloned() else {
            return Ok(None);
        };
        let Some(user) = inner.users.get_mut(&user_id) else {
            return Ok(None);
        };

        let device = new_device(device_name, device_type, now);
        let device_id = device.id.clone();
        user.devices.push(device);

        Ok(Some(PairGrant {
            user_id: user.id.clone(),
            device_id,
            sync_code: user.sync_code.clone(),
            name: user.name.clone(),
            progress: user.progress.values().cloned().collect(),
        }))
    }

    fn progress_for(&self, user_id: &str) -> Result<Option<HashMap<String, ProgressRecord>>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(user_id).map(|user| user.progress.clone()))
    }

    fn upsert_record(&self, user_id: &str, record: ProgressRecord) -> Result<ProgressRecord> {
        let mut inner = self.inner.lock().unwrap();
        let user = ensure_user(&mut inner.users, user_id);
        user.progress.insert(record.task_id.clone(), record.clone());
        Ok(record)
    }

    fn merge_progress(
        &self,
        user_id: &str,
        device_id: &str,
        incoming: HashMap<String, ProgressRecord>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<String, ProgressRecord>> {
        let mut inner = self.inner.lock().unwrap();
        let user = ensure_user(&mut inner.users, user_id);

        for (task_id, mut record) in incoming {
            // The map key is authoritative for the task id.
            record.task_id = task_id.clone();
            user.progress.insert(task_id, record);
        }

        if let Some(device) = user.devices.iter_mut().find(|d| d.id == device_id) {
            device.last_sync_at = now;
        }

        Ok(user.progress.clone())
    }
}
