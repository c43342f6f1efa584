//! In-memory mock implementations of `WaitlistRepo`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::{UpsertOutcome, WaitlistEntry, WaitlistStats},
};

/// In-memory implementation of WaitlistRepo for testing.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<BTreeMap<i64, WaitlistEntry>>,
    calls: AtomicUsize,
}

impl InMemoryWaitlistRepo {
    /// Seed the repo with initial entries for testing.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        let map: BTreeMap<i64, WaitlistEntry> = entries.into_iter().map(|e| (e.fid, e)).collect();
        Self {
            entries: Mutex::new(map),
            calls: AtomicUsize::new(0),
        }
    }

    /// Get all entries ordered by fid (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    /// Number of repo operations performed (stats + upserts).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn stats(&self) -> AppResult<WaitlistStats> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        Ok(WaitlistStats {
            total: entries.len() as i64,
            verified: entries
                .values()
                .filter(|e| e.verified_account && e.verified_channel)
                .count() as i64,
        })
    }

    async fn upsert(&self, entry: &WaitlistEntry) -> AppResult<UpsertOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        let is_new = entries.insert(entry.fid, entry.clone()).is_none();
        Ok(UpsertOutcome {
            entry: entry.clone(),
            is_new,
        })
    }
}

/// Repo whose every operation fails like an unreachable database.
pub struct FailingWaitlistRepo {
    message: String,
}

impl FailingWaitlistRepo {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn stats(&self) -> AppResult<WaitlistStats> {
        Err(AppError::Database(self.message.clone()))
    }

    async fn upsert(&self, _entry: &WaitlistEntry) -> AppResult<UpsertOutcome> {
        Err(AppError::Database(self.message.clone()))
    }
}
