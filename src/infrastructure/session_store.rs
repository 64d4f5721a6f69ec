//! In-memory, per-session holding area for generated test cases.
//!
//! Each browser session owns one entry:
//! - a pending batch, written by a generation and consumed by the next display
//! - the last displayed batch, kept for CSV export
//! - a one-shot error message for the page that follows a failed submission
//!
//! Entries idle for longer than the TTL expire; reads never see them.

use crate::domain::test_case::TestCase;
use mini_moka::sync::Cache;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const MAX_SESSIONS: u64 = 10_000;
/// One week. Keeps the idle duration within what the cache accepts.
const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Default)]
struct SessionEntry {
    pending: Option<Vec<TestCase>>,
    last_exported: Option<Vec<TestCase>>,
    flash_error: Option<String>,
}

type SharedEntry = Arc<Mutex<SessionEntry>>;

fn lock(entry: &SharedEntry) -> MutexGuard<'_, SessionEntry> {
    // A panic while holding the lock cannot leave an entry half-written.
    entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct SessionStore {
    entries: Cache<String, SharedEntry>,
    creation: Mutex<()>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        let minutes = ttl_minutes.clamp(1, MAX_TTL_MINUTES) as u64;
        Self::with_time_to_idle(Duration::from_secs(minutes * 60))
    }

    fn with_time_to_idle(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(ttl)
                .build(),
            creation: Mutex::new(()),
        }
    }

    fn existing(&self, session_id: &str) -> Option<SharedEntry> {
        self.entries.get(&session_id.to_string())
    }

    fn entry(&self, session_id: &str) -> SharedEntry {
        if let Some(entry) = self.existing(session_id) {
            return entry;
        }
        let _guard = self
            .creation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(entry) = self.existing(session_id) {
            return entry;
        }
        let entry = SharedEntry::default();
        self.entries.insert(session_id.to_string(), entry.clone());
        entry
    }

    /// Records a fresh batch as ready for display. Last write wins.
    pub fn store_generated(&self, session_id: &str, test_cases: Vec<TestCase>) {
        lock(&self.entry(session_id)).pending = Some(test_cases);
    }

    /// One-shot read: hands out the pending batch and keeps it as the export
    /// copy. A second call returns `None` until the next generation.
    pub fn take_for_display(&self, session_id: &str) -> Option<Vec<TestCase>> {
        let entry = self.existing(session_id)?;
        let mut entry = lock(&entry);
        let batch = entry.pending.take()?;
        entry.last_exported = Some(batch.clone());
        Some(batch)
    }

    /// Makes a batch available for export without a display round-trip.
    pub fn store_exportable(&self, session_id: &str, test_cases: Vec<TestCase>) {
        let entry = self.entry(session_id);
        let mut entry = lock(&entry);
        entry.pending = None;
        entry.last_exported = Some(test_cases);
    }

    pub fn last_exported(&self, session_id: &str) -> Option<Vec<TestCase>> {
        let entry = self.existing(session_id)?;
        let batch = lock(&entry).last_exported.clone();
        batch
    }

    pub fn set_error(&self, session_id: &str, message: String) {
        lock(&self.entry(session_id)).flash_error = Some(message);
    }

    pub fn take_error(&self, session_id: &str) -> Option<String> {
        let entry = self.existing(session_id)?;
        let message = lock(&entry).flash_error.take();
        message
    }

    /// Forgets everything stored for the session.
    pub fn clear(&self, session_id: &str) {
        self.entries.invalidate(&session_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str) -> Vec<TestCase> {
        vec![TestCase {
            id: Some(id.to_string()),
            ..Default::default()
        }]
    }

    #[test]
    fn test_display_read_is_one_shot() {
        let store = SessionStore::new(60);
        store.store_generated("s1", batch("TC001"));

        let shown = store.take_for_display("s1").unwrap();
        assert_eq!(shown[0].id(), "TC001");
        assert!(store.take_for_display("s1").is_none());
        assert_eq!(store.last_exported("s1").unwrap()[0].id(), "TC001");
    }

    #[test]
    fn test_export_copy_requires_display() {
        let store = SessionStore::new(60);
        store.store_generated("s1", batch("TC001"));
        assert!(store.last_exported("s1").is_none());
    }

    #[test]
    fn test_new_generation_overwrites_pending() {
        let store = SessionStore::new(60);
        store.store_generated("s1", batch("TC001"));
        store.store_generated("s1", batch("TC100"));
        assert_eq!(store.take_for_display("s1").unwrap()[0].id(), "TC100");
    }

    #[test]
    fn test_clear_discards_everything() {
        let store = SessionStore::new(60);
        store.store_generated("s1", batch("TC001"));
        store.take_for_display("s1");
        store.store_generated("s1", batch("TC002"));
        store.set_error("s1", "boom".to_string());

        store.clear("s1");
        assert!(store.take_for_display("s1").is_none());
        assert!(store.last_exported("s1").is_none());
        assert!(store.take_error("s1").is_none());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(60);
        store.store_generated("alice", batch("A1"));
        assert!(store.take_for_display("bob").is_none());
        assert!(store.last_exported("bob").is_none());
        assert_eq!(store.take_for_display("alice").unwrap()[0].id(), "A1");
    }

    #[test]
    fn test_flash_error_is_one_shot() {
        let store = SessionStore::new(60);
        store.set_error("s1", "Endpoint URL is required".to_string());
        assert_eq!(
            store.take_error("s1").as_deref(),
            Some("Endpoint URL is required")
        );
        assert!(store.take_error("s1").is_none());
    }

    #[test]
    fn test_store_exportable_skips_display() {
        let store = SessionStore::new(60);
        store.store_exportable("s1", batch("TC001"));
        assert!(store.take_for_display("s1").is_none());
        assert_eq!(store.last_exported("s1").unwrap()[0].id(), "TC001");
    }

    #[test]
    fn test_idle_session_is_not_served_after_ttl() {
        let store = SessionStore::with_time_to_idle(Duration::from_millis(50));
        store.store_exportable("old", batch("TC001"));
        store.set_error("old", "boom".to_string());
        assert!(store.last_exported("old").is_some());

        std::thread::sleep(Duration::from_millis(200));
        assert!(store.last_exported("old").is_none());
        assert!(store.take_error("old").is_none());
        assert!(store.take_for_display("old").is_none());
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let store = SessionStore::new(i64::MAX);
        store.store_generated("s1", batch("TC001"));
        assert!(store.take_for_display("s1").is_some());

        let store = SessionStore::new(-5);
        store.store_generated("s1", batch("TC001"));
        assert!(store.take_for_display("s1").is_some());
    }
}
