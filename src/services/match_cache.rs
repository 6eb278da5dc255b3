use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::models::MatchRecord;

pub const DEFAULT_TTL_SECS: i64 = 300;

struct Snapshot {
    fetched_at: DateTime<Utc>,
    matches: Arc<Vec<MatchRecord>>,
}

/// Process-wide snapshot of the match table with a time-to-live.
///
/// The table is replaced wholesale on refresh; readers hold an `Arc` to an
/// immutable snapshot, so the lock only guards swapping it.
pub struct MatchCache {
    ttl: Duration,
    slot: RwLock<Option<Snapshot>>,
}

impl MatchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the snapshot while `now` is still inside its TTL.
    pub fn get(&self, now: DateTime<Utc>) -> Option<Arc<Vec<MatchRecord>>> {
        let guard = self.slot.read().unwrap_or_else(|e| e.into_inner());
        let snapshot = guard.as_ref()?;
        if now.signed_duration_since(snapshot.fetched_at) < self.ttl {
            Some(Arc::clone(&snapshot.matches))
        } else {
            None
        }
    }

    pub fn store(&self, matches: Vec<MatchRecord>, now: DateTime<Utc>) -> Arc<Vec<MatchRecord>> {
        let matches = Arc::new(matches);
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Snapshot {
            fetched_at: now,
            matches: Arc::clone(&matches),
        });
        matches
    }

    pub fn invalidate(&self) {
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}
