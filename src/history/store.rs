//! Recent-search history.
//!
//! Bounded, deduplicated, most-recent-first. The list is written through to
//! the session scope after every change, so the stored JSON always matches
//! the in-memory state and the scope's lifetime bounds the history's.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::history::session::SessionScope;
use crate::observability::metrics;

/// Storage key for the serialized history list.
pub const HISTORY_KEY: &str = "sanctionSearchHistory";

/// Maximum retained entries; the oldest is evicted beyond this.
pub const MAX_ENTRIES: usize = 10;

/// One recorded search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    /// Unique, time-ordered id (UUID v7).
    pub id: String,
    pub query: String,
    pub result_count: u64,
    pub timestamp: DateTime<Utc>,
}

/// Session-scoped cache of recent queries.
pub struct SearchHistoryStore {
    scope: Arc<dyn SessionScope>,
    entries: Mutex<Vec<SearchHistoryEntry>>,
}

impl SearchHistoryStore {
    /// Create a store backed by `scope`, restoring any history already
    /// present there. Unreadable stored state is discarded, not an error.
    pub fn new(scope: Arc<dyn SessionScope>) -> Self {
        let entries = match scope.get(HISTORY_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable search history");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            scope,
            entries: Mutex::new(entries),
        }
    }

    /// Record a completed search.
    ///
    /// An earlier entry with the same query (case-sensitive) is evicted,
    /// the new entry is prepended, and the list is truncated to
    /// [`MAX_ENTRIES`].
    pub fn add(&self, query: &str, result_count: u64) -> SearchHistoryEntry {
        let entry = SearchHistoryEntry {
            id: Uuid::now_v7().to_string(),
            query: query.to_string(),
            result_count,
            timestamp: Utc::now(),
        };

        let mut entries = self.lock();
        entries.retain(|existing| existing.query != entry.query);
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);
        self.persist(&entries);
        metrics::record_history_size(entries.len());
        entry
    }

    /// Entries most-recent-first.
    pub fn list(&self) -> Vec<SearchHistoryEntry> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SearchHistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &[SearchHistoryEntry]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.scope.set(HISTORY_KEY, json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize search history"),
        }
    }
}
