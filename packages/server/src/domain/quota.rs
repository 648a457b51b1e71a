//! Process-wide daily execution quota.

use std::collections::HashMap;

use tokio::sync::Mutex;

/// Counts execution attempts per UTC calendar day against a fixed ceiling.
///
/// A new day simply starts a new counter; counters for past days are kept
/// for the lifetime of the process.
#[derive(Debug)]
pub struct DailyQuota {
    ceiling: u32,
    counts: Mutex<HashMap<String, u32>>,
}

impl DailyQuota {
    pub fn new(ceiling: u32) -> Self {
        Self {
            ceiling,
            counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Record one attempt for `date_key` and return the count including it.
    ///
    /// The increment and the read happen under one lock, so concurrent
    /// callers each observe a distinct count.
    pub async fn record_attempt(&self, date_key: &str) -> u32 {
        let mut counts = self.counts.lock().await;
        let count = counts.entry(date_key.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Whether a post-increment count is over the ceiling.
    pub fn is_exceeded(&self, attempts: u32) -> bool {
        attempts > self.ceiling
    }

    /// Attempts recorded so far for `date_key`.
    pub async fn attempts(&self, date_key: &str) -> u32 {
        let counts = self.counts.lock().await;
        counts.get(date_key).copied().unwrap_or(0)
    }
}
