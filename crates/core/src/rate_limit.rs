//! Sliding-window rate limiter.
//!
//! State is owned by the value, not the process: the request layer holds one
//! instance in its shared state and tests construct (and reset) their own.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` and report whether it is within the limit.
    ///
    /// Hits older than the window are pruned first; a rejected call does not
    /// consume budget.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let entry = hits.entry(key.to_string()).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);
        if entry.len() >= self.limit {
            return false;
        }
        entry.push(now);
        true
    }

    /// Drop all recorded hits for all keys.
    pub fn reset(&self) {
        self.hits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
