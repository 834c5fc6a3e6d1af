// In-memory answer cache using DashMap
use crate::domain::model::Scalar;
use dashmap::DashMap;
use std::time::{Duration, Instant};

struct CachedAnswer {
    value: Scalar,
    stored_at: Instant,
}

/// Thread-safe answer cache keyed on the exact SQL text.
///
/// Entries older than `ttl` are never returned and are evicted on lookup.
pub struct AnswerCache {
    map: DashMap<String, CachedAnswer>,
    ttl: Duration,
}

impl AnswerCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, sql: &str) -> Option<Scalar> {
        self.get_at(sql, Instant::now())
    }

    pub fn get_at(&self, sql: &str, now: Instant) -> Option<Scalar> {
        // The read guard must be released before removing the key
        let expired = match self.map.get(sql) {
            Some(entry) if now.saturating_duration_since(entry.stored_at) < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.map.remove(sql);
        }
        None
    }

    pub fn insert(&self, sql: String, value: Scalar) {
        self.insert_at(sql, value, Instant::now());
    }

    pub fn insert_at(&self, sql: String, value: Scalar, stored_at: Instant) {
        self.map.insert(sql, CachedAnswer { value, stored_at });
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}
