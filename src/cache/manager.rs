//! In-memory content cache with a fixed expiry window
//!
//! Provides a `ContentCache` that stores parsed JSON payloads keyed by content
//! category, stamped with the time they were fetched.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::clock::{Clock, SystemClock};
use crate::content::Category;

/// How long a cached payload is served before it counts as absent, in seconds (5 minutes)
pub const CACHE_TTL_SECS: i64 = 300;

/// A single cached payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload, shared with every caller that reads it
    payload: Arc<Value>,
    /// When the payload was fetched
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age(now) >= Duration::seconds(CACHE_TTL_SECS)
    }
}

/// Diagnostic snapshot of one cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    /// Category the entry belongs to
    pub category: Category,
    /// When the payload was fetched
    pub fetched_at: DateTime<Utc>,
    /// Time elapsed since the fetch
    pub age: Duration,
    /// Whether the entry is past the expiry window
    pub is_expired: bool,
}

/// Holds fetched content in memory, one entry per category
///
/// Expired entries are never served. They stay in the map (and show up in
/// `status()` as expired) until a refetch replaces them or `clear()` drops
/// everything. There is no capacity bound since the category set is fixed.
#[derive(Debug)]
pub struct ContentCache {
    entries: RwLock<HashMap<Category, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    /// Creates an empty cache that reads the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache with a custom time source
    ///
    /// Useful for testing expiry without sleeping.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Category, CacheEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Category, CacheEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached payload for `category` if present and not expired
    pub fn get(&self, category: Category) -> Option<Arc<Value>> {
        let now = self.clock.now();
        self.read()
            .get(&category)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| Arc::clone(&entry.payload))
    }

    /// Stores `payload` for `category` stamped with the current time
    ///
    /// Any prior entry for the category is replaced unconditionally.
    pub fn set(&self, category: Category, payload: Arc<Value>) {
        let entry = CacheEntry {
            payload,
            fetched_at: self.clock.now(),
        };
        self.write().insert(category, entry);
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Reports age and expiry for every entry, in category order
    pub fn status(&self) -> Vec<CacheStatus> {
        let now = self.clock.now();
        let mut statuses: Vec<CacheStatus> = self
            .read()
            .iter()
            .map(|(category, entry)| CacheStatus {
                category: *category,
                fetched_at: entry.fetched_at,
                age: entry.age(now),
                is_expired: entry.is_expired(now),
            })
            .collect();
        statuses.sort_by_key(|s| s.category);
        statuses
    }

    /// Returns the number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn create_test_cache() -> (ContentCache, ManualClock) {
        let clock = ManualClock::default();
        let cache = ContentCache::with_clock(Arc::new(clock.clone()));
        (cache, clock)
    }

    #[test]
    fn test_get_returns_none_for_missing_category() {
        let (cache, _clock) = create_test_cache();

        assert!(cache.get(Category::Books).is_none());
    }

    #[test]
    fn test_get_returns_same_payload_within_window() {
        let (cache, clock) = create_test_cache();
        let payload = Arc::new(json!([{"title": "The Art of War", "author": "Sun Tzu"}]));

        cache.set(Category::Books, Arc::clone(&payload));
        clock.advance(Duration::seconds(1));

        let cached = cache.get(Category::Books).expect("fresh entry should hit");
        assert!(Arc::ptr_eq(&cached, &payload));
    }

    #[test]
    fn test_get_misses_once_window_elapses() {
        let (cache, clock) = create_test_cache();
        cache.set(Category::Quotes, Arc::new(json!([])));

        clock.advance(Duration::seconds(299));
        assert!(cache.get(Category::Quotes).is_some());

        clock.advance(Duration::seconds(1));
        assert!(cache.get(Category::Quotes).is_none(), "entry at exactly 5 minutes is expired");
    }

    #[test]
    fn test_set_replaces_existing_entry_and_timestamp() {
        let (cache, clock) = create_test_cache();
        cache.set(Category::User, Arc::new(json!({"name": "first"})));

        clock.advance(Duration::seconds(400));
        cache.set(Category::User, Arc::new(json!({"name": "second"})));

        let cached = cache.get(Category::User).expect("replaced entry should be fresh");
        assert_eq!(*cached, json!({"name": "second"}));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (cache, _clock) = create_test_cache();
        cache.set(Category::User, Arc::new(json!({})));
        cache.set(Category::Books, Arc::new(json!([])));

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get(Category::User).is_none());
        assert!(cache.status().is_empty());
    }

    #[test]
    fn test_status_reports_age_and_expiry() {
        let (cache, clock) = create_test_cache();
        cache.set(Category::Cyber, Arc::new(json!({})));
        clock.advance(Duration::seconds(200));
        cache.set(Category::Books, Arc::new(json!([])));
        clock.advance(Duration::seconds(150));

        let status = cache.status();

        assert_eq!(status.len(), 2);
        let books = status.iter().find(|s| s.category == Category::Books).unwrap();
        assert_eq!(books.age, Duration::seconds(150));
        assert!(!books.is_expired);
        let cyber = status.iter().find(|s| s.category == Category::Cyber).unwrap();
        assert_eq!(cyber.age, Duration::seconds(350));
        assert!(cyber.is_expired);
    }

    #[test]
    fn test_status_is_sorted_by_category() {
        let (cache, _clock) = create_test_cache();
        cache.set(Category::Quotes, Arc::new(json!([])));
        cache.set(Category::User, Arc::new(json!({})));

        let order: Vec<Category> = cache.status().iter().map(|s| s.category).collect();
        assert_eq!(order, vec![Category::User, Category::Quotes]);
    }
}
