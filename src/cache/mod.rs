//! Cache module for holding fetched content in memory
//!
//! This module provides a content cache that keeps one parsed JSON payload per
//! content category together with the time it was fetched. Entries expire after
//! a fixed window and are then treated as absent, so the next access refetches.

mod clock;
mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{CacheStatus, ContentCache, CACHE_TTL_SECS};
