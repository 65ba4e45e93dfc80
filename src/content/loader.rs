//! Content loader with caching and built-in fallback
//!
//! `ContentLoader` resolves each content category through the in-memory cache,
//! fetching from its `ContentSource` on a miss. A failed fetch never reaches the
//! caller: the category resolves to its built-in payload instead and the cache
//! is left untouched, so the next call tries the source again.

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::fallback::fallback_content;
use super::source::{ContentSource, SourceError};
use super::{AggregatedContent, Category, Resolved};
use crate::cache::{CacheStatus, ContentCache};

/// Default time allowed for a single document fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the content loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Upper bound on a single fetch; `None` waits as long as the source does
    pub timeout: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }
}

#[derive(Debug)]
struct LoaderInner {
    source: Arc<dyn ContentSource>,
    cache: ContentCache,
    config: LoaderConfig,
    /// Serializes the cache-check, fetch, cache-store sequence per category
    in_flight: [Mutex<()>; Category::COUNT],
}

/// Loads portfolio content, one category at a time or all at once
///
/// Cloning is cheap and clones share the same cache and source.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    inner: Arc<LoaderInner>,
}

impl ContentLoader {
    /// Creates a loader with an empty cache
    pub fn new(source: Arc<dyn ContentSource>, config: LoaderConfig) -> Self {
        Self::with_cache(source, ContentCache::new(), config)
    }

    /// Creates a loader around an existing cache
    ///
    /// Useful for testing with a manual clock.
    pub fn with_cache(source: Arc<dyn ContentSource>, cache: ContentCache, config: LoaderConfig) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                source,
                cache,
                config,
                in_flight: std::array::from_fn(|_| Mutex::new(())),
            }),
        }
    }

    /// Returns the payload for `category`
    ///
    /// Never fails: a cached or freshly fetched payload when possible, the
    /// built-in payload otherwise.
    pub async fn load_category(&self, category: Category) -> Arc<Value> {
        self.resolve_category(category).await.payload
    }

    /// Resolves `category` and reports whether the payload is live, cached or built-in
    ///
    /// # Behavior
    /// - Fresh cache entry: returned without touching the source
    /// - Missing or expired entry: fetched, stored in the cache, returned
    /// - Fetch failure: logged, built-in payload returned, cache unchanged
    pub async fn resolve_category(&self, category: Category) -> Resolved {
        let inner = &self.inner;

        if let Some(payload) = inner.cache.get(category) {
            debug!(%category, "Serving content from cache");
            return Resolved::cached(payload);
        }

        let _guard = inner.in_flight[category.index()].lock().await;

        // A concurrent caller may have stored the entry while we waited.
        if let Some(payload) = inner.cache.get(category) {
            debug!(%category, "Serving content refreshed by concurrent load");
            return Resolved::cached(payload);
        }

        match self.fetch(category).await {
            Ok(value) => {
                debug!(%category, "Fetched content");
                let payload = Arc::new(value);
                inner.cache.set(category, Arc::clone(&payload));
                Resolved::live(payload)
            }
            Err(e) => {
                warn!(%category, error = %e, "Failed to load content, using built-in data");
                Resolved::fallback(category)
            }
        }
    }

    async fn fetch(&self, category: Category) -> Result<Value, SourceError> {
        let fetch = self.inner.source.fetch(category);
        match self.inner.config.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| SourceError::Timeout(limit))?,
            None => fetch.await,
        }
    }

    /// Resolves every category concurrently
    ///
    /// Each category is loaded in its own task; one failing category never
    /// delays or fails the others. If a task dies outright the whole result is
    /// replaced by the built-in content.
    pub async fn load_all(&self) -> AggregatedContent {
        let tasks = Category::ALL.into_iter().map(|category| {
            let loader = self.clone();
            tokio::spawn(async move { (category, loader.resolve_category(category).await) })
        });

        let mut slots: [Option<Resolved>; Category::COUNT] = Default::default();
        for result in join_all(tasks).await {
            match result {
                Ok((category, resolved)) => slots[category.index()] = Some(resolved),
                Err(e) => {
                    error!(error = %e, "Content aggregation failed, using built-in data");
                    return fallback_content();
                }
            }
        }

        AggregatedContent::from_fn(|category| {
            slots[category.index()]
                .take()
                .unwrap_or_else(|| Resolved::fallback(category))
        })
    }

    /// Drops every cached payload
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Reports age and expiry of every cached payload
    pub fn cache_diagnostics(&self) -> Vec<CacheStatus> {
        self.inner.cache.status()
    }
}
