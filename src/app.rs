//! Application lifecycle for the portfolio viewer
//!
//! `App` owns the content loader and the theme manager. It loads every content
//! category at startup, re-resolves the theme-scoped section when the theme
//! changes, and clears the content cache on shutdown.

use serde_json::Value;
use tracing::info;

use crate::cache::CacheStatus;
use crate::content::{AggregatedContent, ContentLoader};
use crate::theme::{Theme, ThemeManager};

/// Lifecycle state of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Content has not been loaded yet
    Loading,
    /// Content is loaded and can be presented
    Ready,
    /// Torn down; the cache has been cleared
    ShutDown,
}

/// Main application struct managing state and content
#[derive(Debug)]
pub struct App {
    /// Current lifecycle state
    pub state: AppState,
    /// Loaded content, once `start` has run
    content: Option<AggregatedContent>,
    loader: ContentLoader,
    themes: ThemeManager,
}

impl App {
    /// Creates an app in the `Loading` state with `theme` active
    pub fn new(loader: ContentLoader, theme: Theme) -> Self {
        Self {
            state: AppState::Loading,
            content: None,
            loader,
            themes: ThemeManager::new(theme),
        }
    }

    /// Loads all content concurrently and transitions to `Ready`
    pub async fn start(&mut self) {
        let content = self.loader.load_all().await;
        let fallbacks = content.fallback_categories();
        info!(
            theme = %self.themes.current(),
            fallback = fallbacks.len(),
            "Portfolio content loaded"
        );
        self.content = Some(content);
        self.state = AppState::Ready;
    }

    /// Returns the loaded content, if any
    pub fn content(&self) -> Option<&AggregatedContent> {
        self.content.as_ref()
    }

    /// Returns the active theme
    pub fn theme(&self) -> Theme {
        self.themes.current()
    }

    /// Gives access to the theme manager, e.g. to subscribe to changes
    pub fn themes_mut(&mut self) -> &mut ThemeManager {
        &mut self.themes
    }

    /// Switches the theme and refreshes the section it shows
    ///
    /// Returns true when the theme changed.
    pub async fn set_theme(&mut self, theme: Theme) -> bool {
        if !self.themes.set_theme(theme) {
            return false;
        }
        self.refresh_themed_section().await;
        true
    }

    /// Switches to the other theme and returns it
    pub async fn toggle_theme(&mut self) -> Theme {
        let next = self.themes.current().toggled();
        self.set_theme(next).await;
        next
    }

    async fn refresh_themed_section(&mut self) {
        let Some(content) = self.content.as_mut() else {
            return;
        };
        let category = self.themes.current().skills_category();
        let resolved = self.loader.resolve_category(category).await;
        content.replace(category, resolved);
    }

    /// Returns the skills and projects section for the active theme
    pub fn themed_section(&self) -> Option<&Value> {
        let theme = self.themes.current();
        self.content.as_ref().map(|content| content.themed(theme))
    }

    /// Reports the state of the content cache
    pub fn cache_diagnostics(&self) -> Vec<CacheStatus> {
        self.loader.cache_diagnostics()
    }

    /// Tears the app down, dropping cached content
    pub fn shutdown(&mut self) {
        self.loader.clear_cache();
        self.state = AppState::ShutDown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Category, ContentSource, LoaderConfig, Origin, SourceError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Source that echoes the category name and counts fetches
    #[derive(Debug, Default)]
    struct EchoSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for EchoSource {
        async fn fetch(&self, category: Category) -> Result<Value, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "section": category.as_str() }))
        }
    }

    fn create_test_app(theme: Theme) -> (App, Arc<EchoSource>) {
        let source = Arc::new(EchoSource::default());
        let loader = ContentLoader::new(source.clone(), LoaderConfig::default());
        (App::new(loader, theme), source)
    }

    #[tokio::test]
    async fn test_new_app_is_loading_without_content() {
        let (app, _source) = create_test_app(Theme::Light);

        assert_eq!(app.state, AppState::Loading);
        assert!(app.content().is_none());
        assert!(app.themed_section().is_none());
    }

    #[tokio::test]
    async fn test_start_loads_every_category() {
        let (mut app, source) = create_test_app(Theme::Light);

        app.start().await;

        assert_eq!(app.state, AppState::Ready);
        let content = app.content().unwrap();
        for category in Category::ALL {
            assert_eq!(content.origin(category), Origin::Live);
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), Category::COUNT);
        assert_eq!(app.themed_section(), Some(&json!({ "section": "webdev" })));
    }

    #[tokio::test]
    async fn test_theme_change_switches_section_and_notifies() {
        let (mut app, source) = create_test_app(Theme::Light);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        app.themes_mut()
            .subscribe(move |theme| sink.lock().unwrap().push(theme));
        app.start().await;

        assert!(app.set_theme(Theme::Dark).await);

        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(app.themed_section(), Some(&json!({ "section": "cyber" })));
        assert_eq!(app.content().unwrap().origin(Category::Cyber), Origin::Cached);
        assert_eq!(source.calls.load(Ordering::SeqCst), Category::COUNT);
        assert_eq!(*seen.lock().unwrap(), vec![Theme::Dark]);
    }

    #[tokio::test]
    async fn test_set_same_theme_is_noop() {
        let (mut app, _source) = create_test_app(Theme::Dark);
        app.start().await;

        assert!(!app.set_theme(Theme::Dark).await);
        assert_eq!(app.toggle_theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_shutdown_clears_cache() {
        let (mut app, _source) = create_test_app(Theme::Light);
        app.start().await;
        assert_eq!(app.cache_diagnostics().len(), Category::COUNT);

        app.shutdown();

        assert_eq!(app.state, AppState::ShutDown);
        assert!(app.cache_diagnostics().is_empty());
    }
}
