//! Theme selection, change notification and the stored theme preference
//!
//! The active theme decides which skills and projects section a portfolio
//! shows: web development in the light theme, security in the dark theme.
//! `ThemeManager` keeps the current theme and notifies subscribers when it
//! changes. `ThemeStore` persists the user's choice as a single small file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::Category;

/// File name of the stored theme preference
const THEME_FILE: &str = "theme.json";

/// Visual theme of the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the lowercase name used on the command line and in the preference file
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Returns the other theme
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Category holding the skills and projects shown in this theme
    pub fn skills_category(&self) -> Category {
        match self {
            Theme::Light => Category::Webdev,
            Theme::Dark => Category::Cyber,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known theme
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: '{0}'. Valid themes: light, dark")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Handle returned by `ThemeManager::subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(Theme) + Send + Sync>;

/// Holds the active theme and notifies subscribers when it changes
pub struct ThemeManager {
    current: Theme,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl ThemeManager {
    /// Creates a manager with `initial` active and no subscribers
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the active theme
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Registers `listener` to be called with the new theme on every change
    pub fn subscribe(&mut self, listener: impl Fn(Theme) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscriber; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Switches to `theme`, notifying subscribers if it differs from the current one
    ///
    /// Returns true when the theme changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.current {
            return false;
        }
        debug!(from = %self.current, to = %theme, "Theme changed");
        self.current = theme;
        self.notify();
        true
    }

    /// Switches to the other theme and returns it
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set_theme(next);
        next
    }

    /// Calls every subscriber with the current theme
    ///
    /// A subscriber that panics is logged and skipped; the rest still run.
    fn notify(&self) {
        let theme = self.current;
        for (id, listener) in &self.listeners {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(theme))).is_err() {
                warn!(subscriber = id.0, %theme, "Theme subscriber panicked");
            }
        }
    }
}

/// Errors that can occur when persisting the theme preference
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("failed to write theme preference: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode theme preference: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

/// Persists the chosen theme to disk
///
/// Stores a single JSON file in an XDG-compliant config directory
/// (`~/.config/folio/` on Linux).
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    /// Creates a store in the user's config directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "folio")?;
        Some(Self {
            dir: project_dirs.config_dir().to_path_buf(),
        })
    }

    /// Creates a store in a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(THEME_FILE)
    }

    /// Reads the stored theme
    ///
    /// Returns `None` if nothing was stored or the file cannot be parsed.
    pub fn load(&self) -> Option<Theme> {
        let content = fs::read_to_string(self.path()).ok()?;
        let stored: StoredPreference = serde_json::from_str(&content).ok()?;
        Some(stored.theme)
    }

    /// Stores `theme`, replacing any previous preference
    pub fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(&StoredPreference { theme })?;
        fs::write(self.path(), json)?;
        Ok(())
    }
}
