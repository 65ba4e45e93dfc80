//! Core content models for the portfolio loader
//!
//! This module contains the content categories a portfolio site is split into,
//! the tagged result of resolving one category, and the aggregated content
//! object handed to presentation code.

pub mod fallback;
pub mod loader;
pub mod source;

pub use fallback::{fallback_content, fallback_payload};
pub use loader::{ContentLoader, LoaderConfig, DEFAULT_FETCH_TIMEOUT};
pub use source::{parse_base_url, ContentSource, DirSource, HttpSource, SourceError};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::theme::Theme;

/// Directory, relative to the site root, holding one JSON document per category
pub const DATA_DIR: &str = "data";

/// One independently fetchable JSON document of portfolio content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Profile of the site owner
    User,
    /// Web development skills and projects (light theme)
    Webdev,
    /// Security skills and projects (dark theme)
    Cyber,
    /// Reading list
    Books,
    /// Heroes, interests and hobbies
    Interests,
    /// Favourite quotes
    Quotes,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 6;

    /// Every category, in display order
    pub const ALL: [Category; Category::COUNT] = [
        Category::User,
        Category::Webdev,
        Category::Cyber,
        Category::Books,
        Category::Interests,
        Category::Quotes,
    ];

    /// Returns the lowercase name used in document paths and JSON keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::User => "user",
            Category::Webdev => "webdev",
            Category::Cyber => "cyber",
            Category::Books => "books",
            Category::Interests => "interests",
            Category::Quotes => "quotes",
        }
    }

    /// Returns a human-readable section title
    pub fn label(&self) -> &'static str {
        match self {
            Category::User => "Profile",
            Category::Webdev => "Web Development",
            Category::Cyber => "Cybersecurity",
            Category::Books => "Books",
            Category::Interests => "Interests",
            Category::Quotes => "Quotes",
        }
    }

    /// Position of this category in `Category::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Path of this category's document relative to the site root, e.g. `data/books.json`
    pub fn document_path(&self) -> String {
        format!("{}/{}.json", DATA_DIR, self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// How a payload was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Freshly fetched from the content source
    Live,
    /// Served from the in-memory cache
    Cached,
    /// Built-in content used because the fetch failed
    Fallback,
}

impl Origin {
    /// Returns the lowercase name shown in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Live => "live",
            Origin::Cached => "cached",
            Origin::Fallback => "fallback",
        }
    }
}

/// A resolved payload tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Parsed document, shared with the cache
    pub payload: Arc<Value>,
    /// Where `payload` came from
    pub origin: Origin,
}

impl Resolved {
    /// Payload freshly fetched from the source
    pub fn live(payload: Arc<Value>) -> Self {
        Self {
            payload,
            origin: Origin::Live,
        }
    }

    /// Payload served from the cache
    pub fn cached(payload: Arc<Value>) -> Self {
        Self {
            payload,
            origin: Origin::Cached,
        }
    }

    /// Built-in payload for `category`
    pub fn fallback(category: Category) -> Self {
        Self {
            payload: Arc::new(fallback_payload(category)),
            origin: Origin::Fallback,
        }
    }

    /// Whether this payload is the built-in substitute
    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }
}

/// Every content category mapped to its resolved payload
///
/// Holds exactly one entry per category, so lookups never miss. Serializes to
/// a JSON object keyed by category name with the bare payloads as values.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedContent {
    entries: [Resolved; Category::COUNT],
}

impl AggregatedContent {
    /// Builds the aggregate by resolving each category with `resolve`
    pub fn from_fn(mut resolve: impl FnMut(Category) -> Resolved) -> Self {
        Self {
            entries: std::array::from_fn(|i| resolve(Category::ALL[i])),
        }
    }

    /// Returns the resolved entry for `category`
    pub fn resolved(&self, category: Category) -> &Resolved {
        &self.entries[category.index()]
    }

    /// Returns the payload for `category`
    pub fn get(&self, category: Category) -> &Value {
        &self.resolved(category).payload
    }

    /// Returns the shared payload handle for `category`
    pub fn payload(&self, category: Category) -> Arc<Value> {
        Arc::clone(&self.resolved(category).payload)
    }

    /// Returns how the payload for `category` was obtained
    pub fn origin(&self, category: Category) -> Origin {
        self.resolved(category).origin
    }

    /// Replaces the entry for `category`
    pub fn replace(&mut self, category: Category, resolved: Resolved) {
        self.entries[category.index()] = resolved;
    }

    /// Categories currently showing built-in content
    pub fn fallback_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.resolved(*c).is_fallback())
            .collect()
    }

    /// Returns the skills and projects section for the active theme
    pub fn themed(&self, theme: Theme) -> &Value {
        self.get(theme.skills_category())
    }

    /// Iterates categories with their resolved entries, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Resolved)> {
        Category::ALL.into_iter().zip(self.entries.iter())
    }

    /// Converts to a JSON object keyed by category name
    pub fn to_json(&self) -> Value {
        let map = self
            .iter()
            .map(|(category, resolved)| (category.as_str().to_string(), (*resolved.payload).clone()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for AggregatedContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, resolved) in self.iter() {
            map.serialize_entry(category.as_str(), resolved.payload.as_ref())?;
        }
        map.end()
    }
}
