//! Content sources for portfolio JSON documents
//!
//! A source knows how to turn a category into a parsed JSON document. The site
//! can be served over HTTP (`HttpSource`) or read straight from a checkout of
//! the site on disk (`DirSource`). Both address the document for a category at
//! `data/<category>.json` below their root.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::Category;

/// Errors that can occur when fetching a content document
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Reading the document from disk failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Body was not valid JSON
    #[error("failed to parse JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL or document URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetch did not finish in time
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Fetches the JSON document for a content category
#[async_trait]
pub trait ContentSource: Debug + Send + Sync {
    /// Fetches and parses the document for `category`
    async fn fetch(&self, category: Category) -> Result<Value, SourceError>;
}

/// Fetches documents over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

/// Parses a site base URL, adding a trailing slash when missing
///
/// Without the slash, document paths would replace the last path segment of
/// the base instead of resolving below it.
pub fn parse_base_url(base_url: &str) -> Result<Url, SourceError> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base_url, e)))
}

impl HttpSource {
    /// Creates a source rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a source with a custom HTTP client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self::with_base_url(client, parse_base_url(base_url)?))
    }

    /// Creates a source from an already parsed base URL
    pub fn with_base_url(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Returns the URL of the document for `category`
    pub fn document_url(&self, category: Category) -> Result<Url, SourceError> {
        self.base_url
            .join(&category.document_path())
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, category: Category) -> Result<Value, SourceError> {
        let url = self.document_url(category)?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Reads documents from a site directory on disk
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at the site directory `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file path of the document for `category`
    pub fn document_path(&self, category: Category) -> PathBuf {
        self.root
            .join(super::DATA_DIR)
            .join(format!("{}.json", category.as_str()))
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn fetch(&self, category: Category) -> Result<Value, SourceError> {
        let path = self.document_path(category);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })?;
        Ok(serde_json::from_str(&text)?)
    }
}
