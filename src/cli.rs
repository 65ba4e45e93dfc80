//! Command-line interface parsing for folio
//!
//! This module handles parsing of CLI arguments using clap and folds them into
//! a `StartupConfig` describing where content comes from and how to show it.

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::content::{parse_base_url, Category, LoaderConfig, SourceError, UnknownCategory};
use crate::theme::{Theme, UnknownTheme};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified theme name is not recognized
    #[error("Invalid theme: {0}")]
    InvalidTheme(#[from] UnknownTheme),

    /// The specified category name is not recognized
    #[error("Invalid category: {0}. Valid categories: user, webdev, cyber, books, interests, quotes")]
    InvalidCategory(#[from] UnknownCategory),

    /// The source looks like a URL but cannot be used as a base URL
    #[error("Invalid source: {0}")]
    InvalidSource(#[from] SourceError),
}

/// folio - Load and preview portfolio site content
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Load portfolio content with caching and built-in fallback")]
#[command(version)]
pub struct Cli {
    /// Site root: a directory containing data/*.json, or an http(s) base URL
    #[arg(long, env = "FOLIO_SOURCE", default_value = ".", value_name = "DIR|URL")]
    pub source: String,

    /// Theme to show: light or dark (defaults to the saved preference, then light)
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Persist the selected theme as the new preference
    #[arg(long, requires = "theme")]
    pub save_theme: bool,

    /// Print only this category's payload as JSON
    ///
    /// Valid categories: user, webdev, cyber, books, interests, quotes
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Print all content as JSON instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Print cache diagnostics after loading
    #[arg(long)]
    pub diagnostics: bool,

    /// Seconds allowed per document fetch
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Where portfolio content is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Base URL of a served site
    Url(Url),
    /// Directory holding a checkout of the site
    Dir(PathBuf),
}

impl SourceLocation {
    /// Treats `http://` and `https://` values as URLs and anything else as a directory
    ///
    /// A value with a URL scheme that does not parse is an error rather than a
    /// directory, so a mistyped URL never reads local files.
    pub fn parse(value: &str) -> Result<Self, CliError> {
        let lower = value.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(SourceLocation::Url(parse_base_url(value)?))
        } else {
            Ok(SourceLocation::Dir(PathBuf::from(value)))
        }
    }
}

/// What to print once content is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One line per category
    #[default]
    Summary,
    /// Entire aggregated content as JSON
    Json,
    /// A single category's payload as JSON
    Category(Category),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Where content documents are read from
    pub source: SourceLocation,
    /// Theme requested on the command line, if any
    pub theme: Option<Theme>,
    /// Whether to persist `theme` as the stored preference
    pub save_theme: bool,
    /// What to print once content is loaded
    pub output: OutputMode,
    /// Whether to print cache diagnostics after loading
    pub diagnostics: bool,
    /// Fetch settings passed to the content loader
    pub loader: LoaderConfig,
    /// Number of `-v` flags given
    pub verbosity: u8,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            source: SourceLocation::Dir(PathBuf::from(".")),
            theme: None,
            save_theme: false,
            output: OutputMode::default(),
            diagnostics: false,
            loader: LoaderConfig::default(),
            verbosity: 0,
        }
    }
}

/// Parses a theme string argument into a Theme.
pub fn parse_theme_arg(s: &str) -> Result<Theme, CliError> {
    Ok(s.parse::<Theme>()?)
}

/// Parses a category string argument into a Category.
pub fn parse_category_arg(s: &str) -> Result<Category, CliError> {
    Ok(s.parse::<Category>()?)
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid theme, category or source URL was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let theme = cli.theme.as_deref().map(parse_theme_arg).transpose()?;

        let output = match &cli.category {
            Some(name) => OutputMode::Category(parse_category_arg(name)?),
            None if cli.json => OutputMode::Json,
            None => OutputMode::Summary,
        };

        // A zero timeout would fail every fetch, so treat it as "no limit".
        let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));

        Ok(StartupConfig {
            source: SourceLocation::parse(&cli.source)?,
            theme,
            save_theme: cli.save_theme,
            output,
            diagnostics: cli.diagnostics,
            loader: LoaderConfig { timeout },
            verbosity: cli.verbose,
        })
    }
}
