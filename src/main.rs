//! folio - preview a portfolio site's content
//!
//! Loads every content category from a site directory or base URL, falling back
//! to built-in content where a document is missing or broken, and prints a
//! summary or the raw JSON.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use reqwest::Client;
use tracing::warn;

use folio::app::App;
use folio::cli::{Cli, OutputMode, SourceLocation, StartupConfig};
use folio::content::{ContentLoader, ContentSource, DirSource, HttpSource};
use folio::report;
use folio::telemetry;
use folio::theme::{Theme, ThemeStore};

/// Builds the content source for the configured location
fn build_source(location: &SourceLocation) -> Arc<dyn ContentSource> {
    match location {
        SourceLocation::Url(url) => Arc::new(HttpSource::with_base_url(Client::new(), url.clone())),
        SourceLocation::Dir(dir) => Arc::new(DirSource::new(dir.clone())),
    }
}

/// Picks the theme from the command line, then the stored preference, then the default
fn resolve_theme(config: &StartupConfig, store: Option<&ThemeStore>) -> Theme {
    config
        .theme
        .or_else(|| store.and_then(ThemeStore::load))
        .unwrap_or_default()
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = ThemeStore::new();
    let theme = resolve_theme(&config, store.as_ref());
    if config.save_theme {
        match &store {
            Some(store) => store.save(theme)?,
            None => warn!("No config directory available, theme preference not saved"),
        }
    }

    let loader = ContentLoader::new(build_source(&config.source), config.loader.clone());
    let mut app = App::new(loader, theme);
    app.start().await;

    let mut stdout = io::stdout().lock();
    if let Some(content) = app.content() {
        match config.output {
            OutputMode::Summary => write!(stdout, "{}", report::render_summary(content, theme))?,
            OutputMode::Json => {
                serde_json::to_writer_pretty(&mut stdout, content)?;
                writeln!(stdout)?;
            }
            OutputMode::Category(category) => {
                serde_json::to_writer_pretty(&mut stdout, content.get(category))?;
                writeln!(stdout)?;
            }
        }
    }

    if config.diagnostics {
        write!(stdout, "{}", report::render_diagnostics(&app.cache_diagnostics()))?;
    }
    stdout.flush()?;

    app.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(config.verbosity);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
