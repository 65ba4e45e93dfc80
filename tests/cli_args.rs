//! Integration tests for CLI argument handling
//!
//! Runs the binary against temporary site directories, so no network is needed.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .env_remove("FOLIO_SOURCE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute folio")
}

fn create_site(documents: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let data = temp_dir.path().join("data");
    fs::create_dir_all(&data).expect("Failed to create data dir");
    for (name, body) in documents {
        fs::write(data.join(format!("{}.json", name)), body).expect("Failed to write document");
    }
    temp_dir
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("folio"), "Help should mention folio");
    assert!(stdout.contains("--theme"), "Help should mention --theme flag");
    assert!(stdout.contains("--source"), "Help should mention --source flag");
}

#[test]
fn test_invalid_theme_prints_error_and_exits() {
    let output = run_cli(&["--theme", "neon"]);
    assert!(!output.status.success(), "Expected invalid theme to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid theme") && stderr.contains("neon"),
        "Should print error message about invalid theme: {}",
        stderr
    );
}

#[test]
fn test_invalid_category_prints_error_and_exits() {
    let output = run_cli(&["--category", "hobbies"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid category"), "stderr: {}", stderr);
}

#[test]
fn test_source_url_without_host_is_rejected() {
    // The working directory holds a readable site, which must not be used instead.
    let site = create_site(&[("user", r#"{"name":"Local Only"}"#)]);

    let output = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(["--source", "http://", "--category", "user"])
        .current_dir(site.path())
        .env_remove("FOLIO_SOURCE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute folio");

    assert!(!output.status.success(), "Expected unusable source URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid source"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Local Only"), "stdout: {}", stdout);
}

#[test]
fn test_category_output_prints_live_document() {
    let site = create_site(&[("books", r#"[{"title":"The Art of War","author":"Sun Tzu"}]"#)]);
    let source = path_arg(site.path());

    let output = run_cli(&["--source", &source, "--category", "books"]);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value[0]["author"], "Sun Tzu");
}

#[test]
fn test_missing_site_falls_back_and_still_succeeds() {
    let site = create_site(&[]);
    let source = path_arg(site.path());

    let output = run_cli(&["--source", &source, "--category", "cyber"]);

    assert!(output.status.success(), "Missing documents must not fail the run");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["skills"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["projects"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_json_output_contains_every_category() {
    let site = create_site(&[("user", r#"{"name":"Sam"}"#), ("quotes", "[not json")]);
    let source = path_arg(site.path());

    let output = run_cli(&["--source", &source, "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let object = value.as_object().expect("aggregate should be an object");
    for name in ["user", "webdev", "cyber", "books", "interests", "quotes"] {
        assert!(object.contains_key(name), "missing {}", name);
    }
    assert_eq!(value["user"]["name"], "Sam");
}

#[test]
fn test_summary_with_dark_theme_and_diagnostics() {
    let site = create_site(&[("cyber", r#"{"skills":[],"projects":[]}"#)]);
    let source = path_arg(site.path());

    let output = run_cli(&["--source", &source, "--theme", "dark", "--diagnostics"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("theme: dark"));
    assert!(stdout
        .lines()
        .any(|l| l.starts_with('*') && l.contains("cyber") && l.contains("live")));
    assert!(stdout.contains("Using built-in content for:"));
    assert!(stdout.contains("Cache:"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use folio::cli::{parse_category_arg, parse_theme_arg, Cli, OutputMode, StartupConfig};
    use folio::content::Category;
    use folio::theme::Theme;

    #[test]
    fn test_cli_theme_flag() {
        let cli = Cli::parse_from(["folio", "--theme", "dark"]);
        assert_eq!(cli.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_parse_theme_arg_valid_and_invalid() {
        assert_eq!(parse_theme_arg("light").unwrap(), Theme::Light);
        assert!(parse_theme_arg("blue").is_err());
    }

    #[test]
    fn test_parse_category_arg_valid() {
        assert_eq!(parse_category_arg("interests").unwrap(), Category::Interests);
    }

    #[test]
    fn test_startup_config_from_cli_category() {
        let cli = Cli::parse_from(["folio", "--category", "quotes"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.output, OutputMode::Category(Category::Quotes));
    }
}
