//! Plain-text presentation of loaded content and cache state

use serde_json::Value;
use std::fmt::Write;

use crate::cache::CacheStatus;
use crate::content::{AggregatedContent, Category};
use crate::theme::Theme;

/// Short description of a payload's size, e.g. `3 items` or `projects: 1, skills: 3`
pub fn describe_payload(value: &Value) -> String {
    match value {
        Value::Array(items) => plural(items.len(), "item"),
        Value::Object(map) => {
            let sections: Vec<String> = map
                .iter()
                .filter_map(|(key, value)| {
                    value
                        .as_array()
                        .map(|items| format!("{}: {}", key, items.len()))
                })
                .collect();
            if sections.is_empty() {
                plural(map.len(), "field")
            } else {
                sections.join(", ")
            }
        }
        Value::Null => "empty".to_string(),
        _ => "scalar".to_string(),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Renders one line per category with its origin and size
///
/// The section shown by the active theme is marked with `*`; the section
/// belonging to the other theme is listed but not marked.
pub fn render_summary(content: &AggregatedContent, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Portfolio content (theme: {})", theme);

    for (category, resolved) in content.iter() {
        let marker = if category == theme.skills_category() { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<16} {:<10} {:<9} {}",
            marker,
            category.label(),
            category.as_str(),
            resolved.origin.label(),
            describe_payload(&resolved.payload)
        );
    }

    let fallbacks = content.fallback_categories();
    if !fallbacks.is_empty() {
        let names: Vec<&str> = fallbacks.iter().map(Category::as_str).collect();
        let _ = writeln!(out, "Using built-in content for: {}", names.join(", "));
    }
    out
}

/// Renders one line per cache entry with its age and freshness
pub fn render_diagnostics(statuses: &[CacheStatus]) -> String {
    if statuses.is_empty() {
        return "Cache: empty\n".to_string();
    }

    let mut out = String::from("Cache:\n");
    for status in statuses {
        let _ = writeln!(
            out,
            "  {:<10} age {:>4}s  {}",
            status.category.as_str(),
            status.age.num_seconds(),
            if status.is_expired { "expired" } else { "fresh" }
        );
    }
    out
}
