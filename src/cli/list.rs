//! List command implementation.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rustc_hash::FxHashSet;

use crate::config::PlaygroundConfig;
use crate::log;
use crate::playground::document::FileKey;
use crate::playground::index::parse_index;
use crate::utils::plural_count;

/// Execute list command
pub fn run_list(config: &PlaygroundConfig) -> Result<()> {
    let index_path = config.index_path();
    let text = fs::read_to_string(&index_path)
        .with_context(|| format!("failed to read index {}", index_path.display()))?;

    let entries = parse_index(&text);
    if entries.is_empty() {
        log!("list"; "{} lists no documents", index_path.display());
        return Ok(());
    }

    for line in render_listing(&entries, |key| config.collection.dir.join(key.as_str()).is_file()) {
        println!("{line}");
    }
    log!("list"; "{}", plural_count(entries.len(), "document"));
    Ok(())
}

/// One line per entry; the first is the default. Missing files and repeated
/// entries are flagged.
fn render_listing(entries: &[FileKey], exists: impl Fn(&FileKey) -> bool) -> Vec<String> {
    let mut seen = FxHashSet::default();
    entries
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let marker = if i == 0 { "*" } else { " " };
            let mut line = format!("{} {}  {}", marker, key, key.route().dimmed());
            if !exists(key) {
                line.push_str(&format!("  {}", "(missing)".yellow()));
            }
            if !seen.insert(key.as_str()) {
                line.push_str(&format!("  {}", "(duplicate)".yellow()));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_marks_default_and_missing() {
        owo_colors::set_override(false);
        let entries = parse_index("# demos\n- a.tsx\n- b.js\n");
        let lines = render_listing(&entries, |key| key.as_str() == "a.tsx");

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("* a.tsx"));
        assert!(lines[0].contains("/playground/a.tsx"));
        assert!(!lines[0].contains("missing"));
        assert!(lines[1].starts_with("  b.js"));
        assert!(lines[1].contains("(missing)"));
    }

    #[test]
    fn test_listing_flags_duplicates() {
        owo_colors::set_override(false);
        let entries = parse_index("a.js\nb.js\na.js\n");
        let lines = render_listing(&entries, |_| true);
        assert!(!lines[0].contains("duplicate"));
        assert!(lines[2].contains("(duplicate)"));
    }
}
