//! Collection index parsing.
//!
//! The index is a newline-delimited list of file keys:
//!
//! ```text
//! # demos shipped with the playground
//! - counter.tsx
//! - hooks/timer.tsx   # trailing comments are fine
//! plain.js
//! ```
//!
//! `#` starts a comment anywhere on a line, entries may carry a `- ` bullet,
//! and blank lines are ignored. Entries that are not valid keys are skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::document::FileKey;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#.*").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-[ \t]*").unwrap());

/// Parse index text into the declared entries, in order.
pub fn parse_index(text: &str) -> Vec<FileKey> {
    text.lines()
        .map(|line| COMMENT.replace(line, ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| BULLET.replace(&line, "").into_owned())
        .filter_map(|entry| match FileKey::parse(&entry) {
            Ok(key) => Some(key),
            Err(e) => {
                crate::debug!("index"; "skipping entry: {}", e);
                None
            }
        })
        .collect()
}

/// The default document: the first declared entry.
pub fn default_entry(text: &str) -> Option<FileKey> {
    parse_index(text).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_skips_comments_and_blanks() {
        let key = default_entry("# comment\n- alpha.tsx\n- beta.tsx\n\n").unwrap();
        assert_eq!(key.as_str(), "alpha.tsx");
    }

    #[test]
    fn test_parse_index_order_and_bullets() {
        let keys = parse_index("- a.js\nb.jsx\n-c.ts\n");
        let names: Vec<_> = keys.iter().map(FileKey::as_str).collect();
        assert_eq!(names, ["a.js", "b.jsx", "c.ts"]);
    }

    #[test]
    fn test_trailing_comment_removed() {
        let keys = parse_index("- hooks/timer.tsx   # uses useInterval\n");
        assert_eq!(keys[0].as_str(), "hooks/timer.tsx");
    }

    #[test]
    fn test_comment_only_index_is_empty() {
        assert!(default_entry("# nothing here\n\n   \n# still nothing").is_none());
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let keys = parse_index("- ../escape.js\n- ok.js");
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].as_str(), "ok.js");
    }

    #[test]
    fn test_bullet_followed_by_tab() {
        let keys = parse_index("-\tcounter.tsx\n-   hello.js\n");
        let names: Vec<_> = keys.iter().map(FileKey::as_str).collect();
        assert_eq!(names, ["counter.tsx", "hello.js"]);
    }

    #[test]
    fn test_crlf_lines() {
        let keys = parse_index("- a.tsx\r\n- b.tsx\r\n");
        assert_eq!(keys[0].as_str(), "a.tsx");
        assert_eq!(keys[1].as_str(), "b.tsx");
    }
}
