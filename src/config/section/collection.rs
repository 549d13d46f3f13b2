//! `[collection]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [collection]
//! dir = "code"          # Directory holding the documents (relative to root)
//! index = "index.yml"   # Index file inside `dir`; its first entry is the default
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub dir: PathBuf,
    pub index: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            dir: "code".into(),
            index: "index.yml".into(),
        }
    }
}

impl CollectionConfig {
    /// The index must be a plain relative path inside `dir`.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        let index = Path::new(&self.index);
        let plain = !self.index.is_empty()
            && index
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            diag.error_with_hint(
                FieldPath::new("collection.index"),
                format!("invalid index path `{}`", self.index),
                "use a path relative to `collection.dir`, e.g. \"index.yml\"",
            );
        }
    }

    /// The collection directory must exist (serve and list only).
    pub fn validate_dir(&self, diag: &mut ConfigDiagnostics) {
        if !self.dir.is_dir() {
            diag.error_with_hint(
                FieldPath::new("collection.dir"),
                format!("collection directory `{}` not found", self.dir.display()),
                "create it or point `--collection` at an existing directory",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_collection_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.collection.dir, PathBuf::from("code"));
        assert_eq!(config.collection.index, "index.yml");
    }

    #[test]
    fn test_escaping_index_rejected() {
        for index in ["../index.yml", "/etc/index.yml", ""] {
            let config = test_parse_config(&format!("[collection]\nindex = \"{index}\""));
            let mut diag = ConfigDiagnostics::new();
            config.collection.validate_paths(&mut diag);
            assert!(diag.has_errors(), "{index}");
        }
    }

    #[test]
    fn test_missing_dir_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.collection.dir = temp.path().join("nope");

        let mut diag = ConfigDiagnostics::new();
        config.collection.validate_dir(&mut diag);
        assert!(diag.has_errors());

        config.collection.dir = temp.path().to_path_buf();
        let mut diag = ConfigDiagnostics::new();
        config.collection.validate_dir(&mut diag);
        assert!(!diag.has_errors());
    }
}
