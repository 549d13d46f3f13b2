//! `[transform]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [transform]
//! jsx_pragma = "React.createElement"
//! jsx_pragma_frag = "React.Fragment"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// JSX lowering options for the typed/markup dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Element factory called for every JSX element.
    pub jsx_pragma: String,
    /// Factory argument used for `<>...</>` fragments.
    pub jsx_pragma_frag: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            jsx_pragma: "React.createElement".into(),
            jsx_pragma_frag: "React.Fragment".into(),
        }
    }
}

impl TransformConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (FieldPath::new("transform.jsx_pragma"), &self.jsx_pragma),
            (FieldPath::new("transform.jsx_pragma_frag"), &self.jsx_pragma_frag),
        ] {
            if !is_member_expression(value) {
                diag.error(field, format!("`{value}` is not an identifier path"));
            }
        }
    }
}

/// `a`, `a.b`, `$_.c1` and so on.
fn is_member_expression(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_transform_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.transform, TransformConfig::default());
    }

    #[test]
    fn test_custom_pragma() {
        let config = test_parse_config("[transform]\njsx_pragma = \"h\"\njsx_pragma_frag = \"Fragment\"");
        assert_eq!(config.transform.jsx_pragma, "h");
        let mut diag = ConfigDiagnostics::new();
        config.transform.validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_invalid_pragma() {
        let config = test_parse_config("[transform]\njsx_pragma = \"React..createElement\"");
        let mut diag = ConfigDiagnostics::new();
        config.transform.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
