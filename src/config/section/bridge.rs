//! `[bridge]` section configuration.
//!
//! Libraries the page loads so injected code finds them on the bridge.
//!
//! # Example
//!
//! ```toml
//! [bridge]
//! scripts = ["https://unpkg.com/react@16/umd/react.development.js"]
//! preload = ["https://unpkg.com/antd@4/dist/antd.min.css"]
//! ```
//!
//! `scripts` are UMD bundles loaded in the page head, in order. `preload`
//! entries are loaded into the mount surface when a session attaches;
//! `.css` entries become stylesheets, everything else a script.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const DEFAULT_SCRIPTS: &[&str] = &[
    "https://unpkg.com/react@16/umd/react.development.js",
    "https://unpkg.com/react-dom@16/umd/react-dom.development.js",
    "https://unpkg.com/react-is@16/umd/react-is.production.min.js",
    "https://unpkg.com/moment@2/min/moment.min.js",
    "https://unpkg.com/antd@4/dist/antd.min.js",
    "https://unpkg.com/lodash@4/lodash.min.js",
    "https://unpkg.com/axios@0.27/dist/axios.min.js",
    "https://unpkg.com/styled-components@5/dist/styled-components.min.js",
    "https://unpkg.com/immer@9/dist/immer.umd.production.min.js",
];

const DEFAULT_PRELOAD: &[&str] = &["https://unpkg.com/antd@4/dist/antd.min.css"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub scripts: Vec<String>,
    pub preload: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            scripts: DEFAULT_SCRIPTS.iter().map(|s| (*s).to_string()).collect(),
            preload: DEFAULT_PRELOAD.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.scripts.iter().any(|s| s.trim().is_empty()) {
            diag.error(FieldPath::new("bridge.scripts"), "empty script url");
        }
        if self.preload.iter().any(|s| s.trim().is_empty()) {
            diag.error(FieldPath::new("bridge.preload"), "empty preload url");
        }
    }
}
