//! `[preview]` section configuration.
//!
//! Controls when the editor text is recompiled.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! debounce_ms = 1000    # Quiet period before recompiling
//! throttle_ms = 2000    # At most one compile per interval (optional)
//! cancel = true         # Newer compiles discard older results
//! singleton = true      # Keep only the latest pending change
//! initial = false       # Compile once right away
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::playground::trigger::TriggerOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub debounce_ms: u64,
    pub throttle_ms: Option<u64>,
    pub cancel: bool,
    pub singleton: bool,
    pub initial: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            throttle_ms: None,
            cancel: true,
            singleton: true,
            initial: false,
        }
    }
}

impl PreviewConfig {
    pub fn trigger_options(&self) -> TriggerOptions {
        TriggerOptions {
            debounce: Duration::from_millis(self.debounce_ms),
            throttle: self.throttle_ms.map(Duration::from_millis),
            cancel: self.cancel,
            singleton: self.singleton,
            initial: self.initial,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.throttle_ms == Some(0) {
            diag.error_with_hint(
                FieldPath::new("preview.throttle_ms"),
                "throttle interval must be positive",
                "remove the field to disable throttling",
            );
        }
        if self.debounce_ms == 0 && self.throttle_ms.is_none() {
            diag.hint(
                FieldPath::new("preview.debounce_ms"),
                "no debounce or throttle: every keystroke recompiles",
            );
        }
    }
}
