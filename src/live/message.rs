//! Live Channel Message Protocol
//!
//! JSON messages exchanged with the preview client, tagged by `type`.
//!
//! # Client → server
//!
//! - `page`: the client opened (or navigated to) a route
//! - `edit`: editor value changed
//! - `refresh`: run the current text again
//! - `rendered` / `runtime_error`: bridge signals of a run
//! - `resize`: host window resized
//!
//! # Server → client
//!
//! Shell effects (`navigate`, `seed`, `title`, `busy`, `notify`) and surface
//! operations (`clear`, `inject`, `asset`, `resize_listener`,
//! `dispatch_resize`).

use serde::{Deserialize, Serialize};

use crate::playground::bridge::AssetRequest;
use crate::playground::error::PlaygroundError;

/// Message received from a preview client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Page { path: String },
    Edit { text: String },
    Refresh,
    Rendered { run: u64 },
    RuntimeError { run: u64, message: String },
    Resize,
}

impl ClientMsg {
    /// Parse from JSON string
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

/// Message sent to a preview client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },
    Navigate { path: String },
    /// Controlled editor value
    Seed { text: String },
    Title { text: String },
    Busy { value: bool },
    Clear,
    Inject { run: u64, script: String },
    /// Serialized flat: `{"type":"asset","kind":"style","value":"..."}`
    Asset(AssetRequest),
    Notify {
        kind: &'static str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    ResizeListener { enabled: bool },
    DispatchResize,
}

impl ServerMsg {
    /// Create a connected message
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Create a notification for a pipeline failure
    pub fn notify(error: &PlaygroundError) -> Self {
        let detail = error.detail();
        Self::Notify {
            kind: error.kind().label(),
            message: error.to_string(),
            detail: (!detail.is_empty()).then(|| detail.to_string()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"clear"}"#.to_string())
    }
}
