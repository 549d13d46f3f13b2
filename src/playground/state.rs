//! Preview state machine.
//!
//! ```text
//! LoadingIndex → LoadingDocument → Idle → Compiling → Rendering → Ready
//!                      ↑                      ↑                     │
//!                      └── navigation         └──── next edit ──────┘
//! ```
//!
//! The error flag is orthogonal to the phase: a failed compile returns to
//! `Idle` with `error = Some(Transform)`, and the next successful render
//! clears it.

use super::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LoadingIndex,
    LoadingDocument,
    Idle,
    Compiling,
    Rendering,
    Ready,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoadingIndex => "loading-index",
            Self::LoadingDocument => "loading-document",
            Self::Idle => "idle",
            Self::Compiling => "compiling",
            Self::Rendering => "rendering",
            Self::Ready => "ready",
        }
    }
}

/// Observable status of one playground session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewState {
    pub phase: Phase,
    pub error: Option<ErrorKind>,
}

impl PreviewState {
    pub const fn new() -> Self {
        Self {
            phase: Phase::LoadingIndex,
            error: None,
        }
    }

    pub fn enter(&mut self, phase: Phase) {
        crate::debug!("preview"; "{} -> {}", self.phase.label(), phase.label());
        self.phase = phase;
    }

    /// Enter `phase` and raise the error flag.
    pub fn fail(&mut self, phase: Phase, kind: ErrorKind) {
        self.enter(phase);
        self.error = Some(kind);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new()
    }
}
