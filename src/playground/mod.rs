//! Live preview pipeline.
//!
//! ```text
//! editor text ─→ trigger ─→ transform ─→ wrap ─→ runtime ─→ mount surface
//!                   ↑                                  │
//!                   └──────── controller ←── bridge signals
//! ```
//!
//! Everything here is transport-agnostic: the page is reached through the
//! [`surface::PreviewSurface`] and [`surface::Shell`] traits.

pub mod artifact;
pub mod bridge;
pub mod controller;
pub mod document;
pub mod error;
pub mod fetch;
pub mod index;
pub mod runtime;
pub mod state;
pub mod surface;
pub mod transform;
pub mod trigger;
pub mod wrap;

pub use controller::{ControllerHandle, ControllerOptions};
pub use document::FileKey;
pub use fetch::DirFetcher;
