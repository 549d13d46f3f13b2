//! Embedded assets served under content-hash URLs.
//!
//! ```text
//! EmbeddedAsset { name: "preview", kind: JavaScript }
//!   + vars.hash_input()  ─→  /__livepad/preview-1a2b3c4d.js
//! ```
//!
//! The hash covers the embedded content and the variables, so a changed
//! WebSocket port or a rebuilt client yields a new URL and browsers never
//! hold a stale copy.

use std::marker::PhantomData;

use super::TemplateVars;
use crate::utils::mime;

/// URL prefix of every embedded asset.
pub const ASSET_PREFIX: &str = "/__livepad/";

/// Hex digits of the content hash kept in file names.
const HASH_LEN: usize = 8;

/// Asset type, decides extension and content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    JavaScript,
    Css,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Css => "css",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::JavaScript => mime::types::JAVASCRIPT,
            Self::Css => mime::types::CSS,
        }
    }
}

/// Static asset compiled into the binary, rendered with typed variables.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            content,
            _marker: PhantomData,
        }
    }

    pub const fn kind(&self) -> AssetKind {
        self.kind
    }
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    /// Render content with variables applied.
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }

    /// Short content hash over the raw content and the variables.
    pub fn hash_with_vars(&self, vars: &V) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.content.as_bytes());
        hasher.update(vars.hash_input().as_bytes());
        let digest = hex::encode(hasher.finalize().as_bytes());
        digest[..HASH_LEN].to_string()
    }

    /// `name-hash.ext`
    pub fn filename_with_vars(&self, vars: &V) -> String {
        format!(
            "{}-{}.{}",
            self.name,
            self.hash_with_vars(vars),
            self.kind.extension()
        )
    }

    /// Absolute URL path the page references.
    pub fn url_path_with_vars(&self, vars: &V) -> String {
        format!("{ASSET_PREFIX}{}", self.filename_with_vars(vars))
    }

    /// Whether a request path addresses this asset.
    ///
    /// Any hash is accepted: a page loaded before a restart still gets the
    /// current client.
    pub fn matches(&self, path: &str) -> bool {
        let Some(file) = path.strip_prefix(ASSET_PREFIX) else {
            return false;
        };
        let Some(stem) = file.strip_suffix(self.kind.extension()) else {
            return false;
        };
        stem.strip_prefix(self.name)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|hash| !hash.is_empty() && hash.chars().all(|c| c.is_ascii_hexdigit()))
    }
}
