//! Source documents and their dialects.
//!
//! A document is addressed by a [`FileKey`], a relative path inside the
//! collection. The key's extension decides how the text is compiled:
//!
//! | Extension            | Dialect                                  |
//! |----------------------|------------------------------------------|
//! | `.js` `.mjs` `.cjs`  | `Plain` (executed as written)            |
//! | `.jsx`               | `TypedMarkup { typed: false, markup }`   |
//! | `.ts`                | `TypedMarkup { typed, markup: false }`   |
//! | `.tsx`               | `TypedMarkup { typed, markup }`          |
//!
//! Unknown extensions fall back to `Plain`.

use std::fmt;
use std::path::{Component, Path};

use super::error::FetchError;

/// Source dialect, derived from the file key extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Browser-executable script, passed through untouched.
    Plain,
    /// TypeScript and/or JSX, compiled down before injection.
    TypedMarkup { typed: bool, markup: bool },
}

impl Dialect {
    /// Derive the dialect from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jsx" => Self::TypedMarkup {
                typed: false,
                markup: true,
            },
            "ts" | "mts" | "cts" => Self::TypedMarkup {
                typed: true,
                markup: false,
            },
            "tsx" => Self::TypedMarkup {
                typed: true,
                markup: true,
            },
            _ => Self::Plain,
        }
    }

    pub const fn is_plain(self) -> bool {
        matches!(self, Self::Plain)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::TypedMarkup { .. } => "typed-markup",
        }
    }
}

/// Path-like key of a document inside the collection (e.g. `hooks/timer.tsx`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey(String);

impl FileKey {
    /// Parse a key, rejecting anything that could escape the collection root.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let key = raw.trim().trim_start_matches("./");
        if key.is_empty() {
            return Err(FetchError::InvalidKey(raw.to_string()));
        }

        let path = Path::new(key);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || key.contains('\\') {
            return Err(FetchError::InvalidKey(raw.to_string()));
        }

        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension of the key as written, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }

    pub fn dialect(&self) -> Dialect {
        self.extension()
            .map(Dialect::from_extension)
            .unwrap_or(Dialect::Plain)
    }

    /// Route of this document in the playground page.
    pub fn route(&self) -> String {
        format!("{ROUTE_PREFIX}{}", self.0)
    }

    /// Extract the file key from a playground route.
    ///
    /// `/playground/`, `/playground` and anything outside the playground
    /// prefix carry no key. A key that fails to decode or escapes the
    /// collection is an error.
    pub fn from_route(route: &str) -> Result<Option<Self>, FetchError> {
        let Some(rest) = route.strip_prefix(ROUTE_PREFIX) else {
            return Ok(None);
        };
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        if rest.is_empty() {
            return Ok(None);
        }
        let decoded = percent_encoding::percent_decode_str(rest)
            .decode_utf8()
            .map_err(|_| FetchError::InvalidKey(rest.to_string()))?;
        Self::parse(&decoded).map(Some)
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Route prefix of the playground page.
pub const ROUTE_PREFIX: &str = "/playground/";

/// The document currently open in the editor.
///
/// Replaced wholesale on navigation; only the text changes in place, and only
/// through the controlled-value channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub key: FileKey,
    pub text: String,
    pub dialect: Dialect,
}

impl SourceDocument {
    pub fn new(key: FileKey, text: impl Into<String>) -> Self {
        let dialect = key.dialect();
        Self {
            key,
            text: text.into(),
            dialect,
        }
    }
}
