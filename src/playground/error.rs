//! Preview pipeline error types.
//!
//! Every failure is caught where it happens and routed to the shell's
//! notification channel. None of them stops the controller or the trigger.

use std::io;

use thiserror::Error;

/// Failure retrieving the collection index or a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid file key `{0}`")]
    InvalidKey(String),

    #[error("not found")]
    NotFound,

    #[error("collection index lists no documents")]
    EmptyIndex,

    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for FetchError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}

/// Source text is not valid for its declared dialect.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// Diagnostics reported by the compiler, rendered against the original text.
    #[error("{summary}")]
    Syntax {
        /// First diagnostic message, one line
        summary: String,
        /// All diagnostics with source labels
        report: String,
    },

    /// The compile worker died before producing a result.
    #[error("compile worker aborted: {0}")]
    Aborted(String),
}

impl TransformError {
    /// Full diagnostic text for display.
    pub fn detail(&self) -> &str {
        match self {
            Self::Syntax { report, .. } => report,
            Self::Aborted(reason) => reason,
        }
    }
}

/// Exception thrown by injected code while it executes.
#[derive(Debug, Clone, Error)]
#[error("run {run} threw: {message}")]
pub struct RuntimeInjectionError {
    pub run: u64,
    pub message: String,
}

/// Error kind reported through the shell.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("{source} - {key}")]
    Fetch {
        key: String,
        #[source]
        source: FetchError,
    },

    #[error("transform failed for `{key}`: {source}")]
    Transform {
        key: String,
        #[source]
        source: TransformError,
    },

    #[error(transparent)]
    RuntimeInjection(#[from] RuntimeInjectionError),
}

impl PlaygroundError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Transform { .. } => ErrorKind::Transform,
            Self::RuntimeInjection(_) => ErrorKind::RuntimeInjection,
        }
    }

    /// Multi-line detail shown below the summary (compiler report, if any).
    pub fn detail(&self) -> &str {
        match self {
            Self::Transform { source, .. } => source.detail(),
            _ => "",
        }
    }
}

/// Orthogonal error flag of the preview state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Transform,
    RuntimeInjection,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Transform => "transform",
            Self::RuntimeInjection => "runtime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mentions_key() {
        let err = PlaygroundError::Fetch {
            key: "demo.tsx".into(),
            source: FetchError::NotFound,
        };
        assert_eq!(err.to_string(), "not found - demo.tsx");
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = FetchError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, FetchError::NotFound));
    }

    #[test]
    fn test_transform_detail() {
        let err = PlaygroundError::Transform {
            key: "a.tsx".into(),
            source: TransformError::Syntax {
                summary: "Unexpected token".into(),
                report: "x Unexpected token\n  at a.tsx:1:3".into(),
            },
        };
        assert!(err.to_string().contains("Unexpected token"));
        assert!(err.detail().contains("a.tsx:1:3"));
    }

    #[test]
    fn test_runtime_error_display() {
        let err = PlaygroundError::from(RuntimeInjectionError {
            run: 3,
            message: "boom".into(),
        });
        assert_eq!(err.to_string(), "run 3 threw: boom");
        assert_eq!(err.kind(), ErrorKind::RuntimeInjection);
    }
}
