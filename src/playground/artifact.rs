//! Compilation requests and their injectable results.

use super::bridge::Bridge;
use super::document::{Dialect, FileKey, SourceDocument};
use super::error::TransformError;
use super::transform::transform;
use super::wrap::wrap;
use crate::config::TransformConfig;

/// Immutable snapshot taken each time the trigger fires.
#[derive(Debug, Clone)]
pub struct CompilationRequest {
    pub key: FileKey,
    pub source_text: String,
    pub dialect: Dialect,
    /// Generation id of the trigger invocation
    pub request_id: u64,
}

impl CompilationRequest {
    pub fn new(document: &SourceDocument, request_id: u64) -> Self {
        Self {
            key: document.key.clone(),
            source_text: document.text.clone(),
            dialect: document.dialect,
            request_id,
        }
    }
}

/// Wrapped script text ready for injection. Superseded, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub script_text: String,
    pub request_id: u64,
}

impl CompiledArtifact {
    /// Run id the bridge reports against.
    pub const fn run(&self) -> u64 {
        self.request_id
    }
}

/// Transform and wrap one request. Runs on a blocking worker.
pub fn compile(
    request: &CompilationRequest,
    config: &TransformConfig,
) -> Result<CompiledArtifact, TransformError> {
    let body = transform(
        &request.source_text,
        request.dialect,
        request.key.as_str(),
        config,
    )?;
    let bridge = Bridge::for_run(request.request_id);

    Ok(CompiledArtifact {
        script_text: wrap(&body, &bridge),
        request_id: request.request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(key: &str, text: &str, id: u64) -> CompilationRequest {
        let document = SourceDocument::new(FileKey::parse(key).unwrap(), text);
        CompilationRequest::new(&document, id)
    }

    #[test]
    fn test_compile_wraps_with_request_id() {
        let artifact = compile(
            &request("demo.tsx", "ReactDOM.render(<b />, mountNode);", 4),
            &TransformConfig::default(),
        )
        .unwrap();
        assert_eq!(artifact.run(), 4);
        assert!(artifact.script_text.contains("__livepad_run_4"));
        assert!(artifact.script_text.contains("React.createElement"));
    }

    #[test]
    fn test_compile_error_keeps_diagnostic() {
        let err = compile(&request("bad.jsx", "<div", 1), &TransformConfig::default());
        assert!(matches!(err, Err(TransformError::Syntax { .. })));
    }
}
