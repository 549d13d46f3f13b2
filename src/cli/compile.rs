//! Compile command implementation.
//!
//! Runs one file through the same transform + wrap path the live preview
//! uses and prints the result to stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PlaygroundConfig;
use crate::playground::artifact::{CompilationRequest, compile};
use crate::playground::document::{Dialect, FileKey, SourceDocument};
use crate::playground::error::TransformError;
use crate::playground::transform::transform;

/// Run id stamped into artifacts printed by this command.
const CLI_RUN: u64 = 1;

/// Execute compile command
pub fn run_compile(file: &Path, raw: bool, config: &PlaygroundConfig) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let name = file.display().to_string();
    let dialect = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(Dialect::from_extension)
        .unwrap_or(Dialect::Plain);

    let output = match compile_source(&text, dialect, &name, raw, config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e.detail());
            anyhow::bail!("failed to compile {}", name);
        }
    };

    crate::debug!("compile"; "{} ({}), {} bytes", name, dialect.label(), output.len());
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

/// Transformed body when `raw`, otherwise the wrapped artifact.
fn compile_source(
    text: &str,
    dialect: Dialect,
    name: &str,
    raw: bool,
    config: &PlaygroundConfig,
) -> Result<String, TransformError> {
    if raw {
        return transform(text, dialect, name, &config.transform);
    }

    // The key only labels diagnostics; fall back to a neutral one for
    // paths a collection key cannot express (absolute, `..`).
    let key = FileKey::parse(name)
        .or_else(|_| FileKey::parse(&format!("input.{}", extension_of(dialect))))
        .map_err(|e| TransformError::Aborted(e.to_string()))?;
    let mut document = SourceDocument::new(key, text);
    document.dialect = dialect;

    let request = CompilationRequest::new(&document, CLI_RUN);
    compile(&request, &config.transform).map(|artifact| artifact.script_text)
}

fn extension_of(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Plain => "js",
        Dialect::TypedMarkup { typed: false, .. } => "jsx",
        Dialect::TypedMarkup { markup: false, .. } => "ts",
        Dialect::TypedMarkup { .. } => "tsx",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSX: Dialect = Dialect::TypedMarkup {
        typed: true,
        markup: true,
    };

    #[test]
    fn test_raw_skips_wrapper() {
        let config = PlaygroundConfig::default();
        let out = compile_source("let a: number = 1;", TSX, "a.tsx", true, &config).unwrap();
        assert!(out.contains("let a = 1"));
        assert!(!out.contains("__livepad_run_"));
    }

    #[test]
    fn test_wrapped_output_names_run() {
        let config = PlaygroundConfig::default();
        let out = compile_source("console.log(1);", Dialect::Plain, "/abs/x.js", false, &config)
            .unwrap();
        assert!(out.contains("__livepad_run_1"));
        assert!(out.contains("window.__livepad.bridge(1)"));
    }

    #[test]
    fn test_syntax_error_has_detail() {
        let config = PlaygroundConfig::default();
        let err = compile_source("const x = <div>;", TSX, "bad.tsx", false, &config).unwrap_err();
        assert!(!err.detail().is_empty());
    }
}
