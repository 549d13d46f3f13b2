//! Source transformation: editable text → browser-executable script body.
//!
//! Plain scripts pass through untouched. TypeScript/JSX is compiled with oxc:
//!
//! ```text
//! Parser → SemanticBuilder → Transformer (ts strip + classic jsx) → Codegen
//! ```
//!
//! Every call starts from a fresh arena; nothing is cached between calls.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::codegen::Codegen;
use oxc::diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource, OxcDiagnostic};
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{JsxRuntime, TransformOptions, Transformer};

use super::document::Dialect;
use super::error::TransformError;
use crate::config::TransformConfig;

/// Transform `source` for injection according to its dialect.
///
/// `name` is only used to label diagnostics.
pub fn transform(
    source: &str,
    dialect: Dialect,
    name: &str,
    config: &TransformConfig,
) -> Result<String, TransformError> {
    match dialect {
        Dialect::Plain => Ok(source.to_string()),
        Dialect::TypedMarkup { typed, markup } => {
            compile(source, source_type(typed, markup), name, config)
        }
    }
}

fn source_type(typed: bool, markup: bool) -> SourceType {
    match (typed, markup) {
        (true, true) => SourceType::tsx(),
        (true, false) => SourceType::ts(),
        (false, true) => SourceType::jsx(),
        (false, false) => SourceType::mjs(),
    }
}

fn compile(
    source: &str,
    source_type: SourceType,
    name: &str,
    config: &TransformConfig,
) -> Result<String, TransformError> {
    let allocator = Allocator::default();

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(syntax_error(ret.errors, name, source));
    }
    let mut program = ret.program;

    let ret = SemanticBuilder::new()
        .with_check_syntax_error(true)
        .build(&program);
    if !ret.errors.is_empty() {
        return Err(syntax_error(ret.errors, name, source));
    }
    let scoping = ret.semantic.into_scoping();

    let options = transform_options(config);
    let ret = Transformer::new(&allocator, Path::new(name), &options)
        .build_with_scoping(scoping, &mut program);
    if !ret.errors.is_empty() {
        return Err(syntax_error(ret.errors, name, source));
    }

    Ok(Codegen::new().build(&program).code)
}

fn transform_options(config: &TransformConfig) -> TransformOptions {
    let mut options = TransformOptions::default();
    options.jsx.jsx_plugin = true;
    options.jsx.runtime = JsxRuntime::Classic;
    options.jsx.pragma = Some(config.jsx_pragma.clone());
    options.jsx.pragma_frag = Some(config.jsx_pragma_frag.clone());
    options
}

/// Render compiler diagnostics against the original text.
fn syntax_error(errors: Vec<OxcDiagnostic>, name: &str, source: &str) -> TransformError {
    let summary = errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "syntax error".to_string());

    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut report = String::new();
    for diagnostic in errors {
        let error = diagnostic.with_source_code(NamedSource::new(name, source.to_string()));
        if handler.render_report(&mut report, &*error).is_err() {
            report.push_str(&error.to_string());
            report.push('\n');
        }
    }

    TransformError::Syntax {
        summary,
        report: report.trim_end().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSX: Dialect = Dialect::TypedMarkup {
        typed: true,
        markup: true,
    };

    fn config() -> TransformConfig {
        TransformConfig::default()
    }

    #[test]
    fn test_plain_is_identity() {
        for source in ["", "let a = 1;", "this is not even <valid> js {", "\u{1F600}\n\r\n"] {
            let out = transform(source, Dialect::Plain, "a.js", &config()).unwrap();
            assert_eq!(out, source);
        }
    }

    #[test]
    fn test_tsx_compiles_to_classic_jsx() {
        let source = "const App = (p: { n: number }) => <div className=\"x\">{p.n}</div>;\n\
                      ReactDOM.render(<App n={1} />, mountNode);";
        let out = transform(source, TSX, "demo.tsx", &config()).unwrap();
        assert!(out.contains("React.createElement"), "{out}");
        assert!(!out.contains("number"), "type annotation survived: {out}");
        assert!(!out.contains("<div"), "{out}");
    }

    #[test]
    fn test_fragment_uses_configured_pragma() {
        let source = "const el = <><b /></>;";
        let config = TransformConfig {
            jsx_pragma: "h".into(),
            jsx_pragma_frag: "Fragment".into(),
        };
        let dialect = Dialect::TypedMarkup {
            typed: false,
            markup: true,
        };
        let out = transform(source, dialect, "frag.jsx", &config).unwrap();
        assert!(out.contains("h(Fragment"), "{out}");
    }

    #[test]
    fn test_typescript_only_strips_types() {
        let dialect = Dialect::TypedMarkup {
            typed: true,
            markup: false,
        };
        let source = "interface P { x: number }\nlet p: P = { x: 1 };\nconsole.log(p.x as number);";
        let out = transform(source, dialect, "types.ts", &config()).unwrap();
        assert!(!out.contains("interface"), "{out}");
        assert!(out.contains("console.log(p.x)"), "{out}");
    }

    #[test]
    fn test_syntax_error_references_source() {
        let source = "let ok = 1;\nlet broken = <div>;\n";
        let err = transform(source, TSX, "broken.tsx", &config()).unwrap_err();
        match err {
            TransformError::Syntax { summary, report } => {
                assert!(!summary.is_empty());
                assert!(report.contains("broken.tsx"), "{report}");
                assert!(report.contains("let broken"), "{report}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_redeclaration_is_a_transform_error() {
        let source = "const a = 1;\nconst a = 2;";
        let err = transform(source, TSX, "dup.tsx", &config());
        assert!(err.is_err());
    }
}
