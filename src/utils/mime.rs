//! MIME type detection for served files.

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const TYPESCRIPT: &str = "text/typescript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const YAML: &str = "text/yaml; charset=utf-8";
    pub const SVG: &str = "image/svg+xml";
    pub const PNG: &str = "image/png";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from file extension.
///
/// Returns a full MIME type string suitable for HTTP Content-Type header.
pub fn from_path(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()))
}

/// Guess MIME type from file extension string.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("html" | "htm") => types::HTML,
        Some("css") => types::CSS,
        Some("js" | "mjs" | "cjs" | "jsx") => types::JAVASCRIPT,
        Some("ts" | "tsx" | "mts" | "cts") => types::TYPESCRIPT,
        Some("json") => types::JSON,
        Some("yaml" | "yml") => types::YAML,
        Some("txt" | "md") => types::PLAIN,
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        _ => types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(&PathBuf::from("index.yml")), types::YAML);
        assert_eq!(from_path(&PathBuf::from("demo.tsx")), types::TYPESCRIPT);
        assert_eq!(from_path(&PathBuf::from("demo.jsx")), types::JAVASCRIPT);
        assert_eq!(from_path(&PathBuf::from("style.css")), types::CSS);
        assert_eq!(from_path(&PathBuf::from("blob.xyz")), types::OCTET_STREAM);
    }
}
