//! Embedded client runtime for the playground page.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `asset` - Embedded asset types with content-hash URLs
//! - `serve` - Playground page, preview client and its stylesheet
//!
//! `preview.js` and `preview.css` are minified by `build.rs` into `OUT_DIR`.
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{PREVIEW_JS, PreviewVars};
//!
//! let vars = PreviewVars { ws_port: 35730 };
//! let url = PREVIEW_JS.url_path_with_vars(&vars);
//! let js = PREVIEW_JS.render(&vars);
//! ```

mod asset;
mod template;

pub use asset::{AssetKind, EmbeddedAsset};
pub use template::{NoVars, Template, TemplateVars, escape_html};

pub mod serve {
    use super::{AssetKind, EmbeddedAsset, NoVars, Template, TemplateVars, escape_html};

    /// Variables for preview.js.
    pub struct PreviewVars {
        pub ws_port: u16,
    }

    impl TemplateVars for PreviewVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__LIVEPAD_WS_PORT__", &self.ws_port.to_string())
        }

        fn hash_input(&self) -> String {
            self.ws_port.to_string()
        }
    }

    /// Variables for playground.html.
    pub struct PageVars<'a> {
        pub title: &'a str,
        pub version: &'a str,
        /// UMD libraries loaded in the head, before the client
        pub scripts: &'a [String],
        pub preview_js: &'a str,
        pub preview_css: &'a str,
    }

    impl TemplateVars for PageVars<'_> {
        fn apply(&self, content: &str) -> String {
            let scripts: String = self
                .scripts
                .iter()
                .map(|src| format!(r#"<script src="{}" crossorigin></script>"#, escape_html(src)))
                .collect::<Vec<_>>()
                .join("\n    ");
            content
                .replace("__TITLE__", &escape_html(self.title))
                .replace("__VERSION__", self.version)
                .replace("__BRIDGE_SCRIPTS__", &scripts)
                .replace("__PREVIEW_JS__", self.preview_js)
                .replace("__PREVIEW_CSS__", self.preview_css)
        }
    }

    /// Playground page shell (editor pane, mount node, assets node).
    pub const PLAYGROUND_HTML: Template<PageVars<'static>> =
        Template::new(include_str!("serve/playground.html"));

    /// Preview client with WebSocket port injection.
    pub const PREVIEW_JS: EmbeddedAsset<PreviewVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "preview",
        include_str!(concat!(env!("OUT_DIR"), "/preview.min.js")),
    );

    /// Page layout and notification styles.
    pub const PREVIEW_CSS: EmbeddedAsset<NoVars> = EmbeddedAsset::new(
        AssetKind::Css,
        "preview",
        include_str!(concat!(env!("OUT_DIR"), "/preview.min.css")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_js_with_vars() {
        let vars = serve::PreviewVars { ws_port: 35730 };
        let rendered = serve::PREVIEW_JS.render(&vars);
        assert!(rendered.contains("35730"));
        assert!(!rendered.contains("__LIVEPAD_WS_PORT__"));
        let url = serve::PREVIEW_JS.url_path_with_vars(&vars);
        assert!(url.starts_with("/__livepad/preview-"));
        assert!(url.ends_with(".js"));
        assert!(serve::PREVIEW_JS.matches(&url));
    }

    #[test]
    fn test_preview_css_url() {
        let url = serve::PREVIEW_CSS.url_path_with_vars(&NoVars);
        assert!(url.starts_with("/__livepad/preview-"));
        assert!(url.ends_with(".css"));
        assert!(!serve::PREVIEW_JS.matches(&url));
    }

    #[test]
    fn test_page_template() {
        let scripts = vec!["https://unpkg.com/react@16/umd/react.production.min.js".to_string()];
        let html = serve::PLAYGROUND_HTML.render(&serve::PageVars {
            title: "Playground - a<b>.tsx",
            version: "0.1.0",
            scripts: &scripts,
            preview_js: "/__livepad/preview-00000000.js",
            preview_css: "/__livepad/preview-11111111.css",
        });
        assert!(html.contains("Playground - a&lt;b&gt;.tsx"));
        assert!(html.contains(r#"src="https://unpkg.com/react@16/umd/react.production.min.js""#));
        assert!(html.contains("/__livepad/preview-00000000.js"));
        assert!(html.contains("/__livepad/preview-11111111.css"));
        assert!(html.contains(r#"id="mountNode""#));
        assert!(!html.contains("__BRIDGE_SCRIPTS__"));
        assert!(!html.contains("__TITLE__"));
    }
}
