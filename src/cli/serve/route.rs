//! Request routing.
//!
//! | Path                              | Route                         |
//! |-----------------------------------|-------------------------------|
//! | `/`                               | redirect to `/playground/`    |
//! | `/playground`, `/playground/<key>`| playground page               |
//! | `/__livepad/preview-<hash>.js`    | preview client                |
//! | `/__livepad/preview-<hash>.css`   | preview stylesheet            |
//! | `/code/<key>`                     | raw collection file           |

use crate::embed::NoVars;
use crate::embed::serve::{PREVIEW_CSS, PREVIEW_JS, PreviewVars};
use crate::playground::FileKey;
use crate::playground::document::ROUTE_PREFIX;

/// URL prefix of raw collection files.
pub const CODE_PREFIX: &str = "/code/";

#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Redirect(&'static str),
    Page(Option<FileKey>),
    PreviewJs,
    PreviewCss,
    Code(FileKey),
    NotFound,
}

/// Classify a request URL (path plus optional query).
pub fn route(url: &str) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();

    if path == "/" || path.is_empty() {
        return Route::Redirect(ROUTE_PREFIX);
    }
    if path == ROUTE_PREFIX.trim_end_matches('/') || path == ROUTE_PREFIX {
        return Route::Page(None);
    }
    if path.starts_with(ROUTE_PREFIX) {
        // Invalid keys still get the page; its session reports the bad key
        return Route::Page(FileKey::from_route(path).ok().flatten());
    }
    if PREVIEW_JS.matches(path) {
        return Route::PreviewJs;
    }
    if PREVIEW_CSS.matches(path) {
        return Route::PreviewCss;
    }
    if let Some(raw) = path.strip_prefix(CODE_PREFIX) {
        let decoded = percent_encoding::percent_decode_str(raw).decode_utf8_lossy();
        return match FileKey::parse(&decoded) {
            Ok(key) => Route::Code(key),
            Err(_) => Route::NotFound,
        };
    }
    Route::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> FileKey {
        FileKey::parse(raw).unwrap()
    }

    #[test]
    fn test_root_redirects() {
        assert_eq!(route("/"), Route::Redirect("/playground/"));
        assert_eq!(route("/?x=1"), Route::Redirect("/playground/"));
    }

    #[test]
    fn test_page_routes() {
        assert_eq!(route("/playground"), Route::Page(None));
        assert_eq!(route("/playground/"), Route::Page(None));
        assert_eq!(route("/playground/demo.tsx"), Route::Page(Some(key("demo.tsx"))));
        assert_eq!(
            route("/playground/hooks/timer.tsx?v=2"),
            Route::Page(Some(key("hooks/timer.tsx")))
        );
        assert_eq!(route("/playground/../secret"), Route::Page(None));
    }

    #[test]
    fn test_embedded_assets() {
        let js = PREVIEW_JS.url_path_with_vars(&PreviewVars { ws_port: 35730 });
        let css = PREVIEW_CSS.url_path_with_vars(&NoVars);
        assert_eq!(route(&js), Route::PreviewJs);
        assert_eq!(route(&css), Route::PreviewCss);
        assert_eq!(route("/__livepad/unknown-00000000.js"), Route::NotFound);
    }

    #[test]
    fn test_code_is_confined_to_collection() {
        assert_eq!(route("/code/index.yml"), Route::Code(key("index.yml")));
        assert_eq!(route("/code/hooks%2Ftimer.tsx"), Route::Code(key("hooks/timer.tsx")));
        assert_eq!(route("/code/../livepad.toml"), Route::NotFound);
        assert_eq!(route("/code/%2E%2E/livepad.toml"), Route::NotFound);
        assert_eq!(route("/code/"), Route::NotFound);
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(route("/favicon.ico"), Route::NotFound);
        assert_eq!(route("/playgroundx"), Route::NotFound);
    }
}
