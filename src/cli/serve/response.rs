//! HTTP response handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::PlaygroundConfig;
use crate::embed::NoVars;
use crate::embed::serve::{PLAYGROUND_HTML, PREVIEW_CSS, PREVIEW_JS, PageVars, PreviewVars};
use crate::playground::FileKey;
use crate::utils::mime::types::{HTML, PLAIN};

/// Title prefix of the playground page.
const TITLE: &str = "Playground";

/// Hashed assets never change under the same URL.
const IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Respond with a redirect.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(302)).with_header(header("Location", location)?);
    request.respond(response)?;
    Ok(())
}

/// Render the playground page for `key` (the title is final only for
/// direct links; the session sets it again once the document loads).
pub fn respond_page(
    request: Request,
    config: &PlaygroundConfig,
    ws_port: u16,
    key: Option<&FileKey>,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }

    let title = match key {
        Some(key) => format!("{TITLE} - {key}"),
        None => TITLE.to_string(),
    };
    let preview_js = PREVIEW_JS.url_path_with_vars(&PreviewVars { ws_port });
    let preview_css = PREVIEW_CSS.url_path_with_vars(&NoVars);
    let body = PLAYGROUND_HTML.render(&PageVars {
        title: &title,
        version: env!("CARGO_PKG_VERSION"),
        scripts: &config.bridge.scripts,
        preview_js: &preview_js,
        preview_css: &preview_css,
    });

    send_body(request, 200, HTML, body.into_bytes(), None)
}

/// Respond with preview.js from memory.
pub fn respond_preview_js(request: Request, ws_port: u16) -> Result<()> {
    let body = PREVIEW_JS.render(&PreviewVars { ws_port });
    let content_type = PREVIEW_JS.kind().content_type();
    send_body(request, 200, content_type, body.into_bytes(), Some(IMMUTABLE))
}

/// Respond with preview.css from memory.
pub fn respond_preview_css(request: Request) -> Result<()> {
    let body = PREVIEW_CSS.render(&NoVars);
    let content_type = PREVIEW_CSS.kind().content_type();
    send_body(request, 200, content_type, body.into_bytes(), Some(IMMUTABLE))
}

/// Respond with a raw collection file.
pub fn respond_code(request: Request, path: &Path) -> Result<()> {
    if !path.is_file() {
        return respond_not_found(request);
    }
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body, Some("no-cache"))
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec(), None)
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec(), None)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status)).with_header(header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    cache_control: Option<&'static str>,
) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?);
    if let Some(value) = cache_control {
        response = response.with_header(header("Cache-Control", value)?);
    }
    request.respond(response)?;
    Ok(())
}

fn header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid header value for {key}"))
}
