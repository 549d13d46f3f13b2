//! Playground server with live preview.
//!
//! Two listeners: tiny_http serves the page, the client runtime and raw
//! collection files; the live channel (WebSocket) carries each session.

mod lifecycle;
mod response;
mod route;

use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::config::{PlaygroundConfig, cfg};
use crate::core::register_server;
use crate::{debug, log};
use route::Route;

/// Concurrent HTTP request handlers.
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    ws_listener: TcpListener,
    ws_port: u16,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server and the live channel without serving yet.
///
/// Both ports are known before the first page is rendered, so the page
/// always points the client at the bound live channel port.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (ws_listener, ws_port) =
        crate::live::server::bind(config.serve.interface, config.serve.ws_port)?;
    debug!("live"; "ws://{}:{}", config.serve.interface, ws_port);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}/playground/", addr);

    Ok(BoundServer {
        server,
        ws_listener,
        ws_port,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let actor_handle =
            lifecycle::spawn_actors(Arc::clone(&config), self.ws_listener, self.shutdown_rx);
        run_request_loop(&self.server, self.ws_port)?;
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

/// Execute serve command
pub fn run_serve() -> Result<()> {
    let server = bind_server()?;
    debug!("serve"; "collection {}", cfg().collection.dir.display());
    server.run()
}

fn run_request_loop(server: &Server, ws_port: u16) -> Result<()> {
    let config = cfg();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()?;

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, ws_port) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &PlaygroundConfig, ws_port: u16) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = route::route(request.url());
    debug!("serve"; "{} {} -> {:?}", request.method(), request.url(), route);

    match route {
        Route::Redirect(location) => response::respond_redirect(request, location),
        Route::Page(key) => response::respond_page(request, config, ws_port, key.as_ref()),
        Route::PreviewJs => response::respond_preview_js(request, ws_port),
        Route::PreviewCss => response::respond_preview_css(request),
        Route::Code(key) => {
            let path = config.collection.dir.join(key.as_str());
            response::respond_code(request, &path)
        }
        Route::NotFound => response::respond_not_found(request),
    }
}
