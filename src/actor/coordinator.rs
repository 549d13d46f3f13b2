//! Actor Coordinator - accepts clients and runs their sessions
//!
//! The Coordinator is a thin orchestrator that:
//! - Owns the tokio runtime controllers run on
//! - Receives accepted streams from the live channel acceptor
//! - Starts one session thread per client
//! - Stops on the shutdown signal

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::session::Session;
use crate::config::PlaygroundConfig;

const CHANNEL_BUFFER: usize = 32;

/// Poll interval of the shutdown signal
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Coordinator - wires up and runs the session actors.
pub struct Coordinator {
    config: Arc<PlaygroundConfig>,
    listener: TcpListener,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create from a bound live channel listener.
    pub fn new(config: Arc<PlaygroundConfig>, listener: TcpListener) -> Self {
        Self {
            config,
            listener,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run until shutdown (or until the acceptor stops, without a signal).
    pub async fn run(self) -> Result<()> {
        let (client_tx, mut client_rx) = mpsc::channel::<TcpStream>(CHANNEL_BUFFER);
        crate::live::server::spawn_acceptor(self.listener, client_tx)?;

        crate::debug!("actor"; "start");
        loop {
            tokio::select! {
                biased;
                _ = shutdown_requested(self.shutdown_rx.as_ref()) => {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                stream = client_rx.recv() => {
                    let Some(stream) = stream else { break };
                    open_session(stream, &self.config);
                }
            }
        }

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}

/// Resolve once the shutdown signal fires; never without a receiver.
async fn shutdown_requested(rx: Option<&Receiver<()>>) {
    let Some(rx) = rx else {
        return std::future::pending().await;
    };
    loop {
        if rx.try_recv().is_ok() || crate::core::is_shutdown() {
            return;
        }
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
}

/// Handshake and IO happen on a dedicated thread per client.
fn open_session(stream: TcpStream, config: &Arc<PlaygroundConfig>) {
    let runtime = tokio::runtime::Handle::current();
    let config = Arc::clone(config);
    let spawned = std::thread::Builder::new()
        .name("livepad-session".into())
        .spawn(move || {
            if let Some(session) = Session::open(stream, &runtime, &config) {
                session.run();
            }
        });
    if let Err(e) = spawned {
        crate::log!("live"; "failed to start session: {}", e);
    }
}
