//! Session Actor - one preview client
//!
//! ```text
//! ws.read() ──ClientMsg──→ ControllerHandle ──→ controller task
//!                                                    │
//! ws.send() ←──ServerMsg── ClientHandle (surface + shell)
//! ```
//!
//! Each client gets its own IO thread polling the socket in non-blocking
//! mode; the controller runs on the coordinator's tokio runtime. Closing
//! the socket drops the controller handle, which disposes the session.

mod client;

#[cfg(test)]
mod tests;

use std::io;
use std::net::TcpStream;
use std::time::Duration;

use crossbeam::channel::{Receiver, TryRecvError};
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use crate::config::PlaygroundConfig;
use crate::live::{ClientMsg, ServerMsg};
use crate::playground::{ControllerHandle, ControllerOptions, DirFetcher, controller};

pub use client::ClientHandle;

/// Sleep between polls when neither direction had traffic
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Connected client and the controller serving it.
pub struct Session {
    ws: WebSocket<TcpStream>,
    outbound: Receiver<ServerMsg>,
    controller: ControllerHandle,
}

impl Session {
    /// Complete the handshake and start a controller for the client.
    ///
    /// Blocks for the handshake; call from the session's own thread.
    pub fn open(
        stream: TcpStream,
        runtime: &tokio::runtime::Handle,
        config: &PlaygroundConfig,
    ) -> Option<Self> {
        let ws = match tungstenite::accept(stream) {
            Ok(ws) => ws,
            Err(e) => {
                crate::log!("live"; "handshake failed: {}", e);
                return None;
            }
        };
        if let Err(e) = ws.get_ref().set_nonblocking(true) {
            crate::log!("live"; "failed to poll client: {}", e);
            return None;
        }

        let (client, outbound) = ClientHandle::channel();
        client.send(ServerMsg::connected());

        let controller = {
            let _guard = runtime.enter();
            spawn_controller(client, config)
        };

        Some(Self {
            ws,
            outbound,
            controller,
        })
    }

    /// Pump messages until the client leaves or shutdown is requested.
    pub fn run(mut self) {
        while !crate::core::is_shutdown() {
            let sent = match self.flush_outbound() {
                Ok(sent) => sent,
                Err(e) => {
                    crate::debug!("live"; "send failed: {}", e);
                    break;
                }
            };

            let received = match self.ws.read() {
                Ok(Message::Text(text)) => {
                    match ClientMsg::from_json(&text) {
                        Some(msg) => dispatch(&self.controller, msg),
                        None => crate::debug!("live"; "ignoring message: {}", text.as_str()),
                    }
                    true
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => true,
                Err(tungstenite::Error::Io(ref e)) if e.kind() == io::ErrorKind::WouldBlock => false,
                Err(e) => {
                    crate::debug!("live"; "client read failed: {}", e);
                    break;
                }
            };

            if !sent && !received {
                std::thread::sleep(IDLE_POLL);
            }
        }

        crate::debug!("live"; "client disconnected");
        self.controller.dispose();
    }

    /// Write queued messages. Returns whether anything was sent.
    fn flush_outbound(&mut self) -> Result<bool, tungstenite::Error> {
        let mut sent = false;
        loop {
            match self.outbound.try_recv() {
                Ok(msg) => {
                    sent = true;
                    tolerate_would_block(self.ws.send(Message::Text(msg.to_json().into())))?;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(tungstenite::Error::AlreadyClosed),
            }
        }
        // Frames left buffered by a full socket go out on later polls
        tolerate_would_block(self.ws.flush())?;
        Ok(sent)
    }
}

fn tolerate_would_block(result: Result<(), tungstenite::Error>) -> Result<(), tungstenite::Error> {
    match result {
        Err(tungstenite::Error::Io(ref e)) if e.kind() == io::ErrorKind::WouldBlock => Ok(()),
        other => other,
    }
}

/// Controller for one client, reading the collection from disk.
pub fn spawn_controller(client: ClientHandle, config: &PlaygroundConfig) -> ControllerHandle {
    let fetcher = DirFetcher::new(&config.collection.dir, config.collection.index.as_str());
    controller::spawn(
        fetcher,
        client.clone(),
        client,
        ControllerOptions::from_config(config),
    )
}

/// Forward one client message to the controller.
pub fn dispatch(controller: &ControllerHandle, msg: ClientMsg) {
    match msg {
        ClientMsg::Page { path } => controller.open_route(&path),
        ClientMsg::Edit { text } => controller.edit(text),
        ClientMsg::Refresh => controller.refresh(),
        ClientMsg::Rendered { run } => controller.rendered(run),
        ClientMsg::RuntimeError { run, message } => controller.runtime_error(run, message),
        ClientMsg::Resize => controller.resize(),
    }
}
