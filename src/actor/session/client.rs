//! Browser-side surface and shell of one session.

use crossbeam::channel::{self, Receiver, Sender};

use crate::live::ServerMsg;
use crate::playground::artifact::CompiledArtifact;
use crate::playground::bridge::AssetRequest;
use crate::playground::error::{PlaygroundError, RuntimeInjectionError};
use crate::playground::surface::{PreviewSurface, Shell};

/// Outbound half of a client connection.
///
/// Implements both [`PreviewSurface`] and [`Shell`] by queueing
/// [`ServerMsg`]s for the session's IO thread. Clones share the queue.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    tx: Sender<ServerMsg>,
}

impl ClientHandle {
    /// Create a handle and the receiver its IO thread drains.
    pub fn channel() -> (Self, Receiver<ServerMsg>) {
        let (tx, rx) = channel::unbounded();
        (Self { tx }, rx)
    }

    /// Queue a message. Returns `false` once the IO thread has gone.
    pub fn send(&self, msg: ServerMsg) -> bool {
        self.tx.send(msg).is_ok()
    }
}

impl PreviewSurface for ClientHandle {
    fn clear(&mut self) {
        self.send(ServerMsg::Clear);
    }

    fn inject(&mut self, artifact: &CompiledArtifact) -> Result<(), RuntimeInjectionError> {
        let msg = ServerMsg::Inject {
            run: artifact.run(),
            script: artifact.script_text.clone(),
        };
        if self.send(msg) {
            Ok(())
        } else {
            Err(RuntimeInjectionError {
                run: artifact.run(),
                message: "client disconnected".to_string(),
            })
        }
    }

    fn load_asset(&mut self, asset: &AssetRequest) {
        self.send(ServerMsg::Asset(asset.clone()));
    }

    fn dispatch_resize(&mut self) {
        self.send(ServerMsg::DispatchResize);
    }

    fn listen_resize(&mut self, enabled: bool) {
        self.send(ServerMsg::ResizeListener { enabled });
    }
}

impl Shell for ClientHandle {
    fn navigate(&mut self, route: &str) {
        self.send(ServerMsg::Navigate {
            path: route.to_string(),
        });
    }

    fn seed_editor(&mut self, text: &str) {
        self.send(ServerMsg::Seed {
            text: text.to_string(),
        });
    }

    fn set_title(&mut self, title: &str) {
        self.send(ServerMsg::Title {
            text: title.to_string(),
        });
    }

    fn set_busy(&mut self, busy: bool) {
        self.send(ServerMsg::Busy { value: busy });
    }

    fn notify(&mut self, error: &PlaygroundError) {
        self.send(ServerMsg::notify(error));
    }
}
