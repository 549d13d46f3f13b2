//! Seams between the preview pipeline and the page hosting it.
//!
//! [`PreviewSurface`] is the isolated mount node the runtime renders into;
//! [`Shell`] is everything around it (route, editor, title, busy indicator,
//! notifications). A live session implements both by messaging its browser
//! page; tests use the recording fakes below.

use super::artifact::CompiledArtifact;
use super::bridge::AssetRequest;
use super::error::{PlaygroundError, RuntimeInjectionError};

/// Isolated mount surface owned by one preview runtime.
pub trait PreviewSurface: Send + 'static {
    /// Remove everything previously rendered into the mount.
    fn clear(&mut self);

    /// Execute a wrapped script in the page's global scope.
    fn inject(&mut self, artifact: &CompiledArtifact) -> Result<(), RuntimeInjectionError>;

    fn load_asset(&mut self, asset: &AssetRequest);

    /// Synthetic resize so layout-aware widgets measure the fresh mount.
    fn dispatch_resize(&mut self);

    /// Acquire (`true`) or release (`false`) the window resize listener.
    fn listen_resize(&mut self, enabled: bool);
}

/// Page-level effects requested by the controller.
pub trait Shell: Send + 'static {
    fn navigate(&mut self, route: &str);

    /// Set the editor's controlled value.
    fn seed_editor(&mut self, text: &str);

    fn set_title(&mut self, title: &str);

    fn set_busy(&mut self, busy: bool);

    fn notify(&mut self, error: &PlaygroundError);
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::playground::error::ErrorKind;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SurfaceCall {
        Clear,
        Inject { run: u64, script: String },
        Asset(AssetRequest),
        Resize,
        Listen(bool),
    }

    /// Surface recording every call; clones share the log.
    #[derive(Clone, Default)]
    pub struct RecordingSurface {
        pub calls: Arc<Mutex<Vec<SurfaceCall>>>,
        pub reject_inject: Arc<Mutex<bool>>,
    }

    impl RecordingSurface {
        pub fn calls(&self) -> Vec<SurfaceCall> {
            self.calls.lock().clone()
        }

        /// Runs of every injected artifact, in order.
        pub fn injected(&self) -> Vec<u64> {
            self.calls
                .lock()
                .iter()
                .filter_map(|c| match c {
                    SurfaceCall::Inject { run, .. } => Some(*run),
                    _ => None,
                })
                .collect()
        }
    }

    impl PreviewSurface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.lock().push(SurfaceCall::Clear);
        }

        fn inject(&mut self, artifact: &CompiledArtifact) -> Result<(), RuntimeInjectionError> {
            if *self.reject_inject.lock() {
                return Err(RuntimeInjectionError {
                    run: artifact.run(),
                    message: "surface detached".into(),
                });
            }
            self.calls.lock().push(SurfaceCall::Inject {
                run: artifact.run(),
                script: artifact.script_text.clone(),
            });
            Ok(())
        }

        fn load_asset(&mut self, asset: &AssetRequest) {
            self.calls.lock().push(SurfaceCall::Asset(asset.clone()));
        }

        fn dispatch_resize(&mut self) {
            self.calls.lock().push(SurfaceCall::Resize);
        }

        fn listen_resize(&mut self, enabled: bool) {
            self.calls.lock().push(SurfaceCall::Listen(enabled));
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ShellCall {
        Navigate(String),
        Seed(String),
        Title(String),
        Busy(bool),
        Notify(ErrorKind, String),
    }

    #[derive(Clone, Default)]
    pub struct RecordingShell {
        pub calls: Arc<Mutex<Vec<ShellCall>>>,
    }

    impl RecordingShell {
        pub fn calls(&self) -> Vec<ShellCall> {
            self.calls.lock().clone()
        }

        pub fn notifications(&self) -> Vec<(ErrorKind, String)> {
            self.calls
                .lock()
                .iter()
                .filter_map(|c| match c {
                    ShellCall::Notify(kind, message) => Some((*kind, message.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl Shell for RecordingShell {
        fn navigate(&mut self, route: &str) {
            self.calls.lock().push(ShellCall::Navigate(route.to_string()));
        }

        fn seed_editor(&mut self, text: &str) {
            self.calls.lock().push(ShellCall::Seed(text.to_string()));
        }

        fn set_title(&mut self, title: &str) {
            self.calls.lock().push(ShellCall::Title(title.to_string()));
        }

        fn set_busy(&mut self, busy: bool) {
            self.calls.lock().push(ShellCall::Busy(busy));
        }

        fn notify(&mut self, error: &PlaygroundError) {
            self.calls
                .lock()
                .push(ShellCall::Notify(error.kind(), error.to_string()));
        }
    }
}
