//! Preview runtime: owns the mount surface and the current run.
//!
//! Each render clears the mount, injects the wrapped artifact and dispatches
//! a synthetic resize. The injected code reports back through its bridge:
//! `setRendering(false)` completes the run, `displayError` fails it. Signals
//! for runs other than the current one are ignored.

use super::artifact::CompiledArtifact;
use super::bridge::AssetRequest;
use super::error::RuntimeInjectionError;
use super::surface::PreviewSurface;

pub struct PreviewRuntime<S> {
    surface: S,
    /// Assets loaded into the surface once, at attach
    preload: Vec<AssetRequest>,
    attached: bool,
    /// Last injected run
    current: Option<u64>,
    /// Current run has not signalled completion yet
    awaiting: bool,
}

impl<S: PreviewSurface> PreviewRuntime<S> {
    pub fn new(surface: S, preload: Vec<AssetRequest>) -> Self {
        Self {
            surface,
            preload,
            attached: false,
            current: None,
            awaiting: false,
        }
    }

    /// Acquire the resize listener and load preload assets.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.surface.listen_resize(true);
        let preload = std::mem::take(&mut self.preload);
        for asset in &preload {
            self.load(asset);
        }
        self.preload = preload;
        self.attached = true;
    }

    /// Release what `attach` acquired.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.surface.listen_resize(false);
        self.attached = false;
    }

    /// Replace the mount content with a fresh run of `artifact`.
    pub fn render(&mut self, artifact: &CompiledArtifact) -> Result<(), RuntimeInjectionError> {
        let run = artifact.run();
        self.surface.clear();

        if let Err(e) = self.surface.inject(artifact) {
            self.current = None;
            self.awaiting = false;
            return Err(e);
        }
        self.current = Some(run);
        self.awaiting = true;

        self.surface.dispatch_resize();
        crate::debug!("preview"; "injected run {}", run);
        Ok(())
    }

    /// Render-complete signal. Returns `true` if `run` was awaited.
    pub fn complete(&mut self, run: u64) -> bool {
        if self.current != Some(run) || !self.awaiting {
            crate::debug!("preview"; "ignoring completion of run {}", run);
            return false;
        }
        self.awaiting = false;
        true
    }

    /// Error thrown by injected code. Errors from stale runs are dropped.
    pub fn fail(&mut self, run: u64, message: String) -> Option<RuntimeInjectionError> {
        if self.current != Some(run) {
            crate::debug!("preview"; "ignoring error of stale run {}: {}", run, message);
            return None;
        }
        self.awaiting = false;
        Some(RuntimeInjectionError { run, message })
    }

    /// Load a script or stylesheet into the surface.
    pub fn load(&mut self, asset: &AssetRequest) {
        self.surface.load_asset(asset);
    }

    pub fn resize(&mut self) {
        self.surface.dispatch_resize();
    }

    /// Waiting for the current run to signal completion.
    pub const fn is_rendering(&self) -> bool {
        self.awaiting
    }

    pub const fn current_run(&self) -> Option<u64> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playground::surface::fake::{RecordingSurface, SurfaceCall};

    fn artifact(run: u64) -> CompiledArtifact {
        CompiledArtifact {
            script_text: format!("/* run {run} */"),
            request_id: run,
        }
    }

    #[test]
    fn test_attach_and_detach_are_symmetric() {
        let surface = RecordingSurface::default();
        let css = AssetRequest::Style("https://cdn/antd.css".into());
        let mut runtime = PreviewRuntime::new(surface.clone(), vec![css.clone()]);

        runtime.attach();
        runtime.attach();
        runtime.detach();
        runtime.detach();

        assert_eq!(
            surface.calls(),
            [
                SurfaceCall::Listen(true),
                SurfaceCall::Asset(css),
                SurfaceCall::Listen(false),
            ]
        );
    }

    #[test]
    fn test_preload_repeats_after_reattach() {
        let surface = RecordingSurface::default();
        let js = AssetRequest::Script("https://cdn/lodash.js".into());
        let mut runtime = PreviewRuntime::new(surface.clone(), vec![js.clone()]);

        runtime.attach();
        runtime.detach();
        runtime.attach();
        runtime.load(&AssetRequest::InlineStyle("body{}".into()));

        let assets: Vec<_> = surface
            .calls()
            .into_iter()
            .filter(|c| matches!(c, SurfaceCall::Asset(_)))
            .collect();
        assert_eq!(
            assets,
            [
                SurfaceCall::Asset(js.clone()),
                SurfaceCall::Asset(js),
                SurfaceCall::Asset(AssetRequest::InlineStyle("body{}".into())),
            ]
        );
    }

    #[test]
    fn test_render_clears_injects_resizes() {
        let surface = RecordingSurface::default();
        let mut runtime = PreviewRuntime::new(surface.clone(), Vec::new());

        runtime.render(&artifact(1)).unwrap();
        assert_eq!(
            surface.calls(),
            [
                SurfaceCall::Clear,
                SurfaceCall::Inject {
                    run: 1,
                    script: "/* run 1 */".into()
                },
                SurfaceCall::Resize,
            ]
        );
        assert!(runtime.is_rendering());
        assert_eq!(runtime.current_run(), Some(1));
    }

    #[test]
    fn test_only_current_run_completes() {
        let mut runtime = PreviewRuntime::new(RecordingSurface::default(), Vec::new());
        runtime.render(&artifact(1)).unwrap();
        runtime.render(&artifact(2)).unwrap();

        assert!(!runtime.complete(1));
        assert!(runtime.is_rendering());
        assert!(runtime.complete(2));
        assert!(!runtime.complete(2));
        assert!(!runtime.is_rendering());
    }

    #[test]
    fn test_fail_ignores_stale_runs() {
        let mut runtime = PreviewRuntime::new(RecordingSurface::default(), Vec::new());
        runtime.render(&artifact(1)).unwrap();
        runtime.render(&artifact(2)).unwrap();

        assert!(runtime.fail(1, "old".into()).is_none());
        let err = runtime.fail(2, "boom".into()).unwrap();
        assert_eq!(err.run, 2);
        assert!(!runtime.is_rendering());
    }

    #[test]
    fn test_errors_after_completion_still_reported() {
        let mut runtime = PreviewRuntime::new(RecordingSurface::default(), Vec::new());
        runtime.render(&artifact(3)).unwrap();
        assert!(runtime.complete(3));
        assert!(runtime.fail(3, "timer threw".into()).is_some());
    }

    #[test]
    fn test_rejected_inject_leaves_no_current_run() {
        let surface = RecordingSurface::default();
        *surface.reject_inject.lock() = true;
        let mut runtime = PreviewRuntime::new(surface.clone(), Vec::new());

        assert!(runtime.render(&artifact(1)).is_err());
        assert_eq!(runtime.current_run(), None);
        assert!(!runtime.is_rendering());
        assert_eq!(surface.calls(), [SurfaceCall::Clear]);
    }
}
