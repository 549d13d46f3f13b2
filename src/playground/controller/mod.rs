//! Playground Controller
//!
//! Composition root of one playground session.
//!
//! Architecture:
//! ```text
//! Open ─→ Fetcher ─→ seed editor
//!                        │
//! Edit ─→ Trigger::watch(snapshot) ─→ compile (blocking worker) ─→ Compiled
//!                                                                     │
//!                                     PreviewRuntime::render ←─ current generation?
//! ```
//!
//! The controller is a single tokio task consuming [`ControllerEvent`]s in
//! order. Fetches and compiles run elsewhere and post their results back as
//! events, so every state mutation happens here.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::artifact::{CompilationRequest, CompiledArtifact, compile};
use super::bridge::AssetRequest;
use super::document::{FileKey, SourceDocument};
use super::error::{ErrorKind, FetchError, PlaygroundError, TransformError};
use super::fetch::Fetcher;
use super::index::default_entry;
use super::runtime::PreviewRuntime;
use super::state::{Phase, PreviewState};
use super::surface::{PreviewSurface, Shell};
use super::trigger::{Generation, Trigger, TriggerOptions};
use crate::config::{PlaygroundConfig, TransformConfig};


/// Pseudo key reported when the collection index itself fails.
const INDEX_KEY: &str = "index";

/// Title prefix of the playground page.
const TITLE_PREFIX: &str = "Playground";

/// Everything that can happen to a session.
#[derive(Debug)]
pub enum ControllerEvent {
    /// Page opened with or without a file key
    Open(Option<FileKey>),
    /// Page opened with a key that is not a valid document key
    OpenInvalid { key: String, source: FetchError },
    IndexLoaded(Result<String, FetchError>),
    DocumentLoaded {
        key: FileKey,
        result: Result<String, FetchError>,
    },
    /// Editor value changed
    Edit(String),
    /// Forced re-run of the current text
    Refresh,
    CompileStarted(u64),
    Compiled {
        generation: Generation,
        key: FileKey,
        result: Result<CompiledArtifact, TransformError>,
    },
    /// `setRendering(false)` from injected code
    Rendered(u64),
    /// `displayError` from injected code
    RuntimeError { run: u64, message: String },
    /// Host layout changed
    Resize,
    Dispose,
}

/// Session tuning, usually derived from the loaded config.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    pub trigger: TriggerOptions,
    pub transform: TransformConfig,
    pub preload: Vec<AssetRequest>,
}

impl ControllerOptions {
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        Self {
            trigger: config.preview.trigger_options(),
            transform: config.transform.clone(),
            preload: config
                .bridge
                .preload
                .iter()
                .map(|url| AssetRequest::from_url(url))
                .collect(),
        }
    }
}

/// Value watched by the trigger.
///
/// `revision` increases on every document load, so reloading a document
/// renders again even when its text is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    document: Option<SourceDocument>,
    revision: u64,
}

/// Handle to a running controller. Dropping it disposes the session.
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<ControllerEvent>,
    state: watch::Receiver<PreviewState>,
}

impl ControllerHandle {
    pub fn open(&self, key: Option<FileKey>) {
        self.send(ControllerEvent::Open(key));
    }

    /// Open the document named by a playground route.
    pub fn open_route(&self, route: &str) {
        match FileKey::from_route(route) {
            Ok(key) => self.open(key),
            Err(source) => {
                let key = match &source {
                    FetchError::InvalidKey(raw) => raw.clone(),
                    _ => route.to_string(),
                };
                self.send(ControllerEvent::OpenInvalid { key, source });
            }
        }
    }

    pub fn edit(&self, text: impl Into<String>) {
        self.send(ControllerEvent::Edit(text.into()));
    }

    pub fn refresh(&self) {
        self.send(ControllerEvent::Refresh);
    }

    pub fn rendered(&self, run: u64) {
        self.send(ControllerEvent::Rendered(run));
    }

    pub fn runtime_error(&self, run: u64, message: impl Into<String>) {
        self.send(ControllerEvent::RuntimeError {
            run,
            message: message.into(),
        });
    }

    pub fn resize(&self) {
        self.send(ControllerEvent::Resize);
    }

    pub fn dispose(&self) {
        self.send(ControllerEvent::Dispose);
    }

    /// Latest published preview state.
    pub fn state(&self) -> PreviewState {
        *self.state.borrow()
    }

    fn send(&self, event: ControllerEvent) {
        if self.tx.send(event).is_err() {
            crate::debug!("preview"; "controller already stopped");
        }
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(ControllerEvent::Dispose);
    }
}

/// Start a session on the current tokio runtime.
pub fn spawn<F, S, H>(fetcher: F, surface: S, shell: H, options: ControllerOptions) -> ControllerHandle
where
    F: Fetcher,
    S: PreviewSurface,
    H: Shell,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(PreviewState::new());

    let action_tx = tx.clone();
    let transform = options.transform.clone();
    let trigger = Trigger::spawn(
        options.trigger.clone(),
        move |snapshot: Snapshot, generation: Generation| {
            compile_snapshot(snapshot, generation, action_tx.clone(), transform.clone())
        },
        Snapshot {
            document: None,
            revision: 0,
        },
    );

    let controller = Controller {
        rx,
        tx: tx.clone(),
        fetcher: Arc::new(fetcher),
        shell,
        runtime: PreviewRuntime::new(surface, options.preload),
        trigger,
        state: PreviewState::new(),
        state_tx,
        current_key: None,
        document: None,
        revision: 0,
        loading_index: false,
        fetching: false,
        compiling: None,
        latest_started: 0,
        busy: false,
    };
    tokio::spawn(controller.run());

    ControllerHandle {
        tx,
        state: state_rx,
    }
}

/// Trigger action: compile a snapshot on a blocking worker and post the result.
async fn compile_snapshot(
    snapshot: Snapshot,
    generation: Generation,
    tx: mpsc::UnboundedSender<ControllerEvent>,
    transform: TransformConfig,
) {
    let Some(document) = snapshot.document else {
        return;
    };
    if document.text.is_empty() {
        crate::debug!("preview"; "skipping empty document {}", document.key);
        return;
    }

    let _ = tx.send(ControllerEvent::CompileStarted(generation.id()));

    let key = document.key.clone();
    let request = CompilationRequest::new(&document, generation.id());
    let result = tokio::task::spawn_blocking(move || compile(&request, &transform))
        .await
        .unwrap_or_else(|e| Err(TransformError::Aborted(e.to_string())));

    let _ = tx.send(ControllerEvent::Compiled {
        generation,
        key,
        result,
    });
}

struct Controller<F, S, H> {
    rx: mpsc::UnboundedReceiver<ControllerEvent>,
    tx: mpsc::UnboundedSender<ControllerEvent>,
    fetcher: Arc<F>,
    shell: H,
    runtime: PreviewRuntime<S>,
    trigger: Trigger<Snapshot>,
    state: PreviewState,
    state_tx: watch::Sender<PreviewState>,
    /// Key the page currently shows; results for other keys are dropped
    current_key: Option<FileKey>,
    document: Option<SourceDocument>,
    revision: u64,
    loading_index: bool,
    fetching: bool,
    /// Generation whose compile is in flight
    compiling: Option<u64>,
    /// Newest generation that began compiling
    latest_started: u64,
    /// Last busy value pushed to the shell
    busy: bool,
}

impl<F, S, H> Controller<F, S, H>
where
    F: Fetcher,
    S: PreviewSurface,
    H: Shell,
{
    async fn run(mut self) {
        self.runtime.attach();

        while let Some(event) = self.rx.recv().await {
            if matches!(event, ControllerEvent::Dispose) {
                break;
            }
            self.handle(event);
            self.publish();
        }

        self.trigger.dispose();
        self.runtime.detach();
        crate::debug!("preview"; "session disposed");
    }

    fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Open(key) => self.open(key),
            ControllerEvent::OpenInvalid { key, source } => self.open_invalid(key, source),
            ControllerEvent::IndexLoaded(result) => self.index_loaded(result),
            ControllerEvent::DocumentLoaded { key, result } => self.document_loaded(key, result),
            ControllerEvent::Edit(text) => self.edit(text),
            ControllerEvent::Refresh => {
                if self.document.is_some() {
                    self.trigger.flush(self.snapshot());
                }
            }
            ControllerEvent::CompileStarted(id) => self.compile_started(id),
            ControllerEvent::Compiled {
                generation,
                key,
                result,
            } => self.compiled(generation, key, result),
            ControllerEvent::Rendered(run) => {
                if self.runtime.complete(run) {
                    self.state.clear_error();
                    self.state.enter(Phase::Ready);
                }
            }
            ControllerEvent::RuntimeError { run, message } => {
                if let Some(error) = self.runtime.fail(run, message) {
                    crate::logger::status_error("runtime error", &error.message);
                    self.report(PlaygroundError::from(error));
                    self.state.fail(Phase::Idle, ErrorKind::RuntimeInjection);
                }
            }
            ControllerEvent::Resize => self.runtime.resize(),
            ControllerEvent::Dispose => {}
        }
    }

    fn open(&mut self, key: Option<FileKey>) {
        match key {
            None => {
                self.current_key = None;
                self.loading_index = true;
                self.fetching = true;
                self.state.enter(Phase::LoadingIndex);

                let fetcher = Arc::clone(&self.fetcher);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch_index().await;
                    let _ = tx.send(ControllerEvent::IndexLoaded(result));
                });
            }
            Some(key) => {
                self.loading_index = false;
                self.fetching = true;
                self.current_key = Some(key.clone());
                self.shell.set_title(&format!("{TITLE_PREFIX} - {key}"));
                self.state.enter(Phase::LoadingDocument);

                let fetcher = Arc::clone(&self.fetcher);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch_document(&key).await;
                    let _ = tx.send(ControllerEvent::DocumentLoaded { key, result });
                });
            }
        }
    }

    /// Nothing is fetched; results still in flight for the old key are dropped.
    fn open_invalid(&mut self, key: String, source: FetchError) {
        self.current_key = None;
        self.document = None;
        self.loading_index = false;
        self.fetching = false;
        self.shell.set_title(&format!("{TITLE_PREFIX} - {key}"));
        crate::logger::status_warning(&format!("invalid document key: {key}"));
        self.report(PlaygroundError::Fetch { key, source });
        self.state.fail(Phase::LoadingDocument, ErrorKind::Fetch);
    }

    fn index_loaded(&mut self, result: Result<String, FetchError>) {
        if !self.loading_index {
            crate::debug!("preview"; "dropping stale index");
            return;
        }
        self.loading_index = false;
        self.fetching = false;

        let entry = result.and_then(|text| default_entry(&text).ok_or(FetchError::EmptyIndex));
        match entry {
            Ok(key) => {
                crate::debug!("preview"; "default document {}", key);
                self.shell.navigate(&key.route());
                self.open(Some(key));
            }
            Err(source) => {
                crate::logger::status_warning(&format!("index unavailable: {source}"));
                self.report(PlaygroundError::Fetch {
                    key: INDEX_KEY.to_string(),
                    source,
                });
                self.state.fail(Phase::LoadingIndex, ErrorKind::Fetch);
            }
        }
    }

    fn document_loaded(&mut self, key: FileKey, result: Result<String, FetchError>) {
        if self.current_key.as_ref() != Some(&key) {
            crate::debug!("preview"; "dropping stale document {}", key);
            return;
        }
        self.fetching = false;

        match result {
            Ok(text) => {
                self.shell.seed_editor(&text);
                self.document = Some(SourceDocument::new(key, text));
                self.revision += 1;
                self.state.enter(Phase::Idle);
                self.trigger.watch(self.snapshot());
            }
            Err(source) => {
                crate::logger::status_warning(&format!("failed to load {key}: {source}"));
                self.report(PlaygroundError::Fetch {
                    key: key.to_string(),
                    source,
                });
                self.state.fail(Phase::LoadingDocument, ErrorKind::Fetch);
            }
        }
    }

    fn edit(&mut self, text: String) {
        let Some(document) = self.document.as_mut() else {
            crate::debug!("preview"; "edit before any document loaded");
            return;
        };
        if document.text == text {
            return;
        }
        document.text = text;
        self.trigger.watch(self.snapshot());
    }

    fn compile_started(&mut self, id: u64) {
        if id <= self.latest_started {
            return;
        }
        self.latest_started = id;
        self.compiling = Some(id);
        self.state.enter(Phase::Compiling);
    }

    fn compiled(
        &mut self,
        generation: Generation,
        key: FileKey,
        result: Result<CompiledArtifact, TransformError>,
    ) {
        if self.compiling == Some(generation.id()) {
            self.compiling = None;
        }

        // Newer generations win whatever order the compiles finish in
        let superseded = generation.id() < self.latest_started;
        if superseded || !generation.is_current() || self.current_key.as_ref() != Some(&key) {
            crate::debug!("preview"; "dropping stale generation {}", generation.id());
            if self.compiling.is_none() && self.state.phase == Phase::Compiling {
                self.state.enter(Phase::Idle);
            }
            return;
        }

        match result {
            Ok(artifact) => {
                self.state.enter(Phase::Rendering);
                match self.runtime.render(&artifact) {
                    Ok(()) => crate::logger::status_success(&format!("rendered {key}")),
                    Err(error) => {
                        self.report(PlaygroundError::from(error));
                        self.state.fail(Phase::Idle, ErrorKind::RuntimeInjection);
                    }
                }
            }
            Err(source) => {
                crate::logger::status_error(&format!("compile failed: {key}"), source.detail());
                self.report(PlaygroundError::Transform {
                    key: key.to_string(),
                    source,
                });
                self.state.fail(Phase::Idle, ErrorKind::Transform);
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            revision: self.revision,
        }
    }

    fn report(&mut self, error: PlaygroundError) {
        crate::debug!("preview"; "{} error: {}", error.kind().label(), error);
        self.shell.notify(&error);
    }

    /// Push busy changes to the shell and publish the state.
    fn publish(&mut self) {
        let busy = self.fetching || self.compiling.is_some() || self.runtime.is_rendering();
        if busy != self.busy {
            self.busy = busy;
            self.shell.set_busy(busy);
        }
        self.state_tx.send_replace(self.state);
    }
}
