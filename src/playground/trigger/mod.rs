//! Debounced Trigger
//!
//! Watches a value and invokes an async action when it settles.
//!
//! Architecture:
//! ```text
//! watch(value) → Schedule (pure timing) → Generation → action(value, generation)
//! ```
//!
//! Every invocation carries a [`Generation`]. With `cancel` set, starting an
//! invocation makes all earlier generations stale; the action is expected to
//! check [`Generation::is_current`] before applying its result. A running
//! action is never preempted.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

// Pure timing and coalescing.
mod timing;


use timing::Schedule;

/// Scheduling options, each independently recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Quiet period required before firing; every change resets it
    pub debounce: Duration,
    /// Minimum interval between two invocations; changes do not reset it
    pub throttle: Option<Duration>,
    /// Newer invocations make older generations stale
    pub cancel: bool,
    /// Pending values are replaced instead of queued
    pub singleton: bool,
    /// Fire once with the initial value at spawn
    pub initial: bool,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            throttle: None,
            cancel: true,
            singleton: true,
            initial: false,
        }
    }
}

/// Shared generation counter of one trigger.
#[derive(Debug)]
pub struct Epoch {
    current: AtomicU64,
    disposed: AtomicBool,
    cancel: bool,
}

impl Epoch {
    fn new(cancel: bool) -> Self {
        Self {
            current: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            cancel,
        }
    }

    fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// Token identifying one invocation.
#[derive(Debug, Clone)]
pub struct Generation {
    id: u64,
    epoch: Arc<Epoch>,
}

impl Generation {
    /// Monotonically increasing invocation id, starting at 1.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Whether results of this invocation may still be applied.
    pub fn is_current(&self) -> bool {
        if self.epoch.is_disposed() {
            return false;
        }
        !self.epoch.cancel || self.epoch.current.load(Ordering::SeqCst) == self.id
    }
}

enum TriggerMsg<T> {
    Watch(T),
    Flush(T),
    Dispose,
}

/// Handle to a running trigger task. Dropping it disposes the trigger.
pub struct Trigger<T> {
    tx: mpsc::UnboundedSender<TriggerMsg<T>>,
    epoch: Arc<Epoch>,
}

impl<T> Trigger<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    /// Start the trigger task on the current tokio runtime.
    pub fn spawn<F, Fut>(options: TriggerOptions, action: F, initial: T) -> Self
    where
        F: Fn(T, Generation) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let epoch = Arc::new(Epoch::new(options.cancel));

        let actor = TriggerActor {
            rx,
            schedule: Schedule::new(&options, initial.clone()),
            epoch: Arc::clone(&epoch),
            action,
        };
        tokio::spawn(actor.run(options.initial.then_some(initial)));

        Self { tx, epoch }
    }

    /// Report the watched value; equal values are ignored.
    pub fn watch(&self, value: T) {
        let _ = self.tx.send(TriggerMsg::Watch(value));
    }

    /// Invoke immediately with a new generation, dropping anything pending.
    pub fn flush(&self, value: T) {
        let _ = self.tx.send(TriggerMsg::Flush(value));
    }

    /// Cancel the pending timer and stale every outstanding generation.
    /// No invocation happens afterwards.
    pub fn dispose(&self) {
        self.epoch.dispose();
        let _ = self.tx.send(TriggerMsg::Dispose);
    }

    pub fn is_disposed(&self) -> bool {
        self.epoch.is_disposed()
    }
}

impl<T> Drop for Trigger<T> {
    fn drop(&mut self) {
        self.epoch.dispose();
        let _ = self.tx.send(TriggerMsg::Dispose);
    }
}

struct TriggerActor<T, F> {
    rx: mpsc::UnboundedReceiver<TriggerMsg<T>>,
    schedule: Schedule<T>,
    epoch: Arc<Epoch>,
    action: F,
}

impl<T, F, Fut> TriggerActor<T, F>
where
    T: PartialEq + Clone + Send + 'static,
    F: Fn(T, Generation) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn run(mut self, initial: Option<T>) {
        if let Some(value) = initial {
            self.invoke(value);
        }

        loop {
            let sleep = self.schedule.sleep_duration(Instant::now());
            let timer = async {
                match sleep {
                    Some(duration) => tokio::time::sleep(duration).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                biased;
                msg = self.rx.recv() => match msg {
                    Some(TriggerMsg::Watch(value)) => {
                        self.schedule.observe(value, Instant::now());
                    }
                    Some(TriggerMsg::Flush(value)) => {
                        self.schedule.flush(&value, Instant::now());
                        self.invoke(value);
                    }
                    Some(TriggerMsg::Dispose) | None => break,
                },
                _ = timer => {
                    while let Some(value) = self.schedule.take_due(Instant::now()) {
                        self.invoke(value);
                    }
                }
            }
        }

        self.schedule.clear();
        self.epoch.dispose();
        crate::debug!("trigger"; "disposed");
    }

    fn invoke(&self, value: T) {
        if self.epoch.is_disposed() {
            return;
        }
        let id = self.epoch.advance();
        crate::debug!("trigger"; "invoke generation {}", id);

        let generation = Generation {
            id,
            epoch: Arc::clone(&self.epoch),
        };
        tokio::spawn((self.action)(value, generation));
    }
}
