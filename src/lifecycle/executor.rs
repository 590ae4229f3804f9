//! OperationExecutor - loading/error plumbing around a unit of async work.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use futures::FutureExt;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

use super::state::{LifecycleSnapshot, OperationState};

/// Message shown when the caller does not supply one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred";

const TRANSITION_CAPACITY: usize = 64;

const CANCELLED_DETAIL: &str = "operation cancelled before it finished";

/// Runs units of work and tracks their lifecycle.
///
/// Every `execute` publishes `Loading`, then exactly one of `Succeeded` or
/// `Failed`. Failures (errors and panics) are captured into the state and
/// never reach the caller, who gets `None` instead. Dropping the `execute`
/// future before the work finishes also publishes `Failed`.
///
/// No lock is held while the work runs. Overlapping `execute` calls on one
/// executor interleave their transitions; the owner must not start a new
/// operation while [`is_loading`](Self::is_loading) is true.
///
/// # Example
///
/// ```ignore
/// let lifecycle = OperationExecutor::new();
/// let events = lifecycle
///     .execute_with_message(|| calendar.events(None, None), "Could not load events")
///     .await
///     .unwrap_or_default();
/// if lifecycle.has_error() {
///     render_error(&lifecycle.snapshot());
/// }
/// ```
pub struct OperationExecutor {
    state: watch::Sender<OperationState>,
    transitions: broadcast::Sender<OperationState>,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl Default for OperationExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationExecutor {
    pub fn new() -> Self {
        let (state, _) = watch::channel(OperationState::Idle);
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            state,
            transitions,
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Run `operation` with the default failure message.
    pub async fn execute<T, E, F, Fut>(&self, operation: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug,
    {
        self.execute_with_message(operation, DEFAULT_FAILURE_MESSAGE)
            .await
    }

    /// Run `operation`; on failure show `failure_message` to the user.
    pub async fn execute_with_message<T, E, F, Fut>(
        &self,
        operation: F,
        failure_message: &str,
    ) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug,
    {
        self.publish(OperationState::Loading);
        let mut pending = Pending {
            executor: self,
            failure_message,
            settled: false,
        };

        let outcome = AssertUnwindSafe(async move { operation().await })
            .catch_unwind()
            .await;
        pending.settled = true;

        match outcome {
            Ok(Ok(value)) => {
                self.publish(OperationState::Succeeded);
                Some(value)
            }
            Ok(Err(err)) => {
                self.fail(failure_message, format!("{err:?}"));
                None
            }
            Err(payload) => {
                self.fail(failure_message, panic_detail(payload.as_ref()));
                None
            }
        }
    }

    pub fn state(&self) -> OperationState {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn has_error(&self) -> bool {
        self.state.borrow().has_error()
    }

    pub fn error_message(&self) -> String {
        self.state.borrow().error_message().to_string()
    }

    pub fn error_detail(&self) -> String {
        self.state.borrow().error_detail().to_string()
    }

    /// Receiver that is notified whenever the state changes. Holds only the
    /// latest state; use [`transitions`](Self::transitions) to see every step.
    pub fn subscribe(&self) -> watch::Receiver<OperationState> {
        self.state.subscribe()
    }

    /// Every transition published after this call, in order.
    pub fn transitions(&self) -> broadcast::Receiver<OperationState> {
        self.transitions.subscribe()
    }

    /// Register a listener for a lifecycle event: "loading", "succeeded" or
    /// "failed". Failed listeners receive the user-facing message.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(event, listener);
        }
    }

    fn fail(&self, message: &str, detail: String) {
        warn!(failure = message, detail = %detail, "operation failed");
        self.publish(OperationState::Failed {
            message: message.to_string(),
            detail,
        });
    }

    fn publish(&self, next: OperationState) {
        trace!(state = next.name(), "lifecycle transition");

        #[cfg(feature = "emitter")]
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(next.name(), next.error_message().to_string());
        }

        // No subscribers is fine.
        let _ = self.transitions.send(next.clone());
        self.state.send_replace(next);
    }
}

/// Publishes a failure if the `execute` future is dropped before the work
/// finishes, so watchers never stay on `Loading`.
struct Pending<'a> {
    executor: &'a OperationExecutor,
    failure_message: &'a str,
    settled: bool,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let detail = CANCELLED_DETAIL.to_string();
            self.executor.fail(self.failure_message, detail);
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked with a non-string payload".to_string()
    }
}
