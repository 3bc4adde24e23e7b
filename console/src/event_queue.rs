//! Correlation of asynchronous daemon operations with their continuations
//!
//! When the daemon accepts an action it answers with an operation id. The
//! caller registers what should happen once that operation ends, and the
//! event dispatcher later looks the id up and runs the matching callback.
//!
//! The queue only stores and hands out callbacks. It never invokes them and
//! never expires them: an entry nobody removes stays registered for the
//! lifetime of the service.
//!
//! # Usage
//!
//! ```ignore
//! queue.set(&operation_id, EventCallbacks::new(on_success, on_failure)).await?;
//!
//! // later, from the dispatcher
//! if let Some(callbacks) = queue.get(&operation_id).await {
//!     (callbacks.on_success)(event).await;
//!     queue.remove(&operation_id).await;
//! }
//! ```

use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, instrument};

use crate::errors::{ConsoleError, ConsoleResult};
use crate::events::OperationEvent;

pub type SuccessCallback = Box<dyn Fn(OperationEvent) -> BoxFuture<'static, ()> + Send + Sync>;
pub type FailureCallback = Box<dyn Fn(String) -> BoxFuture<'static, ()> + Send + Sync>;
pub type FinishCallback = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

pub struct EventCallbacks {
    pub on_success: SuccessCallback,
    pub on_failure: FailureCallback,
    pub on_finish: Option<FinishCallback>,
}

impl EventCallbacks {
    pub fn new<S, SFut, F, FFut>(on_success: S, on_failure: F) -> Self
    where
        S: Fn(OperationEvent) -> SFut + Send + Sync + 'static,
        SFut: Future<Output = ()> + Send + 'static,
        F: Fn(String) -> FFut + Send + Sync + 'static,
        FFut: Future<Output = ()> + Send + 'static,
    {
        Self {
            on_success: Box::new(move |event| on_success(event).boxed()),
            on_failure: Box::new(move |message| on_failure(message).boxed()),
            on_finish: None,
        }
    }

    /// Runs after either outcome callback
    pub fn with_finish<N, NFut>(mut self, on_finish: N) -> Self
    where
        N: Fn() -> NFut + Send + Sync + 'static,
        NFut: Future<Output = ()> + Send + 'static,
    {
        self.on_finish = Some(Box::new(move || on_finish().boxed()));
        self
    }
}

impl fmt::Debug for EventCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCallbacks")
            .field("on_finish", &self.on_finish.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct EventQueue {
    entries: Arc<RwLock<HashMap<String, Arc<EventCallbacks>>>>, // operation_id -> callbacks
    invalidation: Arc<watch::Sender<u64>>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (invalidation, _) = watch::channel(0);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            invalidation: Arc::new(invalidation),
        }
    }

    /// Register callbacks for an operation. A second registration for the
    /// same id replaces the first.
    #[instrument(skip(self, callbacks), fields(operation = %operation_id))]
    pub async fn set(&self, operation_id: &str, callbacks: EventCallbacks) -> ConsoleResult<()> {
        if operation_id.is_empty() {
            return Err(ConsoleError::invalid_input(
                "operation_id",
                "operation id must not be empty",
            ));
        }

        let replaced = {
            let mut entries = self.entries.write().await;
            entries
                .insert(operation_id.to_string(), Arc::new(callbacks))
                .is_some()
        };

        if replaced {
            debug!("Replaced callbacks for operation {}", operation_id);
        } else {
            debug!("Registered callbacks for operation {}", operation_id);
        }
        self.invalidate();
        Ok(())
    }

    /// Callbacks registered for an operation, `None` when unknown
    pub async fn get(&self, operation_id: &str) -> Option<Arc<EventCallbacks>> {
        let entries = self.entries.read().await;
        entries.get(operation_id).cloned()
    }

    /// Drop the registration for an operation. Removing an unknown id is a no-op.
    #[instrument(skip(self), fields(operation = %operation_id))]
    pub async fn remove(&self, operation_id: &str) {
        let removed = {
            let mut entries = self.entries.write().await;
            entries.remove(operation_id).is_some()
        };
        if removed {
            debug!("Removed callbacks for operation {}", operation_id);
        }
        self.invalidate();
    }

    pub async fn operation_ids(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        let mut ids: Vec<String> = entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Receiver that changes every time the set of in-flight operations may
    /// have changed. Observers re-query on change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.invalidation.subscribe()
    }

    fn invalidate(&self) {
        self.invalidation.send_modify(|generation| *generation += 1);
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
