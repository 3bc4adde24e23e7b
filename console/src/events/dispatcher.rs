// File: console/src/events/dispatcher.rs
//
// Routes terminal operation events to the callbacks registered in the event queue
//
use tracing::{debug, info, warn};

use super::{OperationEvent, OperationStatus};
use crate::constants::messages;
use crate::event_queue::EventQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Event was not terminal; the operation is still in flight
    NotTerminal,
    /// Nothing registered for the id (late, duplicate, or never registered)
    Unregistered,
    Succeeded,
    Failed,
}

#[derive(Clone)]
pub struct EventDispatcher {
    event_queue: EventQueue,
}

impl EventDispatcher {
    pub fn new(event_queue: EventQueue) -> Self {
        Self { event_queue }
    }

    /// Invoke the callbacks registered for the event's operation, then drop
    /// the registration. Unknown ids are ignored.
    pub async fn dispatch(&self, event: OperationEvent) -> DispatchOutcome {
        if !event.status.is_terminal() {
            debug!(
                "Operation {} is {:?}, waiting for a terminal status",
                event.operation_id, event.status
            );
            return DispatchOutcome::NotTerminal;
        }

        let operation_id = event.operation_id.clone();
        let Some(callbacks) = self.event_queue.get(&operation_id).await else {
            debug!(
                "No callbacks registered for operation {}, ignoring {:?} event",
                operation_id, event.status
            );
            return DispatchOutcome::Unregistered;
        };

        let outcome = match event.status {
            OperationStatus::Success => {
                info!("Operation {} succeeded", operation_id);
                (callbacks.on_success)(event).await;
                DispatchOutcome::Succeeded
            }
            _ => {
                let message = event
                    .error
                    .clone()
                    .unwrap_or_else(|| messages::UNKNOWN_OPERATION_ERROR.to_string());
                warn!("Operation {} ended with {:?}: {}", operation_id, event.status, message);
                (callbacks.on_failure)(message).await;
                DispatchOutcome::Failed
            }
        };

        if let Some(on_finish) = &callbacks.on_finish {
            on_finish().await;
        }

        self.event_queue.remove(&operation_id).await;
        outcome
    }
}
