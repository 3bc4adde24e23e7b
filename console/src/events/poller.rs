// File: console/src/events/poller.rs
//
// Waits on daemon operations and feeds their terminal events to the dispatcher
//
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use super::{DispatchOutcome, EventDispatcher, OperationEvent};
use crate::config::Config;
use crate::constants::polling;
use crate::http::LxdClient;

#[derive(Clone)]
pub struct OperationPoller {
    client: Arc<LxdClient>,
    dispatcher: EventDispatcher,
    wait_timeout_seconds: u64,
    max_consecutive_failures: u32,
}

impl OperationPoller {
    pub fn new(config: &Config, client: Arc<LxdClient>, dispatcher: EventDispatcher) -> Self {
        Self {
            client,
            dispatcher,
            wait_timeout_seconds: config.operation_wait_timeout_seconds,
            max_consecutive_failures: config.max_consecutive_poll_failures,
        }
    }

    /// Follow an operation in the background until it ends
    pub fn watch(&self, operation_id: String) -> JoinHandle<DispatchOutcome> {
        let poller = self.clone();
        tokio::spawn(async move { poller.follow(&operation_id).await })
    }

    /// Wait for the operation's terminal event and dispatch it
    pub async fn follow(&self, operation_id: &str) -> DispatchOutcome {
        let event = self.wait_for_terminal(operation_id).await;
        self.dispatcher.dispatch(event).await
    }

    async fn wait_for_terminal(&self, operation_id: &str) -> OperationEvent {
        let mut consecutive_failures = 0;

        loop {
            match self
                .client
                .wait_operation(operation_id, self.wait_timeout_seconds)
                .await
            {
                Ok(event) if event.status.is_terminal() => {
                    info!("Operation {} reached {:?}", operation_id, event.status);
                    return event;
                }
                Ok(event) => {
                    consecutive_failures = 0;
                    info!(
                        "Operation {} still {:?}, waiting again",
                        operation_id, event.status
                    );
                    sleep(polling::RETRY_DELAY).await;
                }
                Err(e) => {
                    consecutive_failures += 1;
                    warn!(
                        "Failed waiting on operation {}: {} (attempt {}/{})",
                        operation_id, e, consecutive_failures, self.max_consecutive_failures
                    );

                    if consecutive_failures >= self.max_consecutive_failures {
                        // Report as failed so the registration is still released
                        return OperationEvent::failure(
                            operation_id,
                            &format!(
                                "Lost track of operation after {} failed status checks: {}",
                                consecutive_failures,
                                e.message()
                            ),
                        );
                    }
                    sleep(polling::RETRY_DELAY).await;
                }
            }
        }
    }
}
