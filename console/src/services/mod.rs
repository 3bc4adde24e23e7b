// File: console/src/services/mod.rs

pub mod instance_service;
pub mod member_service;
pub mod warning_service;

pub use instance_service::InstanceService;
pub use member_service::MemberService;
pub use warning_service::WarningService;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::error;

use crate::bulk::{BulkCollector, BulkItem};
use crate::errors::{ConsoleError, ConsoleResult};
use crate::event_queue::EventCallbacks;
use crate::loading::LoadingRegistry;
use crate::notify::{NotificationAction, Notifier};

/// Run an action on its own task. Dropping the returned future does not
/// cancel the action, so loading state is always released and the outcome
/// always reported.
pub(crate) async fn run_detached<F, T>(action: F) -> ConsoleResult<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(action).await.map_err(|e| {
        error!("Action task ended abnormally: {}", e);
        ConsoleError::Other(format!("Action task ended abnormally: {}", e))
    })
}

/// Callbacks for a single tracked action: release the entity's loading
/// state, then report the outcome through the notifier.
pub(crate) fn notifying_callbacks<T>(
    registry: LoadingRegistry<T>,
    notifier: Notifier,
    entity: &str,
    success_message: String,
    failure_title: String,
    failure_actions: Vec<NotificationAction>,
) -> EventCallbacks
where
    T: Copy + fmt::Display + Send + Sync + 'static,
{
    let success_registry = registry.clone();
    let success_notifier = notifier.clone();
    let success_entity = entity.to_string();
    let failure_entity = entity.to_string();

    EventCallbacks::new(
        move |_event| {
            let registry = success_registry.clone();
            let notifier = success_notifier.clone();
            let entity = success_entity.clone();
            let message = success_message.clone();
            async move {
                registry.set_finish(&entity).await;
                notifier.success(&message);
            }
        },
        move |error: String| {
            let registry = registry.clone();
            let notifier = notifier.clone();
            let entity = failure_entity.clone();
            let title = failure_title.clone();
            let actions = failure_actions.clone();
            async move {
                registry.set_finish(&entity).await;
                notifier.failure(&title, Some(&error), None, actions);
            }
        },
    )
}

/// Callbacks for one item of a bulk action: release the loading state and
/// report the outcome into the batch instead of the notifier.
pub(crate) fn collecting_callbacks<T>(
    registry: LoadingRegistry<T>,
    collector: Arc<BulkCollector>,
    item: BulkItem,
) -> EventCallbacks
where
    T: Copy + fmt::Display + Send + Sync + 'static,
{
    let success_registry = registry.clone();
    let success_collector = collector.clone();
    let success_item = item.clone();

    EventCallbacks::new(
        move |_event| {
            let registry = success_registry.clone();
            let collector = success_collector.clone();
            let item = success_item.clone();
            async move {
                registry.set_finish(&item.name).await;
                collector.report_success(item).await;
            }
        },
        move |error: String| {
            let registry = registry.clone();
            let collector = collector.clone();
            let item = item.clone();
            async move {
                registry.set_finish(&item.name).await;
                collector.report_failure(error, item).await;
            }
        },
    )
}
