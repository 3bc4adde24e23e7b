// File: console/src/services/instance_service.rs
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use super::{collecting_callbacks, notifying_callbacks, run_detached};
use crate::bulk::{BulkCollector, BulkItem, BulkReport};
use crate::config::Config;
use crate::correlation::CorrelationService;
use crate::errors::ConsoleResult;
use crate::events::OperationPoller;
use crate::http::responses::InstanceStateAction;
use crate::http::LxdClient;
use crate::loading::InstanceLoadingType;
use crate::notify::NotificationAction;

impl InstanceStateAction {
    pub fn loading_type(&self) -> InstanceLoadingType {
        match self {
            InstanceStateAction::Start => InstanceLoadingType::Starting,
            InstanceStateAction::Stop => InstanceLoadingType::Stopping,
            InstanceStateAction::Restart => InstanceLoadingType::Restarting,
            InstanceStateAction::Freeze => InstanceLoadingType::Freezing,
            InstanceStateAction::Unfreeze => InstanceLoadingType::Unfreezing,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            InstanceStateAction::Start => "start",
            InstanceStateAction::Stop => "stop",
            InstanceStateAction::Restart => "restart",
            InstanceStateAction::Freeze => "freeze",
            InstanceStateAction::Unfreeze => "unfreeze",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            InstanceStateAction::Start => "started",
            InstanceStateAction::Stop => "stopped",
            InstanceStateAction::Restart => "restarted",
            InstanceStateAction::Freeze => "frozen",
            InstanceStateAction::Unfreeze => "unfrozen",
        }
    }
}

pub fn instance_href(project: &str, name: &str) -> String {
    format!("/ui/project/{}/instance/{}", project, name)
}

fn view_instance_action(project: &str, name: &str) -> NotificationAction {
    NotificationAction {
        label: "View instance".to_string(),
        href: Some(instance_href(project, name)),
    }
}

#[derive(Clone)]
pub struct InstanceService {
    config: Arc<Config>,
    client: Arc<LxdClient>,
    correlation: CorrelationService,
    poller: OperationPoller,
}

impl InstanceService {
    pub fn new(
        config: Arc<Config>,
        client: Arc<LxdClient>,
        correlation: CorrelationService,
        poller: OperationPoller,
    ) -> Self {
        Self {
            config,
            client,
            correlation,
            poller,
        }
    }

    pub async fn start(&self, name: &str, project: Option<&str>) -> ConsoleResult<String> {
        self.change_state(name, project, InstanceStateAction::Start).await
    }

    pub async fn stop(&self, name: &str, project: Option<&str>) -> ConsoleResult<String> {
        self.change_state(name, project, InstanceStateAction::Stop).await
    }

    pub async fn restart(&self, name: &str, project: Option<&str>) -> ConsoleResult<String> {
        self.change_state(name, project, InstanceStateAction::Restart).await
    }

    pub async fn freeze(&self, name: &str, project: Option<&str>) -> ConsoleResult<String> {
        self.change_state(name, project, InstanceStateAction::Freeze).await
    }

    pub async fn unfreeze(&self, name: &str, project: Option<&str>) -> ConsoleResult<String> {
        self.change_state(name, project, InstanceStateAction::Unfreeze).await
    }

    /// Request a state change and track it until the daemon reports the end.
    /// Returns the operation id once the daemon has accepted the request.
    pub async fn change_state(
        &self,
        name: &str,
        project: Option<&str>,
        action: InstanceStateAction,
    ) -> ConsoleResult<String> {
        let service = self.clone();
        let name = name.to_string();
        let project = project
            .unwrap_or(self.config.default_project.as_str())
            .to_string();

        run_detached(async move { service.request_state_change(&name, &project, action).await })
            .await?
    }

    async fn request_state_change(
        &self,
        name: &str,
        project: &str,
        action: InstanceStateAction,
    ) -> ConsoleResult<String> {
        let loading = &self.correlation.instance_loading;
        let notifier = &self.correlation.notifier;
        let failure_title = format!("Instance {} failed", action.verb());

        loading.set_loading(name, action.loading_type()).await;

        let operation_id = match self
            .client
            .change_instance_state(name, project, action, false)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!("Instance {} {} rejected: {}", name, action.verb(), e);
                loading.set_finish(name).await;
                notifier.failure(
                    &failure_title,
                    Some(&e),
                    None,
                    vec![view_instance_action(project, name)],
                );
                return Err(e);
            }
        };

        let callbacks = notifying_callbacks(
            loading.clone(),
            notifier.clone(),
            name,
            format!("Instance {} {}.", name, action.past_tense()),
            failure_title,
            vec![view_instance_action(project, name)],
        );
        if let Err(e) = self.correlation.event_queue.set(&operation_id, callbacks).await {
            loading.set_finish(name).await;
            return Err(e);
        }
        self.poller.watch(operation_id.clone());

        info!(
            "Instance {} {} accepted as operation {}",
            name,
            action.verb(),
            operation_id
        );
        Ok(operation_id)
    }

    /// Apply one action to many instances and wait until every instance has
    /// an outcome. Posts a summary notification and returns the full report.
    /// The batch keeps running if the caller stops waiting.
    pub async fn bulk_change_state(
        &self,
        names: &[String],
        project: Option<&str>,
        action: InstanceStateAction,
    ) -> ConsoleResult<BulkReport> {
        let service = self.clone();
        let names = names.to_vec();
        let project = project
            .unwrap_or(self.config.default_project.as_str())
            .to_string();

        run_detached(async move { service.run_bulk(&names, &project, action).await }).await
    }

    async fn run_bulk(
        &self,
        names: &[String],
        project: &str,
        action: InstanceStateAction,
    ) -> BulkReport {
        let (collector, done) = BulkCollector::new(names.len());

        info!("Bulk {} of {} instances", action.verb(), names.len());

        let requests = names.iter().map(|name| {
            let item = BulkItem::new(name, "instance", &instance_href(project, name));
            self.track_bulk_item(item, project, action, collector.clone())
        });
        join_all(requests).await;

        let results = done.await.unwrap_or_default();
        let report = BulkReport::new(results, action.past_tense(), "instance");
        self.notify_bulk(&report, action);
        report
    }

    async fn track_bulk_item(
        &self,
        item: BulkItem,
        project: &str,
        action: InstanceStateAction,
        collector: Arc<BulkCollector>,
    ) {
        let loading = &self.correlation.instance_loading;
        loading.set_loading(&item.name, action.loading_type()).await;

        let operation_id = match self
            .client
            .change_instance_state(&item.name, project, action, false)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                loading.set_finish(&item.name).await;
                collector.report_failure(e.message(), item).await;
                return;
            }
        };

        let callbacks = collecting_callbacks(loading.clone(), collector.clone(), item.clone());
        if let Err(e) = self
            .correlation
            .event_queue
            .set(&operation_id, callbacks)
            .await
        {
            loading.set_finish(&item.name).await;
            collector.report_failure(e.message(), item).await;
            return;
        }
        self.poller.watch(operation_id);
    }

    fn notify_bulk(&self, report: &BulkReport, action: InstanceStateAction) {
        let notifier = &self.correlation.notifier;
        let title = format!("Instance {} failed", action.verb());

        if report.counts.rejected_count == 0 {
            notifier.success(&report.summary);
        } else if report.all_failed() {
            notifier.failure(&title, None, Some(report.summary.as_str()), Vec::new());
        } else {
            notifier.caution(&report.summary, Some(title.as_str()));
        }
    }
}
