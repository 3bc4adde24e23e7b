// File: console/src/services/member_service.rs
use std::sync::Arc;
use tracing::{info, warn};

use super::{notifying_callbacks, run_detached};
use crate::correlation::CorrelationService;
use crate::errors::ConsoleResult;
use crate::events::OperationPoller;
use crate::http::responses::MemberStateAction;
use crate::http::LxdClient;
use crate::loading::MemberLoadingType;
use crate::notify::NotificationAction;

impl MemberStateAction {
    pub fn loading_type(&self) -> MemberLoadingType {
        match self {
            MemberStateAction::Evacuate => MemberLoadingType::Evacuating,
            MemberStateAction::Restore => MemberLoadingType::Restoring,
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            MemberStateAction::Evacuate => "evacuation",
            MemberStateAction::Restore => "restore",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            MemberStateAction::Evacuate => "evacuated",
            MemberStateAction::Restore => "restored",
        }
    }
}

pub fn member_href(name: &str) -> String {
    format!("/ui/cluster/member/{}", name)
}

fn view_member_action(name: &str) -> NotificationAction {
    NotificationAction {
        label: "View member".to_string(),
        href: Some(member_href(name)),
    }
}

/// Evacuation and restore of cluster members
#[derive(Clone)]
pub struct MemberService {
    client: Arc<LxdClient>,
    correlation: CorrelationService,
    poller: OperationPoller,
}

impl MemberService {
    pub fn new(client: Arc<LxdClient>, correlation: CorrelationService, poller: OperationPoller) -> Self {
        Self {
            client,
            correlation,
            poller,
        }
    }

    pub async fn evacuate(&self, name: &str) -> ConsoleResult<String> {
        self.change_state(name, MemberStateAction::Evacuate).await
    }

    pub async fn restore(&self, name: &str) -> ConsoleResult<String> {
        self.change_state(name, MemberStateAction::Restore).await
    }

    /// Runs on its own task; the loading entry is released even if the
    /// caller stops waiting.
    pub async fn change_state(&self, name: &str, action: MemberStateAction) -> ConsoleResult<String> {
        let service = self.clone();
        let name = name.to_string();
        run_detached(async move { service.request_state_change(&name, action).await }).await?
    }

    async fn request_state_change(
        &self,
        name: &str,
        action: MemberStateAction,
    ) -> ConsoleResult<String> {
        let loading = &self.correlation.member_loading;
        let notifier = &self.correlation.notifier;
        let failure_title = format!("Member {} failed", action.noun());

        loading.set_loading(name, action.loading_type()).await;

        let operation_id = match self.client.change_member_state(name, action).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Member {} {} rejected: {}", name, action.noun(), e);
                loading.set_finish(name).await;
                notifier.failure(&failure_title, Some(&e), None, vec![view_member_action(name)]);
                return Err(e);
            }
        };

        let callbacks = notifying_callbacks(
            loading.clone(),
            notifier.clone(),
            name,
            format!("Member {} {}.", name, action.past_tense()),
            failure_title,
            vec![view_member_action(name)],
        );
        if let Err(e) = self.correlation.event_queue.set(&operation_id, callbacks).await {
            loading.set_finish(name).await;
            return Err(e);
        }
        self.poller.watch(operation_id.clone());

        info!(
            "Member {} {} accepted as operation {}",
            name,
            action.noun(),
            operation_id
        );
        Ok(operation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wording() {
        assert_eq!(MemberStateAction::Evacuate.loading_type(), MemberLoadingType::Evacuating);
        assert_eq!(MemberStateAction::Restore.past_tense(), "restored");
        assert_eq!(MemberStateAction::Evacuate.noun(), "evacuation");
        assert_eq!(member_href("micro1"), "/ui/cluster/member/micro1");
    }
}
