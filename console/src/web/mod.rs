// File: console/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::correlation::CorrelationService;
use crate::errors::ConsoleResult;
use crate::events::{EventDispatcher, OperationPoller};
use crate::http::LxdClient;
use crate::loading::{InstanceLoadingType, LoadingEntry, MemberLoadingType};
use crate::services::{InstanceService, MemberService, WarningService};

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub correlation: CorrelationService,
    pub instance_service: Arc<InstanceService>,
    pub member_service: Arc<MemberService>,
    pub warning_service: Arc<WarningService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        correlation: CorrelationService,
        instance_service: Arc<InstanceService>,
        member_service: Arc<MemberService>,
        warning_service: Arc<WarningService>,
    ) -> Self {
        Self {
            config,
            correlation,
            instance_service,
            member_service,
            warning_service,
        }
    }

    /// Wire the daemon client, poller and services around one shared
    /// correlation state.
    pub fn from_config(config: Arc<Config>) -> ConsoleResult<Self> {
        let correlation = CorrelationService::new();
        let client = Arc::new(LxdClient::new(&config)?);
        let dispatcher = EventDispatcher::new(correlation.event_queue.clone());
        let poller = OperationPoller::new(&config, client.clone(), dispatcher);

        let instance_service = Arc::new(InstanceService::new(
            config.clone(),
            client.clone(),
            correlation.clone(),
            poller.clone(),
        ));
        let member_service = Arc::new(MemberService::new(
            client.clone(),
            correlation.clone(),
            poller,
        ));
        let warning_service = Arc::new(WarningService::new(client, correlation.clone()));

        Ok(Self::new(
            config,
            correlation,
            instance_service,
            member_service,
            warning_service,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InFlightOperations {
    pub operation_ids: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadingState {
    pub instances: HashMap<String, LoadingEntry<InstanceLoadingType>>,
    pub members: HashMap<String, LoadingEntry<MemberLoadingType>>,
}
