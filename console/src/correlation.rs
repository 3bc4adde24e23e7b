//! Shared correlation state for the console
//!
//! Owns the event queue, the notifier and both loading registries. One
//! instance is built at startup and cloned into every service and handler;
//! tests build a fresh one each.

use crate::event_queue::EventQueue;
use crate::loading::{InstanceLoading, MemberLoading};
use crate::notify::{NavigationState, Notifier};

#[derive(Clone, Default)]
pub struct CorrelationService {
    pub event_queue: EventQueue,
    pub notifier: Notifier,
    pub instance_loading: InstanceLoading,
    pub member_loading: MemberLoading,
}

impl CorrelationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Correlation state for a view reached with queued navigation state
    pub fn with_navigation(state: Option<&NavigationState>) -> Self {
        Self {
            notifier: Notifier::from_navigation(state),
            ..Self::default()
        }
    }
}
