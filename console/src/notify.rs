//! Single-slot user notification state
//!
//! The console shows at most one notification at a time. Setting a
//! notification equal to the current one is a no-op, so repeatedly reporting
//! the same failure (e.g. on every polling tick) does not wake observers.
//!
//! A notification can also be queued into navigation state, letting the next
//! view start with it as its initial notification.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::errors::ErrorMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Positive,
    Negative,
    Information,
    Caution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

/// Navigation state carrying a notification across a route change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub state: QueuedState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedState {
    pub queued_notification: Notification,
}

#[derive(Clone)]
pub struct Notifier {
    current: Arc<watch::Sender<Option<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_initial(None)
    }

    /// Notifier for a view reached through navigation; a queued
    /// notification becomes the initial one.
    pub fn from_navigation(state: Option<&NavigationState>) -> Self {
        Self::with_initial(state.map(|s| s.state.queued_notification.clone()))
    }

    fn with_initial(initial: Option<Notification>) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current: Arc::new(current),
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.borrow().clone()
    }

    /// Observers are woken only when the visible notification changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.current.subscribe()
    }

    /// Replace the current notification unless it is identical.
    /// Returns whether anything changed.
    pub fn set(&self, notification: Notification) -> bool {
        let changed = self.current.send_if_modified(|current| {
            if current.as_ref() == Some(&notification) {
                return false;
            }
            *current = Some(notification.clone());
            true
        });
        if !changed {
            debug!("Skipped duplicate {:?} notification", notification.kind);
        }
        changed
    }

    pub fn failure(
        &self,
        title: &str,
        error: Option<&dyn ErrorMessage>,
        message: Option<&str>,
        actions: Vec<NotificationAction>,
    ) -> Notification {
        let error_text = error.map(|e| e.error_message());
        let text = [message.map(str::to_string), error_text]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let notification = Notification {
            kind: NotificationKind::Negative,
            message: text,
            title: Some(title.to_string()),
            actions,
        };
        self.set(notification.clone());
        notification
    }

    pub fn info(&self, message: &str, title: Option<&str>) -> Notification {
        self.build(NotificationKind::Information, message, title)
    }

    pub fn caution(&self, message: &str, title: Option<&str>) -> Notification {
        self.build(NotificationKind::Caution, message, title)
    }

    pub fn success(&self, message: &str) -> Notification {
        self.build(NotificationKind::Positive, message, None)
    }

    pub fn clear(&self) {
        self.current.send_if_modified(|current| current.take().is_some());
    }

    /// Wrap a notification so a route change can carry it to the next view
    pub fn queue(notification: Notification) -> NavigationState {
        NavigationState {
            state: QueuedState {
                queued_notification: notification,
            },
        }
    }

    fn build(&self, kind: NotificationKind, message: &str, title: Option<&str>) -> Notification {
        let notification = Notification {
            kind,
            message: message.to_string(),
            title: title.map(str::to_string),
            actions: Vec::new(),
        };
        self.set(notification.clone());
        notification
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
