//! In-progress action tracking per entity
//!
//! Records which asynchronous action is outstanding for an instance or a
//! cluster member so the console can render busy affordances. Only one action
//! per entity is representable: a later `set_loading` overwrites the earlier
//! one, and the earlier action's completion then clears the newer indicator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstanceLoadingType {
    Starting,
    Stopping,
    Restarting,
    Freezing,
    Unfreezing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberLoadingType {
    Evacuating,
    Restoring,
}

impl fmt::Display for InstanceLoadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for MemberLoadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadingEntry<T> {
    pub loading_type: T,
    pub started_at: DateTime<Utc>,
}

pub struct LoadingRegistry<T> {
    entries: Arc<RwLock<HashMap<String, LoadingEntry<T>>>>, // entity name -> outstanding action
}

pub type InstanceLoading = LoadingRegistry<InstanceLoadingType>;
pub type MemberLoading = LoadingRegistry<MemberLoadingType>;

impl<T> LoadingRegistry<T>
where
    T: Copy + fmt::Display + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[instrument(skip_all, fields(entity = %entity_key, action = %loading_type))]
    pub async fn set_loading(&self, entity_key: &str, loading_type: T) {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(
            entity_key.to_string(),
            LoadingEntry {
                loading_type,
                started_at: Utc::now(),
            },
        );
        if let Some(previous) = previous {
            debug!(
                "{} overwrites outstanding {} on {}",
                loading_type, previous.loading_type, entity_key
            );
        }
    }

    pub async fn get_type(&self, entity_key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries.get(entity_key).map(|entry| entry.loading_type)
    }

    #[instrument(skip(self), fields(entity = %entity_key))]
    pub async fn set_finish(&self, entity_key: &str) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.remove(entity_key) {
            let elapsed = Utc::now().signed_duration_since(entry.started_at);
            debug!(
                "Finished {} on {} after {}s",
                entry.loading_type,
                entity_key,
                elapsed.num_seconds()
            );
        }
    }

    pub async fn is_loading(&self, entity_key: &str) -> bool {
        self.entries.read().await.contains_key(entity_key)
    }

    pub async fn snapshot(&self) -> HashMap<String, LoadingEntry<T>> {
        self.entries.read().await.clone()
    }
}

impl<T> Clone for LoadingRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> Default for LoadingRegistry<T>
where
    T: Copy + fmt::Display + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
