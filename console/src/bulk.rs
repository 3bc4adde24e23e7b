//! Bulk operation results
//!
//! A bulk action runs one operation per item and records every outcome. One
//! item failing never stops the others; the batch ends with exactly one
//! result per item.
//!
//! Two collection styles are supported:
//! - [`settle_all`] awaits every per-item future and returns the results in
//!   input order.
//! - [`BulkCollector`] accepts results one at a time as they arrive (from
//!   spawned tasks or event callbacks) and resolves when all have reported.
//!   Nothing here times out; every item must report eventually.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::debug;

use crate::constants::messages;
use crate::errors::ErrorMessage;

/// Identifies the entity a bulk result refers to, for linking in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub href: String,
}

impl BulkItem {
    pub fn new(name: &str, item_type: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            item_type: item_type.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SettledResult {
    Fulfilled { item: BulkItem },
    Rejected { item: BulkItem, reason: String },
}

impl SettledResult {
    pub fn item(&self) -> &BulkItem {
        match self {
            SettledResult::Fulfilled { item } | SettledResult::Rejected { item, .. } => item,
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, SettledResult::Fulfilled { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledCounts {
    pub fulfilled_count: usize,
    pub rejected_count: usize,
}

/// One row of the per-item detail list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub name: String,
    pub href: String,
    pub icon: String,
    pub text: String,
}

pub fn settled_counts(results: &[SettledResult]) -> SettledCounts {
    results
        .iter()
        .fold(SettledCounts::default(), |mut counts, result| {
            match result {
                SettledResult::Fulfilled { .. } => counts.fulfilled_count += 1,
                SettledResult::Rejected { .. } => counts.rejected_count += 1,
            }
            counts
        })
}

pub fn push_success(results: &mut Vec<SettledResult>, item: BulkItem) {
    results.push(SettledResult::Fulfilled { item });
}

pub fn push_failure(results: &mut Vec<SettledResult>, reason: impl Into<String>, item: BulkItem) {
    results.push(SettledResult::Rejected {
        item,
        reason: reason.into(),
    });
}

/// Call `resolve` once every expected result is in. Returns whether it did.
pub fn continue_or_finish<F>(results: &[SettledResult], total_length: usize, resolve: F) -> bool
where
    F: FnOnce(&[SettledResult]),
{
    if results.len() == total_length {
        resolve(results);
        return true;
    }
    false
}

/// Run `action` for every item concurrently and wait for all of them.
/// Results keep the input order.
pub async fn settle_all<F, Fut, E>(items: Vec<BulkItem>, action: F) -> Vec<SettledResult>
where
    F: Fn(BulkItem) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: ErrorMessage,
{
    let pending = items.into_iter().map(|item| {
        let outcome = action(item.clone());
        async move {
            match outcome.await {
                Ok(()) => SettledResult::Fulfilled { item },
                Err(e) => SettledResult::Rejected {
                    item,
                    reason: e.error_message(),
                },
            }
        }
    });
    join_all(pending).await
}

pub fn detail_rows(results: &[SettledResult]) -> Vec<DetailRow> {
    results
        .iter()
        .map(|result| {
            let item = result.item();
            let (icon, text) = match result {
                SettledResult::Fulfilled { .. } => (
                    messages::ICON_SUCCESS,
                    messages::DETAIL_SUCCESS.to_string(),
                ),
                SettledResult::Rejected { reason, .. } => (
                    messages::ICON_ERROR,
                    format!("{}{}", messages::DETAIL_ERROR_PREFIX, reason),
                ),
            };
            DetailRow {
                name: item.name.clone(),
                href: item.href.clone(),
                icon: icon.to_string(),
                text,
            }
        })
        .collect()
}

/// Aggregate message, e.g. "2 warnings deleted, 1 failed."
pub fn summary(action_past_tense: &str, noun: &str, counts: SettledCounts) -> String {
    let mut text = format!(
        "{} {} {}",
        counts.fulfilled_count,
        pluralize(noun, counts.fulfilled_count),
        action_past_tense
    );
    if counts.rejected_count > 0 {
        text.push_str(&format!(", {} failed", counts.rejected_count));
    }
    text.push('.');
    text
}

pub fn pluralize(noun: &str, count: usize) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

/// Everything the console shows once a batch has settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    pub summary: String,
    pub counts: SettledCounts,
    pub results: Vec<SettledResult>,
    pub details: Vec<DetailRow>,
}

impl BulkReport {
    pub fn new(results: Vec<SettledResult>, action_past_tense: &str, noun: &str) -> Self {
        let counts = settled_counts(&results);
        Self {
            summary: summary(action_past_tense, noun, counts),
            counts,
            details: detail_rows(&results),
            results,
        }
    }

    pub fn all_failed(&self) -> bool {
        self.counts.fulfilled_count == 0 && self.counts.rejected_count > 0
    }
}

/// Incremental collection of a batch whose items report independently
pub struct BulkCollector {
    total: usize,
    results: Mutex<Vec<SettledResult>>,
    done: Mutex<Option<oneshot::Sender<Vec<SettledResult>>>>,
}

impl BulkCollector {
    pub fn new(total: usize) -> (Arc<Self>, oneshot::Receiver<Vec<SettledResult>>) {
        let (tx, rx) = oneshot::channel();
        let done = if total == 0 {
            let _ = tx.send(Vec::new());
            None
        } else {
            Some(tx)
        };

        let collector = Arc::new(Self {
            total,
            results: Mutex::new(Vec::with_capacity(total)),
            done: Mutex::new(done),
        });
        (collector, rx)
    }

    pub async fn report_success(&self, item: BulkItem) {
        let mut results = self.results.lock().await;
        push_success(&mut results, item);
        self.finish_if_complete(&results).await;
    }

    pub async fn report_failure(&self, reason: impl Into<String>, item: BulkItem) {
        let mut results = self.results.lock().await;
        push_failure(&mut results, reason, item);
        self.finish_if_complete(&results).await;
    }

    /// `(reported, total)`
    pub async fn progress(&self) -> (usize, usize) {
        (self.results.lock().await.len(), self.total)
    }

    pub async fn counts(&self) -> SettledCounts {
        settled_counts(&self.results.lock().await)
    }

    async fn finish_if_complete(&self, results: &[SettledResult]) {
        debug!("Bulk progress: {} of {}", results.len(), self.total);
        let mut done = self.done.lock().await;
        continue_or_finish(results, self.total, |all| {
            if let Some(tx) = done.take() {
                let _ = tx.send(all.to_vec());
            }
        });
    }
}
