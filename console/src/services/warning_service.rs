// File: console/src/services/warning_service.rs
use std::sync::Arc;
use tracing::info;

use super::run_detached;
use crate::bulk::{settle_all, BulkItem, BulkReport};
use crate::correlation::CorrelationService;
use crate::errors::ConsoleResult;
use crate::http::LxdClient;

pub fn warning_href(id: &str) -> String {
    format!("/ui/warnings/{}", id)
}

#[derive(Clone)]
pub struct WarningService {
    client: Arc<LxdClient>,
    correlation: CorrelationService,
}

impl WarningService {
    pub fn new(client: Arc<LxdClient>, correlation: CorrelationService) -> Self {
        Self {
            client,
            correlation,
        }
    }

    /// Delete every warning, collecting each outcome. Deletes are
    /// synchronous on the daemon, so no operation tracking is involved.
    pub async fn bulk_delete(&self, ids: &[String]) -> ConsoleResult<BulkReport> {
        let service = self.clone();
        let ids = ids.to_vec();
        run_detached(async move { service.delete_all(&ids).await }).await
    }

    async fn delete_all(&self, ids: &[String]) -> BulkReport {
        info!("Bulk delete of {} warnings", ids.len());

        let items = ids
            .iter()
            .map(|id| BulkItem::new(id, "warning", &warning_href(id)))
            .collect();

        let results = settle_all(items, |item| {
            let client = self.client.clone();
            async move { client.delete_warning(&item.name).await }
        })
        .await;

        let report = BulkReport::new(results, "deleted", "warning");
        let notifier = &self.correlation.notifier;
        if report.counts.rejected_count == 0 {
            notifier.success(&report.summary);
        } else {
            notifier.caution(&report.summary, Some("Warning deletion failed"));
        }
        report
    }
}
