//! Common test data, constants and async helpers

use std::future::Future;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Generate a random operation id for testing
pub fn random_operation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Common instance names
pub mod instances {
    pub const WEB_1: &str = "web-1";
    pub const WEB_2: &str = "web-2";
    pub const DB_1: &str = "db-1";
}

/// Common cluster member names
pub mod members {
    pub const MEMBER_1: &str = "micro1";
    pub const MEMBER_2: &str = "micro2";
}

/// Common warning ids
pub mod warnings {
    pub const WARNING_1: &str = "7d2a3c1e-0a4b-4f5e-9c1d-2b3a4c5d6e7f";
    pub const WARNING_2: &str = "8e3b4d2f-1b5c-405f-8d2e-3c4b5d6e7f80";
    pub const WARNING_3: &str = "9f4c5e30-2c6d-4160-9e3f-4d5c6e7f8091";
}

/// Poll `condition` until it holds or `timeout` passes. Returns whether it held.
pub async fn wait_until<F, Fut>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if condition().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
