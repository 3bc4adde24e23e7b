//! Central repository for timeouts, intervals, defaults and message text
//!
//! Constants are grouped by category so the service, the poller and the tests
//! agree on a single source of truth.

use std::time::Duration;

/// HTTP client constants
pub mod http {
    use super::Duration;

    /// Timeout for establishing connections to the daemon
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Prefix of every daemon endpoint
    pub const API_PREFIX: &str = "/1.0";
}

/// Operation polling constants
pub mod polling {
    use super::Duration;

    /// Pause after a failed wait request before the next attempt
    pub const RETRY_DELAY: Duration = Duration::from_secs(2);

    /// Extra slack on top of the server-side wait timeout
    pub const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);
}

/// Default configuration values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";

    pub const PORT: u16 = 8096;

    pub const PROJECT: &str = "default";

    /// Server-side timeout for `/1.0/operations/{id}/wait`
    pub const OPERATION_WAIT_TIMEOUT_SECONDS: u64 = 30;

    /// Consecutive transport failures tolerated while waiting on an operation
    pub const MAX_CONSECUTIVE_POLL_FAILURES: u32 = 5;

    /// Timeout passed to the daemon for instance state changes
    pub const STATE_CHANGE_TIMEOUT_SECONDS: i64 = 30;

    /// How often the service logs the number of in-flight registrations
    pub const IN_FLIGHT_REPORT_INTERVAL_SECONDS: u64 = 300;
}

/// User facing message fragments
pub mod messages {
    /// Used when a failure event carries no error text
    pub const UNKNOWN_OPERATION_ERROR: &str = "Operation failed without an error message";

    pub const DETAIL_SUCCESS: &str = "Success";

    pub const DETAIL_ERROR_PREFIX: &str = "Error: ";

    pub const ICON_SUCCESS: &str = "success";

    pub const ICON_ERROR: &str = "error";
}
