//! This module provides reusable test utilities:
//! - Mock hypervisor daemon
//! - Test configuration builders
//! - Common test data and async helpers

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_daemon;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use mock_daemon::MockDaemon;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
