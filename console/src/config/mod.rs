// File: console/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

use crate::constants::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL of the hypervisor daemon, e.g. `https://10.0.0.2:8443`
    pub api_url: String,
    #[serde(default = "default_project")]
    pub default_project: String,
    #[serde(default = "default_operation_wait_timeout")]
    pub operation_wait_timeout_seconds: u64,
    #[serde(default = "default_max_poll_failures")]
    pub max_consecutive_poll_failures: u32,
    #[serde(default = "default_state_change_timeout")]
    pub state_change_timeout_seconds: i64,
    #[serde(default = "default_in_flight_report_interval")]
    pub in_flight_report_interval_seconds: u64,
    /// PEM client certificate the daemon trusts
    #[serde(default)]
    pub tls_client_cert: Option<String>,
    /// PKCS#8 PEM key for `tls_client_cert`
    #[serde(default)]
    pub tls_client_key: Option<String>,
    /// Accept a self-signed daemon certificate
    #[serde(default)]
    pub tls_accept_invalid_certs: bool,
}

impl Config {
    /// Config pointing at `api_url` with every other field defaulted
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_url: api_url.to_string(),
            default_project: default_project(),
            operation_wait_timeout_seconds: default_operation_wait_timeout(),
            max_consecutive_poll_failures: default_max_poll_failures(),
            state_change_timeout_seconds: default_state_change_timeout(),
            in_flight_report_interval_seconds: default_in_flight_report_interval(),
            tls_client_cert: None,
            tls_client_key: None,
            tls_accept_invalid_certs: false,
        }
    }
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_project() -> String {
    defaults::PROJECT.to_string()
}

fn default_operation_wait_timeout() -> u64 {
    defaults::OPERATION_WAIT_TIMEOUT_SECONDS
}

fn default_max_poll_failures() -> u32 {
    defaults::MAX_CONSECUTIVE_POLL_FAILURES
}

fn default_state_change_timeout() -> i64 {
    defaults::STATE_CHANGE_TIMEOUT_SECONDS
}

fn default_in_flight_report_interval() -> u64 {
    defaults::IN_FLIGHT_REPORT_INTERVAL_SECONDS
}
