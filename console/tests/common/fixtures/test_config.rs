//! Test configuration builder for creating test configs programmatically

use console::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    api_url: String,
    host: String,
    port: u16,
    default_project: String,
    operation_wait_timeout_seconds: u64,
    max_consecutive_poll_failures: u32,
}

impl TestConfigBuilder {
    /// Create a new test config builder pointing at the given daemon
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8096,
            default_project: "default".to_string(),
            operation_wait_timeout_seconds: 1,
            max_consecutive_poll_failures: 1,
        }
    }

    pub fn project(mut self, project: &str) -> Self {
        self.default_project = project.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn max_poll_failures(mut self, failures: u32) -> Self {
        self.max_consecutive_poll_failures = failures;
        self
    }

    /// In-memory config, no files involved
    pub fn build(&self) -> Config {
        let mut config = Config::with_api_url(&self.api_url);
        config.host = self.host.clone();
        config.port = self.port;
        config.default_project = self.default_project.clone();
        config.operation_wait_timeout_seconds = self.operation_wait_timeout_seconds;
        config.max_consecutive_poll_failures = self.max_consecutive_poll_failures;
        config
    }

    fn to_toml(&self) -> String {
        format!(
            r#"
host = "{}"
port = {}
api_url = "{}"
default_project = "{}"
operation_wait_timeout_seconds = {}
max_consecutive_poll_failures = {}
"#,
            self.host,
            self.port,
            self.api_url,
            self.default_project,
            self.operation_wait_timeout_seconds,
            self.max_consecutive_poll_failures
        )
    }

    /// Write `main.toml` into a temp config directory
    pub fn write(&self) -> TestConfigDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("main.toml"), self.to_toml()).expect("Failed to write main.toml");

        TestConfigDir {
            _temp_dir: temp_dir,
            config_dir,
        }
    }
}

/// Config directory on disk; removed when dropped
pub struct TestConfigDir {
    _temp_dir: TempDir,
    config_dir: PathBuf,
}

impl TestConfigDir {
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }
}
