// File: console/src/config/manager.rs
use super::Config;
use crate::errors::ConfigError;
use anyhow::Result;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);
        debug!("Loading console config: {}", main_config_path);

        let content = fs::read_to_string(&main_config_path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        let config = Self::parse(&content)?;

        info!(
            "Loaded config: daemon {} (project {}), listening on {}:{}",
            config.api_url, config.default_project, config.host, config.port
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &Config) -> Result<(), ConfigError> {
        if !(config.api_url.starts_with("http://") || config.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", config.api_url),
            });
        }
        if config.operation_wait_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "operation_wait_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if config.in_flight_report_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "in_flight_report_interval_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if config.tls_client_cert.is_some() != config.tls_client_key.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "tls_client_key".to_string(),
                reason: "tls_client_cert and tls_client_key must be set together".to_string(),
            });
        }
        if config.max_consecutive_poll_failures == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_consecutive_poll_failures".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
