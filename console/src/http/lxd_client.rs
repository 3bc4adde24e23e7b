// File: console/src/http/lxd_client.rs
use reqwest::{Client, Identity, RequestBuilder};
use std::fs;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::responses::{
    ApiEnvelope, InstanceStateAction, InstanceStatePut, MemberStateAction, MemberStatePost,
};
use crate::config::Config;
use crate::constants::{http, polling};
use crate::errors::{ConfigError, ConsoleError, ConsoleResult};
use crate::events::OperationEvent;

pub struct LxdClient {
    base_url: String,
    client: Client,
    state_change_timeout_seconds: i64,
}

impl LxdClient {
    pub fn new(config: &Config) -> ConsoleResult<Self> {
        // No overall timeout: operation waits are bounded per request instead
        let mut builder = Client::builder()
            .connect_timeout(http::CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(config.tls_accept_invalid_certs);

        if let Some(identity) = Self::load_identity(config)? {
            builder = builder.identity(identity);
        }
        if config.tls_accept_invalid_certs {
            warn!("Daemon certificate verification is disabled");
        }

        let client = builder.build().map_err(|e| {
            ConsoleError::Other(format!("Failed to create HTTP client for LxdClient: {}", e))
        })?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
            state_change_timeout_seconds: config.state_change_timeout_seconds,
        })
    }

    fn load_identity(config: &Config) -> ConsoleResult<Option<Identity>> {
        let (Some(cert_path), Some(key_path)) = (&config.tls_client_cert, &config.tls_client_key)
        else {
            return Ok(None);
        };

        let read = |path: &String| {
            fs::read(path).map_err(|e| ConfigError::LoadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })
        };
        let cert = read(cert_path)?;
        let key = read(key_path)?;

        let identity =
            Identity::from_pkcs8_pem(&cert, &key).map_err(|e| ConfigError::InvalidValue {
                field: "tls_client_cert".to_string(),
                reason: e.to_string(),
            })?;
        info!("Using client certificate {}", cert_path);
        Ok(Some(identity))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, http::API_PREFIX, path)
    }

    /// Ask the daemon to change an instance's state. Returns the operation id.
    pub async fn change_instance_state(
        &self,
        name: &str,
        project: &str,
        action: InstanceStateAction,
        force: bool,
    ) -> ConsoleResult<String> {
        let url = self.url(&format!("/instances/{}/state", name));
        let body = InstanceStatePut {
            action,
            timeout: self.state_change_timeout_seconds,
            force,
        };

        info!("Requesting {:?} of instance {} (project {})", action, name, project);
        let request = self
            .client
            .put(&url)
            .query(&[("project", project)])
            .json(&body);

        let envelope = self.send(request, &url).await?;
        Self::expect_operation(&envelope, &url)
    }

    /// Evacuate or restore a cluster member. Returns the operation id.
    pub async fn change_member_state(
        &self,
        name: &str,
        action: MemberStateAction,
    ) -> ConsoleResult<String> {
        let url = self.url(&format!("/cluster/members/{}/state", name));
        info!("Requesting {:?} of cluster member {}", action, name);

        let request = self.client.post(&url).json(&MemberStatePost { action });
        let envelope = self.send(request, &url).await?;
        Self::expect_operation(&envelope, &url)
    }

    pub async fn delete_warning(&self, id: &str) -> ConsoleResult<()> {
        let url = self.url(&format!("/warnings/{}", id));
        debug!("Deleting warning {}", id);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    /// Block on the daemon until the operation changes state or
    /// `timeout_seconds` pass. Returns the operation as last reported.
    pub async fn wait_operation(
        &self,
        operation_id: &str,
        timeout_seconds: u64,
    ) -> ConsoleResult<OperationEvent> {
        let url = self.url(&format!("/operations/{}/wait", operation_id));
        let request = self
            .client
            .get(&url)
            .query(&[("timeout", timeout_seconds)])
            .timeout(Duration::from_secs(timeout_seconds) + polling::CLIENT_TIMEOUT_SLACK);

        let envelope = self.send(request, &url).await?;
        let event: OperationEvent = serde_json::from_value(envelope.metadata)?;
        Ok(event)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> ConsoleResult<ApiEnvelope> {
        let response = request.send().await.map_err(|e| ConsoleError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let envelope = serde_json::from_str::<ApiEnvelope>(&text).ok();

        match envelope {
            Some(envelope) if status.is_success() && !envelope.is_error() => Ok(envelope),
            Some(envelope) => {
                let code = envelope.error_code.unwrap_or(status.as_u16());
                let message = envelope
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| Self::status_text(status));
                warn!("Daemon rejected {} with {}: {}", url, code, message);
                Err(ConsoleError::Api {
                    status: code,
                    message,
                })
            }
            None if status.is_success() => Err(ConsoleError::Other(format!(
                "Unexpected response from {}: {}",
                url, text
            ))),
            None => {
                let message = if text.trim().is_empty() {
                    Self::status_text(status)
                } else {
                    text.trim().to_string()
                };
                warn!("Daemon rejected {} with {}: {}", url, status, message);
                Err(ConsoleError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    fn expect_operation(envelope: &ApiEnvelope, url: &str) -> ConsoleResult<String> {
        envelope.operation_id().ok_or_else(|| {
            ConsoleError::Other(format!(
                "Daemon accepted {} but returned no operation ({} response)",
                url, envelope.response_type
            ))
        })
    }

    fn status_text(status: reqwest::StatusCode) -> String {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    }
}
