use async_trait::async_trait;
use tracing::debug;

use super::{ServiceRegistry, types::ServiceRegistration};
use crate::error::{OrchestratorError, Result};

/// Consul agent address used when none is configured.
pub const DEFAULT_CONSUL_ADDR: &str = "consul:8500";

#[derive(Debug, Clone)]
pub struct ConsulClient {
    client: reqwest::Client,
    base_url: String,
}

impl ConsulClient {
    /// `address` is either `host:port` or a full `http(s)://` URL.
    pub fn new(address: &str) -> Self {
        let address = address.trim_end_matches('/');
        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        ConsulClient {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ServiceRegistry for ConsulClient {
    async fn register(&self, registration: &ServiceRegistration) -> Result<()> {
        let registration_error = |message: String| OrchestratorError::Registration {
            service: registration.id.clone(),
            message,
        };

        let url = format!("{}/v1/agent/service/register", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(registration)
            .send()
            .await
            .map_err(|e| registration_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(registration_error(format!("status: {}", response.status())));
        }

        debug!(service = %registration.id, "registered service");
        Ok(())
    }

    async fn deregister(&self, service_id: &str) -> Result<()> {
        let deregistration_error = |message: String| OrchestratorError::Deregistration {
            service: service_id.to_string(),
            message,
        };

        let url = format!("{}/v1/agent/service/deregister/{service_id}", self.base_url);
        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(|e| deregistration_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(deregistration_error(format!(
                "status: {}",
                response.status()
            )));
        }

        debug!(service = service_id, "deregistered service");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;

    fn registration() -> ServiceRegistration {
        ServiceRegistration::tcp(
            "novnc-abc123def456".to_string(),
            "172.20.0.5",
            6901,
            "urlprefix-/abc123def456/novnc/".to_string(),
            "10s",
        )
    }

    #[test]
    fn new_accepts_bare_host_port() {
        assert_eq!(ConsulClient::new("consul:8500").base_url(), "http://consul:8500");
        assert_eq!(
            ConsulClient::new("https://consul.internal/").base_url(),
            "https://consul.internal"
        );
    }

    #[tokio::test]
    async fn register_puts_registration_json() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/agent/service/register"))
            .and(body_json(json!({
                "Name": "novnc-abc123def456",
                "ID": "novnc-abc123def456",
                "Address": "172.20.0.5",
                "Port": 6901,
                "Tags": ["urlprefix-/abc123def456/novnc/"],
                "Check": {"TCP": "172.20.0.5:6901", "Interval": "10s"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ConsulClient::new(&server.uri());
        client.register(&registration()).await.unwrap();
    }

    #[tokio::test]
    async fn register_fails_on_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/agent/service/register"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ConsulClient::new(&server.uri());
        let err = client.register(&registration()).await.unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Registration { ref service, .. } if service == "novnc-abc123def456"
        ));
    }

    #[tokio::test]
    async fn deregister_targets_service_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/agent/service/deregister/vnc-abc123def456"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ConsulClient::new(&server.uri());
        client.deregister("vnc-abc123def456").await.unwrap();
    }

    #[tokio::test]
    async fn register_fails_when_agent_is_unreachable() {
        let client = ConsulClient::new("127.0.0.1:1");
        assert!(matches!(
            client.register(&registration()).await,
            Err(OrchestratorError::Registration { .. })
        ));
    }
}
