use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Model endpoint returned status {0}")]
    Status(u16),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

/// External model connection settings. Loaded from a JSON file by the
/// CLI; `AUDIT_API_KEY` overrides the configured key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            timeout_secs: 60,
        }
    }
}

impl GatewayConfig {
    pub fn from_file(path: &std::path::Path) -> Result<Self, GatewayError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Request(format!("Failed to read config file: {}", e)))?;
        let mut config: GatewayConfig = serde_json::from_str(&contents)
            .map_err(|e| GatewayError::InvalidFormat(format!("Invalid config format: {}", e)))?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("AUDIT_API_KEY") {
            self.api_key = key;
        }
    }
}

/// Seam between the pipeline and whichever model produces the raw
/// assessment
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a prompt and return the model's text response
    async fn send(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// HTTP gateway speaking the messages API
pub struct HttpModelGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpModelGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ModelGateway for HttpModelGateway {
    async fn send(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        info!("Calling model endpoint: {}", self.config.endpoint);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(self.config.timeout_secs)
                } else {
                    GatewayError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Model endpoint returned status {}", status);
            return Err(GatewayError::Status(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidFormat(e.to_string()))?;

        let text = payload
            .get("content")
            .and_then(Value::as_array)
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::InvalidFormat("missing content text".to_string()))?;

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        info!("Model response received: {} characters", text.len());
        Ok(text.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn test_config(endpoint: String) -> GatewayConfig {
        GatewayConfig {
            endpoint,
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_gateway_extracts_message_content() {
        block_on(async {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/v1/messages")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"content":[{"type":"text","text":"{\"findings\":[]}"}]}"#)
                .create_async()
                .await;

            let config = test_config(format!("{}/v1/messages", server.url()));
            let gateway = HttpModelGateway::new(config).unwrap();

            let body = gateway.send("analyze this").await.unwrap();
            assert_eq!(body, r#"{"findings":[]}"#);
            mock.assert_async().await;
        });
    }

    #[test]
    fn test_gateway_maps_error_status() {
        block_on(async {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/messages")
                .with_status(500)
                .create_async()
                .await;

            let config = test_config(format!("{}/v1/messages", server.url()));
            let gateway = HttpModelGateway::new(config).unwrap();

            let result = gateway.send("analyze this").await;
            assert!(matches!(result, Err(GatewayError::Status(500))));
        });
    }

    #[test]
    fn test_gateway_rejects_blank_content() {
        block_on(async {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/messages")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"content":[{"type":"text","text":"   "}]}"#)
                .create_async()
                .await;

            let config = test_config(format!("{}/v1/messages", server.url()));
            let gateway = HttpModelGateway::new(config).unwrap();

            let result = gateway.send("analyze this").await;
            assert!(matches!(result, Err(GatewayError::EmptyResponse)));
        });
    }

    #[test]
    fn test_gateway_rejects_malformed_payload() {
        block_on(async {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/messages")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"unexpected": true}"#)
                .create_async()
                .await;

            let config = test_config(format!("{}/v1/messages", server.url()));
            let gateway = HttpModelGateway::new(config).unwrap();

            let result = gateway.send("analyze this").await;
            assert!(matches!(result, Err(GatewayError::InvalidFormat(_))));
        });
    }
}
