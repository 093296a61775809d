//! `reqwest`-backed network collaborator.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tokio::time::timeout;

use crate::config::RuntimeConfig;

use super::collaborators::{ApiClient, ApiRequest, ApiResponse, CollaboratorError};

/// HTTP client for `api_call` actions. Non-2xx responses are returned as
/// `Ok`; only transport failures and timeouts are errors.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    request_timeout: Duration,
}

impl HttpApiClient {
    pub fn new(request_timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .connect_timeout(request_timeout)
            .build()
            .map_err(|e| CollaboratorError::Transport(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            request_timeout,
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self, CollaboratorError> {
        Self::new(Duration::from_secs(config.default_http_timeout_seconds))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CollaboratorError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| CollaboratorError::failed(format!("invalid HTTP method '{}'", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

        let status_code = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| CollaboratorError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(ApiResponse {
            status_code,
            body: (!body.is_empty()).then_some(body),
            headers,
        })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, CollaboratorError> {
        let url = request.url.clone();
        tracing::debug!(url = %url, method = %request.method, "sending http request");
        match timeout(self.request_timeout, self.send(request)).await {
            Ok(result) => {
                if let Ok(response) = &result {
                    tracing::debug!(url = %url, status = response.status_code, "http response");
                }
                result
            }
            Err(_) => Err(CollaboratorError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }),
        }
    }
}
