//! # HTTP Transport
//!
//! Default [`Transport`] implementation on top of `reqwest`.
//! The hashed key travels as the `hashedKey` query parameter; bodies are JSON.

use crate::config::RestConfig;
use async_trait::async_trait;
use lfnds_core::{ElefundsError, ElefundsResult, HttpMethod, Transport};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

/// HTTPS transport for the donation API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    /// Create a transport with default timeouts
    pub fn new() -> ElefundsResult<Self> {
        Self::with_config(RestConfig::default())
    }

    /// Create a transport from explicit configuration
    pub fn with_config(config: RestConfig) -> ElefundsResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                ElefundsError::transport("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, method, hashed_key, payload), fields(method = %method))]
    async fn perform_call(
        &self,
        method: HttpMethod,
        url: &str,
        hashed_key: &str,
        payload: Option<&Value>,
    ) -> ElefundsResult<Value> {
        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        let mut request = request
            .query(&[("hashedKey", hashed_key)])
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json");

        if let Some(body) = payload {
            request = request.json(body);
        }

        debug!("Calling donation API: {} {}", method, url);

        // reqwest errors carry the request URL, which holds the hashed key
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            error!("Donation API unreachable: {} {}: {}", method, url, e);
            ElefundsError::transport(format!("{} {} failed", method, url), e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ElefundsError::transport("Failed to read response body", e.without_url().to_string())
        })?;

        if !status.is_success() {
            error!("Donation API error: status={}, body={}", status, body);
            return Err(ElefundsError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            ElefundsError::protocol(
                "Failed to parse donation API response",
                Some(format!("{}: {}", e, body)),
            )
        })
    }

    fn set_user_agent(&mut self, user_agent: String) {
        self.user_agent = user_agent;
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
