//! reqwest-based backend transport
//!
//! Direct implementation of the `AjaxTransport` trait. GET requests carry
//! their parameters in the query string, form POSTs in the body; `action`
//! and `nonce` are added to both.

use crate::client::{AjaxRequest, AjaxTransport, HttpMethod};
use crate::envelope::is_envelope;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use podloom_config::AppConfig;
use reqwest::Client;

/// Backend transport over HTTP
///
/// Holds the endpoint URL and nonce that every request is sent with. The
/// inner `reqwest::Client` is cheap to clone and shares its connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    ajax_url: String,
    nonce: String,
}

impl ReqwestTransport {
    /// Create a transport with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools
    pub fn with_client(
        client: Client,
        ajax_url: impl Into<String>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            client,
            ajax_url: ajax_url.into(),
            nonce: nonce.into(),
        }
    }

    /// Create a transport from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_client(client, &config.ajax_url, &config.nonce))
    }

    pub fn ajax_url(&self) -> &str {
        &self.ajax_url
    }
}

#[async_trait]
impl AjaxTransport for ReqwestTransport {
    async fn send(&self, request: &AjaxRequest) -> Result<String> {
        let params = request.encoded_params(&self.nonce);
        debug!("{:?} {} ({})", request.method, self.ajax_url, request.action);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&self.ajax_url).query(&params),
            HttpMethod::PostForm => self.client.post(&self.ajax_url).form(&params),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // wp_send_json_error may pick a 4xx status; keep its message
            if is_envelope(&body) {
                debug!("{} answered {} with an envelope", request.action, status);
                return Ok(body);
            }
            warn!("{} failed with status {}", request.action, status);
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
