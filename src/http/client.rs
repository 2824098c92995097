//! Plain GET/POST wrappers returning the response body as text

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use super::error::HttpError;
use crate::config::HttpConfig;
use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    // Create client with default timeout and user agent
    pub fn new() -> Result<Self, HttpError> {
        Self::with_options(
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, HttpError> {
        Self::with_options(
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpError::transport("client_init", e))?;
        Ok(Self { client })
    }

    /// GET `url` and return the body text.
    pub async fn get(&self, url: &str) -> Result<String, HttpError> {
        tracing::debug!(url = %url, "HTTP GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::transport(url, e))?;
        Self::read_body(url, response).await
    }

    /// POST `body` as `application/json` and return the body text.
    pub async fn post(&self, url: &str, body: impl Into<String>) -> Result<String, HttpError> {
        tracing::debug!(url = %url, "HTTP POST");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .send()
            .await
            .map_err(|e| HttpError::transport(url, e))?;
        Self::read_body(url, response).await
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, HttpError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "HTTP request failed");
            return Err(HttpError::status(url, status));
        }
        response
            .text()
            .await
            .map_err(|e| HttpError::transport(url, e))
    }
}
