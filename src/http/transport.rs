//! Transports that actually move requests

use async_trait::async_trait;
use reqwest::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::request::{ApiRequest, RawResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse>;
}

/// HTTP transport over a fixed base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // validate early so a bad base URL fails at startup, not on first call
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus path plus query
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let joined = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut url = Url::parse(&joined)
            .map_err(|e| Error::Config(format!("Invalid request URL '{}': {}", joined, e)))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(request)?;

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request {} {} failed: {}", request.method, request.path, e);
            Error::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse::new(status, body))
    }
}
