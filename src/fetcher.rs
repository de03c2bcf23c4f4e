use crate::{LinkFetcher, LinkToolError, MetaMap};
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Wire shape of the backend's answer to `GET <endpoint>?url=<value>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub success: u8,
    #[serde(default)]
    pub meta: Option<MetaMap>,
    #[serde(default)]
    pub link: Option<String>,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.success != 0
    }
}

#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    endpoint: String,
}

/// Backend endpoint plus transport settings. There is no default endpoint;
/// an empty string leaves fetching disabled.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub headers: Option<HeaderMap>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            headers: None,
            user_agent: "link-preview-block/0.1.0".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl FetcherConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new("")
    }
}

impl Fetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::new_with_config(FetcherConfig::new(endpoint))
    }

    pub fn new_with_config(config: FetcherConfig) -> Self {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout);

        // Configured static headers ride on every request.
        if let Some(headers) = config.headers {
            client_builder = client_builder.default_headers(headers);
        }

        let client = client_builder.build().unwrap_or_else(|e| {
            error!(error = %e, "Failed to create HTTP client");
            panic!("Failed to initialize HTTP client: {}", e);
        });

        Self {
            client,
            endpoint: config.endpoint,
        }
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_meta(&self, url: &str) -> Result<BackendResponse, LinkToolError> {
        if self.endpoint.is_empty() {
            return Err(LinkToolError::MissingEndpoint);
        }

        debug!(url = %url, endpoint = %self.endpoint, "Requesting link metadata");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to send metadata request");
                LinkToolError::FetchError(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(LinkToolError::BadStatus(response.status().as_u16()));
        }

        let body: BackendResponse = response.json().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to decode metadata response");
            LinkToolError::DecodeError(e.to_string())
        })?;

        debug!(url = %url, success = body.success, "Backend responded");
        Ok(body)
    }
}

#[async_trait]
impl LinkFetcher for Fetcher {
    async fn fetch_meta(&self, url: &str) -> Result<BackendResponse, LinkToolError> {
        Fetcher::fetch_meta(self, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_endpoint_disables_fetching() {
        let fetcher = Fetcher::default();
        let result = fetcher.fetch_meta("https://example.com").await;
        assert!(matches!(result, Err(LinkToolError::MissingEndpoint)));
    }

    #[test]
    fn response_success_is_numeric_and_defaults_to_failure() {
        let body: BackendResponse = serde_json::from_str(r#"{"success": 1}"#).unwrap();
        assert!(body.is_success());
        assert!(body.meta.is_none());

        let body: BackendResponse = serde_json::from_str(r#"{"meta": {"title": "t"}}"#).unwrap();
        assert!(!body.is_success());
    }

    #[test]
    fn response_meta_is_stored_verbatim() {
        let body: BackendResponse = serde_json::from_str(
            r#"{"success": 1, "meta": {"title": "T", "extra": [1, 2]}, "link": "https://e.com"}"#,
        )
        .unwrap();

        let meta = body.meta.unwrap();
        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("T"));
        assert!(meta.contains_key("extra"));
        assert_eq!(body.link.as_deref(), Some("https://e.com"));
    }

    #[test]
    fn null_meta_reads_as_absent() {
        let body: BackendResponse =
            serde_json::from_str(r#"{"success": 1, "meta": null}"#).unwrap();
        assert!(body.meta.is_none());
    }
}
