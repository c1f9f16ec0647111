//! HTTP searcher for the Relewise API
//!
//! Every request is a JSON POST to `{server_url}/v1/{dataset_id}/{RequestType}`
//! authenticated with an `APIKey` authorization header.

use super::{ClientError, SearchClient};
use crate::request::{ProductSearchRequest, SearchTermPredictionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Searcher bound to one dataset
pub struct Searcher {
    client: Client,
    dataset_id: String,
    api_key: String,
    server_url: String,
}

impl Searcher {
    /// Create a searcher with the default 30s request timeout
    pub fn new(
        dataset_id: impl Into<String>,
        api_key: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_timeout(dataset_id, api_key, server_url, Duration::from_secs(30))
    }

    pub fn with_timeout(
        dataset_id: impl Into<String>,
        api_key: impl Into<String>,
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "server URL must start with http:// or https://, got '{}'",
                server_url
            )));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            dataset_id: dataset_id.into(),
            api_key: api_key.into(),
            server_url,
        })
    }

    /// Endpoint a request type is posted to
    pub fn endpoint(&self, request_type: &str) -> String {
        format!("{}/v1/{}/{}", self.server_url, self.dataset_id, request_type)
    }

    async fn post<R: Serialize + Sync>(
        &self,
        request_type: &str,
        body: &R,
    ) -> Result<Value, ClientError> {
        let url = self.endpoint(request_type);
        debug!(request_type, url = %url, "Sending request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("APIKey {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(request_type, status, elapsed_ms, "Request rejected");
            return Err(ClientError::Status { status, body });
        }

        // Some endpoints answer 204 with an empty body
        let text = response.text().await?;
        debug!(request_type, elapsed_ms, bytes = text.len(), "Response received");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl SearchClient for Searcher {
    async fn search_products(&self, request: &ProductSearchRequest) -> Result<Value, ClientError> {
        self.post(ProductSearchRequest::TYPE_NAME, request).await
    }

    async fn predict_search_terms(
        &self,
        request: &SearchTermPredictionRequest,
    ) -> Result<Value, ClientError> {
        self.post(SearchTermPredictionRequest::TYPE_NAME, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let searcher = Searcher::new("dataset-1", "key", "https://api.relewise.com/").unwrap();
        assert_eq!(
            searcher.endpoint("ProductSearchRequest"),
            "https://api.relewise.com/v1/dataset-1/ProductSearchRequest"
        );
    }

    #[test]
    fn test_rejects_url_without_scheme() {
        let err = Searcher::new("dataset-1", "key", "api.relewise.com").err().unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_http_error() {
        let searcher = Searcher::with_timeout(
            "dataset-1",
            "key",
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();
        let request = crate::request::SearchTermPredictionBuilder::new(
            crate::request::QuerySettings::new("da-DK", "eur", "Search Page"),
        )
        .set_term("laptop")
        .build();

        let err = searcher.predict_search_terms(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
