//! Search API client abstraction and the HTTP implementation

mod searcher;

pub use searcher::Searcher;

use crate::request::{ProductSearchRequest, SearchTermPredictionRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the search API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Dataset, key and endpoint a client is bound to.
///
/// Only constructed from validated run options, so every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub dataset_id: String,
    pub api_key: String,
    pub server_url: String,
}

/// Operations the demo scenarios need from the search API
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run a product search and return the raw JSON response
    async fn search_products(&self, request: &ProductSearchRequest) -> Result<Value, ClientError>;

    /// Ask for search term predictions and return the raw JSON response
    async fn predict_search_terms(
        &self,
        request: &SearchTermPredictionRequest,
    ) -> Result<Value, ClientError>;
}

/// Builds a client for a set of credentials.
///
/// Scenarios only hold a connector, so nothing is constructed (and nothing
/// can reach the network) until their input validation has passed.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn SearchClient>, ClientError>;
}

/// Connector producing [`Searcher`]s that talk HTTP
#[derive(Debug, Clone)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl Connector for HttpConnector {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn SearchClient>, ClientError> {
        let searcher = Searcher::with_timeout(
            &credentials.dataset_id,
            &credentials.api_key,
            &credentials.server_url,
            self.timeout,
        )?;
        Ok(Arc::new(searcher))
    }
}
