//! The runnable demo scenarios
//!
//! Each scenario validates its inputs, builds a fixed request, sends it
//! through a client from the supplied [`Connector`] and logs the raw response.
//! Errors are never caught here; they belong to whoever started the run.

mod product_search;
mod search_term_prediction;

pub use product_search::{product_search_request, run_product_search};
pub use search_term_prediction::{run_search_term_prediction, search_term_prediction_request};

use crate::capture::RunLogger;
use crate::client::{Connector, Credentials};
use crate::error::DemoError;
use crate::example::ExampleId;

/// Displayed-at-location label every scenario reports
pub const DISPLAYED_AT_LOCATION: &str = "Search Page";

/// Inputs collected from the form for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dataset_id: Option<String>,
    pub api_key: Option<String>,
    pub server_url: Option<String>,
}

impl RunOptions {
    pub fn new(
        dataset_id: impl Into<String>,
        api_key: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            dataset_id: Some(dataset_id.into()),
            api_key: Some(api_key.into()),
            server_url: Some(server_url.into()),
        }
    }

    /// Credentials for a client, or [`DemoError::MissingFields`] if any field is absent or empty
    pub fn credentials(&self) -> Result<Credentials, DemoError> {
        fn present(field: &Option<String>) -> Result<String, DemoError> {
            field
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(DemoError::MissingFields)
        }

        Ok(Credentials {
            dataset_id: present(&self.dataset_id)?,
            api_key: present(&self.api_key)?,
            server_url: present(&self.server_url)?,
        })
    }
}

impl ExampleId {
    /// Run this example to completion
    pub async fn run(
        self,
        connector: &dyn Connector,
        options: &RunOptions,
        logger: &dyn RunLogger,
    ) -> Result<(), DemoError> {
        match self {
            ExampleId::ProductSearch => run_product_search(connector, options, logger).await,
            ExampleId::SearchTermPrediction => {
                run_search_term_prediction(connector, options, logger).await
            }
        }
    }
}
