use super::{RunOptions, DISPLAYED_AT_LOCATION};
use crate::capture::RunLogger;
use crate::client::Connector;
use crate::error::DemoError;
use crate::request::{QuerySettings, SearchTermPredictionBuilder, SearchTermPredictionRequest};
use tracing::debug;

/// Up to 10 predictions for "laptop"
pub fn search_term_prediction_request() -> SearchTermPredictionRequest {
    let settings = QuerySettings::new("da-DK", "eur", DISPLAYED_AT_LOCATION);

    SearchTermPredictionBuilder::new(settings)
        .set_term("laptop")
        .take(10)
        .build()
}

pub async fn run_search_term_prediction(
    connector: &dyn Connector,
    options: &RunOptions,
    logger: &dyn RunLogger,
) -> Result<(), DemoError> {
    let credentials = options.credentials()?;
    let searcher = connector.connect(&credentials)?;

    debug!(dataset_id = %credentials.dataset_id, "Running search term prediction");
    let response = searcher
        .predict_search_terms(&search_term_prediction_request())
        .await?;

    logger.log(&[response]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::RecordingLogger;
    use crate::client::testing::{StubClient, StubConnector};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_request_contents() {
        let request = search_term_prediction_request();
        assert_eq!(request.term, "laptop");
        assert_eq!(request.take, 10);
        assert_eq!(request.context.currency, "eur");
        assert!(request.context.user.is_anonymous());
    }

    #[tokio::test]
    async fn test_logs_predictions() {
        let response = json!({ "predictions": [{ "term": "laptop bag", "rank": 1 }] });
        let connector = StubConnector::new(StubClient::returning(response));
        let logger = RecordingLogger::default();
        let options = RunOptions::new("dataset", "key", "https://api.example.test");

        run_search_term_prediction(&connector, &options, &logger)
            .await
            .unwrap();

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("\"laptop bag\""));
        assert_eq!(connector.client.prediction_calls.load(Ordering::SeqCst), 1);
    }
}
