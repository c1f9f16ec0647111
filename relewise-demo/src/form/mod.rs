//! Form state, events and the run controller
//!
//! [`FormState`] is plain data; [`render`] turns it into the page.
//! [`FormController`] owns the live state and drives a run through the
//! Idle -> Running -> Idle cycle.

mod render;

pub use render::{render, PLACEHOLDER};

use crate::capture::{capture, format_error, RunLogger};
use crate::client::Connector;
use crate::config::FormDefaults;
use crate::example::{ExampleId, ExampleParams};
use crate::scenario::RunOptions;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
}

/// Everything the page shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected: ExampleId,
    pub dataset_id: String,
    pub api_key: String,
    pub server_url: String,
    pub output: Vec<String>,
    pub phase: Phase,
}

/// User edits to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SelectExample(ExampleId),
    SetDatasetId(String),
    SetApiKey(String),
    SetServerUrl(String),
}

impl FormState {
    pub fn new(selected: ExampleId) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Fresh state for a page load
    pub fn load(params: &ExampleParams, defaults: &FormDefaults) -> Self {
        Self {
            selected: params.resolve(),
            dataset_id: defaults.dataset_id.clone().unwrap_or_default(),
            api_key: defaults.api_key.clone().unwrap_or_default(),
            server_url: defaults.server_url.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Apply an edit. Inputs are disabled while running, so edits are ignored then.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        if self.is_running() {
            return false;
        }
        match event {
            FormEvent::SelectExample(id) => self.selected = id,
            FormEvent::SetDatasetId(value) => self.dataset_id = value,
            FormEvent::SetApiKey(value) => self.api_key = value,
            FormEvent::SetServerUrl(value) => self.server_url = value,
        }
        true
    }

    /// Run options from the current field values; empty fields count as missing
    pub fn run_options(&self) -> RunOptions {
        fn field(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }
        RunOptions {
            dataset_id: field(&self.dataset_id),
            api_key: field(&self.api_key),
            server_url: field(&self.server_url),
        }
    }

    /// Enter Running and snapshot the inputs. `None` if a run is already in flight.
    pub fn begin_run(&mut self) -> Option<(ExampleId, RunOptions)> {
        if self.is_running() {
            return None;
        }
        self.phase = Phase::Running;
        self.output.clear();
        Some((self.selected, self.run_options()))
    }

    /// Leave Running and show what the run produced
    pub fn finish_run(&mut self, output: Vec<String>) {
        self.output = output;
        self.phase = Phase::Idle;
    }

    /// Copy with the API key blanked, for pages shown to anyone but the submitter
    pub fn redacted(&self) -> Self {
        Self {
            api_key: String::new(),
            ..self.clone()
        }
    }
}

/// Run `example` inside a capture window and return the lines to display.
///
/// On failure the captured lines are followed by one `Error: ...` line.
pub async fn run_example(
    example: ExampleId,
    connector: &dyn Connector,
    options: &RunOptions,
    forward: Arc<dyn RunLogger>,
) -> Vec<String> {
    let (result, mut lines) = capture(forward, |logger| async move {
        example.run(connector, options, logger.as_ref()).await
    })
    .await;

    match result {
        Ok(()) => info!(example = %example, lines = lines.len(), "Run finished"),
        Err(e) => {
            warn!(example = %example, error = %e, "Run failed");
            lines.push(format_error(&e));
        }
    }
    lines
}

/// A second run was requested while one is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("A run is already in progress")]
pub struct RunInProgress;

/// The run was dropped before it settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Run cancelled")]
pub struct RunCancelled;

/// Puts the controller back in Idle however the run ends.
///
/// Dropped without [`RunningGuard::finish`] (request future cancelled or the
/// run panicked), the output becomes a single cancellation error line.
struct RunningGuard<'a> {
    controller: &'a FormController,
    armed: bool,
}

impl RunningGuard<'_> {
    fn finish(mut self, lines: Vec<String>) -> FormState {
        self.armed = false;
        let mut state = self.controller.state();
        state.finish_run(lines);
        state.clone()
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Run dropped before completion");
            self.controller
                .state()
                .finish_run(vec![format_error(&RunCancelled)]);
        }
    }
}

/// Owns the live form state and runs examples against it
pub struct FormController {
    state: Mutex<FormState>,
    connector: Arc<dyn Connector>,
    forward: Arc<dyn RunLogger>,
    defaults: FormDefaults,
}

impl FormController {
    pub fn new(
        connector: Arc<dyn Connector>,
        forward: Arc<dyn RunLogger>,
        defaults: FormDefaults,
    ) -> Self {
        let state = FormState::load(&ExampleParams::default(), &defaults);
        Self {
            state: Mutex::new(state),
            connector,
            forward,
            defaults,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    /// Page load: reset to a fresh form for `params`.
    ///
    /// A load during a run leaves the running state alone and never shows
    /// the submitter's API key.
    pub fn load(&self, params: &ExampleParams) -> FormState {
        let mut state = self.state();
        if state.is_running() {
            return state.redacted();
        }
        *state = FormState::load(params, &self.defaults);
        state.clone()
    }

    pub fn apply_all(&self, events: impl IntoIterator<Item = FormEvent>) -> FormState {
        let mut state = self.state();
        for event in events {
            state.apply(event);
        }
        state.clone()
    }

    /// Run the selected example with the current inputs
    pub async fn run(&self) -> Result<FormState, RunInProgress> {
        let (example, options) = self.state().begin_run().ok_or(RunInProgress)?;
        let guard = RunningGuard {
            controller: self,
            armed: true,
        };
        info!(example = %example, "Run started");

        let lines = run_example(example, self.connector.as_ref(), &options, self.forward.clone()).await;

        Ok(guard.finish(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::testing::RecordingLogger;
    use crate::capture::format_value;
    use crate::client::testing::{StubClient, StubConnector};
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn filled_controller(client: StubClient) -> (Arc<FormController>, Arc<StubConnector>) {
        let connector = Arc::new(StubConnector::new(client));
        let controller = FormController::new(
            connector.clone(),
            Arc::new(RecordingLogger::default()),
            FormDefaults::default(),
        );
        controller.apply_all([
            FormEvent::SetDatasetId("dataset".into()),
            FormEvent::SetApiKey("key".into()),
            FormEvent::SetServerUrl("https://api.example.test".into()),
        ]);
        (Arc::new(controller), connector)
    }

    fn filled(selected: ExampleId) -> FormState {
        let mut state = FormState::new(selected);
        state.apply(FormEvent::SetDatasetId("dataset".into()));
        state.apply(FormEvent::SetApiKey("key".into()));
        state.apply(FormEvent::SetServerUrl("https://api.example.test".into()));
        state
    }

    #[test]
    fn test_load_resolves_example_and_prefills() {
        let params = ExampleParams {
            example: None,
            file: Some("src/product-search.ts".into()),
        };
        let defaults = FormDefaults {
            server_url: Some("https://api.relewise.com".into()),
            ..Default::default()
        };

        let state = FormState::load(&params, &defaults);
        assert_eq!(state.selected, ExampleId::ProductSearch);
        assert_eq!(state.server_url, "https://api.relewise.com");
        assert!(state.dataset_id.is_empty());
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_run_cycle() {
        let mut state = filled(ExampleId::ProductSearch);
        state.output = vec!["old".into()];

        let (example, options) = state.begin_run().unwrap();
        assert_eq!(example, ExampleId::ProductSearch);
        assert_eq!(options, RunOptions::new("dataset", "key", "https://api.example.test"));
        assert!(state.is_running());
        assert!(state.output.is_empty());

        assert!(state.begin_run().is_none());
        assert!(!state.apply(FormEvent::SetApiKey("other".into())));
        assert_eq!(state.api_key, "key");

        state.finish_run(vec!["done".into()]);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.output, vec!["done".to_string()]);
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let state = FormState::new(ExampleId::default());
        assert_eq!(state.run_options(), RunOptions::default());
    }

    #[tokio::test]
    async fn test_run_example_success() {
        let connector = StubConnector::new(StubClient::returning(json!({ "hits": [] })));
        let options = RunOptions::new("dataset", "key", "https://api.example.test");

        let lines = run_example(
            ExampleId::ProductSearch,
            &connector,
            &options,
            Arc::new(RecordingLogger::default()),
        )
        .await;

        assert_eq!(lines, vec![format_value(&json!({ "hits": [] }))]);
    }

    #[tokio::test]
    async fn test_run_example_failure_is_one_error_line() {
        let connector = StubConnector::new(StubClient::returning(json!({})));
        let sink = Arc::new(RecordingLogger::default());

        let lines = run_example(
            ExampleId::SearchTermPrediction,
            &connector,
            &RunOptions::default(),
            sink.clone(),
        )
        .await;

        assert_eq!(
            lines,
            vec!["Error: Missing required fields. Please provide them in the input fields above."
                .to_string()]
        );
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn test_controller_runs_and_returns_to_idle() {
        let connector = Arc::new(StubConnector::new(StubClient::returning(json!({ "hits": [] }))));
        let sink = Arc::new(RecordingLogger::default());
        let controller = FormController::new(connector.clone(), sink.clone(), FormDefaults::default());

        controller.load(&ExampleParams {
            example: Some("product-search".into()),
            file: None,
        });
        controller.apply_all([
            FormEvent::SetDatasetId("dataset".into()),
            FormEvent::SetApiKey("key".into()),
            FormEvent::SetServerUrl("https://api.example.test".into()),
        ]);

        let first = controller.run().await.unwrap();
        let second = controller.run().await.unwrap();

        assert_eq!(first.phase, Phase::Idle);
        assert_eq!(first.output, second.output);
        assert_eq!(first.output.len(), 1);
        assert_eq!(connector.client.calls(), 2);
        assert_eq!(sink.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_controller_rejects_overlapping_run() {
        let connector = Arc::new(StubConnector::new(StubClient::returning(json!({}))));
        let controller = FormController::new(
            connector.clone(),
            Arc::new(RecordingLogger::default()),
            FormDefaults::default(),
        );

        controller.state().begin_run();
        assert_eq!(controller.run().await.unwrap_err(), RunInProgress);
        assert_eq!(connector.connects.load(std::sync::atomic::Ordering::SeqCst), 0);

        let params = ExampleParams::default();
        assert!(controller.load(&params).is_running());
    }

    #[tokio::test]
    async fn test_dropped_run_returns_to_idle() {
        let (controller, connector) = filled_controller(StubClient::hanging());

        let dropped = tokio::time::timeout(Duration::from_millis(50), controller.run()).await;
        assert!(dropped.is_err());
        assert_eq!(connector.client.calls(), 1);

        let state = controller.snapshot();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.output, vec!["Error: Run cancelled".to_string()]);

        assert!(!controller.load(&ExampleParams::default()).is_running());
        let retry = tokio::time::timeout(Duration::from_millis(50), controller.run()).await;
        assert!(retry.is_err());
        assert_eq!(connector.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panicking_run_returns_to_idle() {
        let (controller, _) = filled_controller(StubClient::panicking());

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.run().await })
        };
        assert!(task.await.unwrap_err().is_panic());

        let state = controller.snapshot();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.output, vec![format_error(&RunCancelled)]);
    }

    #[test]
    fn test_load_during_run_hides_api_key() {
        let connector = Arc::new(StubConnector::new(StubClient::returning(json!({}))));
        let controller = FormController::new(
            connector,
            Arc::new(RecordingLogger::default()),
            FormDefaults::default(),
        );
        controller.apply_all([FormEvent::SetApiKey("secret-key".into())]);
        controller.state().begin_run();

        let page = controller.load(&ExampleParams::default());
        assert!(page.is_running());
        assert!(page.api_key.is_empty());
        assert_eq!(controller.snapshot().api_key, "secret-key");
    }
}
