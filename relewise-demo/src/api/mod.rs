//! HTTP front-end serving the demo form

use crate::example::{ExampleId, ExampleParams};
use crate::form::{render, FormController, FormEvent, Phase};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// API state
pub struct ApiState {
    pub controller: FormController,
}

/// Fields posted by the form. Disabled inputs are not posted, hence all optional.
#[derive(Debug, Default, Deserialize)]
pub struct RunForm {
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>,
}

impl RunForm {
    /// Form edits carried by this submission; unknown example ids are ignored
    pub fn events(self) -> Vec<FormEvent> {
        let mut events = Vec::new();
        if let Some(id) = self.example.and_then(|s| s.parse::<ExampleId>().ok()) {
            events.push(FormEvent::SelectExample(id));
        }
        if let Some(value) = self.dataset_id {
            events.push(FormEvent::SetDatasetId(value));
        }
        if let Some(value) = self.api_key {
            events.push(FormEvent::SetApiKey(value));
        }
        if let Some(value) = self.server_url {
            events.push(FormEvent::SetServerUrl(value));
        }
        events
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub running: bool,
}

/// Create the API router
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/run", post(run_example))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Page load: resolve the example from the query string and show a fresh form
async fn form_page(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ExampleParams>,
) -> Html<String> {
    Html(render(&state.controller.load(&params)))
}

/// Apply the submitted fields and run the selected example
async fn run_example(
    State(state): State<Arc<ApiState>>,
    Form(form): Form<RunForm>,
) -> (StatusCode, Html<String>) {
    let current = state.controller.snapshot();
    if current.is_running() {
        warn!("Run requested while another run is in progress");
        return (StatusCode::CONFLICT, Html(render(&current.redacted())));
    }

    state.controller.apply_all(form.events());
    match state.controller.run().await {
        Ok(finished) => (StatusCode::OK, Html(render(&finished))),
        Err(e) => {
            warn!(error = %e, "Run rejected");
            (
                StatusCode::CONFLICT,
                Html(render(&state.controller.snapshot().redacted())),
            )
        }
    }
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        running: state.controller.snapshot().phase == Phase::Running,
    })
}
