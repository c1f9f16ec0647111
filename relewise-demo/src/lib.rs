//! Relewise demo runner
//!
//! This crate provides:
//! - Fluent builders for product search and search term prediction requests
//! - A small HTTP client for the search API behind a mockable trait
//! - Run-scoped log capture so a run's output can be shown back to the user
//! - A form controller and an axum front-end that ties them together

pub mod api;
pub mod capture;
pub mod client;
pub mod config;
pub mod error;
pub mod example;
pub mod form;
pub mod request;
pub mod scenario;

pub use capture::{LogCapture, RunLogger, TracingLogger};
pub use client::{Connector, HttpConnector, SearchClient, Searcher};
pub use config::DemoConfig;
pub use error::DemoError;
pub use example::{ExampleId, ExampleParams};
pub use form::{FormController, FormState};
pub use scenario::RunOptions;
