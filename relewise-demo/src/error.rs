use crate::client::ClientError;
use thiserror::Error;

/// Errors from running a demo scenario
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Missing required fields. Please provide them in the input fields above.")]
    MissingFields,

    #[error(transparent)]
    Client(#[from] ClientError),
}
