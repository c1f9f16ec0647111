//! Run-scoped log capture
//!
//! Scenarios log through an injected [`RunLogger`]. During a run the logger is
//! a [`LogCapture`], which forwards every entry to the real sink and also
//! keeps a formatted copy for display. The capture window closes when the run
//! settles, however it settles; after that the same handle only forwards.

use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Sink for values logged by a scenario
pub trait RunLogger: Send + Sync {
    /// Log one entry made of one or more values
    fn log(&self, args: &[Value]);
}

/// Forwards entries to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl RunLogger for TracingLogger {
    fn log(&self, args: &[Value]) {
        info!(target: "relewise_demo::run", "{}", format_entry(args));
    }
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl RunLogger for NullLogger {
    fn log(&self, _args: &[Value]) {}
}

/// Render one value: composites pretty-printed, strings raw, other scalars as text
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Render all values of one log call, space separated
pub fn format_entry(args: &[Value]) -> String {
    args.iter().map(format_value).collect::<Vec<_>>().join(" ")
}

/// Formatted line for a failed run
pub fn format_error(error: &dyn std::fmt::Display) -> String {
    format!("Error: {}", error)
}

/// Forwarding logger with a run-local buffer
pub struct LogCapture {
    forward: Arc<dyn RunLogger>,
    buffer: Mutex<Option<Vec<String>>>,
}

impl LogCapture {
    /// Open a capture window in front of `forward`
    pub fn open(forward: Arc<dyn RunLogger>) -> Arc<Self> {
        Arc::new(Self {
            forward,
            buffer: Mutex::new(Some(Vec::new())),
        })
    }

    fn buffer(&self) -> MutexGuard<'_, Option<Vec<String>>> {
        // A poisoned buffer still holds whole entries
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_open(&self) -> bool {
        self.buffer().is_some()
    }

    /// Close the window and take what was captured.
    ///
    /// Closing twice is harmless; the second call returns nothing.
    pub fn close(&self) -> Vec<String> {
        self.buffer().take().unwrap_or_default()
    }
}

impl RunLogger for LogCapture {
    fn log(&self, args: &[Value]) {
        if let Some(lines) = self.buffer().as_mut() {
            lines.push(format_entry(args));
        }
        self.forward.log(args);
    }
}

/// Closes the window when dropped, so an unwinding run cannot leave it open
struct CaptureWindow(Arc<LogCapture>);

impl Drop for CaptureWindow {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Run `work` with a capturing logger and return its output with the captured lines
pub async fn capture<F, Fut, T>(forward: Arc<dyn RunLogger>, work: F) -> (T, Vec<String>)
where
    F: FnOnce(Arc<dyn RunLogger>) -> Fut,
    Fut: Future<Output = T>,
{
    let window = CaptureWindow(LogCapture::open(forward));
    let logger: Arc<dyn RunLogger> = window.0.clone();
    let output = work(logger).await;
    let lines = window.0.close();
    (output, lines)
}
