//! Bounded PDF rendering.
//!
//! Rendering runs on a blocking task raced against the configured wall-clock
//! timeout. When the timer wins, the task is abandoned and its buffer is
//! dropped — no partial output ever reaches the caller. The core render
//! itself stays synchronous and knows nothing about timeouts.

use chrono::Utc;
use std::time::Duration;
use symrep_core::RenderError;

/// Runs a render closure on a blocking task, bounded by `timeout`.
pub(crate) async fn run_bounded<F>(timeout: Duration, render: F) -> Result<Vec<u8>, RenderError>
where
    F: FnOnce() -> Result<Vec<u8>, RenderError> + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(render)).await {
        Err(_elapsed) => Err(RenderError::Timeout(timeout.as_secs())),
        Ok(Err(join_error)) => Err(RenderError::Draw(format!(
            "render task failed: {join_error}"
        ))),
        Ok(Ok(result)) => result,
    }
}

/// Renders Markdown to PDF bytes within the given timeout.
pub async fn render_pdf_bounded(
    timeout: Duration,
    markdown: String,
) -> Result<Vec<u8>, RenderError> {
    run_bounded(timeout, move || symrep_core::render_markdown(&markdown)).await
}

/// Suggested download filename for a rendered report.
pub fn pdf_filename() -> String {
    format!("report-{}.pdf", Utc::now().timestamp_millis())
}
