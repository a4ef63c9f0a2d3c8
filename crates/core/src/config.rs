//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. Environment variables are never read during request
//! handling, which keeps behaviour consistent across multi-threaded runtimes
//! and test harnesses.

use crate::constants::{DEFAULT_RENDER_TIMEOUT_SECS, MAX_INPUT_CHARS};
use crate::{ReportError, ReportResult};
use std::time::Duration;

/// Render and input-validation configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    render_timeout: Duration,
    max_input_chars: usize,
}

impl RenderConfig {
    /// Create a new `RenderConfig`.
    pub fn new(render_timeout: Duration, max_input_chars: usize) -> ReportResult<Self> {
        if render_timeout.is_zero() {
            return Err(ReportError::InvalidInput(
                "render timeout must be greater than zero".into(),
            ));
        }
        if max_input_chars == 0 {
            return Err(ReportError::InvalidInput(
                "max input length must be greater than zero".into(),
            ));
        }

        Ok(Self {
            render_timeout,
            max_input_chars,
        })
    }

    /// Wall-clock budget for one PDF render.
    pub fn render_timeout(&self) -> Duration {
        self.render_timeout
    }

    /// Maximum accepted input length, in characters.
    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_timeout: Duration::from_secs(DEFAULT_RENDER_TIMEOUT_SECS),
            max_input_chars: MAX_INPUT_CHARS,
        }
    }
}

/// Parse the render timeout from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn render_timeout_from_env_value(value: Option<String>) -> ReportResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|e| {
            ReportError::InvalidInput(format!("invalid render timeout value: {e}"))
        })?,
        None => DEFAULT_RENDER_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(ReportError::InvalidInput(
            "render timeout must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}
