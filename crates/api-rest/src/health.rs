use serde::Serialize;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service used by the REST API.
///
/// Provides a standardised way to report liveness for monitoring and load
/// balancer health checks.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Static health check.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "symrep is alive".into(),
        }
    }
}
