use std::path::Path;
use std::sync::Arc;

use api_rest::{router, AppState};
use symrep_core::{
    config, constants, InMemoryReportStore, InMemorySymptomStore, RenderConfig, ReportService,
    ReportStore, SymptomStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the symrep application
///
/// Starts the REST server and serves the symptom report API.
///
/// # Environment Variables
/// - `SYMREP_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SYMREP_CATALOG_PATH`: JSON seed file for the symptom catalog (optional)
/// - `SYMREP_RENDER_TIMEOUT_SECS`: PDF render budget in seconds (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symrep=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SYMREP_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let render_timeout =
        config::render_timeout_from_env_value(std::env::var("SYMREP_RENDER_TIMEOUT_SECS").ok())?;
    let render_config = RenderConfig::new(render_timeout, constants::MAX_INPUT_CHARS)?;

    let catalog: Arc<dyn SymptomStore> = match std::env::var("SYMREP_CATALOG_PATH") {
        Ok(path) => Arc::new(InMemorySymptomStore::from_seed_file(Path::new(&path))?),
        Err(_) => {
            tracing::warn!("SYMREP_CATALOG_PATH not set, starting with an empty symptom catalog");
            Arc::new(InMemorySymptomStore::new())
        }
    };
    let reports: Arc<dyn ReportStore> = Arc::new(InMemoryReportStore::new());
    let service = ReportService::new(catalog.clone(), reports, render_config);

    tracing::info!("++ Starting symrep REST on {}", rest_addr);

    let app = router(AppState { catalog, service });
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
