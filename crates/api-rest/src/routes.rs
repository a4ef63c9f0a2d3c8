//! REST endpoints and router assembly.
//!
//! Handlers are thin: validate at the boundary, call into the core, and map
//! `ReportError` onto HTTP statuses. Render failures are logged with full
//! detail and surfaced as a generic message.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use symrep_core::validation::validate_markdown_content;
use symrep_core::{
    RenderError, ReportDocument, ReportError, ReportService, SymptomStore, SymptomUpdate,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::dto::{
    CreateReportReq, CreateSymptomReq, GenerateReportReq, GenerateReportRes, ListReportsQuery,
    RenderPdfReq, ReportRes, SymptomRes, UpdateReportReq, UpdateSymptomReq,
};
use crate::health::{HealthRes, HealthService};
use crate::render;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Symptom catalog handle for the management endpoints
    pub catalog: Arc<dyn SymptomStore>,
    /// Report generation/persistence facade
    pub service: ReportService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_symptoms,
        create_symptom,
        update_symptom,
        delete_symptom,
        generate_report,
        list_reports,
        create_report,
        get_report,
        update_report,
        delete_report,
        render_pdf,
        report_pdf
    ),
    components(schemas(
        HealthRes,
        SymptomRes,
        CreateSymptomReq,
        UpdateSymptomReq,
        GenerateReportReq,
        GenerateReportRes,
        CreateReportReq,
        UpdateReportReq,
        ReportRes,
        RenderPdfReq
    ))
)]
struct ApiDoc;

/// Builds the REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms).post(create_symptom))
        .route("/symptoms/:id", put(update_symptom).delete(delete_symptom))
        .route("/reports/generate", post(generate_report))
        .route("/reports/render", post(render_pdf))
        .route("/reports", get(list_reports).post(create_report))
        .route(
            "/reports/:id",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/reports/:id/pdf", get(report_pdf))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

/// Maps a core error onto an HTTP response.
///
/// `InvalidInput` messages are surfaced verbatim; internal failures are
/// logged and replaced with a generic message.
fn error_response(err: ReportError) -> (StatusCode, String) {
    match &err {
        ReportError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ReportError::DuplicateSymptomName(_) => (StatusCode::CONFLICT, err.to_string()),
        ReportError::SymptomNotFound(_) | ReportError::ReportNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        ReportError::Render(_) | ReportError::CatalogRead(_) | ReportError::CatalogParse(_) => {
            tracing::error!("internal error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    }
}

fn render_error_response(err: RenderError) -> (StatusCode, String) {
    tracing::error!("pdf render failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to generate PDF".to_string(),
    )
}

fn pdf_response(bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", render::pdf_filename()),
            ),
        ],
        bytes,
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Full symptom catalog in insertion order", body = [SymptomRes])
    )
)]
/// Lists the symptom catalog.
async fn list_symptoms(State(state): State<AppState>) -> Json<Vec<SymptomRes>> {
    let entries = state.catalog.snapshot();
    Json(entries.into_iter().map(SymptomRes::from).collect())
}

#[utoipa::path(
    post,
    path = "/symptoms",
    request_body = CreateSymptomReq,
    responses(
        (status = 201, description = "Symptom entry created", body = SymptomRes),
        (status = 400, description = "Invalid name or description"),
        (status = 409, description = "Name already exists")
    )
)]
/// Adds a symptom entry to the catalog.
async fn create_symptom(
    State(state): State<AppState>,
    Json(req): Json<CreateSymptomReq>,
) -> Result<(StatusCode, Json<SymptomRes>), (StatusCode, String)> {
    let entry = state
        .catalog
        .create(&req.name, &req.description, req.display_order)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[utoipa::path(
    put,
    path = "/symptoms/{id}",
    request_body = UpdateSymptomReq,
    params(("id" = Uuid, Path, description = "Symptom entry id")),
    responses(
        (status = 200, description = "Symptom entry updated", body = SymptomRes),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Name already exists")
    )
)]
/// Applies a partial update to a catalog entry.
async fn update_symptom(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSymptomReq>,
) -> Result<Json<SymptomRes>, (StatusCode, String)> {
    let update = SymptomUpdate {
        name: req.name,
        description: req.description,
        display_order: req.display_order,
    };
    let entry = state.catalog.update(id, update).map_err(error_response)?;
    Ok(Json(entry.into()))
}

#[utoipa::path(
    delete,
    path = "/symptoms/{id}",
    params(("id" = Uuid, Path, description = "Symptom entry id")),
    responses(
        (status = 204, description = "Symptom entry deleted"),
        (status = 404, description = "Entry not found")
    )
)]
/// Removes a catalog entry.
async fn delete_symptom(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.catalog.remove(id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/reports/generate",
    request_body = GenerateReportReq,
    responses(
        (status = 200, description = "Assembled Markdown report", body = GenerateReportRes),
        (status = 400, description = "Empty or oversized input")
    )
)]
/// Matches free-text input against the catalog and assembles a report.
///
/// Zero matches is a successful response whose body carries the fixed
/// no-match sentence.
async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportReq>,
) -> Result<Json<GenerateReportRes>, (StatusCode, String)> {
    let generated = state
        .service
        .generate(&req.symptom_input)
        .map_err(error_response)?;
    Ok(Json(GenerateReportRes {
        markdown_content: generated.document.markdown_body,
        matched_count: generated.matched.len(),
    }))
}

#[utoipa::path(
    get,
    path = "/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Stored reports", body = [ReportRes])
    )
)]
/// Lists stored reports, optionally filtered by owner.
async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Json<Vec<ReportRes>> {
    let records = match query.owner_id {
        Some(owner_id) => state.service.list_by_owner(owner_id),
        None => state.service.list(),
    };
    Json(records.into_iter().map(ReportRes::from).collect())
}

#[utoipa::path(
    post,
    path = "/reports",
    request_body = CreateReportReq,
    responses(
        (status = 201, description = "Report persisted", body = ReportRes),
        (status = 400, description = "Empty input or content")
    )
)]
/// Persists a report snapshot for an owner.
async fn create_report(
    State(state): State<AppState>,
    Json(req): Json<CreateReportReq>,
) -> Result<(StatusCode, Json<ReportRes>), (StatusCode, String)> {
    let document = ReportDocument {
        raw_input: req.symptom_input,
        markdown_body: req.markdown_content,
    };
    let record = state
        .service
        .save(req.owner_id, &document)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(
    get,
    path = "/reports/{id}",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Stored report", body = ReportRes),
        (status = 404, description = "Report not found")
    )
)]
/// Fetches one stored report.
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportRes>, (StatusCode, String)> {
    let record = state.service.get(id).map_err(error_response)?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/reports/{id}",
    request_body = UpdateReportReq,
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report content replaced", body = ReportRes),
        (status = 404, description = "Report not found")
    )
)]
/// Replaces the Markdown content of a stored report.
async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReportReq>,
) -> Result<Json<ReportRes>, (StatusCode, String)> {
    let record = state
        .service
        .update_content(id, &req.markdown_content)
        .map_err(error_response)?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    path = "/reports/{id}",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found")
    )
)]
/// Deletes a stored report.
async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.service.remove(id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/reports/render",
    request_body = RenderPdfReq,
    responses(
        (status = 200, description = "Rendered PDF download"),
        (status = 400, description = "Empty or oversized content"),
        (status = 500, description = "Render failure or timeout")
    )
)]
/// Renders submitted Markdown to a PDF download.
async fn render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderPdfReq>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let config = state.service.config();
    validate_markdown_content(&req.markdown_content, config.max_input_chars())
        .map_err(error_response)?;

    let bytes = render::render_pdf_bounded(config.render_timeout(), req.markdown_content)
        .await
        .map_err(render_error_response)?;
    Ok(pdf_response(bytes))
}

#[utoipa::path(
    get,
    path = "/reports/{id}/pdf",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Rendered PDF download"),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Render failure or timeout")
    )
)]
/// Renders a stored report to a PDF download.
async fn report_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = state.service.get(id).map_err(error_response)?;
    let timeout = state.service.config().render_timeout();

    let bytes = render::render_pdf_bounded(timeout, record.markdown_content)
        .await
        .map_err(render_error_response)?;
    Ok(pdf_response(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use symrep_core::{InMemoryReportStore, InMemorySymptomStore, RenderConfig};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let catalog = InMemorySymptomStore::new();
        catalog.create("头痛", "持续性头部疼痛。", 1).unwrap();
        catalog.create("发烧", "体温升高。", 2).unwrap();
        catalog.create("失眠", "难以入睡。", 5).unwrap();

        let catalog: Arc<dyn SymptomStore> = Arc::new(catalog);
        let reports: Arc<dyn symrep_core::ReportStore> = Arc::new(InMemoryReportStore::new());
        let service = ReportService::new(catalog.clone(), reports, RenderConfig::default());
        router(AppState { catalog, service })
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_symptoms() {
        let response = test_router()
            .oneshot(Request::get("/symptoms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_symptom_conflict() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/symptoms",
                json!({"name": "咳嗽", "description": "说明。", "display_order": 9}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/symptoms",
                json!({"name": "头痛", "description": "重复。", "display_order": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_generate_report_orders_by_display_order() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/reports/generate",
                json!({"symptom_input": "头痛和失眠"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["matched_count"], 2);
        let markdown = body["markdown_content"].as_str().unwrap();
        let headache = markdown.find("### 头痛").unwrap();
        let insomnia = markdown.find("### 失眠").unwrap();
        assert!(headache < insomnia);
    }

    #[tokio::test]
    async fn test_generate_report_rejects_empty_input() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/reports/generate",
                json!({"symptom_input": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_crud_roundtrip() {
        let app = test_router();
        let owner = Uuid::new_v4();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/reports",
                json!({
                    "owner_id": owner,
                    "symptom_input": "我头痛",
                    "markdown_content": "# 症状报告\n\n### 头痛\n"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/reports/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/reports?owner_id={owner}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_report_is_404() {
        let response = test_router()
            .oneshot(
                Request::get(format!("/reports/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_pdf_returns_pdf_bytes() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/reports/render",
                json!({"markdown_content": "# 症状报告\n\n### 头痛\n\n持续性头部疼痛。\n"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("report-"));
        assert!(disposition.ends_with(".pdf\""));

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_render_pdf_rejects_empty_content() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/reports/render",
                json!({"markdown_content": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
