//! Request and response types for the REST API.
//!
//! DTOs are kept separate from the domain types in `symrep-types` so the
//! wire format can evolve without touching the core. Field names follow the
//! JSON snake_case convention used across the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use symrep_types::{ReportRecord, SymptomEntry};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct SymptomRes {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub display_order: u32,
}

impl From<SymptomEntry> for SymptomRes {
    fn from(entry: SymptomEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            display_order: entry.display_order,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSymptomReq {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub display_order: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSymptomReq {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateReportReq {
    pub symptom_input: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateReportRes {
    pub markdown_content: String,
    pub matched_count: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportReq {
    pub owner_id: Uuid,
    pub symptom_input: String,
    pub markdown_content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportReq {
    pub markdown_content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportRes {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub symptom_input: String,
    pub markdown_content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRecord> for ReportRes {
    fn from(record: ReportRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            symptom_input: record.symptom_input,
            markdown_content: record.markdown_content,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenderPdfReq {
    pub markdown_content: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListReportsQuery {
    /// Restrict the listing to one owner.
    pub owner_id: Option<Uuid>,
}
