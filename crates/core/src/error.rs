use uuid::Uuid;

/// Failures of the Markdown-to-PDF rendering pipeline.
///
/// Every variant carries the underlying cause. Callers at the HTTP boundary
/// surface a generic failure message and log the full detail.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("markdown conversion failed: {0}")]
    Convert(String),
    #[error("pdf drawing failed: {0}")]
    Draw(String),
    #[error("pdf rendering timed out after {0} seconds")]
    Timeout(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("symptom entry not found: {0}")]
    SymptomNotFound(Uuid),
    #[error("report not found: {0}")]
    ReportNotFound(Uuid),
    #[error("symptom name already exists: {0}")]
    DuplicateSymptomName(String),
    #[error("failed to read catalog seed file: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse catalog seed file: {0}")]
    CatalogParse(serde_json::Error),
    #[error("pdf rendering failed: {0}")]
    Render(#[from] RenderError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
