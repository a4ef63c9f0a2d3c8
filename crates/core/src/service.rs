//! Report generation service.
//!
//! [`ReportService`] is the facade the HTTP boundary talks to. It owns the
//! injected store handles plus the render configuration and wires the
//! pipeline together: validate input, snapshot the catalog, match, assemble.
//! Rendering stays a free function ([`crate::pdf::render_markdown`]) so the
//! boundary can race it against its timeout on a blocking task.

use crate::catalog::SymptomStore;
use crate::config::RenderConfig;
use crate::repository::ReportStore;
use crate::validation::{validate_markdown_content, validate_report_input};
use crate::{markdown, matcher, ReportError, ReportResult};
use std::sync::Arc;
use symrep_types::{ReportDocument, ReportRecord, SymptomEntry};
use uuid::Uuid;

/// Result of one matching run: the assembled document plus the entries
/// that matched, in presentation order.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub document: ReportDocument,
    pub matched: Vec<SymptomEntry>,
}

/// Facade over the matching/assembly pipeline and the report store.
#[derive(Clone)]
pub struct ReportService {
    catalog: Arc<dyn SymptomStore>,
    reports: Arc<dyn ReportStore>,
    config: RenderConfig,
}

impl ReportService {
    /// Creates a new service from injected store handles.
    pub fn new(
        catalog: Arc<dyn SymptomStore>,
        reports: Arc<dyn ReportStore>,
        config: RenderConfig,
    ) -> Self {
        Self {
            catalog,
            reports,
            config,
        }
    }

    /// Render and validation configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Generates a report document from raw symptom input.
    ///
    /// Validates the input, reads one consistent catalog snapshot, matches
    /// it against the input, and assembles the Markdown body. Zero matches
    /// is a successful outcome: the body carries the no-match sentence.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` for empty or oversized input.
    pub fn generate(&self, raw_input: &str) -> ReportResult<GeneratedReport> {
        validate_report_input(raw_input, self.config.max_input_chars())?;

        let snapshot = self.catalog.snapshot();
        let matched = matcher::match_symptoms(raw_input, &snapshot);
        tracing::debug!(matched = matched.len(), "generated symptom report");

        Ok(GeneratedReport {
            document: markdown::generate_document(raw_input, &matched),
            matched,
        })
    }

    /// Persists a document snapshot for the given owner.
    ///
    /// The document may have been hand-edited after generation; both fields
    /// are re-validated before storage.
    pub fn save(&self, owner_id: Uuid, document: &ReportDocument) -> ReportResult<ReportRecord> {
        validate_report_input(&document.raw_input, self.config.max_input_chars())?;
        validate_markdown_content(&document.markdown_body, self.config.max_input_chars())?;
        Ok(self.reports.save(owner_id, document))
    }

    pub fn get(&self, id: Uuid) -> ReportResult<ReportRecord> {
        self.reports.get(id).ok_or(ReportError::ReportNotFound(id))
    }

    pub fn list(&self) -> Vec<ReportRecord> {
        self.reports.list()
    }

    pub fn list_by_owner(&self, owner_id: Uuid) -> Vec<ReportRecord> {
        self.reports.list_by_owner(owner_id)
    }

    /// Replaces the Markdown content of a stored report.
    pub fn update_content(&self, id: Uuid, markdown_content: &str) -> ReportResult<ReportRecord> {
        validate_markdown_content(markdown_content, self.config.max_input_chars())?;
        self.reports.update_content(id, markdown_content)
    }

    pub fn remove(&self, id: Uuid) -> ReportResult<()> {
        self.reports.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemorySymptomStore;
    use crate::constants::NO_MATCH_SENTENCE;
    use crate::repository::InMemoryReportStore;

    fn service() -> ReportService {
        let catalog = InMemorySymptomStore::new();
        catalog.create("头痛", "持续性头部疼痛。", 1).unwrap();
        catalog.create("发烧", "体温升高。", 2).unwrap();
        ReportService::new(
            Arc::new(catalog),
            Arc::new(InMemoryReportStore::new()),
            RenderConfig::default(),
        )
    }

    #[test]
    fn test_generate_matches_and_assembles() {
        let generated = service().generate("我头痛还发烧").unwrap();
        assert_eq!(generated.document.raw_input, "我头痛还发烧");
        assert_eq!(generated.matched.len(), 2);
        let body = &generated.document.markdown_body;
        let headache = body.find("### 头痛").unwrap();
        let fever = body.find("### 发烧").unwrap();
        assert!(headache < fever);
    }

    #[test]
    fn test_generate_no_match_is_success() {
        let generated = service().generate("一切正常").unwrap();
        assert!(generated.matched.is_empty());
        assert!(generated.document.markdown_body.contains(NO_MATCH_SENTENCE));
        assert!(!generated.document.markdown_body.contains("###"));
    }

    #[test]
    fn test_generate_rejects_empty_input() {
        let err = service().generate("   ").unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }

    #[test]
    fn test_generate_rejects_oversized_input() {
        let svc = ReportService::new(
            Arc::new(InMemorySymptomStore::new()),
            Arc::new(InMemoryReportStore::new()),
            RenderConfig::new(std::time::Duration::from_secs(30), 10).unwrap(),
        );
        assert!(svc.generate(&"痛".repeat(11)).is_err());
        assert!(svc.generate(&"痛".repeat(10)).is_ok());
    }

    #[test]
    fn test_save_and_fetch_roundtrip() {
        let svc = service();
        let owner = Uuid::new_v4();
        let doc = svc.generate("我头痛").unwrap().document;
        let record = svc.save(owner, &doc).unwrap();

        let fetched = svc.get(record.id).unwrap();
        assert_eq!(fetched.markdown_content, doc.markdown_body);
        assert_eq!(svc.list_by_owner(owner).len(), 1);
    }

    #[test]
    fn test_save_rejects_empty_content() {
        let svc = service();
        let doc = ReportDocument {
            raw_input: "我头痛".into(),
            markdown_body: "  ".into(),
        };
        assert!(matches!(
            svc.save(Uuid::new_v4(), &doc).unwrap_err(),
            ReportError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_update_content() {
        let svc = service();
        let doc = svc.generate("我头痛").unwrap().document;
        let record = svc.save(Uuid::new_v4(), &doc).unwrap();

        let updated = svc.update_content(record.id, "# 更新后的内容\n").unwrap();
        assert_eq!(updated.markdown_content, "# 更新后的内容\n");
        assert!(svc.update_content(record.id, "  ").is_err());
    }

    #[test]
    fn test_get_missing_report() {
        assert!(matches!(
            service().get(Uuid::new_v4()).unwrap_err(),
            ReportError::ReportNotFound(_)
        ));
    }
}
