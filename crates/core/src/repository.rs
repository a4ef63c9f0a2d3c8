//! Report persistence.
//!
//! Generated reports are stored as immutable `{symptom_input,
//! markdown_content}` snapshots keyed to an owning actor. The store is
//! injected behind the [`ReportStore`] trait; [`InMemoryReportStore`] is the
//! bundled implementation.

use crate::error::{ReportError, ReportResult};
use chrono::Utc;
use std::sync::{PoisonError, RwLock};
use symrep_types::{ReportDocument, ReportRecord};
use uuid::Uuid;

/// Persistence handle for report records.
pub trait ReportStore: Send + Sync {
    /// Persists a document snapshot for the given owner and returns the
    /// stored record.
    fn save(&self, owner_id: Uuid, document: &ReportDocument) -> ReportRecord;

    /// All stored reports, oldest first.
    fn list(&self) -> Vec<ReportRecord>;

    /// Reports belonging to one owner, oldest first.
    fn list_by_owner(&self, owner_id: Uuid) -> Vec<ReportRecord>;

    /// Looks up a report by id.
    fn get(&self, id: Uuid) -> Option<ReportRecord>;

    /// Replaces the Markdown content of a stored report (owner edits).
    fn update_content(&self, id: Uuid, markdown_content: &str) -> ReportResult<ReportRecord>;

    /// Deletes a report.
    fn remove(&self, id: Uuid) -> ReportResult<()>;
}

/// In-memory report store.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    records: RwLock<Vec<ReportRecord>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn save(&self, owner_id: Uuid, document: &ReportDocument) -> ReportRecord {
        let record = ReportRecord {
            id: Uuid::new_v4(),
            owner_id,
            symptom_input: document.raw_input.clone(),
            markdown_content: document.markdown_body.clone(),
            created_at: Utc::now(),
        };
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        record
    }

    fn list(&self) -> Vec<ReportRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn list_by_owner(&self, owner_id: Uuid) -> Vec<ReportRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn get(&self, id: Uuid) -> Option<ReportRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    fn update_content(&self, id: Uuid, markdown_content: &str) -> ReportResult<ReportRecord> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReportError::ReportNotFound(id))?;
        record.markdown_content = markdown_content.to_string();
        Ok(record.clone())
    }

    fn remove(&self, id: Uuid) -> ReportResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(ReportError::ReportNotFound(id))?;
        records.remove(index);
        Ok(())
    }
}
