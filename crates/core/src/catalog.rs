//! Symptom knowledge-base store.
//!
//! The catalog is the ordered list of symptom entries the matcher runs
//! against. Persistence is abstracted behind the [`SymptomStore`] trait so
//! callers inject a store handle rather than reaching for process globals;
//! [`InMemorySymptomStore`] is the bundled implementation, optionally seeded
//! from a JSON file at startup.
//!
//! Name uniqueness is enforced here, at the store boundary, mirroring a
//! database unique constraint. The matcher itself never checks it.

use crate::error::{ReportError, ReportResult};
use crate::validation::validate_symptom_name;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use symrep_types::SymptomEntry;
use uuid::Uuid;

/// Partial update for a catalog entry. `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct SymptomUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<u32>,
}

/// Persistence handle for the symptom catalog.
///
/// `snapshot` returns the full ordered list in one call; the matcher reads
/// exactly one snapshot per invocation and never re-reads mid-run, so
/// interleaved mutations cannot produce a torn view.
pub trait SymptomStore: Send + Sync {
    /// Full catalog in insertion order.
    fn snapshot(&self) -> Vec<SymptomEntry>;

    /// Looks up a single entry by id.
    fn get(&self, id: Uuid) -> Option<SymptomEntry>;

    /// Adds an entry. Fails if the (trimmed) name is empty, oversized, or
    /// already present.
    fn create(&self, name: &str, description: &str, display_order: u32)
        -> ReportResult<SymptomEntry>;

    /// Applies a partial update. Renaming onto an existing name fails.
    fn update(&self, id: Uuid, update: SymptomUpdate) -> ReportResult<SymptomEntry>;

    /// Removes an entry.
    fn remove(&self, id: Uuid) -> ReportResult<()>;
}

/// In-memory catalog store.
///
/// Entries keep their insertion order, which is the tie-break order for
/// equal `display_order` values.
#[derive(Debug, Default)]
pub struct InMemorySymptomStore {
    entries: RwLock<Vec<SymptomEntry>>,
}

#[derive(serde::Deserialize)]
struct SeedEntry {
    name: String,
    description: String,
    #[serde(default)]
    display_order: u32,
}

impl InMemorySymptomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON seed file of
    /// `[{"name", "description", "display_order"}]` objects.
    ///
    /// Invalid entries (empty names, duplicates) are logged and skipped so
    /// one bad row does not prevent startup.
    ///
    /// # Errors
    ///
    /// Returns `CatalogRead` if the file cannot be read and `CatalogParse`
    /// if it is not valid JSON.
    pub fn from_seed_file(path: &Path) -> ReportResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(ReportError::CatalogRead)?;
        let seeds: Vec<SeedEntry> =
            serde_json::from_str(&contents).map_err(ReportError::CatalogParse)?;

        let store = Self::new();
        for seed in seeds {
            if let Err(e) = store.create(&seed.name, &seed.description, seed.display_order) {
                tracing::warn!("skipping invalid catalog seed entry: {e}");
            }
        }

        tracing::info!(entries = store.snapshot().len(), "symptom catalog seeded");
        Ok(store)
    }
}

impl SymptomStore for InMemorySymptomStore {
    fn snapshot(&self) -> Vec<SymptomEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn get(&self, id: Uuid) -> Option<SymptomEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    fn create(
        &self,
        name: &str,
        description: &str,
        display_order: u32,
    ) -> ReportResult<SymptomEntry> {
        validate_symptom_name(name)?;
        if description.trim().is_empty() {
            return Err(ReportError::InvalidInput(
                "symptom description cannot be empty".into(),
            ));
        }

        let name = name.trim();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|e| e.name == name) {
            return Err(ReportError::DuplicateSymptomName(name.to_string()));
        }

        let entry = SymptomEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            display_order,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&self, id: Uuid, update: SymptomUpdate) -> ReportResult<SymptomEntry> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ReportError::SymptomNotFound(id))?;

        if let Some(name) = &update.name {
            validate_symptom_name(name)?;
            let name = name.trim();
            if entries.iter().any(|e| e.id != id && e.name == name) {
                return Err(ReportError::DuplicateSymptomName(name.to_string()));
            }
            entries[index].name = name.to_string();
        }
        if let Some(description) = update.description {
            if description.trim().is_empty() {
                return Err(ReportError::InvalidInput(
                    "symptom description cannot be empty".into(),
                ));
            }
            entries[index].description = description;
        }
        if let Some(display_order) = update.display_order {
            entries[index].display_order = display_order;
        }

        Ok(entries[index].clone())
    }

    fn remove(&self, id: Uuid) -> ReportResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ReportError::SymptomNotFound(id))?;
        entries.remove(index);
        Ok(())
    }
}
