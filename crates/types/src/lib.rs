//! # Symrep Types
//!
//! Shared domain types for the symptom report system.
//!
//! This crate holds the small, dependency-light types that cross crate
//! boundaries: the symptom knowledge-base entry, the generated report
//! document, the persisted report record, and the `NonEmptyText` validated
//! string wrapper. It contains no I/O and no business logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. Input is trimmed of surrounding whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, `TextError::Empty` is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A single entry in the symptom knowledge base.
///
/// Entries are matched against free-text symptom descriptions by name and
/// presented in ascending `display_order`; ties keep catalog insertion order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SymptomEntry {
    /// Unique identifier assigned by the catalog store
    pub id: Uuid,
    /// Symptom name, unique within the catalog (matching key)
    pub name: String,
    /// Long-form description rendered into report subsections
    pub description: String,
    /// Canonical presentation order, ascending
    pub display_order: u32,
}

/// A generated report before persistence.
///
/// Pairs the raw free-text input with the Markdown body assembled from the
/// matched knowledge-base entries. The body may be hand-edited before the
/// document is saved as a [`ReportRecord`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportDocument {
    /// The raw symptom description the report was generated from
    pub raw_input: String,
    /// The assembled Markdown report body
    pub markdown_body: String,
}

/// A persisted report snapshot, keyed to an owning actor.
///
/// Records are immutable apart from `markdown_content`, which may be
/// replaced when an owner edits the report after generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportRecord {
    /// Unique identifier assigned by the report store
    pub id: Uuid,
    /// Identifier of the actor the report belongs to
    pub owner_id: Uuid,
    /// The raw symptom input captured at generation time
    pub symptom_input: String,
    /// The Markdown report content
    pub markdown_content: String,
    /// When the report was persisted
    pub created_at: DateTime<Utc>,
}
