//! # Symrep Core
//!
//! Core business logic for the symptom report system.
//!
//! This crate contains the pure matching/assembly/rendering pipelines and
//! the injected persistence handles:
//! - Substring matching of free-text input against the symptom catalog
//! - Markdown report assembly from matched entries
//! - Line-oriented Markdown → HTML → PDF rendering
//! - Catalog and report stores with in-memory implementations
//!
//! **No API concerns**: HTTP serving, DTOs, and timeout enforcement belong
//! in `api-rest`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod html;
pub mod markdown;
pub mod matcher;
pub mod pdf;
pub mod repository;
pub mod service;
pub mod validation;

pub use catalog::{InMemorySymptomStore, SymptomStore, SymptomUpdate};
pub use config::RenderConfig;
pub use error::{RenderError, ReportError, ReportResult};
pub use markdown::assemble_report;
pub use matcher::match_symptoms;
pub use pdf::render_markdown;
pub use repository::{InMemoryReportStore, ReportStore};
pub use service::{GeneratedReport, ReportService};
pub use symrep_types::{NonEmptyText, ReportDocument, ReportRecord, SymptomEntry, TextError};
