//! Input validation utilities.
//!
//! This module contains functions for validating user inputs before they
//! reach matching, persistence, or rendering. The matcher and assembler
//! themselves are total; validation happens once at the service boundary.

use crate::constants::MAX_SYMPTOM_NAME_CHARS;
use crate::{ReportError, ReportResult};

/// Validates raw symptom input before a matching run.
///
/// Rejects empty/whitespace-only input and input exceeding `max_chars`
/// characters. Content is otherwise unrestricted: free text in any script
/// is accepted, and text that matches nothing is a valid input.
///
/// # Errors
///
/// Returns `ReportError::InvalidInput` if the input is empty or oversized.
pub fn validate_report_input(input: &str, max_chars: usize) -> ReportResult<()> {
    if input.trim().is_empty() {
        return Err(ReportError::InvalidInput(
            "symptom input cannot be empty".into(),
        ));
    }

    if input.chars().count() > max_chars {
        return Err(ReportError::InvalidInput(format!(
            "symptom input exceeds maximum length of {} characters",
            max_chars
        )));
    }

    Ok(())
}

/// Validates Markdown content submitted for persistence or rendering.
///
/// Same bounds as report input: non-empty after trimming, at most
/// `max_chars` characters.
pub fn validate_markdown_content(content: &str, max_chars: usize) -> ReportResult<()> {
    if content.trim().is_empty() {
        return Err(ReportError::InvalidInput(
            "report content cannot be empty".into(),
        ));
    }

    if content.chars().count() > max_chars {
        return Err(ReportError::InvalidInput(format!(
            "report content exceeds maximum length of {} characters",
            max_chars
        )));
    }

    Ok(())
}

/// Validates a symptom name for catalog insertion or update.
///
/// Names are the matching key: non-empty after trimming and bounded to
/// [`MAX_SYMPTOM_NAME_CHARS`] characters.
pub fn validate_symptom_name(name: &str) -> ReportResult<()> {
    if name.trim().is_empty() {
        return Err(ReportError::InvalidInput(
            "symptom name cannot be empty".into(),
        ));
    }

    if name.chars().count() > MAX_SYMPTOM_NAME_CHARS {
        return Err(ReportError::InvalidInput(format!(
            "symptom name exceeds maximum length of {} characters",
            MAX_SYMPTOM_NAME_CHARS
        )));
    }

    Ok(())
}
