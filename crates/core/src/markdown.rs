//! Report assembly from matched knowledge-base entries.
//!
//! Builds the Markdown report body from a fixed section skeleton: title
//! heading, static introduction, details heading, then one subsection per
//! matched entry (sub-heading = entry name, body = entry description). When
//! nothing matched, the details section carries a single fixed sentence
//! instead of subsections.
//!
//! Assembly is pure and total: identical arguments always produce
//! byte-identical output, and no input is ever rejected here.

use crate::constants::{
    DETAILS_HEADING, INTRO_HEADING, INTRO_TEXT, NO_MATCH_SENTENCE, REPORT_TITLE_HEADING,
};
use symrep_types::{ReportDocument, SymptomEntry};

/// Assembles the Markdown report body for the given matched entries.
///
/// The entries are rendered in the order given; callers pass the output of
/// [`crate::matcher::match_symptoms`], which is already ordered by
/// `display_order`.
pub fn assemble_report(matches: &[SymptomEntry]) -> String {
    let mut body = String::new();
    body.push_str(REPORT_TITLE_HEADING);
    body.push_str("\n\n");
    body.push_str(INTRO_HEADING);
    body.push_str("\n\n");
    body.push_str(INTRO_TEXT);
    body.push_str("\n\n");
    body.push_str(DETAILS_HEADING);
    body.push_str("\n\n");

    if matches.is_empty() {
        body.push_str(NO_MATCH_SENTENCE);
        body.push_str("\n\n");
    } else {
        for entry in matches {
            body.push_str(&format!("### {}\n\n", entry.name));
            body.push_str(&format!("{}\n\n", entry.description));
        }
    }

    body
}

/// Pairs raw input with its assembled Markdown body.
pub fn generate_document(raw_input: &str, matches: &[SymptomEntry]) -> ReportDocument {
    ReportDocument {
        raw_input: raw_input.to_owned(),
        markdown_body: assemble_report(matches),
    }
}
