// Validation engine: raw text → typed ResumeDocument, or every diagnostic at once.
// Pure and synchronous; safe to call once per keystroke or once per explicit apply.

pub mod checks;
pub mod diagnostic;
pub mod formats;
pub mod schema;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::ResumeDocument;

pub use diagnostic::{Diagnostic, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The raw text is not JSON. Exactly one root-level diagnostic.
    Parse,
    /// JSON that breaks one or more schema rules. One diagnostic per violation.
    Schema,
}

/// Why a raw string did not produce a `ResumeDocument`. `diagnostics` is never empty.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{} problem(s) found in the submitted résumé", diagnostics.len())]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationFailure {
    /// Flat `"path: message"` strings, in order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Parses `raw` as JSON and checks it against the résumé schema.
pub fn validate(raw: &str) -> Result<ResumeDocument, ValidationFailure> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        let message = e.to_string();
        let message = if message.trim().is_empty() {
            "Invalid JSON".to_string()
        } else {
            message
        };
        debug!(error = %message, "Rejected input: not valid JSON");
        ValidationFailure {
            kind: FailureKind::Parse,
            diagnostics: vec![Diagnostic::new(FieldPath::root(), message)],
        }
    })?;

    validate_value(&value)
}

/// Schema stage only, for callers that already hold parsed JSON.
pub fn validate_value(value: &serde_json::Value) -> Result<ResumeDocument, ValidationFailure> {
    schema::resume_document(value, &FieldPath::root())
        .into_result()
        .map_err(|diagnostics| {
            debug!(count = diagnostics.len(), "Rejected input: schema violations");
            ValidationFailure {
                kind: FailureKind::Schema,
                diagnostics,
            }
        })
}
