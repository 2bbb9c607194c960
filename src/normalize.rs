//! Cleans extracted drafts so every field is safe to store and display:
//! markup fragments stripped, whitespace collapsed, label punctuation
//! trimmed, and empty values replaced with the "Not found" sentinel.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EngineError, Result};
use crate::models::{JobApplication, NOT_FOUND, Status};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("static regex")
});

// Decoded in this order; anything rarer than these leaks through as-is.
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Punctuation that label-based extraction tends to leave on the edges of a
/// captured run.
const EDGE_PUNCT: [char; 6] = [':', ';', ',', '-', '·', '|'];

/// Removes HTML tags and decodes the common entities.
pub fn clean_html(raw: &str) -> String {
    let mut cleaned = TAG_RE.replace_all(raw, "").into_owned();
    for (entity, plain) in ENTITIES {
        cleaned = cleaned.replace(entity, plain);
    }
    cleaned.trim().to_string()
}

fn normalize_field(raw: &str) -> String {
    let cleaned = clean_html(raw);
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed
        .trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCT.contains(&c))
        .to_string();
    if trimmed.is_empty() {
        NOT_FOUND.to_string()
    } else {
        trimmed
    }
}

/// Canonicalizes an extracted draft. Infallible: every extractable field
/// comes out either non-empty or as the sentinel. Notes are user-authored
/// and only get a whitespace trim, never the sentinel. A recognized status
/// token is mapped to its canonical spelling; anything else is left for
/// save-time validation to reject.
pub fn normalize(mut draft: JobApplication) -> JobApplication {
    for field in [
        &mut draft.company,
        &mut draft.position,
        &mut draft.location,
        &mut draft.salary_range,
        &mut draft.workplace_type,
    ] {
        *field = normalize_field(field);
    }
    draft.notes = draft.notes.trim().to_string();
    if let Some(status) = Status::parse(&draft.status) {
        draft.status = status.as_str().to_string();
    }
    draft
}

/// Save-time status check: blank defaults to SUBMITTED, anything outside the
/// enum is a validation error, never silently coerced.
pub fn validate_status(raw: &str) -> Result<Status> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Status::Submitted);
    }
    Status::parse(trimmed)
        .ok_or_else(|| EngineError::Validation(format!("unrecognized status: {trimmed}")))
}
