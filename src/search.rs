//! Scan-based search over stored records: fetch, filter, order. No index;
//! the corpus is personal-scale.

use crate::models::JobApplication;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Company,
    Position,
    FullText,
}

impl SearchMode {
    pub fn parse(tag: &str) -> Option<SearchMode> {
        match tag.trim().to_lowercase().as_str() {
            "company" => Some(SearchMode::Company),
            "position" => Some(SearchMode::Position),
            "fulltext" | "full-text" | "full_text" | "full text" => Some(SearchMode::FullText),
            _ => None,
        }
    }
}

/// Case-insensitive substring search. An empty or whitespace-only term
/// yields no results rather than everything. Results come back most
/// recently applied first, ties broken by id for determinism.
pub fn search(records: Vec<JobApplication>, term: &str, mode: SearchMode) -> Vec<JobApplication> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<JobApplication> = records
        .into_iter()
        .filter(|app| matches(app, &needle, mode))
        .collect();
    hits.sort_by(|a, b| {
        b.date_applied
            .cmp(&a.date_applied)
            .then(b.app_id.cmp(&a.app_id))
    });
    hits
}

fn matches(app: &JobApplication, needle: &str, mode: SearchMode) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    match mode {
        SearchMode::Company => contains(&app.company),
        SearchMode::Position => contains(&app.position),
        SearchMode::FullText => {
            contains(&app.company)
                || contains(&app.position)
                || contains(&app.location)
                || contains(&app.notes)
                || contains(&app.salary_range)
                || contains(&app.workplace_type)
        }
    }
}
