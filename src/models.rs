use serde::{Deserialize, Serialize};

/// Canonical placeholder for a field the extractor could not resolve.
/// Distinct from an empty string so the UI always has something to render.
pub const NOT_FOUND: &str = "Not found";

/// Application lifecycle status. Stored records always carry one of these
/// five values; no transition ordering is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Submitted,
    Rejected,
    PhoneScreen,
    RemoteInterview,
    OnSiteInterview,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Submitted,
        Status::Rejected,
        Status::PhoneScreen,
        Status::RemoteInterview,
        Status::OnSiteInterview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "SUBMITTED",
            Status::Rejected => "REJECTED",
            Status::PhoneScreen => "PHONE_SCREEN",
            Status::RemoteInterview => "REMOTE_INTERVIEW",
            Status::OnSiteInterview => "ON_SITE_INTERVIEW",
        }
    }

    /// Case-insensitive parse; spaces and hyphens are treated as underscores
    /// so "phone screen" and "on-site interview" resolve too.
    pub fn parse(token: &str) -> Option<Status> {
        let canon = token.trim().to_uppercase().replace([' ', '-'], "_");
        Status::ALL.iter().copied().find(|s| s.as_str() == canon)
    }
}

/// Source job board whose posting format decides which extraction rules
/// apply. Closed set, dispatched explicitly; there is no auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linkedin,
    Greenhouse,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Greenhouse => "greenhouse",
        }
    }

    pub fn parse(tag: &str) -> Option<Platform> {
        match tag.trim().to_lowercase().as_str() {
            "linkedin" => Some(Platform::Linkedin),
            "greenhouse" => Some(Platform::Greenhouse),
            _ => None,
        }
    }
}

/// A tracked job application.
///
/// `app_id` and `date_applied` are `None` on a draft (extracted but not yet
/// persisted) and set by the store on first save; `app_id` never changes
/// afterwards. Textual fields hold either a non-empty trimmed value or the
/// [`NOT_FOUND`] sentinel, never an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobApplication {
    pub app_id: Option<i64>,
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary_range: String,
    pub workplace_type: String,
    pub status: String,
    pub notes: String,
    pub date_applied: Option<String>,
    pub website: String,
}

impl Default for JobApplication {
    fn default() -> Self {
        JobApplication::draft()
    }
}

impl JobApplication {
    /// A fresh draft with every extractable field set to the sentinel.
    pub fn draft() -> Self {
        JobApplication {
            app_id: None,
            company: NOT_FOUND.to_string(),
            position: NOT_FOUND.to_string(),
            location: NOT_FOUND.to_string(),
            salary_range: NOT_FOUND.to_string(),
            workplace_type: NOT_FOUND.to_string(),
            status: Status::Submitted.as_str().to_string(),
            notes: String::new(),
            date_applied: None,
            website: String::new(),
        }
    }
}

/// Per-field found/not-found flags for one extraction run, plus the source
/// URL lifted from the clipboard blob's `mf-URL:` line when present. Lets
/// the UI flag low-confidence fields without inspecting sentinel strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub company: bool,
    pub position: bool,
    pub location: bool,
    pub salary_range: bool,
    pub workplace_type: bool,
    pub source_url: Option<String>,
}

impl ExtractionReport {
    /// Re-derives the found flags from a normalized draft. A captured value
    /// that cleaned away to the sentinel (say, a labeled line holding only
    /// punctuation) must not keep reporting as found.
    pub fn align_with(&mut self, draft: &JobApplication) {
        self.company = draft.company != NOT_FOUND;
        self.position = draft.position != NOT_FOUND;
        self.location = draft.location != NOT_FOUND;
        self.salary_range = draft.salary_range != NOT_FOUND;
        self.workplace_type = draft.workplace_type != NOT_FOUND;
    }

    pub fn found_count(&self) -> usize {
        [
            self.company,
            self.position,
            self.location,
            self.salary_range,
            self.workplace_type,
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_canonical_and_loose() {
        assert_eq!(Status::parse("SUBMITTED"), Some(Status::Submitted));
        assert_eq!(Status::parse("submitted"), Some(Status::Submitted));
        assert_eq!(Status::parse("phone screen"), Some(Status::PhoneScreen));
        assert_eq!(Status::parse("on-site interview"), Some(Status::OnSiteInterview));
        assert_eq!(Status::parse("  rejected  "), Some(Status::Rejected));
        assert_eq!(Status::parse("INTERVIEWING"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("linkedin"), Some(Platform::Linkedin));
        assert_eq!(Platform::parse("Greenhouse"), Some(Platform::Greenhouse));
        assert_eq!(Platform::parse("indeed"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn test_job_application_wire_names() {
        let mut app = JobApplication::draft();
        app.app_id = Some(7);
        app.salary_range = "$100,000 - $150,000".to_string();
        let json = serde_json::to_string(&app).unwrap();
        assert!(json.contains("\"appId\":7"));
        assert!(json.contains("\"salaryRange\""));
        assert!(json.contains("\"workplaceType\""));
        assert!(json.contains("\"dateApplied\""));
    }

    #[test]
    fn test_draft_fields_are_sentinel_not_empty() {
        let draft = JobApplication::draft();
        for field in [
            &draft.company,
            &draft.position,
            &draft.location,
            &draft.salary_range,
            &draft.workplace_type,
        ] {
            assert_eq!(field.as_str(), NOT_FOUND);
        }
        assert_eq!(draft.status, "SUBMITTED");
        assert!(draft.app_id.is_none());
    }

    #[test]
    fn test_report_align_with_clears_sentinel_fields() {
        let mut draft = JobApplication::draft();
        draft.company = "Acme".to_string();
        let mut report = ExtractionReport {
            company: true,
            position: true,
            ..Default::default()
        };
        report.align_with(&draft);
        assert!(report.company);
        assert!(!report.position);
        assert_eq!(report.found_count(), 1);
    }

    #[test]
    fn test_report_found_count() {
        let mut report = ExtractionReport::default();
        assert_eq!(report.found_count(), 0);
        report.company = true;
        report.location = true;
        assert_eq!(report.found_count(), 2);
    }
}
