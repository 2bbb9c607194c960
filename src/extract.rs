//! Per-platform field extractors. Pure text-in, struct-out: the same input
//! and platform always produce the same draft and report, and a missing
//! field is never an error, only a sentinel plus a cleared report flag.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::{ExtractionReport, JobApplication, Platform};

/// The browser-extension helper puts `"HTML: <markup>\n'mf-URL: <url>"` on
/// the clipboard; both markers must be tolerated in raw input.
static MF_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mf-URL:\s*(.+)").expect("static regex")
});

/// Labeled lines like "Location: San Francisco, CA" found in pasted text.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(company|position|title|location|salary(?: range)?|workplace(?: type)?)\s*:\s*(.+)$")
        .expect("static regex")
});

static SALARY_DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d+(?:,\d{3})*)\s*-\s*\$(\d+(?:,\d{3})*)").expect("static regex")
});

static SALARY_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d+(?:,\d{3})*)\s+to\s+\$(\d+(?:,\d{3})*)").expect("static regex")
});

const WORKPLACE_ANCHOR: &str = "Matches your job preferences, workplace type is";

/// LinkedIn chrome that leaks into copied posting text.
const LINKEDIN_NOISE: [&str; 2] = ["Share", "Show more options"];

/// Runs the extraction rules for `platform` over `raw_text` and returns an
/// unsaved draft plus the per-field report. Dispatch is a closed enum match;
/// unknown platform tags are rejected upstream before this is called.
pub fn extract(platform: Platform, raw_text: &str) -> (JobApplication, ExtractionReport) {
    let (body, source_url) = split_clipboard_blob(raw_text);
    let (mut draft, mut report) = match platform {
        Platform::Linkedin => extract_linkedin(&body),
        Platform::Greenhouse => extract_greenhouse(&body),
    };
    draft.website = platform.as_str().to_string();
    report.source_url = source_url;
    (draft, report)
}

/// Separates posting text from the extension's clipboard framing: strips a
/// leading `HTML:` marker and lifts the first `mf-URL:` line out of the body.
fn split_clipboard_blob(raw: &str) -> (String, Option<String>) {
    let mut url = None;
    let mut kept: Vec<&str> = Vec::new();
    for line in raw.lines() {
        if let Some(caps) = MF_URL_RE.captures(line) {
            if url.is_none() {
                url = Some(caps[1].trim().to_string());
            }
            continue;
        }
        kept.push(line);
    }
    let body = kept.join("\n");
    let body = match body.trim_start().strip_prefix("HTML:") {
        Some(rest) => rest.trim_start().to_string(),
        None => body,
    };
    (body, url)
}

/// LinkedIn postings arrive as loosely structured copied text. Labeled lines
/// win outright; the remaining lines fall back to the positional layout of a
/// copied posting header (company, position, location·extras).
fn extract_linkedin(text: &str) -> (JobApplication, ExtractionReport) {
    let mut draft = JobApplication::draft();
    let mut report = ExtractionReport::default();
    let mut positional: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || LINKEDIN_NOISE.contains(&trimmed) {
            continue;
        }
        if let Some(caps) = LABEL_RE.captures(line) {
            let value = caps[2].trim();
            if value.is_empty() {
                continue;
            }
            match caps[1].to_lowercase().as_str() {
                "company" => {
                    draft.company = value.to_string();
                    report.company = true;
                }
                "position" | "title" => {
                    draft.position = value.to_string();
                    report.position = true;
                }
                "location" => {
                    draft.location = value.to_string();
                    report.location = true;
                }
                "salary" | "salary range" => {
                    draft.salary_range = value.to_string();
                    report.salary_range = true;
                }
                _ => {
                    // "workplace" / "workplace type"
                    draft.workplace_type = value.to_string();
                    report.workplace_type = true;
                }
            }
            continue;
        }
        if let Some(idx) = line.find(WORKPLACE_ANCHOR) {
            let rest = line[idx + WORKPLACE_ANCHOR.len()..].trim();
            if !rest.is_empty() {
                draft.workplace_type = rest.to_string();
                report.workplace_type = true;
            }
        }
        if trimmed.contains('$') {
            draft.salary_range = trimmed.to_string();
            report.salary_range = true;
        }
        positional.push(trimmed);
    }

    for (i, line) in positional.iter().enumerate() {
        match i {
            0 if !report.company => {
                draft.company = line.to_string();
                report.company = true;
            }
            1 if !report.position => {
                draft.position = line.to_string();
                report.position = true;
            }
            2 if !report.location => {
                // "San Francisco, CA · Reposted 3 days ago"
                let head = line.split('·').next().unwrap_or(line).trim();
                if !head.is_empty() {
                    draft.location = head.to_string();
                    report.location = true;
                }
            }
            _ => {}
        }
    }

    (draft, report)
}

/// Greenhouse postings come through as page markup; fields sit at known
/// spots in the document structure rather than behind labels.
fn extract_greenhouse(text: &str) -> (JobApplication, ExtractionReport) {
    let mut draft = JobApplication::draft();
    let mut report = ExtractionReport::default();
    let document = Html::parse_document(text);

    if let Ok(selector) = Selector::parse("div.job__title h1") {
        if let Some(element) = document.select(&selector).next() {
            let title = element.text().collect::<String>();
            let title = title.trim();
            if !title.is_empty() {
                draft.position = title.to_string();
                report.position = true;
            }
        }
    }

    if let Ok(selector) = Selector::parse("div.job__location div") {
        if let Some(element) = document.select(&selector).next() {
            let location = element.text().collect::<String>();
            let location = location.trim();
            if !location.is_empty() {
                draft.location = location.to_string();
                report.location = true;
            }
        }
    }

    // Company name rides on the header logo's alt text.
    if let Ok(selector) = Selector::parse(r#"img[alt$="Logo"]"#) {
        if let Some(element) = document.select(&selector).next() {
            if let Some(alt) = element.value().attr("alt") {
                let company = alt.trim_end_matches("Logo").trim();
                if !company.is_empty() {
                    draft.company = company.to_string();
                    report.company = true;
                }
            }
        }
    }

    let mut ranges: Vec<String> = Vec::new();
    for caps in SALARY_DASH_RE.captures_iter(text) {
        ranges.push(format!("${} - ${}", &caps[1], &caps[2]));
    }
    for caps in SALARY_TO_RE.captures_iter(text) {
        ranges.push(format!("${} - ${}", &caps[1], &caps[2]));
    }
    if !ranges.is_empty() {
        draft.salary_range = ranges.join(", ");
        report.salary_range = true;
    }

    // Greenhouse pages carry no workplace-type marker; the sentinel stands.
    (draft, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_FOUND;

    #[test]
    fn test_linkedin_positional_layout() {
        let text = "TestCompany Inc\n\
                    Senior Developer\n\
                    San Francisco, CA · Remote\n\
                    $100,000 - $150,000\n\
                    Full-time\n\
                    Share\n\
                    Show more options\n\
                    Matches your job preferences, workplace type is Remote";
        let (draft, report) = extract(Platform::Linkedin, text);

        assert_eq!(draft.company, "TestCompany Inc");
        assert_eq!(draft.position, "Senior Developer");
        assert_eq!(draft.location, "San Francisco, CA");
        assert_eq!(draft.salary_range, "$100,000 - $150,000");
        assert_eq!(draft.workplace_type, "Remote");
        assert_eq!(draft.website, "linkedin");
        assert_eq!(draft.status, "SUBMITTED");
        assert!(draft.app_id.is_none());
        assert_eq!(report.found_count(), 5);
    }

    #[test]
    fn test_linkedin_labeled_lines_win() {
        let text = "Location: San Francisco, CA\nCompany: Acme Corp";
        let (draft, report) = extract(Platform::Linkedin, text);

        assert_eq!(draft.location, "San Francisco, CA");
        assert_eq!(draft.company, "Acme Corp");
        assert_eq!(draft.position, NOT_FOUND);
        assert!(report.location);
        assert!(report.company);
        assert!(!report.position);
    }

    #[test]
    fn test_linkedin_blank_and_noise_lines_skipped() {
        let text = "\nShare\n\nAcme Corp\n\nStaff Engineer\nDenver, CO · Hybrid\n";
        let (draft, _) = extract(Platform::Linkedin, text);
        assert_eq!(draft.company, "Acme Corp");
        assert_eq!(draft.position, "Staff Engineer");
        assert_eq!(draft.location, "Denver, CO");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Acme Corp\nStaff Engineer\nDenver, CO · Hybrid\n$120,000 - $160,000";
        let first = extract(Platform::Linkedin, text);
        let second = extract(Platform::Linkedin, text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_linkedin_no_fields_everything_sentinel() {
        let (draft, report) = extract(Platform::Linkedin, "\n\n\n");
        for field in [
            &draft.company,
            &draft.position,
            &draft.location,
            &draft.salary_range,
            &draft.workplace_type,
        ] {
            assert_eq!(field.as_str(), NOT_FOUND);
        }
        assert_eq!(report.found_count(), 0);
    }

    #[test]
    fn test_greenhouse_structure_extraction() {
        let html = r#"
        <div class="job__header">
            <div class="job__title">
                <h1 class="section-header section-header--large font-primary">Senior Software Engineer</h1>
                <div class="job__location">
                    <svg class="svg-icon"></svg>
                    <div>Remote</div>
                </div>
            </div>
        </div>
        <div>
            <p>Salary: $120,000 - $180,000 per year</p>
            <p>Additional compensation: $150,000-$200,000 equity</p>
        </div>
        <img alt="TestCompany Logo" src="test.png">
        mf-URL: https://example.com/job/123
        "#;
        let (draft, report) = extract(Platform::Greenhouse, html);

        assert_eq!(draft.position, "Senior Software Engineer");
        assert_eq!(draft.location, "Remote");
        assert_eq!(draft.company, "TestCompany");
        assert_eq!(draft.salary_range, "$120,000 - $180,000, $150,000 - $200,000");
        assert_eq!(draft.workplace_type, NOT_FOUND);
        assert_eq!(draft.website, "greenhouse");
        assert_eq!(
            report.source_url.as_deref(),
            Some("https://example.com/job/123")
        );
    }

    #[test]
    fn test_greenhouse_salary_to_pattern() {
        let html = "<p>Pay: $90,000 to $110,000 annually</p>";
        let (draft, report) = extract(Platform::Greenhouse, html);
        assert_eq!(draft.salary_range, "$90,000 - $110,000");
        assert!(report.salary_range);
    }

    #[test]
    fn test_greenhouse_malformed_markup_does_not_fail() {
        let (draft, report) = extract(Platform::Greenhouse, "<div><h1>truncated");
        assert_eq!(draft.position, NOT_FOUND);
        assert_eq!(report.found_count(), 0);
    }

    #[test]
    fn test_clipboard_blob_framing() {
        let blob = "HTML: <div class=\"job__title\"><h1>Platform Engineer</h1></div>\n\
                    'mf-URL: https://job-boards.greenhouse.io/acme/jobs/42";
        let (draft, report) = extract(Platform::Greenhouse, blob);
        assert_eq!(draft.position, "Platform Engineer");
        assert_eq!(
            report.source_url.as_deref(),
            Some("https://job-boards.greenhouse.io/acme/jobs/42")
        );
    }

    #[test]
    fn test_linkedin_tolerates_url_suffix_line() {
        let text = "Acme Corp\nStaff Engineer\nDenver, CO\nmf-URL: https://linkedin.com/jobs/view/99";
        let (draft, report) = extract(Platform::Linkedin, text);
        assert_eq!(draft.location, "Denver, CO");
        assert_eq!(
            report.source_url.as_deref(),
            Some("https://linkedin.com/jobs/view/99")
        );
    }
}
