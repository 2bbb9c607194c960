//! The facade the UI talks to: extract -> review -> save, plus the search
//! and listing reads.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::db::Database;
use crate::error::{EngineError, Result};
use crate::extract;
use crate::models::{ExtractionReport, JobApplication, Platform};
use crate::normalize;
use crate::search::{self, SearchMode};

/// Composes the extractors, normalizer, store and search behind the four
/// operations the UI calls.
///
/// A draft returned by [`Engine::track_job_app`] is never persisted
/// implicitly; records enter the store only through an explicit
/// [`Engine::save_job_app`]. The store sits behind a mutex so a save is
/// never observed half-applied by a concurrent list or search.
pub struct Engine {
    db: Mutex<Database>,
}

impl Engine {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Engine {
            db: Mutex::new(Database::open(path)?),
        })
    }

    pub fn open_default() -> Result<Self> {
        Ok(Engine {
            db: Mutex::new(Database::open_default()?),
        })
    }

    fn store(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn db_path(&self) -> PathBuf {
        self.store().path().to_path_buf()
    }

    /// Extracts a normalized draft from raw posting text. The draft is not
    /// saved; it goes back to the caller for human review first.
    pub fn track_job_app(
        &self,
        raw_text: &str,
        platform: &str,
    ) -> Result<(JobApplication, ExtractionReport)> {
        if raw_text.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let platform = Platform::parse(platform)
            .ok_or_else(|| EngineError::UnsupportedPlatform(platform.to_string()))?;

        let (draft, mut report) = extract::extract(platform, raw_text);
        let draft = normalize::normalize(draft);
        report.align_with(&draft);
        debug!(
            platform = platform.as_str(),
            fields_found = report.found_count(),
            "extracted draft"
        );
        Ok((draft, report))
    }

    /// Persists a reviewed record. Validates the status first (blank
    /// defaults to SUBMITTED, unknown values are rejected and nothing is
    /// written), re-normalizes the textual fields so user edits cannot
    /// store an empty string where the sentinel belongs, then inserts or
    /// updates depending on whether `app_id` is set. On success the record
    /// carries its assigned id and date.
    pub fn save_job_app(&self, record: &mut JobApplication) -> Result<i64> {
        let status = normalize::validate_status(&record.status)?;
        *record = normalize::normalize(std::mem::take(record));
        record.status = status.as_str().to_string();

        let id = self.store().save(record)?;
        info!(app_id = id, company = %record.company, "saved application");
        Ok(id)
    }

    pub fn search_by_company(&self, term: &str) -> Result<Vec<JobApplication>> {
        self.search(term, SearchMode::Company)
    }

    pub fn search(&self, term: &str, mode: SearchMode) -> Result<Vec<JobApplication>> {
        let records = self.store().get_all()?;
        Ok(search::search(records, term, mode))
    }

    /// All stored applications in insertion order; empty store gives an
    /// empty list, not an error.
    pub fn get_all_job_apps(&self) -> Result<Vec<JobApplication>> {
        self.store().get_all()
    }

    pub fn get_job_app(&self, id: i64) -> Result<JobApplication> {
        self.store().get_by_id(id)
    }
}
