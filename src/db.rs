//! Durable record store over SQLite. One `apps` table, insert-or-update
//! save semantics, insertion-ordered listing.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::JobApplication;

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Opens (and initializes) the database at the default per-user data
    /// location.
    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_path())
    }

    /// Opens the database file at `path`, creating parent directories and
    /// the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let db = Self {
            conn,
            path: path.to_path_buf(),
        };
        db.init()?;
        Ok(db)
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "trackapps") {
            proj_dirs.data_dir().join("trackapps.db")
        } else {
            PathBuf::from("trackapps.db")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS apps (
                app_id INTEGER PRIMARY KEY AUTOINCREMENT,
                company TEXT NOT NULL,
                position TEXT NOT NULL,
                location TEXT NOT NULL,
                salary_range TEXT NOT NULL,
                workplace_type TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'SUBMITTED'
                    CHECK (status IN ('SUBMITTED', 'REJECTED', 'PHONE_SCREEN', 'REMOTE_INTERVIEW', 'ON_SITE_INTERVIEW')),
                notes TEXT NOT NULL DEFAULT '',
                website TEXT NOT NULL DEFAULT '',
                date_applied TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_apps_company ON apps(company);
            CREATE INDEX IF NOT EXISTS idx_apps_date ON apps(date_applied);
            "#,
        )?;
        Ok(())
    }

    /// Inserts a new record (assigning `app_id` and today's `date_applied`)
    /// or overwrites the record with the same id in place. Last write wins;
    /// `date_applied` is set once and never updated. Content duplicates are
    /// allowed; only the id is unique.
    pub fn save(&self, record: &mut JobApplication) -> Result<i64> {
        match record.app_id {
            None => {
                let today = chrono::Local::now().format("%Y-%m-%d").to_string();
                self.conn.execute(
                    "INSERT INTO apps (company, position, location, salary_range, workplace_type,
                                       status, notes, website, date_applied)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        record.company,
                        record.position,
                        record.location,
                        record.salary_range,
                        record.workplace_type,
                        record.status,
                        record.notes,
                        record.website,
                        today,
                    ],
                )?;
                let id = self.conn.last_insert_rowid();
                record.app_id = Some(id);
                record.date_applied = Some(today);
                debug!(app_id = id, "inserted application");
                Ok(id)
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE apps SET company = ?1, position = ?2, location = ?3,
                                     salary_range = ?4, workplace_type = ?5, status = ?6,
                                     notes = ?7, website = ?8
                     WHERE app_id = ?9",
                    params![
                        record.company,
                        record.position,
                        record.location,
                        record.salary_range,
                        record.workplace_type,
                        record.status,
                        record.notes,
                        record.website,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(EngineError::NotFound(id));
                }
                debug!(app_id = id, "updated application");
                Ok(id)
            }
        }
    }

    /// All stored records in insertion order (ids are monotonic).
    pub fn get_all(&self) -> Result<Vec<JobApplication>> {
        let mut stmt = self.conn.prepare(
            "SELECT app_id, company, position, location, salary_range, workplace_type,
                    status, notes, website, date_applied
             FROM apps ORDER BY app_id",
        )?;
        let rows = stmt.query_map([], Self::row_to_app)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_by_id(&self, id: i64) -> Result<JobApplication> {
        let result = self.conn.query_row(
            "SELECT app_id, company, position, location, salary_range, workplace_type,
                    status, notes, website, date_applied
             FROM apps WHERE app_id = ?1",
            [id],
            Self::row_to_app,
        );
        match result {
            Ok(app) => Ok(app),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(EngineError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn row_to_app(row: &rusqlite::Row) -> rusqlite::Result<JobApplication> {
        Ok(JobApplication {
            app_id: row.get(0)?,
            company: row.get(1)?,
            position: row.get(2)?,
            location: row.get(3)?,
            salary_range: row.get(4)?,
            workplace_type: row.get(5)?,
            status: row.get(6)?,
            notes: row.get(7)?,
            website: row.get(8)?,
            date_applied: row.get(9)?,
        })
    }
}
