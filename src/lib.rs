//! Job-application extraction-and-tracking engine: platform-specific
//! parsers turn pasted posting text into a structured draft, a normalizer
//! makes the fields safe to store, a SQLite-backed store persists reviewed
//! records, and a scan-based search retrieves them.

pub mod db;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod search;

pub use engine::Engine;
pub use error::EngineError;
pub use models::{ExtractionReport, JobApplication, NOT_FOUND, Platform, Status};
pub use search::SearchMode;
