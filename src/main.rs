use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trackapps::{Engine, JobApplication, SearchMode};

#[derive(Parser)]
#[command(name = "trackapps")]
#[command(about = "Track job applications - extract, review, save, and search postings")]
struct Cli {
    /// Path to the SQLite database (defaults to the user data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and print its location
    Init,

    /// Extract a draft record from pasted posting text
    Track {
        /// Source platform (linkedin, greenhouse)
        #[arg(short, long)]
        platform: String,

        /// File with the pasted text; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Save a reviewed record (JSON) to the store
    Save {
        /// File with the record JSON; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// List all applications
    List,

    /// Search stored applications
    Search {
        /// Search term
        term: String,

        /// Search mode (company, position, fulltext)
        #[arg(short, long, default_value = "company")]
        mode: String,
    },

    /// Show one application as JSON
    Show {
        /// Application ID
        id: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let engine = match &cli.db {
        Some(path) => Engine::open(path)?,
        None => Engine::open_default()?,
    };

    match cli.command {
        Commands::Init => {
            println!("Database ready at {}", engine.db_path().display());
        }

        Commands::Track { platform, file } => {
            let raw = read_input(file.as_deref())?;
            let (draft, report) = engine.track_job_app(&raw, &platform)?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
            if let Some(url) = &report.source_url {
                eprintln!("Source URL: {url}");
            }
            eprintln!(
                "Fields found: {}/5. Review the draft, then pass it to 'trackapps save'.",
                report.found_count()
            );
        }

        Commands::Save { file } => {
            let raw = read_input(file.as_deref())?;
            let mut record: JobApplication =
                serde_json::from_str(&raw).context("record is not valid JSON")?;
            let id = engine.save_job_app(&mut record)?;
            println!("Saved application #{id}");
        }

        Commands::List => {
            let apps = engine.get_all_job_apps()?;
            print_table(&apps);
        }

        Commands::Search { term, mode } => {
            let mode = SearchMode::parse(&mode)
                .ok_or_else(|| anyhow!("unknown search mode: {mode}"))?;
            let apps = engine.search(&term, mode)?;
            print_table(&apps);
        }

        Commands::Show { id } => {
            let app = engine.get_job_app(id)?;
            println!("{}", serde_json::to_string_pretty(&app)?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_table(apps: &[JobApplication]) {
    if apps.is_empty() {
        println!("No applications found.");
        return;
    }
    println!(
        "{:<6} {:<12} {:<22} {:<28} {:<18} {:<18}",
        "ID", "DATE", "COMPANY", "POSITION", "LOCATION", "STATUS"
    );
    println!("{}", "-".repeat(108));
    for app in apps {
        println!(
            "{:<6} {:<12} {:<22} {:<28} {:<18} {:<18}",
            app.app_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            app.date_applied.as_deref().unwrap_or("-"),
            truncate(&app.company, 20),
            truncate(&app.position, 26),
            truncate(&app.location, 16),
            app.status,
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
