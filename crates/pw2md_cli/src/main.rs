//! `pw2md` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and ask the timestamp-header question.
//! - Wire logging, the SQLite loader and the exporter together.
//!
//! # Invariants
//! - The whole snapshot is loaded before any output is written.
//! - Only a source read failure or an unusable export root exits non-zero.

use clap::Parser;
use log::{error, info};
use pw2md_core::db::open_source_db;
use pw2md_core::{
    default_export_root, default_log_level, init_logging, is_affirmative, ExportConfig, Exporter,
    LocalFs, SnapshotLoader, SqliteSnapshotLoader, DEFAULT_RANK_WINDOW,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const TIMESTAMP_PROMPT: &str = "Output md file time metadata?(y/n): ";

/// Export a Pure Writer database into a Markdown directory tree.
#[derive(Debug, Parser)]
#[command(name = "pw2md", version = pw2md_core::core_version())]
struct Cli {
    /// Path to the Pure Writer `.db` file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Export root directory (defaults to the source file name without extension)
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Answer the timestamp-header question up front (y/n)
    #[arg(long, value_name = "y|n")]
    timestamps: Option<String>,

    /// Width of the rank window used to place articles without a category link
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RANK_WINDOW)]
    rank_window: i64,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr only when omitted)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pw2md: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref())?;

    let with_timestamps = match cli.timestamps.as_deref() {
        Some(answer) => is_affirmative(answer),
        None => ask_yes_no(TIMESTAMP_PROMPT)?,
    };
    let config = ExportConfig::default()
        .with_timestamps(with_timestamps)
        .with_rank_window(cli.rank_window);
    let root = cli
        .out
        .clone()
        .unwrap_or_else(|| default_export_root(&cli.source));

    info!(
        "event=source_read module=cli status=start source={}",
        cli.source.display()
    );
    let snapshot = {
        let conn = open_source_db(&cli.source).inspect_err(|err| {
            error!("event=source_read module=cli status=error error={err}");
        })?;
        let loader = SqliteSnapshotLoader::try_new(&conn).inspect_err(|err| {
            error!("event=source_read module=cli status=error error={err}");
        })?;
        loader.load_snapshot()?
    };

    let exporter = Exporter::new(LocalFs, config);
    exporter.export_snapshot(&snapshot, &root)?;

    info!(
        "event=export_done module=cli status=ok root={}",
        root.display()
    );
    Ok(())
}

/// Prints `prompt` to stderr and reads one answer line from stdin.
///
/// End of input counts as "no".
fn ask_yes_no(prompt: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()?;

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;
    Ok(read > 0 && is_affirmative(&answer))
}
