//! StorageScope — storage usage overview by file category.
//!
//! Thin binary entry point. All logic lives in the `storagescope-core`
//! crate; this binary is a minimal console presentation layer over it.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use storagescope_core::analysis::CategoryTable;
use storagescope_core::model::size::{format_count, format_size};
use storagescope_core::overview::progress::OverviewEvent;
use storagescope_core::overview::start_overview;
use storagescope_core::source::FsMediaIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Report storage usage by category for a directory tree.
#[derive(Debug, Parser)]
#[command(name = "storagescope", version, about)]
struct Cli {
    /// Directory to scan.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    tracing::info!("StorageScope starting");

    // No volume statistics source on the console; total/free stay unknown
    // and the report covers the category breakdown only.
    let handle = start_overview(
        FsMediaIndex::new(&cli.path),
        Vec::new(),
        CategoryTable::default(),
    );

    let report = loop {
        match handle.events_rx.recv() {
            Ok(OverviewEvent::Complete { report, .. }) => break report,
            Ok(OverviewEvent::Cancelled) => anyhow::bail!("overview pass was cancelled"),
            Ok(_) => continue,
            Err(_) => anyhow::bail!("overview worker exited without a report"),
        }
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", report.to_json().context("serialising report")?);
        }
        OutputFormat::Csv => {
            report
                .write_csv(std::io::stdout().lock())
                .context("writing CSV report")?;
        }
        OutputFormat::Text => {
            for usage in report.breakdown.categories() {
                println!(
                    "{:<10} {:>10}  ({} files)",
                    usage.category.label(),
                    format_size(usage.total_size),
                    format_count(usage.file_count)
                );
            }
            println!(
                "{:<10} {:>10}",
                "Total",
                format_size(report.breakdown.classified_bytes())
            );
            if report.breakdown.skipped_records > 0 {
                eprintln!(
                    "warning: {} records could not be read",
                    format_count(report.breakdown.skipped_records)
                );
            }
        }
    }

    Ok(())
}
