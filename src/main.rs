use anyhow::Result;
use biomarker_notifier::{
    DEFAULT_MAIL_HOST, DEFAULT_PROTOCOLS_RDF, DEFAULT_RECIPIENTS, JournalStore, ScanConfig,
    notify, run,
};
use clap::Parser;
use std::path::PathBuf;

/// Get notified of changes to biomarkers listed in research protocols.
#[derive(Parser)]
#[command(name = "biomarker-notifier", version, about)]
struct Cli {
    /// Log debugging messages; handy for developers
    #[arg(short, long, conflicts_with = "quiet")]
    debug: bool,

    /// Don't log info messages; just warnings and critical notes
    #[arg(short, long)]
    quiet: bool,

    /// Journal file [default: ~/.biomarker-journal]
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// Reset the journal before scanning
    #[arg(short, long)]
    reset: bool,

    /// RDF source for protocols
    #[arg(short, long, default_value = DEFAULT_PROTOCOLS_RDF)]
    protocols: String,

    /// Whom to notify (comma-separated)
    #[arg(short, long, default_value = DEFAULT_RECIPIENTS)]
    email: String,

    /// Mail host
    #[arg(short, long, default_value = DEFAULT_MAIL_HOST)]
    mailhost: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let _logger = flexi_logger::Logger::try_with_str(level)?.start()?;

    let config = ScanConfig {
        journal: cli
            .journal
            .unwrap_or_else(ScanConfig::default_journal_path),
        protocols_rdf: cli.protocols,
        recipients: cli.email,
        mail_host: cli.mailhost,
    };

    if cli.reset {
        JournalStore::new(&config.journal).reset()?;
    }

    let report = run(&config)?;
    if report.should_notify() {
        notify(&config, &report)?;
    }
    Ok(())
}
