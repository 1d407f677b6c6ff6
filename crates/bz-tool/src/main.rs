//! bz-tool - Main Entry Point
//!
//! Runs authored HTML through the paste rewriter, the attribute filter or
//! the retained-id scan. Input is read from a file or stdin; HTML goes to
//! stdout and logs to stderr.

use anyhow::{Context, Result};
use bz_content::{AttributeFilter, EditingSession, SessionConfig};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bz-tool", version, about = "Rewrite and inspect identifiers in authored course HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite identifiers in a paste payload
    Rewrite {
        #[command(flatten)]
        session: SessionArgs,
        /// Document the paste lands in; seeds the retained counter
        #[arg(long)]
        document: Option<PathBuf>,
        /// Paste payload (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Drop attributes outside the whitelist
    Filter {
        /// Additional attribute names to keep
        #[arg(long = "allow")]
        allow: Vec<String>,
        input: Option<PathBuf>,
    },
    /// Print the next retained id after scanning a document
    Scan {
        #[command(flatten)]
        session: SessionArgs,
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct SessionArgs {
    /// Page id scoping retained ids; overrides the config file
    #[arg(long)]
    page_id: Option<String>,
    /// TOML session config
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SessionArgs {
    fn resolve(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SessionConfig::from_toml_str(&source)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => {
                let page_id = self
                    .page_id
                    .as_deref()
                    .context("either --page-id or --config is required")?;
                SessionConfig::new(page_id)
            }
        };
        if let Some(page_id) = &self.page_id {
            config.page_id.clone_from(page_id);
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::Rewrite {
            session,
            document,
            input,
        } => {
            let mut session = EditingSession::new(session.resolve()?)?;
            if let Some(document) = document.as_deref() {
                session.load(&read_input(Some(document))?)?;
            }
            let (fragment, report) = session.paste(&read_input(input.as_deref())?)?;
            tracing::info!(?report, "rewrite complete");
            Ok(session.export(&fragment))
        }
        Command::Filter { allow, input } => {
            let mut tree = bz_html::parse_fragment(&read_input(input.as_deref())?)?;
            let dropped = AttributeFilter::with_extra(&allow).filter_tree(&mut tree);
            tracing::info!(dropped, "filter complete");
            Ok(bz_html::to_html(&tree))
        }
        Command::Scan { session, input } => {
            let mut session = EditingSession::new(session.resolve()?)?;
            session.load(&read_input(input.as_deref())?)?;
            Ok(session.next_retained_id())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(Cli::parse())?;
    println!("{output}");
    Ok(())
}
