//! relay-inspect - classify a captured transport document.
//!
//! Reads one JSON document (a push-channel envelope, a notification or
//! history page, or a bare event) and prints the update events it yields.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use relay_events::{
    build_events_from_push_channel, build_events_from_transport_document, parse_document,
    Document, EventSource, UpdateEvent,
};
use tracing::info;

mod config;
mod logging;
mod output;

use config::Config;
use output::{print_events, OutputFormat};

/// Channel the document was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Channel {
    /// Push-channel envelope (`{"id", "payload"}`).
    Push,
    /// REST notification stream page.
    Notifications,
    /// History download page or bare event.
    Download,
}

/// Classify a transport document into update events.
#[derive(Debug, Parser)]
#[command(name = "relay-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON document, or `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Channel the document came from.
    #[arg(long, value_enum, default_value = "push")]
    channel: Channel,

    /// Output format (table or json). Defaults to RELAY_INSPECT_FORMAT.
    #[arg(long)]
    format: Option<OutputFormat>,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn classify(doc: &Document, channel: Channel) -> Result<Vec<UpdateEvent>> {
    let events = match channel {
        Channel::Push => build_events_from_push_channel(doc),
        Channel::Notifications => {
            build_events_from_transport_document(doc, EventSource::PushNotification)
        }
        Channel::Download => build_events_from_transport_document(doc, EventSource::Download),
    };

    events.with_context(|| format!("document does not match the {channel:?} envelope shape"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(&config);

    let text = read_input(&cli.input)?;
    let doc = parse_document(&text)
        .with_context(|| format!("invalid transport document: {}", cli.input.display()))?;

    let events = classify(&doc, cli.channel)?;
    info!(count = events.len(), channel = ?cli.channel, "classified document");

    print_events(&events, cli.format.unwrap_or(config.output_format));
    Ok(())
}
