//! Output formatting for classified events.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use relay_events::UpdateEvent;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("expected `table` or `json`, got `{other}`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One listing row per classified event.
#[derive(Debug, Tabled)]
pub struct EventRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub kind: String,
    #[tabled(rename = "wire type")]
    pub wire_type: String,
    pub source: String,
    pub identifier: String,
    pub flags: String,
}

impl EventRow {
    pub fn from_event(index: usize, event: &UpdateEvent) -> Self {
        Self {
            index,
            kind: format!("{:?}", event.kind()),
            wire_type: event.wire_type().unwrap_or("-").to_string(),
            source: event.source().to_string(),
            identifier: event
                .identifier()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            flags: flag_labels(event).join(","),
        }
    }
}

fn flag_labels(event: &UpdateEvent) -> Vec<&'static str> {
    let mut labels = Vec::new();
    if event.is_transient() {
        labels.push("transient");
    }
    if event.is_flow_event() {
        labels.push("flow");
    }
    if event.is_encrypted() {
        labels.push("encrypted");
    }
    if event.is_generic_message_event() {
        labels.push("generic");
    }
    if event.has_encrypted_and_unencrypted_version() {
        labels.push("dual");
    }
    labels
}

/// Print events in the specified format.
pub fn print_events(events: &[UpdateEvent], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if events.is_empty() {
                println!("{}", "No events found.".dimmed());
            } else {
                let rows: Vec<EventRow> = events
                    .iter()
                    .enumerate()
                    .map(|(i, e)| EventRow::from_event(i, e))
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(events).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}
