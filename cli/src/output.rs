//! Output formatting for command results.

use std::time::Duration;

use cmdflag_core::help;
use serde::{Deserialize, Serialize};

use crate::commands::Outcome;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Formats a command result in the requested output format.
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(outcome_to_text(outcome)),
        OutputFormat::Json => serde_json::to_string_pretty(outcome)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(outcome).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

fn outcome_to_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Echo { lines } => lines.join("\n"),
        Outcome::Slept { millis } => format!("slept {:?}", Duration::from_millis(*millis)),
        Outcome::Sum { total, precision } => format!("{total:.precision$}"),
        Outcome::Schema { schema } => help::command_details(schema).trim_end().to_string(),
    }
}
