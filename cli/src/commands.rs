//! Commands offered by the tool and their execution.

use std::any::Any;
use std::time::{Duration, Instant};

use cmdflag_core::{CommandSchema, Header, Parsed, SchemaError, Template, command};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

command! {
    /// Print text back, possibly repeated.
    #[derive(Debug, Default, Serialize)]
    pub struct Echo {
        #[allow(dead_code)]
        #[serde(skip)]
        command: Header = "echo|Print text back",
        pub times: Option<u32> = "1|How many times to print",
        pub upper: Option<bool> = "false|Convert to upper case",
        pub text: String = "Text to print",
    }
}

command! {
    /// Pause for a while.
    #[derive(Debug, Default, Serialize)]
    pub struct Sleep {
        #[allow(dead_code)]
        #[serde(skip)]
        command: Header = "sleep|Pause for a duration",
        pub max: Option<Duration> = "1m|Refuse to pause longer than this",
        pub duration: Duration = "How long to pause",
    }
}

command! {
    /// Add two numbers.
    #[derive(Debug, Default, Serialize)]
    pub struct Sum {
        #[allow(dead_code)]
        #[serde(skip)]
        command: Header = "sum|Add two numbers",
        pub precision: Option<usize> = "2|Digits after the decimal point",
        pub a: f64 = "First operand",
        pub b: f64 = "Second operand",
    }
}

command! {
    /// Describe one of the tool's commands.
    #[derive(Debug, Default, Serialize)]
    pub struct Schema {
        #[allow(dead_code)]
        #[serde(skip)]
        command: Header = "schema|Describe a command",
        pub name: String = "Command to describe",
    }
}

/// Templates of every command, in overview order.
pub fn templates() -> Vec<Template> {
    vec![
        Template::of::<Echo>(),
        Template::of::<Sleep>(),
        Template::of::<Sum>(),
        Template::of::<Schema>(),
    ]
}

/// Result of running a command.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Echo { lines: Vec<String> },
    Slept { millis: u64 },
    Sum { total: f64, precision: usize },
    Schema { schema: CommandSchema },
}

/// Failure while running a parsed command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Requested pause exceeds the configured maximum.
    #[error("refusing to sleep {requested:?}, the limit is {max:?}")]
    TooLong { requested: Duration, max: Duration },
    /// `schema` was asked about a command that does not exist.
    #[error("no command named \"{0}\"")]
    UnknownCommand(String),
    /// A template could not be described.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The parsed record is not the type its command name implies.
    #[error("unexpected record for command \"{0}\"")]
    UnexpectedRecord(String),
}

/// Runs a parsed command.
pub fn run(parsed: Parsed) -> Result<Outcome, CommandError> {
    let name = parsed.command().to_string();
    debug!(command = name.as_str(), "running command");
    match name.as_str() {
        "echo" => take::<Echo>(parsed).map(|echo| echo.run()),
        "sleep" => take::<Sleep>(parsed)?.run(),
        "sum" => take::<Sum>(parsed).map(|sum| sum.run()),
        "schema" => take::<Schema>(parsed)?.run(),
        other => Err(CommandError::UnexpectedRecord(other.to_string())),
    }
}

fn take<T: Any>(parsed: Parsed) -> Result<T, CommandError> {
    parsed
        .downcast::<T>()
        .map_err(|parsed| CommandError::UnexpectedRecord(parsed.command().to_string()))
}

impl Echo {
    fn run(self) -> Outcome {
        let text = if self.upper.unwrap_or(false) {
            self.text.to_uppercase()
        } else {
            self.text
        };
        let times = self.times.unwrap_or(1) as usize;
        Outcome::Echo {
            lines: vec![text; times],
        }
    }
}

impl Sleep {
    fn run(self) -> Result<Outcome, CommandError> {
        if let Some(max) = self.max {
            if self.duration > max {
                return Err(CommandError::TooLong {
                    requested: self.duration,
                    max,
                });
            }
        }
        let started = Instant::now();
        std::thread::sleep(self.duration);
        let elapsed = started.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "slept");
        Ok(Outcome::Slept {
            millis: self.duration.as_millis() as u64,
        })
    }
}

impl Sum {
    fn run(self) -> Outcome {
        Outcome::Sum {
            total: self.a + self.b,
            precision: self.precision.unwrap_or(2),
        }
    }
}

impl Schema {
    fn run(self) -> Result<Outcome, CommandError> {
        for template in templates() {
            let schema = CommandSchema::derive(&template)?;
            if schema.name == self.name {
                return Ok(Outcome::Schema { schema });
            }
        }
        Err(CommandError::UnknownCommand(self.name))
    }
}
