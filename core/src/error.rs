//! Errors reported for bad user input.
//!
//! Every variant carries the help text that applies to the failure (the
//! command overview, or one command's detail view), and its `Display` output
//! is the complete multi-line message to show the user.

use thiserror::Error;

use crate::value::ConvertError;

/// Failure to parse an argument vector against the command set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option was the last token and had no value.
    #[error("{help}\nmissing value for flag \"{flag}\"\n")]
    MissingValue { flag: String, help: String },

    /// No command name was given.
    #[error("{help}")]
    NoCommand { help: String },

    /// The command name matched no template.
    #[error("{help}\nunrecognized command \"{command}\"\n")]
    UnknownCommand { command: String, help: String },

    /// More positional tokens than the command declares.
    #[error("{help}\ntoo many arguments given\n")]
    TooManyArguments { command: String, help: String },

    /// No positional tokens for a command that needs some.
    #[error("{help}")]
    MissingArguments { command: String, help: String },

    /// Positional tokens stop short of a later argument.
    #[error("{help}\n[fail] missing argument <{argument}>\n")]
    MissingArgument {
        command: String,
        argument: String,
        help: String,
    },

    /// A positional token could not be converted.
    #[error("{help}\nunable to set argument field \"{field}\" to \"{value}\": {reason}\n")]
    InvalidArgument {
        field: String,
        value: String,
        reason: ConvertError,
        help: String,
    },

    /// An option default declared by the template could not be converted.
    #[error("{help}\nunable to set default flag field \"{field}\" to \"{value}\": {reason}\n")]
    InvalidDefault {
        field: String,
        value: String,
        reason: ConvertError,
        help: String,
    },

    /// The option name is not declared by the command.
    #[error("{help}\nunrecognized flag \"{flag}\"\n")]
    UnknownFlag { flag: String, help: String },

    /// An option value could not be converted.
    #[error("{help}\nunable to set flag field \"{field}\" to \"{value}\": {reason}\n")]
    InvalidFlag {
        field: String,
        value: String,
        reason: ConvertError,
        help: String,
    },
}

impl ParseError {
    /// Help text embedded in the message.
    pub fn help(&self) -> &str {
        match self {
            Self::MissingValue { help, .. }
            | Self::NoCommand { help }
            | Self::UnknownCommand { help, .. }
            | Self::TooManyArguments { help, .. }
            | Self::MissingArguments { help, .. }
            | Self::MissingArgument { help, .. }
            | Self::InvalidArgument { help, .. }
            | Self::InvalidDefault { help, .. }
            | Self::UnknownFlag { help, .. }
            | Self::InvalidFlag { help, .. } => help,
        }
    }

    /// Returns `true` when only the help text is reported, as when the user
    /// names no command or gives a command none of its arguments.
    pub fn is_usage_only(&self) -> bool {
        matches!(self, Self::NoCommand { .. } | Self::MissingArguments { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_embed_help() {
        let err = ParseError::UnknownCommand {
            command: "frob".to_string(),
            help: "\n    ls.......List\n\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "\n    ls.......List\n\n\nunrecognized command \"frob\"\n"
        );
        assert_eq!(err.help(), "\n    ls.......List\n\n");
        assert!(!err.is_usage_only());
    }

    #[test]
    fn test_usage_only_variants() {
        let err = ParseError::MissingArguments {
            command: "ls".to_string(),
            help: "usage".to_string(),
        };
        assert_eq!(err.to_string(), "usage");
        assert!(err.is_usage_only());
    }

    #[test]
    fn test_conversion_reason_is_reported() {
        let err = ParseError::InvalidFlag {
            field: "verbose".to_string(),
            value: "maybe".to_string(),
            reason: ConvertError::InvalidBool("maybe".to_string()),
            help: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "\nunable to set flag field \"verbose\" to \"maybe\": invalid boolean \"maybe\"\n"
        );
    }
}
