//! Tokenization of the raw argument vector.

use thiserror::Error;
use tracing::debug;

/// Leading character marking an option token.
pub const OPTION_PREFIX: char = '-';

/// Tokens that request help and are skipped wherever they appear.
pub const HELP_ALIASES: [&str; 4] = ["help", "-help", "--help", "-h"];

/// Argument vector split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    /// Invocation name of the program (first positional token).
    pub binary: Option<String>,
    /// Selected command (second positional token).
    pub command: Option<String>,
    /// Remaining positional tokens in order.
    pub arguments: Vec<String>,
    /// Option name/value pairs in order, names without their prefix.
    pub options: Vec<(String, String)>,
}

/// An option token was the last token of the vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing value for flag \"{0}\"")]
pub struct MissingValue(pub String);

/// Splits `args` into binary name, command, positional arguments and options.
///
/// Every option consumes the following token as its value, whatever it looks
/// like. Help aliases are dropped.
///
/// # Errors
///
/// Returns [`MissingValue`] when an option has no following token.
///
/// # Examples
///
/// ```
/// use cmdflag_core::tokenize;
///
/// let input = tokenize(&["app", "fetch", "-retries", "3", "https://example.org", "--help"]).unwrap();
/// assert_eq!(input.binary.as_deref(), Some("app"));
/// assert_eq!(input.command.as_deref(), Some("fetch"));
/// assert_eq!(input.arguments, vec!["https://example.org"]);
/// assert_eq!(input.options, vec![("retries".to_string(), "3".to_string())]);
/// ```
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Result<RawInput, MissingValue> {
    let mut positional = Vec::new();
    let mut options = Vec::new();

    let mut tokens = args.iter().map(|arg| arg.as_ref());
    while let Some(token) = tokens.next() {
        if !token.starts_with(OPTION_PREFIX) && token != "help" {
            positional.push(token.to_string());
            continue;
        }
        if HELP_ALIASES.contains(&token) {
            continue;
        }

        let name = option_name(token);
        let Some(value) = tokens.next() else {
            return Err(MissingValue(name.to_string()));
        };
        options.push((name.to_string(), value.to_string()));
    }

    let mut positional = positional.into_iter();
    let input = RawInput {
        binary: positional.next(),
        command: positional.next(),
        arguments: positional.collect(),
        options,
    };

    debug!(
        command = input.command.as_deref().unwrap_or(""),
        arguments = input.arguments.len(),
        options = input.options.len(),
        "tokenized arguments"
    );

    Ok(input)
}

/// Strips the single or doubled prefix from an option token.
fn option_name(token: &str) -> &str {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix(OPTION_PREFIX))
        .unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_options_anywhere_in_vector() {
        let input = tokenize(&["cmd", "-a", "1", "copy", "src", "--b", "2", "dst"]).unwrap();
        assert_eq!(input.binary.as_deref(), Some("cmd"));
        assert_eq!(input.command.as_deref(), Some("copy"));
        assert_eq!(input.arguments, vec!["src", "dst"]);
        assert_eq!(input.options, vec![pair("a", "1"), pair("b", "2")]);
    }

    #[test]
    fn test_option_value_is_taken_verbatim() {
        let input = tokenize(&["cmd", "run", "-name", "-x", "-level", "help"]).unwrap();
        assert_eq!(input.options, vec![pair("name", "-x"), pair("level", "help")]);
        assert!(input.arguments.is_empty());
    }

    #[test]
    fn test_help_aliases_are_skipped() {
        let input = tokenize(&["cmd", "help", "copy", "-h", "a", "--help", "-help"]).unwrap();
        assert_eq!(input.command.as_deref(), Some("copy"));
        assert_eq!(input.arguments, vec!["a"]);
        assert!(input.options.is_empty());
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            tokenize(&["cmd", "copy", "--force"]),
            Err(MissingValue("force".to_string()))
        );
        assert_eq!(
            MissingValue("force".to_string()).to_string(),
            "missing value for flag \"force\""
        );
    }

    #[test]
    fn test_no_command_selected() {
        let input = tokenize(&["cmd"]).unwrap();
        assert_eq!(input.binary.as_deref(), Some("cmd"));
        assert_eq!(input.command, None);
        assert!(input.arguments.is_empty());

        let empty: [&str; 0] = [];
        assert_eq!(tokenize(&empty).unwrap(), RawInput::default());
    }
}
