//! Command selection and record population.

use tracing::debug;

use crate::derive::derive_schemas;
use crate::error::ParseError;
use crate::help::{command_details, overview};
use crate::input::{MissingValue, RawInput, tokenize};
use crate::types::{CommandSchema, Parsed, Record, Template};

/// Parses an argument vector against a set of command templates.
///
/// `args` is the full vector including the program name, as produced by
/// `std::env::args()`. The second positional token selects the command;
/// later positional tokens fill its arguments in order, and `-name value`
/// pairs anywhere in the vector set its options.
///
/// # Errors
///
/// Returns a [`ParseError`] whose message embeds the relevant help text when
/// the input does not match a command.
///
/// # Panics
///
/// Panics if a template is malformed (see [`derive_schemas`]).
///
/// # Examples
///
/// ```
/// use cmdflag_core::{command, parse, Header, Template};
///
/// command! {
///     #[derive(Debug, Default)]
///     struct Resize {
///         command: Header = "resize|Resize an image",
///         quality: Option<u8> = "85|Output quality",
///         input: String = "Image to read",
///         width: u32 = "Target width in pixels",
///     }
/// }
///
/// let parsed = parse(&[Template::of::<Resize>()], &["img", "resize", "cat.png", "640"]).unwrap();
/// assert_eq!(parsed.command(), "resize");
///
/// let resize = parsed.downcast::<Resize>().unwrap();
/// assert_eq!(resize.input, "cat.png");
/// assert_eq!(resize.width, 640);
/// assert_eq!(resize.quality, Some(85));
/// ```
pub fn parse<S: AsRef<str>>(templates: &[Template], args: &[S]) -> Result<Parsed, ParseError> {
    let schemas = derive_schemas(templates);

    let input = tokenize(args).map_err(|MissingValue(flag)| ParseError::MissingValue {
        flag,
        help: overview(&schemas),
    })?;

    let Some(command) = input.command.as_deref() else {
        return Err(ParseError::NoCommand {
            help: overview(&schemas),
        });
    };

    let Some(schema) = schemas.iter().find(|schema| schema.name == command) else {
        return Err(ParseError::UnknownCommand {
            command: command.to_string(),
            help: overview(&schemas),
        });
    };

    populate(schema, &input)
}

/// Renders the overview of all commands without parsing anything.
///
/// # Panics
///
/// Panics if a template is malformed.
pub fn usage(templates: &[Template]) -> String {
    overview(&derive_schemas(templates))
}

/// Renders the detail view of the command called `name`, if there is one.
///
/// # Panics
///
/// Panics if a template is malformed.
pub fn command_usage(templates: &[Template], name: &str) -> Option<String> {
    derive_schemas(templates)
        .iter()
        .find(|schema| schema.name == name)
        .map(command_details)
}

fn populate(schema: &CommandSchema, input: &RawInput) -> Result<Parsed, ParseError> {
    let supplied = input.arguments.len();

    if supplied > schema.arguments.len() {
        return Err(ParseError::TooManyArguments {
            command: schema.name.clone(),
            help: command_details(schema),
        });
    }

    // Only the first absent argument is reported, and nothing at all when
    // none were given.
    if let Some(missing) = schema.arguments.get(supplied) {
        if supplied == 0 {
            return Err(ParseError::MissingArguments {
                command: schema.name.clone(),
                help: command_details(schema),
            });
        }
        return Err(ParseError::MissingArgument {
            command: schema.name.clone(),
            argument: missing.name.clone(),
            help: command_details(schema),
        });
    }

    let mut record = schema.template.instantiate();

    for (arg, token) in schema.arguments.iter().zip(&input.arguments) {
        record
            .assign(&arg.field, token)
            .map_err(|reason| ParseError::InvalidArgument {
                field: arg.field.clone(),
                value: token.clone(),
                reason,
                help: command_details(schema),
            })?;
    }

    for opt in schema.options.values() {
        let Some(default) = opt.default.as_deref() else {
            continue;
        };
        record
            .assign(&opt.field, default)
            .map_err(|reason| ParseError::InvalidDefault {
                field: opt.field.clone(),
                value: default.to_string(),
                reason,
                help: command_details(schema),
            })?;
    }

    for (name, value) in &input.options {
        let Some(opt) = schema.find_option(name) else {
            return Err(ParseError::UnknownFlag {
                flag: name.clone(),
                help: command_details(schema),
            });
        };
        record
            .assign(&opt.field, value)
            .map_err(|reason| ParseError::InvalidFlag {
                field: opt.field.clone(),
                value: value.clone(),
                reason,
                help: command_details(schema),
            })?;
    }

    debug!(
        command = schema.name.as_str(),
        arguments = supplied,
        options = input.options.len(),
        "parsed command"
    );

    Ok(Parsed::new(schema.name.clone(), record.into_any()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::value::{ConvertError, Header};

    crate::command! {
        #[derive(Debug, Default, PartialEq)]
        struct TestCmd {
            command: Header = "testcmd|Test command",
            flag_int: Option<i64> = "10|An integer flag with a default of 10",
            arg1: String = "The first required argument",
            arg2: String = "The second required argument",
        }
    }

    crate::command! {
        #[derive(Debug, Default, PartialEq)]
        struct Wait {
            command: Header = "wait|Pause for a while",
            every: Option<Duration> = "5s|Polling interval",
            limit: Option<u32> = "Stop after this many polls",
            quiet: Option<bool> = "Print nothing",
            seconds: f64 = "How long to wait",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct BadDefault {
            command: Header = "bad|Broken default",
            level: Option<u8> = "high|Level to use",
        }
    }

    fn templates() -> Vec<Template> {
        vec![Template::of::<TestCmd>(), Template::of::<Wait>()]
    }

    #[test]
    fn test_defaults_and_arguments() {
        let parsed = parse(&templates(), &["cmd", "testcmd", "5", "6"]).unwrap();
        assert_eq!(parsed.command(), "testcmd");
        assert_eq!(
            parsed.downcast::<TestCmd>().unwrap(),
            TestCmd {
                command: Header,
                flag_int: Some(10),
                arg1: "5".to_string(),
                arg2: "6".to_string(),
            }
        );
    }

    #[test]
    fn test_user_option_overrides_default_in_any_position() {
        for args in [
            ["cmd", "-flag-int", "42", "testcmd", "a", "b"],
            ["cmd", "testcmd", "a", "b", "-flag-int", "42"],
            ["cmd", "testcmd", "a", "--flag-int", "42", "b"],
        ] {
            let cmd = parse(&templates(), &args)
                .unwrap()
                .downcast::<TestCmd>()
                .unwrap();
            assert_eq!(cmd.flag_int, Some(42), "{args:?}");
            assert_eq!((cmd.arg1.as_str(), cmd.arg2.as_str()), ("a", "b"));
        }
    }

    #[test]
    fn test_unset_options_stay_absent() {
        let wait = parse(&templates(), &["cmd", "wait", "1.5", "-quiet", "true"])
            .unwrap()
            .downcast::<Wait>()
            .unwrap();
        assert_eq!(wait.seconds, 1.5);
        assert_eq!(wait.every, Some(Duration::from_secs(5)));
        assert_eq!(wait.limit, None);
        assert_eq!(wait.quiet, Some(true));
    }

    #[test]
    fn test_repeated_option_last_wins() {
        let wait = parse(
            &templates(),
            &["cmd", "wait", "-every", "1m", "2", "-every", "250ms"],
        )
        .unwrap()
        .downcast::<Wait>()
        .unwrap();
        assert_eq!(wait.every, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_no_command_reports_overview() {
        let err = parse(&templates(), &["cmd"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::NoCommand {
                help: usage(&templates())
            }
        );
        assert!(err.to_string().contains("testcmd.......Test command"));
        assert!(err.to_string().contains("wait.......Pause for a while"));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(&templates(), &["cmd", "invalidcmd"]).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with(&usage(&templates())));
        assert!(text.ends_with("unrecognized command \"invalidcmd\"\n"));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = parse(&templates(), &["cmd", "testcmd", "a", "b", "c"]).unwrap_err();
        assert!(matches!(err, ParseError::TooManyArguments { .. }));
        assert!(err.to_string().contains("usage: testcmd <arg1> <arg2>"));
        assert!(err.to_string().contains("too many arguments given"));
    }

    #[test]
    fn test_missing_argument_reporting_is_asymmetric() {
        let err = parse(&templates(), &["cmd", "testcmd"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingArguments { .. }));
        assert!(err.to_string().contains("usage: testcmd"));
        assert!(!err.to_string().contains("missing argument"));

        let err = parse(&templates(), &["cmd", "testcmd", "a"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingArgument {
                command: "testcmd".to_string(),
                argument: "arg2".to_string(),
                help: command_usage(&templates(), "testcmd").unwrap(),
            }
        );
        assert!(err.to_string().contains("[fail] missing argument <arg2>"));
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&templates(), &["cmd", "testcmd", "a", "b", "-nope", "1"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFlag { ref flag, .. } if flag == "nope"));
        assert!(err.to_string().contains("unrecognized flag \"nope\""));
    }

    #[test]
    fn test_conversion_failures() {
        let err = parse(&templates(), &["cmd", "wait", "soon"]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidArgument { ref field, ref value, reason: ConvertError::InvalidFloat { .. }, .. }
                if field == "seconds" && value == "soon"
        ));
        assert!(
            err.to_string()
                .contains("unable to set argument field \"seconds\" to \"soon\"")
        );

        let err = parse(&templates(), &["cmd", "wait", "1", "-limit", "-3"]).unwrap_err();
        assert!(
            err.to_string()
                .contains("unable to set flag field \"limit\" to \"-3\"")
        );

        let err = parse(&[Template::of::<BadDefault>()], &["cmd", "bad"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDefault { .. }));
        assert!(
            err.to_string()
                .contains("unable to set default flag field \"level\" to \"high\"")
        );
    }

    #[test]
    fn test_missing_flag_value() {
        let err = parse(&templates(), &["cmd", "testcmd", "a", "b", "-flag-int"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { ref flag, .. } if flag == "flag-int"));
        assert!(err.to_string().contains("missing value for flag \"flag-int\""));
    }

    #[test]
    fn test_first_matching_command_wins() {
        crate::command! {
            #[allow(dead_code)]
            #[derive(Debug, Default)]
            struct OtherTest {
                command: Header = "testcmd|Shadowed command",
            }
        }

        let templates = [Template::of::<TestCmd>(), Template::of::<OtherTest>()];
        let parsed = parse(&templates, &["cmd", "testcmd", "a", "b"]).unwrap();
        assert!(parsed.is::<TestCmd>());
    }

    #[test]
    fn test_command_usage() {
        let text = command_usage(&templates(), "wait").unwrap();
        assert!(text.starts_with("\nusage: wait <seconds> [-every] [-limit] [-quiet] \n\n"));
        assert!(text.contains("(default: \"5s\")"));
        assert!(command_usage(&templates(), "nope").is_none());
    }
}
