//! Schema derivation from command templates.
//!
//! Each template field is classified by its identifier and declared type:
//!
//! - the field named [`HEADER_FIELD`] carries `name|usage` for the command;
//! - a field declared with an optional wrapper is a named option, annotated
//!   `default|usage` or `usage`;
//! - every other field is a positional argument annotated with `usage`.
//!
//! A template that breaks these rules is a defect in the program declaring
//! it, not bad user input. [`CommandSchema::derive`] reports it as a
//! [`SchemaError`]; [`derive_schemas`] panics with the same message.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::types::{ArgumentDef, CommandSchema, OptionDef, Template};

/// Reserved identifier of the header field.
pub const HEADER_FIELD: &str = "command";

/// Separator between annotation segments.
pub const TAG_DELIMITER: char = '|';

/// Malformed command template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No header field was declared.
    #[error("command missing name/usage in {template}")]
    MissingHeader { template: &'static str },
    /// Header annotation is not exactly `name|usage`.
    #[error("command missing usage in {template}")]
    MalformedHeader { template: &'static str },
    /// Option annotation has zero or more than two segments.
    #[error("flag missing usage on {template}.{field}")]
    MalformedOption {
        template: &'static str,
        field: &'static str,
    },
    /// Argument annotation is not exactly one segment.
    #[error("argument lacks exactly one field on {template}.{field}")]
    MalformedArgument {
        template: &'static str,
        field: &'static str,
    },
    /// Two option fields resolve to the same option name.
    #[error("duplicate flag -{name} in {template}")]
    DuplicateOption {
        template: &'static str,
        name: String,
    },
}

impl CommandSchema {
    /// Derives the schema of one template.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] describing the first malformed field.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdflag_core::{command, CommandSchema, Header, Template};
    ///
    /// command! {
    ///     #[derive(Debug, Default)]
    ///     struct Greet {
    ///         command: Header = "greet|Say hello",
    ///         loud_voice: Option<bool> = "false|Shout the greeting",
    ///         name: String = "Who to greet",
    ///     }
    /// }
    ///
    /// let schema = CommandSchema::derive(&Template::of::<Greet>()).unwrap();
    /// assert_eq!(schema.name, "greet");
    /// assert_eq!(schema.argument_names(), vec!["name"]);
    /// assert_eq!(
    ///     schema.find_option("loud-voice").unwrap().default.as_deref(),
    ///     Some("false"),
    /// );
    /// ```
    pub fn derive(template: &Template) -> Result<Self, SchemaError> {
        let owner = template.type_name();
        let mut header = None;
        let mut arguments = Vec::new();
        let mut options = BTreeMap::new();

        for spec in template.fields() {
            let segments: Vec<&str> = spec.tag.split(TAG_DELIMITER).collect();

            if spec.ident == HEADER_FIELD {
                let &[name, usage] = segments.as_slice() else {
                    return Err(SchemaError::MalformedHeader { template: owner });
                };
                header = Some((name, usage));
                continue;
            }

            if spec.optional {
                let (default, usage) = match segments.as_slice() {
                    &[usage] => (None, usage),
                    &[default, usage] => (Some(default.to_string()), usage),
                    _ => {
                        return Err(SchemaError::MalformedOption {
                            template: owner,
                            field: spec.ident,
                        });
                    }
                };
                let name = match spec.rename {
                    Some(name) => name.to_string(),
                    None => kebab_case(spec.ident),
                };
                if options.contains_key(&name) {
                    return Err(SchemaError::DuplicateOption {
                        template: owner,
                        name,
                    });
                }
                options.insert(
                    name,
                    OptionDef {
                        field: spec.ident.to_string(),
                        usage: usage.to_string(),
                        type_name: spec.type_name.to_string(),
                        kind: spec.kind,
                        default,
                    },
                );
            } else {
                let &[usage] = segments.as_slice() else {
                    return Err(SchemaError::MalformedArgument {
                        template: owner,
                        field: spec.ident,
                    });
                };
                arguments.push(ArgumentDef {
                    field: spec.ident.to_string(),
                    name: bare_ident(spec.ident).to_lowercase(),
                    usage: usage.to_string(),
                    type_name: spec.type_name.to_string(),
                    kind: spec.kind,
                });
            }
        }

        let Some((name, usage)) = header else {
            return Err(SchemaError::MissingHeader { template: owner });
        };

        debug!(
            command = name,
            arguments = arguments.len(),
            options = options.len(),
            "derived command schema"
        );

        Ok(Self {
            name: name.to_string(),
            usage: usage.to_string(),
            arguments,
            options,
            template: *template,
        })
    }
}

/// Derives the schemas of all templates, in order.
///
/// # Panics
///
/// Panics if any template is malformed. Templates are declared by the
/// program, so this is a programming error rather than a parse failure.
pub fn derive_schemas(templates: &[Template]) -> Vec<CommandSchema> {
    templates
        .iter()
        .map(|template| CommandSchema::derive(template).unwrap_or_else(|err| panic!("{err}")))
        .collect()
}

/// Converts a field identifier to an option name.
///
/// Inserts a hyphen before each internal uppercase letter, turns underscores
/// into hyphens, and lowercases the result.
///
/// # Examples
///
/// ```
/// use cmdflag_core::kebab_case;
///
/// assert_eq!(kebab_case("FlagInt"), "flag-int");
/// assert_eq!(kebab_case("dry_run"), "dry-run");
/// assert_eq!(kebab_case("r#type"), "type");
/// ```
pub fn kebab_case(ident: &str) -> String {
    let ident = bare_ident(ident);
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch == '_' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if i > 0 && ch.is_ascii_uppercase() && !out.ends_with('-') {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

fn bare_ident(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::value::{Header, ValueKind};

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct CopyFile {
            command: Header = "copy|Copy a file",
            buffer_size: Option<usize> = "8192|Read buffer size in bytes",
            timeout: Option<Duration> = "Give up after this long",
            force: Option<bool> = "false|Overwrite the target" as "f",
            source: String = "File to read",
            target: String = "File to write",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct NoHeader {
            source: String = "File to read",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct BareHeader {
            command: Header = "bare",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct BadOption {
            command: Header = "bad|Bad option",
            level: Option<u8> = "1|2|Too many segments",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct BadArgument {
            command: Header = "bad|Bad argument",
            level: u8 = "1|Default on an argument",
        }
    }

    crate::command! {
        #[allow(dead_code)]
        #[derive(Debug, Default)]
        struct Clash {
            command: Header = "clash|Two options, one name",
            dry_run: Option<bool> = "Only print",
            #[allow(non_snake_case)]
            dryRun: Option<bool> = "Only print, again",
        }
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("FlagInt"), "flag-int");
        assert_eq!(kebab_case("flagInt2"), "flag-int2");
        assert_eq!(kebab_case("buffer_size"), "buffer-size");
        assert_eq!(kebab_case("timeout"), "timeout");
        assert_eq!(kebab_case("_private"), "private");
        assert_eq!(kebab_case("r#type"), "type");
    }

    #[test]
    fn test_derive_classifies_fields() {
        let schema = CommandSchema::derive(&Template::of::<CopyFile>()).unwrap();

        assert_eq!(schema.name, "copy");
        assert_eq!(schema.usage, "Copy a file");
        assert_eq!(schema.argument_names(), vec!["source", "target"]);
        assert_eq!(schema.arguments[0].kind, ValueKind::Text);
        assert_eq!(schema.arguments[1].usage, "File to write");

        let names: Vec<&str> = schema.options.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["buffer-size", "f", "timeout"]);

        let buffer = schema.find_option("buffer-size").unwrap();
        assert_eq!(buffer.field, "buffer_size");
        assert_eq!(buffer.default.as_deref(), Some("8192"));
        assert_eq!(buffer.kind, ValueKind::Uint);

        let timeout = schema.find_option("timeout").unwrap();
        assert_eq!(timeout.default, None);
        assert_eq!(timeout.usage, "Give up after this long");
        assert_eq!(timeout.kind, ValueKind::Duration);

        assert_eq!(schema.find_option("f").unwrap().field, "force");
        assert!(schema.find_option("force").is_none());
    }

    #[test]
    fn test_derive_reports_malformed_templates() {
        assert!(matches!(
            CommandSchema::derive(&Template::of::<NoHeader>()),
            Err(SchemaError::MissingHeader { .. })
        ));
        assert!(matches!(
            CommandSchema::derive(&Template::of::<BareHeader>()),
            Err(SchemaError::MalformedHeader { .. })
        ));
        assert!(matches!(
            CommandSchema::derive(&Template::of::<BadOption>()),
            Err(SchemaError::MalformedOption { field: "level", .. })
        ));
        assert!(matches!(
            CommandSchema::derive(&Template::of::<BadArgument>()),
            Err(SchemaError::MalformedArgument { field: "level", .. })
        ));
        assert_eq!(
            CommandSchema::derive(&Template::of::<Clash>())
                .unwrap_err()
                .to_string(),
            format!(
                "duplicate flag -dry-run in {}",
                std::any::type_name::<Clash>()
            )
        );
    }

    #[test]
    #[should_panic(expected = "command missing name/usage")]
    fn test_derive_schemas_panics_without_header() {
        derive_schemas(&[Template::of::<CopyFile>(), Template::of::<NoHeader>()]);
    }

    #[test]
    #[should_panic(expected = "flag missing usage")]
    fn test_derive_schemas_panics_on_bad_option() {
        derive_schemas(&[Template::of::<BadOption>()]);
    }

    #[test]
    #[should_panic(expected = "argument lacks exactly one field")]
    fn test_derive_schemas_panics_on_bad_argument() {
        derive_schemas(&[Template::of::<BadArgument>()]);
    }
}
