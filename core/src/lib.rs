//! Declarative command-line parsing into typed command records.
//!
//! A program describes each of its commands as a struct whose fields carry
//! annotation strings, usually through the [`command!`] macro:
//!
//! - [`Command`] / [`Template`]: a command type and its type-erased handle.
//! - [`CommandSchema`]: the normalized shape derived from a template: name,
//!   usage, ordered positional [`ArgumentDef`]s and named [`OptionDef`]s.
//! - [`tokenize`]: splits a raw argument vector into a [`RawInput`].
//! - [`parse`]: selects the command, checks arity, applies defaults and
//!   converts every token into its field, returning a [`Parsed`] record.
//! - [`help`]: overview and per-command usage text.
//!
//! Malformed templates are programming errors and panic; bad user input is
//! reported as a [`ParseError`] whose message embeds the relevant help text.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cmdflag_core::*;
//!
//! command! {
//!     #[derive(Debug, Default)]
//!     struct Fetch {
//!         command: Header = "fetch|Download a URL",
//!         timeout: Option<Duration> = "5s|Give up after this long",
//!         retries: Option<u8> = "How often to retry",
//!         url: String = "Address to download",
//!     }
//! }
//!
//! command! {
//!     #[derive(Debug, Default)]
//!     struct Clean {
//!         command: Header = "clean|Remove downloaded files",
//!     }
//! }
//!
//! let templates = [Template::of::<Fetch>(), Template::of::<Clean>()];
//!
//! let parsed = parse(&templates, &["dl", "fetch", "-retries", "3", "https://example.org"]).unwrap();
//! let fetch = parsed.downcast::<Fetch>().unwrap();
//! assert_eq!(fetch.url, "https://example.org");
//! assert_eq!(fetch.timeout, Some(Duration::from_secs(5)));
//! assert_eq!(fetch.retries, Some(3));
//!
//! let err = parse(&templates, &["dl", "fetch", "-verbose", "1", "https://example.org"]).unwrap_err();
//! assert!(err.to_string().contains("unrecognized flag \"verbose\""));
//!
//! assert!(usage(&templates).contains("clean.......Remove downloaded files"));
//! ```

#[macro_use]
mod macros;

mod derive;
mod error;
pub mod help;
mod input;
mod matcher;
mod types;
mod value;

pub use derive::{HEADER_FIELD, SchemaError, TAG_DELIMITER, derive_schemas, kebab_case};
pub use error::ParseError;
pub use input::{HELP_ALIASES, MissingValue, OPTION_PREFIX, RawInput, tokenize};
pub use matcher::{command_usage, parse, usage};
pub use types::*;
pub use value::{ConvertError, FieldValue, Header, ValueKind};
