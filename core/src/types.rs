//! Command template and schema type definitions.
//!
//! A *template* is a Rust type describing one command through a static list
//! of [`FieldSpec`]s. The parser derives a [`CommandSchema`] from each
//! template on every call, then fills a fresh instance of the template type
//! from the user's arguments and hands it back as a [`Parsed`] value.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::value::{ConvertError, FieldValue, ValueKind};

/// Static description of one field of a command template.
///
/// Built by the [`command!`](crate::command) macro, or by hand when
/// implementing [`Command`] directly.
///
/// # Examples
///
/// ```
/// use cmdflag_core::{FieldSpec, ValueKind};
///
/// let spec = FieldSpec::of::<Option<u32>>("retries", "Option<u32>", "3|How often to retry");
/// assert!(spec.optional);
/// assert_eq!(spec.kind, ValueKind::Uint);
///
/// let spec = spec.renamed("tries");
/// assert_eq!(spec.rename, Some("tries"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field identifier as declared; also the key passed to [`Command::assign`].
    pub ident: &'static str,
    /// Declared type as written in source.
    pub type_name: &'static str,
    /// Semantic kind of the declared type.
    pub kind: ValueKind,
    /// Declared type is an optional wrapper.
    pub optional: bool,
    /// Pipe-delimited annotation.
    pub tag: &'static str,
    /// Explicit option name replacing the kebab-case derived one.
    pub rename: Option<&'static str>,
}

impl FieldSpec {
    /// Describes a field of type `T`.
    pub fn of<T: FieldValue>(
        ident: &'static str,
        type_name: &'static str,
        tag: &'static str,
    ) -> Self {
        Self {
            ident,
            type_name,
            kind: T::KIND,
            optional: T::OPTIONAL,
            tag,
            rename: None,
        }
    }

    /// Overrides the option name.
    pub fn renamed(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }
}

/// A type that can be selected and populated as a command.
///
/// Usually implemented through the [`command!`](crate::command) macro.
pub trait Command: Default + 'static {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Converts `token` and stores it in the field named `field`.
    fn assign(&mut self, field: &str, token: &str) -> Result<(), ConvertError>;
}

/// Object-safe view of a record under construction.
pub(crate) trait Record {
    fn assign(&mut self, field: &str, token: &str) -> Result<(), ConvertError>;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<C: Command> Record for C {
    fn assign(&mut self, field: &str, token: &str) -> Result<(), ConvertError> {
        Command::assign(self, field, token)
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn instantiate<C: Command>() -> Box<dyn Record> {
    Box::new(C::default())
}

/// Type-erased handle to a command template.
///
/// Lets commands of different types be passed together to
/// [`parse`](crate::parse).
#[derive(Clone, Copy)]
pub struct Template {
    type_name: &'static str,
    fields: fn() -> Vec<FieldSpec>,
    create: fn() -> Box<dyn Record>,
}

impl Template {
    /// Returns the template for command type `C`.
    pub fn of<C: Command>() -> Self {
        Self {
            type_name: std::any::type_name::<C>(),
            fields: C::fields,
            create: instantiate::<C>,
        }
    }

    /// Rust type name of the template.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Field descriptors of the template.
    pub fn fields(&self) -> Vec<FieldSpec> {
        (self.fields)()
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Record> {
        (self.create)()
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.type_name).finish()
    }
}

/// A positional argument of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDef {
    /// Field key on the template.
    pub field: String,
    /// Display name (lowercase field identifier).
    pub name: String,
    /// Usage text.
    pub usage: String,
    /// Declared type as written in source.
    pub type_name: String,
    /// Semantic kind.
    pub kind: ValueKind,
}

/// A named option of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    /// Field key on the template.
    pub field: String,
    /// Usage text.
    pub usage: String,
    /// Declared type as written in source.
    pub type_name: String,
    /// Semantic kind.
    pub kind: ValueKind,
    /// Default applied before user-supplied values, as text.
    pub default: Option<String>,
}

/// Normalized schema of one command, derived from its template.
///
/// See [`CommandSchema::derive`].
#[derive(Debug, Clone, Serialize)]
pub struct CommandSchema {
    /// Command name matched against the second positional token.
    pub name: String,
    /// One-line usage text.
    pub usage: String,
    /// Positional arguments in declaration order.
    pub arguments: Vec<ArgumentDef>,
    /// Options keyed by option name.
    pub options: BTreeMap<String, OptionDef>,
    #[serde(skip)]
    pub(crate) template: Template,
}

impl CommandSchema {
    /// Template this schema was derived from.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Finds an option by name.
    pub fn find_option(&self, name: &str) -> Option<&OptionDef> {
        self.options.get(name)
    }

    /// Display names of the positional arguments, in order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Successfully parsed command.
///
/// Holds a populated instance of the matched template type behind a
/// type-erased box; recover it with [`downcast`](Parsed::downcast) or
/// [`downcast_ref`](Parsed::downcast_ref).
#[derive(Debug)]
pub struct Parsed {
    command: String,
    value: Box<dyn Any>,
}

impl Parsed {
    pub(crate) fn new(command: String, value: Box<dyn Any>) -> Self {
        Self { command, value }
    }

    /// Name of the matched command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns `true` if the record is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrows the record as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Takes the record as a `T`, or gives `self` back if it is another type.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.value.downcast::<T>() {
            Ok(record) => Ok(*record),
            Err(value) => Err(Self {
                command: self.command,
                value,
            }),
        }
    }

    /// Releases the untyped record.
    pub fn into_any(self) -> Box<dyn Any> {
        self.value
    }
}
