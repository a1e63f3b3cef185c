//! Usage text rendering.
//!
//! Two views are rendered from derived schemas: the overview lists every
//! command with its usage line, and the detail view shows one command's
//! invocation line followed by a row per argument and option. Both are laid
//! out as a table whose column widths are measured from the rows of the
//! current call.

use crate::types::CommandSchema;

/// Indent added in front of the widest key.
const KEY_INDENT: usize = 4;
/// Leader between key and usage columns.
const LEADER: &str = ".......";
/// Padding after the widest usage text.
const USAGE_GAP: usize = 4;

struct Row<'a> {
    key: String,
    usage: &'a str,
    type_name: Option<String>,
    default: Option<&'a str>,
}

/// Renders the command overview.
///
/// # Examples
///
/// ```
/// use cmdflag_core::{command, derive_schemas, help, Header, Template};
///
/// command! {
///     #[derive(Default)]
///     struct Mirror {
///         command: Header = "sync|Synchronise the mirror",
///     }
/// }
///
/// let schemas = derive_schemas(&[Template::of::<Mirror>()]);
/// assert_eq!(
///     help::overview(&schemas),
///     "\n    sync.......Synchronise the mirror    \n\n",
/// );
/// ```
pub fn overview(schemas: &[CommandSchema]) -> String {
    let rows: Vec<Row<'_>> = schemas
        .iter()
        .map(|schema| Row {
            key: schema.name.clone(),
            usage: &schema.usage,
            type_name: None,
            default: None,
        })
        .collect();

    format!("\n{}", format_table(&rows))
}

/// Renders the detail view of one command.
pub fn command_details(schema: &CommandSchema) -> String {
    let mut rows = Vec::with_capacity(schema.arguments.len() + schema.options.len());
    let mut out = format!("\nusage: {} ", schema.name);

    for arg in &schema.arguments {
        let key = format!("<{}>", arg.name);
        out.push_str(&format!("{key} "));
        rows.push(Row {
            key,
            usage: &arg.usage,
            type_name: Some(display_type(&arg.type_name)),
            default: None,
        });
    }
    for (name, opt) in &schema.options {
        let key = format!("[-{name}]");
        out.push_str(&format!("{key} "));
        rows.push(Row {
            key,
            usage: &opt.usage,
            type_name: Some(display_type(&opt.type_name)),
            default: opt.default.as_deref(),
        });
    }

    out.push_str("\n\n");
    out.push_str(&format_table(&rows));
    out
}

/// Short lowercase name of a declared type.
///
/// Strips an `Option` wrapper and any module path.
///
/// # Examples
///
/// ```
/// use cmdflag_core::help::display_type;
///
/// assert_eq!(display_type("Option<std::time::Duration>"), "duration");
/// assert_eq!(display_type("String"), "string");
/// assert_eq!(display_type("Option < u16 >"), "u16");
/// ```
pub fn display_type(type_name: &str) -> String {
    let compact: String = type_name.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = match compact.split_once('<') {
        Some((head, rest)) if head.rsplit("::").next() == Some("Option") => {
            rest.strip_suffix('>').unwrap_or(rest)
        }
        _ => compact.as_str(),
    };
    inner.rsplit("::").next().unwrap_or(inner).to_lowercase()
}

fn format_table(rows: &[Row<'_>]) -> String {
    let key_width = rows.iter().map(|r| width(&r.key)).max().unwrap_or(0);
    let usage_width = rows.iter().map(|r| width(r.usage)).max().unwrap_or(0);
    let type_width = rows
        .iter()
        .filter_map(|r| r.type_name.as_deref())
        .map(width)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{:>kw$}{LEADER}{:<uw$}",
            row.key,
            row.usage,
            kw = key_width + KEY_INDENT,
            uw = usage_width + USAGE_GAP
        ));
        if let Some(ref type_name) = row.type_name {
            out.push_str(&format!("{type_name:<type_width$}"));
            if let Some(default) = row.default {
                out.push_str(&format!("  (default: \"{default}\")"));
            }
        }
        out.push('\n');
    }

    out.push('\n');
    out
}

fn width(text: &str) -> usize {
    text.chars().count()
}
