// src/help.rs

//! Help listing synthesis.
//!
//! Purely a read projection of the registry: no graph compilation, no
//! mutation. Tasks are listed in name order regardless of registration
//! order, so the output is stable across runs.

use std::fmt::Write;

use crate::errors::Result;
use crate::registry::Registry;

const MARGIN: &str = "  ";
const SEPARATOR: &str = "  ";

/// Render the top-level task listing: a `Usage` header block followed by one
/// line per task, the name padded to a shared column width, then the
/// description. Options are reserved for the per-task detail view.
pub fn render_listing(registry: &Registry) -> String {
    let width = registry.names().map(str::len).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str("Usage\n");
    let _ = writeln!(out, "{MARGIN}taskdag [OPTIONS] [TASKS]...");
    out.push('\n');
    out.push_str("Tasks\n");

    for desc in registry.iter() {
        let _ = writeln!(
            out,
            "{MARGIN}{name:<width$}{SEPARATOR}{description}",
            name = desc.name,
            description = desc.description,
        );
    }

    out
}

/// Render the detail view for one task: description plus its options mapping
/// in declaration order.
pub fn render_detail(registry: &Registry, name: &str) -> Result<String> {
    let desc = registry.lookup(name)?;

    let mut out = String::new();
    let _ = writeln!(out, "{}", desc.name);
    if !desc.description.is_empty() {
        let _ = writeln!(out, "{MARGIN}{}", desc.description);
    }

    if !desc.options.is_empty() {
        out.push('\n');
        out.push_str("Options\n");
        let width = desc
            .options
            .iter()
            .map(|o| o.flag.len())
            .max()
            .unwrap_or(0);
        for option in &desc.options {
            let _ = writeln!(
                out,
                "{MARGIN}{flag:<width$}{SEPARATOR}{help}",
                flag = option.flag,
                help = option.help,
            );
        }
    }

    Ok(out)
}
