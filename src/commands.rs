//! Command implementations for the `errid` binary
//!
//! Each command prints its result and returns whether it succeeded; the
//! binary turns `false` into a non-zero exit code so a broken catalog stops
//! packaging.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::docs::{doc_path, generate_docs};
use crate::registry::{DiagnosticKind, Registry, RegistryError};
use crate::snapshot::{check_evolution, CatalogSnapshot};

/// Color control: "auto", "always", or "never"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn use_color(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Auto: use color if stdout is a TTY
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Options shared by all commands
#[derive(Debug, Clone)]
pub struct CommandOptions<'a> {
    pub color: bool,
    pub docs_base: &'a str,
}

fn status_label(
    kind: &DiagnosticKind,
    color: bool,
) -> String {
    let label = if kind.is_sentinel() {
        "sentinel"
    } else if kind.is_retired() {
        "retired"
    } else {
        "active"
    };
    if !color {
        return label.to_string();
    }
    match label {
        "active" => label.green().to_string(),
        "retired" => label.dimmed().to_string(),
        _ => label.yellow().to_string(),
    }
}

fn success(
    message: &str,
    color: bool,
) -> String {
    if color {
        message.green().to_string()
    } else {
        message.to_string()
    }
}

fn failure(
    message: &str,
    color: bool,
) -> String {
    if color {
        message.red().to_string()
    } else {
        message.to_string()
    }
}

/// `errid list`
pub fn list(
    registry: &Registry,
    json: bool,
    all: bool,
    options: &CommandOptions<'_>,
) -> Result<bool> {
    let kinds: Vec<&DiagnosticKind> = registry
        .iter()
        .filter(|k| all || (!k.is_sentinel() && !k.is_retired()))
        .collect();

    if json {
        #[derive(Serialize)]
        struct ListEntry<'a> {
            ordinal: u32,
            error_number: i32,
            code: Option<String>,
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            former_name: Option<&'a str>,
            status: &'static str,
            doc: Option<String>,
        }

        let entries: Vec<ListEntry<'_>> = kinds
            .iter()
            .map(|k| ListEntry {
                ordinal: k.ordinal().get(),
                error_number: k.error_number().get(),
                code: k.code(),
                name: k.name(),
                former_name: k.former_name(),
                status: if k.is_sentinel() {
                    "sentinel"
                } else if k.is_retired() {
                    "retired"
                } else {
                    "active"
                },
                doc: k
                    .code()
                    .map(|_| doc_path(options.docs_base, k.error_number())),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(true);
    }

    for kind in kinds {
        let number = kind.error_number().to_string();
        let name = match kind.former_name() {
            Some(former) => format!("{} (was {})", kind.name(), former),
            None => kind.name().to_string(),
        };
        println!(
            "{:>5}  {:>4}  {:<56} {}",
            number,
            kind.ordinal().get(),
            name,
            status_label(kind, options.color)
        );
    }
    Ok(true)
}

/// `errid lookup <NAME|NUMBER|CODE>`
pub fn lookup(
    registry: &Registry,
    query: &str,
    options: &CommandOptions<'_>,
) -> Result<bool> {
    let kind = match registry.resolve(query) {
        Ok(kind) => kind,
        Err(e @ (RegistryError::UnknownName(_) | RegistryError::UnknownErrorNumber(_))) => {
            eprintln!("{}", e);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    println!("name:         {}", kind.name());
    if let Some(former) = kind.former_name() {
        println!("former name:  {}", former);
    }
    println!("ordinal:      {}", kind.ordinal().get());
    println!("error number: {}", kind.error_number().get());
    if let Some(code) = kind.code() {
        println!("code:         {}", code);
        println!("docs:         {}", doc_path(options.docs_base, kind.error_number()));
    }
    println!("status:       {}", status_label(kind, options.color));
    Ok(true)
}

/// `errid validate`
pub fn validate(
    result: std::result::Result<Registry, RegistryError>,
    options: &CommandOptions<'_>,
) -> Result<bool> {
    match result {
        Ok(registry) => {
            let retired = registry.iter().filter(|k| k.is_retired()).count();
            let message = format!(
                "✓ catalog valid ({} kinds, {} retired, sentinel offset {})",
                registry.len(),
                retired,
                registry.numbering().sentinel_offset()
            );
            println!("{}", success(&message, options.color));
            Ok(true)
        }
        Err(RegistryError::Validation(e)) => {
            eprintln!(
                "{}",
                failure("diagnostic catalog failed validation:", options.color)
            );
            for violation in &e.violations {
                eprintln!("  - {}", violation);
            }
            Ok(false)
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                failure("diagnostic catalog could not be built:", options.color),
                e
            );
            Ok(false)
        }
    }
}

/// `errid snapshot`
pub fn snapshot(
    registry: &Registry,
    output: &Path,
) -> Result<bool> {
    CatalogSnapshot::capture(registry)
        .save(output)
        .with_context(|| format!("Failed to write snapshot {}", output.display()))?;
    println!("wrote {} entries to {}", registry.len(), output.display());
    Ok(true)
}

/// `errid check`
pub fn check(
    registry: &Registry,
    snapshot_path: &Path,
    options: &CommandOptions<'_>,
) -> Result<bool> {
    let previous = CatalogSnapshot::load(snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    match check_evolution(&previous, registry) {
        Ok(report) => {
            for entry in &report.appended {
                println!("+ {} {}", entry.error_number, entry.name);
            }
            for entry in &report.retired {
                println!(
                    "- {} {} (retired)",
                    entry.error_number,
                    entry.former_name.as_deref().unwrap_or(&entry.name)
                );
            }
            let message = if report.is_unchanged() {
                "✓ catalog matches snapshot".to_string()
            } else {
                format!(
                    "✓ catalog evolution ok ({} appended, {} retired); refresh the snapshot",
                    report.appended.len(),
                    report.retired.len()
                )
            };
            println!("{}", success(&message, options.color));
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", failure(&e.to_string(), options.color));
            for violation in &e.violations {
                eprintln!("  - {}", violation);
            }
            Ok(false)
        }
    }
}

/// `errid docs`
pub fn docs(
    registry: &Registry,
    output: &Path,
) -> Result<bool> {
    let summary = generate_docs(registry, output)?;
    println!(
        "{}: {} page(s) created, {} kept, {} retired slot(s) indexed",
        output.display(),
        summary.created,
        summary.kept,
        summary.retired
    );
    Ok(true)
}
