//! errid - CLI for the stable diagnostic identifier registry

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use errid::build_catalog;
use errid::commands::{self, ColorChoice, CommandOptions};
use errid::util::config::{load_config, load_project_config, ToolConfig};
use errid::util::logger::{self, LogLevel};
use errid::{NAME, VERSION};

/// Stable error numbers for the compiler's diagnostic catalog
#[derive(Parser, Debug)]
#[command(name = "errid")]
#[command(author = "YaoXiang Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./errid.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color control
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the catalog
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Include sentinel kinds and retired slots
        #[arg(short, long)]
        all: bool,
    },

    /// Resolve a kind name, error number (42, -1) or code (E042)
    Lookup {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Validate the catalog; exits non-zero on any inconsistency
    Validate,

    /// Write a snapshot of the current catalog
    Snapshot {
        /// Output path (defaults to the configured snapshot path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compare the catalog against the last published snapshot
    Check {
        /// Snapshot path (defaults to the configured snapshot path)
        #[arg(short, long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },

    /// Generate help page stubs and the error index
    Docs {
        /// Output directory (defaults to the configured docs output)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn load_tool_config(path: Option<&PathBuf>) -> Result<ToolConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            load_project_config(&cwd).context("Failed to load errid.toml")
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_tool_config(args.config.as_ref())?;
    logger::init_with_level(if args.verbose {
        LogLevel::Debug
    } else {
        config.log.level
    });
    debug!("{} {} with {:?}", NAME, VERSION, config);

    let options = CommandOptions {
        color: args.color.use_color(),
        docs_base: &config.docs.base_url,
    };

    let registry = || build_catalog().context("Diagnostic catalog is inconsistent");

    let ok = match args.command {
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            true
        }
        Commands::Validate => commands::validate(build_catalog(), &options)?,
        Commands::List { json, all } => commands::list(&registry()?, json, all, &options)?,
        Commands::Lookup { query } => commands::lookup(&registry()?, &query, &options)?,
        Commands::Snapshot { output } => {
            let output = output.unwrap_or_else(|| config.snapshot.path.clone());
            commands::snapshot(&registry()?, &output)?
        }
        Commands::Check { snapshot } => {
            let snapshot = snapshot.unwrap_or_else(|| config.snapshot.path.clone());
            commands::check(&registry()?, &snapshot, &options)?
        }
        Commands::Docs { output } => {
            let output = output.unwrap_or_else(|| config.docs.output.clone());
            commands::docs(&registry()?, &output)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
