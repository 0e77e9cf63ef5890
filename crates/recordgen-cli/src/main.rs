mod emitter;
mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use emitter::JsonEmitter;
use recordgen::{
    build::{emit::emit_all, validate},
    config::GenConfig,
    schema::node::Database,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[command(name = "recordgen", version, about = "Generate record classes from a schema file")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info", env = "RECORDGEN_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate class models for every table
    Generate {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Generation config (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "generated")]
        out: PathBuf,
    },

    /// Validate a schema without generating anything
    Check {
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    run(cli.command)
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate {
            schema,
            config,
            out,
        } => {
            let database = load_schema(&schema)?;
            let config = match config {
                Some(path) => GenConfig::load(&path)?,
                None => GenConfig::default(),
            };

            let generated = recordgen::generate(&database, &config)?;
            let mut emitter = JsonEmitter::new(&out);
            let count = emit_all(&mut emitter, &generated)?;

            tracing::info!(classes = count, out = %out.display(), "generation complete");
        }
        Command::Check { schema } => {
            let database = load_schema(&schema)?;
            validate(&database)?;

            tracing::info!(tables = database.tables.len(), "schema is valid");
        }
    }

    Ok(())
}

fn load_schema(path: &Path) -> anyhow::Result<Database> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading schema {}", path.display()))?;

    Database::from_toml_str(&source).with_context(|| format!("parsing schema {}", path.display()))
}

///
/// TESTS
///
