//! `form-schema schema < tree.json` prints the schema for a tree.
//! `form-schema tree < schema.json` prints the tree rebuilt from a schema.

use clap::{Parser, Subcommand};
use form_builder::{BuilderConfig, ConfigError, FormElement, from_schema, to_schema};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "form-schema", about = "Convert form element trees to JSON Schema and back")]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug, Clone)]
enum Mode {
    /// Read an element tree from stdin and print its schema
    Schema {
        /// Builder config file (JSON)
        config: Option<PathBuf>,
    },
    /// Read a schema from stdin and print the rebuilt tree and lookup tables
    Tree {
        /// Builder config file (JSON)
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mode: &Mode) -> Result<String, CliError> {
    let config = match mode {
        Mode::Schema { config } | Mode::Tree { config } => load_config(config.as_deref())?,
    };

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = convert(mode, &input, &config)?;
    Ok(serde_json::to_string_pretty(&output)?)
}

fn load_config(path: Option<&Path>) -> Result<BuilderConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(BuilderConfig::from_json(&text)?)
        }
        None => Ok(BuilderConfig::default()),
    }
}

fn convert(mode: &Mode, input: &str, config: &BuilderConfig) -> Result<Value, CliError> {
    match mode {
        Mode::Schema { .. } => {
            let elements: Vec<FormElement> = serde_json::from_str(input)?;
            log::info!("converting {} root elements", elements.len());
            Ok(to_schema(&elements, &config.schema))
        }
        Mode::Tree { .. } => {
            let schema: Value = serde_json::from_str(input)?;
            Ok(serde_json::to_value(from_schema(&schema))?)
        }
    }
}
