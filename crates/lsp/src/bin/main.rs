// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `typeql-complete <file> <offset|line:col> [--config <file>]`
//!
//! Prints the completion result, the rendered LSP items and the syntax
//! diagnostics of the file as JSON. `line:col` is zero-based, as in LSP.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lsp_types::Position;
use serde_json::json;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use typeql_lsp::{CompletionEngine, EngineConfig};

/// Context-sensitive completion for TypeQL files
#[derive(Parser, Debug)]
#[command(name = "typeql-complete")]
#[command(about = "Complete a TypeQL document at a cursor position", long_about = None)]
#[command(version)]
struct Cli {
    /// TypeQL file to complete in
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Cursor as a byte offset or a zero-based `line:col`
    #[arg(value_name = "CURSOR")]
    cursor: String,

    /// JSON engine configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn cursor_offset(engine: &CompletionEngine, text: &str, cursor: &str) -> Result<usize> {
    match cursor.split_once(':') {
        Some((line, col)) => {
            let position = Position::new(
                line.parse().context("invalid line")?,
                col.parse().context("invalid column")?,
            );
            Ok(engine.offset(text, position)?)
        }
        None => cursor.parse().context("invalid offset"),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            Ok(EngineConfig::from_json_str(&json)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    let engine = CompletionEngine::new(load_config(cli.config.as_ref())?);

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let offset = cursor_offset(&engine, &text, &cli.cursor)?;
    tracing::info!(file = %cli.file.display(), offset, "Completing");

    let result = engine.complete_offset(&text, offset)?;
    let items = engine.render_at(&text, offset)?;
    let output = json!({
        "result": result,
        "items": items,
        "diagnostics": engine.diagnostics(&text),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
