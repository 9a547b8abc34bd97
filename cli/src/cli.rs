//! Command-line arguments
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "maxflow",
    about = "Maximum flow via Ford-Fulkerson with depth-first augmenting paths",
    version
)]
pub struct Cli {
    /// Problem files; standard input is read when none are given
    pub inputs: Vec<PathBuf>,

    /// JSON solver configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Solver parameter override, applied after --config (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also list the edges of a minimum cut
    #[arg(long = "min-cut")]
    pub min_cut: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
