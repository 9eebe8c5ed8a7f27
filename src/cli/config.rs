use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::reduce::simplifier::SimplifierConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "hpath",
    version,
    about = "Compute stable, human-readable locators for elements of a rendered page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: hpath.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append one JSON line per locate run to this file
    #[arg(long, global = true)]
    pub trace_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the HPath of one node of a snapshot
    Locate {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(long)]
        snapshot: String,

        /// Node id (pre-order index); defaults to the node marked as target
        #[arg(long)]
        target: Option<usize>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the simplified tree of a snapshot
    Reduce {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(long)]
        snapshot: String,

        /// Output format: outline, yaml, json
        #[arg(long, default_value = "outline")]
        format: String,
    },

    /// Compute HPaths for many nodes of one snapshot
    Batch {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(long)]
        snapshot: String,

        /// Comma-separated node ids (default: every element)
        #[arg(long, value_delimiter = ',')]
        targets: Vec<usize>,

        /// Output format: console, json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `hpath.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simplify: SimplifierConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// `text`/`json` for locate, `console`/`json` for batch
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// JSONL file receiving one event per locate run
    pub file: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("hpath.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Value Resolution (CLI > config > default)
// ============================================================================

pub fn resolve_format(cli: Option<&str>, config: Option<&str>, default: &str) -> String {
    cli.or(config).unwrap_or(default).to_string()
}

pub fn resolve_trace_file<'a>(cli: Option<&'a str>, config: &'a AppConfig) -> Option<&'a str> {
    cli.or(config.trace.file.as_deref())
}
