use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::identity::AttributeWeights;

pub const DEFAULT_CONFIG_FILE: &str = "retest-state.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "retest-state",
    version,
    about = "Element identity, similarity and change-set tooling for UI snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: retest-state.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Similarity of two strings in [0, 1]
    Similarity {
        a: String,

        b: String,

        /// Compare as element paths, ignoring the trailing sibling index
        #[arg(long)]
        path: bool,
    },

    /// Match score of two element identities
    Match {
        #[arg(long)]
        expected_path: String,

        #[arg(long)]
        expected_type: String,

        #[arg(long)]
        actual_path: String,

        #[arg(long)]
        actual_type: String,
    },

    /// Assign retest ids to element texts within one scope
    Ids {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// SHA-256 digest of a string
    Checksum { text: String },

    /// Apply a JSON change set to a JSON element tree
    Apply {
        /// Root element JSON file
        #[arg(long)]
        tree: String,

        /// Change set JSON file
        #[arg(long)]
        changes: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `retest-state.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Per-key weight overrides, e.g. `text: 0.5`
    #[serde(default)]
    pub weights: AttributeWeights,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

/// Parse config YAML, falling back to defaults when malformed.
pub fn parse_config(content: &str) -> AppConfig {
    serde_yaml::from_str(content).unwrap_or_default()
}
