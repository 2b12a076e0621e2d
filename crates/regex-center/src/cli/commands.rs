//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::gate::DEFAULT_HIGHLIGHT;

/// Test command arguments.
#[derive(Debug, Args)]
pub struct TestCommand {
    /// Pattern key (`type` or `type:group`)
    pub key: String,

    /// Value to test
    pub value: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Extract command arguments.
#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Pattern key (`type` or `type:group`)
    pub key: String,

    /// Text to search
    pub text: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Count command arguments.
#[derive(Debug, Args)]
pub struct CountCommand {
    /// Pattern key (`type` or `type:group`)
    pub key: String,

    /// Text to search
    pub text: String,
}

/// Replace command arguments.
#[derive(Debug, Args)]
pub struct ReplaceCommand {
    /// Pattern key (`type` or `type:group`)
    pub key: String,

    /// Text to rewrite
    pub text: String,

    /// Replacement template (`$0` is the whole match)
    #[arg(
        short,
        long,
        value_name = "TEMPLATE",
        conflicts_with = "mask",
        required_unless_present = "mask"
    )]
    pub with: Option<String>,

    /// Mask the middle of each match instead of replacing it
    #[arg(short, long)]
    pub mask: bool,

    /// Characters kept at the start of each masked match
    #[arg(long, default_value = "3", requires = "mask")]
    pub keep_start: usize,

    /// Characters kept at the end of each masked match
    #[arg(long, default_value = "4", requires = "mask")]
    pub keep_end: usize,
}

/// Highlight command arguments.
#[derive(Debug, Args)]
pub struct HighlightCommand {
    /// Pattern key (`type` or `type:group`)
    pub key: String,

    /// Text to highlight
    pub text: String,

    /// Markup template (`$0` is the whole match)
    #[arg(short, long, default_value = DEFAULT_HIGHLIGHT)]
    pub template: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Show expressions next to keys
    #[arg(short, long)]
    pub long: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Expression to screen
    pub expression: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
