//! Command-line interface for regex-center.
//!
//! This module provides the CLI structure for the `regexc` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, CountCommand, ExtractCommand, HighlightCommand, ListCommand,
    ReplaceCommand, TestCommand,
};

use crate::logging::Verbosity;

/// regexc - Named regular expressions with ReDoS screening
///
/// Look up, test, extract, count and replace using a library of named
/// patterns such as `email:basic` or `phone:CN`.
#[derive(Debug, Parser)]
#[command(name = "regexc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip the ReDoS heuristic
    #[arg(long, global = true)]
    pub insecure: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the expression registered for a key
    Get {
        /// Pattern key (`type` or `type:group`)
        key: String,
    },

    /// Test whether a value matches a pattern
    Test(TestCommand),

    /// Print every match in a text
    Extract(ExtractCommand),

    /// Count matches in a text
    Count(CountCommand),

    /// Replace or mask every match in a text
    Replace(ReplaceCommand),

    /// Wrap every match in markup
    Highlight(HighlightCommand),

    /// List registered pattern keys
    List(ListCommand),

    /// Screen an expression with the ReDoS heuristic
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
