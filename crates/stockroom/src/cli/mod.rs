//! Command-line interface for stockroom.
//!
//! This module provides the CLI structure for the `stockroom` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ChartCommand, ClearCommand, ConfigCommand, DeleteCommand, ListCommand, ModeArg,
    StatusCommand,
};

/// stockroom - Keep track of what is on the shelves
///
/// Records items with a quantity and unit price, lists them with their total
/// value, and charts quantity or value per item.
#[derive(Debug, Parser)]
#[command(name = "stockroom")]
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

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an item
    Add(AddCommand),

    /// Delete an item
    Delete(DeleteCommand),

    /// Delete every item
    Clear(ClearCommand),

    /// Show the inventory table
    List(ListCommand),

    /// Show the inventory chart
    Chart(ChartCommand),

    /// Start an interactive session
    Shell,

    /// Show storage status and totals
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
