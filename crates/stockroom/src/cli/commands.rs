//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::DisplayMode;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Item name (must be unique, ignoring case)
    pub name: String,

    /// Quantity on hand
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,

    /// Unit price
    #[arg(allow_hyphen_values = true)]
    pub price: String,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Item id, or a unique prefix of one
    pub id: String,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// What the bars measure
    #[arg(short, long, value_enum, default_value = "quantity")]
    pub mode: ModeArg,

    /// Bar width in cells (overrides the configured width)
    #[arg(short, long)]
    pub width: Option<usize>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
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

/// Chart mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Bars show quantity on hand
    #[default]
    Quantity,
    /// Bars show quantity times price
    Value,
}

impl From<ModeArg> for DisplayMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Quantity => Self::Quantity,
            ModeArg::Value => Self::Value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(DisplayMode::from(ModeArg::Quantity), DisplayMode::Quantity);
        assert_eq!(DisplayMode::from(ModeArg::Value), DisplayMode::Value);
    }

    #[test]
    fn test_mode_arg_default() {
        assert_eq!(ModeArg::default(), ModeArg::Quantity);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            name: "Bolts".to_string(),
            quantity: "100".to_string(),
            price: "0.25".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Bolts"));
    }
}
