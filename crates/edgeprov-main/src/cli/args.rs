// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of EdgeProv.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(name = "edgeprov")]
#[command(author, version, about = "EdgeProv - Edge component provisioning")]
#[command(
    long_about = "Provision the component configuration of an OpenEMS Edge from a plan file.\n\
    \nPre-existing components named in the plan are removed, every planned component is\n\
    created one at a time with pacing, and required controllers are merged into the scheduler.\n\
    \nExamples:\n  \
    edgeprov snapshot                       # Show what the Edge runs today\n  \
    edgeprov plan --config home10.toml      # Dry run against the live Edge\n  \
    edgeprov apply --config home10.toml     # Provision"
)]
pub struct Cli {
    /// Plan file (TOML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the components currently configured on the Edge
    Snapshot,

    /// Classify the planned components against the Edge without writing anything
    #[command(
        long_about = "Fetch the Edge configuration and show, for every planned component,\n\
        whether it is already present (and would be removed first) or missing.\n\
        Also lists the controller ids the scheduler step would require."
    )]
    Plan,

    /// Provision the planned components and update the scheduler
    #[command(
        long_about = "Run the full provisioning sequence: remove pre-existing components,\n\
        create/update every planned component in order, install apps, merge the scheduler.\n\
        \nExits with a non-zero status if any step fails; the status table shows how far it got."
    )]
    Apply,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_defaults_and_global_flag() {
        let cli = Cli::parse_from(["edgeprov", "plan"]);
        assert!(matches!(cli.command, Commands::Plan));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));

        let cli = Cli::parse_from(["edgeprov", "apply", "--config", "home10.toml"]);
        assert!(matches!(cli.command, Commands::Apply));
        assert_eq!(cli.config, PathBuf::from("home10.toml"));
    }
}
