//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    chain::ChainArgs,
    check::CheckArgs,
    completions::CompletionsArgs,
    equip::EquipCommands,
    item::ItemCommands,
    ring::RingCommands,
    task::TaskCommands,
    weapon::WeaponCommands,
};

#[derive(Parser)]
#[command(name = "armory")]
#[command(author, version, about = "Game catalogue browser")]
#[command(long_about = "Browse the weapon, ring, equipment, task and item catalogues: \
    follow crafting lineages, filter by attributes and list results in a fixed order.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the catalogue JSON files (default: ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Weapon catalogue
    #[command(subcommand)]
    Weapon(WeaponCommands),

    /// Ring catalogue
    #[command(subcommand)]
    Ring(RingCommands),

    /// Equipment catalogue (armor pieces)
    #[command(subcommand)]
    Equip(EquipCommands),

    /// Task catalogue (quests)
    #[command(subcommand)]
    Task(TaskCommands),

    /// Item catalogue (consumables and materials)
    #[command(subcommand)]
    Item(ItemCommands),

    /// Show the crafting lineage of a record
    Chain(ChainArgs),

    /// Report name collisions and unresolved crafting sources
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just row keys, one per line
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["armory", "weapon", "list", "-f", "json", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
