//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use lumina_commerce::search::SortOption;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show products whose title or type contains this text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: featured, priceLow, priceHigh, nameAsc, nameDesc, rating.
    #[arg(long, default_value = "featured")]
    pub sort: SortOption,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Cart script (TOML or JSON).
    pub script: PathBuf,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Add a promotion code to the config file.
    AddCode {
        /// Promotion code.
        code: String,
        /// Fraction taken off the subtotal, e.g. 0.15.
        rate: f64,
    },
    /// Validate the config file.
    Validate,
}
