use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{FilterCommands, GardenCommands, PlantCommands, SeedArgs};

/// Keep track of the plants growing in your garden
///
/// Sunflower keeps a catalog of plants and the plantings you have put in the
/// ground, remembers when each one was last watered and tells you which ones
/// are due. Run without a command to list the catalog through the saved
/// grow zone filter.
#[derive(Parser)]
#[command(version, about, name = "sunflower")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sunflower/sunflower.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Sunflower CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Import a plant catalog
    Seed(SeedArgs),
    /// Browse the plant catalog
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Manage the plants in your garden
    #[command(alias = "g")]
    Garden {
        #[command(subcommand)]
        command: GardenCommands,
    },
    /// Set the saved grow zone filter and search keyword
    #[command(alias = "f")]
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },
}
