//! Sunflower CLI Application
//!
//! Command-line interface for the sunflower garden tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use sunflower_core::GardenBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = GardenBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let garden = builder
        .build()
        .await
        .context("Failed to open garden database")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Sunflower started");

    let cli = Cli::new(garden, renderer);
    match command {
        Some(Seed(args)) => cli.seed(args).await,
        Some(Plant { command }) => cli.handle_plant_command(command).await,
        Some(Garden { command }) => cli.handle_garden_command(command).await,
        Some(Filter { command }) => cli.handle_filter_command(command).await,
        None => cli.list_filtered_plants().await,
    }
}
