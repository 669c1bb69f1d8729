//! Command-line argument definitions and command handlers
//!
//! Argument structures use clap's derive API; [`Cli`] runs each command
//! against a [`Garden`] and renders the outcome as markdown through the
//! display wrappers of `sunflower_core`.
//!
//! ```text
//! User Input → CLI Args (clap) → Garden / PlantListFilter → Display → Renderer
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jiff::Timestamp;
use log::debug;
use sunflower_core::{
    display::{CreateResult, DeleteResult, SeedResult, WateredResult},
    Garden, GardenError, Gardens, PlantListFilter, Plantings, Plants, Subscription,
};

use crate::renderer::TerminalRenderer;

/// Import a plant catalog
///
/// Reads a JSON array of plants and writes them to the catalog. Plants that
/// already exist are replaced. Without a file, the catalog bundled with
/// sunflower is imported.
#[derive(Args)]
pub struct SeedArgs {
    #[arg(help = "JSON catalog to import; defaults to the bundled catalog")]
    pub file: Option<PathBuf>,
}

/// List plants in the catalog
#[derive(Args)]
pub struct ListPlantsArgs {
    #[arg(short, long, help = "Only show plants of this grow zone")]
    pub zone: Option<i32>,
}

/// Search plants by name prefix
#[derive(Args)]
pub struct SearchPlantsArgs {
    #[arg(help = "Beginning of the plant name, case-insensitive")]
    pub prefix: String,
}

/// Show details of a plant
#[derive(Args)]
pub struct ShowPlantArgs {
    #[arg(help = "Identifier of the plant, e.g. malus-pumila")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// List plants in the catalog
    #[command(alias = "l")]
    List(ListPlantsArgs),
    /// Search plants by name prefix
    #[command(alias = "s")]
    Search(SearchPlantsArgs),
    /// Show details of a plant
    Show(ShowPlantArgs),
}

/// Put a plant from the catalog in the garden
#[derive(Args)]
pub struct AddPlantingArgs {
    #[arg(help = "Identifier of the plant to add")]
    pub plant_id: String,
}

/// Refers to one planting in the garden
#[derive(Args)]
pub struct PlantingIdArgs {
    #[arg(help = "Planting ID as shown by `garden list`")]
    pub id: u64,
}

#[derive(Subcommand)]
pub enum GardenCommands {
    /// List the plants in your garden
    #[command(alias = "l")]
    List,
    /// Add a plant to your garden
    #[command(alias = "a")]
    Add(AddPlantingArgs),
    /// Remove a planting from your garden
    #[command(alias = "rm")]
    Remove(PlantingIdArgs),
    /// Record that a planting was watered just now
    #[command(alias = "w")]
    Water(PlantingIdArgs),
    /// List plantings that need water
    Due,
    /// Follow the garden and print it whenever it changes, until Ctrl-C
    Watch,
}

/// Filter by grow zone
#[derive(Args)]
pub struct GrowZoneArgs {
    #[arg(allow_negative_numbers = true, help = "Grow zone number")]
    pub zone: i32,
}

/// Set the saved search keyword
#[derive(Args)]
pub struct KeywordArgs {
    #[arg(help = "Name prefix to search for; omit to clear the search")]
    pub keyword: Option<String>,
}

#[derive(Subcommand)]
pub enum FilterCommands {
    /// Only list plants of a grow zone
    Zone(GrowZoneArgs),
    /// Remove the grow zone filter
    Clear,
    /// Remove the grow zone filter if set, otherwise filter by the zone
    Toggle(GrowZoneArgs),
    /// Save a search keyword
    Keyword(KeywordArgs),
    /// Show the saved filter and the plants it selects
    Show,
}

/// Runs commands against a garden and renders the results.
pub struct Cli {
    garden: Garden,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(garden: Garden, renderer: TerminalRenderer) -> Self {
        Self { garden, renderer }
    }

    pub async fn seed(&self, args: SeedArgs) -> Result<()> {
        let (count, source) = match args.file {
            Some(path) => {
                let count = self
                    .garden
                    .seed_from_file(&path)
                    .await
                    .with_context(|| format!("Failed to import {}", path.display()))?;
                (count, path.display().to_string())
            }
            None => {
                let count = self
                    .garden
                    .seed_bundled()
                    .await
                    .context("Failed to import bundled catalog")?;
                (count, "the bundled catalog".to_string())
            }
        };
        self.renderer.render(&SeedResult { count, source }.to_string())
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        match command {
            PlantCommands::List(args) => self.list_plants(args).await,
            PlantCommands::Search(args) => self.search_plants(args).await,
            PlantCommands::Show(args) => self.show_plant(args).await,
        }
    }

    pub async fn handle_garden_command(&self, command: GardenCommands) -> Result<()> {
        match command {
            GardenCommands::List => self.list_garden().await,
            GardenCommands::Add(args) => self.add_planting(args).await,
            GardenCommands::Remove(args) => self.remove_planting(args).await,
            GardenCommands::Water(args) => self.water_planting(args).await,
            GardenCommands::Due => self.list_due().await,
            GardenCommands::Watch => self.watch_garden().await,
        }
    }

    pub async fn handle_filter_command(&self, command: FilterCommands) -> Result<()> {
        let filter = self.filter().await?;
        match command {
            FilterCommands::Zone(args) => {
                filter.set_grow_zone(args.zone).await?;
            }
            FilterCommands::Clear => {
                filter.clear_grow_zone().await?;
            }
            FilterCommands::Toggle(args) => {
                let active = filter.toggle_grow_zone(args.zone).await?;
                debug!("Grow zone filter active: {active}");
            }
            FilterCommands::Keyword(args) => {
                filter.set_keyword(args.keyword.unwrap_or_default()).await?;
            }
            FilterCommands::Show => {}
        }
        self.render_filter(&filter).await
    }

    /// Lists the catalog through the saved grow zone filter.
    pub async fn list_filtered_plants(&self) -> Result<()> {
        let filter = self.filter().await?;
        let plants = first(filter.plants()).await?;
        self.renderer.render(&Plants(plants).to_string())
    }

    async fn list_plants(&self, args: ListPlantsArgs) -> Result<()> {
        let plants = match args.zone {
            Some(zone) => self.garden.list_plants_with_grow_zone(zone).await?,
            None => self.garden.list_plants().await?,
        };
        self.renderer.render(&Plants(plants).to_string())
    }

    async fn search_plants(&self, args: SearchPlantsArgs) -> Result<()> {
        let plants = self.garden.list_plants_with_keyword(&args.prefix).await?;
        self.renderer.render(&Plants(plants).to_string())
    }

    async fn show_plant(&self, args: ShowPlantArgs) -> Result<()> {
        let plant = self
            .garden
            .get_plant(&args.id)
            .await?
            .ok_or_else(|| GardenError::PlantNotFound { id: args.id.clone() })?;
        let planted = self.garden.is_planted(&plant.id).await?;

        let mut output = plant.to_string();
        output.push('\n');
        output.push_str(if planted {
            "In your garden.\n"
        } else {
            "Not in your garden.\n"
        });
        self.renderer.render(&output)
    }

    async fn list_garden(&self) -> Result<()> {
        let gardens = self.garden.planted_gardens().await?;
        self.renderer.render(&Gardens(gardens).to_string())
    }

    async fn add_planting(&self, args: AddPlantingArgs) -> Result<()> {
        let planting = self.garden.create_garden_planting(&args.plant_id).await?;
        self.renderer
            .render(&CreateResult::new(planting).to_string())
    }

    async fn remove_planting(&self, args: PlantingIdArgs) -> Result<()> {
        let planting = self
            .garden
            .get_garden_planting(args.id)
            .await?
            .ok_or(GardenError::PlantingNotFound { id: args.id })?;
        self.garden.remove_garden_planting(args.id).await?;
        self.renderer
            .render(&DeleteResult::new(planting).to_string())
    }

    async fn water_planting(&self, args: PlantingIdArgs) -> Result<()> {
        let planting = self.garden.touch_watering(args.id, Timestamp::now()).await?;
        self.renderer
            .render(&WateredResult::new(planting).to_string())
    }

    async fn list_due(&self) -> Result<()> {
        let due = self.garden.plantings_needing_water(Timestamp::now()).await?;
        if due.is_empty() {
            return self.renderer.render("Nothing needs water.\n");
        }
        self.renderer
            .render(&format!("# Needs water\n\n{}", Plantings(due)))
    }

    async fn watch_garden(&self) -> Result<()> {
        let mut gardens = self.garden.watch_planted_gardens();
        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    debug!("Stopping garden watch");
                    return Ok(());
                }
                item = gardens.next() => match item {
                    Some(result) => {
                        self.renderer.render(&Gardens(result?).to_string())?;
                        self.renderer.render("\n---\n\n")?;
                    }
                    None => return Ok(()),
                },
            }
        }
    }

    async fn filter(&self) -> Result<PlantListFilter> {
        PlantListFilter::restore(self.garden.clone(), Arc::new(self.garden.state_bag()))
            .await
            .context("Failed to load saved filter")
    }

    async fn render_filter(&self, filter: &PlantListFilter) -> Result<()> {
        let zone = if filter.is_filtered() {
            filter.grow_zone().to_string()
        } else {
            "none".to_string()
        };
        let keyword = filter.keyword();
        let keyword = if keyword.is_empty() { "none" } else { keyword.as_str() };
        let plants = first(filter.plants()).await?;

        self.renderer.render(&format!(
            "# Filter\n\n- Grow zone: {zone}\n- Keyword: {keyword}\n\n{}",
            Plants(plants)
        ))
    }
}

/// Takes the initial result of a live query.
async fn first<T>(mut subscription: Subscription<T>) -> Result<T> {
    let result = subscription
        .next()
        .await
        .context("Live query ended before producing a result")?;
    Ok(result?)
}
