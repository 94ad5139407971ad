#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the street cleaning case map.
//!
//! `render` loads the basemap, streets, and cases for a dataset, draws the
//! map, optionally applies legend filters, and writes the result as SVG or
//! as a standalone HTML page.

mod output;

use std::path::PathBuf;

use case_map_interaction::{AppState, FilterPolicy, InteractionController, Layout, Legend};
use case_map_source::loader::{LogErrorDisplay, load_map};
use case_map_source::registry::{DEFAULT_DATASET_ID, all_datasets, find_dataset};
use case_map_source::socrata::SocrataMapSource;
use case_map_source::soql::{case_query_url, streets_url};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "case_map", about = "Street and sidewalk cleaning case map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all layers and render the map
    Render {
        /// Output file. The format follows the extension (`.svg` or `.html`)
        #[arg(long, default_value = "map.svg")]
        output: PathBuf,
        /// Dataset identifier
        #[arg(long, default_value = DEFAULT_DATASET_ID)]
        dataset: String,
        /// Legend category to select. May be repeated; applied in order
        #[arg(long)]
        filter: Vec<String>,
        /// Show only the selected category instead of flipping the others
        #[arg(long)]
        isolate: bool,
        /// Zoom factor about the map center, clamped to 1..=8
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        /// Horizontal pan in pixels, applied after zooming
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_x: f64,
        /// Vertical pan in pixels, applied after zooming
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_y: f64,
    },
    /// Print the encoded request URLs for a dataset
    Query {
        /// Dataset identifier
        #[arg(long, default_value = DEFAULT_DATASET_ID)]
        dataset: String,
    },
    /// List the embedded datasets
    Datasets,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Datasets => {
            println!("{:<24} NAME", "ID");
            println!("{}", "-".repeat(60));
            for dataset in all_datasets() {
                println!("{:<24} {}", dataset.id, dataset.name);
            }
        }
        Commands::Query { dataset } => {
            let definition =
                find_dataset(&dataset).ok_or_else(|| format!("Unknown dataset: {dataset}"))?;
            println!("{}", streets_url(&definition.streets)?);
            println!("{}", case_query_url(&definition.cases)?);
        }
        Commands::Render {
            output,
            dataset,
            filter,
            isolate,
            zoom,
            pan_x,
            pan_y,
        } => {
            let definition =
                find_dataset(&dataset).ok_or_else(|| format!("Unknown dataset: {dataset}"))?;
            let format = OutputFormat::from_path(&output)?;
            let [width, height] = definition.viewport.size();

            let source = SocrataMapSource::new(definition.clone());
            let loaded = load_map(&source, &definition, &LogErrorDisplay).await?;
            if !loaded.failed.is_empty() {
                log::warn!(
                    "Rendering without: {}",
                    loaded
                        .failed
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            let state = AppState::build(
                &loaded.projection,
                loaded.regions,
                &loaded.streets,
                loaded.cases,
                width,
                height,
            );
            let policy = if isolate {
                FilterPolicy::Isolate
            } else {
                FilterPolicy::Flip
            };
            let mut controller = InteractionController::new(state, policy, Layout::default());
            controller.state.view.zoom_by(zoom);
            controller.state.view.pan_by(pan_x, pan_y);
            let mut legend = Legend::build(&controller.state);

            for category in &filter {
                if legend.click_category(category, &mut controller).is_none() {
                    log::warn!("No cases in category '{category}'");
                }
            }

            let document = format.render(&controller, &legend);
            tokio::fs::write(&output, document).await?;
            log::info!(
                "Wrote {} ({} markers, {} hidden)",
                output.display(),
                controller.state.cases.len(),
                controller.hidden_count()
            );
        }
    }

    Ok(())
}
