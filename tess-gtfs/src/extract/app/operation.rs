//! command surface for the network extraction tool: the `extract` operation
//! builds per-region graphs from a configured feed, the `enrich` operation
//! appends journey-planner trip counts to previously extracted edge files.
use crate::enrich::{enrich_edge_files, PlannerClient};
use crate::extract::extract_config::ExtractConfig;
use crate::extract::extract_ops;
use chrono::NaiveDate;
use clap::{value_parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PLANNER_ENDPOINT: &str = "https://api.entur.io/journey-planner/v3/graphql";
pub const DEFAULT_CLIENT_NAME: &str = "tess-oslo-network-analysis/1.0";

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TessOperation {
    /// build region-clipped network graphs from a GTFS feed
    Extract {
        /// TOML configuration file describing the feed, geometry source and regions
        #[arg(long)]
        config_file: String,
    },
    /// append per-line journey-planner trip counts to extracted edge files
    Enrich {
        /// edges CSV files produced by the extract operation
        #[arg(long, required = true, num_args = 1..)]
        edges_file: Vec<PathBuf>,
        /// service date to count journeys for
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        date: NaiveDate,
        /// journey planner GraphQL endpoint
        #[arg(long, default_value_t = String::from(DEFAULT_PLANNER_ENDPOINT))]
        endpoint: String,
        /// client name header sent with planner requests
        #[arg(long, default_value_t = String::from(DEFAULT_CLIENT_NAME))]
        client_name: String,
    },
}

impl TessOperation {
    pub fn run(&self) {
        match self {
            TessOperation::Extract { config_file } => {
                let result = ExtractConfig::from_file(config_file)
                    .and_then(|config| extract_ops::run_extraction(&config));
                if let Err(e) = result {
                    log::error!("extraction failed: {e}");
                    std::process::exit(1);
                }
            }
            TessOperation::Enrich {
                edges_file,
                date,
                endpoint,
                client_name,
            } => {
                let client = PlannerClient::new(endpoint, client_name);
                if let Err(e) = enrich_edge_files(edges_file, &client, *date) {
                    log::error!("enrichment failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
