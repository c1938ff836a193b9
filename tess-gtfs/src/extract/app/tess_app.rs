use super::TessOperation;
use clap::Parser;

/// command line tool for clipping a national GTFS feed into per-region
/// stop-to-stop network graphs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TessApp {
    #[command(subcommand)]
    pub op: TessOperation,
}
