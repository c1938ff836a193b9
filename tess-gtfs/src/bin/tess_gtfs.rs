//! this tool clips a national GTFS feed to one or more configured regions and
//! rebuilds each region's stop-to-stop network graph with median travel times
//! and per-edge traversal counts.
use clap::Parser;
use tess_gtfs::extract::app::TessApp;

fn main() {
    env_logger::init();
    let args = TessApp::parse();
    args.op.run()
}
