pub mod app;
mod archive_source;
mod edge_aggregator;
mod extract_config;
mod extract_error;
mod extract_ops;
mod feed_archive;
mod feed_row;
mod geometry_source;
mod graph_ops;
mod graph_record;
mod output_ops;
mod region_geometry;
mod region_ops;
mod route_catalog;
mod stop_registry;
mod time_ops;
mod transit_mode;
mod travel_time_ops;
mod trip_sequencer;

pub use archive_source::ensure_feed;
pub use edge_aggregator::{EdgeAccumulator, EdgeAggregator, EdgeKey};
pub use extract_config::{ExtractConfig, RegionConfig};
pub use extract_error::ExtractError;
pub use extract_ops::run_extraction;
pub use feed_archive::FeedArchive;
pub use geometry_source::GeometrySource;
pub use graph_ops::RegionGraph;
pub use graph_record::{EdgeRecord, NodeRecord};
pub use output_ops::write_region;
pub use region_geometry::RegionGeometry;
pub use region_ops::build_region;
pub use route_catalog::{Route, RouteCatalog};
pub use stop_registry::{Stop, StopRegistry};
pub use transit_mode::mode_for_route_type;
pub use trip_sequencer::{TripSequencer, Visit};
