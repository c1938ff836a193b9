mod enrich_error;
mod planner_client;
mod trip_count_ops;

pub use enrich_error::EnrichError;
pub use planner_client::PlannerClient;
pub use trip_count_ops::enrich_edge_files;
