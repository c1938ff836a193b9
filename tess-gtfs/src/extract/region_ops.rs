use crate::extract::edge_aggregator::EdgeAggregator;
use crate::extract::extract_error::ExtractError;
use crate::extract::feed_archive::FeedArchive;
use crate::extract::graph_ops::{self, RegionGraph};
use crate::extract::region_geometry::RegionGeometry;
use crate::extract::route_catalog::RouteCatalog;
use crate::extract::stop_registry::StopRegistry;
use crate::extract::trip_sequencer::TripSequencer;
use std::io::{Read, Seek};

/// runs the full pipeline for one region: clip stops to the geometry union,
/// sequence the region's stop visits per trip, aggregate edges, classify
/// nodes. shares nothing with other regions beyond the read-only catalog.
pub fn build_region<R: Read + Seek>(
    archive: &mut FeedArchive<R>,
    catalog: &RouteCatalog,
    label: &str,
    geometries: &[&RegionGeometry],
) -> Result<RegionGraph, ExtractError> {
    log::info!("=== building region: {label} ===");

    let stops = StopRegistry::build(archive, geometries)?;
    log::info!(
        "[{label}] stops: seen={} kept={}",
        stops.seen,
        stops.kept
    );

    let sequencer = TripSequencer::build(archive, catalog, &stops)?;
    log::info!(
        "[{label}] stop_times: seen={} kept={} trips={}",
        sequencer.seen,
        sequencer.kept,
        sequencer.trip_count()
    );

    let mut aggregator = EdgeAggregator::new();
    for (trip_id, visits) in sequencer.trips() {
        let Some(route) = catalog.route_for_trip(trip_id) else {
            continue;
        };
        let authority = catalog.authority_for_route(route);
        aggregator.add_trip(visits, route, authority);
    }

    let graph = graph_ops::assemble(label, &stops, aggregator.into_edges());
    log::info!(
        "[{label}] done: nodes={} edges={}",
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}
