use crate::extract::edge_aggregator::{EdgeAccumulator, EdgeKey};
use crate::extract::graph_record::{EdgeRecord, NodeRecord};
use crate::extract::stop_registry::StopRegistry;
use crate::extract::travel_time_ops;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

/// the assembled graph for one region. holds no state from any other
/// region's run.
#[derive(Debug, Clone)]
pub struct RegionGraph {
    pub label: String,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// finalizes the accumulated edges into records and derives the node set.
///
/// nodes are exactly the stops appearing as an endpoint of some edge; a
/// node's mode set is the union over its incident edges, never read from the
/// feed. output is sorted (edges by key, nodes by id) so identical inputs
/// produce identical collections.
pub fn assemble(
    label: &str,
    stops: &StopRegistry,
    edges: impl IntoIterator<Item = (EdgeKey, EdgeAccumulator)>,
) -> RegionGraph {
    let edge_records: Vec<EdgeRecord> = edges
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(key, acc)| EdgeRecord {
            from: key.from,
            to: key.to,
            line_id: key.line_id,
            line_code: acc.line_code,
            mode: acc.mode.to_string(),
            authority: acc.authority,
            travel_time_sec: travel_time_ops::median(&acc.durations),
            trips_in_feed: acc.traversals,
        })
        .collect();

    let mut modes_by_stop: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for edge in &edge_records {
        modes_by_stop
            .entry(edge.from.as_str())
            .or_default()
            .insert(edge.mode.as_str());
        modes_by_stop
            .entry(edge.to.as_str())
            .or_default()
            .insert(edge.mode.as_str());
    }

    let nodes = modes_by_stop
        .into_iter()
        .filter_map(|(stop_id, modes)| {
            let Some(stop) = stops.get(stop_id) else {
                // endpoints come from the registry, so this indicates an
                // upstream filtering bug; drop the node rather than panic.
                log::warn!("edge endpoint '{stop_id}' missing from stop registry");
                return None;
            };
            let modes: Vec<String> = modes.into_iter().map(String::from).collect();
            let stop_type = match modes.as_slice() {
                [] => "unknown".to_string(),
                [sole] => sole.clone(),
                _ => "multimodal".to_string(),
            };
            Some(NodeRecord {
                id: stop.id.clone(),
                stop_place_id: stop.id.clone(),
                name: stop.name.clone(),
                lat: stop.lat,
                lon: stop.lon,
                modes,
                stop_type,
            })
        })
        .collect();

    RegionGraph {
        label: label.to_string(),
        nodes,
        edges: edge_records,
    }
}
