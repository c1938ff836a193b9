use serde::{Deserialize, Serialize};

/// a stop that survived as an endpoint of at least one edge. `modes` is the
/// union of the modes of its incident edges, sorted for reproducible output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub stop_place_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub modes: Vec<String>,
    /// the sole mode, "multimodal" for more than one, "unknown" for none.
    pub stop_type: String,
}

/// a finalized directed edge of the region graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub line_id: String,
    pub line_code: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    /// median of the observed duration samples; absent when no traversal
    /// yielded a usable duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_sec: Option<u32>,
    /// traversal count across all trips, independent of usable durations.
    pub trips_in_feed: u32,
}
