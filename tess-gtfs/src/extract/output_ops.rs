use crate::extract::extract_error::ExtractError;
use crate::extract::graph_ops::RegionGraph;
use crate::extract::graph_record::{EdgeRecord, NodeRecord};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// separator used when flattening a node's mode list into one CSV field.
const MODE_LIST_SEPARATOR: &str = "|";

/// writes a region graph as `nodes_<LABEL>.csv`, `edges_<LABEL>.csv` and a
/// nested `graph_<LABEL>.json` document under `out_dir`.
pub fn write_region(out_dir: &Path, graph: &RegionGraph) -> Result<(), ExtractError> {
    std::fs::create_dir_all(out_dir)?;

    let nodes_path = out_dir.join(format!("nodes_{}.csv", graph.label));
    write_csv(&nodes_path, graph.nodes.iter().map(CsvNodeRow::from))?;

    let edges_path = out_dir.join(format!("edges_{}.csv", graph.label));
    write_csv(&edges_path, graph.edges.iter().map(CsvEdgeRow::from))?;

    let json_path = out_dir.join(format!("graph_{}.json", graph.label));
    write_json(&json_path, graph)?;

    log::info!(
        "[{}] wrote {} nodes, {} edges to {:?}",
        graph.label,
        graph.nodes.len(),
        graph.edges.len(),
        out_dir
    );
    Ok(())
}

fn write_csv<T: Serialize>(
    path: &Path,
    rows: impl Iterator<Item = T>,
) -> Result<(), ExtractError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, graph: &RegionGraph) -> Result<(), ExtractError> {
    let file = File::create(path)?;
    let document = GraphDocument {
        nodes: &graph.nodes,
        edges: &graph.edges,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &document)
        .map_err(|e| ExtractError::OutputWriteError(format!("{path:?}: {e}")))?;
    Ok(())
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    nodes: &'a [NodeRecord],
    edges: &'a [EdgeRecord],
}

/// flat tabular form of a node; the mode list is joined into one field.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvNodeRow<'a> {
    id: &'a str,
    stop_place_id: &'a str,
    name: &'a str,
    lat: f64,
    lon: f64,
    modes: String,
    stop_type: &'a str,
}

impl<'a> From<&'a NodeRecord> for CsvNodeRow<'a> {
    fn from(node: &'a NodeRecord) -> CsvNodeRow<'a> {
        CsvNodeRow {
            id: &node.id,
            stop_place_id: &node.stop_place_id,
            name: &node.name,
            lat: node.lat,
            lon: node.lon,
            modes: node.modes.join(MODE_LIST_SEPARATOR),
            stop_type: &node.stop_type,
        }
    }
}

/// flat tabular form of an edge; optional fields become empty cells.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvEdgeRow<'a> {
    from: &'a str,
    to: &'a str,
    line_id: &'a str,
    line_code: &'a str,
    mode: &'a str,
    authority: &'a str,
    travel_time_sec: Option<u32>,
    trips_in_feed: u32,
}

impl<'a> From<&'a EdgeRecord> for CsvEdgeRow<'a> {
    fn from(edge: &'a EdgeRecord) -> CsvEdgeRow<'a> {
        CsvEdgeRow {
            from: &edge.from,
            to: &edge.to,
            line_id: &edge.line_id,
            line_code: &edge.line_code,
            mode: &edge.mode,
            authority: edge.authority.as_deref().unwrap_or_default(),
            travel_time_sec: edge.travel_time_sec,
            trips_in_feed: edge.trips_in_feed,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_graph() -> RegionGraph {
        RegionGraph {
            label: "TEST".to_string(),
            nodes: vec![NodeRecord {
                id: "S1".to_string(),
                stop_place_id: "S1".to_string(),
                name: "First".to_string(),
                lat: 59.9,
                lon: 10.7,
                modes: vec!["bus".to_string(), "tram".to_string()],
                stop_type: "multimodal".to_string(),
            }],
            edges: vec![EdgeRecord {
                from: "S1".to_string(),
                to: "S2".to_string(),
                line_id: "R1".to_string(),
                line_code: "B1".to_string(),
                mode: "bus".to_string(),
                authority: None,
                travel_time_sec: None,
                trips_in_feed: 2,
            }],
        }
    }

    #[test]
    fn test_writes_all_three_outputs() {
        let dir = std::env::temp_dir().join(format!("tess_gtfs_out_{}", std::process::id()));
        write_region(&dir, &sample_graph()).expect("outputs should write");

        let nodes = std::fs::read_to_string(dir.join("nodes_TEST.csv")).expect("nodes csv");
        assert!(nodes.starts_with("id,stopPlaceId,name,lat,lon,modes,stopType"));
        assert!(nodes.contains("bus|tram"));

        let edges = std::fs::read_to_string(dir.join("edges_TEST.csv")).expect("edges csv");
        assert!(edges
            .starts_with("from,to,lineId,lineCode,mode,authority,travelTimeSec,tripsInFeed"));
        // absent authority and travel time flatten to empty cells
        assert!(edges.contains("S1,S2,R1,B1,bus,,,2"));

        let json = std::fs::read_to_string(dir.join("graph_TEST.json")).expect("graph json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed["nodes"][0]["stopPlaceId"], "S1");
        assert_eq!(parsed["edges"][0]["tripsInFeed"], 2);
        // optional fields are omitted, not null
        assert!(parsed["edges"][0].get("travelTimeSec").is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
