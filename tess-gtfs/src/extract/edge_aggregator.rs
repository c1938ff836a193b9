use crate::extract::route_catalog::Route;
use crate::extract::transit_mode::mode_for_route_type;
use crate::extract::trip_sequencer::Visit;
use std::collections::HashMap;

/// order-sensitive composite key of a directed stop-to-stop edge on one line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub from: String,
    pub to: String,
    pub line_id: String,
}

/// accumulating state for one edge key: every observed traversal increments
/// the counter, and traversals with a determinable duration also contribute a
/// sample. finalized once all trips for the region are processed.
#[derive(Debug, Clone)]
pub struct EdgeAccumulator {
    pub line_code: String,
    pub mode: &'static str,
    pub authority: Option<String>,
    pub durations: Vec<u32>,
    pub traversals: u32,
}

/// accumulates duration samples and traversal counts per (from, to, line).
#[derive(Debug, Default)]
pub struct EdgeAggregator {
    edges: HashMap<EdgeKey, EdgeAccumulator>,
}

impl EdgeAggregator {
    pub fn new() -> EdgeAggregator {
        EdgeAggregator::default()
    }

    /// folds one trip's ordered visits into the edge map. for each consecutive
    /// pair (a, b): tA is a's departure falling back to its arrival, tB is b's
    /// arrival falling back to its departure; the pair yields a duration
    /// sample of tB - tA only when both are present and tB >= tA. a zero
    /// duration is a valid sample.
    pub fn add_trip(&mut self, visits: &[Visit], route: &Route, authority: Option<&str>) {
        for pair in visits.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let key = EdgeKey {
                from: a.stop_id.clone(),
                to: b.stop_id.clone(),
                line_id: route.id.clone(),
            };
            let t_a = a.departure.or(a.arrival);
            let t_b = b.arrival.or(b.departure);
            let duration = match (t_a, t_b) {
                (Some(ta), Some(tb)) if tb >= ta => Some(tb - ta),
                _ => None,
            };
            let edge = self.edges.entry(key).or_insert_with(|| EdgeAccumulator {
                line_code: route.line_code(),
                mode: mode_for_route_type(route.route_type),
                authority: authority.map(String::from),
                durations: vec![],
                traversals: 0,
            });
            if let Some(duration) = duration {
                edge.durations.push(duration);
            }
            edge.traversals += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_edges(self) -> HashMap<EdgeKey, EdgeAccumulator> {
        self.edges
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bus_route(id: &str) -> Route {
        Route {
            id: id.to_string(),
            agency_id: "A1".to_string(),
            route_type: Some(3),
            short_name: Some("B1".to_string()),
            long_name: None,
        }
    }

    fn visit(stop: &str, seq: u32, arrival: Option<u32>, departure: Option<u32>) -> Visit {
        Visit {
            stop_id: stop.to_string(),
            sequence: seq,
            arrival,
            departure,
        }
    }

    #[test]
    fn test_three_stop_trip_yields_two_edges() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        let visits = vec![
            visit("S1", 1, None, Some(28800)),
            visit("S2", 2, Some(28860), None),
            visit("S3", 3, Some(28920), None),
        ];
        aggregator.add_trip(&visits, &route, Some("Operator"));

        let edges = aggregator.into_edges();
        assert_eq!(edges.len(), 2);
        let first = edges
            .get(&EdgeKey {
                from: "S1".to_string(),
                to: "S2".to_string(),
                line_id: "R1".to_string(),
            })
            .expect("edge S1->S2 expected");
        assert_eq!(first.durations, vec![60]);
        assert_eq!(first.traversals, 1);
        assert_eq!(first.mode, "bus");
    }

    #[test]
    fn test_same_key_accumulates_across_trips() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        aggregator.add_trip(
            &[
                visit("S1", 1, None, Some(28800)),
                visit("S2", 2, Some(28860), None),
            ],
            &route,
            None,
        );
        aggregator.add_trip(
            &[
                visit("S1", 1, None, Some(36000)),
                visit("S2", 2, Some(36080), None),
            ],
            &route,
            None,
        );

        let edges = aggregator.into_edges();
        assert_eq!(edges.len(), 1);
        let edge = edges.values().next().expect("one edge expected");
        assert_eq!(edge.durations, vec![60, 80]);
        assert_eq!(edge.traversals, 2);
    }

    #[test]
    fn test_missing_or_reversed_times_count_traversal_only() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        // no times at all on the pair
        aggregator.add_trip(
            &[visit("S1", 1, None, None), visit("S2", 2, None, None)],
            &route,
            None,
        );
        // arrival before departure, duration would be negative
        aggregator.add_trip(
            &[
                visit("S1", 1, None, Some(28860)),
                visit("S2", 2, Some(28800), None),
            ],
            &route,
            None,
        );

        let edges = aggregator.into_edges();
        let edge = edges.values().next().expect("one edge expected");
        assert!(edge.durations.is_empty());
        assert_eq!(edge.traversals, 2);
    }

    #[test]
    fn test_zero_duration_is_a_valid_sample() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        aggregator.add_trip(
            &[
                visit("S1", 1, None, Some(28800)),
                visit("S2", 2, Some(28800), None),
            ],
            &route,
            None,
        );
        let edges = aggregator.into_edges();
        let edge = edges.values().next().expect("one edge expected");
        assert_eq!(edge.durations, vec![0]);
    }

    #[test]
    fn test_single_visit_trip_yields_no_edges() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        aggregator.add_trip(&[visit("S1", 1, None, Some(28800))], &route, None);
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_directionality_of_keys() {
        let mut aggregator = EdgeAggregator::new();
        let route = bus_route("R1");
        aggregator.add_trip(
            &[
                visit("S1", 1, None, Some(100)),
                visit("S2", 2, Some(160), None),
            ],
            &route,
            None,
        );
        aggregator.add_trip(
            &[
                visit("S2", 1, None, Some(200)),
                visit("S1", 2, Some(260), None),
            ],
            &route,
            None,
        );
        assert_eq!(aggregator.len(), 2);
    }
}
