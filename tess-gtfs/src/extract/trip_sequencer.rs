use crate::extract::extract_error::ExtractError;
use crate::extract::feed_archive::FeedArchive;
use crate::extract::feed_row::StopTimeRow;
use crate::extract::route_catalog::RouteCatalog;
use crate::extract::stop_registry::StopRegistry;
use crate::extract::time_ops::parse_feed_time;
use std::collections::HashMap;
use std::io::{Read, Seek};

/// one stop visit within a trip. transient: visits exist only while edges are
/// being extracted and are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub stop_id: String,
    pub sequence: u32,
    /// arrival at this stop in seconds since midnight, if given.
    pub arrival: Option<u32>,
    /// departure from this stop in seconds since midnight, if given.
    pub departure: Option<u32>,
}

/// per-region grouping of stop_times rows into ordered per-trip visit lists.
#[derive(Debug, Default)]
pub struct TripSequencer {
    visits: HashMap<String, Vec<Visit>>,
    /// stop_times rows observed in the table.
    pub seen: usize,
    /// rows kept: accepted trip, in-region stop, parsable sequence.
    pub kept: usize,
}

impl TripSequencer {
    /// streams stop_times, keeping rows whose trip is in the catalog, whose
    /// stop is in this region's registry, and whose sequence number parses.
    /// each trip's visit list is stably sorted ascending by sequence once
    /// streaming completes.
    pub fn build<R: Read + Seek>(
        archive: &mut FeedArchive<R>,
        catalog: &RouteCatalog,
        stops: &StopRegistry,
    ) -> Result<TripSequencer, ExtractError> {
        let mut sequencer = TripSequencer::default();
        archive.stream::<StopTimeRow, _>("stop_times.txt", |row| {
            sequencer.seen += 1;
            let Some(trip_id) = row.trip_id.filter(|id| !id.is_empty()) else {
                return;
            };
            if !catalog.trips.contains_key(&trip_id) {
                return;
            }
            let Some(stop_id) = row.stop_id.filter(|id| stops.contains(id)) else {
                return;
            };
            let Some(sequence) = row.stop_sequence.and_then(|s| s.trim().parse().ok()) else {
                return;
            };
            let visit = Visit {
                stop_id,
                sequence,
                arrival: row.arrival_time.as_deref().and_then(parse_feed_time),
                departure: row.departure_time.as_deref().and_then(parse_feed_time),
            };
            sequencer.visits.entry(trip_id).or_default().push(visit);
            sequencer.kept += 1;
        })?;

        for list in sequencer.visits.values_mut() {
            list.sort_by_key(|visit| visit.sequence);
        }
        Ok(sequencer)
    }

    /// the grouped trips and their ordered visit lists. trips with a single
    /// visit are included here but yield no consecutive pairs.
    pub fn trips(&self) -> impl Iterator<Item = (&String, &Vec<Visit>)> {
        self.visits.iter()
    }

    pub fn trip_count(&self) -> usize {
        self.visits.len()
    }
}
