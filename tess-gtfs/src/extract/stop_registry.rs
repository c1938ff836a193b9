use crate::extract::extract_error::ExtractError;
use crate::extract::feed_archive::FeedArchive;
use crate::extract::feed_row::StopRow;
use crate::extract::region_geometry::{any_contains, RegionGeometry};
use std::collections::HashMap;
use std::io::{Read, Seek};

/// a stop inside the region boundary. immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// the in-region stop set for one region, with drop diagnostics.
#[derive(Debug, Default)]
pub struct StopRegistry {
    stops: HashMap<String, Stop>,
    /// stop rows observed in the table.
    pub seen: usize,
    /// distinct stops kept after id, coordinate and region checks; a
    /// duplicate id row overwrites its earlier entry without recounting.
    pub kept: usize,
}

impl StopRegistry {
    /// streams the stops table, keeping rows with a non-empty id, numeric
    /// coordinates, and a location inside the union of `geometries`. bad rows
    /// are dropped silently; only the seen/kept counters record them.
    pub fn build<R: Read + Seek>(
        archive: &mut FeedArchive<R>,
        geometries: &[&RegionGeometry],
    ) -> Result<StopRegistry, ExtractError> {
        let mut registry = StopRegistry::default();
        archive.stream::<StopRow, _>("stops.txt", |row| {
            registry.seen += 1;
            let Some(id) = row.stop_id.filter(|id| !id.is_empty()) else {
                return;
            };
            let Some(lat) = parse_coordinate(row.stop_lat.as_deref()) else {
                return;
            };
            let Some(lon) = parse_coordinate(row.stop_lon.as_deref()) else {
                return;
            };
            if !any_contains(geometries, lon, lat) {
                return;
            }
            let previous = registry.stops.insert(
                id.clone(),
                Stop {
                    id,
                    name: row.stop_name.unwrap_or_default(),
                    lat,
                    lon,
                },
            );
            if previous.is_none() {
                registry.kept += 1;
            }
        })?;
        Ok(registry)
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.stops.contains_key(stop_id)
    }

    pub fn get(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.get(stop_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    let parsed: f64 = value?.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}
