use serde::Deserialize;

// raw rows as they appear in the feed tables. every field is optional so a
// malformed row becomes a per-row drop decision downstream instead of a
// failed decode; unknown columns are ignored by serde.

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AgencyRow {
    pub agency_id: Option<String>,
    pub agency_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RouteRow {
    pub route_id: Option<String>,
    pub agency_id: Option<String>,
    pub route_type: Option<String>,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TripRow {
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StopRow {
    pub stop_id: Option<String>,
    pub stop_name: Option<String>,
    pub stop_lat: Option<String>,
    pub stop_lon: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StopTimeRow {
    pub trip_id: Option<String>,
    pub stop_id: Option<String>,
    pub stop_sequence: Option<String>,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}
