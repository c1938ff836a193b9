use crate::extract::extract_error::ExtractError;
use crate::extract::feed_archive::FeedArchive;
use crate::extract::feed_row::{AgencyRow, RouteRow, TripRow};
use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek};

/// a route surviving agency filtering, shared read-only across regions.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: String,
    pub agency_id: String,
    /// numeric route_type code, `None` when absent or unparsable.
    pub route_type: Option<u32>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

impl Route {
    /// display code for the line: the short name, falling back to the long name.
    pub fn line_code(&self) -> String {
        non_empty(self.short_name.as_deref())
            .or_else(|| non_empty(self.long_name.as_deref()))
            .unwrap_or_default()
            .to_string()
    }
}

/// agency, route and trip lookup tables, built once per feed and shared by
/// every region pipeline.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    pub agency_names: HashMap<String, String>,
    pub routes: HashMap<String, Route>,
    /// trip id -> route id, restricted to trips whose route survived.
    pub trips: HashMap<String, String>,
}

impl RouteCatalog {
    /// builds the catalog from the agency, routes and trips tables.
    ///
    /// agencies missing an id are keyed by name instead. when `agency_allow`
    /// is given, only agencies whose name matches an entry (case-insensitive
    /// substring) are accepted; routes of unaccepted agencies and trips of
    /// dropped routes are excluded.
    pub fn build<R: Read + Seek>(
        archive: &mut FeedArchive<R>,
        agency_allow: Option<&[String]>,
    ) -> Result<RouteCatalog, ExtractError> {
        let mut agency_names: HashMap<String, String> = HashMap::new();
        let mut accepted: HashSet<String> = HashSet::new();
        archive.stream::<AgencyRow, _>("agency.txt", |row| {
            let id = match non_empty(row.agency_id.as_deref())
                .or_else(|| non_empty(row.agency_name.as_deref()))
            {
                Some(id) => id.to_string(),
                None => return,
            };
            let name = non_empty(row.agency_name.as_deref())
                .unwrap_or(id.as_str())
                .to_string();
            let allowed = match agency_allow {
                None => true,
                Some(patterns) => patterns
                    .iter()
                    .any(|p| name.to_lowercase().contains(&p.to_lowercase())),
            };
            agency_names.insert(id.clone(), name);
            if allowed {
                accepted.insert(id);
            }
        })?;

        let mut routes: HashMap<String, Route> = HashMap::new();
        archive.stream::<RouteRow, _>("routes.txt", |row| {
            let Some(id) = non_empty(row.route_id.as_deref()) else {
                return;
            };
            let agency_id = row.agency_id.unwrap_or_default();
            if !accepted.is_empty() && !accepted.contains(&agency_id) {
                return;
            }
            routes.insert(
                id.to_string(),
                Route {
                    id: id.to_string(),
                    agency_id,
                    route_type: row.route_type.and_then(|rt| rt.trim().parse().ok()),
                    short_name: row.route_short_name,
                    long_name: row.route_long_name,
                },
            );
        })?;

        let mut trips: HashMap<String, String> = HashMap::new();
        archive.stream::<TripRow, _>("trips.txt", |row| {
            let (Some(trip_id), Some(route_id)) = (
                non_empty(row.trip_id.as_deref()),
                non_empty(row.route_id.as_deref()),
            ) else {
                return;
            };
            if routes.contains_key(route_id) {
                trips.insert(trip_id.to_string(), route_id.to_string());
            }
        })?;

        log::info!("catalog: routes={} trips={}", routes.len(), trips.len());
        Ok(RouteCatalog {
            agency_names,
            routes,
            trips,
        })
    }

    /// resolves a trip to its surviving route, if any.
    pub fn route_for_trip(&self, trip_id: &str) -> Option<&Route> {
        self.trips.get(trip_id).and_then(|rid| self.routes.get(rid))
    }

    pub fn authority_for_route(&self, route: &Route) -> Option<&str> {
        self.agency_names
            .get(&route.agency_id)
            .map(String::as_str)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extract::feed_archive::test::zip_fixture;

    const AGENCY: &str = "agency_id,agency_name\nA1,Metro Operator\nA2,Harbor Ferries\n";
    const ROUTES: &str = "route_id,agency_id,route_type,route_short_name,route_long_name\n\
        R1,A1,1,M1,Metro Line One\n\
        R2,A2,4,,Harbor Crossing\n\
        R3,A9,3,B9,Ghost Agency Bus\n";
    const TRIPS: &str = "trip_id,route_id\nT1,R1\nT2,R2\nT3,R404\n";

    #[test]
    fn test_routes_filtered_to_known_agencies() {
        let mut archive = zip_fixture(&[
            ("agency.txt", AGENCY),
            ("routes.txt", ROUTES),
            ("trips.txt", TRIPS),
        ]);
        let catalog = RouteCatalog::build(&mut archive, None).expect("catalog should build");
        assert_eq!(catalog.routes.len(), 2);
        assert!(catalog.routes.contains_key("R1"));
        assert!(!catalog.routes.contains_key("R3"));
    }

    #[test]
    fn test_trips_filtered_to_surviving_routes() {
        let mut archive = zip_fixture(&[
            ("agency.txt", AGENCY),
            ("routes.txt", ROUTES),
            ("trips.txt", TRIPS),
        ]);
        let catalog = RouteCatalog::build(&mut archive, None).expect("catalog should build");
        assert_eq!(catalog.trips.len(), 2);
        assert_eq!(catalog.trips.get("T1"), Some(&"R1".to_string()));
        assert!(!catalog.trips.contains_key("T3"));
    }

    #[test]
    fn test_agency_allow_list_matches_by_name() {
        let mut archive = zip_fixture(&[
            ("agency.txt", AGENCY),
            ("routes.txt", ROUTES),
            ("trips.txt", TRIPS),
        ]);
        let allow = vec!["ferries".to_string()];
        let catalog =
            RouteCatalog::build(&mut archive, Some(&allow)).expect("catalog should build");
        assert_eq!(catalog.routes.len(), 1);
        assert!(catalog.routes.contains_key("R2"));
    }

    #[test]
    fn test_line_code_falls_back_to_long_name() {
        let mut archive = zip_fixture(&[
            ("agency.txt", AGENCY),
            ("routes.txt", ROUTES),
            ("trips.txt", TRIPS),
        ]);
        let catalog = RouteCatalog::build(&mut archive, None).expect("catalog should build");
        let r2 = catalog.routes.get("R2").expect("R2 should survive");
        assert_eq!(r2.line_code(), "Harbor Crossing");
        let r1 = catalog.routes.get("R1").expect("R1 should survive");
        assert_eq!(r1.line_code(), "M1");
    }

    #[test]
    fn test_authority_resolution() {
        let mut archive = zip_fixture(&[
            ("agency.txt", AGENCY),
            ("routes.txt", ROUTES),
            ("trips.txt", TRIPS),
        ]);
        let catalog = RouteCatalog::build(&mut archive, None).expect("catalog should build");
        let r1 = catalog.routes.get("R1").expect("R1 should survive");
        assert_eq!(catalog.authority_for_route(r1), Some("Metro Operator"));
    }
}
