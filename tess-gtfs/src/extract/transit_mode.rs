pub const UNKNOWN_MODE: &str = "unknown";

/// inclusive route_type code ranges mapped to mode labels, covering both the
/// standard codes and the extended route type ranges.
/// see [https://gtfs.org/documentation/schedule/reference/#routestxt] and
/// [https://developers.google.com/transit/gtfs/reference/extended-route-types].
const MODE_TABLE: &[(u32, u32, &str)] = &[
    (0, 0, "tram"),
    (1, 1, "metro"),
    (2, 2, "rail"),
    (3, 3, "bus"),
    (4, 4, "water"),
    (5, 5, "cablecar"),
    (6, 6, "gondola"),
    (7, 7, "funicular"),
    (11, 11, "bus"),
    (12, 12, "rail"),
    (100, 117, "rail"),
    (200, 209, "coach service"),
    (400, 405, "metro"),
    (700, 716, "bus"),
    (800, 800, "trolleybus"),
    (900, 906, "tram"),
    (1000, 1000, "water"),
    (1100, 1100, "air"),
    (1200, 1200, "water"),
    (1300, 1307, "aerial lift"),
    (1400, 1400, "funicular service"),
    (1500, 1507, "taxi"),
    (1700, 1700, "miscellaneous service"),
    (1702, 1702, "horse-drawn carriage"),
];

/// resolves a route_type code to its mode label. codes outside the table, and
/// routes whose code failed to parse, are "unknown".
pub fn mode_for_route_type(route_type: Option<u32>) -> &'static str {
    let Some(code) = route_type else {
        return UNKNOWN_MODE;
    };
    MODE_TABLE
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&code))
        .map(|(_, _, mode)| *mode)
        .unwrap_or(UNKNOWN_MODE)
}
