use crate::extract::extract_error::ExtractError;

/// a closed ring of (longitude, latitude) coordinates.
pub type Ring = Vec<(f64, f64)>;

/// region boundary geometry used to clip stops. rings are stored in GeoJSON
/// order: for each polygon unit, the outer ring first, then its holes.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl RegionGeometry {
    /// even-odd containment test against this geometry.
    ///
    /// a polygon contains the point iff it is inside the outer ring and inside
    /// none of that polygon's holes. a multipolygon contains the point iff any
    /// constituent polygon, evaluated against its own holes only, contains it.
    ///
    /// points exactly on a ring edge get whatever the ray cast decides; that
    /// boundary behavior is not a contract of this type.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        match self {
            RegionGeometry::Polygon(rings) => polygon_contains(lon, lat, rings),
            RegionGeometry::MultiPolygon(polygons) => polygons
                .iter()
                .any(|rings| polygon_contains(lon, lat, rings)),
        }
    }

    /// converts a parsed GeoJSON geometry, rejecting any declared type other
    /// than Polygon or MultiPolygon as a structural error for `region`.
    pub fn from_geojson(
        geometry: &geojson::Geometry,
        region: &str,
    ) -> Result<RegionGeometry, ExtractError> {
        match &geometry.value {
            geojson::Value::Polygon(rings) => {
                Ok(RegionGeometry::Polygon(convert_rings(rings, region)?))
            }
            geojson::Value::MultiPolygon(polygons) => {
                let converted = polygons
                    .iter()
                    .map(|rings| convert_rings(rings, region))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RegionGeometry::MultiPolygon(converted))
            }
            other => Err(ExtractError::UnsupportedGeometryTypeError {
                region: region.to_string(),
                found: geometry_type_name(other).to_string(),
            }),
        }
    }
}

/// true iff the point is contained by at least one geometry in the union.
pub fn any_contains(geometries: &[&RegionGeometry], lon: f64, lat: f64) -> bool {
    geometries.iter().any(|g| g.contains(lon, lat))
}

fn polygon_contains(lon: f64, lat: f64, rings: &[Ring]) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    if !point_in_ring(lon, lat, outer) {
        return false;
    }
    !holes.iter().any(|hole| point_in_ring(lon, lat, hole))
}

/// even-odd ray cast, counting edge crossings of a horizontal ray at `lat`.
fn point_in_ring(lon: f64, lat: f64, ring: &Ring) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (x_i, y_i) = ring[i];
        let (x_j, y_j) = ring[j];
        let crosses =
            (y_i > lat) != (y_j > lat) && lon < (x_j - x_i) * (lat - y_i) / (y_j - y_i) + x_i;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn convert_rings(rings: &[Vec<Vec<f64>>], region: &str) -> Result<Vec<Ring>, ExtractError> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| match (position.first(), position.get(1)) {
                    (Some(lon), Some(lat)) => Ok((*lon, *lat)),
                    _ => Err(ExtractError::GeometryParseError {
                        region: region.to_string(),
                        msg: format!("position with {} coordinates", position.len()),
                    }),
                })
                .collect::<Result<Ring, _>>()
        })
        .collect()
}

fn geometry_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![(min, min), (max, min), (max, max), (min, max), (min, min)]
    }

    #[test]
    fn test_point_inside_outer_ring() {
        let geom = RegionGeometry::Polygon(vec![square(0.0, 10.0)]);
        assert!(geom.contains(5.0, 5.0));
        assert!(!geom.contains(11.0, 5.0));
    }

    #[test]
    fn test_point_inside_hole_is_outside() {
        let geom = RegionGeometry::Polygon(vec![square(0.0, 10.0), square(4.0, 6.0)]);
        assert!(!geom.contains(5.0, 5.0));
        // still inside between the hole and the outer ring
        assert!(geom.contains(2.0, 2.0));
    }

    #[test]
    fn test_multipolygon_holes_are_per_constituent() {
        // first unit has a hole over (4..6); second unit covers the same area
        // without one, so the point counts as inside overall.
        let geom = RegionGeometry::MultiPolygon(vec![
            vec![square(0.0, 10.0), square(4.0, 6.0)],
            vec![square(3.0, 7.0)],
        ]);
        assert!(geom.contains(5.0, 5.0));
        assert!(geom.contains(1.0, 1.0));
        assert!(!geom.contains(20.0, 20.0));
    }

    #[test]
    fn test_union_membership() {
        let a = RegionGeometry::Polygon(vec![square(0.0, 1.0)]);
        let b = RegionGeometry::Polygon(vec![square(5.0, 6.0)]);
        assert!(any_contains(&[&a, &b], 5.5, 5.5));
        assert!(any_contains(&[&a, &b], 0.5, 0.5));
        assert!(!any_contains(&[&a, &b], 3.0, 3.0));
    }

    #[test]
    fn test_rejects_unsupported_geometry_type() {
        let geometry = geojson::Geometry::new(geojson::Value::Point(vec![10.0, 60.0]));
        let result = RegionGeometry::from_geojson(&geometry, "03");
        assert!(matches!(
            result,
            Err(ExtractError::UnsupportedGeometryTypeError { .. })
        ));
    }

    #[test]
    fn test_accepts_polygon_geojson() {
        let ring = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 10.0],
            vec![0.0, 0.0],
        ];
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![ring]));
        let region = RegionGeometry::from_geojson(&geometry, "03").expect("should parse");
        assert!(region.contains(5.0, 5.0));
    }
}
