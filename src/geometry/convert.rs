use crate::domain::{LatLng, PolygonRecord, Ring};
use geo::{Coord, LineString, MultiPolygon, Polygon};

/// Convert a record into the engine's input shape, one polygon per ring.
/// Longitude maps to `x` and latitude to `y`.
pub fn record_to_multi_polygon(record: &PolygonRecord) -> MultiPolygon<f64> {
    record
        .rings
        .iter()
        .map(|ring| Polygon::new(ring_to_line_string(ring), Vec::new()))
        .collect()
}

fn ring_to_line_string(ring: &[LatLng]) -> LineString<f64> {
    ring.iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect()
}

/// Outer rings of an engine result, plus the number of interior rings that
/// were dropped along the way
pub fn multi_polygon_to_rings(shape: &MultiPolygon<f64>) -> (Vec<Ring>, usize) {
    let mut holes = 0;
    let rings = shape
        .iter()
        .map(|polygon| {
            holes += polygon.interiors().len();
            polygon
                .exterior()
                .coords()
                .map(|c| LatLng::new(c.y, c.x))
                .collect()
        })
        .collect();
    (rings, holes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_record_axes() {
        let record = PolygonRecord::new(vec![
            LatLng::new(50.0, 10.0),
            LatLng::new(50.0, 11.0),
            LatLng::new(51.0, 11.0),
            LatLng::new(50.0, 10.0),
        ]);

        let shape = record_to_multi_polygon(&record);
        assert_eq!(shape.0.len(), 1);
        let first = shape.0[0].exterior().0[1];
        assert_eq!(first, Coord { x: 11.0, y: 50.0 });
    }

    #[test]
    fn test_rings_drop_holes() {
        let with_hole = polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 4.0, y: 0.0),
                (x: 4.0, y: 4.0),
                (x: 0.0, y: 4.0),
            ],
            interiors: [[
                (x: 1.0, y: 1.0),
                (x: 2.0, y: 1.0),
                (x: 2.0, y: 2.0),
            ]],
        );

        let (rings, holes) = multi_polygon_to_rings(&MultiPolygon(vec![with_hole]));
        assert_eq!(rings.len(), 1);
        assert_eq!(holes, 1);
        // geo closes the exterior ring
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(rings[0][1], LatLng::new(0.0, 4.0));
    }
}
