use crate::domain::{LatLng, PolygonRecord};
use serde::Serialize;

/// Arithmetic mean of every vertex of every ring
///
/// Returns `None` when there are no vertices to average.
pub fn centroid(records: &[PolygonRecord]) -> Option<LatLng> {
    let mut count = 0usize;
    let mut lat_sum = 0.0;
    let mut lng_sum = 0.0;

    for vertex in records.iter().flat_map(PolygonRecord::vertices) {
        lat_sum += vertex.lat;
        lng_sum += vertex.lng;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(LatLng::new(lat_sum / n, lng_sum / n))
}

/// Bounding box in lat/lng, used to fit the map to the loaded polygons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Create bounds from every vertex of the given records
    pub fn from_records(records: &[PolygonRecord]) -> Option<Self> {
        let mut vertices = records.iter().flat_map(PolygonRecord::vertices);
        let first = vertices.next()?;

        let mut bounds = Self {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for vertex in vertices {
            bounds.expand(vertex);
        }

        Some(bounds)
    }

    fn expand(&mut self, p: &LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }
}
