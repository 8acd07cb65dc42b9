use serde::Serialize;
use serde_json::{Map, Value};

/// A coordinate in rendering order: latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
    /// Third position element, carried through for write-back only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: None }
    }

    pub fn with_alt(mut self, alt: Option<f64>) -> Self {
        self.alt = alt;
        self
    }

    /// Build from a GeoJSON position, which stores longitude first
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        let [lon, lat] = position;
        Self::new(lat, lon)
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// GeoJSON position, longitude first, altitude appended when present
    pub fn to_position(self) -> Vec<f64> {
        let mut position = vec![self.lng, self.lat];
        position.extend(self.alt);
        position
    }
}

/// One closed ring. Vertices are kept exactly as loaded, including the
/// repeated closing vertex when the source had one.
pub type Ring = Vec<LatLng>;

/// A polygon on the map together with its selection flag.
///
/// Loaded records carry a single ring. A record produced by a combination
/// holds one ring per part of the combined shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    pub rings: Vec<Ring>,
    pub selected: bool,
    /// Written back as a `MultiPolygon` even with a single part
    pub multi_polygon: bool,
    /// Properties of the source feature, passed through untouched
    pub properties: Option<Map<String, Value>>,
    /// Foreign members of the source feature such as `id` or `bbox`
    pub foreign_members: Map<String, Value>,
}

impl PolygonRecord {
    pub fn new(ring: Ring) -> Self {
        Self {
            rings: vec![ring],
            selected: false,
            multi_polygon: false,
            properties: None,
            foreign_members: Map::new(),
        }
    }

    pub fn with_parts(rings: Vec<Ring>) -> Self {
        Self {
            multi_polygon: rings.len() > 1,
            rings,
            selected: false,
            properties: None,
            foreign_members: Map::new(),
        }
    }

    pub fn with_properties(mut self, properties: Option<Map<String, Value>>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_foreign_members(mut self, foreign_members: Map<String, Value>) -> Self {
        self.foreign_members = foreign_members;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &LatLng> {
        self.rings.iter().flatten()
    }

    pub fn is_multi_part(&self) -> bool {
        self.multi_polygon || self.rings.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lon_lat_swap() {
        let p = LatLng::from_lon_lat([13.4, 52.5]);
        assert_eq!(p.lat, 52.5);
        assert_eq!(p.lng, 13.4);
        assert_eq!(p.to_lon_lat(), [13.4, 52.5]);
        assert_eq!(p.to_position(), vec![13.4, 52.5]);
    }

    #[test]
    fn test_position_keeps_altitude() {
        let p = LatLng::new(52.5, 13.4).with_alt(Some(34.0));
        assert_eq!(p.to_position(), vec![13.4, 52.5, 34.0]);
    }

    #[test]
    fn test_new_record_unselected() {
        let record = PolygonRecord::new(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0)]);
        assert!(!record.selected);
        assert_eq!(record.vertex_count(), 2);
        assert!(!record.is_multi_part());
    }
}
