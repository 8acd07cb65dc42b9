use crate::domain::{LatLng, PolygonRecord, Ring};
use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureCollection, Geometry, Position};

/// Convert a feature collection into polygon records
///
/// # Algorithm
/// 1. For each feature, in order, take the outer ring of each polygon part
/// 2. Swap every position from (lon, lat) to (lat, lng)
/// 3. Emit one unselected record per feature, carrying its properties,
///    foreign members and any altitude values
///
/// Interior rings are ignored, so a later write-back removes holes from
/// every feature, selected or not. A feature without a non-empty outer ring
/// fails the whole load with `MalformedGeometry`.
pub fn load_records(collection: &FeatureCollection) -> Result<Vec<PolygonRecord>> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| load_feature(index, feature))
        .collect()
}

fn load_feature(index: usize, feature: &Feature) -> Result<PolygonRecord> {
    let malformed = |reason: &'static str| Error::MalformedGeometry {
        feature_index: index,
        reason,
    };

    let (rings, multi_polygon) = match &feature.geometry {
        None => return Err(malformed("missing geometry")),
        Some(Geometry::Unsupported) => return Err(malformed("geometry is not polygonal")),
        Some(Geometry::Polygon { coordinates }) => {
            let outer = coordinates.first().ok_or(malformed("polygon has no rings"))?;
            (vec![convert_ring(outer).map_err(malformed)?], false)
        }
        Some(Geometry::MultiPolygon { coordinates }) => {
            if coordinates.is_empty() {
                return Err(malformed("multipolygon has no parts"));
            }
            let rings = coordinates
                .iter()
                .map(|part| {
                    let outer = part.first().ok_or("multipolygon part has no rings")?;
                    convert_ring(outer)
                })
                .collect::<std::result::Result<Vec<Ring>, _>>()
                .map_err(malformed)?;
            (rings, true)
        }
    };

    let mut record = PolygonRecord::with_parts(rings)
        .with_properties(feature.properties.clone())
        .with_foreign_members(feature.extra.clone());
    record.multi_polygon = multi_polygon;
    Ok(record)
}

fn convert_ring(positions: &[Position]) -> std::result::Result<Ring, &'static str> {
    if positions.is_empty() {
        return Err("outer ring is empty");
    }

    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, rest @ ..] => {
                Ok(LatLng::from_lon_lat([*lon, *lat]).with_alt(rest.first().copied()))
            }
            _ => Err("position has fewer than two coordinates"),
        })
        .collect()
}

/// Convert records back into a feature collection
///
/// Single-ring records become `Polygon` features, multi-part records become
/// `MultiPolygon` features. The collection name and foreign members are
/// taken from `template`.
pub fn to_feature_collection(
    records: &[PolygonRecord],
    template: &FeatureCollection,
) -> FeatureCollection {
    let features = records.iter().map(record_to_feature).collect();
    let mut collection = FeatureCollection::new(template.name.clone(), features);
    collection.extra = template.extra.clone();
    collection
}

fn record_to_feature(record: &PolygonRecord) -> Feature {
    let geometry = if record.is_multi_part() {
        Geometry::MultiPolygon {
            coordinates: record
                .rings
                .iter()
                .map(|ring| vec![ring_to_positions(ring)])
                .collect(),
        }
    } else {
        Geometry::Polygon {
            coordinates: record.rings.iter().map(|r| ring_to_positions(r)).collect(),
        }
    };

    Feature::new(geometry, record.properties.clone()).with_extra(record.foreign_members.clone())
}

fn ring_to_positions(ring: &[LatLng]) -> Vec<Position> {
    ring.iter().map(|p| p.to_position()).collect()
}
