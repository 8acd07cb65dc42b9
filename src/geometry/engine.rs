use geo::{Area, BooleanOps, MultiPolygon};

/// Set operation applied to a pair of shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Union,
    Intersect,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Union => f.write_str("union"),
            Operation::Intersect => f.write_str("intersect"),
        }
    }
}

/// Pairwise polygon clipping.
///
/// Implementations return `None` when the operation yields no area, for
/// example the intersection of two disjoint shapes.
pub trait GeometryEngine {
    fn combine(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
        op: Operation,
    ) -> Option<MultiPolygon<f64>>;
}

/// Clipping backed by `geo::BooleanOps`
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn combine(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
        op: Operation,
    ) -> Option<MultiPolygon<f64>> {
        let result = match op {
            Operation::Union => a.union(b),
            Operation::Intersect => a.intersection(b),
        };

        if result.0.is_empty() || result.unsigned_area() <= 0.0 {
            return None;
        }
        Some(result)
    }
}
