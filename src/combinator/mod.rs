use crate::domain::PolygonRecord;
use crate::error::{Error, Result};
use crate::geometry::{GeometryEngine, Operation, multi_polygon_to_rings, record_to_multi_polygon};
use crate::selection::{MIN_SELECTED_FOR_OPERATION, SelectionTracker};
use geo::MultiPolygon;
use log::{debug, info, warn};

/// Result of a combine attempt that reached the engine
#[derive(Debug, Clone, PartialEq)]
pub enum CombineOutcome {
    /// The selected records were replaced by one merged record at `index`
    Combined { index: usize, merged_from: usize },
    /// Step `failed_step` of the fold produced no shape. Everything was
    /// deselected and the records were left as they were.
    Empty { failed_step: usize },
}

impl CombineOutcome {
    pub fn is_combined(&self) -> bool {
        matches!(self, CombineOutcome::Combined { .. })
    }
}

/// Fold every selected record through `engine` and commit the result
///
/// # Algorithm
/// 1. Collect the selected records in list order
/// 2. Convert each to the engine's `MultiPolygon` input
/// 3. Left-fold: `((s0 op s1) op s2) ...`, stopping at the first empty step
/// 4. On success, drop the selected records and append one unselected
///    record holding the outer ring of every part of the result
///
/// An empty step deselects everything and commits nothing.
pub fn combine<E: GeometryEngine + ?Sized>(
    engine: &E,
    tracker: &mut SelectionTracker,
    op: Operation,
) -> Result<CombineOutcome> {
    let selected = tracker.selected_count();
    if selected < MIN_SELECTED_FOR_OPERATION {
        return Err(Error::NotEnoughSelected { selected });
    }

    let shapes: Vec<MultiPolygon<f64>> = tracker.selected().map(record_to_multi_polygon).collect();
    let mut shapes = shapes.into_iter();
    let Some(mut acc) = shapes.next() else {
        return Err(Error::NotEnoughSelected { selected });
    };

    for (step, shape) in shapes.enumerate() {
        match engine.combine(&acc, &shape, op) {
            Some(next) => {
                debug!("{} step {}: {} part(s)", op, step, next.0.len());
                acc = next;
            }
            None => {
                warn!(
                    "{} of {} polygons produced an empty shape at step {}, nothing changed",
                    op, selected, step
                );
                tracker.deselect_all();
                return Ok(CombineOutcome::Empty { failed_step: step });
            }
        }
    }

    let (rings, holes) = multi_polygon_to_rings(&acc);
    if holes > 0 {
        debug!("Dropped {} interior ring(s) from {} result", holes, op);
    }

    tracker.replace_selected(PolygonRecord::with_parts(rings));
    let index = tracker.len() - 1;
    info!(
        "{} of {} polygons committed as polygon {} ({} total)",
        op,
        selected,
        index,
        tracker.len()
    );

    Ok(CombineOutcome::Combined {
        index,
        merged_from: selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use crate::domain::LatLng;
    use crate::geometry::GeoEngine;
    use approx::assert_relative_eq;
    use geo::Area;
    use std::cell::RefCell;

    /// Square given in GeoJSON order, i.e. (lon, lat) pairs
    fn square(lon: f64, lat: f64, size: f64) -> PolygonRecord {
        PolygonRecord::new(
            [
                [lon, lat],
                [lon + size, lat],
                [lon + size, lat + size],
                [lon, lat + size],
            ]
            .into_iter()
            .map(LatLng::from_lon_lat)
            .collect(),
        )
    }

    fn tracker(records: Vec<PolygonRecord>, select: &[usize]) -> SelectionTracker {
        let mut t = SelectionTracker::new(records, Palette::default());
        for &i in select {
            t.toggle(i).unwrap();
        }
        t
    }

    #[test]
    fn test_union_disjoint_squares() {
        let mut t = tracker(
            vec![square(0.0, 0.0, 1.0), square(2.0, 0.0, 1.0), square(9.0, 9.0, 1.0)],
            &[0, 1],
        );

        let outcome = combine(&GeoEngine, &mut t, Operation::Union).unwrap();
        assert_eq!(
            outcome,
            CombineOutcome::Combined {
                index: 1,
                merged_from: 2
            }
        );
        assert_eq!(t.len(), 3 - 2 + 1);

        let merged = &t.records()[1];
        assert!(!merged.selected);
        assert_eq!(merged.rings.len(), 2);
        assert_eq!(t.records()[0], square(9.0, 9.0, 1.0));
        assert!(!t.operation_permitted());
    }

    #[test]
    fn test_union_overlapping_merges_boundary() {
        let mut t = tracker(vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)], &[0, 1]);

        combine(&GeoEngine, &mut t, Operation::Union).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].rings.len(), 1);
        let merged = record_to_multi_polygon(&t.records()[0]);
        assert_relative_eq!(merged.unsigned_area(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersect_disjoint_leaves_records() {
        let records = vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0), square(0.5, 0.5, 1.0)];
        let mut t = tracker(records.clone(), &[0, 1]);

        let outcome = combine(&GeoEngine, &mut t, Operation::Intersect).unwrap();
        assert_eq!(outcome, CombineOutcome::Empty { failed_step: 0 });
        assert_eq!(t.selected_count(), 0);

        let unchanged: Vec<PolygonRecord> = records
            .into_iter()
            .map(|mut r| {
                r.selected = false;
                r
            })
            .collect();
        assert_eq!(t.records(), unchanged.as_slice());
    }

    #[test]
    fn test_intersect_overlapping() {
        let mut t = tracker(vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)], &[0, 1]);

        let outcome = combine(&GeoEngine, &mut t, Operation::Intersect).unwrap();
        assert!(outcome.is_combined());
        assert_eq!(t.len(), 1);

        let ring = &t.records()[0].rings[0];
        let inside = |v: f64| (1.0 - 1e-9..=2.0 + 1e-9).contains(&v);
        assert!(ring.iter().all(|p| inside(p.lat) && inside(p.lng)));
    }

    #[test]
    fn test_not_enough_selected() {
        let mut t = tracker(vec![square(0.0, 0.0, 1.0), square(2.0, 0.0, 1.0)], &[1]);
        let err = combine(&GeoEngine, &mut t, Operation::Union).unwrap_err();
        assert!(matches!(err, Error::NotEnoughSelected { selected: 1 }));
        assert_eq!(t.selected_count(), 1);
        assert_eq!(t.len(), 2);
    }

    /// Records every pair it is handed and fails on a chosen call
    struct RecordingEngine {
        calls: RefCell<Vec<(f64, f64)>>,
        fail_on: Option<usize>,
    }

    fn min_lng(shape: &MultiPolygon<f64>) -> f64 {
        shape
            .iter()
            .flat_map(|p| p.exterior().coords())
            .map(|c| c.x)
            .fold(f64::INFINITY, f64::min)
    }

    impl GeometryEngine for RecordingEngine {
        fn combine(
            &self,
            a: &MultiPolygon<f64>,
            b: &MultiPolygon<f64>,
            op: Operation,
        ) -> Option<MultiPolygon<f64>> {
            let mut calls = self.calls.borrow_mut();
            calls.push((min_lng(a), min_lng(b)));
            if self.fail_on == Some(calls.len() - 1) {
                return None;
            }
            GeoEngine.combine(a, b, op)
        }
    }

    #[test]
    fn test_left_fold_order() {
        let engine = RecordingEngine {
            calls: RefCell::new(Vec::new()),
            fail_on: None,
        };
        let mut t = tracker(
            vec![square(4.0, 0.0, 1.0), square(0.0, 0.0, 1.0), square(8.0, 0.0, 1.0)],
            &[2, 0, 1],
        );

        combine(&engine, &mut t, Operation::Union).unwrap();

        // list order, not click order: (s0 op s1) op s2
        let calls = engine.calls.borrow();
        assert_eq!(calls.as_slice(), &[(4.0, 0.0), (0.0, 8.0)]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].rings.len(), 3);
    }

    #[test]
    fn test_failure_mid_fold_commits_nothing() {
        let engine = RecordingEngine {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(1),
        };
        let mut t = tracker(
            vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0), square(1.5, 1.5, 2.0)],
            &[0, 1, 2],
        );

        let outcome = combine(&engine, &mut t, Operation::Union).unwrap();
        assert_eq!(outcome, CombineOutcome::Empty { failed_step: 1 });
        assert_eq!(engine.calls.borrow().len(), 2);
        assert_eq!(t.len(), 3);
        assert_eq!(t.selected_count(), 0);
    }
}
