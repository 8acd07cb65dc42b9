use crate::config::{Palette, PathStyle};
use crate::domain::PolygonRecord;
use crate::error::{Error, Result};
use log::debug;

/// Minimum number of selected polygons before union/intersect are allowed
pub const MIN_SELECTED_FOR_OPERATION: usize = 2;

/// Owns the loaded polygon records and their selection flags.
///
/// Derived state (`selected_count`, `operation_permitted`) is recomputed
/// after every mutation, so readers never observe a stale value.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    records: Vec<PolygonRecord>,
    palette: Palette,
    selected_count: usize,
    operation_permitted: bool,
}

impl SelectionTracker {
    pub fn new(records: Vec<PolygonRecord>, palette: Palette) -> Self {
        let mut tracker = Self {
            records,
            palette,
            selected_count: 0,
            operation_permitted: false,
        };
        tracker.recompute();
        tracker
    }

    /// Flip the selection flag of the record at `index`
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;

        record.selected = !record.selected;
        let now_selected = record.selected;
        self.recompute();

        debug!(
            "Toggled polygon {} -> {} ({} selected)",
            index,
            if now_selected { "selected" } else { "unselected" },
            self.selected_count
        );
        Ok(now_selected)
    }

    pub fn deselect_all(&mut self) {
        for record in &mut self.records {
            record.selected = false;
        }
        self.recompute();
    }

    /// Replace the whole record list, e.g. after the input collection changed
    pub fn set_records(&mut self, records: Vec<PolygonRecord>) {
        self.records = records;
        self.recompute();
    }

    /// Remove every selected record and append `merged` at the end
    pub(crate) fn replace_selected(&mut self, merged: PolygonRecord) {
        self.records.retain(|r| !r.selected);
        self.records.push(merged);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.selected_count = self.records.iter().filter(|r| r.selected).count();
        self.operation_permitted = self.selected_count >= MIN_SELECTED_FOR_OPERATION;
    }

    pub fn records(&self) -> &[PolygonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    /// True when at least two records are selected
    pub fn operation_permitted(&self) -> bool {
        self.operation_permitted
    }

    /// Indices of selected records, in list order
    pub fn selected_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected(&self) -> impl Iterator<Item = &PolygonRecord> {
        self.records.iter().filter(|r| r.selected)
    }

    pub fn style(&self, index: usize) -> Result<&PathStyle> {
        let len = self.records.len();
        self.records
            .get(index)
            .map(|r| self.palette.for_selection(r.selected))
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn styles(&self) -> Vec<&PathStyle> {
        self.records
            .iter()
            .map(|r| self.palette.for_selection(r.selected))
            .collect()
    }
}
