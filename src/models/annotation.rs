// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation records and the playback timeline.
//!
//! A saved drawing session becomes an [`AnnotationRecord`]: a time range,
//! the flattened raster of the overlay surface, and the shape list it was
//! rendered from. The [`Timeline`] keeps records sorted by start time and
//! answers the "which annotation is visible right now" query during
//! playback.

use image::RgbaImage;

use super::shape::Shape;

/// Default display window for a freshly saved annotation, in seconds.
pub const DISPLAY_WINDOW_SECS: f64 = 3.0;

/// A saved, time-ranged annotation.
///
/// `id` is assigned by the owning [`Timeline`] and is the identity used for
/// removal and for "currently displayed" change detection; two records are
/// never compared by value.
#[derive(Debug, Clone)]
pub struct AnnotationRecord {
    pub id: u64,
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub raster: RgbaImage,
    pub shapes: Vec<Shape>,
}

impl AnnotationRecord {
    /// Build a record for a session saved at `start_time`; the display
    /// window defaults to three seconds and can be retimed later.
    pub fn new(start_time: f64, raster: RgbaImage, shapes: Vec<Shape>) -> Self {
        Self {
            id: 0,
            name: String::new(),
            start_time,
            end_time: start_time + DISPLAY_WINDOW_SECS,
            raster,
            shapes,
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

/// The ordered collection of annotation records for one video.
///
/// Records stay sorted ascending by `start_time` (stable for ties) after
/// every mutation. Overlapping time ranges are allowed; visibility picks
/// the record sorted in last.
#[derive(Debug, Default)]
pub struct Timeline {
    records: Vec<AnnotationRecord>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Mutable access for the list panel (rename/retime); callers that
    /// touch times must follow up with [`Timeline::resort`].
    pub fn records_mut(&mut self) -> &mut [AnnotationRecord] {
        &mut self.records
    }

    /// Insert a record, assign its identity, and re-sort. Returns the id.
    pub fn insert(&mut self, mut record: AnnotationRecord) -> u64 {
        self.next_id += 1;
        record.id = self.next_id;
        if record.name.is_empty() {
            record.name = format!("Annotation {}", self.next_id);
        }
        let id = record.id;
        self.records.push(record);
        self.resort();
        log::info!("Added annotation {}, total: {}", id, self.records.len());
        id
    }

    /// Remove by identity. Removing an id that is no longer present is a
    /// no-op.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }

    pub fn get(&self, id: u64) -> Option<&AnnotationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Restore sort order after a retime edit.
    pub fn resort(&mut self) {
        self.records
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    }

    /// The record to display at `time`: scanning from the end of the
    /// sorted list, the first one whose range contains `time`. `None`
    /// means "clear the overlay", which callers must treat as distinct
    /// from "unchanged".
    pub fn visible_at(&self, time: f64) -> Option<&AnnotationRecord> {
        self.records.iter().rev().find(|r| r.contains(time))
    }

    /// Wholesale replacement from an import; ids are re-assigned.
    pub fn import_replace(&mut self, records: Vec<AnnotationRecord>) {
        self.records.clear();
        for record in records {
            self.insert(record);
        }
        log::info!("Imported {} annotations", self.records.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: f64) -> AnnotationRecord {
        AnnotationRecord::new(start, RgbaImage::new(4, 4), Vec::new())
    }

    #[test]
    fn test_save_window_defaults_to_three_seconds() {
        let rec = record(12.0);
        assert_eq!(rec.start_time, 12.0);
        assert_eq!(rec.end_time, 15.0);
    }

    #[test]
    fn test_insert_keeps_records_sorted() {
        let mut timeline = Timeline::new();
        timeline.insert(record(30.0));
        timeline.insert(record(10.0));
        timeline.insert(record(20.0));

        let starts: Vec<f64> = timeline.records().iter().map(|r| r.start_time).collect();
        assert_eq!(starts, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_visible_at_outside_every_range_is_none() {
        let mut timeline = Timeline::new();
        timeline.insert(record(10.0));
        timeline.insert(record(20.0));

        assert!(timeline.visible_at(9.9).is_none());
        assert!(timeline.visible_at(16.0).is_none());
        assert!(timeline.visible_at(100.0).is_none());
    }

    #[test]
    fn test_visible_at_inside_a_range_finds_it() {
        let mut timeline = Timeline::new();
        let id = timeline.insert(record(10.0));
        let hit = timeline.visible_at(11.5).expect("should be visible");
        assert_eq!(hit.id, id);
        // Inclusive at both ends.
        assert!(timeline.visible_at(10.0).is_some());
        assert!(timeline.visible_at(13.0).is_some());
    }

    #[test]
    fn test_overlap_resolves_to_last_after_sort() {
        let mut timeline = Timeline::new();
        let first = timeline.insert(record(10.0));
        let second = timeline.insert(record(11.0));

        // 11.5 is inside both [10, 13] and [11, 14]; the later start sorts
        // last and wins.
        let hit = timeline.visible_at(11.5).unwrap();
        assert_eq!(hit.id, second);
        assert_ne!(hit.id, first);
    }

    #[test]
    fn test_overlap_tie_on_start_prefers_most_recent_insert() {
        let mut timeline = Timeline::new();
        timeline.insert(record(10.0));
        let second = timeline.insert(record(10.0));

        assert_eq!(timeline.visible_at(12.0).unwrap().id, second);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut timeline = Timeline::new();
        let id = timeline.insert(record(5.0));
        assert!(timeline.remove(id));
        assert!(!timeline.remove(id));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_import_replace_swaps_contents() {
        let mut timeline = Timeline::new();
        timeline.insert(record(50.0));
        timeline.import_replace(vec![record(2.0), record(1.0)]);

        assert_eq!(timeline.len(), 2);
        let starts: Vec<f64> = timeline.records().iter().map(|r| r.start_time).collect();
        assert_eq!(starts, vec![1.0, 2.0]);
    }

    #[test]
    fn test_retime_then_resort_reorders() {
        let mut timeline = Timeline::new();
        let a = timeline.insert(record(10.0));
        timeline.insert(record(20.0));

        if let Some(rec) = timeline.records_mut().iter_mut().find(|r| r.id == a) {
            rec.start_time = 30.0;
            rec.end_time = 33.0;
        }
        timeline.resort();

        assert_eq!(timeline.records().last().unwrap().id, a);
    }
}
