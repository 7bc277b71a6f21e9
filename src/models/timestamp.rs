// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timestamp chapter list.
//!
//! Named markers into the video, serialized with `MM:SS` / `HH:MM:SS`
//! clock strings and kept sorted by their parsed time.

use serde::{Deserialize, Serialize};

use crate::util::time;

/// One chapter marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub title: String,
    pub timestamp: String,
    pub description: String,
}

impl Timestamp {
    /// The marker's position in seconds; unparseable clock strings sort
    /// to the front as zero.
    pub fn seconds(&self) -> f64 {
        time::parse_clock(&self.timestamp).unwrap_or(0.0)
    }
}

/// Sorted list of chapter markers.
#[derive(Debug, Clone, Default)]
pub struct TimestampList {
    entries: Vec<Timestamp>,
}

impl TimestampList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter chapters every fresh video gets.
    pub fn demo() -> Self {
        let mut list = Self::new();
        for (title, description, timestamp) in [
            ("Introduction", "Start of the video", "00:00"),
            ("Main Topic", "Discussion of key points", "01:30"),
            ("Conclusion", "Summary and closing remarks", "2:45"),
        ] {
            list.entries.push(Timestamp {
                title: title.to_string(),
                timestamp: timestamp.to_string(),
                description: description.to_string(),
            });
        }
        list.sort();
        list
    }

    pub fn entries(&self) -> &[Timestamp] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a marker at `seconds`, formatted as `HH:MM:SS`.
    pub fn add(&mut self, title: String, description: String, seconds: f64) {
        self.entries.push(Timestamp {
            title,
            timestamp: time::format_hms(seconds),
            description,
        });
        self.sort();
    }

    /// Remove by index; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Wholesale replacement from an import.
    pub fn replace(&mut self, entries: Vec<Timestamp>) {
        self.entries = entries;
        self.sort();
        log::info!("Imported {} timestamps", self.entries.len());
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.seconds().total_cmp(&b.seconds()));
    }
}
