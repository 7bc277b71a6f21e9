// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Focus (mouse spotlight) recordings.
//!
//! A focus recording captures where the presenter's pointer was, relative
//! to the video rectangle, at one-second intervals of video time. During
//! playback the samples drive a spotlight overlay that dims everything but
//! a circle around the recorded position.

use serde::{Deserialize, Serialize};

/// One sampled pointer position. `time` is seconds since the recording's
/// start; `x`/`y` are pixels relative to the video rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusSample {
    pub time: f64,
    pub x: f32,
    pub y: f32,
}

/// A recorded spotlight pass over `[start_time, end_time]` of the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecording {
    pub start_time: f64,
    pub end_time: f64,
    pub coordinates: Vec<FocusSample>,
}

impl FocusRecording {
    /// The sample to show at video time `t`: the last one whose offset has
    /// been reached. `None` before the first sample or outside the range.
    pub fn sample_at(&self, t: f64) -> Option<&FocusSample> {
        if t < self.start_time || t > self.end_time {
            return None;
        }
        let offset = t - self.start_time;
        self.coordinates
            .iter()
            .rev()
            .find(|sample| sample.time <= offset)
    }
}

/// Sampling interval while recording, in seconds of video time.
pub const SAMPLE_INTERVAL_SECS: f64 = 1.0;

/// Accumulates samples for an in-flight recording.
#[derive(Debug)]
pub struct FocusRecorder {
    start_time: f64,
    samples: Vec<FocusSample>,
}

impl FocusRecorder {
    pub fn begin(start_time: f64) -> Self {
        Self {
            start_time,
            samples: Vec::new(),
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Offer the current pointer position; a sample is taken once per
    /// [`SAMPLE_INTERVAL_SECS`] of elapsed video time.
    pub fn offer(&mut self, video_time: f64, x: f32, y: f32) {
        let offset = video_time - self.start_time;
        if offset < 0.0 {
            return;
        }
        let due = self.samples.len() as f64 * SAMPLE_INTERVAL_SECS;
        if offset >= due {
            self.samples.push(FocusSample { time: offset, x, y });
        }
    }

    /// Close out the recording at `end_time`.
    pub fn finish(self, end_time: f64) -> FocusRecording {
        FocusRecording {
            start_time: self.start_time,
            end_time,
            coordinates: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> FocusRecording {
        FocusRecording {
            start_time: 10.0,
            end_time: 13.0,
            coordinates: vec![
                FocusSample { time: 0.0, x: 100.0, y: 50.0 },
                FocusSample { time: 1.0, x: 120.0, y: 60.0 },
                FocusSample { time: 2.0, x: 140.0, y: 70.0 },
            ],
        }
    }

    #[test]
    fn test_sample_at_picks_latest_reached() {
        let rec = recording();
        assert_eq!(rec.sample_at(10.0).unwrap().x, 100.0);
        assert_eq!(rec.sample_at(10.9).unwrap().x, 100.0);
        assert_eq!(rec.sample_at(11.0).unwrap().x, 120.0);
        assert_eq!(rec.sample_at(12.5).unwrap().x, 140.0);
    }

    #[test]
    fn test_sample_at_outside_range_is_none() {
        let rec = recording();
        assert!(rec.sample_at(9.9).is_none());
        assert!(rec.sample_at(13.1).is_none());
    }

    #[test]
    fn test_recorder_samples_once_per_second() {
        let mut recorder = FocusRecorder::begin(5.0);
        recorder.offer(5.0, 1.0, 1.0);
        recorder.offer(5.3, 2.0, 2.0); // too soon, dropped
        recorder.offer(6.1, 3.0, 3.0);
        recorder.offer(6.8, 4.0, 4.0); // too soon, dropped
        recorder.offer(7.2, 5.0, 5.0);

        let rec = recorder.finish(8.0);
        assert_eq!(rec.start_time, 5.0);
        assert_eq!(rec.end_time, 8.0);
        let xs: Vec<f32> = rec.coordinates.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
        assert!((rec.coordinates[1].time - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_recorder_ignores_time_before_start() {
        let mut recorder = FocusRecorder::begin(5.0);
        recorder.offer(4.0, 9.0, 9.0);
        assert!(recorder.finish(6.0).coordinates.is_empty());
    }
}
