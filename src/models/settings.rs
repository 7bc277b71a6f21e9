// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Audio and video processing settings.
//!
//! Pure parameter models. The video side derives the CSS-style filter
//! chain applied to the playback surface; the audio side derives the
//! filter-node parameters of the processing graph (highpass noise filter,
//! peaking voice boost, highshelf clarity). Applying them to an actual
//! media pipeline is the host's concern.

use serde::{Deserialize, Serialize};

/// Video filter settings. Multiplier fields are normalized (1.0 = neutral);
/// `hue` is in degrees; `grayscale`/`invert` are 0-or-1 switches, matching
/// the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    pub is_video_processing_enabled: bool,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub exposure: f32,
    pub hue: f32,
    pub sharpness: f32,
    pub grayscale: u8,
    pub invert: u8,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            is_video_processing_enabled: false,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            exposure: 1.0,
            hue: 0.0,
            sharpness: 1.0,
            grayscale: 0,
            invert: 0,
        }
    }
}

impl VideoSettings {
    /// The filter chain as applied to the playback surface. Exposure rides
    /// on a second brightness stage; sharpness below 2.0 maps to blur.
    pub fn filter_chain(&self) -> String {
        format!(
            "brightness({}) contrast({}) saturate({}) brightness({}) hue-rotate({}deg) blur({}px) grayscale({}) invert({})",
            self.brightness,
            self.contrast,
            self.saturation,
            self.exposure,
            self.hue,
            2.0 - self.sharpness,
            self.grayscale,
            self.invert,
        )
    }
}

/// Audio filter settings. `volume` is normalized 0..1; the three filter
/// knobs are 0..100 slider values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSettings {
    pub is_audio_processing_enabled: bool,
    pub volume: f32,
    pub filter_intensity: f32,
    pub voice_boost: f32,
    pub clarity: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            is_audio_processing_enabled: false,
            volume: 1.0,
            filter_intensity: 50.0,
            voice_boost: 50.0,
            clarity: 50.0,
        }
    }
}

/// Center frequency of the voice-boost peaking filter.
pub const VOICE_BOOST_HZ: f32 = 1000.0;
/// Q of the voice-boost peaking filter.
pub const VOICE_BOOST_Q: f32 = 1.0;
/// Corner frequency of the clarity highshelf filter.
pub const CLARITY_HZ: f32 = 3000.0;

impl AudioSettings {
    /// Highpass cutoff for the noise filter: 20 Hz at zero intensity up
    /// to 2 kHz at full.
    pub fn highpass_cutoff_hz(&self) -> f32 {
        20.0 + (self.filter_intensity / 100.0) * 1980.0
    }

    /// Gain of the 1 kHz peaking filter, in dB.
    pub fn voice_boost_gain_db(&self) -> f32 {
        self.voice_boost / 2.0
    }

    /// Gain of the 3 kHz highshelf filter, in dB.
    pub fn clarity_gain_db(&self) -> f32 {
        self.clarity / 4.0
    }
}
