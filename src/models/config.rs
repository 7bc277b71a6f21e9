// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exported configuration schema.
//!
//! The single-file config a video's settings travel in. Key names are
//! wire format and must not change: `timestamps`, `audioSettings`,
//! `videoSettings`, `annotations`, `focusRecordings`.

use serde::{Deserialize, Serialize};

use super::focus::FocusRecording;
use super::settings::{AudioSettings, VideoSettings};
use super::timestamp::Timestamp;

/// A flattened annotation as it appears in the config file: a time range
/// plus the rendered overlay as a PNG data URL. The shape list is not
/// part of the wire format, so imported annotations display but cannot be
/// re-edited shape by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub image_base64: String,
}

/// Complete per-video configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    pub timestamps: Vec<Timestamp>,
    pub audio_settings: AudioSettings,
    pub video_settings: VideoSettings,
    pub annotations: Vec<AnnotationExport>,
    pub focus_recordings: Vec<FocusRecording>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> VideoConfig {
        VideoConfig {
            timestamps: vec![Timestamp {
                title: "Intro".into(),
                timestamp: "00:00".into(),
                description: "Start".into(),
            }],
            audio_settings: AudioSettings::default(),
            video_settings: VideoSettings::default(),
            annotations: vec![AnnotationExport {
                name: Some("Annotation 1".into()),
                start_time: 12.0,
                end_time: 15.0,
                image_base64: "data:image/png;base64,AAAA".into(),
            }],
            focus_recordings: Vec::new(),
        }
    }

    #[test]
    fn test_config_serializes_exact_key_set() {
        let json = serde_json::to_value(sample_config()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "annotations",
                "audioSettings",
                "focusRecordings",
                "timestamps",
                "videoSettings"
            ]
        );

        let annotation = &json["annotations"][0];
        assert_eq!(annotation["startTime"], 12.0);
        assert_eq!(annotation["endTime"], 15.0);
        assert!(annotation.get("imageBase64").is_some());
    }

    #[test]
    fn test_annotation_name_is_optional_on_import() {
        let parsed: AnnotationExport = serde_json::from_str(
            r#"{"startTime": 1.0, "endTime": 4.0, "imageBase64": "data:image/png;base64,AAAA"}"#,
        )
        .unwrap();
        assert!(parsed.name.is_none());

        // And omitted again on export when absent.
        let json = serde_json::to_value(&parsed).unwrap();
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = sample_config();
        let text = serde_json::to_string_pretty(&config).unwrap();
        let back: VideoConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
