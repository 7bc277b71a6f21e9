// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration serialization and deserialization.
//!
//! This module handles exporting and importing the per-video
//! configuration in JSON (the interop format) and YAML. Section imports
//! (`annotations`, `timestamps`, `focusRecordings`) require their key to
//! be present and fail without touching caller state otherwise.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::io::media;
use crate::models::annotation::AnnotationRecord;
use crate::models::config::{AnnotationExport, VideoConfig};
use crate::models::focus::FocusRecording;
use crate::models::timestamp::Timestamp;

/// Export the full configuration; the format follows the extension.
pub fn export_config(config: &VideoConfig, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            let yaml = serde_yaml::to_string(config)?;
            std::fs::write(path, yaml)?;
        }
        Some("json") => {
            let json = serde_json::to_string_pretty(config)?;
            std::fs::write(path, json)?;
        }
        other => bail!("unsupported file extension: {other:?}"),
    }
    Ok(())
}

/// Import a full configuration; the format follows the extension.
pub fn import_config(path: &Path) -> Result<VideoConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        other => bail!("unsupported file extension: {other:?}"),
    };
    Ok(config)
}

fn import_section<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a valid config file", path.display()))
}

/// Import just the `annotations` section of a config file.
pub fn import_annotations(path: &Path) -> Result<Vec<AnnotationExport>> {
    #[derive(Deserialize)]
    struct Section {
        annotations: Vec<AnnotationExport>,
    }
    Ok(import_section::<Section>(path)?.annotations)
}

/// Import just the `timestamps` section of a config file.
pub fn import_timestamps(path: &Path) -> Result<Vec<Timestamp>> {
    #[derive(Deserialize)]
    struct Section {
        timestamps: Vec<Timestamp>,
    }
    Ok(import_section::<Section>(path)?.timestamps)
}

/// Import just the `focusRecordings` section of a config file.
pub fn import_focus_recordings(path: &Path) -> Result<Vec<FocusRecording>> {
    #[derive(Deserialize)]
    struct Section {
        #[serde(rename = "focusRecordings")]
        focus_recordings: Vec<FocusRecording>,
    }
    Ok(import_section::<Section>(path)?.focus_recordings)
}

/// Flatten a timeline record into its wire form.
pub fn record_to_export(record: &AnnotationRecord) -> Result<AnnotationExport> {
    Ok(AnnotationExport {
        name: Some(record.name.clone()),
        start_time: record.start_time,
        end_time: record.end_time,
        image_base64: media::encode_png_data_url(&record.raster)?,
    })
}

/// Rebuild a timeline record from its wire form. Only the raster and the
/// time range survive the trip; the shape list is gone, so the result
/// displays but cannot be re-edited shape by shape.
pub fn export_to_record(export: &AnnotationExport) -> Result<AnnotationRecord> {
    let raster = media::decode_image_data_url(&export.image_base64)?;
    let mut record = AnnotationRecord::new(export.start_time, raster, Vec::new());
    record.end_time = export.end_time;
    record.name = export.name.clone().unwrap_or_default();
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{AudioSettings, VideoSettings};
    use image::RgbaImage;

    fn sample_config() -> VideoConfig {
        VideoConfig {
            timestamps: vec![Timestamp {
                title: "Intro".into(),
                timestamp: "00:00".into(),
                description: "Start".into(),
            }],
            audio_settings: AudioSettings::default(),
            video_settings: VideoSettings::default(),
            annotations: Vec::new(),
            focus_recordings: Vec::new(),
        }
    }

    #[test]
    fn test_export_import_roundtrip_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config();

        for name in ["config.json", "config.yaml"] {
            let path = dir.path().join(name);
            export_config(&config, &path).unwrap();
            let back = import_config(&path).unwrap();
            assert_eq!(back, config);
        }
    }

    #[test]
    fn test_export_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        assert!(export_config(&sample_config(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_import_annotations_requires_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"timestamps": []}"#).unwrap();

        assert!(import_annotations(&path).is_err());
        // The other sections still read their own keys.
        assert!(import_timestamps(&path).unwrap().is_empty());
    }

    #[test]
    fn test_import_annotations_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(import_annotations(&path).is_err());
    }

    #[test]
    fn test_record_export_roundtrip_flattens_shapes() {
        let mut record = AnnotationRecord::new(
            12.0,
            RgbaImage::new(8, 6),
            vec![crate::models::shape::Shape::rectangle_at(
                1.0,
                1.0,
                crate::models::shape::Color::BLACK,
                2.0,
            )],
        );
        record.name = "Annotation 1".into();

        let export = record_to_export(&record).unwrap();
        assert_eq!(export.start_time, 12.0);
        assert_eq!(export.end_time, 15.0);
        assert!(export.image_base64.starts_with("data:image/png;base64,"));

        let back = export_to_record(&export).unwrap();
        assert_eq!(back.start_time, 12.0);
        assert_eq!(back.end_time, 15.0);
        assert_eq!(back.name, "Annotation 1");
        assert_eq!(back.raster.dimensions(), (8, 6));
        assert!(back.shapes.is_empty());
    }

    #[test]
    fn test_import_focus_recordings_reads_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus.json");
        std::fs::write(
            &path,
            r#"{"focusRecordings": [{"startTime": 1.0, "endTime": 3.0,
                 "coordinates": [{"time": 0.0, "x": 10.0, "y": 20.0}]}]}"#,
        )
        .unwrap();

        let recordings = import_focus_recordings(&path).unwrap();
        assert_eq!(recordings.len(), 1);
        assert_eq!(recordings[0].coordinates[0].x, 10.0);
    }
}
