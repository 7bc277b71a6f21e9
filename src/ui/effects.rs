// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Audio and video processing panels.
//!
//! Sliders and toggles bound to the settings models. The panels show the
//! derived filter parameters; wiring them into a real media pipeline is
//! the playback host's job.

use crate::models::settings::{AudioSettings, VideoSettings};

/// Display the video processing section.
pub fn show_video(ui: &mut egui::Ui, settings: &mut VideoSettings) {
    ui.checkbox(&mut settings.is_video_processing_enabled, "Video Processing");

    ui.add_enabled_ui(settings.is_video_processing_enabled, |ui| {
        ui.add(egui::Slider::new(&mut settings.brightness, 0.0..=2.0).text("Brightness"));
        ui.add(egui::Slider::new(&mut settings.contrast, 0.0..=2.0).text("Contrast"));
        ui.add(egui::Slider::new(&mut settings.saturation, 0.0..=2.0).text("Saturation"));
        ui.add(egui::Slider::new(&mut settings.exposure, 0.0..=2.0).text("Exposure"));
        ui.add(egui::Slider::new(&mut settings.hue, 0.0..=360.0).text("Hue"));
        ui.add(egui::Slider::new(&mut settings.sharpness, 0.0..=2.0).text("Sharpness"));

        let mut grayscale = settings.grayscale == 1;
        if ui.checkbox(&mut grayscale, "Grayscale").changed() {
            settings.grayscale = grayscale as u8;
        }
        let mut invert = settings.invert == 1;
        if ui.checkbox(&mut invert, "Invert Colors").changed() {
            settings.invert = invert as u8;
        }

        ui.separator();
        ui.label(egui::RichText::new(settings.filter_chain()).weak().small());
    });
}

/// Display the audio processing section.
pub fn show_audio(ui: &mut egui::Ui, settings: &mut AudioSettings) {
    ui.checkbox(&mut settings.is_audio_processing_enabled, "Audio Processing");

    ui.add(egui::Slider::new(&mut settings.volume, 0.0..=1.0).text("Volume"));

    ui.add_enabled_ui(settings.is_audio_processing_enabled, |ui| {
        ui.add(egui::Slider::new(&mut settings.filter_intensity, 0.0..=100.0).text("Noise Filter"));
        ui.add(egui::Slider::new(&mut settings.voice_boost, 0.0..=100.0).text("Voice Boost"));
        ui.add(egui::Slider::new(&mut settings.clarity, 0.0..=100.0).text("Clarity"));

        ui.separator();
        ui.label(
            egui::RichText::new(format!(
                "highpass {:.0} Hz · boost +{:.1} dB @ 1 kHz · shelf +{:.1} dB @ 3 kHz",
                settings.highpass_cutoff_hz(),
                settings.voice_boost_gain_db(),
                settings.clarity_gain_db()
            ))
            .weak()
            .small(),
        );
    });
}
