// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Focus (spotlight) section panel.
//!
//! Toggles the live spotlight, starts/stops recordings, and lists the
//! saved recordings with play/delete per row.

use crate::models::focus::FocusRecording;
use crate::util::time;

/// Requests the panel hands back to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusAction {
    None,
    SetFocusMode(bool),
    /// Begin the 3-second countdown, then record.
    StartRecording,
    /// Stop the in-flight recording.
    StopRecording,
    /// Play back the recording at this index.
    Play(usize),
    /// Remove the recording at this index.
    Delete(usize),
    /// Ask for a focus recordings file to import.
    Import,
}

/// Display the focus section.
pub fn show(
    ui: &mut egui::Ui,
    focus_enabled: bool,
    recording: bool,
    recordings: &[FocusRecording],
) -> FocusAction {
    let mut action = FocusAction::None;

    let mut enabled = focus_enabled;
    if ui.checkbox(&mut enabled, "Focus Mode").changed() {
        action = FocusAction::SetFocusMode(enabled);
    }

    ui.horizontal(|ui| {
        if recording {
            if ui
                .button(egui::RichText::new("Stop Recording").color(egui::Color32::RED))
                .clicked()
            {
                action = FocusAction::StopRecording;
            }
            ui.label(egui::RichText::new("Recording... press Esc to stop").color(egui::Color32::RED));
        } else {
            if ui.button("Record Focus").clicked() {
                action = FocusAction::StartRecording;
            }
            if ui.button("Import Recordings").clicked() {
                action = FocusAction::Import;
            }
        }
    });

    ui.separator();

    if recordings.is_empty() {
        ui.label(egui::RichText::new("No focus recordings yet").weak());
        return action;
    }

    for (index, recording) in recordings.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} - {}",
                time::format_mmss(recording.start_time),
                time::format_mmss(recording.end_time)
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    action = FocusAction::Delete(index);
                }
                if ui.button("Play").clicked() {
                    action = FocusAction::Play(index);
                }
            });
        });
    }

    action
}
