// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation section panel.
//!
//! Toggles overlay display, opens a drawing session, imports saved
//! annotations, and lists the timeline's records with rename, retime,
//! seek, and delete controls.

use crate::models::annotation::Timeline;

/// Requests the panel hands back to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationsAction {
    None,
    /// Start a drawing session over the paused video.
    OpenEditor,
    /// Jump playback to a time.
    Seek(f64),
    /// Ask for an annotations file to import.
    Import,
}

/// Display the annotation section.
pub fn show(
    ui: &mut egui::Ui,
    timeline: &mut Timeline,
    show_overlay: &mut bool,
    editor_open: bool,
) -> AnnotationsAction {
    let mut action = AnnotationsAction::None;

    ui.checkbox(show_overlay, "Display Annotations");

    ui.horizontal(|ui| {
        // Only one session may be open at a time; the trigger stays
        // disabled until the current one closes.
        if ui
            .add_enabled(!editor_open, egui::Button::new("Draw on Video"))
            .clicked()
        {
            action = AnnotationsAction::OpenEditor;
        }
        if ui.button("Import Annotations").clicked() {
            action = AnnotationsAction::Import;
        }
    });

    ui.separator();

    if timeline.is_empty() {
        ui.label(egui::RichText::new("No annotations yet").weak());
        return action;
    }

    let mut retimed = false;
    let mut delete: Option<u64> = None;

    egui::ScrollArea::vertical()
        .max_height(220.0)
        .show(ui, |ui| {
            for record in timeline.records_mut() {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut record.name)
                            .desired_width(110.0)
                            .font(egui::TextStyle::Button),
                    );

                    let start = ui.add(
                        egui::DragValue::new(&mut record.start_time)
                            .speed(0.1)
                            .range(0.0..=f64::MAX)
                            .suffix(" s"),
                    );
                    let end = ui.add(
                        egui::DragValue::new(&mut record.end_time)
                            .speed(0.1)
                            .range(0.0..=f64::MAX)
                            .suffix(" s"),
                    );
                    if start.changed() || end.changed() {
                        retimed = true;
                    }

                    if ui.button("Go to Time").clicked() {
                        action = AnnotationsAction::Seek(record.start_time);
                    }
                    if ui.button("Delete").clicked() {
                        delete = Some(record.id);
                    }
                });
            }
        });

    if retimed {
        timeline.resort();
    }
    if let Some(id) = delete {
        timeline.remove(id);
    }

    action
}
