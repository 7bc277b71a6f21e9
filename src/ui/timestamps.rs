// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timestamp chapter panel.
//!
//! The sorted chapter list with seek/delete per row, plus the buttons
//! that open the add-at-current-time popup and the import dialog.

use crate::models::timestamp::TimestampList;

/// Requests the panel hands back to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimestampsAction {
    None,
    /// Jump playback to a time.
    Seek(f64),
    /// Open the add-timestamp popup (pauses playback).
    OpenAddPopup,
    /// Ask for a timestamps file to import.
    Import,
    /// Remove the row at this index.
    Delete(usize),
}

/// Display the timestamp section.
pub fn show(ui: &mut egui::Ui, timestamps: &TimestampList) -> TimestampsAction {
    let mut action = TimestampsAction::None;

    ui.horizontal(|ui| {
        if ui.button("Import Timestamps").clicked() {
            action = TimestampsAction::Import;
        }
        if ui.button("Add timestamp on current time").clicked() {
            action = TimestampsAction::OpenAddPopup;
        }
    });

    ui.separator();

    egui::ScrollArea::vertical()
        .max_height(220.0)
        .show(ui, |ui| {
            for (index, stamp) in timestamps.entries().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{} | {}", stamp.title, stamp.timestamp))
                                .strong(),
                        );
                        if !stamp.description.is_empty() {
                            ui.label(egui::RichText::new(&stamp.description).weak());
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete").clicked() {
                            action = TimestampsAction::Delete(index);
                        }
                        if ui.button("Go to time").clicked() {
                            action = TimestampsAction::Seek(stamp.seconds());
                        }
                    });
                });
                ui.separator();
            }
        });

    action
}
