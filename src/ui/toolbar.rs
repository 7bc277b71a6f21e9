// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing controls for an open editor session.
//!
//! Color and brush pickers, the tool and mode switches, text/image
//! placement, and the save/back buttons that end the session.

use crate::editor::session::{EditorSession, Mode, Tool};
use crate::models::shape::Color;

/// Session-ending request from the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    /// Save the drawing as an annotation and close.
    Save,
    /// Discard the drawing and close.
    Close,
}

/// Display the drawing controls for the open session.
pub fn show(ui: &mut egui::Ui, session: &mut EditorSession, text_draft: &mut String) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let color = session.color();
        let mut rgb = [color.0, color.1, color.2];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            session.set_color(Color(rgb[0], rgb[1], rgb[2]));
        }

        let mut width = session.line_width();
        if ui
            .add(egui::Slider::new(&mut width, 1.0..=20.0).text("Brush"))
            .changed()
        {
            session.set_line_width(width);
        }

        ui.separator();

        let draw = session.mode() == Mode::Draw;
        for (tool, label) in [
            (Tool::Pencil, "✏ Pencil"),
            (Tool::Rectangle, "□ Rectangle"),
            (Tool::Circle, "○ Circle"),
        ] {
            if ui
                .selectable_label(draw && session.tool() == tool, label)
                .clicked()
            {
                session.set_tool(tool);
            }
        }

        ui.separator();

        for (mode, label) in [(Mode::Edit, "Edit"), (Mode::Delete, "Delete")] {
            if ui.selectable_label(session.mode() == mode, label).clicked() {
                session.set_mode(mode);
            }
        }

        ui.separator();

        if ui.button("Upload Image").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                .pick_file()
            {
                match crate::io::media::load_image(&path) {
                    Ok(loaded) => {
                        if let Some(bitmap) =
                            image::RgbaImage::from_raw(loaded.width, loaded.height, loaded.pixels)
                        {
                            session.insert_image(bitmap);
                        }
                    }
                    Err(e) => log::error!("Failed to load image: {e}"),
                }
            }
        }
    });

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let text_edit = egui::TextEdit::singleline(text_draft).hint_text("Enter text");
        ui.add(text_edit);
        if ui.button("Add Text").clicked() && !text_draft.is_empty() {
            session.insert_text(text_draft);
            text_draft.clear();
        }

        ui.separator();

        if ui.button("Save").clicked() {
            action = ToolbarAction::Save;
        }
        if ui.button("Back").clicked() {
            action = ToolbarAction::Close;
        }

        ui.separator();

        let hint = match session.mode() {
            Mode::Draw => "Drag on the video to draw",
            Mode::Edit => "Click a shape to select, drag to move, corner handle to resize",
            Mode::Delete => "Click a shape to delete it",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
