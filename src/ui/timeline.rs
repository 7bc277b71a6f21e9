// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video transport bar.
//!
//! Play/pause control and the scrubber for the playback clock that
//! stands in for the video element.

use crate::app::Transport;
use crate::util::time;

/// Display the transport bar and apply interactions to the clock.
/// `locked` disables everything (used while a drawing session is open).
pub fn show(ui: &mut egui::Ui, transport: &mut Transport, locked: bool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.add_enabled_ui(!locked, |ui| {
            let label = if transport.playing { "⏸" } else { "▶" };
            if ui.button(label).clicked() {
                transport.toggle();
            }

            ui.monospace(time::format_hms(transport.current_time));

            let mut t = transport.current_time;
            let slider = egui::Slider::new(&mut t, 0.0..=transport.duration)
                .show_value(false)
                .trailing_fill(true);
            if ui.add(slider).changed() {
                transport.seek(t);
            }

            ui.monospace(time::format_hms(transport.duration));
        });
    });
}
