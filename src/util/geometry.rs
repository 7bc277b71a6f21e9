// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate mapping between the on-screen video
//! rectangle and the fixed-size overlay surface the editor draws on.

/// Map a screen position inside `rect` to overlay-surface pixel coordinates.
pub fn screen_to_surface(
    pos: egui::Pos2,
    rect: egui::Rect,
    surface_width: u32,
    surface_height: u32,
) -> (f32, f32) {
    let rel_x = (pos.x - rect.min.x) / rect.width();
    let rel_y = (pos.y - rect.min.y) / rect.height();
    (rel_x * surface_width as f32, rel_y * surface_height as f32)
}

/// Map overlay-surface pixel coordinates back to a screen position.
pub fn surface_to_screen(
    x: f32,
    y: f32,
    rect: egui::Rect,
    surface_width: u32,
    surface_height: u32,
) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + x / surface_width as f32 * rect.width(),
        rect.min.y + y / surface_height as f32 * rect.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_surface_roundtrip() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(640.0, 360.0));
        let (sx, sy) = screen_to_surface(egui::pos2(420.0, 230.0), rect, 1280, 720);
        let back = surface_to_screen(sx, sy, rect, 1280, 720);

        assert!((back.x - 420.0).abs() < 0.001);
        assert!((back.y - 230.0).abs() < 0.001);
    }

    #[test]
    fn test_corners_map_to_surface_extent() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(200.0, 100.0));

        let (x, y) = screen_to_surface(rect.min, rect, 800, 600);
        assert_eq!((x, y), (0.0, 0.0));

        let (x, y) = screen_to_surface(rect.max, rect, 800, 600);
        assert_eq!((x, y), (800.0, 600.0));
    }
}
