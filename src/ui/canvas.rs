// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video canvas area.
//!
//! Displays the current frame with whatever is stacked on top of it:
//! the timed annotation overlay during playback, the focus spotlight,
//! and the live drawing surface while an editor session is open. The
//! live surface mirrors `crate::render` through egui's painter; the
//! raster renderer stays the source of truth for saved snapshots.

use std::collections::HashMap;

use crate::editor::hit::HANDLE_SIZE;
use crate::editor::session::{EditorSession, Mode};
use crate::models::shape::Shape;
use crate::util::geometry;

const SELECTION_COLOR: egui::Color32 = egui::Color32::BLUE;
const CURSOR_COLOR: egui::Color32 = egui::Color32::RED;
const ELLIPSE_SEGMENTS: usize = 64;
const SPOTLIGHT_INNER_RADIUS: f32 = 50.0;
const SPOTLIGHT_OUTER_RADIUS: f32 = 300.0;
const SPOTLIGHT_SEGMENTS: u32 = 48;

/// Where the spotlight overlay gets its center from.
pub enum Spotlight {
    /// Follow the live pointer (focus mode / recording).
    Pointer,
    /// A recorded coordinate, relative to the video rect (playback).
    Video(f32, f32),
}

/// Per-frame canvas report back to the app.
pub struct CanvasOutput {
    pub video_rect: egui::Rect,
    /// Latest pointer position relative to the video rect origin. May be
    /// outside the rect; focus recordings keep such samples.
    pub pointer: Option<egui::Pos2>,
}

/// Display the video area and, when a session is open, feed pointer
/// events into it.
pub fn show(
    ui: &mut egui::Ui,
    frame_texture: &Option<egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
    overlay_texture: Option<&egui::TextureHandle>,
    spotlight: Option<Spotlight>,
    mut session: Option<&mut EditorSession>,
    shape_textures: &mut HashMap<u64, egui::TextureHandle>,
) -> CanvasOutput {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available = ui.available_size();
    let video_rect = fit_video_rect(ui.min_rect().min, available, frame_size);

    // Backdrop: the loaded frame, or a placeholder slate.
    if let Some(texture) = frame_texture {
        ui.painter().image(
            texture.id(),
            video_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    } else {
        ui.painter()
            .rect_filled(video_rect, 0.0, egui::Color32::from_gray(20));
        ui.painter().text(
            video_rect.center(),
            egui::Align2::CENTER_CENTER,
            "Open a frame image to begin (File menu)",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(150),
        );
    }

    if let Some(session) = session.as_deref_mut() {
        handle_session_input(ui, session, video_rect);
        paint_session(ui, session, video_rect, shape_textures);
    } else if let Some(texture) = overlay_texture {
        // The persistent annotation overlay stretches across the whole
        // video rect, whatever the snapshot's pixel size.
        ui.painter().image(
            texture.id(),
            video_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let pointer_screen = ui.ctx().pointer_latest_pos();
    if let Some(center) = spotlight.and_then(|s| match s {
        Spotlight::Pointer => pointer_screen,
        Spotlight::Video(x, y) => Some(video_rect.min + egui::vec2(x, y)),
    }) {
        paint_spotlight(ui, video_rect, center);
    }

    CanvasOutput {
        video_rect,
        pointer: pointer_screen.map(|p| (p - video_rect.min).to_pos2()),
    }
}

/// Scale-to-fit placement of the video inside the available space,
/// centered, defaulting to 16:9 when no frame is loaded.
fn fit_video_rect(
    origin: egui::Pos2,
    available: egui::Vec2,
    frame_size: Option<(u32, u32)>,
) -> egui::Rect {
    let aspect = match frame_size {
        Some((w, h)) if h > 0 => w as f32 / h as f32,
        _ => 16.0 / 9.0,
    };
    let available_aspect = available.x / available.y;

    let (width, height) = if aspect > available_aspect {
        (available.x, available.x / aspect)
    } else {
        (available.y * aspect, available.y)
    };

    let offset = egui::vec2((available.x - width) / 2.0, (available.y - height) / 2.0);
    egui::Rect::from_min_size(origin + offset, egui::vec2(width, height))
}

fn handle_session_input(ui: &mut egui::Ui, session: &mut EditorSession, video_rect: egui::Rect) {
    let (sw, sh) = session.surface_size();
    let response = ui.allocate_rect(video_rect, egui::Sense::drag());

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = geometry::screen_to_surface(pos, video_rect, sw, sh);
            session.pointer_down(x, y);
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = geometry::screen_to_surface(pos, video_rect, sw, sh);
            session.pointer_move(x, y);
        }
    } else if let Some(pos) = response.hover_pos() {
        // Tracks the cursor dot between strokes; no gesture is active.
        let (x, y) = geometry::screen_to_surface(pos, video_rect, sw, sh);
        session.pointer_move(x, y);
    }

    if response.drag_stopped() {
        session.pointer_up();
    }
}

fn paint_session(
    ui: &mut egui::Ui,
    session: &EditorSession,
    video_rect: egui::Rect,
    shape_textures: &mut HashMap<u64, egui::TextureHandle>,
) {
    let painter = ui.painter().with_clip_rect(video_rect);
    let (sw, sh) = session.surface_size();
    let scale = (video_rect.width() / sw as f32 + video_rect.height() / sh as f32) / 2.0;
    let map = |x: f32, y: f32| geometry::surface_to_screen(x, y, video_rect, sw, sh);

    for (index, shape) in session.scene().iter().enumerate() {
        paint_shape(ui.ctx(), &painter, shape, video_rect, sw, sh, scale, shape_textures);

        if session.mode() == Mode::Edit && session.selected() == Some(index) {
            let b = shape.bounds();
            let outline =
                egui::Rect::from_two_pos(map(b.x, b.y), map(b.x + b.width, b.y + b.height));
            painter.rect_stroke(outline, 0.0, egui::Stroke::new(2.0, SELECTION_COLOR));
            let handle = egui::Rect::from_two_pos(
                map(b.x + b.width - HANDLE_SIZE, b.y + b.height - HANDLE_SIZE),
                map(b.x + b.width, b.y + b.height),
            );
            painter.rect_filled(handle, 0.0, SELECTION_COLOR);
        }
    }

    let (cx, cy) = session.cursor();
    painter.circle_filled(map(cx, cy), 3.0 * scale, CURSOR_COLOR);
}

fn paint_shape(
    ctx: &egui::Context,
    painter: &egui::Painter,
    shape: &Shape,
    video_rect: egui::Rect,
    sw: u32,
    sh: u32,
    scale: f32,
    shape_textures: &mut HashMap<u64, egui::TextureHandle>,
) {
    let map = |x: f32, y: f32| geometry::surface_to_screen(x, y, video_rect, sw, sh);

    match shape {
        Shape::Path { color, line_width, points, .. } => {
            let stroke = egui::Stroke::new(
                line_width * scale,
                egui::Color32::from_rgb(color.0, color.1, color.2),
            );
            let screen: Vec<egui::Pos2> = points.iter().map(|p| map(p[0], p[1])).collect();
            painter.add(egui::Shape::line(screen, stroke));
        }
        Shape::Rectangle { bounds, color, line_width } => {
            let b = bounds.normalized();
            let rect = egui::Rect::from_two_pos(map(b.x, b.y), map(b.x + b.width, b.y + b.height));
            painter.rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(
                    line_width * scale,
                    egui::Color32::from_rgb(color.0, color.1, color.2),
                ),
            );
        }
        Shape::Circle { bounds, color, line_width } => {
            let b = bounds.normalized();
            let (cx, cy) = (b.x + b.width / 2.0, b.y + b.height / 2.0);
            let (rx, ry) = (b.width / 2.0, b.height / 2.0);
            let points: Vec<egui::Pos2> = (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                    map(cx + rx * theta.cos(), cy + ry * theta.sin())
                })
                .collect();
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(
                    line_width * scale,
                    egui::Color32::from_rgb(color.0, color.1, color.2),
                ),
            ));
        }
        Shape::Text { bounds, text, color, font_size } => {
            painter.text(
                map(bounds.x, bounds.y + bounds.height),
                egui::Align2::LEFT_BOTTOM,
                text,
                egui::FontId::proportional(font_size * scale),
                egui::Color32::from_rgb(color.0, color.1, color.2),
            );
        }
        Shape::Image { id, bounds, bitmap } => {
            if bitmap.width() == 0 || bitmap.height() == 0 {
                return;
            }
            let texture = shape_textures.entry(*id).or_insert_with(|| {
                let size = [bitmap.width() as usize, bitmap.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, bitmap.as_raw());
                ctx.load_texture(
                    format!("shape_image_{id}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            });
            let b = bounds.normalized();
            let rect = egui::Rect::from_two_pos(map(b.x, b.y), map(b.x + b.width, b.y + b.height));
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }
}

/// Dim everything but a circle around `center`: a radial mesh fading
/// from clear at the inner radius to dark at the outer one, held dark
/// out to the corners.
fn paint_spotlight(ui: &mut egui::Ui, video_rect: egui::Rect, center: egui::Pos2) {
    let painter = ui.painter().with_clip_rect(video_rect);
    let clear = egui::Color32::TRANSPARENT;
    let dark = egui::Color32::from_black_alpha(178);
    let far = video_rect.size().length().max(SPOTLIGHT_OUTER_RADIUS + 1.0);

    let mut mesh = egui::Mesh::default();
    for i in 0..=SPOTLIGHT_SEGMENTS {
        let theta = i as f32 / SPOTLIGHT_SEGMENTS as f32 * std::f32::consts::TAU;
        let dir = egui::vec2(theta.cos(), theta.sin());
        mesh.colored_vertex(center + dir * SPOTLIGHT_INNER_RADIUS, clear);
        mesh.colored_vertex(center + dir * SPOTLIGHT_OUTER_RADIUS, dark);
        mesh.colored_vertex(center + dir * far, dark);
    }
    for i in 0..SPOTLIGHT_SEGMENTS {
        let base = i * 3;
        // Inner fading ring.
        mesh.add_triangle(base, base + 1, base + 3);
        mesh.add_triangle(base + 1, base + 4, base + 3);
        // Solid outer shell.
        mesh.add_triangle(base + 1, base + 2, base + 4);
        mesh.add_triangle(base + 2, base + 5, base + 4);
    }
    painter.add(egui::Shape::mesh(mesh));
}
