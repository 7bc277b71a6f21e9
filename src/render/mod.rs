// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Software rasterizer for annotation scenes.
//!
//! Draws a scene into an `RgbaImage` exactly as the on-screen overlay
//! shows it: shapes in z-order, the selection box and resize handle when
//! editing, and the cursor dot last. This is the renderer the saved
//! snapshot comes from, so it must be deterministic and idempotent for a
//! given scene and cursor; it never mutates the scene.

pub mod font;

use image::{Rgba, RgbaImage};
use rusttype::{point, Scale};

use crate::editor::hit::HANDLE_SIZE;
use crate::editor::session::Mode;
use crate::models::shape::{BoundingBox, Shape};

const SELECTION_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);
const SELECTION_STROKE: f32 = 2.0;
const CURSOR_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const CURSOR_RADIUS: f32 = 3.0;
const ELLIPSE_SEGMENTS: usize = 64;

/// Rasterize the scene onto a cleared surface of the given size.
pub fn render_scene(
    width: u32,
    height: u32,
    scene: &[Shape],
    selected: Option<usize>,
    mode: Mode,
    cursor: (f32, f32),
) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);

    for (index, shape) in scene.iter().enumerate() {
        draw_shape(&mut img, shape);
        if mode == Mode::Edit && selected == Some(index) {
            draw_selection(&mut img, shape.bounds());
        }
    }

    fill_circle(&mut img, cursor.0, cursor.1, CURSOR_RADIUS, CURSOR_COLOR);
    img
}

fn draw_shape(img: &mut RgbaImage, shape: &Shape) {
    match shape {
        Shape::Path { color, line_width, points, .. } => {
            let rgba = Rgba(color.to_rgba());
            for pair in points.windows(2) {
                stroke_line(img, pair[0][0], pair[0][1], pair[1][0], pair[1][1], *line_width, rgba);
            }
            if points.len() == 1 {
                fill_circle(img, points[0][0], points[0][1], *line_width / 2.0, rgba);
            }
        }
        Shape::Rectangle { bounds, color, line_width } => {
            stroke_rect(img, bounds.normalized(), *line_width, Rgba(color.to_rgba()));
        }
        Shape::Circle { bounds, color, line_width } => {
            stroke_ellipse(img, bounds.normalized(), *line_width, Rgba(color.to_rgba()));
        }
        Shape::Text { bounds, text, color, font_size } => {
            draw_text(img, bounds, text, *font_size, Rgba(color.to_rgba()));
        }
        Shape::Image { bounds, bitmap, .. } => {
            blit_scaled(img, bitmap, bounds.normalized());
        }
    }
}

fn draw_selection(img: &mut RgbaImage, bounds: BoundingBox) {
    stroke_rect(img, bounds, SELECTION_STROKE, SELECTION_COLOR);
    let handle = BoundingBox::new(
        bounds.x + bounds.width - HANDLE_SIZE,
        bounds.y + bounds.height - HANDLE_SIZE,
        HANDLE_SIZE,
        HANDLE_SIZE,
    );
    fill_rect(img, handle.normalized(), SELECTION_COLOR);
}

/// Text draws with its baseline at the bottom edge of the bounds. Without
/// a usable system font the bounding outline stands in for the glyphs.
fn draw_text(img: &mut RgbaImage, bounds: &BoundingBox, text: &str, font_size: f32, color: Rgba<u8>) {
    let Some(face) = font::default_font() else {
        stroke_rect(img, bounds.normalized(), 1.0, color);
        return;
    };

    let scale = Scale::uniform(font_size);
    let baseline = point(bounds.x, bounds.y + bounds.height);
    for glyph in face.layout(text, scale, baseline) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                blend_pixel(img, x, y, color, coverage);
            });
        }
    }
}

fn blit_scaled(img: &mut RgbaImage, bitmap: &RgbaImage, bounds: BoundingBox) {
    if bitmap.width() == 0 || bitmap.height() == 0 || bounds.width < 1.0 || bounds.height < 1.0 {
        return;
    }
    let x0 = bounds.x.floor() as i32;
    let y0 = bounds.y.floor() as i32;
    let w = bounds.width.round() as i32;
    let h = bounds.height.round() as i32;

    for ty in 0..h {
        for tx in 0..w {
            let sx = (tx as f32 / w as f32 * bitmap.width() as f32) as u32;
            let sy = (ty as f32 / h as f32 * bitmap.height() as f32) as u32;
            let sx = sx.min(bitmap.width() - 1);
            let sy = sy.min(bitmap.height() - 1);
            let src = *bitmap.get_pixel(sx, sy);
            blend_pixel(img, x0 + tx, y0 + ty, src, src.0[3] as f32 / 255.0);
        }
    }
}

fn stroke_rect(img: &mut RgbaImage, b: BoundingBox, width: f32, color: Rgba<u8>) {
    let (x0, y0) = (b.x, b.y);
    let (x1, y1) = (b.x + b.width, b.y + b.height);
    stroke_line(img, x0, y0, x1, y0, width, color);
    stroke_line(img, x1, y0, x1, y1, width, color);
    stroke_line(img, x1, y1, x0, y1, width, color);
    stroke_line(img, x0, y1, x0, y0, width, color);
}

fn fill_rect(img: &mut RgbaImage, b: BoundingBox, color: Rgba<u8>) {
    let x0 = b.x.round() as i32;
    let y0 = b.y.round() as i32;
    let x1 = (b.x + b.width).round() as i32;
    let y1 = (b.y + b.height).round() as i32;
    for y in y0..y1 {
        for x in x0..x1 {
            set_pixel(img, x, y, color);
        }
    }
}

fn stroke_ellipse(img: &mut RgbaImage, b: BoundingBox, width: f32, color: Rgba<u8>) {
    let cx = b.x + b.width / 2.0;
    let cy = b.y + b.height / 2.0;
    let rx = b.width / 2.0;
    let ry = b.height / 2.0;

    let mut prev: Option<(f32, f32)> = None;
    for i in 0..=ELLIPSE_SEGMENTS {
        let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
        let x = cx + rx * theta.cos();
        let y = cy + ry * theta.sin();
        if let Some((px, py)) = prev {
            stroke_line(img, px, py, x, y, width, color);
        }
        prev = Some((x, y));
    }
}

/// Stamp a round brush along the segment.
fn stroke_line(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba<u8>) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    let radius = (width / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        fill_circle(img, x0 + dx * t, y0 + dy * t, radius, color);
    }
}

fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let r2 = radius * radius;
    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                set_pixel(img, x, y, color);
            }
        }
    }
}

fn set_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Source-over blend of `color` at `alpha` onto the pixel.
fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, alpha: f32) {
    if alpha <= 0.0 || x < 0 || y < 0 || (x as u32) >= img.width() || (y as u32) >= img.height() {
        return;
    }
    let alpha = alpha.min(1.0);
    let dst = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let src = color.0[c] as f32;
        let out = src * alpha + dst.0[c] as f32 * (1.0 - alpha);
        dst.0[c] = out.round() as u8;
    }
    let out_a = alpha + dst.0[3] as f32 / 255.0 * (1.0 - alpha);
    dst.0[3] = (out_a * 255.0).round() as u8;
}
