// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer hit-testing against shapes.
//!
//! Paths hit within a fixed tolerance of any recorded point (a coarse
//! "near the stroke" test); every other kind hits on its axis-aligned
//! bounding box, which over-approximates circles and text glyphs.

use crate::models::shape::Shape;

/// How close the pointer must be to a path point to count as a hit, px.
pub const PATH_TOLERANCE: f32 = 5.0;

/// Side length of the resize handle square, px.
pub const HANDLE_SIZE: f32 = 10.0;

/// Whether `(x, y)` hits `shape`.
pub fn contains_point(shape: &Shape, x: f32, y: f32) -> bool {
    match shape {
        Shape::Path { points, .. } => points
            .iter()
            .any(|p| (p[0] - x).abs() < PATH_TOLERANCE && (p[1] - y).abs() < PATH_TOLERANCE),
        _ => {
            let b = shape.bounds();
            x >= b.x && x <= b.x + b.width && y >= b.y && y <= b.y + b.height
        }
    }
}

/// Whether `(x, y)` falls on the resize handle anchored inside the
/// bottom-right corner of the shape's bounds.
pub fn on_resize_handle(shape: &Shape, x: f32, y: f32) -> bool {
    let b = shape.bounds();
    x >= b.x + b.width - HANDLE_SIZE
        && x <= b.x + b.width
        && y >= b.y + b.height - HANDLE_SIZE
        && y <= b.y + b.height
}

/// The topmost shape under `(x, y)`: the full scene is scanned and the
/// last (most recently inserted) match wins.
pub fn resolve_hit(scene: &[Shape], x: f32, y: f32) -> Option<usize> {
    scene
        .iter()
        .enumerate()
        .filter(|(_, shape)| contains_point(shape, x, y))
        .map(|(index, _)| index)
        .last()
}
