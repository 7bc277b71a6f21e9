// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry transforms applied to selected shapes.
//!
//! Translation shifts the bounds origin (and every path point with it).
//! Resizing is anchored at the shape origin and driven by the pointer's
//! offset from it; circles and text keep the aspect ratio captured when
//! the resize gesture began, text scales its font with the geometric mean
//! of the two scale factors, and paths rescale their points about the
//! origin.

use crate::models::shape::Shape;

/// Shift a shape by `(dx, dy)`.
pub fn translate(shape: &mut Shape, dx: f32, dy: f32) {
    if let Shape::Path { points, .. } = shape {
        for p in points.iter_mut() {
            p[0] += dx;
            p[1] += dy;
        }
    }
    let b = shape.bounds_mut();
    b.x += dx;
    b.y += dy;
}

/// The width/height ratio to hold while resizing, captured at the start
/// of the gesture. Degenerate extents fall back to 1.0 so no NaN can
/// enter shape geometry.
pub fn capture_aspect(shape: &Shape) -> f32 {
    let b = shape.bounds();
    let aspect = b.width / b.height;
    if aspect.is_finite() && aspect != 0.0 {
        aspect
    } else {
        1.0
    }
}

/// Resize so the bottom-right corner tracks the pointer: `new_width` and
/// `new_height` are the pointer's offset from the shape origin. A shape
/// with a zero-extent axis has no defined scale and is left untouched.
pub fn resize(shape: &mut Shape, new_width: f32, new_height: f32, aspect: f32) {
    let b = shape.bounds();
    if b.width == 0.0 || b.height == 0.0 {
        return;
    }
    let scale_x = new_width / b.width;
    let scale_y = new_height / b.height;

    match shape {
        Shape::Circle { bounds, .. } => {
            if new_width.abs() > new_height.abs() {
                bounds.width = new_width;
                bounds.height = new_width / aspect;
            } else {
                bounds.height = new_height;
                bounds.width = new_height * aspect;
            }
        }
        Shape::Text { bounds, font_size, .. } => {
            if new_width.abs() > new_height.abs() {
                bounds.width = new_width;
                bounds.height = new_width / aspect;
            } else {
                bounds.height = new_height;
                bounds.width = new_height * aspect;
            }
            // Geometric mean gives smoother scaling than either axis alone.
            *font_size *= (scale_x * scale_y).abs().sqrt();
        }
        Shape::Path { points, bounds, .. } => {
            for p in points.iter_mut() {
                p[0] = bounds.x + (p[0] - bounds.x) * scale_x;
                p[1] = bounds.y + (p[1] - bounds.y) * scale_y;
            }
            bounds.width = new_width;
            bounds.height = new_height;
        }
        Shape::Rectangle { bounds, .. } | Shape::Image { bounds, .. } => {
            bounds.width = new_width;
            bounds.height = new_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::{BoundingBox, Color};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
        let mut shape = Shape::rectangle_at(x, y, Color::BLACK, 2.0);
        let b = shape.bounds_mut();
        b.width = w;
        b.height = h;
        shape
    }

    #[test]
    fn test_translate_roundtrip_restores_geometry() {
        let mut shape = Shape::path_at(10.0, 10.0, Color::BLACK, 2.0);
        shape.push_point(30.0, 40.0);
        let original_bounds = shape.bounds();

        translate(&mut shape, 17.0, -8.0);
        translate(&mut shape, -17.0, 8.0);

        assert_eq!(shape.bounds(), original_bounds);
        match shape {
            Shape::Path { points, .. } => assert_eq!(points, vec![[10.0, 10.0], [30.0, 40.0]]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_translate_moves_bounds_and_points_together() {
        let mut shape = Shape::path_at(0.0, 0.0, Color::BLACK, 2.0);
        shape.push_point(10.0, 10.0);
        translate(&mut shape, 5.0, 7.0);

        assert_eq!(shape.bounds(), BoundingBox::new(5.0, 7.0, 10.0, 10.0));
        match shape {
            Shape::Path { points, .. } => assert_eq!(points[0], [5.0, 7.0]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rectangle_resize_sets_extent_directly() {
        let mut shape = rect(10.0, 10.0, 20.0, 20.0);
        resize(&mut shape, 55.0, 13.0, 1.0);
        let b = shape.bounds();
        assert_eq!((b.width, b.height), (55.0, 13.0));
        assert_eq!((b.x, b.y), (10.0, 10.0));
    }

    #[test]
    fn test_circle_resize_preserves_captured_aspect() {
        let mut shape = Shape::circle_at(0.0, 0.0, Color::BLACK, 2.0);
        let b = shape.bounds_mut();
        b.width = 40.0;
        b.height = 20.0;
        let aspect = capture_aspect(&shape);
        assert_eq!(aspect, 2.0);

        // Width change dominates: height follows from the aspect.
        resize(&mut shape, 80.0, 30.0, aspect);
        let b = shape.bounds();
        assert_eq!((b.width, b.height), (80.0, 40.0));
    }

    #[test]
    fn test_text_resize_scales_font_by_geometric_mean() {
        let mut shape = Shape::text("hi".into(), 0.0, 0.0, 10.0, 30.0, Color::BLACK);
        let b = shape.bounds_mut();
        b.width = 30.0;
        b.height = 10.0;
        let aspect = capture_aspect(&shape);

        // Doubling both axes doubles the font: sqrt(2 * 2) = 2.
        resize(&mut shape, 60.0, 20.0, aspect);
        match shape {
            Shape::Text { font_size, .. } => assert!((font_size - 20.0).abs() < 1e-4),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_path_resize_rescales_points_about_origin() {
        let mut shape = Shape::path_at(10.0, 10.0, Color::BLACK, 2.0);
        shape.push_point(20.0, 30.0);
        // Bounds are (10, 10, 10, 20); double both axes.
        resize(&mut shape, 20.0, 40.0, 1.0);

        match &shape {
            Shape::Path { points, .. } => {
                assert_eq!(points[0], [10.0, 10.0]);
                assert_eq!(points[1], [30.0, 50.0]);
            }
            _ => unreachable!(),
        }
        let b = shape.bounds();
        assert_eq!((b.width, b.height), (20.0, 40.0));
    }

    #[test]
    fn test_zero_extent_resize_is_noop() {
        let mut shape = rect(5.0, 5.0, 0.0, 10.0);
        resize(&mut shape, 50.0, 50.0, 1.0);
        let b = shape.bounds();
        assert_eq!((b.width, b.height), (0.0, 10.0));
    }

    #[test]
    fn test_capture_aspect_fallback_on_zero_height() {
        let shape = rect(0.0, 0.0, 10.0, 0.0);
        assert_eq!(capture_aspect(&shape), 1.0);
    }
}
