// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape data structures.
//!
//! This module defines the tagged shape union used by the drawing editor:
//! freehand paths, rectangles, circles (bounding ellipses), text runs, and
//! placed images. Shapes are pure data; hit-testing and transforms live in
//! `crate::editor`.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// An RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| format!("color {value:?} is missing the '#' prefix"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("color {value:?} is not #rrggbb"));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("color {value:?}: {e}"))
        };
        Ok(Color(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_hex()
    }
}

/// Axis-aligned bounding box. Width and height may be negative while a
/// drag gesture is in flight; consumers normalize where they need to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The box with non-negative width/height and adjusted origin.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self { x, y, width, height }
    }

    /// Widen the box so it covers `(x, y)`.
    pub fn include(&mut self, x: f32, y: f32) {
        let min_x = self.x.min(x);
        let min_y = self.y.min(y);
        let max_x = (self.x + self.width).max(x);
        let max_y = (self.y + self.height).max(y);
        self.x = min_x;
        self.y = min_y;
        self.width = max_x - min_x;
        self.height = max_y - min_y;
    }
}

/// A drawable annotation shape.
///
/// The serialized form mirrors the on-canvas object layout: a `type` tag
/// plus camelCase geometry fields. Image pixel data never round-trips
/// through the shape itself; annotations flatten to a raster on export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Path {
        color: Color,
        #[serde(rename = "lineWidth")]
        line_width: f32,
        points: Vec<[f32; 2]>,
        #[serde(flatten)]
        bounds: BoundingBox,
    },
    Rectangle {
        #[serde(flatten)]
        bounds: BoundingBox,
        color: Color,
        #[serde(rename = "lineWidth")]
        line_width: f32,
    },
    Circle {
        #[serde(flatten)]
        bounds: BoundingBox,
        color: Color,
        #[serde(rename = "lineWidth")]
        line_width: f32,
    },
    Text {
        #[serde(flatten)]
        bounds: BoundingBox,
        text: String,
        color: Color,
        #[serde(rename = "fontSize")]
        font_size: f32,
    },
    Image {
        id: u64,
        #[serde(flatten)]
        bounds: BoundingBox,
        #[serde(skip, default = "empty_bitmap")]
        bitmap: RgbaImage,
    },
}

fn empty_bitmap() -> RgbaImage {
    RgbaImage::new(0, 0)
}

impl Shape {
    /// Seed a freehand path at its first point.
    pub fn path_at(x: f32, y: f32, color: Color, line_width: f32) -> Self {
        Shape::Path {
            color,
            line_width,
            points: vec![[x, y]],
            bounds: BoundingBox::new(x, y, 0.0, 0.0),
        }
    }

    /// Seed a rectangle with zero extent at the pointer.
    pub fn rectangle_at(x: f32, y: f32, color: Color, line_width: f32) -> Self {
        Shape::Rectangle {
            bounds: BoundingBox::new(x, y, 0.0, 0.0),
            color,
            line_width,
        }
    }

    /// Seed a circle (bounding ellipse) with zero extent at the pointer.
    pub fn circle_at(x: f32, y: f32, color: Color, line_width: f32) -> Self {
        Shape::Circle {
            bounds: BoundingBox::new(x, y, 0.0, 0.0),
            color,
            line_width,
        }
    }

    pub fn text(text: String, x: f32, y: f32, font_size: f32, width: f32, color: Color) -> Self {
        Shape::Text {
            bounds: BoundingBox::new(x, y, width, font_size),
            text,
            color,
            font_size,
        }
    }

    pub fn image(id: u64, bitmap: RgbaImage, x: f32, y: f32) -> Self {
        let bounds = BoundingBox::new(x, y, bitmap.width() as f32, bitmap.height() as f32);
        Shape::Image { id, bounds, bitmap }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Path { bounds, .. }
            | Shape::Rectangle { bounds, .. }
            | Shape::Circle { bounds, .. }
            | Shape::Text { bounds, .. }
            | Shape::Image { bounds, .. } => *bounds,
        }
    }

    pub fn bounds_mut(&mut self) -> &mut BoundingBox {
        match self {
            Shape::Path { bounds, .. }
            | Shape::Rectangle { bounds, .. }
            | Shape::Circle { bounds, .. }
            | Shape::Text { bounds, .. }
            | Shape::Image { bounds, .. } => bounds,
        }
    }

    /// Append a point to a path, widening its bounds; no-op for other kinds.
    pub fn push_point(&mut self, x: f32, y: f32) {
        if let Shape::Path { points, bounds, .. } = self {
            points.push([x, y]);
            bounds.include(x, y);
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Path { color: c, .. }
            | Shape::Rectangle { color: c, .. }
            | Shape::Circle { color: c, .. }
            | Shape::Text { color: c, .. } => *c = color,
            Shape::Image { .. } => {}
        }
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        match self {
            Shape::Path { line_width: w, .. }
            | Shape::Rectangle { line_width: w, .. }
            | Shape::Circle { line_width: w, .. } => *w = line_width,
            Shape::Text { .. } | Shape::Image { .. } => {}
        }
    }

    /// Variant name for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Path { .. } => "path",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Circle { .. } => "circle",
            Shape::Text { .. } => "text",
            Shape::Image { .. } => "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color(0x4c, 0xaf, 0x50);
        assert_eq!(color.to_hex(), "#4caf50");
        assert_eq!(Color::try_from("#4caf50".to_string()).unwrap(), color);
        assert!(Color::try_from("4caf50".to_string()).is_err());
        assert!(Color::try_from("#4caf5".to_string()).is_err());
        assert!(Color::try_from("#aaaéa".to_string()).is_err());
    }

    #[test]
    fn test_path_bounds_are_tight_box_of_points() {
        let mut shape = Shape::path_at(10.0, 20.0, Color::BLACK, 2.0);
        let moves = [(15.0, 5.0), (3.0, 22.0), (40.0, 18.0), (12.0, 12.0)];
        for (x, y) in moves {
            shape.push_point(x, y);
        }

        let points = match &shape {
            Shape::Path { points, .. } => points.clone(),
            _ => unreachable!(),
        };
        let min_x = points.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
        let min_y = points.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
        let max_y = points.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);

        let bounds = shape.bounds();
        assert_eq!(bounds.x, min_x);
        assert_eq!(bounds.y, min_y);
        assert_eq!(bounds.width, max_x - min_x);
        assert_eq!(bounds.height, max_y - min_y);
    }

    #[test]
    fn test_path_seed_has_zero_extent() {
        let shape = Shape::path_at(7.0, 9.0, Color::BLACK, 1.0);
        let bounds = shape.bounds();
        assert_eq!((bounds.width, bounds.height), (0.0, 0.0));
        assert_eq!((bounds.x, bounds.y), (7.0, 9.0));
    }

    #[test]
    fn test_normalized_flips_negative_extent() {
        let bounds = BoundingBox::new(50.0, 30.0, -20.0, -10.0).normalized();
        assert_eq!(bounds, BoundingBox::new(30.0, 20.0, 20.0, 10.0));
    }

    #[test]
    fn test_shape_serializes_with_type_tag() {
        let shape = Shape::rectangle_at(1.0, 2.0, Color(255, 0, 0), 3.0);
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["lineWidth"], 3.0);
        assert_eq!(json["color"], "#ff0000");
        assert_eq!(json["x"], 1.0);
    }

    #[test]
    fn test_set_line_width_skips_text_and_image() {
        let mut shape = Shape::text("hi".into(), 0.0, 0.0, 10.0, 12.0, Color::BLACK);
        shape.set_line_width(9.0);
        match shape {
            Shape::Text { font_size, .. } => assert_eq!(font_size, 10.0),
            _ => unreachable!(),
        }
    }
}
