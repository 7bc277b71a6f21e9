// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The drawing-session state machine.
//!
//! A session owns the scene being drawn over a paused video frame and
//! interprets pointer input according to the current tool and mode.
//! Exactly one pointer sub-state (drawing, dragging, resizing) can be
//! active at a time, and only while the button is held; pointer-up always
//! returns to idle. Saving rasterizes the surface and hands back an
//! annotation record; the caller owns session open/close and playback.

use image::RgbaImage;

use crate::editor::{hit, transform};
use crate::models::annotation::AnnotationRecord;
use crate::models::shape::{Color, Shape};
use crate::render;

/// What pointer-down does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Draw,
    Edit,
    Delete,
}

/// What draw mode creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pencil,
    Rectangle,
    Circle,
    Text,
    Image,
}

/// Active pointer sub-state. Mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Drawing,
    Dragging { anchor: (f32, f32) },
    Resizing { aspect: f32 },
}

/// One open drawing session over a video frame.
pub struct EditorSession {
    surface_width: u32,
    surface_height: u32,
    scene: Vec<Shape>,
    mode: Mode,
    tool: Tool,
    color: Color,
    line_width: f32,
    selected: Option<usize>,
    gesture: Gesture,
    cursor: (f32, f32),
    next_image_id: u64,
}

impl EditorSession {
    /// Open a session over a surface of the given pixel size. Tool and
    /// mode start at pencil/draw.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            scene: Vec::new(),
            mode: Mode::Draw,
            tool: Tool::Pencil,
            color: Color::BLACK,
            line_width: 2.0,
            selected: None,
            gesture: Gesture::Idle,
            cursor: (0.0, 0.0),
            next_image_id: 0,
        }
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }

    pub fn scene(&self) -> &[Shape] {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Whether a pointer sub-state is active (button held).
    pub fn gesture_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Pointer button pressed at surface coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        match self.mode {
            Mode::Draw => self.begin_drawing(x, y),
            Mode::Edit => self.begin_editing(x, y),
            Mode::Delete => self.delete_at(x, y),
        }
    }

    fn begin_drawing(&mut self, x: f32, y: f32) {
        let shape = match self.tool {
            Tool::Pencil => Shape::path_at(x, y, self.color, self.line_width),
            Tool::Rectangle => Shape::rectangle_at(x, y, self.color, self.line_width),
            Tool::Circle => Shape::circle_at(x, y, self.color, self.line_width),
            // Text and images are placed through their own commands.
            Tool::Text | Tool::Image => return,
        };
        self.scene.push(shape);
        self.gesture = Gesture::Drawing;
    }

    fn begin_editing(&mut self, x: f32, y: f32) {
        self.selected = hit::resolve_hit(&self.scene, x, y);
        if let Some(index) = self.selected {
            let shape = &self.scene[index];
            if hit::on_resize_handle(shape, x, y) {
                self.gesture = Gesture::Resizing {
                    aspect: transform::capture_aspect(shape),
                };
            } else {
                self.gesture = Gesture::Dragging { anchor: (x, y) };
            }
            log::info!("Selected {} at index {}", shape.kind(), index);
        }
    }

    fn delete_at(&mut self, x: f32, y: f32) {
        if let Some(index) = hit::resolve_hit(&self.scene, x, y) {
            let removed = self.scene.remove(index);
            log::info!("Deleted {}, {} shapes left", removed.kind(), self.scene.len());
        }
        self.selected = None;
    }

    /// Pointer moved; extends the active gesture. Events must arrive in
    /// delivery order: drags are applied as deltas from the previous one.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing => {
                if let Some(shape) = self.scene.last_mut() {
                    match shape {
                        Shape::Path { .. } => shape.push_point(x, y),
                        _ => {
                            let b = shape.bounds_mut();
                            b.width = x - b.x;
                            b.height = y - b.y;
                        }
                    }
                }
            }
            Gesture::Dragging { anchor } => {
                if let Some(index) = self.selected {
                    transform::translate(&mut self.scene[index], x - anchor.0, y - anchor.1);
                }
                self.gesture = Gesture::Dragging { anchor: (x, y) };
            }
            Gesture::Resizing { aspect } => {
                if let Some(index) = self.selected {
                    let b = self.scene[index].bounds();
                    transform::resize(&mut self.scene[index], x - b.x, y - b.y, aspect);
                }
            }
        }
    }

    /// Pointer button released: all sub-states end, whatever was active.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Switch the drawing tool. Ignored while a gesture is active;
    /// otherwise drops the selection and returns to draw mode.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.gesture_active() {
            return;
        }
        self.tool = tool;
        self.mode = Mode::Draw;
        self.selected = None;
    }

    /// Switch the pointer mode. Ignored while a gesture is active.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.gesture_active() {
            return;
        }
        self.mode = mode;
    }

    /// New stroke color; also recolors the selected shape.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        if let Some(index) = self.selected {
            self.scene[index].set_color(color);
        }
    }

    /// New stroke width; also restrokes the selected shape.
    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
        if let Some(index) = self.selected {
            self.scene[index].set_line_width(line_width);
        }
    }

    /// Place a text shape at the center of the surface. The font size
    /// follows the brush width.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let font_size = self.line_width * 5.0;
        let (width, _) = render::font::measure_text(text, font_size);
        self.scene.push(Shape::text(
            text.to_string(),
            self.surface_width as f32 / 2.0,
            self.surface_height as f32 / 2.0,
            font_size,
            width,
            self.color,
        ));
    }

    /// Place an uploaded image centered on the surface at intrinsic size.
    pub fn insert_image(&mut self, bitmap: RgbaImage) {
        self.next_image_id += 1;
        let x = self.surface_width as f32 / 2.0 - bitmap.width() as f32 / 2.0;
        let y = self.surface_height as f32 / 2.0 - bitmap.height() as f32 / 2.0;
        self.scene.push(Shape::image(self.next_image_id, bitmap, x, y));
    }

    /// Rasterize the surface as it currently shows and build the saved
    /// record for `video_time`. The session itself stays open; the caller
    /// closes it after handing the record to the timeline.
    pub fn save(&self, video_time: f64) -> AnnotationRecord {
        let raster = render::render_scene(
            self.surface_width,
            self.surface_height,
            &self.scene,
            self.selected,
            self.mode,
            self.cursor,
        );
        AnnotationRecord::new(video_time, raster, self.scene.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(200, 100)
    }

    #[test]
    fn test_rectangle_drag_scenario() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(10.0, 10.0);
        s.pointer_move(30.0, 25.0);
        s.pointer_move(60.0, 40.0);
        s.pointer_up();

        let b = s.scene()[0].bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (10.0, 10.0, 50.0, 30.0));
        assert!(!s.gesture_active());
    }

    #[test]
    fn test_pencil_collects_points_in_order() {
        let mut s = session();
        s.pointer_down(5.0, 5.0);
        s.pointer_move(6.0, 7.0);
        s.pointer_move(9.0, 4.0);
        s.pointer_up();

        match &s.scene()[0] {
            Shape::Path { points, .. } => {
                assert_eq!(points, &vec![[5.0, 5.0], [6.0, 7.0], [9.0, 4.0]]);
            }
            other => panic!("expected path, got {}", other.kind()),
        }
    }

    #[test]
    fn test_edit_drag_translates_incrementally() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(10.0, 10.0);
        s.pointer_move(40.0, 40.0);
        s.pointer_up();

        s.set_mode(Mode::Edit);
        s.pointer_down(20.0, 20.0);
        assert_eq!(s.selected(), Some(0));
        s.pointer_move(25.0, 22.0);
        s.pointer_move(28.0, 30.0);
        s.pointer_up();

        let b = s.scene()[0].bounds();
        assert_eq!((b.x, b.y), (18.0, 20.0));
        assert_eq!((b.width, b.height), (30.0, 30.0));
    }

    #[test]
    fn test_edit_resize_from_handle() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(10.0, 10.0);
        s.pointer_move(50.0, 50.0);
        s.pointer_up();

        s.set_mode(Mode::Edit);
        // Bottom-right corner is (50, 50); the handle square covers it.
        s.pointer_down(48.0, 48.0);
        s.pointer_move(90.0, 70.0);
        s.pointer_up();

        let b = s.scene()[0].bounds();
        assert_eq!((b.width, b.height), (80.0, 60.0));
        assert_eq!((b.x, b.y), (10.0, 10.0));
    }

    #[test]
    fn test_circle_resize_keeps_aspect_from_gesture_start() {
        let mut s = session();
        s.set_tool(Tool::Circle);
        s.pointer_down(0.0, 0.0);
        s.pointer_move(40.0, 20.0);
        s.pointer_up();

        s.set_mode(Mode::Edit);
        s.pointer_down(38.0, 18.0); // handle region of the 40x20 bounds
        s.pointer_move(80.0, 30.0);
        s.pointer_up();

        let b = s.scene()[0].bounds();
        // Width change dominates; height follows the captured 2:1 aspect.
        assert_eq!((b.width, b.height), (80.0, 40.0));
    }

    #[test]
    fn test_delete_mode_removes_topmost_hit() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(10.0, 10.0);
        s.pointer_move(60.0, 60.0);
        s.pointer_up();
        s.pointer_down(20.0, 20.0);
        s.pointer_move(70.0, 70.0);
        s.pointer_up();
        assert_eq!(s.scene().len(), 2);

        s.set_mode(Mode::Delete);
        s.pointer_down(30.0, 30.0);
        s.pointer_up();

        assert_eq!(s.scene().len(), 1);
        assert_eq!(s.selected(), None);
        // The survivor is the first-drawn rectangle.
        assert_eq!(s.scene()[0].bounds().x, 10.0);
    }

    #[test]
    fn test_delete_on_empty_canvas_is_noop() {
        let mut s = session();
        s.set_mode(Mode::Delete);
        s.pointer_down(30.0, 30.0);
        s.pointer_up();
        assert!(s.scene().is_empty());
    }

    #[test]
    fn test_tool_switch_ignored_mid_gesture() {
        let mut s = session();
        s.pointer_down(5.0, 5.0);
        s.set_tool(Tool::Circle);
        assert_eq!(s.tool(), Tool::Pencil);
        s.set_mode(Mode::Delete);
        assert_eq!(s.mode(), Mode::Draw);
        s.pointer_up();
        s.set_tool(Tool::Circle);
        assert_eq!(s.tool(), Tool::Circle);
    }

    #[test]
    fn test_tool_switch_clears_selection_and_mode() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(0.0, 0.0);
        s.pointer_move(30.0, 30.0);
        s.pointer_up();
        s.set_mode(Mode::Edit);
        s.pointer_down(10.0, 10.0);
        s.pointer_up();
        assert_eq!(s.selected(), Some(0));

        s.set_tool(Tool::Pencil);
        assert_eq!(s.selected(), None);
        assert_eq!(s.mode(), Mode::Draw);
    }

    #[test]
    fn test_save_builds_three_second_record() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(10.0, 10.0);
        s.pointer_move(40.0, 30.0);
        s.pointer_up();

        let record = s.save(12.0);
        assert_eq!(record.start_time, 12.0);
        assert_eq!(record.end_time, 15.0);
        assert_eq!(record.shapes.len(), 1);
        assert_eq!(record.raster.dimensions(), (200, 100));
    }

    #[test]
    fn test_insert_text_centers_and_sizes_from_brush() {
        let mut s = session();
        s.set_line_width(4.0);
        s.insert_text("note");
        s.insert_text("");

        assert_eq!(s.scene().len(), 1);
        match &s.scene()[0] {
            Shape::Text { bounds, font_size, .. } => {
                assert_eq!(*font_size, 20.0);
                assert_eq!((bounds.x, bounds.y), (100.0, 50.0));
                assert_eq!(bounds.height, 20.0);
            }
            other => panic!("expected text, got {}", other.kind()),
        }
    }

    #[test]
    fn test_insert_image_centers_at_intrinsic_size() {
        let mut s = session();
        s.insert_image(RgbaImage::new(40, 20));

        let b = s.scene()[0].bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (80.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn test_color_change_applies_to_selection() {
        let mut s = session();
        s.set_tool(Tool::Rectangle);
        s.pointer_down(0.0, 0.0);
        s.pointer_move(30.0, 30.0);
        s.pointer_up();
        s.set_mode(Mode::Edit);
        s.pointer_down(10.0, 10.0);
        s.pointer_up();

        s.set_color(Color(0, 128, 0));
        match &s.scene()[0] {
            Shape::Rectangle { color, .. } => assert_eq!(*color, Color(0, 128, 0)),
            other => panic!("expected rectangle, got {}", other.kind()),
        }
    }
}
