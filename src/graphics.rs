//! Render boundary
//!
//! Two layers: [`RenderSink`] is the draw-primitive surface entity code
//! sees during the render phase; [`RenderBackend`] adds the frame control
//! only the driver touches. Backends require single-thread affinity, so
//! every call on both traits is issued from the calling thread during the
//! render phase only.

use glam::Vec2;

/// RGBA color, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Primitive draw-call sink over a fixed 2D coordinate space
pub trait RenderSink {
    fn draw_rect(&mut self, position: Vec2, size: Vec2, color: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, segments: u32, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color, font_size: u32);

    fn draw_image(&mut self, path: &str, position: Vec2, size: Vec2);

    /// Coordinate space width in pixels
    fn width(&self) -> u32;

    /// Coordinate space height in pixels
    fn height(&self) -> u32;
}

/// Full backend surface consumed by the frame driver
pub trait RenderBackend: RenderSink {
    fn begin_frame(&mut self);

    fn end_frame(&mut self);

    /// Pump the backend's event queue; called once per frame after render
    fn poll_events(&mut self);

    /// Whether the host window asked to close
    fn should_close(&self) -> bool;
}

/// Backend that draws nothing; for headless runs and tests
#[derive(Debug, Clone)]
pub struct NullRenderer {
    width: u32,
    height: u32,
    closing: bool,
}

impl NullRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            closing: false,
        }
    }

    /// Request close on the next poll
    pub fn close(&mut self) {
        self.closing = true;
    }
}

impl RenderSink for NullRenderer {
    fn draw_rect(&mut self, _position: Vec2, _size: Vec2, _color: Color) {}

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _segments: u32, _color: Color) {}

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}

    fn draw_text(&mut self, _text: &str, _position: Vec2, _color: Color, _font_size: u32) {}

    fn draw_image(&mut self, _path: &str, _position: Vec2, _size: Vec2) {}

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {}

    fn poll_events(&mut self) {}

    fn should_close(&self) -> bool {
        self.closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constructors() {
        assert_eq!(Color::rgb(1.0, 0.5, 0.0).a, 1.0);
        assert_eq!(Color::rgba(0.0, 0.0, 0.0, 0.5).a, 0.5);
        assert_eq!(Color::YELLOW, Color::rgb(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_null_renderer_close() {
        let mut renderer = NullRenderer::new(800, 600);
        assert!(!renderer.should_close());
        renderer.close();
        assert!(renderer.should_close());
        assert_eq!(renderer.width(), 800);
        assert_eq!(renderer.height(), 600);
    }
}
