//! Read-only document viewer.
//!
//! Loads once, draws both layers every frame and never writes anything back.
//! Escape, the header close button or the window's close request end it.

use log::debug;

use crate::document::Document;
use crate::draw::{HeaderLayout, Surface, Theme, render_document, render_header};
use crate::input::{Key, MouseButton};

pub struct ViewerState {
    document: Document,
    stroke_thickness: i32,
    width: i32,
    /// Set when the viewer should close
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl ViewerState {
    pub fn new(document: Document, stroke_thickness: i32, width: u32) -> Self {
        Self {
            document,
            stroke_thickness,
            width: width as i32,
            should_exit: false,
            needs_redraw: true,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn header_layout(&self) -> HeaderLayout {
        HeaderLayout::new(self.width, false)
    }

    pub fn resize(&mut self, width: u32) {
        self.width = width as i32;
        self.needs_redraw = true;
    }

    pub fn on_key_press(&mut self, key: Key) {
        if key == Key::Escape {
            debug!("Viewer closed with Escape");
            self.should_exit = true;
        }
    }

    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        if button == MouseButton::Left && self.header_layout().hits_close(x, y) {
            self.should_exit = true;
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, s: &mut S, theme: &Theme) {
        s.clear(theme.background);
        render_document(s, &self.document, self.stroke_thickness);
        render_header(s, theme, &self.header_layout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Layer, Shape, ShapeType};
    use crate::draw::Color;
    use crate::draw::surface::testing::PixelCanvas;
    use crate::geometry::Point;

    fn sample() -> Document {
        let shape = |y: i32, color: Color| {
            Shape::new(
                vec![Point::new(100, y), Point::new(300, y)],
                color,
                ShapeType::Line,
            )
        };
        Document::new(
            Layer::new(vec![shape(200, Color::rgb(0, 200, 0))]),
            Layer::new(vec![shape(400, Color::rgb(120, 60, 0))]),
        )
    }

    #[test]
    fn renders_both_layers_under_the_header() {
        let viewer = ViewerState::new(sample(), 0, 800);
        let theme = Theme::default();
        let mut canvas = PixelCanvas::new(800, 600);
        viewer.render(&mut canvas, &theme);

        assert_eq!(canvas.pixel(200, 200), Color::rgb(0, 200, 0));
        assert_eq!(canvas.pixel(200, 400), Color::rgb(120, 60, 0));
        assert_eq!(canvas.pixel(200, 300), theme.background);
        assert_eq!(canvas.pixel(780 + 6, 20), theme.close_button);
        // No pen button in the viewer.
        assert_ne!(canvas.pixel(750 + 6, 20), theme.pen_button);
    }

    #[test]
    fn escape_and_close_button_exit_without_touching_the_document() {
        let mut viewer = ViewerState::new(sample(), 2, 800);
        viewer.on_mouse_press(MouseButton::Left, 400, 300);
        assert!(!viewer.should_exit);
        viewer.on_key_press(Key::Char('q'));
        assert!(!viewer.should_exit);
        viewer.on_mouse_press(MouseButton::Left, 780, 20);
        assert!(viewer.should_exit);

        let mut viewer = ViewerState::new(sample(), 2, 800);
        viewer.on_key_press(Key::Escape);
        assert!(viewer.should_exit);
        assert_eq!(viewer.document(), &sample());
    }
}
