//! Scene rendering: shapes, layers and the window header shared by the editor and viewer.

use super::color::Color;
use super::primitives::{
    draw_circle_outline, draw_thick_polyline, fill_circle, fill_vertical_gradient,
};
use super::surface::Surface;
use super::theme::Theme;
use crate::document::{Document, LayerId, Shape, ShapeType};
use crate::geometry::{Point, Rect, circle_from_diameter};

/// Height of the gradient header bar in the editor and viewer.
pub const HEADER_HEIGHT: i32 = 40;

const HEADER_BUTTON_RADIUS: i32 = 8;
const HEADER_BUTTON_HIT: i32 = 10;

/// Renders a single shape.
///
/// Complete circles become an outline ring, complete triangles and
/// quadrilaterals a closed outline; everything else (including shapes with too
/// few points for their type) is drawn as an open polyline.
///
/// # Arguments
/// * `s` - Surface to draw on
/// * `shape` - The shape to render
/// * `thickness` - Stroke half-width in pixels (0 = hairline)
pub fn render_shape<S: Surface + ?Sized>(s: &mut S, shape: &Shape, thickness: i32) {
    let complete = shape.is_complete();
    match shape.kind {
        ShapeType::Circle if complete => {
            let (center, radius) = circle_from_diameter(shape.points[0], shape.points[1]);
            draw_circle_outline(s, center, radius.round() as i32, thickness, shape.color);
        }
        ShapeType::Triangle | ShapeType::Quadrilateral if complete => {
            draw_thick_polyline(s, &shape.points, thickness, shape.color, true);
        }
        _ => draw_thick_polyline(s, &shape.points, thickness, shape.color, false),
    }
}

/// Renders shapes in order, first shape at the bottom.
pub fn render_shapes<S: Surface + ?Sized>(s: &mut S, shapes: &[Shape], thickness: i32) {
    for shape in shapes {
        render_shape(s, shape, thickness);
    }
}

/// Renders foliage, then trunks on top.
pub fn render_document<S: Surface + ?Sized>(s: &mut S, document: &Document, thickness: i32) {
    for id in LayerId::ALL {
        render_shapes(s, &document.layer(id).shapes, thickness);
    }
}

/// Small dot marking the most recent placement click.
pub fn render_placement_marker<S: Surface + ?Sized>(s: &mut S, point: Point, color: Color) {
    fill_circle(s, point.x, point.y, 4, color);
}

/// Geometry of the header bar and its round buttons for a window `width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub bar: Rect,
    pub close_center: Point,
    /// Only the editor has a pen button.
    pub pen_center: Option<Point>,
}

impl HeaderLayout {
    pub fn new(width: i32, with_pen: bool) -> Self {
        Self {
            bar: Rect::new(0, 0, width, HEADER_HEIGHT),
            close_center: Point::new(width - 20, HEADER_HEIGHT / 2),
            pen_center: with_pen.then(|| Point::new(width - 50, HEADER_HEIGHT / 2)),
        }
    }

    fn hit_rect(center: Point) -> Rect {
        Rect::new(
            center.x - HEADER_BUTTON_HIT,
            center.y - HEADER_BUTTON_HIT,
            HEADER_BUTTON_HIT * 2,
            HEADER_BUTTON_HIT * 2,
        )
    }

    pub fn close_rect(&self) -> Rect {
        Self::hit_rect(self.close_center)
    }

    pub fn pen_rect(&self) -> Option<Rect> {
        self.pen_center.map(Self::hit_rect)
    }

    pub fn hits_close(&self, x: i32, y: i32) -> bool {
        self.close_rect().contains(x, y)
    }

    pub fn hits_pen(&self, x: i32, y: i32) -> bool {
        self.pen_rect().is_some_and(|r| r.contains(x, y))
    }
}

/// Draws the gradient header with its close button and, if laid out, the pen button.
pub fn render_header<S: Surface + ?Sized>(s: &mut S, theme: &Theme, layout: &HeaderLayout) {
    fill_vertical_gradient(s, layout.bar, theme.header_top, theme.header_bottom);

    let c = layout.close_center;
    fill_circle(s, c.x, c.y, HEADER_BUTTON_RADIUS, theme.close_button);
    s.draw_line(c.x - 3, c.y - 3, c.x + 3, c.y + 3, theme.close_glyph);
    s.draw_line(c.x - 3, c.y + 3, c.x + 3, c.y - 3, theme.close_glyph);

    if let Some(p) = layout.pen_center {
        fill_circle(s, p.x, p.y, HEADER_BUTTON_RADIUS, theme.pen_button);
        // Pen body on the diagonal with a short nib underline.
        s.draw_line(p.x - 3, p.y + 3, p.x + 3, p.y - 3, theme.pen_glyph);
        s.draw_line(p.x - 2, p.y + 3, p.x + 3, p.y - 2, theme.pen_glyph);
        s.draw_line(p.x - 4, p.y + 4, p.x - 1, p.y + 4, theme.pen_glyph);
    }
}
