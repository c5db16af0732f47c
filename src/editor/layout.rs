//! Geometry of the color panel, shared by hit-testing and rendering.

use crate::document::ShapeType;
use crate::geometry::{Point, Rect, distance_squared};

const PANEL_WIDTH: i32 = 200;
const PANEL_HEIGHT: i32 = 500;
const PANEL_MARGIN_RIGHT: i32 = 20;
const PANEL_TOP: i32 = 50;

/// Radius of the panel's close dot; clicks within it close the panel.
pub const PANEL_CLOSE_RADIUS: i32 = 6;
pub const RING_INNER_RADIUS: i32 = 60;
pub const RING_OUTER_RADIUS: i32 = 80;

const BUTTON_HEIGHT: i32 = 28;
const BUTTON_SPACING: i32 = 34;

/// What a click inside the open panel landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelHit {
    Close,
    /// Hue angle in degrees, `[0, 360)`
    Hue(f64),
    Shape(ShapeType),
    /// Inside the panel but on no control
    Background,
}

/// Color panel anchored to the top-right corner of a window `width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPanelLayout {
    pub panel: Rect,
    pub close_center: Point,
    pub ring_center: Point,
    pub swatch: Rect,
    pub buttons: [(ShapeType, Rect); 4],
}

impl ColorPanelLayout {
    pub fn new(window_width: i32) -> Self {
        let panel = Rect::new(
            window_width - PANEL_WIDTH - PANEL_MARGIN_RIGHT,
            PANEL_TOP,
            PANEL_WIDTH,
            PANEL_HEIGHT,
        );
        let inner_x = panel.x + 20;
        let inner_w = panel.width - 40;
        let button = |i: i32| {
            Rect::new(
                inner_x,
                panel.y + 310 + i * BUTTON_SPACING,
                inner_w,
                BUTTON_HEIGHT,
            )
        };

        Self {
            panel,
            close_center: Point::new(panel.x + panel.width - 18, panel.y + 14),
            ring_center: Point::new(panel.x + panel.width / 2, panel.y + 130),
            swatch: Rect::new(inner_x, panel.y + 260, inner_w, 30),
            buttons: [
                (ShapeType::Line, button(0)),
                (ShapeType::Circle, button(1)),
                (ShapeType::Triangle, button(2)),
                (ShapeType::Quadrilateral, button(3)),
            ],
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.panel.contains(x, y)
    }

    /// Hue under (`x`, `y`) if it lies on the ring band.
    ///
    /// The angle follows screen coordinates: 0° points right and angles grow
    /// clockwise (y grows downward).
    pub fn hue_at(&self, x: i32, y: i32) -> Option<f64> {
        let p = Point::new(x, y);
        let d2 = distance_squared(p, self.ring_center);
        let inner = f64::from(RING_INNER_RADIUS * RING_INNER_RADIUS);
        let outer = f64::from(RING_OUTER_RADIUS * RING_OUTER_RADIUS);
        if d2 < inner || d2 > outer {
            return None;
        }
        let dx = f64::from(x - self.ring_center.x);
        let dy = f64::from(y - self.ring_center.y);
        Some(dy.atan2(dx).to_degrees().rem_euclid(360.0))
    }

    /// Classifies a click; `None` when it is outside the panel entirely.
    pub fn hit(&self, x: i32, y: i32) -> Option<PanelHit> {
        if !self.contains(x, y) {
            return None;
        }
        let close_r2 = f64::from(PANEL_CLOSE_RADIUS * PANEL_CLOSE_RADIUS);
        if distance_squared(Point::new(x, y), self.close_center) <= close_r2 {
            return Some(PanelHit::Close);
        }
        if let Some(hue) = self.hue_at(x, y) {
            return Some(PanelHit::Hue(hue));
        }
        if let Some((kind, _)) = self.buttons.iter().find(|(_, rect)| rect.contains(x, y)) {
            return Some(PanelHit::Shape(*kind));
        }
        Some(PanelHit::Background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_in_the_top_right_corner() {
        let layout = ColorPanelLayout::new(800);
        assert_eq!(layout.panel, Rect::new(580, 50, 200, 500));
        assert_eq!(layout.ring_center, Point::new(680, 180));
        assert_eq!(layout.close_center, Point::new(762, 64));
    }

    #[test]
    fn ring_angles_follow_screen_orientation() {
        let layout = ColorPanelLayout::new(800);
        let c = layout.ring_center;
        for (dx, dy, expected) in [(70, 0, 0.0), (0, 70, 90.0), (-70, 0, 180.0), (0, -70, 270.0)] {
            let Some(PanelHit::Hue(hue)) = layout.hit(c.x + dx, c.y + dy) else {
                panic!("({dx},{dy}) missed the ring");
            };
            assert!((hue - expected).abs() < 1e-9, "{hue} != {expected}");
        }
        assert_eq!(layout.hit(c.x, c.y), Some(PanelHit::Background));
        assert_eq!(layout.hue_at(c.x + 59, c.y), None);
        assert_eq!(layout.hue_at(c.x + 81, c.y), None);
    }

    #[test]
    fn buttons_close_and_outside_clicks_are_classified() {
        let layout = ColorPanelLayout::new(800);
        assert_eq!(layout.hit(762, 64), Some(PanelHit::Close));
        assert_eq!(layout.hit(610, 50 + 310 + 5), Some(PanelHit::Shape(ShapeType::Line)));
        assert_eq!(
            layout.hit(610, 50 + 412 + 27),
            Some(PanelHit::Shape(ShapeType::Quadrilateral))
        );
        assert_eq!(layout.hit(610, 50 + 340), Some(PanelHit::Background));
        assert_eq!(layout.hit(100, 100), None);
    }
}
