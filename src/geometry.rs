//! Integer pixel geometry and the distance helpers used for hit-testing.
//!
//! All comparisons are done on squared distances so that picking never needs a
//! square root; only circle scoring takes one, because the ring distance is a
//! difference of lengths.

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in window pixels (`x`/`y` inclusive, right/bottom exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Half-open containment test, matching how the header and panel buttons are hit.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Returns a copy grown by `amount` pixels on every side.
    pub fn inflated(&self, amount: i32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }
}

/// Squared Euclidean distance between two points.
pub fn distance_squared(p: Point, q: Point) -> f64 {
    let dx = f64::from(p.x) - f64::from(q.x);
    let dy = f64::from(p.y) - f64::from(q.y);
    dx * dx + dy * dy
}

/// Squared distance from `p` to the closest point of segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either end
/// measure against the nearer endpoint. A zero-length segment degrades to the
/// plain point distance.
pub fn point_to_segment_distance_squared(p: Point, a: Point, b: Point) -> f64 {
    let vx = f64::from(b.x) - f64::from(a.x);
    let vy = f64::from(b.y) - f64::from(a.y);
    let wx = f64::from(p.x) - f64::from(a.x);
    let wy = f64::from(p.y) - f64::from(a.y);

    let dot = vx * wx + vy * wy;
    if dot <= 0.0 {
        return distance_squared(p, a);
    }

    let length_squared = vx * vx + vy * vy;
    if length_squared <= dot {
        return distance_squared(p, b);
    }

    let t = dot / length_squared;
    let dx = wx - t * vx;
    let dy = wy - t * vy;
    dx * dx + dy * dy
}

/// Center and radius of the circle spanned by two diametrically opposite points.
///
/// The center uses integer midpoint division (toward zero) and the radius is
/// half the separation, which is how circles are both drawn and hit-tested.
/// The sums are taken in `i64`; the midpoint of two `i32` values always fits.
pub fn circle_from_diameter(a: Point, b: Point) -> (Point, f64) {
    let mid = |p: i32, q: i32| ((i64::from(p) + i64::from(q)) / 2) as i32;
    let center = Point::new(mid(a.x, b.x), mid(a.y, b.y));
    let radius = distance_squared(a, b).sqrt() / 2.0;
    (center, radius)
}

/// Clips segment `a`-`b` to `bounds` (Liang-Barsky), returning the visible part.
///
/// Endpoints already inside `bounds` come back unchanged; cut endpoints are
/// rounded to the nearest pixel. `None` means nothing of the segment is visible.
pub fn clip_segment(a: Point, b: Point, bounds: Rect) -> Option<(Point, Point)> {
    if !bounds.is_valid() {
        return None;
    }
    let (x0, y0) = (f64::from(a.x), f64::from(a.y));
    let dx = f64::from(b.x) - x0;
    let dy = f64::from(b.y) - y0;
    let min_x = f64::from(bounds.x);
    let min_y = f64::from(bounds.y);
    let max_x = min_x + f64::from(bounds.width) - 1.0;
    let max_y = min_y + f64::from(bounds.height) - 1.0;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        Point::new(
            (x0 + t * dx).round().clamp(min_x, max_x) as i32,
            (y0 + t * dy).round().clamp(min_y, max_y) as i32,
        )
    };
    let start = if t0 > 0.0 { at(t0) } else { a };
    let end = if t1 < 1.0 { at(t1) } else { b };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Point::new(3, 4);
        let b = Point::new(0, 0);
        assert_eq!(distance_squared(a, b), 25.0);
        assert_eq!(distance_squared(b, a), 25.0);
    }

    #[test]
    fn segment_distance_uses_orthogonal_projection_inside_segment() {
        let d = point_to_segment_distance_squared(
            Point::new(50, 7),
            Point::new(0, 0),
            Point::new(100, 0),
        );
        assert_eq!(d, 49.0);
    }

    #[test]
    fn segment_distance_clamps_to_nearer_endpoint() {
        let a = Point::new(0, 0);
        let b = Point::new(10, 0);
        assert_eq!(
            point_to_segment_distance_squared(Point::new(-3, 4), a, b),
            25.0
        );
        assert_eq!(
            point_to_segment_distance_squared(Point::new(13, 4), a, b),
            25.0
        );
    }

    #[test]
    fn segment_distance_handles_diagonal_projection() {
        // Projection of (0, 10) onto the diagonal lands on (5, 5).
        let d = point_to_segment_distance_squared(
            Point::new(0, 10),
            Point::new(0, 0),
            Point::new(10, 10),
        );
        assert!((d - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        let a = Point::new(5, 5);
        assert_eq!(
            point_to_segment_distance_squared(Point::new(8, 9), a, a),
            25.0
        );
    }

    #[test]
    fn projection_is_never_farther_than_either_endpoint() {
        let a = Point::new(-20, 7);
        let b = Point::new(35, -12);
        for x in (-40..60).step_by(7) {
            for y in (-30..30).step_by(5) {
                let p = Point::new(x, y);
                let d = point_to_segment_distance_squared(p, a, b);
                assert!(d <= distance_squared(p, a) + 1e-9);
                assert!(d <= distance_squared(p, b) + 1e-9);
            }
        }
    }

    #[test]
    fn circle_from_diameter_uses_midpoint_and_half_separation() {
        let (center, radius) = circle_from_diameter(Point::new(0, 0), Point::new(20, 0));
        assert_eq!(center, Point::new(10, 0));
        assert_eq!(radius, 10.0);
    }

    #[test]
    fn circle_from_diameter_handles_extreme_coordinates() {
        let (center, radius) =
            circle_from_diameter(Point::new(2_000_000_000, 0), Point::new(2_000_000_000, 10));
        assert_eq!(center, Point::new(2_000_000_000, 5));
        assert_eq!(radius, 5.0);

        let (center, radius) = circle_from_diameter(
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
        );
        assert_eq!(center, Point::new(0, 0));
        assert!(radius > 3.0e9);
    }

    #[test]
    fn clip_segment_keeps_visible_segments_intact() {
        let bounds = Rect::new(0, 0, 100, 100);
        let (a, b) = (Point::new(10, 20), Point::new(90, 70));
        assert_eq!(clip_segment(a, b, bounds), Some((a, b)));
    }

    #[test]
    fn clip_segment_cuts_huge_lines_to_the_bounds() {
        let bounds = Rect::new(0, 0, 100, 100);
        let clipped = clip_segment(
            Point::new(-2_000_000_000, 50),
            Point::new(2_000_000_000, 50),
            bounds,
        );
        assert_eq!(clipped, Some((Point::new(0, 50), Point::new(99, 50))));

        assert_eq!(
            clip_segment(Point::new(-50, -10), Point::new(500, -10), bounds),
            None
        );
        assert_eq!(
            clip_segment(Point::new(i32::MIN, i32::MIN), Point::new(i32::MIN, i32::MAX), bounds),
            None
        );
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 10));
        assert!(!rect.contains(10, 15));
    }
}
