//! Pixel primitives built on [`Surface`]: thick strokes, circles, panels, gradients.
//!
//! Everything here works in whole pixels. Thick strokes stamp a filled disk at
//! every pixel a one-pixel line would visit; it is O(radius² · length) and that
//! is fine for the handful of shapes a document holds. Coordinates come from
//! user files and may lie anywhere in `i32`, so offsets are taken in `i64` and
//! every loop is bounded by the surface size.

use super::color::Color;
use super::surface::Surface;
use crate::geometry::{Point, Rect, clip_segment};

/// Blends one pixel given in `i64` offsets, skipping anything off the surface.
fn plot<S: Surface + ?Sized>(s: &mut S, x: i64, y: i64, color: Color) {
    let (w, h) = s.size();
    if (0..i64::from(w)).contains(&x) && (0..i64::from(h)).contains(&y) {
        s.draw_point(x as i32, y as i32, color);
    }
}

/// Fills a disk of `radius` pixels around (`cx`, `cy`), one span per row.
///
/// Only rows and spans that land on the surface are visited.
pub fn fill_circle<S: Surface + ?Sized>(s: &mut S, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        s.draw_point(cx, cy, color);
        return;
    }
    let (w, h) = s.size();
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let r2 = (r * r) as f64;
    for dy in (-r).max(-cy)..=r.min(i64::from(h) - 1 - cy) {
        let dx = (r2 - (dy * dy) as f64).sqrt().round() as i64;
        let left = (cx - dx).max(0);
        let right = (cx + dx).min(i64::from(w) - 1);
        if left > right {
            continue;
        }
        s.fill_rect(
            Rect::new(left as i32, (cy + dy) as i32, (right - left + 1) as i32, 1),
            color,
        );
    }
}

/// Draws a ring around `center` by sampling concentric radii from
/// `radius - thickness` to `radius + thickness`.
pub fn draw_circle_outline<S: Surface + ?Sized>(
    s: &mut S,
    center: Point,
    radius: i32,
    thickness: i32,
    color: Color,
) {
    let thickness = i64::from(thickness.max(0));
    let (w, h) = s.size();
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    for t in -thickness..=thickness {
        let r = (i64::from(radius) + t).max(1);
        let r2 = (r * r) as f64;
        let reach = |d: i64| (r2 - (d * d) as f64).sqrt().round() as i64;
        // Rows give the left and right arcs, columns the top and bottom ones,
        // so the steep parts near the poles have no gaps.
        for dy in (-r).max(-cy)..=r.min(i64::from(h) - 1 - cy) {
            let dx = reach(dy);
            plot(s, cx - dx, cy + dy, color);
            plot(s, cx + dx, cy + dy, color);
        }
        for dx in (-r).max(-cx)..=r.min(i64::from(w) - 1 - cx) {
            let dy = reach(dx);
            plot(s, cx + dx, cy - dy, color);
            plot(s, cx + dx, cy + dy, color);
        }
    }
}

/// Draws a segment `thickness` pixels wide on each side of the centerline.
///
/// The centerline is first clipped to the surface grown by `thickness`, so
/// the stepping never leaves the visible area. A thickness of zero falls back
/// to a plain one-pixel line.
pub fn draw_thick_line<S: Surface + ?Sized>(
    s: &mut S,
    a: Point,
    b: Point,
    thickness: i32,
    color: Color,
) {
    let thickness = thickness.max(0);
    let Some((a, b)) = clip_segment(a, b, s.bounds().inflated(thickness)) else {
        return;
    };
    if thickness == 0 {
        s.draw_line(a.x, a.y, b.x, b.y, color);
        return;
    }

    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);
    loop {
        fill_circle(s, x, y, thickness, color);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Strokes consecutive points; `closed` adds the edge from the last point back to the first.
pub fn draw_thick_polyline<S: Surface + ?Sized>(
    s: &mut S,
    points: &[Point],
    thickness: i32,
    color: Color,
    closed: bool,
) {
    match points {
        [] => {}
        [only] => fill_circle(s, only.x, only.y, thickness, color),
        _ => {
            for pair in points.windows(2) {
                draw_thick_line(s, pair[0], pair[1], thickness, color);
            }
            if closed && points.len() > 2 {
                draw_thick_line(s, points[points.len() - 1], points[0], thickness, color);
            }
        }
    }
}

/// Fills `rect` with rounded corners.
///
/// The body covers the full height between the corner columns, two side strips
/// fill the straight left/right edges, and each corner square gets a quarter
/// disk. The pieces do not overlap, so translucent colors blend once.
pub fn fill_rounded_rect<S: Surface + ?Sized>(s: &mut S, rect: Rect, radius: i32, color: Color) {
    if !rect.is_valid() {
        return;
    }
    let r = radius.clamp(0, rect.width.min(rect.height) / 2);
    if r == 0 {
        s.fill_rect(rect, color);
        return;
    }

    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    s.fill_rect(Rect::new(x + r, y, w - 2 * r, h), color);
    s.fill_rect(Rect::new(x, y + r, r, h - 2 * r), color);
    s.fill_rect(Rect::new(x + w - r, y + r, r, h - 2 * r), color);

    let r2 = f64::from(r * r);
    for row in 0..r {
        // Distance from the row's center to the corner disk's center row.
        let dy = f64::from(r - row) - 0.5;
        let reach = (r2 - dy * dy).max(0.0).sqrt().round() as i32;
        if reach == 0 {
            continue;
        }
        let top = y + row;
        let bottom = y + h - 1 - row;
        for row_y in [top, bottom] {
            s.fill_rect(Rect::new(x + r - reach, row_y, reach, 1), color);
            s.fill_rect(Rect::new(x + w - r, row_y, reach, 1), color);
        }
    }
}

/// Fills `rect` row by row, interpolating from `top` on the first row to `bottom` on the last.
pub fn fill_vertical_gradient<S: Surface + ?Sized>(s: &mut S, rect: Rect, top: Color, bottom: Color) {
    if !rect.is_valid() {
        return;
    }
    let span = f64::from((rect.height - 1).max(1));
    for row in 0..rect.height {
        let color = top.lerp(bottom, f64::from(row) / span);
        s.fill_rect(Rect::new(rect.x, rect.y + row, rect.width, 1), color);
    }
}

/// Soft shadow behind a rounded panel: `spread` progressively smaller and
/// darker rounded rects, outermost first.
pub fn draw_drop_shadow<S: Surface + ?Sized>(
    s: &mut S,
    rect: Rect,
    radius: i32,
    spread: i32,
    color: Color,
) {
    if spread <= 0 {
        return;
    }
    for i in (1..=spread).rev() {
        let alpha = (i32::from(color.a) * i / (spread * 2)).max(10).min(255) as u8;
        fill_rounded_rect(s, rect.inflated(i), radius + i, color.with_alpha(alpha));
    }
}

/// One-pixel outline along the inside edge of `rect`.
pub fn draw_rect_border<S: Surface + ?Sized>(s: &mut S, rect: Rect, color: Color) {
    if !rect.is_valid() {
        return;
    }
    let right = rect.x + rect.width - 1;
    let bottom = rect.y + rect.height - 1;
    s.draw_line(rect.x, rect.y, right, rect.y, color);
    s.draw_line(rect.x, bottom, right, bottom, color);
    if rect.height > 2 {
        s.draw_line(rect.x, rect.y + 1, rect.x, bottom - 1, color);
        s.draw_line(right, rect.y + 1, right, bottom - 1, color);
    }
}
