//! Drawing surface abstraction and its Cairo/Pango implementation.
//!
//! Every primitive in [`super::primitives`] is written against [`Surface`], so the
//! shape and panel code never talks to Cairo directly. The Wayland backend wraps
//! each shared-memory buffer in a [`CairoSurface`]; tests can render into a plain
//! `cairo::ImageSurface` the same way.

use super::color::Color;
use super::font::FontDescriptor;
use crate::geometry::{Point, Rect, clip_segment};

/// Pixel-addressed drawing target.
///
/// Coordinates are window pixels with the origin at the top-left corner.
/// Drawing outside the surface is silently clipped.
pub trait Surface {
    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// The whole surface as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(
            0,
            0,
            i32::try_from(w).unwrap_or(i32::MAX),
            i32::try_from(h).unwrap_or(i32::MAX),
        )
    }

    /// Overwrites the whole surface (ignoring the clip) with `color`.
    fn clear(&mut self, color: Color);

    /// Blends a single pixel.
    fn draw_point(&mut self, x: i32, y: i32, color: Color);

    /// Fills an axis-aligned rectangle. Empty rectangles draw nothing.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a one-pixel line including both endpoints.
    ///
    /// The default clips the segment to [`Surface::bounds`] and walks what is
    /// left with Bresenham's algorithm.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let Some((a, b)) = clip_segment(Point::new(x0, y0), Point::new(x1, y1), self.bounds())
        else {
            return;
        };
        let (x0, y0, x1, y1) = (a.x, a.y, b.x, b.y);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.draw_point(x, y, color);
            if x == x1 && y == y1 {
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

    /// Restricts subsequent drawing to `clip`; `None` removes the restriction.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Renders `text` with its top-left corner at (`x`, `y`).
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &FontDescriptor,
        pixel_size: f64,
        color: Color,
    );

    /// Logical width and height of `text` when rendered with `font`.
    fn text_size(&mut self, text: &str, font: &FontDescriptor, pixel_size: f64) -> (i32, i32);
}

/// [`Surface`] backed by a Cairo context, with Pango doing text shaping.
pub struct CairoSurface<'a> {
    ctx: &'a cairo::Context,
    width: u32,
    height: u32,
}

impl<'a> CairoSurface<'a> {
    /// Wraps an existing context whose target is `width` x `height` pixels.
    pub fn new(ctx: &'a cairo::Context, width: u32, height: u32) -> Self {
        ctx.set_antialias(cairo::Antialias::None);
        ctx.set_operator(cairo::Operator::Over);
        Self { ctx, width, height }
    }

    fn set_source(&self, color: Color) {
        let (r, g, b, a) = color.to_unit();
        self.ctx.set_source_rgba(r, g, b, a);
    }

    fn layout(&self, text: &str, font: &FontDescriptor, pixel_size: f64) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.ctx);
        let desc = font.to_pango_description(pixel_size);
        layout.set_font_description(Some(&desc));
        layout.set_text(text);
        layout
    }
}

impl Surface for CairoSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        let _ = self.ctx.save();
        self.ctx.reset_clip();
        self.ctx.set_operator(cairo::Operator::Source);
        self.set_source(color);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.set_source(color);
        self.ctx
            .rectangle(f64::from(x), f64::from(y), 1.0, 1.0);
        let _ = self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_valid() {
            return;
        }
        self.set_source(color);
        self.ctx.rectangle(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        let _ = self.ctx.fill();
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Cairo's fixed-point coordinates cannot hold far off-surface endpoints.
        let Some((a, b)) = clip_segment(Point::new(x0, y0), Point::new(x1, y1), self.bounds())
        else {
            return;
        };
        let (x0, y0, x1, y1) = (a.x, a.y, b.x, b.y);
        if x0 == x1 && y0 == y1 {
            self.draw_point(x0, y0, color);
            return;
        }
        // Pixel centers sit at +0.5; square caps cover both endpoint pixels.
        self.set_source(color);
        self.ctx.set_line_width(1.0);
        self.ctx.set_line_cap(cairo::LineCap::Square);
        self.ctx.move_to(f64::from(x0) + 0.5, f64::from(y0) + 0.5);
        self.ctx.line_to(f64::from(x1) + 0.5, f64::from(y1) + 0.5);
        let _ = self.ctx.stroke();
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.ctx.reset_clip();
        if let Some(rect) = clip {
            self.ctx.rectangle(
                f64::from(rect.x),
                f64::from(rect.y),
                f64::from(rect.width.max(0)),
                f64::from(rect.height.max(0)),
            );
            self.ctx.clip();
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &FontDescriptor,
        pixel_size: f64,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let _ = self.ctx.save();
        // Text keeps its antialiasing even though shapes are pixel-exact.
        self.ctx.set_antialias(cairo::Antialias::Gray);
        let layout = self.layout(text, font, pixel_size);
        self.set_source(color);
        self.ctx.move_to(f64::from(x), f64::from(y));
        pangocairo::functions::show_layout(self.ctx, &layout);
        let _ = self.ctx.restore();
    }

    fn text_size(&mut self, text: &str, font: &FontDescriptor, pixel_size: f64) -> (i32, i32) {
        let layout = self.layout(text, font, pixel_size);
        layout.pixel_size()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory surface for asserting exact pixels without a Cairo target.

    use super::*;
    use crate::draw::color::TRANSPARENT;

    /// Records pixels (last write wins, no blending) and every text draw call.
    pub(crate) struct PixelCanvas {
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        clip: Option<Rect>,
        pub(crate) texts: Vec<(String, i32, i32, Color)>,
    }

    impl PixelCanvas {
        pub(crate) fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![TRANSPARENT; (width * height) as usize],
                clip: None,
                texts: Vec::new(),
            }
        }

        pub(crate) fn pixel(&self, x: i32, y: i32) -> Color {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return TRANSPARENT;
            }
            self.pixels[(y as u32 * self.width + x as u32) as usize]
        }

        pub(crate) fn count(&self, color: Color) -> usize {
            self.pixels.iter().filter(|p| **p == color).count()
        }

        pub(crate) fn has_text(&self, needle: &str) -> bool {
            self.texts.iter().any(|(text, ..)| text.contains(needle))
        }
    }

    impl Surface for PixelCanvas {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn clear(&mut self, color: Color) {
            self.pixels.fill(color);
        }

        fn draw_point(&mut self, x: i32, y: i32, color: Color) {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return;
            }
            if let Some(clip) = self.clip {
                if !clip.contains(x, y) {
                    return;
                }
            }
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            for y in rect.y..rect.y + rect.height {
                for x in rect.x..rect.x + rect.width {
                    self.draw_point(x, y, color);
                }
            }
        }

        fn set_clip(&mut self, clip: Option<Rect>) {
            self.clip = clip;
        }

        fn draw_text(
            &mut self,
            text: &str,
            x: i32,
            y: i32,
            _font: &FontDescriptor,
            _pixel_size: f64,
            color: Color,
        ) {
            if let Some(clip) = self.clip {
                if !clip.contains(x, y) {
                    return;
                }
            }
            self.texts.push((text.to_string(), x, y, color));
        }

        fn text_size(&mut self, text: &str, _font: &FontDescriptor, pixel_size: f64) -> (i32, i32) {
            let height = pixel_size.round() as i32 + 2;
            (text.chars().count() as i32 * (height / 2), height)
        }
    }
}
