//! RGBA color type, predefined constants and the hue ramp used by the color panel.

/// Represents an RGBA color with 8-bit components.
///
/// Components use the same 0-255 range as the `.colors` files, so a color read
/// from disk is written back unchanged.
///
/// # Examples
///
/// ```
/// use atelier::draw::Color;
/// let red = Color::rgb(255, 0, 0);
/// let translucent_blue = Color::new(0, 0, 255, 128);
/// assert_eq!(red.a, 255);
/// assert_eq!(translucent_blue.a, 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component (0 = no red, 255 = full red)
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Components scaled to Cairo's 0.0-1.0 range.
    pub fn to_unit(self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a) / 255.0,
        )
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    ///
    /// Each channel is truncated toward zero, which is what the per-row
    /// gradient expects.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| ((1.0 - t) * f64::from(a) + t * f64::from(b)) as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        WHITE
    }
}

/// Converts a hue angle in degrees to an opaque, fully saturated color.
///
/// The hue circle is split into six 60° sectors; inside each one exactly one
/// channel ramps linearly while the other two stay pinned at 0 or 255, so the
/// result is continuous across sector boundaries. Angles outside `[0, 360)` are
/// wrapped.
pub fn hue_to_color(degrees: f64) -> Color {
    let degrees = if degrees.is_finite() {
        degrees.rem_euclid(360.0)
    } else {
        0.0
    };
    let t = degrees / 60.0;
    let sector = t.floor();
    let rising = t - sector;
    let falling = 1.0 - rising;

    let (r, g, b) = match sector as u32 % 6 {
        0 => (1.0, rising, 0.0),
        1 => (falling, 1.0, 0.0),
        2 => (0.0, 1.0, rising),
        3 => (0.0, falling, 1.0),
        4 => (rising, 0.0, 1.0),
        _ => (1.0, 0.0, falling),
    };

    let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb(channel(r), channel(g), channel(b))
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Opaque white, the default draw color and the default for padded `.colors` entries.
pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Pure red.
pub const RED: Color = Color::rgb(255, 0, 0);

/// Pure green.
pub const GREEN: Color = Color::rgb(0, 255, 0);

/// Pure blue.
pub const BLUE: Color = Color::rgb(0, 0, 255);

/// Fully transparent.
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
