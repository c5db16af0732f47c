//! Font descriptor for text rendering.

use pango::prelude::*;
use thiserror::Error;

/// Raised when the text collaborator has nothing to render with.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("no font families are installed (or no surface to query them from)")]
    NoFamilies,
}

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// The same descriptor is shared by the terminal, the editor panel and the
/// viewer so all windows render text consistently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Sans")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 16" or "Monospace Italic 14"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }

    /// Builds a Pango description whose size is in device pixels rather than points.
    pub fn to_pango_description(&self, pixel_size: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string(pixel_size));
        desc.set_absolute_size(pixel_size * f64::from(pango::SCALE));
        desc
    }
}

/// Checks that at least one font family is installed.
///
/// Pango substitutes a fallback for an unknown family, so the only hard failure
/// is an empty font map; the requested family is reported when it is missing.
pub fn ensure_font_available(font: &FontDescriptor) -> Result<(), FontError> {
    // A throwaway 1x1 surface is enough to reach the font map behind a layout.
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)
        .map_err(|_| FontError::NoFamilies)?;
    let ctx = cairo::Context::new(&surface).map_err(|_| FontError::NoFamilies)?;
    let layout = pangocairo::functions::create_layout(&ctx);
    let families = layout.context().list_families();
    if families.is_empty() {
        return Err(FontError::NoFamilies);
    }

    let wanted = font.family.to_lowercase();
    if !families
        .iter()
        .any(|family| family.name().to_lowercase() == wanted)
    {
        log::debug!(
            "Font family '{}' not installed; Pango will substitute a fallback",
            font.family
        );
    }
    Ok(())
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pango_string_default_omits_normal_parts() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(16.0), "Sans 16");
    }

    #[test]
    fn pango_string_includes_style_and_weight() {
        let font = FontDescriptor::new(
            "DejaVu Sans".to_string(),
            "bold".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(20.0), "DejaVu Sans Italic Bold 20");
    }

    #[test]
    fn pango_description_uses_pixel_size() {
        let desc = FontDescriptor::default().to_pango_description(14.0);
        assert!(desc.is_size_absolute());
        assert_eq!(desc.size(), 14 * pango::SCALE);
    }
}
