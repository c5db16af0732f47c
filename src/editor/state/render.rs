use crate::draw::primitives::{
    draw_drop_shadow, draw_rect_border, fill_circle, fill_rounded_rect,
};
use crate::draw::{
    Color, FontDescriptor, Surface, Theme, hue_to_color, render_document, render_header,
    render_placement_marker,
};
use crate::editor::layout::{ColorPanelLayout, PANEL_CLOSE_RADIUS, RING_OUTER_RADIUS};

use super::EditorState;

const PANEL_RADIUS: i32 = 12;
const PANEL_SHADOW: Color = Color::new(0, 0, 0, 60);
const SWATCH_BORDER: Color = Color::new(255, 255, 255, 100);
const BUTTON_FONT_SIZE: f64 = 14.0;

impl EditorState {
    /// Draws one frame: background, both layers, placement marker, header and
    /// (when open) the color panel on top.
    pub fn render<S: Surface + ?Sized>(&self, s: &mut S, theme: &Theme, font: &FontDescriptor) {
        s.clear(theme.background);
        render_document(s, &self.document, self.settings.stroke_thickness);

        if let Some(last) = self.placement_points().last() {
            render_placement_marker(s, *last, theme.placement_marker);
        }

        render_header(s, theme, &self.header_layout());

        if self.color_panel_open {
            self.render_color_panel(s, theme, font, &self.panel_layout());
        }
    }

    fn render_color_panel<S: Surface + ?Sized>(
        &self,
        s: &mut S,
        theme: &Theme,
        font: &FontDescriptor,
        layout: &ColorPanelLayout,
    ) {
        draw_drop_shadow(s, layout.panel, PANEL_RADIUS, 6, PANEL_SHADOW);
        fill_rounded_rect(s, layout.panel, PANEL_RADIUS, theme.color_panel);

        let close = layout.close_center;
        fill_circle(s, close.x, close.y, PANEL_CLOSE_RADIUS, theme.close_button);

        // Every pixel of the band gets the hue a click there would pick.
        let c = layout.ring_center;
        for dy in -RING_OUTER_RADIUS..=RING_OUTER_RADIUS {
            for dx in -RING_OUTER_RADIUS..=RING_OUTER_RADIUS {
                if let Some(hue) = layout.hue_at(c.x + dx, c.y + dy) {
                    s.draw_point(c.x + dx, c.y + dy, hue_to_color(hue));
                }
            }
        }

        fill_rounded_rect(s, layout.swatch, 6, self.draw_color);
        draw_rect_border(s, layout.swatch, SWATCH_BORDER);

        for (kind, rect) in layout.buttons {
            let fill = if kind == self.shape_type {
                theme.button_active
            } else {
                theme.button_bg
            };
            fill_rounded_rect(s, rect, 6, fill);
            s.draw_text(
                kind.label(),
                rect.x + 10,
                rect.y + 6,
                font,
                BUTTON_FONT_SIZE,
                theme.text_primary,
            );
        }
    }
}
