use log::{debug, info};

use crate::config::EditorConfig;
use crate::document::{Document, LayerId, Shape, ShapeType};
use crate::draw::{Color, HeaderLayout, hue_to_color};
use crate::editor::hit_test::{self, VertexRef};
use crate::editor::layout::ColorPanelLayout;
use crate::geometry::Point;
use crate::input::Modifiers;

/// Editor interaction state machine.
///
/// The color panel is tracked separately ([`EditorState::color_panel_open`])
/// because it can be open in any of these states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    /// Waiting for a placement, drag or delete click
    #[default]
    Idle,
    /// Collecting clicks for a new shape
    Placing {
        /// Type chosen when the first point was clicked
        kind: ShapeType,
        /// Points clicked so far (always fewer than `kind.required_points()`)
        points: Vec<Point>,
    },
    /// Moving one vertex of an existing shape with the pointer
    Dragging {
        layer: LayerId,
        shape: usize,
        vertex: usize,
    },
}

/// Tunables taken from `[editor]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    /// Vertex pick radius in pixels
    pub selection_radius: f64,
    /// Delete distance in pixels
    pub delete_tolerance: f64,
    pub stroke_thickness: i32,
    /// Re-pick the nearest vertex of a dragged triangle/quadrilateral on every motion
    pub drag_magnet: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for EditorSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            selection_radius: config.selection_radius,
            delete_tolerance: config.delete_tolerance,
            stroke_thickness: config.stroke_thickness,
            drag_magnet: config.drag_magnet,
        }
    }
}

/// Everything the editor window knows: the document being edited, the
/// interaction state and the tool choices.
pub struct EditorState {
    /// Document being edited; mutated in place and saved when the editor closes
    pub document: Document,
    pub interaction: Interaction,
    /// Whether the color panel overlay is shown
    pub color_panel_open: bool,
    /// Shape type used for the next placement
    pub shape_type: ShapeType,
    /// Color used for the next placed shape
    pub draw_color: Color,
    /// Current keyboard modifier state
    pub modifiers: Modifiers,
    pub settings: EditorSettings,
    /// Set when the editor should close
    pub should_exit: bool,
    /// Set by Shift+D: the shell should quit after the editor closes
    pub exit_shell: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    width: i32,
    height: i32,
}

impl EditorState {
    /// Starts idle with the panel closed, `Line` selected and opaque white ink.
    pub fn new(document: Document, settings: EditorSettings, width: u32, height: u32) -> Self {
        Self {
            document,
            interaction: Interaction::Idle,
            color_panel_open: false,
            shape_type: ShapeType::Line,
            draw_color: Color::rgb(255, 255, 255),
            modifiers: Modifiers::new(),
            settings,
            should_exit: false,
            exit_shell: false,
            needs_redraw: true,
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as i32;
        self.height = height as i32;
        self.needs_redraw = true;
    }

    pub fn header_layout(&self) -> HeaderLayout {
        HeaderLayout::new(self.width, true)
    }

    pub fn panel_layout(&self) -> ColorPanelLayout {
        ColorPanelLayout::new(self.width)
    }

    /// Points collected by an in-progress placement (empty otherwise).
    pub fn placement_points(&self) -> &[Point] {
        match &self.interaction {
            Interaction::Placing { points, .. } => points,
            _ => &[],
        }
    }

    /// Records a placement click, starting a placement if idle.
    ///
    /// Once the required number of points is reached the shape is appended to
    /// the trunks layer and the editor goes back to idle.
    pub fn place_point(&mut self, p: Point) {
        match &mut self.interaction {
            Interaction::Idle => {
                debug!("Placement started: {:?} at {:?}", self.shape_type, p);
                self.interaction = Interaction::Placing {
                    kind: self.shape_type,
                    points: vec![p],
                };
            }
            Interaction::Placing { points, .. } => points.push(p),
            Interaction::Dragging { .. } => return,
        }

        if let Interaction::Placing { kind, points } = &self.interaction {
            if points.len() >= kind.required_points() {
                let shape = Shape::new(points.clone(), self.draw_color, *kind);
                info!("Placed {:?} with {} points", shape.kind, shape.points.len());
                self.document.trunks.push(shape);
                self.interaction = Interaction::Idle;
            }
        }
        self.needs_redraw = true;
    }

    /// Deletes the shape closest to `p` if it lies within the delete tolerance.
    ///
    /// Returns whether anything was removed. Allowed while idle or placing; a
    /// placement in progress keeps its collected points.
    pub fn delete_at(&mut self, p: Point) -> bool {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            return false;
        }
        let tolerance_sq = self.settings.delete_tolerance * self.settings.delete_tolerance;
        let Some(found) = hit_test::best_delete_candidate(&self.document, p, tolerance_sq) else {
            debug!("Delete at {:?}: nothing within tolerance", p);
            return false;
        };
        if let Some(removed) = self.document.layer_mut(found.layer).remove(found.index) {
            info!(
                "Deleted {:?} #{} from {}",
                removed.kind,
                found.index,
                found.layer.name()
            );
            self.needs_redraw = true;
            return true;
        }
        false
    }

    /// Grabs the vertex nearest `p` within the selection radius. Idle only.
    pub fn begin_drag(&mut self, p: Point) -> bool {
        if self.interaction != Interaction::Idle {
            return false;
        }
        let radius_sq = self.settings.selection_radius * self.settings.selection_radius;
        match hit_test::nearest_vertex(&self.document, p, radius_sq) {
            Some(VertexRef {
                layer,
                shape,
                vertex,
            }) => {
                debug!("Drag started on {} #{} vertex {}", layer.name(), shape, vertex);
                self.interaction = Interaction::Dragging {
                    layer,
                    shape,
                    vertex,
                };
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    /// Moves the dragged vertex to `p`.
    pub fn drag_to(&mut self, p: Point) {
        let Interaction::Dragging {
            layer,
            shape,
            vertex,
        } = &mut self.interaction
        else {
            return;
        };
        let Some(target) = self.document.shape_mut(*layer, *shape) else {
            self.interaction = Interaction::Idle;
            return;
        };

        if self.settings.drag_magnet && target.kind.is_polygon() && target.is_complete() {
            if let Some(nearest) = hit_test::nearest_vertex_in_shape(target, p) {
                *vertex = nearest;
            }
        }
        if let Some(point) = target.points.get_mut(*vertex) {
            *point = p;
            self.needs_redraw = true;
        }
    }

    /// Ends a drag; the document was already updated while moving.
    pub fn end_drag(&mut self) {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            self.interaction = Interaction::Idle;
            self.needs_redraw = true;
        }
    }

    /// Drops any placement or drag in progress.
    pub fn cancel(&mut self) {
        if self.interaction != Interaction::Idle {
            debug!("Cancelled {:?}", self.interaction);
            self.interaction = Interaction::Idle;
            self.needs_redraw = true;
        }
    }

    pub fn toggle_color_panel(&mut self) {
        self.color_panel_open = !self.color_panel_open;
        self.needs_redraw = true;
    }

    /// Sets the ink color from a hue angle in degrees.
    pub fn pick_hue(&mut self, degrees: f64) {
        self.draw_color = hue_to_color(degrees);
        debug!("Picked hue {:.1}° -> {:?}", degrees, self.draw_color);
        self.needs_redraw = true;
    }

    /// Switches the placement shape type, abandoning a placement in progress.
    pub fn select_shape_type(&mut self, kind: ShapeType) {
        self.shape_type = kind;
        if matches!(self.interaction, Interaction::Placing { .. }) {
            self.interaction = Interaction::Idle;
        }
        self.needs_redraw = true;
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }
}
