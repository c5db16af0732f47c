//! GUI terminal: scrolling output, an input line with history and a blinking caret.
//!
//! [`TerminalState`] only edits text. Running a submitted command is left to
//! the caller (see `app::TerminalApp`), which feeds the result back through
//! [`TerminalState::apply`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use super::{Dispatch, ShellAction};
use crate::draw::primitives::{
    draw_drop_shadow, draw_rect_border, fill_circle, fill_rounded_rect, fill_vertical_gradient,
};
use crate::draw::{Color, FontDescriptor, Surface, Theme};
use crate::geometry::Rect;
use crate::input::Key;

pub const TITLE: &str = "Atelier Terminal";
pub const WELCOME: &str = "Atelier Terminal. Type help for commands.";
pub const PLACEHOLDER: &str = "Type a command…";

/// Caret on/off period.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

const HEADER_HEIGHT: i32 = 72;
const TITLE_SIZE: f64 = 20.0;
const TEXT_SIZE: f64 = 16.0;
const MARGIN: i32 = 40;
const INPUT_HEIGHT: i32 = 62;

const BACKGROUND_TOP: Color = Color::rgb(6, 10, 16);
const BACKGROUND_BOTTOM: Color = Color::rgb(10, 16, 26);
const ACCENT_BLUE: Color = Color::new(90, 160, 255, 200);
const ACCENT_TEAL: Color = Color::new(90, 255, 210, 200);
const HEADER_UNDERLINE: Color = Color::new(60, 120, 220, 80);
const INPUT_INNER_BORDER: Color = Color::new(80, 150, 255, 90);

/// Panel rectangles for a terminal window of the given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalLayout {
    pub header: Rect,
    pub output: Rect,
    pub input: Rect,
}

impl TerminalLayout {
    pub fn new(width: i32, height: i32) -> Self {
        let inner_width = (width - 2 * MARGIN).max(0);
        let input_y = height - 120;
        Self {
            header: Rect::new(0, 0, width, HEADER_HEIGHT),
            output: Rect::new(MARGIN, 100, inner_width, (input_y - 20 - 100).max(0)),
            input: Rect::new(MARGIN, input_y, inner_width, INPUT_HEIGHT),
        }
    }
}

pub struct TerminalState {
    output: VecDeque<String>,
    input: String,
    history: Vec<String>,
    /// Index into `history` while browsing with Up/Down
    history_pos: Option<usize>,
    history_limit: usize,
    caret_visible: bool,
    last_blink: Instant,
    width: i32,
    height: i32,
    /// Set when the terminal window should close
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl TerminalState {
    pub fn new(width: u32, height: u32, history_limit: usize) -> Self {
        let mut state = Self {
            output: VecDeque::new(),
            input: String::new(),
            history: Vec::new(),
            history_pos: None,
            history_limit: history_limit.max(1),
            caret_visible: true,
            last_blink: Instant::now(),
            width: width as i32,
            height: height as i32,
            should_exit: false,
            needs_redraw: true,
        };
        state.push_line(WELCOME);
        state
    }

    pub fn output(&self) -> impl Iterator<Item = &str> {
        self.output.iter().map(String::as_str)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    pub fn layout(&self) -> TerminalLayout {
        TerminalLayout::new(self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as i32;
        self.height = height as i32;
        self.needs_redraw = true;
    }

    /// Appends an output line, dropping the oldest beyond the history limit.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.output.push_back(line.into());
        while self.output.len() > self.history_limit {
            self.output.pop_front();
        }
        self.needs_redraw = true;
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
        self.needs_redraw = true;
    }

    /// Processes a key press. Returns the command line when Return submits one.
    pub fn on_key_press(&mut self, key: Key) -> Option<String> {
        self.show_caret();
        match key {
            Key::Char(c) if !c.is_control() => {
                self.input.push(c);
                self.history_pos = None;
            }
            Key::Backspace => {
                self.input.pop();
            }
            Key::Return => return self.submit(),
            Key::Up => self.history_back(),
            Key::Down => self.history_forward(),
            Key::Escape => self.should_exit = true,
            _ => return None,
        }
        self.needs_redraw = true;
        None
    }

    fn submit(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.input);
        self.history_pos = None;
        self.needs_redraw = true;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.push_line(format!("> {trimmed}"));
        if self.history.last().map(String::as_str) != Some(trimmed) {
            self.history.push(trimmed.to_string());
        }
        debug!("Terminal submitted '{}'", trimmed);
        Some(trimmed.to_string())
    }

    fn history_back(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => self.history.len() - 1,
            Some(p) => p.saturating_sub(1),
        };
        self.history_pos = Some(pos);
        self.input = self.history[pos].clone();
    }

    fn history_forward(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            self.input = self.history[pos + 1].clone();
        } else {
            self.history_pos = None;
            self.input.clear();
        }
    }

    /// Shows a command's output and performs its follow-up action.
    pub fn apply(&mut self, dispatch: Dispatch) {
        match dispatch.action {
            ShellAction::Clear => self.clear_output(),
            ShellAction::Exit => self.should_exit = true,
            ShellAction::Continue => {}
        }
        for line in dispatch.lines {
            self.push_line(line);
        }
    }

    fn show_caret(&mut self) {
        self.caret_visible = true;
        self.last_blink = Instant::now();
    }

    /// Advances the caret blink; call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_blink) >= BLINK_INTERVAL {
            self.caret_visible = !self.caret_visible;
            self.last_blink = now;
            self.needs_redraw = true;
        }
    }

    /// Draws the whole terminal window.
    pub fn render<S: Surface + ?Sized>(&self, s: &mut S, theme: &Theme, font: &FontDescriptor) {
        let layout = self.layout();
        fill_vertical_gradient(
            s,
            Rect::new(0, 0, self.width, self.height),
            BACKGROUND_TOP,
            BACKGROUND_BOTTOM,
        );

        // Header
        s.fill_rect(layout.header, theme.panel_accent);
        fill_circle(s, 28, HEADER_HEIGHT / 2, 6, ACCENT_BLUE);
        fill_circle(s, 46, HEADER_HEIGHT / 2, 6, ACCENT_TEAL);
        let (title_w, title_h) = s.text_size(TITLE, font, TITLE_SIZE);
        s.draw_text(
            TITLE,
            (self.width - title_w) / 2,
            (HEADER_HEIGHT - title_h) / 2,
            font,
            TITLE_SIZE,
            theme.text_primary,
        );
        s.fill_rect(
            Rect::new(MARGIN, HEADER_HEIGHT - 1, self.width - 2 * MARGIN, 1),
            HEADER_UNDERLINE,
        );

        self.render_output(s, theme, font, layout.output);
        self.render_input(s, theme, font, layout.input);
    }

    fn render_output<S: Surface + ?Sized>(
        &self,
        s: &mut S,
        theme: &Theme,
        font: &FontDescriptor,
        panel: Rect,
    ) {
        draw_drop_shadow(s, panel, 16, 8, Color::new(0, 0, 0, 55));
        fill_rounded_rect(s, panel, 16, theme.panel);

        let line_height = s.text_size("Ag", font, TEXT_SIZE).1 + 2;
        if line_height <= 0 {
            return;
        }
        let visible = ((panel.height - 24) / line_height).max(0) as usize;
        let skip = self.output.len().saturating_sub(visible);

        s.set_clip(Some(panel));
        for (row, line) in self.output.iter().skip(skip).enumerate() {
            s.draw_text(
                line,
                panel.x + 16,
                panel.y + 12 + row as i32 * line_height,
                font,
                TEXT_SIZE,
                theme.text_primary,
            );
        }
        s.set_clip(None);
    }

    fn render_input<S: Surface + ?Sized>(
        &self,
        s: &mut S,
        theme: &Theme,
        font: &FontDescriptor,
        panel: Rect,
    ) {
        draw_drop_shadow(s, panel, 14, 6, Color::new(0, 0, 0, 65));
        fill_rounded_rect(s, panel, 14, theme.input_bg);
        draw_rect_border(s, panel, INPUT_INNER_BORDER);
        draw_rect_border(s, panel.inflated(1), theme.input_border);

        let text_x = panel.x + 16;
        let text_y = panel.y + 16;
        if self.input.is_empty() {
            s.draw_text(
                PLACEHOLDER,
                text_x,
                text_y,
                font,
                TEXT_SIZE,
                theme.text_secondary,
            );
        } else {
            s.set_clip(Some(panel));
            s.draw_text(
                &self.input,
                text_x,
                text_y,
                font,
                TEXT_SIZE,
                theme.text_primary,
            );
            s.set_clip(None);
        }

        if self.caret_visible {
            let typed_width = if self.input.is_empty() {
                0
            } else {
                s.text_size(&self.input, font, TEXT_SIZE).0
            };
            let caret_x = (text_x + typed_width + 2).min(panel.x + panel.width - 8);
            s.fill_rect(
                Rect::new(caret_x, panel.y + 14, 2, panel.height - 28),
                theme.cursor,
            );
        }
    }
}
