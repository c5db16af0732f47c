//! Window applications and the launcher that opens them.
//!
//! Each window type wraps its state machine in a [`WindowApp`] so the Wayland
//! backend can drive it. [`WaylandLauncher`] is the [`SessionLauncher`] used by
//! both shell front ends: it loads the document, opens the viewer or editor and
//! blocks until that window closes.

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::backend::{WindowApp, run_window};
use crate::config::Config;
use crate::document::Document;
use crate::draw::{FontDescriptor, Surface, Theme, ensure_font_available};
use crate::editor::{EditorSettings, EditorState};
use crate::input::{Key, Modifiers, MouseButton};
use crate::shell::{SessionKind, SessionLauncher, SessionOutcome, Shell, TerminalState};
use crate::viewer::ViewerState;

const EDITOR_TITLE: &str = "Atelier Editor";
const VIEWER_TITLE: &str = "Atelier Viewer";

/// Shape editor window; saves the document when it closes.
pub struct EditorApp {
    state: EditorState,
    base_dir: PathBuf,
    size: (u32, u32),
    theme: Theme,
    font: FontDescriptor,
}

impl EditorApp {
    pub fn new(document: Document, base_dir: PathBuf, config: &Config) -> Self {
        let size = (config.window.editor_width, config.window.editor_height);
        Self {
            state: EditorState::new(
                document,
                EditorSettings::from(&config.editor),
                size.0,
                size.1,
            ),
            base_dir,
            size,
            theme: Theme::default(),
            font: config.font_descriptor(),
        }
    }
}

impl WindowApp for EditorApp {
    fn title(&self) -> &str {
        EDITOR_TITLE
    }

    fn initial_size(&self) -> (u32, u32) {
        self.size
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
    }

    fn on_key_press(&mut self, key: Key) {
        self.state.on_key_press(key);
    }

    fn on_modifiers(&mut self, modifiers: Modifiers) {
        self.state.on_modifiers(modifiers);
    }

    fn on_pointer_motion(&mut self, x: i32, y: i32) {
        self.state.on_mouse_motion(x, y);
    }

    fn on_pointer_press(&mut self, button: MouseButton, x: i32, y: i32) {
        self.state.on_mouse_press(button, x, y);
    }

    fn on_pointer_release(&mut self, button: MouseButton, x: i32, y: i32) {
        self.state.on_mouse_release(button, x, y);
    }

    fn on_close_requested(&mut self) {
        self.state.request_exit();
    }

    fn needs_redraw(&self) -> bool {
        self.state.needs_redraw
    }

    fn mark_rendered(&mut self) {
        self.state.needs_redraw = false;
    }

    fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.state.render(surface, &self.theme, &self.font);
    }

    fn finish(self: Box<Self>) -> Result<SessionOutcome> {
        match self.state.document.save(&self.base_dir) {
            Ok(()) => info!(
                "Saved {} shapes to {}",
                self.state.document.shape_count(),
                self.base_dir.display()
            ),
            Err(e) => warn!("Document not saved: {}", e),
        }
        Ok(if self.state.exit_shell {
            SessionOutcome::ExitShell
        } else {
            SessionOutcome::Continue
        })
    }
}

/// Read-only viewer window.
pub struct ViewerApp {
    state: ViewerState,
    size: (u32, u32),
    theme: Theme,
}

impl ViewerApp {
    pub fn new(document: Document, config: &Config) -> Self {
        let size = (config.window.editor_width, config.window.editor_height);
        Self {
            state: ViewerState::new(document, config.editor.stroke_thickness, size.0),
            size,
            theme: Theme::default(),
        }
    }
}

impl WindowApp for ViewerApp {
    fn title(&self) -> &str {
        VIEWER_TITLE
    }

    fn initial_size(&self) -> (u32, u32) {
        self.size
    }

    fn on_resize(&mut self, width: u32, _height: u32) {
        self.state.resize(width);
    }

    fn on_key_press(&mut self, key: Key) {
        self.state.on_key_press(key);
    }

    fn on_modifiers(&mut self, _modifiers: Modifiers) {}

    fn on_pointer_motion(&mut self, _x: i32, _y: i32) {}

    fn on_pointer_press(&mut self, button: MouseButton, x: i32, y: i32) {
        self.state.on_mouse_press(button, x, y);
    }

    fn on_pointer_release(&mut self, _button: MouseButton, _x: i32, _y: i32) {}

    fn on_close_requested(&mut self) {
        self.state.should_exit = true;
    }

    fn needs_redraw(&self) -> bool {
        self.state.needs_redraw
    }

    fn mark_rendered(&mut self) {
        self.state.needs_redraw = false;
    }

    fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.state.render(surface, &self.theme);
    }

    fn finish(self: Box<Self>) -> Result<SessionOutcome> {
        Ok(SessionOutcome::Continue)
    }
}

/// GUI terminal window; commands run between event batches.
pub struct TerminalApp<L> {
    state: TerminalState,
    shell: Shell<L>,
    pending: Option<String>,
    size: (u32, u32),
    theme: Theme,
    font: FontDescriptor,
}

impl<L: SessionLauncher> TerminalApp<L> {
    pub fn new(shell: Shell<L>, config: &Config) -> Self {
        let size = (config.window.terminal_width, config.window.terminal_height);
        Self {
            state: TerminalState::new(size.0, size.1, config.shell.history_limit),
            shell,
            pending: None,
            size,
            theme: Theme::default(),
            font: config.font_descriptor(),
        }
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }
}

impl<L: SessionLauncher + 'static> WindowApp for TerminalApp<L> {
    fn title(&self) -> &str {
        crate::shell::terminal::TITLE
    }

    fn initial_size(&self) -> (u32, u32) {
        self.size
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
    }

    fn on_key_press(&mut self, key: Key) {
        if let Some(command) = self.state.on_key_press(key) {
            self.pending = Some(command);
        }
    }

    fn on_modifiers(&mut self, _modifiers: Modifiers) {}

    fn on_pointer_motion(&mut self, _x: i32, _y: i32) {}

    fn on_pointer_press(&mut self, _button: MouseButton, _x: i32, _y: i32) {}

    fn on_pointer_release(&mut self, _button: MouseButton, _x: i32, _y: i32) {}

    fn on_close_requested(&mut self) {
        self.state.should_exit = true;
    }

    fn tick(&mut self, now: Instant) {
        self.state.tick(now);
    }

    fn is_animating(&self) -> bool {
        true
    }

    fn needs_redraw(&self) -> bool {
        self.state.needs_redraw
    }

    fn mark_rendered(&mut self) {
        self.state.needs_redraw = false;
    }

    fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.state.render(surface, &self.theme, &self.font);
    }

    fn after_dispatch(&mut self) -> Result<()> {
        if let Some(command) = self.pending.take() {
            info!("Terminal command: {}", command);
            let dispatch = self.shell.execute(&command);
            self.state.apply(dispatch);
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<SessionOutcome> {
        Ok(SessionOutcome::Continue)
    }
}

/// Opens viewer and editor windows on the Wayland display.
pub struct WaylandLauncher {
    config: Config,
    base_dir: PathBuf,
}

impl WaylandLauncher {
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }
}

impl SessionLauncher for WaylandLauncher {
    fn launch(&mut self, kind: SessionKind) -> Result<SessionOutcome> {
        ensure_font_available(&self.config.font_descriptor())?;
        let document = Document::load(&self.base_dir);
        info!(
            "Loaded {} shapes from {}",
            document.shape_count(),
            self.base_dir.display()
        );
        let app: Box<dyn WindowApp> = match kind {
            SessionKind::Viewer => Box::new(ViewerApp::new(document, &self.config)),
            SessionKind::Editor => Box::new(EditorApp::new(
                document,
                self.base_dir.clone(),
                &self.config,
            )),
        };
        run_window(app, &self.config.performance)
            .with_context(|| format!("{} window failed", kind.label()))
    }
}

/// Runs the GUI terminal until it closes.
pub fn run_terminal(shell: Shell<WaylandLauncher>, config: &Config) -> Result<()> {
    ensure_font_available(&config.font_descriptor())?;
    let app = Box::new(TerminalApp::new(shell, config));
    run_window(app, &config.performance).context("Terminal window failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Layer, Shape, ShapeType};
    use crate::draw::Color;
    use crate::geometry::Point;
    use crate::shell::testing::FakeLauncher;
    use crate::shell::terminal::WELCOME;
    use tempfile::tempdir;

    fn one_line() -> Document {
        Document::new(
            Layer::new(vec![Shape::new(
                vec![Point::new(0, 0), Point::new(100, 0)],
                Color::rgb(10, 20, 30),
                ShapeType::Line,
            )]),
            Layer::default(),
        )
    }

    #[test]
    fn editor_saves_on_finish_and_reports_shell_exit() {
        let dir = tempdir().unwrap();
        let mut app = EditorApp::new(one_line(), dir.path().to_path_buf(), &Config::default());
        app.on_modifiers(Modifiers {
            shift: true,
            ctrl: false,
            alt: false,
        });
        app.on_key_press(Key::Char('D'));
        app.on_close_requested();
        assert!(app.should_exit());

        let outcome = Box::new(app).finish().unwrap();
        assert_eq!(outcome, SessionOutcome::ExitShell);
        assert_eq!(Document::load(dir.path()), one_line());
    }

    #[test]
    fn editor_without_shift_d_continues_the_shell() {
        let dir = tempdir().unwrap();
        let app = EditorApp::new(Document::default(), dir.path().to_path_buf(), &Config::default());
        assert_eq!(
            Box::new(app).finish().unwrap(),
            SessionOutcome::Continue
        );
    }

    #[test]
    fn viewer_closes_on_request_and_never_asks_the_shell_to_exit() {
        let mut app = ViewerApp::new(one_line(), &Config::default());
        assert_eq!(app.initial_size(), (800, 600));
        app.on_close_requested();
        assert!(app.should_exit());
        assert_eq!(
            Box::new(app).finish().unwrap(),
            SessionOutcome::Continue
        );
    }

    #[test]
    fn terminal_runs_submitted_commands_after_dispatch() {
        let shell = Shell::new(PathBuf::from("/nonexistent"), FakeLauncher::default());
        let mut app = TerminalApp::new(shell, &Config::default());
        for c in "edit".chars() {
            app.on_key_press(Key::Char(c));
        }
        app.on_key_press(Key::Return);
        assert!(app.shell.launcher_mut().launched.is_empty());

        app.after_dispatch().unwrap();
        assert_eq!(app.shell.launcher_mut().launched, vec![SessionKind::Editor]);
        assert_eq!(
            app.state().output().collect::<Vec<_>>(),
            vec![WELCOME, "> edit"]
        );
    }

    #[test]
    fn terminal_exit_command_closes_the_window() {
        let shell = Shell::new(PathBuf::from("/nonexistent"), FakeLauncher::default());
        let mut app = TerminalApp::new(shell, &Config::default());
        for c in "quit".chars() {
            app.on_key_press(Key::Char(c));
        }
        app.on_key_press(Key::Return);
        app.after_dispatch().unwrap();
        assert!(app.should_exit());
    }
}
