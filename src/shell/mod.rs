//! Command shell: parses commands and dispatches them to help, the viewer or the editor.
//!
//! Two front ends share [`Shell::dispatch`]: the GUI terminal window
//! ([`terminal`]) and the plain stdin loop ([`cli`]). Opening windows is behind
//! [`SessionLauncher`] so the dispatcher can be driven without a display.

pub mod cli;
pub mod help;
pub mod terminal;

pub use help::{HelpError, HelpIndex};
pub use terminal::TerminalState;

use log::{info, warn};
use std::path::PathBuf;

/// Printed for anything that is not a known command.
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type 'help'.";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Open the read-only viewer
    Draw,
    /// Open the shape editor
    Edit,
    Clear,
    /// `exit` or `quit`
    Exit,
    /// Blank line
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            "help" => Command::Help,
            "draw" => Command::Draw,
            "edit" => Command::Edit,
            "clear" => Command::Clear,
            "exit" | "quit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Which window a command opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Viewer,
    Editor,
}

impl SessionKind {
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Viewer => "viewer",
            SessionKind::Editor => "editor",
        }
    }
}

/// How a window session ended, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionOutcome {
    /// Keep reading commands
    #[default]
    Continue,
    /// The session asked the shell to quit as well (Shift+D in the editor)
    ExitShell,
}

/// Opens viewer and editor windows and blocks until they close.
pub trait SessionLauncher {
    fn launch(&mut self, kind: SessionKind) -> anyhow::Result<SessionOutcome>;
}

/// What a front end should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    /// Wipe the visible output
    Clear,
    Exit,
}

/// Output lines plus the follow-up action for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub lines: Vec<String>,
    pub action: ShellAction,
}

impl Dispatch {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            action: ShellAction::Continue,
        }
    }

    fn action(action: ShellAction) -> Self {
        Self {
            lines: Vec::new(),
            action,
        }
    }
}

/// Command dispatcher shared by both front ends.
pub struct Shell<L> {
    commands_file: PathBuf,
    launcher: L,
}

impl<L: SessionLauncher> Shell<L> {
    pub fn new(commands_file: PathBuf, launcher: L) -> Self {
        Self {
            commands_file,
            launcher,
        }
    }

    pub fn launcher_mut(&mut self) -> &mut L {
        &mut self.launcher
    }

    /// Parses and runs one line of input.
    pub fn execute(&mut self, line: &str) -> Dispatch {
        self.dispatch(Command::parse(line))
    }

    /// Runs `command`. Viewer and editor commands block until the window closes.
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        match command {
            Command::Empty => Dispatch::lines(Vec::new()),
            Command::Help => Dispatch::lines(self.help_lines()),
            Command::Clear => Dispatch::action(ShellAction::Clear),
            Command::Exit => Dispatch::action(ShellAction::Exit),
            Command::Draw => self.open(SessionKind::Viewer),
            Command::Edit => self.open(SessionKind::Editor),
            Command::Unknown(text) => {
                info!("Unknown command: {}", text);
                Dispatch::lines(vec![UNKNOWN_COMMAND.to_string()])
            }
        }
    }

    /// Re-reads the metadata file on every call so edits show up immediately.
    fn help_lines(&self) -> Vec<String> {
        match HelpIndex::load(&self.commands_file) {
            Ok(index) => index.lines(),
            Err(err) => {
                warn!("{}", err);
                vec![err.to_string()]
            }
        }
    }

    fn open(&mut self, kind: SessionKind) -> Dispatch {
        info!("Opening {}", kind.label());
        match self.launcher.launch(kind) {
            Ok(SessionOutcome::Continue) => Dispatch::lines(Vec::new()),
            Ok(SessionOutcome::ExitShell) => {
                info!("{} asked the shell to exit", kind.label());
                Dispatch::action(ShellAction::Exit)
            }
            Err(err) => {
                warn!("Could not open {}: {:#}", kind.label(), err);
                Dispatch::lines(vec![format!("Failed to open {}: {}", kind.label(), err)])
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Records launches and replays canned outcomes.
    #[derive(Default)]
    pub(crate) struct FakeLauncher {
        pub(crate) launched: Vec<SessionKind>,
        pub(crate) outcomes: VecDeque<anyhow::Result<SessionOutcome>>,
    }

    impl SessionLauncher for FakeLauncher {
        fn launch(&mut self, kind: SessionKind) -> anyhow::Result<SessionOutcome> {
            self.launched.push(kind);
            self.outcomes
                .pop_front()
                .unwrap_or(Ok(SessionOutcome::Continue))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeLauncher;
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_recognizes_every_command() {
        assert_eq!(Command::parse("  help "), Command::Help);
        assert_eq!(Command::parse("draw"), Command::Draw);
        assert_eq!(Command::parse("edit"), Command::Edit);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("quit"), Command::Exit);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("Edit"), Command::Unknown("Edit".into()));
    }

    #[test]
    fn unknown_command_prints_the_hint() {
        let mut shell = Shell::new(PathBuf::from("/nonexistent"), FakeLauncher::default());
        let out = shell.execute("paint");
        assert_eq!(out.lines, vec![UNKNOWN_COMMAND.to_string()]);
        assert_eq!(out.action, ShellAction::Continue);
    }

    #[test]
    fn help_lists_scraped_commands_or_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commands.json");
        let mut shell = Shell::new(path.clone(), FakeLauncher::default());

        let out = shell.execute("help");
        assert_eq!(
            out.lines,
            vec![format!("Cannot open commands file: {}", path.display())]
        );

        fs::write(&path, "{\n  \"edit\": { \"description\": \"Edit shapes\" }\n}\n").unwrap();
        assert_eq!(shell.execute("help").lines, vec!["edit - Edit shapes"]);
    }

    #[test]
    fn draw_and_edit_open_the_matching_session() {
        let mut shell = Shell::new(PathBuf::new(), FakeLauncher::default());
        assert_eq!(shell.execute("draw").action, ShellAction::Continue);
        assert_eq!(shell.execute("edit").action, ShellAction::Continue);
        assert_eq!(
            shell.launcher_mut().launched,
            vec![SessionKind::Viewer, SessionKind::Editor]
        );
    }

    #[test]
    fn session_exit_request_ends_the_shell() {
        let mut launcher = FakeLauncher::default();
        launcher.outcomes.push_back(Ok(SessionOutcome::ExitShell));
        let mut shell = Shell::new(PathBuf::new(), launcher);
        assert_eq!(shell.execute("edit").action, ShellAction::Exit);
    }

    #[test]
    fn launch_failure_is_reported_and_the_shell_continues() {
        let mut launcher = FakeLauncher::default();
        launcher
            .outcomes
            .push_back(Err(anyhow::anyhow!("no display")));
        let mut shell = Shell::new(PathBuf::new(), launcher);
        let out = shell.execute("draw");
        assert_eq!(out.action, ShellAction::Continue);
        assert_eq!(out.lines, vec!["Failed to open viewer: no display"]);
    }

    #[test]
    fn clear_and_exit_map_to_actions() {
        let mut shell = Shell::new(PathBuf::new(), FakeLauncher::default());
        assert_eq!(shell.execute("clear").action, ShellAction::Clear);
        assert_eq!(shell.execute("quit").action, ShellAction::Exit);
        assert!(shell.launcher_mut().launched.is_empty());
    }
}
