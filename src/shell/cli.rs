//! Plain stdin/stdout command loop, used with `--cli` or when no window can be opened.

use std::io::{self, BufRead, Write};

use super::{SessionLauncher, Shell, ShellAction};

pub const BANNER: &str = "Atelier Terminal — type 'help' for commands. Type 'exit' to quit.";
pub const PROMPT: &str = "> ";

/// ANSI "erase display, cursor home".
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Reads commands from `input` until `exit`, a session's exit request or end of input.
pub fn run_cli<R, W, L>(input: R, output: &mut W, shell: &mut Shell<L>) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    L: SessionLauncher,
{
    writeln!(output, "{BANNER}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            break;
        };

        let dispatch = shell.execute(&line);
        for text in &dispatch.lines {
            writeln!(output, "{text}")?;
        }
        match dispatch.action {
            ShellAction::Continue => {}
            ShellAction::Clear => write!(output, "{CLEAR_SCREEN}")?,
            ShellAction::Exit => break,
        }
    }
    log::info!("Command loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::FakeLauncher;
    use crate::shell::{SessionKind, SessionOutcome, UNKNOWN_COMMAND};
    use std::path::PathBuf;

    fn run(script: &str, launcher: FakeLauncher) -> (String, Shell<FakeLauncher>) {
        let mut shell = Shell::new(PathBuf::from("/nonexistent/commands.json"), launcher);
        let mut out = Vec::new();
        run_cli(script.as_bytes(), &mut out, &mut shell).unwrap();
        (String::from_utf8(out).unwrap(), shell)
    }

    #[test]
    fn prints_banner_prompts_and_replies() {
        let (out, _) = run("foo\nexit\nhelp\n", FakeLauncher::default());
        assert!(out.starts_with(BANNER));
        assert!(out.contains(UNKNOWN_COMMAND));
        // Nothing after exit is executed.
        assert!(!out.contains("Cannot open commands file"));
        assert_eq!(out.matches(PROMPT).count(), 2);
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let (out, _) = run("", FakeLauncher::default());
        assert!(out.ends_with(&format!("{PROMPT}\n")));
    }

    #[test]
    fn editor_exit_request_stops_the_loop() {
        let mut launcher = FakeLauncher::default();
        launcher.outcomes.push_back(Ok(SessionOutcome::ExitShell));
        let (out, mut shell) = run("edit\nfoo\n", launcher);
        assert!(!out.contains(UNKNOWN_COMMAND));
        assert_eq!(shell.launcher_mut().launched, vec![SessionKind::Editor]);
    }

    #[test]
    fn clear_emits_the_erase_sequence() {
        let (out, _) = run("clear\n", FakeLauncher::default());
        assert!(out.contains(CLEAR_SCREEN));
    }
}
