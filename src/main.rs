use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};

use atelier::app::{WaylandLauncher, run_terminal};
use atelier::config::Config;
use atelier::shell::{Shell, cli::run_cli};
use atelier::workspace;

#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(version, about = "Terminal-styled shape editor and viewer for Wayland")]
struct Cli {
    /// Use the plain stdin command loop instead of the terminal window
    #[arg(long, action = ArgAction::SetTrue)]
    cli: bool,

    /// Directory holding the shape files (overrides ./.cwd)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Command metadata file read by `help`
    #[arg(long, value_name = "FILE")]
    commands: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {:#}. Using defaults.", e);
            Config::default()
        }
    };

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => workspace::read_cwd_file(Path::new("."))
            .context("Cannot determine the document directory")?,
    };
    let commands = cli.commands.unwrap_or_else(|| config.commands_path());
    info!("Documents in {}", base_dir.display());
    info!("Command help from {}", commands.display());

    let make_shell = || {
        Shell::new(
            commands.clone(),
            WaylandLauncher::new(config.clone(), base_dir.clone()),
        )
    };

    if config.shell.prefer_gui && !cli.cli {
        match run_terminal(make_shell(), &config) {
            Ok(()) => {
                info!("Terminal closed");
                return Ok(());
            }
            Err(e) => warn!("Terminal window unavailable ({:#}); using the command loop", e),
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_cli(stdin.lock(), &mut stdout, &mut make_shell()).context("Command loop failed")?;
    Ok(())
}
