//! Locating the base directory that holds the document files.
//!
//! The base directory is named by a one-line `.cwd` file in the process's
//! current directory. A leading `~` is expanded against `HOME`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the file that points at the document directory.
pub const CWD_FILE: &str = ".cwd";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is empty; it should contain the document directory")]
    Empty { path: PathBuf },

    #[error("HOME is not set, cannot expand '{0}'")]
    NoHome(String),
}

/// Replaces a leading `~` (alone or followed by `/`) with the home directory.
///
/// Other paths are returned unchanged. `~user` forms are not supported and are
/// left as-is.
pub fn expand_home(raw: &str) -> Result<PathBuf, WorkspaceError> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return Ok(PathBuf::from(raw)),
    };
    let home = dirs::home_dir().ok_or_else(|| WorkspaceError::NoHome(raw.to_string()))?;
    Ok(home.join(rest.trim_start_matches('/')))
}

/// Parses the contents of a `.cwd` file: first line, trimmed, home-expanded.
pub fn parse_cwd(contents: &str, origin: &Path) -> Result<PathBuf, WorkspaceError> {
    let line = contents.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return Err(WorkspaceError::Empty {
            path: origin.to_path_buf(),
        });
    }
    expand_home(line)
}

/// Reads `dir/.cwd` and returns the base directory it names.
pub fn read_cwd_file(dir: &Path) -> Result<PathBuf, WorkspaceError> {
    let path = dir.join(CWD_FILE);
    let contents = fs::read_to_string(&path).map_err(|source| WorkspaceError::Unreadable {
        path: path.clone(),
        source,
    })?;
    let base = parse_cwd(&contents, &path)?;
    log::info!("Document directory: {}", base.display());
    Ok(base)
}
