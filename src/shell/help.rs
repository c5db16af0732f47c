//! Command descriptions scraped from a JSON-like metadata file.
//!
//! This is a line scanner, not a JSON parser. A line that starts with a quoted
//! key whose value is an object (`"name": {`, or a bare `"name":` with the brace
//! on the next line) opens that command, a
//! `"description": "..."` entry (on the same line or a later one) describes it,
//! and any `}` closes it:
//!
//! ```text
//! {
//!   "draw": { "description": "Open the viewer" },
//!   "edit": {
//!     "description": "Open the shape editor"
//!   }
//! }
//! ```

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelpError {
    #[error("Cannot open commands file: {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid help pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Ordered command → description pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpIndex {
    entries: Vec<(String, String)>,
}

impl HelpIndex {
    /// Scrapes `text`; the first description seen for a command wins.
    pub fn parse(text: &str) -> Result<Self, HelpError> {
        let key_re = Regex::new(r#"^\s*"([^"]+)"\s*:\s*(?:\{|$)"#)?;
        let desc_re = Regex::new(r#"\s*"description"\s*:\s*"([^"]*)""#)?;

        let mut index = HelpIndex::default();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if let Some(key) = key_re.captures(line).and_then(|c| c.get(1)) {
                current = Some(key.as_str().to_string());
            }

            if let (Some(name), Some(desc)) = (
                current.as_deref(),
                desc_re.captures(line).and_then(|c| c.get(1)),
            ) {
                if index.lookup(name).is_none() {
                    index
                        .entries
                        .push((name.to_string(), desc.as_str().to_string()));
                }
            }

            if line.contains('}') {
                current = None;
            }
        }
        Ok(index)
    }

    /// Reads and scrapes the file at `path`.
    pub fn load(path: &Path) -> Result<Self, HelpError> {
        let text = fs::read_to_string(path).map_err(|source| HelpError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::parse(&text)?;
        log::debug!(
            "Scraped {} command descriptions from {}",
            index.entries.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Output lines for `help`: `name - description`.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, desc)| format!("{name} - {desc}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
  "commands": {
    "help": { "description": "List commands" },
    "draw": {
      "usage": "draw",
      "description": "Open the viewer"
    },
    "edit": {
      "description": "Open the shape editor"
    },
    "clear": {
      "aliases": ["cls"]
    }
  }
}
"#;

    #[test]
    fn scrapes_commands_in_file_order() {
        let index = HelpIndex::parse(SAMPLE).unwrap();
        assert_eq!(
            index.lines(),
            vec![
                "help - List commands",
                "draw - Open the viewer",
                "edit - Open the shape editor",
            ]
        );
    }

    #[test]
    fn lookup_finds_descriptions_by_name() {
        let index = HelpIndex::parse(SAMPLE).unwrap();
        assert_eq!(index.lookup("edit"), Some("Open the shape editor"));
        assert_eq!(index.lookup("clear"), None);
        assert_eq!(index.lookup("commands"), None);
    }

    #[test]
    fn brace_may_open_on_the_next_line() {
        let text = "{\n  \"draw\":\n  {\n    \"usage\": \"draw\",\n    \"description\": \"Open the viewer\"\n  }\n}\n";
        let index = HelpIndex::parse(text).unwrap();
        assert_eq!(index.lines(), vec!["draw - Open the viewer"]);
    }

    #[test]
    fn description_after_closing_brace_is_ignored() {
        let text = "\"a\": {\n}\n  \"description\": \"orphan\"\n";
        assert!(HelpIndex::parse(text).unwrap().entries().is_empty());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commands.json");
        let err = HelpIndex::load(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Cannot open commands file: {}", path.display())
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(HelpIndex::load(&path).unwrap().entries().len(), 3);
    }
}
