//! Configuration file support for atelier.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/atelier/config.toml`. Settings include editor hit-test
//! tolerances, window sizes, shell behavior, the UI font and buffer tuning.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{EditorConfig, FontConfig, PerformanceConfig, ShellConfig, WindowConfig};

use crate::draw::FontDescriptor;
use crate::workspace;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [editor]
/// selection_radius = 12.0
/// delete_tolerance = 14.0
/// stroke_thickness = 2
///
/// [window]
/// editor_width = 800
/// editor_height = 600
///
/// [shell]
/// commands_file = "~/Atelier_lab/Programs/commands.json"
/// prefer_gui = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Hit-test tolerances and stroke settings for the editor
    #[serde(default)]
    pub editor: EditorConfig,

    /// Initial window sizes
    #[serde(default)]
    pub window: WindowConfig,

    /// Command shell settings
    #[serde(default)]
    pub shell: ShellConfig,

    /// UI font
    #[serde(default)]
    pub font: FontConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(value) {
        log::warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

fn clamp_int<T>(name: &str, value: &mut T, min: T, max: T)
where
    T: Ord + Copy + std::fmt::Display,
{
    if !(min..=max).contains(value) {
        log::warn!("Invalid {name} {value}, clamping to {min}-{max} range");
        *value = (*value).clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `editor.selection_radius`, `editor.delete_tolerance`: 2.0 - 64.0
    /// - `editor.stroke_thickness`: 0 - 10
    /// - window sizes: 320 - 4096
    /// - `shell.history_limit`: 50 - 100000
    /// - `performance.buffer_count`: 2 - 4
    pub(crate) fn validate_and_clamp(&mut self) {
        clamp_f64(
            "selection_radius",
            &mut self.editor.selection_radius,
            2.0,
            64.0,
        );
        clamp_f64(
            "delete_tolerance",
            &mut self.editor.delete_tolerance,
            2.0,
            64.0,
        );
        clamp_int(
            "stroke_thickness",
            &mut self.editor.stroke_thickness,
            0,
            10,
        );

        clamp_int("editor_width", &mut self.window.editor_width, 320, 4096);
        clamp_int("editor_height", &mut self.window.editor_height, 320, 4096);
        clamp_int("terminal_width", &mut self.window.terminal_width, 320, 4096);
        clamp_int(
            "terminal_height",
            &mut self.window.terminal_height,
            320,
            4096,
        );

        clamp_int(
            "history_limit",
            &mut self.shell.history_limit,
            50,
            100_000,
        );

        clamp_int(
            "buffer_count",
            &mut self.performance.buffer_count,
            2,
            4,
        );

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.font.weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .font
            .weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font weight '{}', falling back to 'normal'",
                self.font.weight
            );
            self.font.weight = "normal".to_string();
        }

        // Validate font style
        if !matches!(
            self.font.style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font style '{}', falling back to 'normal'",
                self.font.style
            );
            self.font.style = "normal".to_string();
        }

        if self.font.family.trim().is_empty() {
            log::warn!("Empty font family, falling back to 'Sans'");
            self.font.family = "Sans".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/atelier/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("atelier");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads and validates the config at `config_path`; a missing file yields defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config
    /// directory (`atelier --init-config`) and returns where it went.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        // Create directory
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// UI font as a Pango-ready descriptor.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font.family.clone(),
            self.font.weight.clone(),
            self.font.style.clone(),
        )
    }

    /// Help metadata path with `~/` expanded. Falls back to the literal path
    /// when the home directory is unknown.
    pub fn commands_path(&self) -> PathBuf {
        workspace::expand_home(&self.shell.commands_file)
            .unwrap_or_else(|_| PathBuf::from(&self.shell.commands_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.editor.selection_radius, 12.0);
        assert_eq!(config.editor.delete_tolerance, 14.0);
        assert_eq!(config.window.editor_width, 800);
        assert_eq!(config.window.terminal_height, 700);
        assert!(config.shell.prefer_gui);
    }

    #[test]
    fn partial_file_keeps_defaults_for_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[editor]\nstroke_thickness = 4\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.stroke_thickness, 4);
        assert!(config.editor.drag_magnet);
        assert_eq!(config.performance.buffer_count, 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[editor]\nselection_radius = 500.0\nstroke_thickness = -3\n\
             [window]\neditor_width = 10\n\
             [performance]\nbuffer_count = 9\n\
             [font]\nstyle = \"wavy\"\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.selection_radius, 64.0);
        assert_eq!(config.editor.stroke_thickness, 0);
        assert_eq!(config.window.editor_width, 320);
        assert_eq!(config.performance.buffer_count, 4);
        assert_eq!(config.font.style, "normal");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[editor\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses_to_defaults() {
        let mut config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        config.validate_and_clamp();
        assert_eq!(config.editor.selection_radius, 12.0);
        assert_eq!(config.shell.history_limit, 1000);
        assert_eq!(config.font.family, "Sans");
    }
}
