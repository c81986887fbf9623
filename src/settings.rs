//! Game settings
//!
//! Loaded from an optional JSON file, then overridden by the two positional
//! command-line arguments (columns, rows).

use std::num::ParseIntError;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Errors raised while building settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid grid argument '{value}': {source}")]
    InvalidGridArgument {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("brick grid must be at least 1x1 (got {columns}x{rows})")]
    EmptyGrid { columns: u32, rows: u32 },

    #[error("expected 0 or 2 grid arguments (columns rows), got {0}")]
    ArgumentCount(usize),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bricks per row
    pub columns: u32,
    /// Brick rows
    pub rows: u32,
    /// Fixed seed for a reproducible run (random when absent)
    pub seed: Option<u64>,
    /// Frames the headless driver runs before giving up on a round
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            seed: None,
            max_ticks: 60 * 60 * 10,
        }
    }
}

impl Settings {
    /// Default settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "bricker.json";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `FILE_NAME`, falling back to defaults when the file is missing
    pub fn load() -> Result<Self, SettingsError> {
        match Self::load_from(Self::FILE_NAME) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::FILE_NAME);
                Ok(settings)
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Override the grid from positional `columns rows` arguments.
    /// No arguments keeps the current grid.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), SettingsError> {
        match args {
            [] => Ok(()),
            [columns, rows] => {
                self.columns = parse_grid_arg(columns.as_ref())?;
                self.rows = parse_grid_arg(rows.as_ref())?;
                self.validate()
            }
            _ => Err(SettingsError::ArgumentCount(args.len())),
        }
    }

    pub fn brick_count(&self) -> u32 {
        self.columns * self.rows
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SettingsError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

fn parse_grid_arg(value: &str) -> Result<u32, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|source| SettingsError::InvalidGridArgument {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let settings = Settings::default();
        assert_eq!(settings.brick_count(), 56);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.columns, DEFAULT_COLUMNS);
        assert_eq!(settings.rows, DEFAULT_ROWS);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_grid_args_override() {
        let mut settings = Settings::default();
        settings.apply_args(&["4", "3"]).unwrap();
        assert_eq!((settings.columns, settings.rows), (4, 3));

        let no_args: [&str; 0] = [];
        settings.apply_args(&no_args).unwrap();
        assert_eq!(settings.brick_count(), 12);
    }

    #[test]
    fn test_grid_args_rejected() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.apply_args(&["four", "3"]),
            Err(SettingsError::InvalidGridArgument { .. })
        ));
        assert!(matches!(
            settings.apply_args(&["-1", "3"]),
            Err(SettingsError::InvalidGridArgument { .. })
        ));
        assert!(matches!(
            settings.apply_args(&["0", "3"]),
            Err(SettingsError::EmptyGrid { .. })
        ));
        assert!(matches!(
            settings.apply_args(&["5"]),
            Err(SettingsError::ArgumentCount(1))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::load_from("/definitely/not/here/bricker.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
