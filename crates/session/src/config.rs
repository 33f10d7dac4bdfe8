// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Session configuration loaded from TOML files or constructed programmatically.
//!
//! Every key is optional; the defaults match the serial device protocol
//! (CR-terminated lines of seven integers, 64-byte buffer, 2 KB arena).
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/sine_extrapolator.json"
//! arena_size = "2K"
//! line_capacity = 64
//! expected_values = 7
//! terminator = "cr"          # "cr" | "lf" | "any"
//! line_ending = "lf"         # "lf" | "crlf"
//! parse_mode = "permissive"  # "permissive" | "strict"
//! echo = true
//! startup_delay_ms = 0
//! poll_interval_ms = 1
//! ```

use crate::SessionError;
use memory_manager::ArenaSize;
use std::path::{Path, PathBuf};

/// Which byte(s) end a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// Carriage return (13), as sent by a serial terminal's Enter key.
    #[default]
    Cr,
    /// Line feed (10).
    Lf,
    /// Either; an LF directly after a CR is swallowed so CRLF ends one line.
    Any,
}

impl LineTerminator {
    /// Returns `true` if `byte` ends a line in this mode.
    pub fn matches(self, byte: u8) -> bool {
        match self {
            Self::Cr => byte == b'\r',
            Self::Lf => byte == b'\n',
            Self::Any => byte == b'\r' || byte == b'\n',
        }
    }

    /// The byte appended when a line is submitted programmatically.
    pub fn byte(self) -> u8 {
        match self {
            Self::Lf => b'\n',
            Self::Cr | Self::Any => b'\r',
        }
    }
}

/// What ends each line written to the output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    /// CR LF, byte-for-byte what a serial `println` sends.
    Crlf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::Crlf => b"\r\n",
        }
    }
}

/// How tokens are converted to integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Best effort: leading digits are used, anything unparsable becomes 0.
    #[default]
    Permissive,
    /// Every converted token must be a complete integer.
    Strict,
}

/// Configuration for a prediction session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Model manifest to load. `None` selects the built-in model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    /// Tensor arena size (human-readable, e.g. `"2K"`).
    pub arena_size: String,
    /// Line buffer capacity in bytes; a line holds at most `capacity - 1`.
    pub line_capacity: usize,
    /// Number of integers per request.
    pub expected_values: usize,
    /// Line terminator.
    pub terminator: LineTerminator,
    /// Ending of every output line.
    pub line_ending: LineEnding,
    /// Integer conversion mode.
    pub parse_mode: ParseMode,
    /// Echo every received byte to the output stream.
    pub echo: bool,
    /// Wait before printing the banner.
    pub startup_delay_ms: u64,
    /// Sleep between polls when no input is available.
    pub poll_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            arena_size: "2K".to_string(),
            line_capacity: 64,
            expected_values: 7,
            terminator: LineTerminator::Cr,
            line_ending: LineEnding::Lf,
            parse_mode: ParseMode::Permissive,
            echo: true,
            startup_delay_ms: 0,
            poll_interval_ms: 1,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SessionError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SessionError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses the arena size string.
    pub fn parse_arena(&self) -> Result<ArenaSize, SessionError> {
        ArenaSize::parse(&self.arena_size)
            .map_err(|e| SessionError::InvalidConfig(format!("arena_size: {e}")))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.line_capacity < 2 {
            return Err(SessionError::InvalidConfig(format!(
                "line_capacity must be at least 2, got {}",
                self.line_capacity
            )));
        }
        if self.expected_values == 0 {
            return Err(SessionError::InvalidConfig(
                "expected_values must be at least 1".into(),
            ));
        }
        self.parse_arena()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_device_protocol() {
        let c = SessionConfig::default();
        assert_eq!(c.line_capacity, 64);
        assert_eq!(c.expected_values, 7);
        assert_eq!(c.terminator, LineTerminator::Cr);
        assert_eq!(c.parse_arena().unwrap().as_bytes(), 2048);
        assert!(c.echo);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let c = SessionConfig::from_toml(
            r#"
arena_size = "4K"
terminator = "any"
line_ending = "crlf"
parse_mode = "strict"
echo = false
"#,
        )
        .unwrap();
        assert_eq!(c.parse_arena().unwrap().as_bytes(), 4096);
        assert_eq!(c.terminator, LineTerminator::Any);
        assert_eq!(c.line_ending.as_bytes(), b"\r\n");
        assert_eq!(c.parse_mode, ParseMode::Strict);
        assert!(!c.echo);
        assert_eq!(c.line_capacity, 64);
        assert!(c.model_path.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            SessionConfig::from_toml("baud = 9600"),
            Err(SessionError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = SessionConfig {
            model_path: Some(PathBuf::from("/tmp/model.json")),
            poll_interval_ms: 5,
            ..Default::default()
        };
        let back = SessionConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_validate_ranges() {
        let c = SessionConfig {
            line_capacity: 1,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = SessionConfig {
            expected_values: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = SessionConfig {
            arena_size: "lots".into(),
            ..Default::default()
        };
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("arena_size"), "{err}");
    }

    #[test]
    fn test_terminator_matching() {
        assert!(LineTerminator::Cr.matches(b'\r'));
        assert!(!LineTerminator::Cr.matches(b'\n'));
        assert!(LineTerminator::Lf.matches(b'\n'));
        assert!(LineTerminator::Any.matches(b'\r'));
        assert!(LineTerminator::Any.matches(b'\n'));
        assert_eq!(LineTerminator::Lf.byte(), b'\n');
        assert_eq!(LineTerminator::Any.byte(), b'\r');
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::from_file(Path::new("/nonexistent/predictor.toml")).unwrap_err();
        assert!(matches!(err, SessionError::ConfigRead { .. }));
    }
}
