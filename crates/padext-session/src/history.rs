//! Last-used values for the numeric fields.
//!
//! The dialog remembers the most recent length, second length and offset
//! across sessions, and seeds them into a newly created feature. History
//! I/O failures are never fatal; the session just proceeds without it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use padext_ir::PadParams;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persisted last-used values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UsageHistory {
    /// Last accepted nominal length.
    pub length: Option<f64>,
    /// Last accepted second length.
    pub length2: Option<f64>,
    /// Last accepted offset.
    pub offset: Option<f64>,
}

impl UsageHistory {
    /// Platform config path of the history file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "padext").map(|dirs| dirs.config_dir().join("history.toml"))
    }

    /// Load from the default path; any failure yields an empty history.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save to the default path, logging instead of failing.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            warn!("could not save usage history to {}: {e}", path.display());
        }
    }

    /// Save to a specific file.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text =
            toml::to_string(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }

    /// Record the accepted values of a session.
    pub fn remember(&mut self, params: &PadParams) {
        self.length = Some(params.length);
        self.length2 = Some(params.length2);
        self.offset = Some(params.offset);
    }

    /// Seed a newly created feature's fields from history.
    pub fn seed(&self, params: &mut PadParams) {
        if let Some(length) = self.length {
            params.length = length;
        }
        if let Some(length2) = self.length2 {
            params.length2 = length2;
        }
        if let Some(offset) = self.offset {
            params.offset = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_then_seed() {
        let mut history = UsageHistory::default();
        let mut params = PadParams {
            length: 25.0,
            length2: 3.0,
            offset: -1.0,
            ..PadParams::default()
        };
        history.remember(&params);

        params = PadParams::default();
        history.seed(&mut params);
        assert_eq!(params.length, 25.0);
        assert_eq!(params.length2, 3.0);
        assert_eq!(params.offset, -1.0);
    }

    #[test]
    fn empty_history_leaves_defaults() {
        let mut params = PadParams::default();
        UsageHistory::default().seed(&mut params);
        assert_eq!(params, PadParams::default());
    }

    #[test]
    fn toml_roundtrip() {
        let history = UsageHistory {
            length: Some(25.0),
            length2: None,
            offset: Some(0.5),
        };
        let text = toml::to_string(&history).unwrap();
        let restored: UsageHistory = toml::from_str(&text).unwrap();
        assert_eq!(history, restored);
    }
}
