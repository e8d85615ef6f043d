use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The ordered list of logged-in display names, persisted as a JSON array.
/// This is the only persistence boundary; the engine never touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("reading roster at {path}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("writing roster at {path}")]
    Write {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("parsing roster")]
    Parse(#[source] serde_json::Error),
}

impl Roster {
    pub const SEATS: usize = 4;

    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load from disk; a missing file is an empty roster, not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| RosterError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        let names = serde_json::from_str(&text).map_err(RosterError::Parse)?;
        Ok(Self { names })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RosterError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(&self.names).map_err(RosterError::Parse)?;
        fs::write(path, text).map_err(|source| RosterError::Write {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn add(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// A table needs four seated players before a game can start.
    pub fn is_complete(&self) -> bool {
        self.names.len() >= Self::SEATS
    }

    /// The four seat names, in login order.
    pub fn seat_names(&self) -> Option<[String; 4]> {
        if !self.is_complete() {
            return None;
        }
        Some(std::array::from_fn(|i| self.names[i].clone()))
    }
}
