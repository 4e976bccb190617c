//! Best-score persistence
//!
//! The only thing that survives a restart is one integer, stored as text in a
//! single file. Writes go to a temporary file that is then renamed over the
//! real one, so a crash mid-write leaves the previous value intact.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write best score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Test store configured to refuse writes
    #[error("store is read-only")]
    ReadOnly,
}

/// Load/save a single best score
pub trait BestScoreStore {
    /// Stored value, or 0 when absent or unreadable
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Best score kept as a human-readable integer in one file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = std::fs::remove_file(&tmp);
        })
    }
}

impl BestScoreStore for FileStore {
    fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(score) => score,
                Err(e) => {
                    log::warn!(
                        "Ignoring unparsable best score in {}: {}",
                        self.path.display(),
                        e
                    );
                    0
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.write_atomic(&format!("{score}\n"))
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

/// In-memory store for tests and headless runs without a file
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    /// Make every save fail
    pub read_only: bool,
    pub saves: u32,
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}
