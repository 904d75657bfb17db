use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a persisted index cannot be used as-is. Every variant is
/// recoverable by rebuilding from the corpus.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt index: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("index version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}
