//! Error types for dstree

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DsTreeError {
    /// The path handed to the walker is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DsTreeError>;
