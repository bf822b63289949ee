//! Test utilities: temporary directory trees and an in-memory filesystem.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fs::{DirChild, EntryKind, FileSystem};

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

/// A temporary directory for testing.
///
/// Files are created sparse with `File::set_len`, so multi-gigabyte trees cost
/// no real disk space. The directory is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given logical length.
    ///
    /// Creates parent directories as needed.
    pub fn add_sized_file(&self, path: &str, len: u64) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        let file = File::create(&full_path).expect("Failed to create file");
        file.set_len(len).expect("Failed to set file length");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum MemNode {
    File(u64),
    Dir,
    /// Listed by its parent but cannot itself be listed.
    LockedDir,
    /// Listed by its parent but vanishes before it can be sized.
    VanishedFile,
}

/// In-memory [`FileSystem`] for exercising failure paths deterministically.
///
/// Paths are relative (e.g. `"root/a/file.bin"`); adding an entry implicitly
/// creates its ancestor directories.
#[derive(Debug, Default, Clone)]
pub struct MemFileSystem {
    nodes: BTreeMap<PathBuf, MemNode>,
}

impl MemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, len: u64) -> Self {
        self.insert(path, MemNode::File(len));
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.insert(path, MemNode::Dir);
        self
    }

    pub fn locked_dir(mut self, path: &str) -> Self {
        self.insert(path, MemNode::LockedDir);
        self
    }

    pub fn vanished_file(mut self, path: &str) -> Self {
        self.insert(path, MemNode::VanishedFile);
        self
    }

    fn insert(&mut self, path: &str, node: MemNode) {
        let path = PathBuf::from(path);
        let mut ancestor = path.parent();
        while let Some(p) = ancestor {
            if p.as_os_str().is_empty() {
                break;
            }
            self.nodes.entry(p.to_path_buf()).or_insert(MemNode::Dir);
            ancestor = p.parent();
        }
        self.nodes.insert(path, node);
    }
}

impl FileSystem for MemFileSystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        match self.nodes.get(path) {
            Some(MemNode::Dir) => {}
            Some(MemNode::LockedDir) => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            Some(_) => {
                return Err(io::Error::other("not a directory"));
            }
            None => {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
            }
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, node)| {
                let kind = match node {
                    MemNode::Dir | MemNode::LockedDir => EntryKind::Dir,
                    MemNode::File(_) | MemNode::VanishedFile => EntryKind::File,
                };
                DirChild::new(p.clone(), kind)
            })
            .collect())
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        match self.nodes.get(path) {
            Some(MemNode::File(len)) => Ok(*len),
            Some(MemNode::VanishedFile) | None => {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            }
            Some(_) => Err(io::Error::other("is a directory")),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(
            self.nodes.get(path),
            Some(MemNode::Dir | MemNode::LockedDir)
        )
    }
}
