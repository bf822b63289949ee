//! Recursive size aggregation
//!
//! A directory's size is the sum of the sizes of every file beneath it.
//! Failures are absorbed: an unlistable directory or a file that cannot be
//! sized counts as zero bytes and never aborts the surrounding sum.

use std::path::Path;

use tracing::debug;

use crate::fs::{DirChild, EntryKind, FileSystem, OsFileSystem};

/// Computes aggregate sizes over a [`FileSystem`].
///
/// Nothing is cached: every call walks the subtree again.
#[derive(Debug, Clone, Default)]
pub struct SizeAggregator<F = OsFileSystem> {
    fs: F,
}

impl<F: FileSystem> SizeAggregator<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Total bytes of all files reachable under `path`.
    ///
    /// Returns 0 when `path` cannot be listed.
    pub fn compute_size(&self, path: &Path) -> u64 {
        let children = match self.fs.list_dir(path) {
            Ok(children) => children,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot list directory, counting as empty");
                return 0;
            }
        };

        children.iter().map(|child| self.entry_size(child)).sum()
    }

    /// Size of one listed child: aggregate for directories, direct size for
    /// files, zero for anything else.
    pub fn entry_size(&self, child: &DirChild) -> u64 {
        match child.kind {
            EntryKind::Dir => self.compute_size(&child.path),
            EntryKind::File => self.file_size(&child.path),
            EntryKind::Other => 0,
        }
    }

    fn file_size(&self, path: &Path) -> u64 {
        self.fs.file_size(path).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "cannot size file, skipping");
            0
        })
    }
}
