//! Filesystem access used by the size aggregator and the tree walker
//!
//! Everything dstree reads from disk goes through the [`FileSystem`] trait:
//! listing the children of a directory and sizing a single file. The real
//! implementation is [`OsFileSystem`]; tests plug in an in-memory one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DsTreeError, Result};

/// What a directory listing reports a child to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Anything that is neither sized nor descended (symlinks to directories,
    /// dangling symlinks).
    Other,
}

/// One child returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirChild {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Final path component, lossily converted for display.
    pub fn name(&self) -> String {
        display_name(&self.path)
    }
}

/// Read-only view of a filesystem.
pub trait FileSystem {
    /// List the immediate children of `path`.
    ///
    /// The returned listing is fully collected: no directory handle outlives
    /// the call.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirChild>>;

    /// Byte size of a single file.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn is_dir(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let child_path = entry.path();
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => EntryKind::Dir,
                // Symlinks are never descended; a link to a regular file is
                // sized as that file.
                Ok(ft) if ft.is_symlink() => match fs::metadata(&child_path) {
                    Ok(meta) if meta.is_file() => EntryKind::File,
                    _ => EntryKind::Other,
                },
                Ok(_) => EntryKind::File,
                Err(e) => {
                    debug!(path = %child_path.display(), error = %e, "cannot determine file type");
                    EntryKind::Other
                }
            };
            children.push(DirChild::new(child_path, kind));
        }
        Ok(children)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Fail with [`DsTreeError::InvalidRoot`] unless `path` is a directory.
pub fn ensure_directory<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    if fs.is_dir(path) {
        Ok(())
    } else {
        Err(DsTreeError::InvalidRoot(path.to_path_buf()))
    }
}

/// Last path component as a display string, falling back to the whole path
/// (e.g. for `/` or `..`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    #[test]
    fn test_list_dir_reports_kinds() {
        let dir = TestDir::new();
        dir.add_sized_file("file.bin", 10);
        dir.add_dir("sub");

        let mut children = OsFileSystem.list_dir(dir.path()).unwrap();
        children.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name(), "file.bin");
        assert_eq!(children[0].kind, EntryKind::File);
        assert_eq!(children[1].name(), "sub");
        assert_eq!(children[1].kind, EntryKind::Dir);
    }

    #[test]
    #[cfg(unix)]
    fn test_list_dir_does_not_follow_directory_symlinks() {
        let dir = TestDir::new();
        dir.add_sized_file("real/data.bin", 100);
        dir.add_sized_file("target.bin", 5);
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("dirlink")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.bin"), dir.path().join("filelink"))
            .unwrap();
        std::os::unix::fs::symlink("missing", dir.path().join("dangling")).unwrap();

        let children = OsFileSystem.list_dir(dir.path()).unwrap();
        let kind_of = |name: &str| {
            children
                .iter()
                .find(|c| c.name() == name)
                .map(|c| c.kind)
                .unwrap()
        };

        assert_eq!(kind_of("real"), EntryKind::Dir);
        assert_eq!(kind_of("dirlink"), EntryKind::Other);
        assert_eq!(kind_of("filelink"), EntryKind::File);
        assert_eq!(kind_of("dangling"), EntryKind::Other);
    }

    #[test]
    fn test_list_dir_missing_path_is_error() {
        let dir = TestDir::new();
        assert!(OsFileSystem.list_dir(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_ensure_directory() {
        let dir = TestDir::new();
        let file = dir.add_sized_file("plain.txt", 3);

        assert!(ensure_directory(&OsFileSystem, dir.path()).is_ok());
        match ensure_directory(&OsFileSystem, &file) {
            Err(DsTreeError::InvalidRoot(p)) => assert_eq!(p, file),
            other => panic!("expected InvalidRoot, got {:?}", other),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_full_path() {
        assert_eq!(display_name(Path::new("a/b/c.txt")), "c.txt");
        assert_eq!(display_name(Path::new("/")), "/");
        assert_eq!(display_name(Path::new("..")), "..");
    }
}
