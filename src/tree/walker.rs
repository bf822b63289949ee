//! SizeTreeWalker - renders the threshold-filtered size tree
//!
//! The walk is depth-first and streams each surviving entry to a
//! [`SizeOutput`] as soon as it is known, so memory use is O(depth) plus one
//! directory listing per level.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs::{EntryKind, FileSystem, OsFileSystem, display_name};
use crate::size::SizeAggregator;

use super::config::ScanConfig;

/// A surviving entry, as reported to a [`SizeOutput`].
#[derive(Debug, Clone, Copy)]
pub struct RenderedNode<'a> {
    pub name: &'a str,
    pub path: &'a Path,
    pub size: u64,
    pub is_dir: bool,
    pub depth: usize,
    /// Last surviving entry among its siblings.
    pub is_last: bool,
    /// Accumulated tree-drawing prefix (without the branch glyph).
    pub prefix: &'a str,
    /// Share of the parent's aggregate size; `None` for the root.
    pub percent: Option<f64>,
}

impl RenderedNode<'_> {
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Callback for streaming output - receives each surviving entry in display order.
pub trait SizeOutput {
    fn output_node(&mut self, node: &RenderedNode<'_>) -> io::Result<()>;

    /// A bare connector line keeping the vertical tree line continuous
    /// between sibling subtrees.
    fn output_connector(&mut self, prefix: &str) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Recursion state, passed by value into each level.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub prefix: String,
    pub depth: usize,
    pub is_last: bool,
    pub parent_size: Option<u64>,
}

impl RenderContext {
    pub fn root() -> Self {
        Self {
            prefix: String::new(),
            depth: 0,
            is_last: true,
            parent_size: None,
        }
    }

    /// Prefix handed down to this node's children.
    pub fn child_prefix(&self) -> String {
        if self.is_last {
            format!("{}    ", self.prefix)
        } else {
            format!("{}│   ", self.prefix)
        }
    }

    fn child(&self, prefix: String, is_last: bool, parent_size: u64) -> Self {
        Self {
            prefix,
            depth: self.depth + 1,
            is_last,
            parent_size: Some(parent_size),
        }
    }
}

/// Child entry that passed the threshold.
#[derive(Debug)]
struct SizedEntry {
    name: String,
    path: PathBuf,
    size: u64,
    is_dir: bool,
}

/// Walks a directory tree and reports entries whose size exceeds the
/// configured threshold, largest first.
pub struct SizeTreeWalker<F = OsFileSystem> {
    config: ScanConfig,
    sizes: SizeAggregator<F>,
}

impl SizeTreeWalker<OsFileSystem> {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_filesystem(config, OsFileSystem)
    }
}

impl<F: FileSystem> SizeTreeWalker<F> {
    pub fn with_filesystem(config: ScanConfig, fs: F) -> Self {
        Self {
            config,
            sizes: SizeAggregator::new(fs),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walk `root` and stream every surviving entry to `output`.
    ///
    /// Filesystem failures never surface here; only errors from `output`
    /// are returned.
    pub fn walk<O: SizeOutput>(&self, root: &Path, output: &mut O) -> io::Result<()> {
        self.walk_dir(root, RenderContext::root(), output)?;
        output.finish()
    }

    fn walk_dir<O: SizeOutput>(
        &self,
        path: &Path,
        ctx: RenderContext,
        output: &mut O,
    ) -> io::Result<()> {
        if self.config.max_depth.is_some_and(|max| ctx.depth > max) {
            return Ok(());
        }

        let size = self.sizes.compute_size(path);
        if !self.config.threshold.passes(size) {
            return Ok(());
        }

        let name = if ctx.depth == 0 {
            path.display().to_string()
        } else {
            display_name(path)
        };
        output.output_node(&RenderedNode {
            name: &name,
            path,
            size,
            is_dir: true,
            depth: ctx.depth,
            is_last: ctx.is_last,
            prefix: &ctx.prefix,
            percent: ctx.parent_size.map(|parent| percent_of(size, parent)),
        })?;

        if self.config.max_depth == Some(ctx.depth) {
            return Ok(());
        }

        let child_prefix = ctx.child_prefix();
        let entries = self.sorted_entries(path);
        let total = entries.len();

        for (i, entry) in entries.into_iter().enumerate() {
            let is_last = i == total - 1;

            if entry.is_dir {
                let child_ctx = ctx.child(child_prefix.clone(), is_last, size);
                self.walk_dir(&entry.path, child_ctx, output)?;
            } else {
                output.output_node(&RenderedNode {
                    name: &entry.name,
                    path: &entry.path,
                    size: entry.size,
                    is_dir: false,
                    depth: ctx.depth + 1,
                    is_last,
                    prefix: &child_prefix,
                    percent: Some(percent_of(entry.size, size)),
                })?;
            }

            if is_last && !ctx.is_last {
                output.output_connector(&ctx.prefix)?;
            }
        }

        Ok(())
    }

    /// Immediate children of `path` above the threshold, largest first.
    ///
    /// Equal sizes are ordered by name. An unlistable directory has no
    /// children.
    fn sorted_entries(&self, path: &Path) -> Vec<SizedEntry> {
        let children = match self.sizes.filesystem().list_dir(path) {
            Ok(children) => children,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot list children, rendering as empty");
                return Vec::new();
            }
        };

        let mut entries: Vec<SizedEntry> = children
            .into_iter()
            .filter_map(|child| {
                let size = self.sizes.entry_size(&child);
                if !self.config.threshold.passes(size) {
                    return None;
                }
                Some(SizedEntry {
                    name: child.name(),
                    is_dir: child.kind == EntryKind::Dir,
                    path: child.path,
                    size,
                })
            })
            .collect();

        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        entries
    }
}

/// `100 * part / whole`, or 0 for an empty whole.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
