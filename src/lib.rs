//! dstree - disk usage as a tree, showing only what is big enough to matter

pub mod error;
pub mod fs;
pub mod logging;
pub mod output;
pub mod size;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::DsTreeError;
pub use fs::{DirChild, EntryKind, FileSystem, OsFileSystem, ensure_directory};
pub use output::{
    ConsoleFormatter, DiskUsage, JsonBuilder, OutputConfig, ScanSummary, format_size, print_json,
    write_header, write_json,
};
pub use size::SizeAggregator;
pub use tree::{RenderedNode, ScanConfig, SizeNode, SizeOutput, SizeThreshold, SizeTreeWalker};
