//! Directory size tree walking
//!
//! `SizeTreeWalker` measures a directory tree and streams every entry above
//! the size threshold to a `SizeOutput`, largest first. Formatters for the
//! console and for JSON live in `crate::output`.

mod config;
mod json_types;
mod walker;

// Re-export public types
pub use config::{DEFAULT_THRESHOLD_GIB, ScanConfig, SizeThreshold};
pub use json_types::SizeNode;
pub use walker::{RenderContext, RenderedNode, SizeOutput, SizeTreeWalker, percent_of};
