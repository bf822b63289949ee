//! Size tree formatting and display
//!
//! This module provides formatters for outputting size trees:
//! - Console output with colors, streamed line by line
//! - JSON output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Size formatting, color bands and progress bars
//! - `console` - Streaming console formatter
//! - `json` - JSON tree builder and printer
//! - `header` - Disk usage header and color legends

mod config;
mod console;
mod header;
mod json;
mod utils;

// Re-export public types and functions
pub use config::OutputConfig;
pub use console::ConsoleFormatter;
pub use header::{DiskUsage, ScanSummary, write_header};
pub use json::{JsonBuilder, print_json, write_json};
pub use utils::{
    BAR_WIDTH, NAME_WIDTH, SIZE_WIDTH, SizeBand, UsageBand, bar_glyphs, format_size,
    write_progress_bar, write_size,
};
