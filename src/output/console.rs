//! Console output formatter
//!
//! `ConsoleFormatter` writes one line per surviving entry as the walker
//! reports it:
//!
//! ```text
//! data/                                          (     2.0GB)
//!     ├──a/                                          (     1.5GB)  ██████████████████████░░░░░░░░  75.0%
//!     │   └──x.bin                                   (     1.5GB)  ██████████████████████████████ 100.0%
//!     │
//!     └──z.bin                                       (   512.0MB)  ███████░░░░░░░░░░░░░░░░░░░░░░░  25.0%
//! ```
//!
//! The root counts as a last sibling, so its children sit one indent in.

use std::io;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::tree::{RenderedNode, SizeOutput};

use super::config::OutputConfig;
use super::utils::{BAR_WIDTH, NAME_WIDTH, write_progress_bar, write_size};

/// Streaming formatter that writes colored tree lines.
/// Implements the SizeOutput trait for use with SizeTreeWalker.
pub struct ConsoleFormatter<W> {
    out: W,
}

impl ConsoleFormatter<StandardStream> {
    /// Formatter writing to stdout, colored unless disabled in `config`.
    pub fn stdout(config: &OutputConfig) -> Self {
        Self::new(StandardStream::stdout(color_choice(config)))
    }
}

/// `use_color` is already resolved against the terminal and environment.
fn color_choice(config: &OutputConfig) -> ColorChoice {
    if config.use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

impl<W: WriteColor> ConsoleFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Name as displayed: directories get a trailing `/`.
fn entry_label(node: &RenderedNode<'_>) -> String {
    if node.is_dir && !node.name.ends_with('/') {
        format!("{}/", node.name)
    } else {
        node.name.to_string()
    }
}

impl<W: WriteColor> SizeOutput for ConsoleFormatter<W> {
    fn output_node(&mut self, node: &RenderedNode<'_>) -> io::Result<()> {
        let label = entry_label(node);

        if node.is_root() {
            write!(self.out, "{:<width$} (", label, width = NAME_WIDTH)?;
            write_size(&mut self.out, node.size)?;
            writeln!(self.out, ")")?;
            return Ok(());
        }

        let connector = if node.is_last { "└──" } else { "├──" };
        write!(
            self.out,
            "{}{}{:<width$} (",
            node.prefix,
            connector,
            label,
            width = NAME_WIDTH
        )?;
        write_size(&mut self.out, node.size)?;
        write!(self.out, ")")?;

        if let Some(percent) = node.percent {
            write!(self.out, "  ")?;
            write_progress_bar(&mut self.out, percent, BAR_WIDTH)?;
        }
        writeln!(self.out)
    }

    fn output_connector(&mut self, prefix: &str) -> io::Result<()> {
        self.out.reset()?;
        writeln!(self.out, "{}│", prefix)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use termcolor::{Buffer, NoColor};

    use crate::test_utils::{GIB, MIB, MemFileSystem};
    use crate::tree::{ScanConfig, SizeThreshold, SizeTreeWalker};

    fn render(fs: MemFileSystem, threshold: u64, max_depth: Option<usize>) -> String {
        let config = ScanConfig::new(SizeThreshold::from_bytes(threshold), max_depth);
        let walker = SizeTreeWalker::with_filesystem(config, fs);
        let mut formatter = ConsoleFormatter::new(NoColor::new(Vec::new()));
        walker.walk(Path::new("data"), &mut formatter).unwrap();
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    fn sample_fs() -> MemFileSystem {
        MemFileSystem::new()
            .file("data/a/x.bin", GIB)
            .file("data/a/y.bin", GIB / 2)
            .file("data/z.bin", GIB / 2)
    }

    #[test]
    fn test_root_line_has_no_bar() {
        let output = render(sample_fs(), 0, Some(0));
        let expected = format!("{:<45} ({:>10})\n", "data/", "    2.0GB");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_child_lines_have_glyph_size_and_bar() {
        let output = render(sample_fs(), 0, None);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 6, "{}", output);
        let bar = format!("{}{}", "█".repeat(22), "░".repeat(8));
        assert_eq!(
            lines[1],
            format!("    ├──{:<45} ({:>10})  {}  75.0%", "a/", "    1.5GB", bar)
        );
        assert!(lines[2].starts_with("    │   ├──x.bin "));
        assert!(lines[2].contains(" 1.0GB)"));
        assert!(lines[3].starts_with("    │   └──y.bin "));
        assert!(lines[3].contains(" 512.0MB)"));
        assert_eq!(lines[4], "    │");
        assert!(lines[5].starts_with("    └──z.bin "));
        assert!(lines[5].ends_with(" 25.0%"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = render(sample_fs(), MIB, None);
        let second = render(sample_fs(), MIB, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_with_trailing_slash_is_not_doubled() {
        let node = RenderedNode {
            name: "/",
            path: Path::new("/"),
            size: 1,
            is_dir: true,
            depth: 0,
            is_last: true,
            prefix: "",
            percent: None,
        };
        assert_eq!(entry_label(&node), "/");
    }

    #[test]
    fn test_color_choice_follows_config() {
        let colored = OutputConfig {
            use_color: true,
            show_header: false,
        };
        let plain = OutputConfig {
            use_color: false,
            show_header: false,
        };
        assert_eq!(color_choice(&colored), ColorChoice::Always);
        assert_eq!(color_choice(&plain), ColorChoice::Never);
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let config = ScanConfig::new(SizeThreshold::from_bytes(0), None);
        let walker = SizeTreeWalker::with_filesystem(config, sample_fs());
        let mut formatter = ConsoleFormatter::new(Buffer::ansi());
        walker.walk(Path::new("data"), &mut formatter).unwrap();
        let output = String::from_utf8(formatter.into_inner().into_inner()).unwrap();

        // Sizes of a gigabyte and more are red
        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains("\x1b[0m"));
    }
}
