//! Disk usage header and color legends printed above the tree

use std::io;
use std::path::Path;

use termcolor::{ColorSpec, WriteColor};

use crate::tree::percent_of;

use super::utils::{SizeBand, UsageBand, format_size, write_progress_bar};

/// Width of the disk usage bar in the header.
const HEADER_BAR_WIDTH: usize = 40;

/// Capacity of the filesystem holding a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    /// Space available to unprivileged users.
    pub free: u64,
}

impl DiskUsage {
    pub fn for_path(path: &Path) -> io::Result<Self> {
        let total = fs2::total_space(path)?;
        let unallocated = fs2::free_space(path)?;
        let available = fs2::available_space(path)?;
        Ok(Self {
            total,
            used: total.saturating_sub(unallocated),
            free: available,
        })
    }

    pub fn used_percent(&self) -> f64 {
        percent_of(self.used, self.total)
    }
}

/// What is about to be scanned, echoed in the header.
#[derive(Debug, Clone, Copy)]
pub struct ScanSummary<'a> {
    pub root: &'a Path,
    pub threshold_gib: f64,
    pub max_depth: Option<usize>,
}

fn write_colored_size<W: WriteColor>(out: &mut W, bytes: u64) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(SizeBand::for_bytes(bytes).color())))?;
    write!(out, "{}", format_size(bytes))?;
    out.reset()
}

fn write_swatch<W: WriteColor>(out: &mut W, spec: &ColorSpec, label: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "■")?;
    out.reset()?;
    writeln!(out, " {}", label)
}

/// Write the header block. Disk lines are skipped when `usage` is `None`.
pub fn write_header<W: WriteColor>(
    out: &mut W,
    usage: Option<&DiskUsage>,
    summary: &ScanSummary<'_>,
) -> io::Result<()> {
    if let Some(usage) = usage {
        write!(out, "Disk Usage: ")?;
        write_colored_size(out, usage.used)?;
        write!(out, "/")?;
        write_colored_size(out, usage.total)?;
        writeln!(out, " ({:.1}%)", usage.used_percent())?;

        write!(out, "Free Space: ")?;
        write_colored_size(out, usage.free)?;
        writeln!(out)?;

        write_progress_bar(out, usage.used_percent(), HEADER_BAR_WIDTH)?;
        writeln!(out)?;
        writeln!(out)?;
    }

    writeln!(out, "Size threshold: {}GB", summary.threshold_gib)?;
    match summary.max_depth {
        Some(depth) => writeln!(out, "Maximum depth: {}", depth)?,
        None => writeln!(out, "Maximum depth: unlimited")?,
    }
    writeln!(out, "Scanning directory: {}", summary.root.display())?;

    writeln!(out)?;
    writeln!(out, "Color scale (sizes):")?;
    for band in SizeBand::ALL {
        write_swatch(out, ColorSpec::new().set_fg(Some(band.color())), band.label())?;
    }

    writeln!(out)?;
    writeln!(out, "Color scale (usage):")?;
    for band in UsageBand::ALL {
        write_swatch(out, ColorSpec::new().set_fg(Some(band.color())), band.label())?;
    }
    writeln!(out, "{}", "-".repeat(40))
}
