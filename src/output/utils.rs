//! Shared formatting helpers: sizes, color bands, progress bars

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

/// Width of the name column in tree lines.
pub const NAME_WIDTH: usize = 45;
/// Width of the size column (inside the parentheses).
pub const SIZE_WIDTH: usize = 10;
/// Glyph count of per-entry percentage bars.
pub const BAR_WIDTH: usize = 30;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Format a byte count in binary units with one decimal place.
///
/// The numeric part is right-aligned in 7 columns: `"    2.0GB"`.
/// Values past the terabyte range stay in TB.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:7.1}{}", value, UNITS[unit])
}

/// Color band for an absolute size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBand {
    /// Under 100 MB
    Low,
    /// 100 MB up to 500 MB
    MediumLow,
    /// 500 MB up to 1 GB
    MediumHigh,
    /// 1 GB and above
    High,
}

impl SizeBand {
    pub const ALL: [SizeBand; 4] = [
        SizeBand::Low,
        SizeBand::MediumLow,
        SizeBand::MediumHigh,
        SizeBand::High,
    ];

    pub fn for_bytes(bytes: u64) -> Self {
        let mb = bytes as f64 / BYTES_PER_MIB;
        if mb < 100.0 {
            SizeBand::Low
        } else if mb < 500.0 {
            SizeBand::MediumLow
        } else if mb < 1024.0 {
            SizeBand::MediumHigh
        } else {
            SizeBand::High
        }
    }

    pub fn color(self) -> Color {
        match self {
            SizeBand::Low => Color::Rgb(0, 255, 0),
            SizeBand::MediumLow => Color::Rgb(255, 255, 0),
            SizeBand::MediumHigh => Color::Rgb(255, 165, 0),
            SizeBand::High => Color::Rgb(255, 0, 0),
        }
    }

    /// Legend text for the band.
    pub fn label(self) -> &'static str {
        match self {
            SizeBand::Low => "< 100MB",
            SizeBand::MediumLow => "100MB-500MB",
            SizeBand::MediumHigh => "500MB-1GB",
            SizeBand::High => "> 1GB",
        }
    }
}

/// Color band for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBand {
    /// Under 60%
    Low,
    /// 60% up to 85%
    Medium,
    /// 85% and above
    High,
}

impl UsageBand {
    pub const ALL: [UsageBand; 3] = [UsageBand::Low, UsageBand::Medium, UsageBand::High];

    pub fn for_percent(percent: f64) -> Self {
        if percent < 60.0 {
            UsageBand::Low
        } else if percent < 85.0 {
            UsageBand::Medium
        } else {
            UsageBand::High
        }
    }

    pub fn color(self) -> Color {
        match self {
            UsageBand::Low => Color::Rgb(0, 255, 0),
            UsageBand::Medium => Color::Rgb(255, 255, 0),
            UsageBand::High => Color::Rgb(255, 0, 0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UsageBand::Low => "< 60%",
            UsageBand::Medium => "60-85%",
            UsageBand::High => "> 85%",
        }
    }
}

/// Bar glyphs for `percent`: `floor(width * percent / 100)` filled cells,
/// clamped to `[0, width]`.
pub fn bar_glyphs(percent: f64, width: usize) -> String {
    let filled = (width as f64 * percent / 100.0).floor();
    let filled = if filled.is_nan() || filled < 0.0 {
        0
    } else {
        (filled as usize).min(width)
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Write a formatted size in its band color.
pub fn write_size<W: WriteColor>(out: &mut W, bytes: u64) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(SizeBand::for_bytes(bytes).color())))?;
    write!(out, "{:>width$}", format_size(bytes), width = SIZE_WIDTH)?;
    out.reset()
}

/// Write a colored progress bar followed by the percentage: `████░░  75.0%`.
pub fn write_progress_bar<W: WriteColor>(out: &mut W, percent: f64, width: usize) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(UsageBand::for_percent(percent).color())))?;
    write!(out, "{}", bar_glyphs(percent, width))?;
    out.reset()?;
    write!(out, " {:5.1}%", percent)
}
