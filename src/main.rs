//! CLI entry point for dstree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dstree::tree::DEFAULT_THRESHOLD_GIB;
use dstree::{
    ConsoleFormatter, DiskUsage, JsonBuilder, OsFileSystem, OutputConfig, ScanConfig, ScanSummary,
    SizeThreshold, SizeTreeWalker, ensure_directory, logging, print_json, write_header,
};
use tracing::{info, warn};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dstree")]
#[command(about = "Analyze directory sizes as a tree, largest entries first")]
#[command(version)]
struct Args {
    /// Directory path to analyze
    path: PathBuf,

    /// Maximum depth to analyze (default: unlimited)
    #[arg(long = "depth", value_name = "N")]
    depth: Option<usize>,

    /// Size threshold in GB; smaller entries are hidden
    #[arg(long = "threshold", value_name = "GB", default_value_t = DEFAULT_THRESHOLD_GIB, value_parser = parse_threshold)]
    threshold: f64,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output the tree as JSON
    #[arg(long = "json")]
    json: bool,

    /// Skip the disk usage header and color legends
    #[arg(long = "no-header")]
    no_header: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse a threshold in gibibytes; must be a finite, non-negative number.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    SizeThreshold::from_gib(value).map_err(|e| e.to_string())?;
    Ok(value)
}

fn run(args: &Args) -> dstree::error::Result<()> {
    let threshold = SizeThreshold::from_gib(args.threshold)?;
    let walker = SizeTreeWalker::new(ScanConfig::new(threshold, args.depth));
    info!(
        root = %args.path.display(),
        threshold_bytes = threshold.bytes(),
        max_depth = ?args.depth,
        "scanning"
    );

    if args.json {
        let mut builder = JsonBuilder::new();
        walker.walk(&args.path, &mut builder)?;
        return print_json(builder.into_tree().as_ref());
    }

    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        show_header: !args.no_header,
    };
    let mut formatter = ConsoleFormatter::stdout(&output_config);

    if output_config.show_header {
        let usage = match DiskUsage::for_path(&args.path) {
            Ok(usage) => Some(usage),
            Err(e) => {
                warn!(path = %args.path.display(), error = %e, "cannot query disk usage");
                None
            }
        };
        let summary = ScanSummary {
            root: &args.path,
            threshold_gib: args.threshold,
            max_depth: args.depth,
        };
        write_header(formatter.writer_mut(), usage.as_ref(), &summary)?;
    }

    walker.walk(&args.path, &mut formatter)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    if let Err(e) = ensure_directory(&OsFileSystem, &args.path) {
        eprintln!("dstree: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("dstree: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.2"), Ok(0.2));
        assert_eq!(parse_threshold(" 1 "), Ok(1.0));
        assert_eq!(parse_threshold("0"), Ok(0.0));
        assert!(parse_threshold("-1").is_err());
        assert!(parse_threshold("abc").is_err());
        assert!(parse_threshold("inf").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["dstree", "some/dir"]).unwrap();
        assert_eq!(args.path, PathBuf::from("some/dir"));
        assert_eq!(args.depth, None);
        assert_eq!(args.threshold, 0.2);
        assert!(!args.json);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_depth_and_threshold() {
        let args =
            Args::try_parse_from(["dstree", "d", "--depth", "2", "--threshold", "1.5", "-vv"])
                .unwrap();
        assert_eq!(args.depth, Some(2));
        assert_eq!(args.threshold, 1.5);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_reject_negative_threshold() {
        assert!(Args::try_parse_from(["dstree", "d", "--threshold=-1"]).is_err());
    }

    #[test]
    fn test_color_mode_explicit() {
        assert!(should_use_color(ColorMode::Always));
        assert!(!should_use_color(ColorMode::Never));
    }
}
