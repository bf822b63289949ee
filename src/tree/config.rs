//! Configuration types for the size tree walker

use crate::error::{DsTreeError, Result};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Default display threshold in gibibytes.
pub const DEFAULT_THRESHOLD_GIB: f64 = 0.2;

/// Minimum size an entry must strictly exceed to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeThreshold(u64);

impl SizeThreshold {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Convert a gibibyte value to a byte threshold.
    ///
    /// The byte count is floored; for integer sizes `size > floor(t)` is the
    /// same test as `size > t`.
    pub fn from_gib(gib: f64) -> Result<Self> {
        if !gib.is_finite() || gib < 0.0 {
            return Err(DsTreeError::InvalidThreshold(format!(
                "{} is not a non-negative number of gibibytes",
                gib
            )));
        }
        Ok(Self((gib * BYTES_PER_GIB).floor() as u64))
    }

    pub fn bytes(self) -> u64 {
        self.0
    }

    /// Whether an entry of `size` bytes is shown.
    pub fn passes(self, size: u64) -> bool {
        size > self.0
    }
}

/// Configuration for size tree walking.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub threshold: SizeThreshold,
    /// Deepest level rendered; children of nodes at this depth are not listed.
    pub max_depth: Option<usize>,
}

impl ScanConfig {
    pub fn new(threshold: SizeThreshold, max_depth: Option<usize>) -> Self {
        Self {
            threshold,
            max_depth,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: SizeThreshold((DEFAULT_THRESHOLD_GIB * BYTES_PER_GIB).floor() as u64),
            max_depth: None,
        }
    }
}
