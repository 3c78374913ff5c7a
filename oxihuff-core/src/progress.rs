//! Progress reporting for long-running codec operations.
//!
//! Codecs report work in abstract units (bytes, for the Huffman codec) by
//! calling [`Progress::advance`]. Reporting is purely observational and has
//! no effect on the produced output.

/// A sink for progress updates.
pub trait Progress {
    /// Advance the progress by `units`.
    fn advance(&mut self, units: u64);
}

/// A progress sink that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn advance(&mut self, _units: u64) {}
}

impl<F: FnMut(u64)> Progress for F {
    #[inline]
    fn advance(&mut self, units: u64) {
        self(units)
    }
}

/// A progress sink that counts the units it receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounter {
    /// Total units reported so far.
    pub total: u64,
    /// Number of `advance` calls.
    pub calls: u64,
}

impl Progress for ProgressCounter {
    fn advance(&mut self, units: u64) {
        self.total += units;
        self.calls += 1;
    }
}
