//! Reduction mode: fully reduced vs. quasi-reduced.
//!
//! A [`Manager`](crate::Manager) is configured with exactly one mode for its
//! entire lifetime; the two modes never mix within a single manager.

/// Which reduction discipline an [`Manager`](crate::Manager) enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Levels with no information content are skipped via Shannon
    /// reduction.
    FullyReduced,
    /// Every level between the root and the sink is present on every path;
    /// duplicate nodes are still merged.
    QuasiReduced,
}

impl Mode {
    #[inline]
    pub fn is_fully_reduced(self) -> bool {
        matches!(self, Mode::FullyReduced)
    }
}
