//! Search configuration and the progress-reporting surface shared by CB, PB, and AS.

use crate::grid::Grid;

/// A sink invoked periodically during search so callers can observe progress.
///
/// Implementations must be cheap to call and must not mutate the grid they are handed.
pub trait ProgressSink {
    /// Called every [`SolverLimits::report_interval`] iterations with the running
    /// iteration count and a read-only view of the grid being searched.
    fn report(&mut self, iterations: u64, grid: &Grid);
}

/// A [`ProgressSink`] that does nothing. Used when the caller has no interest in
/// progress reporting.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    #[inline]
    fn report(&mut self, _iterations: u64, _grid: &Grid) {}
}

/// Tunables shared by all three solvers.
#[derive(Copy, Clone, Debug)]
pub struct SolverLimits {
    /// Report progress every this many iterations. Must be non-zero; a very large value
    /// (e.g. [`u64::MAX`]) effectively disables reporting.
    pub report_interval: u64,
    /// An optional ceiling on the number of search iterations. `None` means unbounded.
    pub max_iterations: Option<u64>,
}

impl Default for SolverLimits {
    fn default() -> Self {
        SolverLimits {
            report_interval: u64::MAX,
            max_iterations: None,
        }
    }
}

impl SolverLimits {
    /// A limits value with no iteration cap and reporting every `report_interval` iterations.
    pub fn with_report_interval(report_interval: u64) -> Self {
        assert!(report_interval > 0, "report_interval must be non-zero");
        SolverLimits {
            report_interval,
            max_iterations: None,
        }
    }

    /// Bounds the search to at most `max_iterations` iterations before it gives up and
    /// reports failure, regardless of whether the search space is exhausted.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Tracks the monotonically increasing iteration counter for a single solver run and
/// forwards periodic reports to a [`ProgressSink`].
pub(crate) struct Progress<'a> {
    iterations: u64,
    limits: SolverLimits,
    sink: &'a mut dyn ProgressSink,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(limits: SolverLimits, sink: &'a mut dyn ProgressSink) -> Self {
        Progress { iterations: 0, limits, sink }
    }

    /// Increments the counter, reports if due, and returns whether the search should
    /// continue (`false` once `max_iterations` has been exceeded).
    pub(crate) fn tick(&mut self, grid: &Grid) -> bool {
        self.iterations += 1;
        if self.iterations % self.limits.report_interval == 0 {
            self.sink.report(self.iterations, grid);
        }
        match self.limits.max_iterations {
            Some(max) => self.iterations <= max,
            None => true,
        }
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.iterations
    }
}
