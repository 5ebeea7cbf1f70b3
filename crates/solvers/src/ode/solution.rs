use seir_core::Sample;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Produced a sample for every requested grid time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// Work performed by the underlying integrator, summed across segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of right-hand side evaluations.
    pub evaluations: u64,

    /// Number of accepted internal steps.
    pub accepted_steps: u64,

    /// Number of rejected internal steps.
    pub rejected_steps: u64,
}

/// The result of an ODE solve.
#[derive(Debug, Clone)]
pub struct Solution<const N: usize> {
    /// How the solver terminated.
    pub status: Status,

    /// One sample per grid time, in grid order.
    pub samples: Vec<Sample<N>>,

    /// Integrator work statistics.
    pub stats: Stats,
}
