/// Control actions supported by the ODE solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the samples produced so far.
    StopEarly,
}
