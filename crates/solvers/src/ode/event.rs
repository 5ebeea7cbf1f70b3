use seir_core::Sample;

/// Event emitted by the ODE solver for each produced sample.
///
/// Index 0 is the initial state before any integration.
/// Indices 1..N follow the requested grid times in order.
#[derive(Debug, Clone, Copy)]
pub struct Event<const N: usize> {
    /// Position of the sample within the requested grid.
    pub index: usize,

    /// The state at the grid time.
    pub sample: Sample<N>,
}
