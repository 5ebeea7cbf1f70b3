/// A system of ordinary differential equations with `N` state variables.
///
/// The right-hand side is a pure function of time, state, and auxiliary
/// parameters. Parameters are threaded explicitly through every call so that
/// a single system can be integrated concurrently with different parameter
/// sets (for example, independent trials of a fitting routine).
pub trait OdeSystem<const N: usize> {
    /// Auxiliary parameters passed to every derivative evaluation.
    type Params: ?Sized;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates `dy/dt` at time `t` and state `y`.
    ///
    /// The returned array must align with the order of `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated for the
    /// given parameters.
    fn derivative(
        &self,
        t: f64,
        y: &[f64; N],
        params: &Self::Params,
    ) -> Result<[f64; N], Self::Error>;

    /// Returns the times at which the right-hand side may jump.
    ///
    /// Solvers restart integration at each of these instead of stepping
    /// across them. The slice must be sorted in non-decreasing order.
    ///
    /// The default implementation reports no discontinuities.
    fn discontinuities(&self) -> &[f64] {
        &[]
    }
}

/// The state of an ODE system at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<const N: usize> {
    /// The independent variable.
    pub t: f64,

    /// The dependent variables at `t`.
    pub y: [f64; N],
}

impl<const N: usize> Sample<N> {
    /// Creates a new sample.
    #[must_use]
    pub fn new(t: f64, y: [f64; N]) -> Self {
        Self { t, y }
    }

    /// Returns the sum of all state variables.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.y.iter().sum()
    }
}
