use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;

/// Errors that can occur during ODE integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("time grid must be finite and non-decreasing (violated at index {index})")]
    TimeGrid { index: usize },

    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error("integration stopped at t={reached} before reaching t={target}")]
    Incomplete { reached: f64, target: f64 },

    #[error("state became non-finite at t={t}")]
    NonFinite { t: f64 },
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
