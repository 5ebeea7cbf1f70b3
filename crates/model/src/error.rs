use thiserror::Error;

use crate::{Compartments, RateCountError};

/// Errors detected while constructing an [`EpidemicModel`].
///
/// These are reported eagerly and never silently corrected.
///
/// [`EpidemicModel`]: crate::EpidemicModel
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("infectious period must be larger than 0 (got {0})")]
    InfectiousPeriod(f64),

    #[error("incubation period must be larger than 0 (got {0})")]
    IncubationPeriod(f64),

    #[error("basic reproduction number must be finite and 0 or larger (got {0})")]
    ReproductionNumber(f64),

    #[error("initial state must contain 4 values (got {len})")]
    InitialStateLength { len: usize },

    #[error("initial state counts must be finite and non-negative (got {0:?})")]
    InitialStateValue(Compartments),

    #[error("initial state must describe a positive population (got {0})")]
    EmptyPopulation(f64),

    #[error("intervention time at index {index} is not finite")]
    NonFiniteBreakpoint { index: usize },

    #[error("intervention times must be monotonically increasing (violated at index {index})")]
    DecreasingBreakpoints { index: usize },
}

/// Errors that can occur while integrating or observing a model.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    RateCount(#[from] RateCountError),

    #[error("initial conditions are not a valid population: {0:?}")]
    InvalidInitialConditions(Compartments),

    #[error("integration failed: {0}")]
    Solver(#[from] seir_solvers::ode::Error),
}
