//! An SEIR epidemic model with piecewise-constant interventions.
//!
//! The population is split into four compartments (susceptible, exposed,
//! infectious, removed) whose flows are governed by an incubation period, an
//! infectious period, and a reproduction number. Policy interventions are
//! modeled as breakpoints in time at which the active reproduction number
//! changes.
//!
//! The central type is [`EpidemicModel`]. It is immutable after construction
//! and exposes:
//!
//! - [`EpidemicModel::derivative`]: the right-hand side of the ODE system
//! - [`EpidemicModel::integrate`]: compartment trajectories over a time grid
//! - [`EpidemicModel::observe`]: the aggregate `E + I + R` series intended for
//!   comparison against reported case counts
//!
//! # Example
//!
//! ```
//! use seir_model::{EpidemicModel, ModelConfig};
//!
//! let model = EpidemicModel::new(ModelConfig::default()).unwrap();
//! let times: Vec<f64> = (0..100).map(f64::from).collect();
//!
//! let trajectory = model.integrate(&times, &[3.0; 6], 0.0).unwrap();
//! assert_eq!(trajectory.len(), 100);
//! ```
//!
//! # Features
//!
//! - `serde` (default): serde derives for configuration and results, and
//!   TOML loading via [`ModelConfig::from_file`].

mod compartments;
mod config;
mod error;
mod model;
mod schedule;
mod trajectory;

pub use compartments::Compartments;
pub use config::{InitialSusceptible, ModelConfig};
pub use error::{ConfigError, Error};
pub use model::{EpidemicModel, OBSERVED_RATE_COUNT};
pub use schedule::{DEFAULT_INTERVENTION_TIMES, InterventionSchedule, RateCountError};
pub use trajectory::{Point, Trajectory};

#[cfg(feature = "serde")]
pub use config::LoadError;

/// Re-exported solver configuration, accepted by [`EpidemicModel::integrate_with`].
pub use seir_solvers::ode::{Config as SolverConfig, Method as SolverMethod};
