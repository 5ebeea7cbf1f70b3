//! Numerical solvers for the SEIR workspace.
//!
//! # Modules
//!
//! - [`ode`]: adaptive Runge–Kutta integration of an [`OdeSystem`] over an
//!   ordered grid of output times
//!
//! [`OdeSystem`]: seir_core::OdeSystem

pub mod ode;
