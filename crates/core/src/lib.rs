//! Core traits and types shared by the SEIR workspace.
//!
//! This crate defines the abstractions that solvers and models build on:
//!
//! - [`OdeSystem`]: a pure right-hand side `dy/dt = f(t, y; params)`
//! - [`Sample`]: a state vector captured at a point in time
//! - [`Observer`]: receives solver events and optionally returns control actions

mod observer;
mod system;

pub use observer::Observer;
pub use system::{OdeSystem, Sample};
