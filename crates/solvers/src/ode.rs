//! Adaptive integration of ODE systems over an ordered time grid.
//!
//! The solver steps an [`OdeSystem`] from the first grid time to the last and
//! reports one [`Sample`] per requested time. Between grid points it uses an
//! embedded Dormand–Prince method from `ode_solvers`, which chooses its own
//! internal step sizes to meet the configured tolerances.
//!
//! # Discontinuities
//!
//! Systems may report times at which their right-hand side jumps (see
//! [`OdeSystem::discontinuities`]). The solver never steps across one: each
//! interval between grid points is split at every discontinuity strictly
//! inside it, and integration restarts from the exact state at the split.
//!
//! # Failure
//!
//! A solve either produces the full trajectory or fails as a whole. System
//! errors, integrator errors, and non-finite states are all reported through
//! [`Error`] without partial results.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per produced sample, starting with the
//! initial state at index 0. Observers can return [`Action::StopEarly`] to
//! end the solve, in which case the solution carries
//! [`Status::StoppedByObserver`] and the samples produced so far.
//!
//! # Example
//!
//! ```ignore
//! use seir_solvers::ode::{self, Config};
//!
//! let times: Vec<f64> = (0..365).map(f64::from).collect();
//! let solution = ode::solve_unobserved(&system, &params, y0, &times, &Config::default())?;
//!
//! for sample in &solution.samples {
//!     println!("t={}: {:?}", sample.t, sample.y);
//! }
//! ```

mod action;
mod adapter;
mod config;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError, Method};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Stats, Status};

use seir_core::{OdeSystem, Observer, Sample};

use adapter::{Segment, integrate_segment};

/// Integrates `system` over the ordered grid `times`.
///
/// `y0` is the state at `times[0]` and becomes the first sample unchanged.
/// Each subsequent sample is the state at the corresponding grid time.
/// Repeated grid times produce repeated samples. An empty grid produces an
/// empty solution.
///
/// # Errors
///
/// Returns an error if the grid is not finite and non-decreasing, if the
/// system fails to evaluate, if the integrator fails to converge, or if the
/// state becomes non-finite.
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    params: &S::Params,
    y0: [f64; N],
    times: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
    Obs: Observer<Event<N>, Action>,
{
    check_grid(times)?;

    let Some((&t0, rest)) = times.split_first() else {
        return Ok(Solution {
            status: Status::Complete,
            samples: Vec::new(),
            stats: Stats::default(),
        });
    };

    if !y0.iter().all(|value| value.is_finite()) {
        return Err(Error::NonFinite { t: t0 });
    }

    let mut samples = Vec::with_capacity(times.len());
    let mut stats = Stats::default();
    let mut current = Sample::new(t0, y0);
    samples.push(current);

    let event = Event {
        index: 0,
        sample: current,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            samples,
            stats,
        });
    }

    for (offset, &t) in rest.iter().enumerate() {
        let y = advance(system, params, &current, t, config, &mut stats).inspect_err(|err| {
            log::warn!("ode solve failed between t={} and t={t}: {err}", current.t);
        })?;

        current = Sample::new(t, y);
        samples.push(current);

        let event = Event {
            index: offset + 1,
            sample: current,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                samples,
                stats,
            });
        }
    }

    log::debug!(
        "ode solve complete: {} samples, {} evaluations, {} accepted / {} rejected steps",
        samples.len(),
        stats.evaluations,
        stats.accepted_steps,
        stats.rejected_steps,
    );

    Ok(Solution {
        status: Status::Complete,
        samples,
        stats,
    })
}

/// Integrates `system` over the ordered grid `times` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    params: &S::Params,
    y0: [f64; N],
    times: &[f64],
    config: &Config,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
{
    solve(system, params, y0, times, config, ())
}

/// Verifies that the grid is finite and non-decreasing.
fn check_grid(times: &[f64]) -> Result<(), Error> {
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(Error::TimeGrid { index });
    }

    match times.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(index) => Err(Error::TimeGrid { index: index + 1 }),
        None => Ok(()),
    }
}

/// Advances from `from` to time `to`, restarting at interior discontinuities.
fn advance<S, const N: usize>(
    system: &S,
    params: &S::Params,
    from: &Sample<N>,
    to: f64,
    config: &Config,
    stats: &mut Stats,
) -> Result<[f64; N], Error>
where
    S: OdeSystem<N>,
{
    let jumps = system.discontinuities();
    let stops = jumps
        .iter()
        .copied()
        .filter(|&d| d > from.t && d < to)
        .chain(std::iter::once(to));

    let mut t = from.t;
    let mut y = from.y;

    for stop in stops {
        if stop > t {
            let segment = Segment {
                start: t,
                end: stop,
                ends_at_jump: jumps.contains(&stop),
            };
            y = integrate_segment(system, params, segment, y, config, stats)?;
            t = stop;
        }
    }

    Ok(y)
}
