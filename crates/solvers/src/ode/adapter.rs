use std::{cell::RefCell, rc::Rc};

use ode_solvers::{SVector, System};
use seir_core::OdeSystem;

use super::{Config, Error, Method, Stats};

/// Relative slack allowed between the integrator's final time and the target.
const END_TOLERANCE: f64 = 1e-9;

/// An interval over which the system's right-hand side is smooth.
#[derive(Debug, Clone, Copy)]
pub(super) struct Segment {
    pub start: f64,
    pub end: f64,

    /// Whether the right-hand side jumps at `end`.
    ///
    /// When set, evaluations at `end` use a time just before it so that the
    /// segment only ever sees the left limit of the jump.
    pub ends_at_jump: bool,
}

impl Segment {
    /// Returns the latest time at which the system may be evaluated.
    fn latest_evaluation_time(&self) -> f64 {
        if self.ends_at_jump {
            let before = self.end - 2.0 * f64::EPSILON * self.end.abs().max(1.0);
            before.max(self.start)
        } else {
            self.end
        }
    }
}

/// Integrates `system` across `segment` and returns the state at its end.
///
/// The integrator runs in local time `tau = t - start`, so that its internal
/// bookkeeping always works with non-negative times regardless of where the
/// segment lies on the global axis.
pub(super) fn integrate_segment<S, const N: usize>(
    system: &S,
    params: &S::Params,
    segment: Segment,
    y: [f64; N],
    config: &Config,
    stats: &mut Stats,
) -> Result<[f64; N], Error>
where
    S: OdeSystem<N>,
{
    let Segment { start, end, .. } = segment;
    let span = end - start;
    let call_error = Rc::new(RefCell::new(None));
    let latest = Rc::new(RefCell::new(None));

    let adapter = Adapter {
        system,
        params,
        offset: start,
        latest_time: segment.latest_evaluation_time(),
        call_error: Rc::clone(&call_error),
        latest: Rc::clone(&latest),
    };
    let y_start: SVector<f64, N> = y.into();

    let result = match config.method() {
        Method::Dopri5 => {
            let mut stepper = ode_solvers::Dopri5::new(
                adapter,
                0.0,
                span,
                span,
                y_start,
                config.rel_tol(),
                config.abs_tol(),
            );
            stepper.integrate().map(|stats| {
                let last = stepper.x_out().last().copied().zip(stepper.y_out().last().copied());
                (stats, last)
            })
        }
        Method::Dop853 => {
            let mut stepper = ode_solvers::Dop853::new(
                adapter,
                0.0,
                span,
                span,
                y_start,
                config.rel_tol(),
                config.abs_tol(),
            );
            stepper.integrate().map(|stats| {
                let last = stepper.x_out().last().copied().zip(stepper.y_out().last().copied());
                (stats, last)
            })
        }
    };

    if let Some(err) = call_error.borrow_mut().take() {
        return Err(Error::system(err));
    }

    let (run, last_output) = result?;
    stats.evaluations += u64::from(run.num_eval);
    stats.accepted_steps += u64::from(run.accepted_steps);
    stats.rejected_steps += u64::from(run.rejected_steps);

    // The final accepted step is reported both through `solout` and, when it
    // lands on a dense output point, through the stepper's output buffers.
    let reached = |tau: f64| (tau - span).abs() <= END_TOLERANCE * span.max(1.0);
    let latest = latest.borrow_mut().take();
    let (tau, y_end) = latest
        .into_iter()
        .chain(last_output)
        .find(|(tau, _)| reached(*tau))
        .or(latest)
        .ok_or(Error::Incomplete {
            reached: start,
            target: end,
        })?;

    if !reached(tau) {
        return Err(Error::Incomplete {
            reached: start + tau,
            target: end,
        });
    }

    let y_end: [f64; N] = y_end.into();
    if !y_end.iter().all(|value| value.is_finite()) {
        return Err(Error::NonFinite { t: end });
    }

    Ok(y_end)
}

/// Adapts an [`OdeSystem`] into an `ode_solvers` system.
struct Adapter<'a, S: OdeSystem<N>, const N: usize> {
    system: &'a S,
    params: &'a S::Params,
    offset: f64,
    latest_time: f64,
    call_error: Rc<RefCell<Option<S::Error>>>,
    latest: Rc<RefCell<Option<(f64, SVector<f64, N>)>>>,
}

impl<S: OdeSystem<N>, const N: usize> System<f64, SVector<f64, N>> for Adapter<'_, S, N> {
    fn system(&self, x: f64, y: &SVector<f64, N>, dy: &mut SVector<f64, N>) {
        let state: [f64; N] = (*y).into();
        let t = (self.offset + x).min(self.latest_time);

        match self.system.derivative(t, &state, self.params) {
            Ok(derivative) => {
                *dy = SVector::from_row_slice(&derivative);
            }
            Err(e) => {
                *self.call_error.borrow_mut() = Some(e);
                *dy = SVector::from_element(f64::NAN);
            }
        }
    }

    fn solout(&mut self, x: f64, y: &SVector<f64, N>, _dy: &SVector<f64, N>) -> bool {
        *self.latest.borrow_mut() = Some((x, *y));

        // Stop integration early if a derivative evaluation failed.
        self.call_error.borrow().is_some()
    }
}
