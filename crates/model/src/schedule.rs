use thiserror::Error;

use crate::ConfigError;

/// Default intervention breakpoints, in days since the start of the outbreak.
pub const DEFAULT_INTERVENTION_TIMES: [f64; 5] = [23.0, 30.0, 60.0, 230.0, 330.0];

/// Times at which the active reproduction number changes.
///
/// A schedule with `k` breakpoints splits the time axis into `k + 1`
/// intervals and is paired with a sequence of `k + 1` reproduction numbers.
/// Entry `0` applies before the first breakpoint, entry `i` applies on
/// `[breakpoints[i - 1], breakpoints[i])`, and the last entry applies from
/// the final breakpoint onward.
///
/// # Examples
///
/// ```
/// use seir_model::InterventionSchedule;
///
/// let schedule = InterventionSchedule::new(vec![10.0, 20.0]).unwrap();
/// let rates = [1.0, 2.0, 3.0];
///
/// assert_eq!(schedule.select_r(9.99, &rates), Ok(1.0));
/// assert_eq!(schedule.select_r(10.0, &rates), Ok(2.0));
/// assert_eq!(schedule.select_r(20.0, &rates), Ok(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionSchedule {
    breakpoints: Vec<f64>,
}

/// Error returned when a reproduction-number sequence does not match a schedule.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} reproduction numbers, got {actual}")]
pub struct RateCountError {
    /// The number of intervals in the schedule.
    pub expected: usize,
    /// The length of the supplied sequence.
    pub actual: usize,
}

impl InterventionSchedule {
    /// Creates a schedule from breakpoints in non-decreasing order.
    ///
    /// Equal consecutive breakpoints are allowed; the interval between them is
    /// empty and its reproduction number is never selected.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any breakpoint is not finite or if the
    /// breakpoints decrease anywhere.
    pub fn new(breakpoints: impl Into<Vec<f64>>) -> Result<Self, ConfigError> {
        let breakpoints = breakpoints.into();

        if let Some(index) = breakpoints.iter().position(|t| !t.is_finite()) {
            return Err(ConfigError::NonFiniteBreakpoint { index });
        }

        if let Some(index) = breakpoints.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(ConfigError::DecreasingBreakpoints { index: index + 1 });
        }

        Ok(Self { breakpoints })
    }

    /// Returns the breakpoints in order.
    #[must_use]
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Returns the number of reproduction numbers this schedule expects.
    #[must_use]
    pub fn rate_count(&self) -> usize {
        self.breakpoints.len() + 1
    }

    /// Checks that `rates` has one entry per interval.
    ///
    /// # Errors
    ///
    /// Returns a [`RateCountError`] if the lengths do not match.
    pub fn check_rates(&self, rates: &[f64]) -> Result<(), RateCountError> {
        if rates.len() == self.rate_count() {
            Ok(())
        } else {
            Err(RateCountError {
                expected: self.rate_count(),
                actual: rates.len(),
            })
        }
    }

    /// Returns the reproduction number active at time `t`.
    ///
    /// Scans the breakpoints in order; every breakpoint at or before `t`
    /// replaces the candidate with the rate of the interval it opens, so the
    /// last match wins. A time exactly on a breakpoint selects the new rate.
    ///
    /// # Errors
    ///
    /// Returns a [`RateCountError`] if `rates` does not have one entry per
    /// interval.
    pub fn select_r(&self, t: f64, rates: &[f64]) -> Result<f64, RateCountError> {
        self.check_rates(rates)?;

        let mut current = rates[0];
        for (i, &breakpoint) in self.breakpoints.iter().enumerate() {
            if t >= breakpoint {
                current = rates[i + 1];
            }
        }

        Ok(current)
    }
}

impl Default for InterventionSchedule {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_INTERVENTION_TIMES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(breakpoints: &[f64]) -> InterventionSchedule {
        InterventionSchedule::new(breakpoints).unwrap()
    }

    #[test]
    fn tie_break_selects_the_new_interval() {
        let schedule = schedule(&[10.0, 20.0]);
        let rates = [1.0, 2.0, 3.0];

        assert_eq!(schedule.select_r(9.99, &rates), Ok(1.0));
        assert_eq!(schedule.select_r(10.0, &rates), Ok(2.0));
        assert_eq!(schedule.select_r(19.99, &rates), Ok(2.0));
        assert_eq!(schedule.select_r(20.0, &rates), Ok(3.0));
    }

    #[test]
    fn before_first_and_after_last_breakpoint() {
        let schedule = InterventionSchedule::default();
        let rates = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];

        for t in [-100.0, 0.0, 22.999] {
            assert_eq!(schedule.select_r(t, &rates), Ok(0.5));
        }
        for t in [330.0, 331.0, 1e6] {
            assert_eq!(schedule.select_r(t, &rates), Ok(5.5));
        }
    }

    #[test]
    fn repeated_breakpoints_skip_the_empty_interval() {
        let schedule = schedule(&[5.0, 5.0, 8.0]);
        let rates = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(schedule.select_r(4.0, &rates), Ok(1.0));
        assert_eq!(schedule.select_r(5.0, &rates), Ok(3.0));
        assert_eq!(schedule.select_r(8.0, &rates), Ok(4.0));
    }

    #[test]
    fn empty_schedule_is_a_single_regime() {
        let schedule = schedule(&[]);

        assert_eq!(schedule.rate_count(), 1);
        assert_eq!(schedule.select_r(1e9, &[2.2]), Ok(2.2));
    }

    #[test]
    fn rate_count_must_match() {
        let schedule = schedule(&[10.0, 20.0]);

        assert_eq!(
            schedule.select_r(0.0, &[1.0, 2.0]),
            Err(RateCountError {
                expected: 3,
                actual: 2
            })
        );
        assert!(schedule.check_rates(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn rejects_decreasing_breakpoints() {
        assert_eq!(
            InterventionSchedule::new(vec![23.0, 30.0, 29.0]),
            Err(ConfigError::DecreasingBreakpoints { index: 2 })
        );
    }

    #[test]
    fn rejects_non_finite_breakpoints() {
        assert_eq!(
            InterventionSchedule::new(vec![23.0, f64::NAN]),
            Err(ConfigError::NonFiniteBreakpoint { index: 1 })
        );
    }
}
