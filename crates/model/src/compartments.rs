#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Population counts in each SEIR compartment.
///
/// The array form used by the solver is ordered `[S, E, I, R]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compartments {
    pub susceptible: f64,
    pub exposed: f64,
    pub infectious: f64,

    /// Recovered or deceased.
    pub removed: f64,
}

impl Compartments {
    /// Creates compartments from counts in `S, E, I, R` order.
    #[must_use]
    pub const fn new(susceptible: f64, exposed: f64, infectious: f64, removed: f64) -> Self {
        Self {
            susceptible,
            exposed,
            infectious,
            removed,
        }
    }

    /// Returns the total population `S + E + I + R`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.susceptible + self.exposed + self.infectious + self.removed
    }

    /// Returns everyone who is no longer susceptible, `E + I + R`.
    #[must_use]
    pub fn affected(&self) -> f64 {
        self.exposed + self.infectious + self.removed
    }

    /// Returns the counts as an `[S, E, I, R]` array.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.susceptible,
            self.exposed,
            self.infectious,
            self.removed,
        ]
    }

    /// Returns `true` if every count is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.to_array()
            .iter()
            .all(|count| count.is_finite() && *count >= 0.0)
    }
}

impl From<[f64; 4]> for Compartments {
    fn from([susceptible, exposed, infectious, removed]: [f64; 4]) -> Self {
        Self::new(susceptible, exposed, infectious, removed)
    }
}

impl From<Compartments> for [f64; 4] {
    fn from(compartments: Compartments) -> Self {
        compartments.to_array()
    }
}

impl TryFrom<&[f64]> for Compartments {
    type Error = ConfigError;

    /// Builds compartments from a slice, which must hold exactly four counts.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; 4] = values
            .try_into()
            .map_err(|_| ConfigError::InitialStateLength { len: values.len() })?;
        Ok(array.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn totals() {
        let state = Compartments::new(90.0, 4.0, 5.0, 1.0);

        assert_relative_eq!(state.total(), 100.0);
        assert_relative_eq!(state.affected(), 10.0);
    }

    #[test]
    fn array_order_is_seir() {
        let state = Compartments::from([1.0, 2.0, 3.0, 4.0]);

        assert_eq!(state.susceptible, 1.0);
        assert_eq!(state.exposed, 2.0);
        assert_eq!(state.infectious, 3.0);
        assert_eq!(state.removed, 4.0);
        assert_eq!(<[f64; 4]>::from(state), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn slice_must_hold_four_values() {
        let three = [1.0, 2.0, 3.0];
        let five = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(
            Compartments::try_from(&three[..]),
            Err(ConfigError::InitialStateLength { len: 3 })
        );
        assert_eq!(
            Compartments::try_from(&five[..]),
            Err(ConfigError::InitialStateLength { len: 5 })
        );
        assert!(Compartments::try_from(&five[..4]).is_ok());
    }

    #[test]
    fn validity() {
        assert!(Compartments::new(1.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Compartments::new(-1.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Compartments::new(1.0, f64::NAN, 0.0, 0.0).is_valid());
    }
}
