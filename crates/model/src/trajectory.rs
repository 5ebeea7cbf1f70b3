#[cfg(feature = "serde")]
use serde::Serialize;

use seir_core::Sample;

use crate::Compartments;

/// The compartment state at one requested time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Point {
    pub t: f64,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub state: Compartments,
}

/// Compartment states over an ordered time grid, one point per grid time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Returns the grid times.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.t).collect()
    }

    /// Returns the compartment states in grid order.
    #[must_use]
    pub fn states(&self) -> Vec<Compartments> {
        self.points.iter().map(|point| point.state).collect()
    }

    /// Returns the `E + I + R` series, one value per grid time.
    #[must_use]
    pub fn affected(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.state.affected())
            .collect()
    }

    /// Returns the largest deviation of `S + E + I + R` from `population`.
    ///
    /// Returns `0.0` for an empty trajectory.
    #[must_use]
    pub fn max_population_drift(&self, population: f64) -> f64 {
        self.points
            .iter()
            .map(|point| (point.state.total() - population).abs())
            .fold(0.0, f64::max)
    }
}

impl<'a> FromIterator<&'a Sample<4>> for Trajectory {
    fn from_iter<I: IntoIterator<Item = &'a Sample<4>>>(samples: I) -> Self {
        let points = samples
            .into_iter()
            .map(|sample| Point {
                t: sample.t,
                state: sample.y.into(),
            })
            .collect();
        Self { points }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
