use seir_core::OdeSystem;
use seir_solvers::ode;

use crate::{
    Compartments, ConfigError, Error, InitialSusceptible, InterventionSchedule, ModelConfig,
    RateCountError, Trajectory,
};

/// Number of reproduction numbers used by [`EpidemicModel::observe`].
pub const OBSERVED_RATE_COUNT: usize = 6;

/// An SEIR model with a piecewise-constant reproduction number.
///
/// The model owns its epidemiological parameters, intervention schedule, and
/// initial state, all fixed at construction. Every integration is a pure
/// function of its arguments, so a single model can be shared freely across
/// threads and used for many independent solves.
///
/// The compartments evolve as
///
/// ```text
/// dS/dt = -(S/N) · (r(t)/t_inf) · I
/// dE/dt =  (S/N) · (r(t)/t_inf) · I - E/t_inc
/// dI/dt =  E/t_inc - I/t_inf
/// dR/dt =  I/t_inf
/// ```
///
/// where `r(t)` is selected from a caller-supplied reproduction-number
/// sequence by the [`InterventionSchedule`].
#[derive(Debug, Clone, PartialEq)]
pub struct EpidemicModel {
    incubation_period: f64,
    infectious_period: f64,
    basic_reproduction_number: f64,
    schedule: InterventionSchedule,
    initial_state: Compartments,
    population: f64,
    initial_susceptible: InitialSusceptible,
}

impl EpidemicModel {
    /// Creates a model from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either period is not a finite positive
    /// number, if the basic reproduction number is negative or not finite, if
    /// the initial state does not hold exactly four finite non-negative counts
    /// with a positive total, or if the intervention times decrease.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        let ModelConfig {
            incubation_period,
            infectious_period,
            basic_reproduction_number,
            intervention_times,
            initial_state,
            initial_susceptible,
        } = config;

        if !infectious_period.is_finite() || infectious_period <= 0.0 {
            return Err(ConfigError::InfectiousPeriod(infectious_period));
        }
        if !incubation_period.is_finite() || incubation_period <= 0.0 {
            return Err(ConfigError::IncubationPeriod(incubation_period));
        }
        if !basic_reproduction_number.is_finite() || basic_reproduction_number < 0.0 {
            return Err(ConfigError::ReproductionNumber(basic_reproduction_number));
        }

        let initial_state = Compartments::try_from(initial_state.as_slice())?;
        if !initial_state.is_valid() {
            return Err(ConfigError::InitialStateValue(initial_state));
        }

        let population = initial_state.total();
        if population <= 0.0 {
            return Err(ConfigError::EmptyPopulation(population));
        }

        let schedule = InterventionSchedule::new(intervention_times)?;

        log::debug!(
            "SEIR model: N={population}, t_inc={incubation_period}, t_inf={infectious_period}, \
             r0={basic_reproduction_number}, {} intervention(s)",
            schedule.breakpoints().len(),
        );

        Ok(Self {
            incubation_period,
            infectious_period,
            basic_reproduction_number,
            schedule,
            initial_state,
            population,
            initial_susceptible,
        })
    }

    #[must_use]
    pub fn incubation_period(&self) -> f64 {
        self.incubation_period
    }

    #[must_use]
    pub fn infectious_period(&self) -> f64 {
        self.infectious_period
    }

    #[must_use]
    pub fn basic_reproduction_number(&self) -> f64 {
        self.basic_reproduction_number
    }

    /// Returns the total population `N`, fixed at construction.
    #[must_use]
    pub fn population(&self) -> f64 {
        self.population
    }

    /// Returns the initial state exactly as configured.
    #[must_use]
    pub fn initial_state(&self) -> Compartments {
        self.initial_state
    }

    #[must_use]
    pub fn schedule(&self) -> &InterventionSchedule {
        &self.schedule
    }

    #[must_use]
    pub fn initial_susceptible(&self) -> InitialSusceptible {
        self.initial_susceptible
    }

    /// Returns the basic reproduction number repeated once per interval.
    #[must_use]
    pub fn baseline_rates(&self) -> Vec<f64> {
        vec![self.basic_reproduction_number; self.schedule.rate_count()]
    }

    /// Returns the reproduction number active at time `t`.
    ///
    /// See [`InterventionSchedule::select_r`].
    ///
    /// # Errors
    ///
    /// Returns a [`RateCountError`] if `rates` does not match the schedule.
    pub fn select_r(&self, t: f64, rates: &[f64]) -> Result<f64, RateCountError> {
        self.schedule.select_r(t, rates)
    }

    /// Evaluates the rate of change of every compartment.
    ///
    /// With `rates` set to `None` the basic reproduction number applies at all
    /// times.
    ///
    /// # Errors
    ///
    /// Returns a [`RateCountError`] if `rates` does not match the schedule.
    pub fn derivative(
        &self,
        t: f64,
        state: &Compartments,
        rates: Option<&[f64]>,
    ) -> Result<Compartments, RateCountError> {
        let r = match rates {
            Some(rates) => self.select_r(t, rates)?,
            None => self.basic_reproduction_number,
        };
        Ok(self.flows(r, state))
    }

    /// Returns the state that integration starts from, given an exposed count.
    ///
    /// The configured infectious and removed counts are kept, the exposed
    /// count is replaced with `e0`, and the susceptible count is derived
    /// according to [`InitialSusceptible`].
    #[must_use]
    pub fn initial_conditions(&self, e0: f64) -> Compartments {
        let Compartments {
            exposed,
            infectious,
            removed,
            ..
        } = self.initial_state;

        let susceptible = match self.initial_susceptible {
            InitialSusceptible::Literal => self.population - 2.0 * exposed - infectious,
            InitialSusceptible::Corrected => self.population - e0 - infectious - removed,
        };

        Compartments::new(susceptible, e0, infectious, removed)
    }

    /// Integrates the model over `times` with the default solver settings.
    ///
    /// `times` must be non-decreasing; the first entry is the time of the
    /// initial conditions from [`Self::initial_conditions`]. `rates` must
    /// hold one reproduction number per schedule interval.
    ///
    /// # Errors
    ///
    /// Returns an error if `rates` does not match the schedule, if the initial
    /// conditions are not a valid population, or if the solver fails.
    pub fn integrate(&self, times: &[f64], rates: &[f64], e0: f64) -> Result<Trajectory, Error> {
        self.integrate_with(times, rates, e0, &ode::Config::default())
    }

    /// Integrates the model over `times` with explicit solver settings.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::integrate`].
    pub fn integrate_with(
        &self,
        times: &[f64],
        rates: &[f64],
        e0: f64,
        config: &ode::Config,
    ) -> Result<Trajectory, Error> {
        self.schedule.check_rates(rates)?;

        let initial = self.initial_conditions(e0);
        if !initial.is_valid() {
            return Err(Error::InvalidInitialConditions(initial));
        }

        let solution = ode::solve_unobserved(self, rates, initial.to_array(), times, config)?;

        Ok(solution.samples.iter().collect())
    }

    /// Returns the `E + I + R` series for a mirrored intervention pattern.
    ///
    /// The reproduction numbers `[r0, r1, r2, r3, r1, r0]` are applied across
    /// the schedule's six intervals: restrictions tighten through `r1..r3` and
    /// then relax back through `r1` to `r0`. The result holds one value per
    /// entry of `times`, suitable for direct comparison with reported case
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RateCount`] if the schedule does not have exactly six
    /// intervals, and otherwise fails under the same conditions as
    /// [`Self::integrate`].
    pub fn observe(
        &self,
        times: &[f64],
        r0: f64,
        r1: f64,
        r2: f64,
        r3: f64,
        e0: f64,
    ) -> Result<Vec<f64>, Error> {
        let rates: [f64; OBSERVED_RATE_COUNT] = [r0, r1, r2, r3, r1, r0];
        Ok(self.integrate(times, &rates, e0)?.affected())
    }

    /// Computes the compartment flows for a given reproduction number.
    fn flows(&self, r: f64, state: &Compartments) -> Compartments {
        let Compartments {
            susceptible,
            exposed,
            infectious,
            ..
        } = *state;

        let infection = susceptible / self.population * (r / self.infectious_period * infectious);
        let onset = exposed / self.incubation_period;
        let removal = infectious / self.infectious_period;

        Compartments {
            susceptible: -infection,
            exposed: infection - onset,
            infectious: onset - removal,
            removed: removal,
        }
    }
}

impl Default for EpidemicModel {
    /// Builds the model from [`ModelConfig::default`].
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(ModelConfig::default()).unwrap()
    }
}

impl OdeSystem<4> for EpidemicModel {
    type Params = [f64];
    type Error = RateCountError;

    fn derivative(&self, t: f64, y: &[f64; 4], rates: &[f64]) -> Result<[f64; 4], Self::Error> {
        let r = self.schedule.select_r(t, rates)?;
        Ok(self.flows(r, &Compartments::from(*y)).into())
    }

    fn discontinuities(&self) -> &[f64] {
        self.schedule.breakpoints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn model_with(config: ModelConfig) -> EpidemicModel {
        EpidemicModel::new(config).unwrap()
    }

    #[test]
    fn default_construction() {
        let model = EpidemicModel::default();

        assert_eq!(model.incubation_period(), 5.2);
        assert_eq!(model.infectious_period(), 2.9);
        assert_eq!(model.basic_reproduction_number(), 3.4);
        assert_eq!(model.schedule().breakpoints(), &[23.0, 30.0, 60.0, 230.0, 330.0]);
        assert_eq!(model.population(), 83_019_213.0);
        assert_eq!(model.initial_susceptible(), InitialSusceptible::Literal);
    }

    #[test]
    fn rejects_non_positive_periods() {
        let zero_inf = ModelConfig {
            infectious_period: 0.0,
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(zero_inf),
            Err(ConfigError::InfectiousPeriod(0.0))
        );

        let negative_inc = ModelConfig {
            incubation_period: -1.0,
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(negative_inc),
            Err(ConfigError::IncubationPeriod(-1.0))
        );
    }

    #[test]
    fn infectious_period_is_checked_first() {
        let both_bad = ModelConfig {
            incubation_period: 0.0,
            infectious_period: 0.0,
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(both_bad),
            Err(ConfigError::InfectiousPeriod(0.0))
        );
    }

    #[test]
    fn rejects_negative_reproduction_number() {
        let config = ModelConfig {
            basic_reproduction_number: -0.1,
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(config),
            Err(ConfigError::ReproductionNumber(-0.1))
        );
    }

    #[test]
    fn rejects_malformed_initial_state() {
        let short = ModelConfig {
            initial_state: vec![1.0, 2.0, 3.0],
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(short),
            Err(ConfigError::InitialStateLength { len: 3 })
        );

        let negative = ModelConfig {
            initial_state: vec![10.0, -1.0, 1.0, 0.0],
            ..ModelConfig::default()
        };
        assert!(matches!(
            EpidemicModel::new(negative),
            Err(ConfigError::InitialStateValue(_))
        ));

        let empty = ModelConfig {
            initial_state: vec![0.0; 4],
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(empty),
            Err(ConfigError::EmptyPopulation(0.0))
        );
    }

    #[test]
    fn rejects_decreasing_intervention_times() {
        let config = ModelConfig {
            intervention_times: vec![23.0, 30.0, 25.0],
            ..ModelConfig::default()
        };
        assert_eq!(
            EpidemicModel::new(config),
            Err(ConfigError::DecreasingBreakpoints { index: 2 })
        );
    }

    #[test]
    fn derivative_matches_equations() {
        let model = model_with(ModelConfig {
            incubation_period: 5.0,
            infectious_period: 2.0,
            intervention_times: vec![10.0],
            initial_state: vec![900.0, 50.0, 40.0, 10.0],
            ..ModelConfig::default()
        });
        let state = Compartments::new(900.0, 50.0, 40.0, 10.0);

        // r = 3 before t = 10: infection = 0.9 * 1.5 * 40 = 54
        let before = model.derivative(5.0, &state, Some(&[3.0, 1.0])).unwrap();
        assert_relative_eq!(before.susceptible, -54.0);
        assert_relative_eq!(before.exposed, 54.0 - 10.0);
        assert_relative_eq!(before.infectious, 10.0 - 20.0);
        assert_relative_eq!(before.removed, 20.0);

        // r = 1 from t = 10: infection = 0.9 * 0.5 * 40 = 18
        let after = model.derivative(10.0, &state, Some(&[3.0, 1.0])).unwrap();
        assert_relative_eq!(after.susceptible, -18.0);
        assert_relative_eq!(after.exposed, 18.0 - 10.0);
    }

    #[test]
    fn derivative_conserves_population() {
        let model = EpidemicModel::default();
        let state = Compartments::new(8e7, 2e6, 1e6, 19_213.0);

        for t in [0.0, 25.0, 100.0, 400.0] {
            let flows = model
                .derivative(t, &state, Some(&[3.0, 0.9, 0.5, 1.1, 0.9, 3.0]))
                .unwrap();
            assert_abs_diff_eq!(flows.total(), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn derivative_without_rates_uses_baseline() {
        let model = EpidemicModel::default();
        let state = Compartments::new(8e7, 1e3, 1e3, 0.0);

        let implicit = model.derivative(100.0, &state, None).unwrap();
        let explicit = model
            .derivative(100.0, &state, Some(model.baseline_rates().as_slice()))
            .unwrap();

        assert_eq!(model.baseline_rates().len(), 6);
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn derivative_rejects_wrong_rate_count() {
        let model = EpidemicModel::default();

        let result = model.derivative(0.0, &Compartments::default(), Some(&[1.0; 5]));

        assert_eq!(
            result,
            Err(RateCountError {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn literal_initial_conditions() {
        let model = model_with(ModelConfig {
            initial_state: vec![1000.0, 10.0, 5.0, 3.0],
            ..ModelConfig::default()
        });

        let initial = model.initial_conditions(7.0);

        // N - 2 * E0 - I0 = 1018 - 20 - 5
        assert_eq!(initial, Compartments::new(993.0, 7.0, 5.0, 3.0));
    }

    #[test]
    fn corrected_initial_conditions_conserve_population() {
        let model = model_with(ModelConfig {
            initial_state: vec![1000.0, 10.0, 5.0, 3.0],
            initial_susceptible: InitialSusceptible::Corrected,
            ..ModelConfig::default()
        });

        let initial = model.initial_conditions(7.0);

        assert_eq!(initial, Compartments::new(1003.0, 7.0, 5.0, 3.0));
        assert_relative_eq!(initial.total(), model.population());
    }

    #[test]
    fn integrate_rejects_invalid_initial_conditions() {
        let model = model_with(ModelConfig {
            initial_state: vec![10.0, 0.0, 1.0, 0.0],
            initial_susceptible: InitialSusceptible::Corrected,
            ..ModelConfig::default()
        });

        let result = model.integrate(&[0.0, 1.0], &model.baseline_rates(), 20.0);

        assert!(matches!(result, Err(Error::InvalidInitialConditions(_))));
    }

    #[test]
    fn integrate_rejects_wrong_rate_count() {
        let model = EpidemicModel::default();

        let result = model.integrate(&[0.0, 1.0], &[3.0; 5], 0.0);

        assert!(matches!(result, Err(Error::RateCount(_))));
    }

    #[test]
    fn observe_requires_six_intervals() {
        let model = model_with(ModelConfig {
            intervention_times: vec![10.0, 20.0],
            ..ModelConfig::default()
        });

        let result = model.observe(&[0.0, 1.0], 3.0, 1.0, 0.5, 0.8, 0.0);

        assert!(matches!(
            result,
            Err(Error::RateCount(RateCountError {
                expected: 3,
                actual: 6
            }))
        ));
    }

    #[test]
    fn model_is_a_pure_ode_system() {
        let model = EpidemicModel::default();
        let rates = model.baseline_rates();
        let y = [8e7, 100.0, 50.0, 0.0];

        let first = <EpidemicModel as OdeSystem<4>>::derivative(&model, 12.0, &y, &rates).unwrap();
        let second = <EpidemicModel as OdeSystem<4>>::derivative(&model, 12.0, &y, &rates).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            <EpidemicModel as OdeSystem<4>>::discontinuities(&model),
            model.schedule().breakpoints()
        );
    }
}
