use thiserror::Error;

/// Default relative and absolute tolerance.
///
/// Matches the customary LSODA defaults (`sqrt(f64::EPSILON)` rounded).
const DEFAULT_TOL: f64 = 1.49012e-8;

/// Supported integration methods.
///
/// Both methods are explicit embedded Runge–Kutta schemes with adaptive step
/// size control. They suit non-stiff problems; stiffness is reported by the
/// integrator as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// Adaptive Dormand–Prince 5(4) Runge–Kutta method.
    ///
    /// Computes both 5th and 4th order solutions to estimate local truncation
    /// error and adjusts the step size to keep it within tolerance.
    Dopri5,

    /// Adaptive Dormand–Prince 8(5,3) Runge–Kutta method.
    ///
    /// A higher-order method with more work per step but usually fewer steps
    /// at tight tolerances.
    #[default]
    Dop853,
}

/// Configuration for the ODE solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    method: Method,
    rel_tol: f64,
    abs_tol: f64,
}

/// Errors that can occur when validating an ODE solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and positive")]
    RelTol,

    #[error("abs_tol must be finite and positive")]
    AbsTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::default(),
            rel_tol: DEFAULT_TOL,
            abs_tol: DEFAULT_TOL,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is non-positive or non-finite.
    pub fn new(method: Method, rel_tol: f64, abs_tol: f64) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol <= 0.0 {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }

        Ok(Self {
            method,
            rel_tol,
            abs_tol,
        })
    }

    /// Returns a copy of this config using `method`.
    #[must_use]
    pub fn with_method(self, method: Method) -> Self {
        Self { method, ..self }
    }

    /// Returns the integration method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }
}
