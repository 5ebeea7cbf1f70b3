#[cfg(feature = "serde")]
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::schedule::DEFAULT_INTERVENTION_TIMES;

/// Default population, with a single infectious individual seeded.
const DEFAULT_INITIAL_STATE: [f64; 4] = [83_019_212.0, 0.0, 1.0, 0.0];

/// How the initial susceptible count is derived when integrating.
///
/// Integration replaces the configured exposed count with a caller-supplied
/// `e0` and recomputes the susceptible count from the population `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InitialSusceptible {
    /// `N - 2·E0 - I0`, using the configured `E0` and `I0`.
    ///
    /// Subtracts the configured exposed count twice and ignores both `e0` and
    /// `R0`, so the starting state does not in general sum to `N`.
    #[default]
    Literal,

    /// `N - e0 - I0 - R0`, which starts the solve on the population total.
    Corrected,
}

/// Configuration for an [`EpidemicModel`].
///
/// Every field has a default, so configuration files only need to list the
/// values they change. Validation happens in [`EpidemicModel::new`].
///
/// [`EpidemicModel`]: crate::EpidemicModel
/// [`EpidemicModel::new`]: crate::EpidemicModel::new
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ModelConfig {
    /// Mean number of days spent exposed before becoming infectious.
    pub incubation_period: f64,

    /// Mean number of days spent infectious.
    pub infectious_period: f64,

    /// Reproduction number under baseline conditions.
    pub basic_reproduction_number: f64,

    /// Days at which the active reproduction number changes.
    pub intervention_times: Vec<f64>,

    /// Initial counts in `S, E, I, R` order.
    pub initial_state: Vec<f64>,

    pub initial_susceptible: InitialSusceptible,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            incubation_period: 5.2,
            infectious_period: 2.9,
            basic_reproduction_number: 3.4,
            intervention_times: DEFAULT_INTERVENTION_TIMES.to_vec(),
            initial_state: DEFAULT_INITIAL_STATE.to_vec(),
            initial_susceptible: InitialSusceptible::default(),
        }
    }
}

/// Errors that can occur when loading a [`ModelConfig`] from TOML.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(feature = "serde")]
impl ModelConfig {
    /// Parses a config from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the document is malformed, contains
    /// unknown keys, or has values of the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, or
    /// [`LoadError::Parse`] if its contents are not a valid config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(ModelConfig::from_toml_str("").unwrap(), ModelConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_listed_keys() {
        let config = ModelConfig::from_toml_str(
            r#"
            infectious_period = 4.0
            intervention_times = [10.0, 20.0]
            initial_susceptible = "corrected"
            "#,
        )
        .unwrap();

        assert_eq!(config.infectious_period, 4.0);
        assert_eq!(config.intervention_times, vec![10.0, 20.0]);
        assert_eq!(config.initial_susceptible, InitialSusceptible::Corrected);
        assert_eq!(config.incubation_period, 5.2);
        assert_eq!(config.initial_state, DEFAULT_INITIAL_STATE.to_vec());
    }

    #[test]
    fn wrong_length_initial_state_still_parses() {
        let config = ModelConfig::from_toml_str("initial_state = [1.0, 2.0, 3.0]").unwrap();
        assert_eq!(config.initial_state.len(), 3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = ModelConfig::from_toml_str("infective_period = 2.9");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ModelConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
