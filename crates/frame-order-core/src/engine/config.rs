use crate::core::numerics::QuadratureSettings;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Length mismatch for '{name}': expected {expected}, found {found}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{data} data supplied without {vectors}")]
    MissingVectors {
        data: &'static str,
        vectors: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    InvalidOption(String),
}

/// How the PCS is averaged over the motional domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMethod {
    /// Nested adaptive Gauss-Kronrod quadrature.
    Quadrature,
    /// Averaging over a fixed Sobol' point set.
    #[default]
    QuasiRandom,
}

/// Settings for the PCS integration strategy and the pseudo-ellipse matrix quadrature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IntegrationConfig {
    pub method: IntegrationMethod,
    /// Number of Sobol' points drawn for the quasi-random strategy.
    pub points: usize,
    pub quadrature: QuadratureSettings,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::default(),
            points: 500,
            quadrature: QuadratureSettings::default(),
        }
    }
}

impl IntegrationConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.method == IntegrationMethod::QuasiRandom && self.points == 0 {
            return Err(ConfigError::InvalidOption(
                "quasi-random integration needs at least one point".to_string(),
            ));
        }
        let q = &self.quadrature;
        if !(q.abs_tolerance >= 0.0 && q.rel_tolerance >= 0.0) {
            return Err(ConfigError::InvalidOption(format!(
                "quadrature tolerances must be non-negative, found {} and {}",
                q.abs_tolerance, q.rel_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_five_hundred_quasi_random_points() {
        let config = IntegrationConfig::default();
        assert_eq!(config.method, IntegrationMethod::QuasiRandom);
        assert_eq!(config.points, 500);
        assert_eq!(config.quadrature.max_subdivisions, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config = IntegrationConfig::from_toml(
            r#"
            method = "quadrature"

            [quadrature]
            abs-tolerance = 1e-10
            "#,
        )
        .unwrap();
        assert_eq!(config.method, IntegrationMethod::Quadrature);
        assert_eq!(config.points, 500);
        assert_eq!(config.quadrature.abs_tolerance, 1e-10);
        assert_eq!(config.quadrature.rel_tolerance, 1.49e-8);
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(IntegrationConfig::from_toml(r#"method = "monte-carlo""#).is_err());
    }

    #[test]
    fn rejects_empty_point_set() {
        let config = IntegrationConfig {
            points: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOption(_))
        ));
    }

    #[test]
    fn rejects_negative_tolerance() {
        let mut config = IntegrationConfig::default();
        config.quadrature.rel_tolerance = -1.0;
        assert!(config.validate().is_err());
    }
}
