//! PCS averaging over the motional domain.
//!
//! A [`PcsIntegrator`] is bound once per target function. Each evaluation calls
//! [`PcsIntegrator::prepare`] with the current domain and eigenframe, then averages every spin.

pub mod quadrature;
pub mod quasi_random;
pub mod states;

use super::config::{IntegrationConfig, IntegrationMethod};
use super::error::EngineError;
use crate::core::models::{MotionDomain, MotionModel};
use nalgebra::{Matrix3, Vector3};
use std::fmt;

pub use quadrature::QuadratureIntegrator;
pub use quasi_random::QuasiRandomIntegrator;

/// A motion-averaged PCS together with the integrator's error estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PcsEstimate {
    pub value: f64,
    pub error: f64,
}

pub trait PcsIntegrator: fmt::Debug {
    fn method(&self) -> IntegrationMethod;

    /// Binds the motional domain and eigenframe used by subsequent [`average`](Self::average) calls.
    fn prepare(&mut self, domain: &MotionDomain, eigenframe: &Matrix3<f64>);

    /// Averages the PCS of one spin.
    ///
    /// `r_pivot_atom` is the pivot-to-atom vector at the average position and `r_ln_pivot` the
    /// paramagnetic-centre-to-pivot vector, both in Angstrom. `constant` is the PCS constant of
    /// the alignment medium.
    fn average(
        &self,
        r_pivot_atom: &Vector3<f64>,
        r_ln_pivot: &Vector3<f64>,
        tensor: &Matrix3<f64>,
        constant: f64,
    ) -> PcsEstimate;
}

pub fn build_integrator(
    model: MotionModel,
    config: &IntegrationConfig,
) -> Result<Box<dyn PcsIntegrator>, EngineError> {
    config.validate()?;
    Ok(match config.method {
        IntegrationMethod::Quadrature => Box::new(QuadratureIntegrator::new(config.quadrature)),
        IntegrationMethod::QuasiRandom => {
            Box::new(QuasiRandomIntegrator::new(model, config.points)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_strategy() {
        let config = IntegrationConfig {
            method: IntegrationMethod::Quadrature,
            ..Default::default()
        };
        let integrator = build_integrator(MotionModel::IsoCone, &config).unwrap();
        assert_eq!(integrator.method(), IntegrationMethod::Quadrature);

        let integrator =
            build_integrator(MotionModel::PseudoEllipse, &IntegrationConfig::default()).unwrap();
        assert_eq!(integrator.method(), IntegrationMethod::QuasiRandom);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = IntegrationConfig {
            points: 0,
            ..Default::default()
        };
        assert!(matches!(
            build_integrator(MotionModel::Rotor, &config),
            Err(EngineError::Config { .. })
        ));
    }
}
