use super::states::{MotionState, state_rotation, to_reference_frame};
use super::{PcsEstimate, PcsIntegrator};
use crate::core::geometry::{pec, theta_max};
use crate::core::models::MotionDomain;
use crate::core::numerics::{QuadratureSettings, integrate};
use crate::core::tensor::observables::pcs;
use crate::engine::config::IntegrationMethod;
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// Averages over `[-half_width, half_width]` with a flat measure. A zero width collapses to
/// the centre.
///
/// `g` returns a value with its own error estimate. The reported error adds the largest inner
/// error to the normalised error of this integral.
fn symmetric_average<G>(half_width: f64, settings: &QuadratureSettings, mut g: G) -> (f64, f64)
where
    G: FnMut(f64) -> (f64, f64),
{
    if half_width == 0.0 {
        return g(0.0);
    }
    let mut inner_error = 0.0_f64;
    let result = integrate(
        |x| {
            let (value, error) = g(x);
            inner_error = inner_error.max(error);
            value
        },
        -half_width,
        half_width,
        settings,
    );
    let norm = 2.0 * half_width;
    (result.value / norm, result.abs_error / norm + inner_error)
}

/// Averages over a cone with edge `limit(phi)` using the `sin(theta)` surface measure.
/// A cone with no area collapses to its axis.
fn cone_average<L, G>(area: f64, limit: L, settings: &QuadratureSettings, g: G) -> (f64, f64)
where
    L: Fn(f64) -> f64,
    G: Fn(f64, f64) -> f64,
{
    if area == 0.0 {
        return (g(0.0, 0.0), 0.0);
    }
    let mut inner_error = 0.0_f64;
    let result = integrate(
        |phi| {
            let inner = integrate(
                |theta| g(theta, phi) * theta.sin(),
                0.0,
                limit(phi),
                settings,
            );
            inner_error = inner_error.max(inner.abs_error);
            inner.value
        },
        -PI,
        PI,
        settings,
    );
    (
        result.value / area,
        (result.abs_error + 2.0 * PI * inner_error) / area,
    )
}

/// PCS averaging by nested adaptive quadrature, torsion outermost, then azimuth, then tilt.
#[derive(Debug, Clone)]
pub struct QuadratureIntegrator {
    settings: QuadratureSettings,
    domain: MotionDomain,
    eigenframe: Matrix3<f64>,
}

impl QuadratureIntegrator {
    pub fn new(settings: QuadratureSettings) -> Self {
        Self {
            settings,
            domain: MotionDomain::Rigid,
            eigenframe: Matrix3::identity(),
        }
    }
}

impl PcsIntegrator for QuadratureIntegrator {
    fn method(&self) -> IntegrationMethod {
        IntegrationMethod::Quadrature
    }

    fn prepare(&mut self, domain: &MotionDomain, eigenframe: &Matrix3<f64>) {
        self.domain = *domain;
        self.eigenframe = *eigenframe;
    }

    fn average(
        &self,
        r_pivot_atom: &Vector3<f64>,
        r_ln_pivot: &Vector3<f64>,
        tensor: &Matrix3<f64>,
        constant: f64,
    ) -> PcsEstimate {
        let settings = &self.settings;
        let single = |theta: f64, phi: f64, sigma: f64| {
            let state = MotionState { theta, phi, sigma };
            let r = to_reference_frame(&self.eigenframe, &state_rotation(&self.domain, &state));
            pcs(1.0, &(r * r_pivot_atom + r_ln_pivot), tensor)
        };

        let (value, error) = match self.domain {
            MotionDomain::Rigid => (single(0.0, 0.0, 0.0), 0.0),
            MotionDomain::Rotor { sigma_max } => {
                symmetric_average(sigma_max, settings, |s| (single(0.0, 0.0, s), 0.0))
            }
            MotionDomain::IsoCone {
                theta_max: cone,
                sigma_max,
            } => {
                let area = 2.0 * PI * (1.0 - cone.cos());
                symmetric_average(sigma_max, settings, |s| {
                    cone_average(area, |_| cone, settings, |t, p| single(t, p, s))
                })
            }
            MotionDomain::IsoConeTorsionless { theta_max: cone } => {
                let area = 2.0 * PI * (1.0 - cone.cos());
                cone_average(area, |_| cone, settings, |t, p| single(t, p, 0.0))
            }
            MotionDomain::PseudoEllipse {
                theta_x,
                theta_y,
                sigma_max,
            } => {
                let area = pec(theta_x, theta_y);
                let edge = |p| theta_max(p, theta_x, theta_y);
                symmetric_average(sigma_max, settings, |s| {
                    cone_average(area, edge, settings, |t, p| single(t, p, s))
                })
            }
            MotionDomain::PseudoEllipseTorsionless { theta_x, theta_y } => {
                let area = pec(theta_x, theta_y);
                let edge = |p| theta_max(p, theta_x, theta_y);
                cone_average(area, edge, settings, |t, p| single(t, p, 0.0))
            }
            MotionDomain::Line {
                theta_max: tilt,
                sigma_max,
            } => symmetric_average(sigma_max, settings, |s| {
                symmetric_average(tilt, settings, |t| (single(t, 0.0, s), 0.0))
            }),
            MotionDomain::LineTorsionless { theta_max: tilt } => {
                symmetric_average(tilt, settings, |t| (single(t, 0.0, 0.0), 0.0))
            }
        };

        PcsEstimate {
            value: constant * value,
            error: constant.abs() * error,
        }
    }
}
