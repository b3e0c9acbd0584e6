use super::states::{
    MotionState, collapse_closed_dimensions, contains, state_rotation, to_reference_frame,
};
use super::{PcsEstimate, PcsIntegrator};
use crate::core::models::{MotionDomain, MotionModel};
use crate::core::numerics::{SobolError, SobolSequence};
use crate::core::tensor::observables::pcs;
use crate::engine::config::IntegrationMethod;
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;
use tracing::trace;

/// Maps a unit-cube Sobol' point onto the angles of `model`.
///
/// The polar angle is drawn as `acos(2u - 1)` so that points are uniform on the sphere, which
/// makes a plain mean over the accepted points the `sin(theta)`-weighted average.
fn map_point(model: MotionModel, u: &[f64]) -> MotionState {
    let polar = |x: f64| (2.0 * x - 1.0).acos();
    let azimuth = |x: f64| 2.0 * PI * x;
    let signed = |x: f64| 2.0 * PI * (x - 0.5);

    match model {
        MotionModel::Rigid => MotionState::default(),
        MotionModel::Rotor | MotionModel::FreeRotor => MotionState {
            sigma: signed(u[0]),
            ..Default::default()
        },
        MotionModel::LineTorsionless => MotionState {
            theta: signed(u[0]),
            ..Default::default()
        },
        MotionModel::Line | MotionModel::LineFreeRotor => MotionState {
            theta: signed(u[0]),
            phi: 0.0,
            sigma: signed(u[1]),
        },
        MotionModel::IsoConeTorsionless | MotionModel::PseudoEllipseTorsionless => MotionState {
            theta: polar(u[0]),
            phi: azimuth(u[1]),
            sigma: 0.0,
        },
        MotionModel::IsoCone
        | MotionModel::IsoConeFreeRotor
        | MotionModel::PseudoEllipse
        | MotionModel::PseudoEllipseFreeRotor => MotionState {
            theta: polar(u[0]),
            phi: azimuth(u[1]),
            sigma: signed(u[2]),
        },
    }
}

/// PCS averaging over a fixed set of Sobol' points.
///
/// The points are drawn and mapped to angles once. Every [`prepare`](PcsIntegrator::prepare)
/// keeps the states inside the current domain and caches their reference-frame rotations, so
/// each spin costs one matrix-vector product per accepted state.
#[derive(Debug, Clone)]
pub struct QuasiRandomIntegrator {
    states: Vec<MotionState>,
    rotations: Vec<Matrix3<f64>>,
}

impl QuasiRandomIntegrator {
    pub fn new(model: MotionModel, points: usize) -> Result<Self, SobolError> {
        let dimensions = model.integration_dimensions();
        let states: Vec<MotionState> = if dimensions == 0 {
            Vec::new()
        } else {
            SobolSequence::new(dimensions)?
                .take(points)
                .map(|u| map_point(model, &u))
                .collect()
        };
        let rotations = Vec::with_capacity(states.len().max(1));
        Ok(Self { states, rotations })
    }

    pub fn states(&self) -> &[MotionState] {
        &self.states
    }

    /// The number of states inside the domain bound by the last `prepare`.
    pub fn accepted(&self) -> usize {
        self.rotations.len()
    }
}

impl PcsIntegrator for QuasiRandomIntegrator {
    fn method(&self) -> IntegrationMethod {
        IntegrationMethod::QuasiRandom
    }

    fn prepare(&mut self, domain: &MotionDomain, eigenframe: &Matrix3<f64>) {
        self.rotations.clear();
        for state in &self.states {
            let state = collapse_closed_dimensions(domain, state);
            if contains(domain, &state) {
                self.rotations
                    .push(to_reference_frame(eigenframe, &state_rotation(domain, &state)));
            }
        }
        if self.rotations.is_empty() {
            // No sample hit the domain, fall back to the average position.
            self.rotations.push(Matrix3::identity());
        }
        trace!(
            accepted = self.rotations.len(),
            total = self.states.len(),
            "Bound quasi-random states to motional domain"
        );
    }

    fn average(
        &self,
        r_pivot_atom: &Vector3<f64>,
        r_ln_pivot: &Vector3<f64>,
        tensor: &Matrix3<f64>,
        constant: f64,
    ) -> PcsEstimate {
        let (sum, sum_sq) = self
            .rotations
            .iter()
            .map(|r| pcs(1.0, &(r * r_pivot_atom + r_ln_pivot), tensor))
            .fold((0.0, 0.0), |(s, s2), f| (s + f, s2 + f * f));

        let n = self.rotations.len() as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).abs();

        PcsEstimate {
            value: constant * mean,
            error: constant.abs() * (variance / n).sqrt(),
        }
    }
}
