use crate::core::geometry;
use crate::core::models::MotionDomain;
use nalgebra::{Matrix3, Rotation3, Vector3};

/// One orientation of the moving domain, in the eigenframe angles of its motional model.
///
/// `theta` is the polar tilt for cone models and the signed tilt about y for line models.
/// Angles a model does not use stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub theta: f64,
    pub phi: f64,
    pub sigma: f64,
}

#[inline]
fn rz(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).into_inner()
}

#[inline]
fn ry(angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).into_inner()
}

/// The tilt-and-torsion rotation `Rz(phi) Ry(theta) Rz(sigma - phi)`.
#[inline]
pub fn tilt_torsion_rotation(theta: f64, phi: f64, sigma: f64) -> Matrix3<f64> {
    rz(phi) * ry(theta) * rz(sigma - phi)
}

/// The eigenframe rotation of `state` under the motion of `domain`.
pub fn state_rotation(domain: &MotionDomain, state: &MotionState) -> Matrix3<f64> {
    match domain {
        MotionDomain::Rigid => Matrix3::identity(),
        MotionDomain::Rotor { .. } => rz(state.sigma),
        MotionDomain::IsoCone { .. } | MotionDomain::PseudoEllipse { .. } => {
            tilt_torsion_rotation(state.theta, state.phi, state.sigma)
        }
        MotionDomain::IsoConeTorsionless { .. } | MotionDomain::PseudoEllipseTorsionless { .. } => {
            tilt_torsion_rotation(state.theta, state.phi, 0.0)
        }
        MotionDomain::Line { .. } => ry(state.theta) * rz(state.sigma),
        MotionDomain::LineTorsionless { .. } => ry(state.theta),
    }
}

/// Whether `state` lies inside the motional domain.
pub fn contains(domain: &MotionDomain, state: &MotionState) -> bool {
    match *domain {
        MotionDomain::Rigid => true,
        MotionDomain::Rotor { sigma_max } => state.sigma.abs() <= sigma_max,
        MotionDomain::IsoCone {
            theta_max,
            sigma_max,
        } => state.theta <= theta_max && state.sigma.abs() <= sigma_max,
        MotionDomain::IsoConeTorsionless { theta_max } => state.theta <= theta_max,
        MotionDomain::PseudoEllipse {
            theta_x,
            theta_y,
            sigma_max,
        } => {
            state.theta <= geometry::theta_max(state.phi, theta_x, theta_y)
                && state.sigma.abs() <= sigma_max
        }
        MotionDomain::PseudoEllipseTorsionless { theta_x, theta_y } => {
            state.theta <= geometry::theta_max(state.phi, theta_x, theta_y)
        }
        MotionDomain::Line {
            theta_max,
            sigma_max,
        } => state.theta.abs() <= theta_max && state.sigma.abs() <= sigma_max,
        MotionDomain::LineTorsionless { theta_max } => state.theta.abs() <= theta_max,
    }
}

/// Moves the angles of zero-width dimensions onto the domain centre.
///
/// A sampled tilt or torsion is never exactly zero, so without this a cone with no opening or
/// no torsion would reject every sample. Collapsing matches the point evaluation the quadrature
/// path uses for the same dimension.
pub fn collapse_closed_dimensions(domain: &MotionDomain, state: &MotionState) -> MotionState {
    let (tilt, torsion) = match *domain {
        MotionDomain::Rigid => (0.0, 0.0),
        MotionDomain::Rotor { sigma_max } => (0.0, sigma_max),
        MotionDomain::IsoCone {
            theta_max,
            sigma_max,
        }
        | MotionDomain::Line {
            theta_max,
            sigma_max,
        } => (theta_max, sigma_max),
        MotionDomain::IsoConeTorsionless { theta_max }
        | MotionDomain::LineTorsionless { theta_max } => (theta_max, 0.0),
        MotionDomain::PseudoEllipse {
            theta_x,
            theta_y,
            sigma_max,
        } => (theta_x.min(theta_y), sigma_max),
        MotionDomain::PseudoEllipseTorsionless { theta_x, theta_y } => {
            (theta_x.min(theta_y), 0.0)
        }
    };
    MotionState {
        theta: if tilt == 0.0 { 0.0 } else { state.theta },
        phi: state.phi,
        sigma: if torsion == 0.0 { 0.0 } else { state.sigma },
    }
}

/// Conjugates an eigenframe rotation into the reference frame, `E R' E^T`.
#[inline]
pub fn to_reference_frame(eigenframe: &Matrix3<f64>, rotation: &Matrix3<f64>) -> Matrix3<f64> {
    eigenframe * rotation * eigenframe.transpose()
}
