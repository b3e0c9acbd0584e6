use super::rotor::{compile_axial, compile_rotor};
use crate::core::algebra::Matrix9;
use nalgebra::Vector3;

/// The frame order matrix of a line motion, a uniform tilt about the eigenframe y axis within
/// `[-theta_max, theta_max]` followed by uniform torsion about z.
///
/// Each state is `Ry(theta) Rz(sigma)` with independent angles, so the average factorises into
/// `<Ry (x) Ry> <Rz (x) Rz>`.
pub fn compile_line(theta_max: f64, sigma_max: f64) -> Matrix9 {
    compile_line_torsionless(theta_max) * compile_rotor(sigma_max)
}

pub fn compile_line_torsionless(theta_max: f64) -> Matrix9 {
    compile_axial(&Vector3::y(), theta_max)
}
