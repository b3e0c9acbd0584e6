use nalgebra::{Rotation3, Unit, Vector3};
use std::f64::consts::PI;

/// Builds the active z-y-z Euler rotation `Rz(gamma) * Ry(beta) * Rz(alpha)`.
pub fn euler_to_rotation(alpha: f64, beta: f64, gamma: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), gamma)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), beta)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), alpha)
}

/// The rotation taking the direction of `from` onto the direction of `to`.
///
/// Anti-parallel vectors are handled with a half-turn about an axis perpendicular to `from`.
/// Zero-length input yields the identity.
pub fn two_vector_rotation(from: &Vector3<f64>, to: &Vector3<f64>) -> Rotation3<f64> {
    if let Some(rotation) = Rotation3::rotation_between(from, to) {
        return rotation;
    }

    let Some(from_unit) = from.try_normalize(f64::EPSILON) else {
        return Rotation3::identity();
    };
    let helper = if from_unit.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis = Unit::new_normalize(from_unit.cross(&helper));
    Rotation3::from_axis_angle(&axis, PI)
}

/// Converts spherical `(r, theta, phi)` into a Cartesian vector, theta being the polar angle.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> Vector3<f64> {
    let sin_theta = theta.sin();
    Vector3::new(
        r * phi.cos() * sin_theta,
        r * phi.sin() * sin_theta,
        r * theta.cos(),
    )
}

/// Converts a Cartesian vector into spherical `(r, theta, phi)`.
///
/// The zero vector maps to `(0, 0, 0)`.
pub fn cartesian_to_spherical(vector: &Vector3<f64>) -> (f64, f64, f64) {
    let r = vector.norm();
    if r == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let theta = (vector.z / r).clamp(-1.0, 1.0).acos();
    let phi = vector.y.atan2(vector.x);
    (r, theta, phi)
}
