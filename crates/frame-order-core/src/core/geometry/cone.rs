use super::GeometryError;

/// The order parameter of an isotropic cone with half-opening angle `theta`.
///
/// `S = cos(theta) (1 + cos(theta)) / 2`, which is 1 for a rigid cone and 0 at `theta = pi/2`.
#[inline]
pub fn iso_cone_theta_to_s(theta: f64) -> f64 {
    let cos_theta = theta.cos();
    0.5 * cos_theta * (1.0 + cos_theta)
}

/// Inverts [`iso_cone_theta_to_s`] on the branch `theta` in `[0, 2 pi / 3]`, where the order
/// parameter falls monotonically from 1 to its minimum of -1/8.
///
/// Returns NaN for order parameters below -1/8.
#[inline]
pub fn iso_cone_s_to_theta(s: f64) -> f64 {
    (0.5 * ((8.0 * s + 1.0).sqrt() - 1.0)).acos()
}

/// Rejects order parameters outside `[-1/8, 1]` (including NaN).
pub fn check_order_parameter(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if (-0.125..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GeometryError::OrderParameterOutOfRange { name, value })
    }
}
