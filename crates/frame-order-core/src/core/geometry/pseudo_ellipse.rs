use super::GeometryError;
use std::f64::consts::PI;

/// Number of terms kept in the power series of [`pec`].
const PEC_SERIES_TERMS: usize = 11;

/// The maximum polar tilt of a pseudo-elliptic cone in the azimuthal direction `phi`.
///
/// `theta_max = theta_x * theta_y / sqrt((cos(phi) theta_y)^2 + (sin(phi) theta_x)^2)`, and 0 for a
/// degenerate ellipse where either angle is zero.
#[inline]
pub fn theta_max(phi: f64, theta_x: f64, theta_y: f64) -> f64 {
    if theta_x == 0.0 || theta_y == 0.0 {
        return 0.0;
    }
    let x = phi.cos() * theta_y;
    let y = phi.sin() * theta_x;
    theta_x * theta_y / (x * x + y * y).sqrt()
}

/// The surface area of the unit sphere enclosed by a pseudo-elliptic cone.
///
/// This is `int_{-pi}^{pi} (1 - cos(theta_max(phi))) dphi`. Expanding the cosine and integrating
/// every power of `theta_max` in closed form gives an alternating series in `theta_x * theta_y`,
/// with Legendre polynomials of `(theta_x^2 + theta_y^2) / (2 theta_x theta_y)` as coefficients:
///
/// `pec = 2 pi sum_{n>=1} (-1)^(n+1) (theta_x theta_y)^n P_{n-1}(z) / (2n)!`
///
/// The truncated series is accurate to better than 1e-9 relative for angles in `[0, pi]`.
pub fn pec(theta_x: f64, theta_y: f64) -> f64 {
    if theta_x == 0.0 || theta_y == 0.0 {
        return 0.0;
    }

    let product = theta_x * theta_y;
    let z = (theta_x * theta_x + theta_y * theta_y) / (2.0 * product);

    let mut legendre_prev = 1.0;
    let mut legendre = 1.0;
    let mut power = 1.0;
    let mut factorial = 1.0;
    let mut sum = 0.0;

    for n in 1..=PEC_SERIES_TERMS {
        power *= product;
        factorial *= ((2 * n - 1) * (2 * n)) as f64;

        let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
        sum += sign * power * legendre / factorial;

        // Bonnet recursion: P_n from P_{n-1} and P_{n-2}.
        let k = n as f64;
        let next = if n == 1 {
            z
        } else {
            ((2.0 * k - 1.0) * z * legendre - (k - 1.0) * legendre_prev) / k
        };
        legendre_prev = legendre;
        legendre = next;
    }

    2.0 * PI * sum
}

/// Rejects cone and torsion half-angles outside `[0, pi]` (including NaN).
pub fn check_cone_angle(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if (0.0..=PI).contains(&value) {
        Ok(value)
    } else {
        Err(GeometryError::AngleOutOfRange { name, value })
    }
}
