use crate::core::algebra::{Matrix9, kron};
use nalgebra::{Matrix3, Vector3};

/// `sin(x) / x`, continuous at zero.
#[inline]
pub(crate) fn sinc(x: f64) -> f64 {
    if x == 0.0 { 1.0 } else { x.sin() / x }
}

/// The frame order matrix of a rotor, uniform torsion about z within `[-sigma_max, sigma_max]`.
pub fn compile_rotor(sigma_max: f64) -> Matrix9 {
    let sinc_sigma = sinc(sigma_max);
    let sinc_2sigma = sinc(2.0 * sigma_max);
    let in_plane = 0.5 * (sinc_2sigma + 1.0);
    let cross = 0.5 * (1.0 - sinc_2sigma);

    let mut matrix = Matrix9::zeros();
    for i in [0, 1, 3, 4] {
        matrix[(i, i)] = in_plane;
    }
    for i in [2, 5, 6, 7] {
        matrix[(i, i)] = sinc_sigma;
    }
    matrix[(8, 8)] = 1.0;

    matrix[(0, 4)] = cross;
    matrix[(4, 0)] = cross;
    matrix[(1, 3)] = -cross;
    matrix[(3, 1)] = -cross;

    matrix
}

/// The frame order matrix of a uniform rotation about the unit `axis` within
/// `[-half_width, half_width]`.
///
/// With `P = a a^T`, `Q = I - P` and `S` the cross-product matrix of `a`, Rodrigues' formula gives
/// `R(t) = P + cos(t) Q + sin(t) S`. Averaging `R (x) R` over `t` leaves
/// `P(x)P + sinc(w) (P(x)Q + Q(x)P) + (1 + sinc(2w))/2 Q(x)Q + (1 - sinc(2w))/2 S(x)S`.
pub fn compile_axial(axis: &Vector3<f64>, half_width: f64) -> Matrix9 {
    let p = axis * axis.transpose();
    let q = Matrix3::identity() - p;
    let s = axis.cross_matrix();

    let sinc_w = sinc(half_width);
    let sinc_2w = sinc(2.0 * half_width);

    kron(&p, &p)
        + (kron(&p, &q) + kron(&q, &p)) * sinc_w
        + kron(&q, &q) * (0.5 * (1.0 + sinc_2w))
        + kron(&s, &s) * (0.5 * (1.0 - sinc_2w))
}
