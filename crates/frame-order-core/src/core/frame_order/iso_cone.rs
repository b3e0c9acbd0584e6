use super::rotor::sinc;
use crate::core::algebra::Matrix9;

/// The frame order matrix of an isotropic cone with half-angle `theta_max` and torsion
/// `sigma_max`, in closed form.
///
/// The torsionless cone is `sigma_max = 0` and the free-rotor cone is `sigma_max = pi`.
pub fn compile_iso_cone(theta_max: f64, sigma_max: f64) -> Matrix9 {
    let c = theta_max.cos();
    let c2 = c * c;
    let sinc_sigma = sinc(sigma_max);
    let sinc_2sigma = sinc(2.0 * sigma_max);

    let fs = sinc_2sigma * (c2 + 4.0 * c + 7.0) / 24.0;
    let fc2 = (c2 + c + 4.0) / 12.0;
    let fc = (c + 1.0) / 4.0;

    let mut matrix = Matrix9::zeros();

    matrix[(0, 0)] = fs + fc2;
    matrix[(4, 4)] = fs + fc2;
    matrix[(1, 1)] = fs + fc;
    matrix[(3, 3)] = fs + fc;
    let tilt_torsion = sinc_sigma * (2.0 * c2 + 5.0 * c + 5.0) / 12.0;
    for i in [2, 5, 6, 7] {
        matrix[(i, i)] = tilt_torsion;
    }
    matrix[(8, 8)] = (c2 + c + 1.0) / 3.0;

    matrix[(0, 4)] = fc2 - fs;
    matrix[(4, 0)] = fc2 - fs;

    let zz = -(c2 + c - 2.0) / 6.0;
    for (i, j) in [(0, 8), (8, 0), (4, 8), (8, 4)] {
        matrix[(i, j)] = zz;
    }

    matrix[(1, 3)] = fs - fc;
    matrix[(3, 1)] = fs - fc;

    let xz = sinc_sigma * (c2 + c - 2.0) / 6.0;
    for (i, j) in [(2, 6), (6, 2), (5, 7), (7, 5)] {
        matrix[(i, j)] = xz;
    }

    matrix
}
