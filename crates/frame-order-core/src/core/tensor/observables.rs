use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// Permeability of free space (T^2 m^3 J^-1).
pub const MU0: f64 = 4.0 * PI * 1e-7;
/// Boltzmann constant (J K^-1).
pub const KB: f64 = 1.380_650_424e-23;
/// Reduced Planck constant (J s).
pub const HBAR: f64 = 1.054_571_628e-34;

/// Gyromagnetic ratio of 1H (rad s^-1 T^-1).
pub const GAMMA_1H: f64 = 26.752_221_2e7;
/// Gyromagnetic ratio of 13C (rad s^-1 T^-1).
pub const GAMMA_13C: f64 = 6.728e7;
/// Gyromagnetic ratio of 15N (rad s^-1 T^-1).
pub const GAMMA_15N: f64 = -2.7126e7;

/// Back-calculates one RDC from a unit bond vector and the alignment tensor.
#[inline]
pub fn rdc(dipolar_constant: f64, unit_vector: &Vector3<f64>, tensor: &Matrix3<f64>) -> f64 {
    dipolar_constant * unit_vector.dot(&(tensor * unit_vector))
}

/// The PCS of one static state, `c * v^T A v / |v|^5`, for the lanthanide-to-atom vector `v`.
///
/// A vanishing vector contributes nothing rather than dividing by zero.
#[inline]
pub fn pcs(constant: f64, vector: &Vector3<f64>, tensor: &Matrix3<f64>) -> f64 {
    let length = vector.norm();
    if length == 0.0 {
        return 0.0;
    }
    constant * vector.dot(&(tensor * vector)) / length.powi(5)
}

/// The temperature and field dependent PCS prefactor, for distances in Angstrom.
///
/// `frequency` is the proton Larmor frequency in Hz. The result converts `v^T A v / |v|^5` into a
/// dimensionless shift (multiply by 1e6 for ppm).
pub fn pcs_constant(temperature: f64, frequency: f64) -> f64 {
    let field = 2.0 * PI * frequency / GAMMA_1H;
    MU0 * 15.0 * KB * temperature / (4.0 * PI * field * field) * 1e30
}

/// The dipolar constant in Hz for a pair of spins with gyromagnetic ratios `g1` and `g2`
/// separated by `distance` metres.
pub fn dipolar_constant(g1: f64, g2: f64, distance: f64) -> f64 {
    3.0 / (2.0 * PI) * (-MU0 / (4.0 * PI)) * g1 * g2 * HBAR / distance.powi(3)
}

/// The chi-squared statistic over the entries not flagged as missing.
pub fn chi2(values: &[f64], back_calculated: &[f64], errors: &[f64], missing: &[bool]) -> f64 {
    values
        .iter()
        .zip(back_calculated)
        .zip(errors)
        .zip(missing)
        .filter(|(_, missing)| !**missing)
        .map(|(((value, calc), error), _)| {
            let residual = (value - calc) / error;
            residual * residual
        })
        .sum()
}
