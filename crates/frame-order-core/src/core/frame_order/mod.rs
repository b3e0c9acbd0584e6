//! Compilation of the second-degree frame order matrix `<R (x) R>`.
//!
//! ## Overview
//!
//! Every motional domain is first compiled in its own eigenframe, where the cone or torsion axes
//! coincide with the coordinate axes, and then rotated into the reference frame by conjugation
//! with `R_eigen (x) R_eigen`.
//!
//! - **Rotor** ([`rotor`]) - Uniform torsion about an axis, in closed form
//! - **Isotropic Cone** ([`iso_cone`]) - Closed forms in the cone and torsion half-angles
//! - **Pseudo-Ellipse** ([`pseudo_ellipse`]) - One azimuthal quadrature per independent element
//! - **Line** ([`line`]) - The product of a uniform tilt and a uniform torsion

pub mod iso_cone;
pub mod line;
pub mod pseudo_ellipse;
pub mod rotor;

pub use iso_cone::compile_iso_cone;
pub use line::{compile_line, compile_line_torsionless};
pub use pseudo_ellipse::{compile_pseudo_ellipse, compile_pseudo_ellipse_torsionless};
pub use rotor::{compile_axial, compile_rotor};

use crate::core::algebra::{Matrix9, kron, rotate_frame_order};
use crate::core::models::{ModelGeometry, MotionDomain};
use crate::core::numerics::QuadratureSettings;
use std::fmt;
use std::io::{self, Write};

/// Entries with a smaller magnitude are printed as exact zeros.
const PRINT_ZERO_THRESHOLD: f64 = 1e-10;

/// Compiles the frame order matrix of `domain` in its eigenframe.
pub fn compile_eigenframe(domain: &MotionDomain, settings: &QuadratureSettings) -> Matrix9 {
    match *domain {
        MotionDomain::Rigid => Matrix9::identity(),
        MotionDomain::Rotor { sigma_max } => compile_rotor(sigma_max),
        MotionDomain::IsoCone {
            theta_max,
            sigma_max,
        } => compile_iso_cone(theta_max, sigma_max),
        MotionDomain::IsoConeTorsionless { theta_max } => compile_iso_cone(theta_max, 0.0),
        MotionDomain::PseudoEllipse {
            theta_x,
            theta_y,
            sigma_max,
        } => compile_pseudo_ellipse(theta_x, theta_y, sigma_max, settings),
        MotionDomain::PseudoEllipseTorsionless { theta_x, theta_y } => {
            compile_pseudo_ellipse_torsionless(theta_x, theta_y, settings)
        }
        MotionDomain::Line {
            theta_max,
            sigma_max,
        } => compile_line(theta_max, sigma_max),
        MotionDomain::LineTorsionless { theta_max } => compile_line_torsionless(theta_max),
    }
}

/// Compiles the frame order matrix of `geometry` and rotates it into the reference frame.
pub fn compile(geometry: &ModelGeometry, settings: &QuadratureSettings) -> Matrix9 {
    let daeg = compile_eigenframe(&geometry.domain, settings);
    let r = &geometry.eigenframe;
    rotate_frame_order(&daeg, &kron(r, r))
}

/// Displays a 9x9 matrix as a bracketed grid with four decimal places.
#[derive(Debug, Clone, Copy)]
pub struct FrameOrderGrid<'a>(pub &'a Matrix9);

impl fmt::Display for FrameOrderGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..9 {
            let open = if i == 0 { "[[" } else { " [" };
            f.write_str(open)?;
            for j in 0..9 {
                let mut value = self.0[(i, j)];
                if value.abs() < PRINT_ZERO_THRESHOLD {
                    value = 0.0;
                }
                let separator = if j == 8 { "" } else { ", " };
                write!(f, "{value:7.4}{separator}")?;
            }
            let close = if i == 8 { "]]" } else { "]," };
            writeln!(f, "{close}")?;
        }
        Ok(())
    }
}

/// Writes the 9x9 matrix as a bracketed grid with four decimal places.
pub fn print_frame_order_matrix<W: Write>(matrix: &Matrix9, out: &mut W) -> io::Result<()> {
    write!(out, "{}", FrameOrderGrid(matrix))
}

/// [`print_frame_order_matrix`] into a `String`.
pub fn format_frame_order_matrix(matrix: &Matrix9) -> String {
    FrameOrderGrid(matrix).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algebra::euler_to_rotation;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn rigid_domain_compiles_to_identity() {
        let m = compile_eigenframe(&MotionDomain::Rigid, &QuadratureSettings::default());
        assert_eq!(m, Matrix9::identity());
    }

    #[test]
    fn torsionless_cone_dispatches_to_zero_torsion_closed_form() {
        let settings = QuadratureSettings::default();
        let m = compile_eigenframe(
            &MotionDomain::IsoConeTorsionless { theta_max: 0.6 },
            &settings,
        );
        assert_eq!(m, compile_iso_cone(0.6, 0.0));
    }

    #[test]
    fn rotated_matrix_returns_to_eigenframe_under_inverse_rotation() {
        let domain = MotionDomain::IsoCone {
            theta_max: 0.9,
            sigma_max: 1.4,
        };
        let eigenframe = euler_to_rotation(0.4, 1.3, -2.2).into_inner();
        let geometry = ModelGeometry {
            eigenframe,
            ..ModelGeometry::in_eigenframe(domain)
        };
        let settings = QuadratureSettings::default();
        let lab = compile(&geometry, &settings);
        let inverse = eigenframe.transpose();
        let back = rotate_frame_order(&lab, &kron(&inverse, &inverse));
        let expected = compile_eigenframe(&domain, &settings);
        for i in 0..9 {
            for j in 0..9 {
                assert!((back[(i, j)] - expected[(i, j)]).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn printer_writes_bracketed_grid() {
        let text = format_frame_order_matrix(&Matrix9::identity());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("[[ 1.0000,  0.0000"));
        assert!(lines[4].starts_with(" [ 0.0000,  0.0000,  0.0000,  0.0000,  1.0000"));
        assert!(lines[8].ends_with(" 1.0000]]"));
    }

    #[test]
    fn writer_and_string_printers_agree() {
        let r = euler_to_rotation(0.3, 1.2, -0.5).into_inner();
        let m = kron(&r, &r);
        let mut buffer = Vec::new();
        print_frame_order_matrix(&m, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), format_frame_order_matrix(&m));
        assert_eq!(FrameOrderGrid(&m).to_string(), format_frame_order_matrix(&m));
    }

    #[test]
    fn printer_clamps_rounding_noise_to_zero() {
        let mut m = Matrix9::zeros();
        m[(0, 0)] = -1e-14;
        m[(0, 1)] = -0.25;
        let text = format_frame_order_matrix(&m);
        assert!(text.starts_with("[[ 0.0000, -0.2500"));
    }
}
