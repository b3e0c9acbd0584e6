//! Geometry of the cone-shaped motional domains.
//!
//! The pseudo-elliptic cone is described by two half-opening angles, `theta_x` and `theta_y`,
//! about the eigenframe x and y axes. The isotropic cone is the special case of equal angles.

mod cone;
mod pseudo_ellipse;

pub use cone::{check_order_parameter, iso_cone_s_to_theta, iso_cone_theta_to_s};
pub use pseudo_ellipse::{check_cone_angle, pec, theta_max};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Cone angle '{name}' = {value} lies outside [0, pi]")]
    AngleOutOfRange { name: &'static str, value: f64 },
    #[error("Cone order parameter '{name}' = {value} lies outside [-0.125, 1]")]
    OrderParameterOutOfRange { name: &'static str, value: f64 },
}
