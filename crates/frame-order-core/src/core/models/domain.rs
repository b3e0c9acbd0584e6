use super::{MotionModel, ParamValues};
use crate::core::algebra::{euler_to_rotation, spherical_to_cartesian, two_vector_rotation};
use crate::core::geometry::{
    GeometryError, check_cone_angle, check_order_parameter, iso_cone_s_to_theta,
};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// The extent of the motion in the model's eigenframe.
///
/// Free-rotor models map onto their torsion counterparts with `sigma_max = pi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionDomain {
    Rigid,
    Rotor {
        sigma_max: f64,
    },
    IsoCone {
        theta_max: f64,
        sigma_max: f64,
    },
    IsoConeTorsionless {
        theta_max: f64,
    },
    PseudoEllipse {
        theta_x: f64,
        theta_y: f64,
        sigma_max: f64,
    },
    PseudoEllipseTorsionless {
        theta_x: f64,
        theta_y: f64,
    },
    /// Tilt about the eigenframe y axis within `[-theta_max, theta_max]`, combined with torsion.
    Line {
        theta_max: f64,
        sigma_max: f64,
    },
    LineTorsionless {
        theta_max: f64,
    },
}

impl MotionDomain {
    /// Builds the domain of `model` from unpacked parameter values.
    ///
    /// Cone and torsion half-angles must lie in `[0, pi]` and the iso cone order parameter in
    /// `[-1/8, 1]`. Values outside these ranges describe no physical cone and are rejected.
    pub fn from_params(model: MotionModel, values: &ParamValues) -> Result<Self, GeometryError> {
        let theta = || check_cone_angle("cone_theta", values.cone_theta);
        let theta_x = || check_cone_angle("cone_theta_x", values.cone_theta_x);
        let theta_y = || check_cone_angle("cone_theta_y", values.cone_theta_y);
        let sigma = || check_cone_angle("cone_sigma_max", values.cone_sigma_max);

        let domain = match model {
            MotionModel::Rigid => Self::Rigid,
            MotionModel::Rotor => Self::Rotor { sigma_max: sigma()? },
            MotionModel::FreeRotor => Self::Rotor { sigma_max: PI },
            MotionModel::IsoCone => Self::IsoCone {
                theta_max: theta()?,
                sigma_max: sigma()?,
            },
            MotionModel::IsoConeTorsionless => Self::IsoConeTorsionless {
                theta_max: theta()?,
            },
            MotionModel::IsoConeFreeRotor => Self::IsoCone {
                theta_max: iso_cone_s_to_theta(check_order_parameter("cone_s1", values.cone_s1)?),
                sigma_max: PI,
            },
            MotionModel::PseudoEllipse => Self::PseudoEllipse {
                theta_x: theta_x()?,
                theta_y: theta_y()?,
                sigma_max: sigma()?,
            },
            MotionModel::PseudoEllipseTorsionless => Self::PseudoEllipseTorsionless {
                theta_x: theta_x()?,
                theta_y: theta_y()?,
            },
            MotionModel::PseudoEllipseFreeRotor => Self::PseudoEllipse {
                theta_x: theta_x()?,
                theta_y: theta_y()?,
                sigma_max: PI,
            },
            MotionModel::Line => Self::Line {
                theta_max: theta()?,
                sigma_max: sigma()?,
            },
            MotionModel::LineTorsionless => Self::LineTorsionless {
                theta_max: theta()?,
            },
            MotionModel::LineFreeRotor => Self::Line {
                theta_max: theta()?,
                sigma_max: PI,
            },
        };
        Ok(domain)
    }
}

/// Everything the matrix compiler and PCS integrators need from one parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelGeometry {
    /// Rotation of the moving domain into its average position.
    pub ave_pos: Matrix3<f64>,
    /// Rotation of the model's eigenframe into the reference frame.
    pub eigenframe: Matrix3<f64>,
    pub domain: MotionDomain,
}

impl ModelGeometry {
    pub fn from_params(model: MotionModel, values: &ParamValues) -> Result<Self, GeometryError> {
        let ave_pos = euler_to_rotation(
            values.ave_pos_alpha,
            values.ave_pos_beta,
            values.ave_pos_gamma,
        )
        .into_inner();

        let eigenframe = match model {
            MotionModel::Rigid => Matrix3::identity(),
            MotionModel::Rotor
            | MotionModel::FreeRotor
            | MotionModel::IsoCone
            | MotionModel::IsoConeTorsionless
            | MotionModel::IsoConeFreeRotor => {
                let axis = spherical_to_cartesian(1.0, values.axis_theta, values.axis_phi);
                two_vector_rotation(&Vector3::z(), &axis).into_inner()
            }
            MotionModel::PseudoEllipse
            | MotionModel::PseudoEllipseTorsionless
            | MotionModel::PseudoEllipseFreeRotor
            | MotionModel::Line
            | MotionModel::LineTorsionless
            | MotionModel::LineFreeRotor => {
                euler_to_rotation(values.eigen_alpha, values.eigen_beta, values.eigen_gamma)
                    .into_inner()
            }
        };

        Ok(Self {
            ave_pos,
            eigenframe,
            domain: MotionDomain::from_params(model, values)?,
        })
    }

    /// A geometry with identity rotations, for compiling matrices directly in the eigenframe.
    pub fn in_eigenframe(domain: MotionDomain) -> Self {
        Self {
            ave_pos: Matrix3::identity(),
            eigenframe: Matrix3::identity(),
            domain,
        }
    }
}
