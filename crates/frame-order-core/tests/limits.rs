use frameorder::core::algebra::{Matrix9, euler_to_rotation, kron, rotate_frame_order};
use frameorder::core::frame_order::{compile, compile_eigenframe};
use frameorder::core::geometry::{iso_cone_theta_to_s, pec};
use frameorder::core::models::{ModelGeometry, MotionDomain, MotionModel, ParamLayout};
use frameorder::core::numerics::QuadratureSettings;
use frameorder::core::tensor::{AlignmentTensor, reduce_alignment_tensor};
use std::f64::consts::{FRAC_PI_2, PI};

const TOLERANCE: f64 = 1e-6;

fn max_difference(a: &Matrix9, b: &Matrix9) -> f64 {
    (a - b).abs().max()
}

fn disorder() -> Matrix9 {
    let mut m = Matrix9::zeros();
    for i in [0, 4, 8] {
        for j in [0, 4, 8] {
            m[(i, j)] = 1.0 / 3.0;
        }
    }
    m
}

fn eigenframe_matrix(domain: MotionDomain) -> Matrix9 {
    compile_eigenframe(&domain, &QuadratureSettings::default())
}

#[test]
fn zero_opening_angles_give_identity_for_every_bounded_model() {
    let settings = QuadratureSettings::default();
    for model in MotionModel::ALL {
        if matches!(
            model,
            MotionModel::FreeRotor
                | MotionModel::IsoConeFreeRotor
                | MotionModel::PseudoEllipseFreeRotor
                | MotionModel::LineFreeRotor
        ) {
            continue;
        }
        let layout = ParamLayout::new(model, false, false);
        let values = layout.unpack(&vec![0.0; layout.len()]).unwrap();
        let geometry = ModelGeometry::from_params(model, &values).unwrap();
        let daeg = compile(&geometry, &settings);
        assert!(
            max_difference(&daeg, &Matrix9::identity()) < 1e-12,
            "{model} is not the identity at zero opening"
        );
    }
}

#[test]
fn full_sphere_with_free_torsion_gives_disorder() {
    let domains = [
        MotionDomain::IsoCone {
            theta_max: PI,
            sigma_max: PI,
        },
        MotionDomain::PseudoEllipse {
            theta_x: PI,
            theta_y: PI,
            sigma_max: PI,
        },
    ];
    for domain in domains {
        let daeg = eigenframe_matrix(domain);
        assert!(max_difference(&daeg, &disorder()) < TOLERANCE, "{domain:?}");

        let r = euler_to_rotation(0.4, 1.9, -2.2).into_inner();
        let geometry = ModelGeometry {
            ave_pos: r,
            eigenframe: r,
            domain,
        };
        let rotated = compile(&geometry, &QuadratureSettings::default());
        assert!(max_difference(&rotated, &disorder()) < TOLERANCE, "{domain:?}");
    }
}

#[test]
fn half_cone_iso_and_pseudo_ellipse_agree() {
    let iso = eigenframe_matrix(MotionDomain::IsoCone {
        theta_max: FRAC_PI_2,
        sigma_max: PI,
    });
    let ellipse = eigenframe_matrix(MotionDomain::PseudoEllipse {
        theta_x: FRAC_PI_2,
        theta_y: FRAC_PI_2,
        sigma_max: PI,
    });
    assert!(max_difference(&iso, &ellipse) < TOLERANCE);
}

#[test]
fn circular_pseudo_ellipse_reduces_to_iso_cone_for_every_torsion_variant() {
    for &(theta, sigma) in &[(0.3, 0.2), (0.9, 1.4), (2.0, PI), (1.2, 0.0)] {
        let iso = eigenframe_matrix(MotionDomain::IsoCone {
            theta_max: theta,
            sigma_max: sigma,
        });
        let ellipse = eigenframe_matrix(MotionDomain::PseudoEllipse {
            theta_x: theta,
            theta_y: theta,
            sigma_max: sigma,
        });
        assert!(
            max_difference(&iso, &ellipse) < TOLERANCE,
            "theta = {theta}, sigma = {sigma}"
        );
    }

    for theta in [0.3, 1.1, 2.5] {
        let iso = eigenframe_matrix(MotionDomain::IsoConeTorsionless { theta_max: theta });
        let ellipse = eigenframe_matrix(MotionDomain::PseudoEllipseTorsionless {
            theta_x: theta,
            theta_y: theta,
        });
        assert!(max_difference(&iso, &ellipse) < TOLERANCE, "theta = {theta}");
    }
}

#[test]
fn eigenframe_rotation_round_trips() {
    let settings = QuadratureSettings::default();
    let r = euler_to_rotation(1.3, 0.7, -0.4).into_inner();
    let domains = [
        MotionDomain::Rotor { sigma_max: 0.8 },
        MotionDomain::IsoCone {
            theta_max: 0.6,
            sigma_max: 1.1,
        },
        MotionDomain::PseudoEllipseTorsionless {
            theta_x: 0.4,
            theta_y: 1.2,
        },
        MotionDomain::Line {
            theta_max: 0.5,
            sigma_max: 0.9,
        },
    ];
    for domain in domains {
        let geometry = ModelGeometry {
            ave_pos: nalgebra::Matrix3::identity(),
            eigenframe: r,
            domain,
        };
        let lab = compile(&geometry, &settings);
        let rt = r.transpose();
        let back = rotate_frame_order(&lab, &kron(&rt, &rt));
        let reference = compile_eigenframe(&domain, &settings);
        assert!(max_difference(&back, &reference) < 1e-12, "{domain:?}");
    }
}

#[test]
fn pec_boundary_values() {
    assert_eq!(pec(0.0, 1.0), 0.0);
    assert_eq!(pec(1.0, 0.0), 0.0);
    assert!((pec(PI, PI) - 4.0 * PI).abs() < 1e-9);
    assert!((pec(FRAC_PI_2, FRAC_PI_2) - 2.0 * PI).abs() < 1e-9);
}

#[test]
fn half_cone_pseudo_ellipse_reduces_tensor_magnitude() {
    let daeg = eigenframe_matrix(MotionDomain::PseudoEllipse {
        theta_x: FRAC_PI_2,
        theta_y: FRAC_PI_2,
        sigma_max: PI,
    });
    assert!((daeg[(0, 0)] - 1.0 / 3.0).abs() < 1e-4);

    let full = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
    let reduced = reduce_alignment_tensor(&daeg, &full);
    assert!(reduced.norm() < full.norm());

    let rigid = reduce_alignment_tensor(&Matrix9::identity(), &full);
    assert!((rigid.norm() - full.norm()).abs() < 1e-12);
}

#[test]
fn iso_cone_free_rotor_order_parameter_matches_cone_angle() {
    let settings = QuadratureSettings::default();
    let compile_model = |model: MotionModel, params: &[f64]| {
        let layout = ParamLayout::new(model, false, false);
        let values = layout.unpack(params).unwrap();
        compile(&ModelGeometry::from_params(model, &values).unwrap(), &settings)
    };

    for theta in [0.4, 1.0, 1.9] {
        let s1 = iso_cone_theta_to_s(theta);
        let free_rotor = compile_model(MotionModel::IsoConeFreeRotor, &[0.3, -0.6, 0.9, 1.4, s1]);
        let iso_cone = compile_model(MotionModel::IsoCone, &[0.0, 0.3, -0.6, 0.9, 1.4, theta, PI]);
        assert!(
            max_difference(&free_rotor, &iso_cone) < 1e-10,
            "theta = {theta}, s1 = {s1}"
        );
    }
}
