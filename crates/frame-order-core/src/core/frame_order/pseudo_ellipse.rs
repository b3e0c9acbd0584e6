use super::rotor::{compile_rotor, sinc};
use crate::core::algebra::Matrix9;
use crate::core::geometry::{pec, theta_max};
use crate::core::numerics::{QuadratureSettings, integrate};
use std::f64::consts::PI;

/// Per-azimuth quantities shared by every integrand.
#[derive(Debug, Clone, Copy)]
struct Azimuth {
    ct: f64,
    st2: f64,
    cp2: f64,
    sp2: f64,
}

impl Azimuth {
    #[inline]
    fn at(phi: f64, theta_x: f64, theta_y: f64) -> Self {
        let t = theta_max(phi, theta_x, theta_y);
        let ct = t.cos();
        let cp = phi.cos();
        let sp = phi.sin();
        Self {
            ct,
            st2: 1.0 - ct * ct,
            cp2: cp * cp,
            sp2: sp * sp,
        }
    }
}

/// Integrates one azimuthal integrand over `[-pi, pi]`.
fn azimuthal<F>(theta_x: f64, theta_y: f64, settings: &QuadratureSettings, integrand: F) -> f64
where
    F: Fn(&Azimuth) -> f64,
{
    integrate(
        |phi| integrand(&Azimuth::at(phi, theta_x, theta_y)),
        -PI,
        PI,
        settings,
    )
    .value
}

/// The frame order matrix of a pseudo-elliptic cone with torsion.
///
/// The polar and torsional integrals are done analytically, leaving one azimuthal quadrature
/// per independent element. A cone with no area degenerates to a rotor.
pub fn compile_pseudo_ellipse(
    theta_x: f64,
    theta_y: f64,
    sigma_max: f64,
    settings: &QuadratureSettings,
) -> Matrix9 {
    let area = pec(theta_x, theta_y);
    if area == 0.0 {
        return compile_rotor(sigma_max);
    }

    let fact = 1.0 / (12.0 * area);
    let s1 = sinc(sigma_max);
    let s2 = sinc(2.0 * sigma_max);
    let int = |f: &dyn Fn(&Azimuth) -> f64| azimuthal(theta_x, theta_y, settings, f);

    let int00 = int(&|a| {
        s2 * (2.0 * a.st2 * a.cp2 * ((2.0 * a.cp2 - 1.0) * a.ct - 6.0 * (a.cp2 - 1.0))
            - 2.0 * a.ct * (2.0 * a.cp2 * (4.0 * a.cp2 - 5.0) + 3.0))
            + 2.0 * a.cp2 * a.ct * (a.st2 + 2.0)
            - 6.0 * a.ct
    });
    let int04 = int(&|a| {
        s2 * (2.0 * a.st2 * a.cp2 * ((2.0 * a.sp2 - 1.0) * a.ct - 6.0 * a.sp2)
            + 2.0 * a.ct * (2.0 * a.cp2 * (4.0 * a.cp2 - 5.0) + 3.0))
            + 2.0 * a.cp2 * a.ct * (a.st2 + 2.0)
            - 6.0 * a.ct
    });
    let int08 = int(&|a| a.ct * a.cp2 * (a.st2 + 2.0));
    let int11 = int(&|a| {
        s2 * ((4.0 * a.cp2 * ((1.0 - a.cp2) * a.ct + 3.0 * (a.cp2 - 1.0)) + 3.0) * a.st2
            - 16.0 * a.cp2 * a.sp2 * a.ct)
            + 3.0 * a.st2
    });
    let int13 = int(&|a| {
        let cs = a.cp2 * a.sp2;
        s2 * (a.st2 * (4.0 * cs * a.ct - 12.0 * cs + 3.0) - 16.0 * cs * a.ct) - 3.0 * a.st2
    });
    let int22 = int(&|a| {
        let ct2 = a.ct * a.ct;
        2.0 * a.cp2 * ct2 * a.ct + 3.0 * (1.0 - a.cp2) * ct2
    });
    let int26 = int(&|a| a.cp2 * (a.ct * a.ct * a.ct - 3.0 * a.ct));
    let int40 = int(&|a| {
        s2 * (2.0 * a.st2 * a.sp2 * ((2.0 * a.cp2 - 1.0) * a.ct - 6.0 * a.cp2)
            + 2.0 * a.ct * (2.0 * a.sp2 * (4.0 * a.sp2 - 5.0) + 3.0))
            + 2.0 * a.sp2 * a.ct * (a.st2 + 2.0)
            - 6.0 * a.ct
    });
    let int44 = int(&|a| {
        s2 * (2.0 * a.st2 * a.sp2 * ((2.0 * a.sp2 - 1.0) * a.ct + 6.0 * a.cp2)
            - 2.0 * a.ct * (2.0 * a.sp2 * (4.0 * a.sp2 - 5.0) + 3.0))
            + 2.0 * a.sp2 * a.ct * (a.st2 + 2.0)
            - 6.0 * a.ct
    });
    let int48 = int(&|a| a.ct * a.sp2 * (a.st2 + 2.0));
    let int55 = int(&|a| {
        let ct2 = a.ct * a.ct;
        2.0 * a.sp2 * ct2 * a.ct + 3.0 * (1.0 - a.sp2) * ct2
    });
    let int57 = int(&|a| a.sp2 * (a.ct * a.ct * a.ct - 3.0 * a.ct));
    let int80 = int(&|a| {
        s2 * (2.0 * (1.0 - 2.0 * a.cp2) * a.ct * (a.st2 + 2.0)) + 2.0 * a.ct * a.ct * a.ct
            - 6.0 * a.ct
    });
    let int84 = int(&|a| {
        s2 * (2.0 * (1.0 - 2.0 * a.cp2) * a.ct * (a.st2 + 2.0)) - 2.0 * a.ct * a.ct * a.ct
            + 6.0 * a.ct
    });
    let int88 = int(&|a| a.ct * a.ct * a.ct);

    let mut matrix = Matrix9::zeros();

    matrix[(0, 0)] = fact * (4.0 * PI * (s2 + 2.0) + int00);
    matrix[(1, 1)] = fact * (4.0 * PI * s2 + int11);
    matrix[(3, 3)] = matrix[(1, 1)];
    matrix[(2, 2)] = fact * 2.0 * s1 * (5.0 * PI - int22);
    matrix[(6, 6)] = matrix[(2, 2)];
    matrix[(4, 4)] = fact * (4.0 * PI * (s2 + 2.0) + int44);
    matrix[(5, 5)] = fact * 2.0 * s1 * (5.0 * PI - int55);
    matrix[(7, 7)] = matrix[(5, 5)];
    matrix[(8, 8)] = 4.0 * fact * (2.0 * PI - int88);

    matrix[(0, 4)] = fact * (4.0 * PI * (2.0 - s2) + int04);
    matrix[(4, 0)] = fact * (4.0 * PI * (2.0 - s2) + int40);
    matrix[(0, 8)] = 4.0 * fact * (2.0 * PI - int08);
    matrix[(8, 0)] = fact * (8.0 * PI + int80);
    matrix[(4, 8)] = 4.0 * fact * (2.0 * PI - int48);
    matrix[(8, 4)] = fact * (8.0 * PI - int84);

    matrix[(1, 3)] = fact * (4.0 * PI * s2 + int13);
    matrix[(3, 1)] = matrix[(1, 3)];

    matrix[(2, 6)] = -fact * 4.0 * s1 * (2.0 * PI + int26);
    matrix[(6, 2)] = matrix[(2, 6)];
    matrix[(5, 7)] = -fact * 4.0 * s1 * (2.0 * PI + int57);
    matrix[(7, 5)] = matrix[(5, 7)];

    matrix
}

/// The frame order matrix of a pseudo-elliptic cone without torsion.
pub fn compile_pseudo_ellipse_torsionless(
    theta_x: f64,
    theta_y: f64,
    settings: &QuadratureSettings,
) -> Matrix9 {
    let area = pec(theta_x, theta_y);
    if area == 0.0 {
        return Matrix9::identity();
    }

    let fact = 1.0 / (6.0 * area);
    let int = |f: &dyn Fn(&Azimuth) -> f64| azimuthal(theta_x, theta_y, settings, f);

    let int00 = int(&|a| {
        let (c2, s2) = (a.cp2, a.sp2);
        (2.0 * c2 * c2 * a.ct + 6.0 * c2 * s2) * a.st2 - (6.0 * s2 * s2 + 2.0 * c2 * c2) * a.ct
    });
    let int04 = int(&|a| {
        let cs = a.cp2 * a.sp2;
        (2.0 * cs * a.ct - 6.0 * cs) * a.st2 - 8.0 * cs * a.ct
    });
    let int08 = int(&|a| 2.0 * a.cp2 * a.ct * a.ct * a.ct - 6.0 * a.cp2 * a.ct);
    let int11 = int(&|a| {
        let (c2, s2) = (a.cp2, a.sp2);
        (2.0 * c2 * s2 * a.ct + 3.0 * s2 * s2 + 3.0 * c2 * c2) * a.st2 - 8.0 * c2 * s2 * a.ct
    });
    let int22 = int(&|a| {
        let ct2 = a.ct * a.ct;
        (2.0 * a.sp2 - 2.0) * ct2 * a.ct - 3.0 * a.sp2 * ct2
    });
    let int44 = int(&|a| {
        let (c2, s2) = (a.cp2, a.sp2);
        (2.0 * s2 * s2 * a.ct + 6.0 * c2 * s2) * a.st2 - (2.0 * s2 * s2 + 6.0 * c2 * c2) * a.ct
    });
    let int48 = int(&|a| 2.0 * a.sp2 * a.ct * a.ct * a.ct - 6.0 * a.sp2 * a.ct);
    let int55 = int(&|a| {
        let ct2 = a.ct * a.ct;
        (2.0 * a.cp2 - 2.0) * ct2 * a.ct - 3.0 * a.cp2 * ct2
    });
    let int88 = int(&|a| 2.0 - 2.0 * a.ct * a.ct * a.ct);

    let mut matrix = Matrix9::zeros();

    matrix[(0, 0)] = fact * (6.0 * PI + int00);
    matrix[(1, 1)] = fact * (2.0 * PI + int11);
    matrix[(3, 3)] = matrix[(1, 1)];
    matrix[(2, 2)] = fact * (5.0 * PI + int22);
    matrix[(6, 6)] = matrix[(2, 2)];
    matrix[(4, 4)] = fact * (6.0 * PI + int44);
    matrix[(5, 5)] = fact * (5.0 * PI + int55);
    matrix[(7, 7)] = matrix[(5, 5)];
    matrix[(8, 8)] = fact * int88;

    let xy = fact * (2.0 * PI + int04);
    let xz = fact * (4.0 * PI + int08);
    let yz = fact * (4.0 * PI + int48);

    matrix[(0, 4)] = xy;
    matrix[(4, 0)] = xy;
    matrix[(1, 3)] = xy;
    matrix[(3, 1)] = xy;

    matrix[(0, 8)] = xz;
    matrix[(8, 0)] = xz;
    matrix[(2, 6)] = -xz;
    matrix[(6, 2)] = -xz;

    matrix[(4, 8)] = yz;
    matrix[(8, 4)] = yz;
    matrix[(5, 7)] = -yz;
    matrix[(7, 5)] = -yz;

    matrix
}
