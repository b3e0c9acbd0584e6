use serde::Deserialize;

/// Hard upper bound on the number of subintervals held by the adaptive integrator.
pub const MAX_SUBDIVISIONS: usize = 128;

// 15-point Kronrod abscissae (positive half) and weights. Even entries are shared with the
// embedded 7-point Gauss rule.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Accuracy targets and the subdivision cap for [`integrate`].
///
/// The defaults mirror the classic QUADPACK driver settings and are meant to stay fixed for a
/// whole fit rather than be tuned per call.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuadratureSettings {
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            abs_tolerance: 1.49e-8,
            rel_tolerance: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    pub abs_error: f64,
    pub evaluations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

fn gauss_kronrod_15<F>(f: &mut F, lower: f64, upper: f64) -> Segment
where
    F: FnMut(f64) -> f64,
{
    let centre = 0.5 * (lower + upper);
    let half_length = 0.5 * (upper - lower);

    let f_centre = f(centre);
    let mut kronrod = f_centre * WGK[7];
    let mut gauss = f_centre * WG[3];

    for (j, (&x, &w)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
        let offset = half_length * x;
        let pair = f(centre - offset) + f(centre + offset);
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment {
        lower,
        upper,
        value: kronrod * half_length,
        error: ((kronrod - gauss) * half_length).abs(),
    }
}

/// Integrates `f` over `[lower, upper]` by globally adaptive bisection of the subinterval with
/// the largest error estimate.
///
/// Subintervals live in a fixed-size stack buffer, so nested calls allocate nothing on the heap.
/// When the subdivision cap is reached before the tolerance is met, the best estimate is
/// returned with `converged == false`.
pub fn integrate<F>(
    mut f: F,
    lower: f64,
    upper: f64,
    settings: &QuadratureSettings,
) -> QuadratureResult
where
    F: FnMut(f64) -> f64,
{
    if lower == upper {
        return QuadratureResult {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            converged: true,
        };
    }

    let limit = settings.max_subdivisions.clamp(1, MAX_SUBDIVISIONS);
    let mut segments = [Segment::default(); MAX_SUBDIVISIONS];
    segments[0] = gauss_kronrod_15(&mut f, lower, upper);
    let mut count = 1;
    let mut evaluations = 15;

    loop {
        let (value, abs_error) = segments[..count]
            .iter()
            .fold((0.0, 0.0), |(v, e), s| (v + s.value, e + s.error));
        let target = settings.abs_tolerance.max(settings.rel_tolerance * value.abs());

        if abs_error <= target || !abs_error.is_finite() || count >= limit {
            return QuadratureResult {
                value,
                abs_error,
                evaluations,
                converged: abs_error <= target,
            };
        }

        let worst = segments[..count]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
            .map(|(index, _)| index)
            .unwrap_or(0);

        let Segment { lower, upper, .. } = segments[worst];
        let midpoint = 0.5 * (lower + upper);
        if midpoint <= lower || midpoint >= upper {
            return QuadratureResult {
                value,
                abs_error,
                evaluations,
                converged: false,
            };
        }

        segments[worst] = gauss_kronrod_15(&mut f, lower, midpoint);
        segments[count] = gauss_kronrod_15(&mut f, midpoint, upper);
        count += 1;
        evaluations += 30;
    }
}
