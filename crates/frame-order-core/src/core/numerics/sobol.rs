use thiserror::Error;

const BITS: usize = 32;
const SCALE: f64 = 1.0 / 4_294_967_296.0;

/// Primitive polynomial degree `s`, coefficient bits `a`, and initial direction integers `m`
/// for dimensions 2 onwards (Joe and Kuo, new-joe-kuo-6.21201).
const JOE_KUO: [(usize, u32, &[u32]); 5] = [
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
];

/// The number of dimensions the built-in direction table supports.
pub const MAX_DIMENSIONS: usize = JOE_KUO.len() + 1;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SobolError {
    #[error("Sobol' sequences support 1 to {max} dimensions, requested {requested}")]
    UnsupportedDimension { requested: usize, max: usize },
}

fn direction_numbers(dimension: usize) -> [u32; BITS] {
    let mut v = [0u32; BITS];
    if dimension == 0 {
        for (k, slot) in v.iter_mut().enumerate() {
            *slot = 1 << (BITS - 1 - k);
        }
        return v;
    }

    let (s, a, m) = JOE_KUO[dimension - 1];
    for k in 0..s.min(BITS) {
        v[k] = m[k] << (BITS - 1 - k);
    }
    for k in s..BITS {
        let mut next = v[k - s] ^ (v[k - s] >> s);
        for j in 1..s {
            if (a >> (s - 1 - j)) & 1 == 1 {
                next ^= v[k - j];
            }
        }
        v[k] = next;
    }
    v
}

/// A gray-code ordered Sobol' generator over the unit hypercube.
///
/// The first point is the origin. Each subsequent point flips a single direction number per
/// dimension, so generation costs one XOR per coordinate.
#[derive(Debug, Clone)]
pub struct SobolSequence {
    directions: Vec<[u32; BITS]>,
    state: Vec<u32>,
    index: u32,
    exhausted: bool,
}

impl SobolSequence {
    pub fn new(dimensions: usize) -> Result<Self, SobolError> {
        if dimensions == 0 || dimensions > MAX_DIMENSIONS {
            return Err(SobolError::UnsupportedDimension {
                requested: dimensions,
                max: MAX_DIMENSIONS,
            });
        }
        Ok(Self {
            directions: (0..dimensions).map(direction_numbers).collect(),
            state: vec![0; dimensions],
            index: 0,
            exhausted: false,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.state.len()
    }

    /// Collects the first `count` points of a fresh sequence.
    pub fn points(count: usize, dimensions: usize) -> Result<Vec<Vec<f64>>, SobolError> {
        Ok(Self::new(dimensions)?.take(count).collect())
    }
}

impl Iterator for SobolSequence {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let point = self.state.iter().map(|&x| x as f64 * SCALE).collect();

        let bit = self.index.trailing_ones() as usize;
        if bit >= BITS {
            self.exhausted = true;
        } else {
            for (x, v) in self.state.iter_mut().zip(&self.directions) {
                *x ^= v[bit];
            }
            self.index = self.index.wrapping_add(1);
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_points_match_reference_values() {
        let expected = [
            [0.0, 0.0, 0.0],
            [0.5, 0.5, 0.5],
            [0.75, 0.25, 0.25],
            [0.25, 0.75, 0.75],
            [0.375, 0.375, 0.625],
            [0.875, 0.875, 0.125],
            [0.625, 0.125, 0.875],
            [0.125, 0.625, 0.375],
        ];
        let points = SobolSequence::points(expected.len(), 3).unwrap();
        for (point, reference) in points.iter().zip(expected.iter()) {
            assert_eq!(point.as_slice(), reference.as_slice());
        }
    }

    #[test]
    fn points_stay_inside_unit_cube() {
        let points = SobolSequence::points(1000, MAX_DIMENSIONS).unwrap();
        assert_eq!(points.len(), 1000);
        for point in &points {
            assert_eq!(point.len(), MAX_DIMENSIONS);
            assert!(point.iter().all(|&x| (0.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn points_are_distinct() {
        let points = SobolSequence::points(256, 2).unwrap();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn one_dimensional_sequence_is_van_der_corput_permutation() {
        let mut values: Vec<f64> = SobolSequence::points(16, 1)
            .unwrap()
            .into_iter()
            .map(|p| p[0])
            .collect();
        values.sort_by(f64::total_cmp);
        for (i, v) in values.iter().enumerate() {
            assert_eq!(*v, i as f64 / 16.0);
        }
    }

    #[test]
    fn sample_mean_converges_quickly() {
        let n = 1024;
        let mean: f64 = SobolSequence::points(n, 2)
            .unwrap()
            .iter()
            .map(|p| p[0] * p[1])
            .sum::<f64>()
            / n as f64;
        assert!((mean - 0.25).abs() < 5e-3);
    }

    #[test]
    fn rejects_unsupported_dimensions() {
        assert!(SobolSequence::new(0).is_err());
        assert_eq!(
            SobolSequence::new(MAX_DIMENSIONS + 1).unwrap_err(),
            SobolError::UnsupportedDimension {
                requested: MAX_DIMENSIONS + 1,
                max: MAX_DIMENSIONS,
            }
        );
    }
}
