//! Level-symmetric (LQn) angular quadrature.
//!
//! Ordinates of one octant are the index triples (i, j, k) with
//! i + j + k = n/2 + 2, mapped to direction cosines
//!
//!   μ_i² = μ_1² + (i − 1)·Δ,   Δ = 2(1 − 3μ_1²)/(n − 2)
//!
//! so μ_i² + μ_j² + μ_k² = 1 holds by construction. Point weights are shared
//! by every permutation of a triple (Lewis & Miller, Table 4-1) and scaled so
//! each octant sums to π: the tracked ξ > 0 hemisphere then integrates an
//! isotropic ψ to 4πψ, accounting for the mirrored ξ < 0 half in 2D.

use lattice_types::error::{LatticeError, LatticeResult};
use ndarray::Array1;
use std::f64::consts::PI;

/// Orders with tabulated point weights.
pub const SUPPORTED_ORDERS: [usize; 6] = [2, 4, 6, 8, 12, 16];

/// Weight sum of one octant.
pub const OCTANT_WEIGHT: f64 = PI;

/// First direction cosine and weight classes (sorted triple → point weight).
struct LevelTable {
    mu1: f64,
    weights: &'static [([usize; 3], f64)],
}

const S2: LevelTable = LevelTable {
    mu1: 0.577_350_269_189_625_8,
    weights: &[([1, 1, 1], 1.0)],
};

const S4: LevelTable = LevelTable {
    mu1: 0.350_021_2,
    weights: &[([1, 1, 2], 1.0 / 3.0)],
};

const S6: LevelTable = LevelTable {
    mu1: 0.266_635_5,
    weights: &[([1, 1, 3], 0.176_126_3), ([1, 2, 2], 0.157_207_1)],
};

const S8: LevelTable = LevelTable {
    mu1: 0.218_217_9,
    weights: &[
        ([1, 1, 4], 0.120_987_7),
        ([1, 2, 3], 0.090_740_7),
        ([2, 2, 2], 0.092_592_6),
    ],
};

const S12: LevelTable = LevelTable {
    mu1: 0.167_212_6,
    weights: &[
        ([1, 1, 6], 0.070_762_6),
        ([1, 2, 5], 0.055_881_1),
        ([1, 3, 4], 0.037_337_7),
        ([2, 2, 4], 0.050_281_9),
        ([2, 3, 3], 0.025_851_3),
    ],
};

const S16: LevelTable = LevelTable {
    mu1: 0.138_956_8,
    weights: &[
        ([1, 1, 8], 0.048_987_2),
        ([1, 2, 7], 0.041_329_6),
        ([1, 3, 6], 0.021_232_6),
        ([1, 4, 5], 0.025_620_7),
        ([2, 2, 6], 0.036_048_6),
        ([2, 3, 5], 0.014_458_9),
        ([2, 4, 4], 0.034_495_8),
        ([3, 3, 4], 0.008_517_9),
    ],
};

/// Direction cosines and weights for one octant, plus angle counts.
#[derive(Debug, Clone)]
pub struct QuadratureSet {
    pub order: usize,
    /// x direction cosine per angle.
    pub mu: Array1<f64>,
    /// y direction cosine per angle.
    pub eta: Array1<f64>,
    /// z direction cosine per angle (not swept in 2D).
    pub xi: Array1<f64>,
    pub weight: Array1<f64>,
    pub num_angles_per_octant: usize,
    /// Angles over the four tracked quadrants.
    pub num_angles: usize,
}

/// Source of angular quadrature sets, consumed once at mesh construction.
pub trait QuadratureProvider {
    fn quadrature(&self, order: usize) -> LatticeResult<QuadratureSet>;
}

/// Tabulated level-symmetric sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelSymmetric;

impl QuadratureProvider for LevelSymmetric {
    fn quadrature(&self, order: usize) -> LatticeResult<QuadratureSet> {
        level_symmetric(order)
    }
}

/// Build the LQn set of the given order.
pub fn level_symmetric(order: usize) -> LatticeResult<QuadratureSet> {
    let table = match order {
        2 => &S2,
        4 => &S4,
        6 => &S6,
        8 => &S8,
        12 => &S12,
        16 => &S16,
        _ => {
            return Err(LatticeError::UnsupportedOrder {
                order,
                supported: SUPPORTED_ORDERS.to_vec(),
            })
        }
    };

    let half = order / 2;
    let levels = level_cosines(table.mu1, order);

    let per_octant = order * (order + 2) / 8;
    let mut mu = Vec::with_capacity(per_octant);
    let mut eta = Vec::with_capacity(per_octant);
    let mut xi = Vec::with_capacity(per_octant);
    let mut weight = Vec::with_capacity(per_octant);

    for i in 1..=half {
        for j in 1..=(half + 1 - i) {
            let k = half + 2 - i - j;
            mu.push(levels[i - 1]);
            eta.push(levels[j - 1]);
            xi.push(levels[k - 1]);
            weight.push(class_weight(table, [i, j, k])?);
        }
    }

    // Renormalise: tabulated weights carry 7 digits.
    let total: f64 = weight.iter().sum();
    let scale = OCTANT_WEIGHT / total;
    for w in &mut weight {
        *w *= scale;
    }

    Ok(QuadratureSet {
        order,
        mu: Array1::from_vec(mu),
        eta: Array1::from_vec(eta),
        xi: Array1::from_vec(xi),
        weight: Array1::from_vec(weight),
        num_angles_per_octant: per_octant,
        num_angles: 4 * per_octant,
    })
}

fn level_cosines(mu1: f64, order: usize) -> Vec<f64> {
    let half = order / 2;
    if order <= 2 {
        return vec![mu1];
    }
    let mu1_sq = mu1 * mu1;
    let delta = 2.0 * (1.0 - 3.0 * mu1_sq) / (order - 2) as f64;
    (0..half)
        .map(|i| (mu1_sq + i as f64 * delta).sqrt())
        .collect()
}

fn class_weight(table: &LevelTable, triple: [usize; 3]) -> LatticeResult<f64> {
    let mut key = triple;
    key.sort_unstable();
    table
        .weights
        .iter()
        .find(|(class, _)| *class == key)
        .map(|&(_, w)| w)
        .ok_or_else(|| {
            LatticeError::ConfigError(format!("no LQn weight class for ordinate {triple:?}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_counts() {
        for &n in &SUPPORTED_ORDERS {
            let q = level_symmetric(n).unwrap();
            assert_eq!(q.num_angles_per_octant, n * (n + 2) / 8);
            assert_eq!(q.num_angles, n * (n + 2) / 2);
            assert_eq!(q.num_angles % 4, 0);
            assert_eq!(q.mu.len(), q.num_angles_per_octant);
            assert_eq!(q.weight.len(), q.num_angles_per_octant);
        }
    }

    #[test]
    fn test_octant_weights_sum_to_pi() {
        for &n in &SUPPORTED_ORDERS {
            let q = level_symmetric(n).unwrap();
            assert!(
                (q.weight.sum() - PI).abs() < 1e-12,
                "S{n} octant weight sum {}",
                q.weight.sum()
            );
        }
    }

    #[test]
    fn test_tabulated_weights_already_normalised() {
        // Raw class weights × multiplicity must sum to 1 before scaling.
        for (table, n) in [(&S6, 6), (&S8, 8), (&S12, 12), (&S16, 16)] {
            let half = n / 2;
            let mut raw = 0.0;
            for i in 1..=half {
                for j in 1..=(half + 1 - i) {
                    raw += class_weight(table, [i, j, half + 2 - i - j]).unwrap();
                }
            }
            assert!((raw - 1.0).abs() < 1e-5, "S{n} raw weight sum {raw}");
        }
    }

    #[test]
    fn test_unit_direction_vectors() {
        for &n in &SUPPORTED_ORDERS {
            let q = level_symmetric(n).unwrap();
            for a in 0..q.num_angles_per_octant {
                let norm = q.mu[a] * q.mu[a] + q.eta[a] * q.eta[a] + q.xi[a] * q.xi[a];
                assert!((norm - 1.0).abs() < 1e-12, "S{n} angle {a}: |Ω|² = {norm}");
                assert!(q.mu[a] > 0.0 && q.eta[a] > 0.0 && q.xi[a] > 0.0);
            }
        }
    }

    #[test]
    fn test_s4_cosines_match_table() {
        let q = level_symmetric(4).unwrap();
        let mut mu: Vec<f64> = q.mu.to_vec();
        mu.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((mu[0] - 0.350_021_2).abs() < 1e-7);
        assert!((mu[2] - 0.868_890_3).abs() < 1e-6);
    }

    #[test]
    fn test_second_moment_is_exact() {
        // Octant weights cover 2·(π/2), so Σ w μ² = 2·(π/2)/3.
        for &n in &SUPPORTED_ORDERS {
            let q = level_symmetric(n).unwrap();
            let moment: f64 = q
                .weight
                .iter()
                .zip(q.mu.iter())
                .map(|(w, m)| w * m * m)
                .sum();
            assert!(
                (moment - PI / 3.0).abs() < 1e-6,
                "S{n} second moment {moment}"
            );
        }
    }

    #[test]
    fn test_unsupported_order() {
        for n in [0usize, 3, 10, 24] {
            match level_symmetric(n) {
                Err(LatticeError::UnsupportedOrder { order, supported }) => {
                    assert_eq!(order, n);
                    assert_eq!(supported, SUPPORTED_ORDERS.to_vec());
                }
                other => panic!("S{n} should be unsupported, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_provider_trait() {
        let q = LevelSymmetric.quadrature(8).unwrap();
        assert_eq!(q.order, 8);
        assert_eq!(q.num_angles, 40);
    }
}
