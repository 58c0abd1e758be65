//! Hopfield associative memory
//!
//! This module provides the bipolar spin model, the stochastic relaxer that
//! drives it to a local energy minimum, Hebbian imprinting of target patterns
//! and exhaustive energy-landscape enumeration for small networks.

pub mod hebbian;
pub mod landscape;
pub mod model;
pub mod relaxer;

use ndarray::Array1;

pub use hebbian::HebbianImprinter;
pub use landscape::EnergyLandscape;
pub use model::EnergyModel;
pub use relaxer::{RelaxationReport, StochasticRelaxer};

/// Map an input pattern to bipolar spins
///
/// Zero ("blank") entries become -1, positive entries +1 and negative
/// entries -1.
pub fn normalize_input_state(pattern: &[f64]) -> Array1<f64> {
    pattern
        .iter()
        .map(|&x| if x > 0.0 { 1.0 } else { -1.0 })
        .collect()
}

/// Map bipolar spins back to {0, 1}
pub fn to_binary(state: &[f64]) -> Vec<u8> {
    state.iter().map(|&s| u8::from(s > 0.0)).collect()
}

/// Mean agreement Σ a_i b_i / N, in [-1, 1] for bipolar vectors
pub fn overlap(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Patterns must have same length");
    if a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / a.len() as f64
}

/// Number of positions where the two patterns have different sign
pub fn hamming_distance(a: &[f64], b: &[f64]) -> usize {
    assert_eq!(a.len(), b.len(), "Patterns must have same length");
    a.iter()
        .zip(b.iter())
        .filter(|(x, y)| (**x > 0.0) != (**y > 0.0))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_normalize_input_state() {
        let state = normalize_input_state(&[0.0, 1.0, -1.0, 0.0, 3.0]);
        assert_eq!(state, array![-1.0, 1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_to_binary() {
        assert_eq!(to_binary(&[1.0, -1.0, -1.0, 1.0]), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_overlap_and_hamming() {
        let a = [1.0, -1.0, 1.0, -1.0];
        let b = [1.0, 1.0, 1.0, -1.0];
        assert_eq!(overlap(&a, &a), 1.0);
        assert_eq!(overlap(&a, &b), 0.5);
        assert_eq!(hamming_distance(&a, &b), 1);

        let inverted: Vec<f64> = a.iter().map(|x| -x).collect();
        assert_eq!(overlap(&a, &inverted), -1.0);
        assert_eq!(hamming_distance(&a, &inverted), 4);
    }
}
