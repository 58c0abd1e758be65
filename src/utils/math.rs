//! Mathematical utility functions
//!
//! Numerically stable logistic helpers and small vector operations shared by
//! the Hopfield and RBM models.

use ndarray::{Array1, Array2};
use rand::Rng;

/// Sigmoid activation function
///
/// σ(x) = 1 / (1 + e^(-x)), branching on the sign of `x` so that `exp`
/// never sees a large positive argument.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Softplus ln(1 + e^x), stable for large |x|
pub fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Outer product a ⊗ b
pub fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    let a_col = a.view().insert_axis(ndarray::Axis(1));
    let b_row = b.view().insert_axis(ndarray::Axis(0));
    a_col.dot(&b_row)
}

/// Draw independent Bernoulli samples: 1.0 with probability `p[i]`, else 0.0
pub fn bernoulli<R: Rng>(probs: &Array1<f64>, rng: &mut R) -> Array1<f64> {
    probs.mapv(|p| if rng.gen::<f64>() < p { 1.0 } else { 0.0 })
}

/// Find the first entry that is not exactly -1 or +1
pub fn first_non_bipolar<'a, I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .copied()
        .enumerate()
        .find(|&(_, v)| v != 1.0 && v != -1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sigmoid() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid(2.0) + sigmoid(-2.0), 1.0, epsilon = 1e-12);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_softplus() {
        assert_abs_diff_eq!(softplus(0.0), 2f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(softplus(1.5), (1.0 + 1.5f64.exp()).ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(softplus(800.0), 800.0, epsilon = 1e-9);
        assert!(softplus(-800.0) >= 0.0);
    }

    #[test]
    fn test_outer() {
        let a = array![1.0, -1.0];
        let b = array![2.0, 0.0, 3.0];
        let m = outer(&a, &b);
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m, array![[2.0, 0.0, 3.0], [-2.0, 0.0, -3.0]]);
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let probs = array![0.0, 1.0, 0.0, 1.0];
        assert_eq!(bernoulli(&probs, &mut rng), array![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_first_non_bipolar() {
        assert_eq!(first_non_bipolar(&[1.0, -1.0, 1.0]), None);
        assert_eq!(first_non_bipolar(&[1.0, 0.0, -1.0]), Some((1, 0.0)));
    }
}
