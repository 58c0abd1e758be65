//! Hebbian imprinting
//!
//! W = 1/2 Σ_p p p^T with the diagonal cleared. Plain superposition: capacity
//! degrades as more (or more correlated) patterns are stored.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{Error, Result};
use crate::hopfield::model::EnergyModel;
use crate::hopfield::normalize_input_state;
use crate::utils::outer;

/// Accumulates bipolar patterns and builds the matching coupling matrix
#[derive(Debug, Clone)]
pub struct HebbianImprinter {
    dimension: usize,
    patterns: Vec<Array1<f64>>,
}

impl HebbianImprinter {
    /// Create an imprinter for patterns of length `dimension`
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            patterns: Vec::new(),
        }
    }

    /// Coupling matrix for a set of patterns
    ///
    /// Patterns are normalized first (zeros become -1). All patterns must
    /// share one length and at least one pattern is required.
    pub fn imprint(patterns: &[Array1<f64>]) -> Result<Array2<f64>> {
        let first = patterns.first().ok_or(Error::EmptyInput("patterns"))?;
        let mut imprinter = Self::new(first.len());
        for pattern in patterns {
            imprinter.add_pattern(&pattern.to_vec())?;
        }
        Ok(imprinter.coupling())
    }

    /// Store one more pattern
    pub fn add_pattern(&mut self, pattern: &[f64]) -> Result<()> {
        if pattern.len() != self.dimension {
            return Err(Error::mismatch("pattern", self.dimension, pattern.len()));
        }
        self.patterns.push(normalize_input_state(pattern));
        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn patterns(&self) -> &[Array1<f64>] {
        &self.patterns
    }

    /// Current coupling matrix (all zeros when nothing is stored)
    pub fn coupling(&self) -> Array2<f64> {
        let mut weights = Array2::zeros((self.dimension, self.dimension));
        for pattern in &self.patterns {
            weights += &outer(pattern, pattern);
        }
        weights /= 2.0;
        weights.diag_mut().fill(0.0);
        weights
    }

    /// Build an [`EnergyModel`] holding the stored memories
    ///
    /// `initial_state` is normalized like a pattern. `bias` defaults to zero.
    pub fn into_model(
        self,
        initial_state: &[f64],
        bias: Option<Array1<f64>>,
    ) -> Result<EnergyModel> {
        if self.patterns.is_empty() {
            return Err(Error::EmptyInput("patterns"));
        }
        let coupling = self.coupling();
        let bias = bias.unwrap_or_else(|| Array1::zeros(self.dimension));
        debug!(
            patterns = self.patterns.len(),
            dimension = self.dimension,
            "imprinted hopfield memory"
        );
        EnergyModel::new(coupling, bias, normalize_input_state(initial_state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_single_pattern_coupling() {
        let w = HebbianImprinter::imprint(&[array![1.0, -1.0, 1.0]]).unwrap();
        assert_eq!(
            w,
            array![[0.0, -0.5, 0.5], [-0.5, 0.0, -0.5], [0.5, -0.5, 0.0]]
        );
    }

    #[test]
    fn test_superposition_of_two_patterns() {
        let p1 = array![1.0, 1.0, -1.0, -1.0];
        let p2 = array![1.0, -1.0, 1.0, -1.0];
        let w = HebbianImprinter::imprint(&[p1.clone(), p2.clone()]).unwrap();

        for i in 0..4 {
            assert_eq!(w[[i, i]], 0.0);
            for j in 0..4 {
                if i != j {
                    assert_eq!(w[[i, j]], (p1[i] * p1[j] + p2[i] * p2[j]) / 2.0);
                }
                assert_eq!(w[[i, j]], w[[j, i]]);
            }
        }
    }

    #[test]
    fn test_zeros_are_imprinted_as_down_spins() {
        let from_binary = HebbianImprinter::imprint(&[array![1.0, 0.0, 0.0, 1.0]]).unwrap();
        let from_bipolar = HebbianImprinter::imprint(&[array![1.0, -1.0, -1.0, 1.0]]).unwrap();
        assert_eq!(from_binary, from_bipolar);
    }

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(matches!(
            HebbianImprinter::imprint(&[]),
            Err(Error::EmptyInput(_))
        ));
        assert!(matches!(
            HebbianImprinter::imprint(&[array![1.0, -1.0], array![1.0, -1.0, 1.0]]),
            Err(Error::DimensionMismatch { .. })
        ));

        let empty = HebbianImprinter::new(3);
        assert!(empty.into_model(&[1.0, 1.0, 1.0], None).is_err());
    }

    #[test]
    fn test_into_model() {
        let mut imprinter = HebbianImprinter::new(4);
        imprinter.add_pattern(&[1.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(imprinter.pattern_count(), 1);

        let model = imprinter.into_model(&[1.0, 0.0, 1.0, 0.0], None).unwrap();
        assert_eq!(model.units(), &array![1.0, -1.0, 1.0, -1.0]);
        assert!(model.bias().iter().all(|&b| b == 0.0));
        // The imprinted pattern has every flip uphill.
        assert!((0..4).all(|i| model.local_field_energy(i) > 0.0));
    }
}
