//! Energy traces
//!
//! An [`EnergyTrace`] is the append-only record of scalar energy (or
//! free-energy delta) samples produced by relaxation and training loops.

use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of energy samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrace {
    samples: Vec<f64>,
}

impl EnergyTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample
    pub fn record(&mut self, value: f64) {
        self.samples.push(value);
    }

    /// Recorded samples in order
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.samples.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    /// Differences between consecutive samples
    pub fn deltas(&self) -> Vec<f64> {
        self.samples.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Sum of all samples
    ///
    /// For a trace of epoch-over-epoch deltas this is the net change over
    /// the whole run.
    pub fn total(&self) -> f64 {
        self.samples.iter().sum()
    }

    /// Fraction of samples that are strictly negative
    pub fn negative_fraction(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let negative = self.samples.iter().filter(|&&x| x < 0.0).count();
        negative as f64 / self.samples.len() as f64
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for EnergyTrace {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a EnergyTrace {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
