//! Pairwise-coupled spin system
//!
//! Energy function:
//! E(s) = -1/2 Σ_ij W_ij s_i s_j + Σ_i b_i s_i

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

use crate::error::{Error, Result};
use crate::utils::first_non_bipolar;

/// Bipolar spin system with dense symmetric coupling
///
/// `coupling` is symmetric with a zero diagonal for the whole lifetime of the
/// model; only `units` changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyModel {
    /// Coupling matrix (n x n)
    coupling: Array2<f64>,
    /// External field per unit
    bias: Array1<f64>,
    /// Current state, every entry is -1.0 or +1.0
    units: Array1<f64>,
}

impl EnergyModel {
    /// Create a model from explicit parameters and an initial state
    ///
    /// Fails if the coupling is empty, not square, not symmetric, has a
    /// non-zero diagonal, or if `bias`/`units` do not match its size.
    pub fn new(coupling: Array2<f64>, bias: Array1<f64>, units: Array1<f64>) -> Result<Self> {
        validate_coupling(&coupling)?;
        let n = coupling.nrows();
        if bias.len() != n {
            return Err(Error::mismatch("bias", n, bias.len()));
        }
        validate_state(&units, n)?;

        Ok(Self {
            coupling,
            bias,
            units,
        })
    }

    /// Create a model with zero bias
    pub fn with_zero_bias(coupling: Array2<f64>, units: Array1<f64>) -> Result<Self> {
        let n = coupling.nrows();
        Self::new(coupling, Array1::zeros(n), units)
    }

    /// Random model: units ±1, bias and coupling uniform in (-1, 1)
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyInput("coupling"));
        }
        let dist = Uniform::new(-1.0, 1.0);

        let units = Array1::from_shape_fn(n, |_| if rng.gen::<bool>() { 1.0 } else { -1.0 });
        let bias = Array1::random_using(n, dist, rng);

        let mut coupling = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let w = rng.sample(dist);
                coupling[[i, j]] = w;
                coupling[[j, i]] = w;
            }
        }

        Ok(Self {
            coupling,
            bias,
            units,
        })
    }

    /// Number of units
    pub fn dimension(&self) -> usize {
        self.units.len()
    }

    pub fn units(&self) -> &Array1<f64> {
        &self.units
    }

    pub fn bias(&self) -> &Array1<f64> {
        &self.bias
    }

    pub fn coupling(&self) -> &Array2<f64> {
        &self.coupling
    }

    /// Replace the state
    pub fn set_state(&mut self, units: Array1<f64>) -> Result<()> {
        validate_state(&units, self.dimension())?;
        self.units = units;
        Ok(())
    }

    /// Flip unit `i`
    pub fn flip(&mut self, i: usize) {
        self.units[i] = -self.units[i];
    }

    /// Energy change if unit `i` were flipped
    ///
    /// ΔE_i = 2 s_i (Σ_j W_ij s_j + b_i)
    pub fn local_field_energy(&self, i: usize) -> f64 {
        let field = self.coupling.row(i).dot(&self.units) + self.bias[i];
        2.0 * self.units[i] * field
    }

    /// Total energy of the current state
    pub fn total_energy(&self) -> f64 {
        let interaction = -0.5 * self.units.dot(&self.coupling.dot(&self.units));
        interaction + self.bias.dot(&self.units)
    }

    /// Total energy summed over unordered pairs i < j
    ///
    /// Same value as [`total_energy`](Self::total_energy) for a symmetric,
    /// zero-diagonal coupling.
    pub fn pairwise_energy(&self) -> f64 {
        let n = self.dimension();
        let mut e = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                e -= self.coupling[[i, j]] * self.units[i] * self.units[j];
            }
            e += self.bias[i] * self.units[i];
        }
        e
    }
}

fn validate_coupling(coupling: &Array2<f64>) -> Result<()> {
    let (rows, cols) = coupling.dim();
    if rows != cols {
        return Err(Error::NonSquareCoupling { rows, cols });
    }
    if rows == 0 {
        return Err(Error::EmptyInput("coupling"));
    }
    for i in 0..rows {
        if coupling[[i, i]] != 0.0 {
            return Err(Error::SelfCoupling(i));
        }
        for j in (i + 1)..cols {
            if coupling[[i, j]] != coupling[[j, i]] {
                return Err(Error::AsymmetricCoupling { row: i, col: j });
            }
        }
    }
    Ok(())
}

fn validate_state(units: &Array1<f64>, n: usize) -> Result<()> {
    if units.len() != n {
        return Err(Error::mismatch("state", n, units.len()));
    }
    if let Some((index, value)) = first_non_bipolar(units.iter()) {
        return Err(Error::InvalidUnitValue { index, value });
    }
    Ok(())
}
