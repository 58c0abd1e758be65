//! Restricted Boltzmann Machine (RBM) implementation
//!
//! A two-layer network of binary visible and hidden units connected by
//! weights W, with no connections inside a layer.
//! Energy function: E(v,h) = -v·W·h - a·v - b·h
//!
//! The conditionals use P(x=1 | field) = 1 / (1 + exp(+field)), and the
//! contrastive-divergence update is written against this convention.

mod training;

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

use crate::config::RbmConfig;
use crate::error::{Error, Result};
use crate::utils::{bernoulli, sigmoid, softplus};

/// Restricted Boltzmann Machine
#[derive(Debug, Clone)]
pub struct RestrictedBoltzmannMachine {
    /// Weight matrix (n_visible x n_hidden)
    pub weights: Array2<f64>,
    /// Visible bias (n_visible)
    pub visible_bias: Array1<f64>,
    /// Hidden bias (n_hidden)
    pub hidden_bias: Array1<f64>,
}

impl RestrictedBoltzmannMachine {
    /// Create a new RBM with small uniform weights and zero biases
    pub fn new<R: Rng>(config: &RbmConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let dist = Uniform::new(-config.init_scale, config.init_scale);
        let weights = Array2::random_using((config.n_visible, config.n_hidden), dist, rng);

        Ok(Self {
            weights,
            visible_bias: Array1::zeros(config.n_visible),
            hidden_bias: Array1::zeros(config.n_hidden),
        })
    }

    /// Create an RBM from explicit parameters
    pub fn from_parameters(
        weights: Array2<f64>,
        visible_bias: Array1<f64>,
        hidden_bias: Array1<f64>,
    ) -> Result<Self> {
        let (n_visible, n_hidden) = weights.dim();
        if visible_bias.len() != n_visible {
            return Err(Error::mismatch("visible bias", n_visible, visible_bias.len()));
        }
        if hidden_bias.len() != n_hidden {
            return Err(Error::mismatch("hidden bias", n_hidden, hidden_bias.len()));
        }
        Ok(Self {
            weights,
            visible_bias,
            hidden_bias,
        })
    }

    /// Number of visible units
    pub fn n_visible(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of hidden units
    pub fn n_hidden(&self) -> usize {
        self.weights.ncols()
    }

    /// P(v_i = 1 | h) = 1 / (1 + exp(a_i + Σ_j W_ij h_j))
    pub fn prob_visible_given_hidden(&self, hidden: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_hidden(hidden)?;
        let field = self.weights.dot(hidden) + &self.visible_bias;
        Ok(field.mapv(|x| sigmoid(-x)))
    }

    /// P(h_j = 1 | v) = 1 / (1 + exp(b_j + Σ_i v_i W_ij))
    pub fn prob_hidden_given_visible(&self, visible: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_visible(visible)?;
        let field = visible.dot(&self.weights) + &self.hidden_bias;
        Ok(field.mapv(|x| sigmoid(-x)))
    }

    /// Sample visible units given hidden units
    pub fn sample_visible<R: Rng>(&self, hidden: &Array1<f64>, rng: &mut R) -> Result<Array1<f64>> {
        let probs = self.prob_visible_given_hidden(hidden)?;
        Ok(bernoulli(&probs, rng))
    }

    /// Sample hidden units given visible units
    pub fn sample_hidden<R: Rng>(&self, visible: &Array1<f64>, rng: &mut R) -> Result<Array1<f64>> {
        let probs = self.prob_hidden_given_visible(visible)?;
        Ok(bernoulli(&probs, rng))
    }

    /// One alternating update: v ~ P(v|h), then h ~ P(h|v)
    pub fn block_gibbs_step<R: Rng>(
        &self,
        hidden: &Array1<f64>,
        rng: &mut R,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        let visible = self.sample_visible(hidden, rng)?;
        let hidden = self.sample_hidden(&visible, rng)?;
        Ok((visible, hidden))
    }

    /// Run `k` block Gibbs steps starting from `seed_hidden`
    ///
    /// With `k == 0` the visible layer is sampled once from the seed and the
    /// seed itself is returned as the hidden layer.
    pub fn run_gibbs_chain<R: Rng>(
        &self,
        k: usize,
        seed_hidden: &Array1<f64>,
        rng: &mut R,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        if k == 0 {
            let visible = self.sample_visible(seed_hidden, rng)?;
            return Ok((visible, seed_hidden.clone()));
        }

        let (mut visible, mut hidden) = self.block_gibbs_step(seed_hidden, rng)?;
        for _ in 1..k {
            let (v, h) = self.block_gibbs_step(&hidden, rng)?;
            visible = v;
            hidden = h;
        }
        Ok((visible, hidden))
    }

    /// Draw `num_samples` independent samples
    ///
    /// Each chain starts from a uniformly random visible vector and applies
    /// `k` rounds of h ~ P(h|v), v ~ P(v|h).
    pub fn sample<R: Rng>(
        &self,
        k: usize,
        num_samples: usize,
        rng: &mut R,
    ) -> Result<Vec<(Array1<f64>, Array1<f64>)>> {
        let mut samples = Vec::with_capacity(num_samples);

        for _ in 0..num_samples {
            let mut visible = random_binary(self.n_visible(), rng);
            let mut hidden = random_binary(self.n_hidden(), rng);

            for _ in 0..k {
                hidden = self.sample_hidden(&visible, rng)?;
                visible = self.sample_visible(&hidden, rng)?;
            }
            samples.push((visible, hidden));
        }

        Ok(samples)
    }

    /// E(v,h) = -v·W·h - a·v - b·h
    pub fn energy(&self, visible: &Array1<f64>, hidden: &Array1<f64>) -> Result<f64> {
        self.check_visible(visible)?;
        self.check_hidden(hidden)?;
        let interaction = visible.dot(&self.weights.dot(hidden));
        Ok(-interaction - self.visible_bias.dot(visible) - self.hidden_bias.dot(hidden))
    }

    /// Free energy F(v) = -a·v - Σ_j log(1 + exp(b_j + Σ_i v_i W_ij))
    ///
    /// Marginalizes the hidden units analytically.
    pub fn free_energy(&self, visible: &Array1<f64>) -> Result<f64> {
        self.check_visible(visible)?;
        let visible_term = -visible.dot(&self.visible_bias);
        let field = visible.dot(&self.weights) + &self.hidden_bias;
        let hidden_term: f64 = -field.iter().map(|&x| softplus(x)).sum::<f64>();
        Ok(visible_term + hidden_term)
    }

    /// Mean free energy over the rows of `data`
    pub fn average_free_energy(&self, data: &Array2<f64>) -> Result<f64> {
        self.check_data(data)?;
        let mut total = 0.0;
        for row in data.rows() {
            total += self.free_energy(&row.to_owned())?;
        }
        Ok(total / data.nrows() as f64)
    }

    /// One hidden sample followed by one visible sample
    pub fn reconstruct<R: Rng>(&self, visible: &Array1<f64>, rng: &mut R) -> Result<Array1<f64>> {
        let hidden = self.sample_hidden(visible, rng)?;
        self.sample_visible(&hidden, rng)
    }

    /// Mean squared reconstruction error per row
    pub fn reconstruction_error<R: Rng>(&self, data: &Array2<f64>, rng: &mut R) -> Result<f64> {
        self.check_data(data)?;
        let mut total = 0.0;
        for row in data.rows() {
            let visible = row.to_owned();
            let reconstructed = self.reconstruct(&visible, rng)?;
            total += (&visible - &reconstructed).mapv(|x| x * x).sum();
        }
        Ok(total / data.nrows() as f64)
    }

    fn check_visible(&self, visible: &Array1<f64>) -> Result<()> {
        if visible.len() != self.n_visible() {
            return Err(Error::mismatch("visible vector", self.n_visible(), visible.len()));
        }
        Ok(())
    }

    fn check_hidden(&self, hidden: &Array1<f64>) -> Result<()> {
        if hidden.len() != self.n_hidden() {
            return Err(Error::mismatch("hidden vector", self.n_hidden(), hidden.len()));
        }
        Ok(())
    }

    fn check_data(&self, data: &Array2<f64>) -> Result<()> {
        if data.nrows() == 0 {
            return Err(Error::EmptyInput("training data"));
        }
        if data.ncols() != self.n_visible() {
            return Err(Error::mismatch("data columns", self.n_visible(), data.ncols()));
        }
        Ok(())
    }
}

fn random_binary<R: Rng>(n: usize, rng: &mut R) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| if rng.gen::<bool>() { 1.0 } else { 0.0 })
}
