//! Configuration for relaxation and training runs
//!
//! All configs are plain serde structs with sensible defaults, builder-style
//! setters and a `validate` step. Binaries can load them from JSON files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for Hopfield relaxation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxationConfig {
    /// Maximum number of single-unit update steps
    pub max_steps: usize,
    /// Steps between trace samples / convergence sweeps
    pub check_interval: usize,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            max_steps: 2500,
            check_interval: 100,
        }
    }
}

impl RelaxationConfig {
    /// Settings used for recalling a stored memory from a corrupted state
    pub fn recall() -> Self {
        Self {
            max_steps: 50_000,
            ..Default::default()
        }
    }

    /// Set the step cap
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the convergence-check interval
    pub fn check_interval(mut self, interval: usize) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.check_interval == 0 {
            return Err(Error::Config("check_interval must be positive".into()));
        }
        Ok(())
    }
}

/// Shape and initialisation of a Restricted Boltzmann Machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbmConfig {
    /// Number of visible units
    pub n_visible: usize,
    /// Number of hidden units
    pub n_hidden: usize,
    /// Weights are drawn uniformly from (-init_scale, init_scale)
    pub init_scale: f64,
}

impl Default for RbmConfig {
    fn default() -> Self {
        Self {
            n_visible: 784,
            n_hidden: 64,
            init_scale: 0.01,
        }
    }
}

impl RbmConfig {
    pub fn new(n_visible: usize, n_hidden: usize) -> Self {
        Self {
            n_visible,
            n_hidden,
            ..Default::default()
        }
    }

    /// Set the weight initialisation scale
    pub fn init_scale(mut self, scale: f64) -> Self {
        self.init_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_visible == 0 || self.n_hidden == 0 {
            return Err(Error::Config("layer sizes must be positive".into()));
        }
        if !(self.init_scale.is_finite() && self.init_scale > 0.0) {
            return Err(Error::Config(format!(
                "init_scale must be positive and finite, got {}",
                self.init_scale
            )));
        }
        Ok(())
    }
}

/// Contrastive-divergence training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Gradient step size
    pub learning_rate: f64,
    /// Rows per mini-batch (the last batch may be shorter)
    pub batch_size: usize,
    /// Gibbs steps in the negative phase (CD-k)
    pub k: usize,
    /// Number of passes over the data
    pub epochs: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            batch_size: 10,
            k: 1,
            epochs: 20,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Set the learning rate
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set the mini-batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the Gibbs chain length
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the number of epochs
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be positive".into()));
        }
        if !self.learning_rate.is_finite() {
            return Err(Error::Config(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Load any config struct from a JSON file
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write any serializable value to a pretty-printed JSON file
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
