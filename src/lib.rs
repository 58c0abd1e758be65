//! # Energy Memory
//!
//! Small energy-based neural networks: Hopfield associative memories and a
//! Restricted Boltzmann Machine, driven by stochastic local-update dynamics.
//!
//! ## Features
//!
//! - Bipolar spin model with dense symmetric coupling and its energy function
//! - Randomized single-unit relaxation toward a local energy minimum
//! - Hebbian (outer-product) imprinting of target patterns
//! - Exhaustive energy-landscape enumeration for small networks
//! - RBM with block Gibbs sampling and contrastive-divergence training
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so runs are
//! reproducible with a seeded generator.
//!
//! ## Quick Start
//!
//! ```rust
//! use energy_memory::prelude::*;
//! use ndarray::array;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> energy_memory::Result<()> {
//! let memory = array![1.0, -1.0, 1.0, -1.0, 1.0, 1.0];
//! let mut imprinter = HebbianImprinter::new(memory.len());
//! imprinter.add_pattern(memory.as_slice().unwrap())?;
//!
//! let model = imprinter.into_model(&[1.0, 1.0, 1.0, -1.0, 1.0, 1.0], None)?;
//! let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(42));
//! let report = relaxer.relax_with(&RelaxationConfig::recall())?;
//!
//! assert!(report.converged);
//! assert_eq!(relaxer.model().units(), &memory);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod hopfield;
pub mod rbm;
pub mod trace;
pub mod utils;

// Re-export main types for convenience
pub use config::{RbmConfig, RelaxationConfig, TrainingConfig};
pub use error::{Error, Result};
pub use hopfield::{
    EnergyLandscape, EnergyModel, HebbianImprinter, RelaxationReport, StochasticRelaxer,
};
pub use rbm::RestrictedBoltzmannMachine;
pub use trace::EnergyTrace;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{RbmConfig, RelaxationConfig, TrainingConfig};
    pub use crate::data::{bars_and_stripes, corrupt_pattern};
    pub use crate::error::{Error, Result};
    pub use crate::hopfield::{
        hamming_distance, normalize_input_state, overlap, EnergyLandscape, EnergyModel,
        HebbianImprinter, RelaxationReport, StochasticRelaxer,
    };
    pub use crate::rbm::RestrictedBoltzmannMachine;
    pub use crate::trace::EnergyTrace;
}
