//! Contrastive-divergence training
//!
//! Each row is visited once per epoch in a shuffled order. The positive
//! phase uses a hidden sample conditioned on the data row; the negative phase
//! runs a fresh k-step Gibbs chain seeded from that same hidden sample.

use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::RestrictedBoltzmannMachine;
use crate::config::TrainingConfig;
use crate::error::{Error, Result};
use crate::trace::EnergyTrace;
use crate::utils::outer;

impl RestrictedBoltzmannMachine {
    /// One pass over `data` with mini-batch CD-k updates
    ///
    /// `data` is not reordered; a shuffled index permutation decides the
    /// visiting order. A final batch shorter than `batch_size` is still
    /// applied, scaled by `learning_rate / batch_size`.
    pub fn train_epoch<R: Rng>(
        &mut self,
        data: &Array2<f64>,
        learning_rate: f64,
        batch_size: usize,
        k: usize,
        rng: &mut R,
    ) -> Result<()> {
        self.check_data(data)?;
        if batch_size == 0 {
            return Err(Error::Config("batch_size must be positive".into()));
        }

        let mut order: Vec<usize> = (0..data.nrows()).collect();
        order.shuffle(rng);

        let scale = learning_rate / batch_size as f64;

        for batch in order.chunks(batch_size) {
            let mut d_weights = Array2::<f64>::zeros(self.weights.raw_dim());
            let mut d_visible = Array1::<f64>::zeros(self.n_visible());
            let mut d_hidden = Array1::<f64>::zeros(self.n_hidden());

            for &row in batch {
                let v0 = data.row(row).to_owned();
                let h0 = self.sample_hidden(&v0, rng)?;

                d_weights -= &outer(&v0, &h0);
                d_visible -= &v0;
                d_hidden -= &h0;

                let (vk, hk) = self.run_gibbs_chain(k, &h0, rng)?;

                d_weights += &outer(&vk, &hk);
                d_visible += &vk;
                d_hidden += &hk;
            }

            self.weights.scaled_add(-scale, &d_weights);
            self.visible_bias.scaled_add(-scale, &d_visible);
            self.hidden_bias.scaled_add(-scale, &d_hidden);
        }

        Ok(())
    }

    /// Train for `num_epochs` epochs
    ///
    /// Returns one sample per epoch: the change of the average free energy of
    /// `data` across that epoch. A mostly negative trace is the expected
    /// training signal, not a guarantee.
    pub fn train<R: Rng>(
        &mut self,
        data: &Array2<f64>,
        learning_rate: f64,
        batch_size: usize,
        k: usize,
        num_epochs: usize,
        rng: &mut R,
    ) -> Result<EnergyTrace> {
        let mut trace = EnergyTrace::with_capacity(num_epochs);
        let mut previous = self.average_free_energy(data)?;

        info!(
            "Training RBM with CD-{} for {} epochs on {} samples",
            k,
            num_epochs,
            data.nrows()
        );

        for epoch in 0..num_epochs {
            self.train_epoch(data, learning_rate, batch_size, k, rng)?;

            let current = self.average_free_energy(data)?;
            let delta = current - previous;
            trace.record(delta);
            previous = current;

            debug!(epoch = epoch + 1, free_energy = current, delta, "epoch finished");
            if epoch % 10 == 0 || epoch + 1 == num_epochs {
                info!(
                    "Epoch {}/{}: average free energy = {:.6} (delta {:+.6})",
                    epoch + 1,
                    num_epochs,
                    current,
                    delta
                );
            }
        }

        Ok(trace)
    }

    /// [`train`](Self::train) driven by a config
    pub fn train_with<R: Rng>(
        &mut self,
        data: &Array2<f64>,
        config: &TrainingConfig,
        rng: &mut R,
    ) -> Result<EnergyTrace> {
        config.validate()?;
        self.train(
            data,
            config.learning_rate,
            config.batch_size,
            config.k,
            config.epochs,
            rng,
        )
    }
}
