//! Stochastic single-unit relaxation
//!
//! Greedy asynchronous dynamics: pick a unit uniformly at random and flip it
//! when that strictly lowers the energy. Repeating this drives the state to a
//! local minimum, but nothing guarantees that happens within the step cap.

use ndarray::Array1;
use rand::Rng;
use tracing::debug;

use crate::config::RelaxationConfig;
use crate::error::{Error, Result};
use crate::hopfield::model::EnergyModel;
use crate::hopfield::normalize_input_state;
use crate::trace::EnergyTrace;

/// Result of a relaxation run
#[derive(Debug, Clone)]
pub struct RelaxationReport {
    /// Initial energy followed by one sample per convergence check
    pub trace: EnergyTrace,
    /// True only if a convergence check succeeded before the step cap
    pub converged: bool,
    /// Number of update steps performed
    pub steps: usize,
}

/// Randomized relaxer over an owned [`EnergyModel`]
#[derive(Debug, Clone)]
pub struct StochasticRelaxer<R: Rng> {
    model: EnergyModel,
    rng: R,
}

impl<R: Rng> StochasticRelaxer<R> {
    pub fn new(model: EnergyModel, rng: R) -> Self {
        Self { model, rng }
    }

    pub fn model(&self) -> &EnergyModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EnergyModel {
        &mut self.model
    }

    pub fn into_model(self) -> EnergyModel {
        self.model
    }

    /// Try to flip one randomly chosen unit
    ///
    /// Returns the would-be energy change and the chosen index. The unit is
    /// flipped only when the change is strictly negative.
    pub fn step(&mut self) -> (f64, usize) {
        let i = self.rng.gen_range(0..self.model.dimension());
        let delta = self.model.local_field_energy(i);
        if delta < 0.0 {
            self.model.flip(i);
        }
        (delta, i)
    }

    /// True if no single flip strictly lowers the energy
    pub fn has_converged(&self) -> bool {
        (0..self.model.dimension()).all(|i| self.model.local_field_energy(i) >= 0.0)
    }

    /// Run at most `max_steps` update steps
    ///
    /// The running energy starts at the model's total energy and only
    /// accepted (negative) deltas are added to it. Every `check_interval`
    /// steps, starting with the first, the running value is recorded and a
    /// full convergence sweep decides whether to stop early.
    pub fn relax(&mut self, max_steps: usize, check_interval: usize) -> Result<RelaxationReport> {
        if check_interval == 0 {
            return Err(Error::Config("check_interval must be positive".into()));
        }

        let mut current = self.model.total_energy();
        let mut trace = EnergyTrace::with_capacity(max_steps / check_interval + 2);
        trace.record(current);

        let mut converged = false;
        let mut steps = 0;

        while steps < max_steps {
            let (delta, _) = self.step();
            if delta < 0.0 {
                current += delta;
            }

            if steps % check_interval == 0 {
                trace.record(current);
                if self.has_converged() {
                    debug!(step = steps, energy = current, "relaxation converged");
                    converged = true;
                    steps += 1;
                    break;
                }
            }
            steps += 1;
        }

        if !converged {
            debug!(steps, energy = current, "relaxation hit step cap");
        }

        Ok(RelaxationReport {
            trace,
            converged,
            steps,
        })
    }

    /// [`relax`](Self::relax) driven by a config
    pub fn relax_with(&mut self, config: &RelaxationConfig) -> Result<RelaxationReport> {
        config.validate()?;
        self.relax(config.max_steps, config.check_interval)
    }

    /// Load a (possibly corrupted) input state and relax from it
    ///
    /// Zero entries of `initial` are read as -1. The recalled pattern is the
    /// model state afterwards.
    pub fn recall(
        &mut self,
        initial: &[f64],
        config: &RelaxationConfig,
    ) -> Result<RelaxationReport> {
        let state: Array1<f64> = normalize_input_state(initial);
        self.model.set_state(state)?;
        self.relax_with(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn golden_model(state: Array1<f64>) -> EnergyModel {
        let coupling = array![
            [0.0, 1.0, 1.0, -1.0],
            [1.0, 0.0, -1.0, 1.0],
            [1.0, -1.0, 0.0, 1.0],
            [-1.0, 1.0, 1.0, 0.0]
        ];
        EnergyModel::with_zero_bias(coupling, state).unwrap()
    }

    #[test]
    fn test_zero_steps_records_initial_energy_only() {
        let model = golden_model(array![1.0, -1.0, 1.0, 1.0]);
        let before = model.units().clone();
        let initial = model.total_energy();

        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(1));
        let report = relaxer.relax(0, 100).unwrap();

        assert_eq!(report.trace.samples(), &[initial]);
        assert_eq!(report.steps, 0);
        assert!(!report.converged);
        assert_eq!(relaxer.model().units(), &before);
    }

    #[test]
    fn test_converged_state_is_fixed_point() {
        // All-ones is a minimum of the golden coupling (every flip costs 2).
        let model = golden_model(array![1.0, 1.0, 1.0, 1.0]);
        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(5));
        assert!(relaxer.has_converged());

        for _ in 0..200 {
            let (delta, _) = relaxer.step();
            assert!(delta >= 0.0);
        }
        assert_eq!(relaxer.model().units(), &array![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_has_converged_matches_deltas() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            let model = EnergyModel::random(8, &mut rng).unwrap();
            let all_non_negative =
                (0..8).all(|i| model.local_field_energy(i) >= 0.0);
            let relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(0));
            assert_eq!(relaxer.has_converged(), all_non_negative);
        }
    }

    #[test]
    fn test_step_flips_only_on_negative_delta() {
        let model = golden_model(array![1.0, -1.0, 1.0, 1.0]);
        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(9));

        for _ in 0..50 {
            let before = relaxer.model().units().clone();
            let (delta, i) = relaxer.step();
            let after = relaxer.model().units();
            if delta < 0.0 {
                assert_eq!(after[i], -before[i]);
            } else {
                assert_eq!(after, &before);
            }
            for j in (0..4).filter(|&j| j != i) {
                assert_eq!(after[j], before[j]);
            }
        }
    }

    #[test]
    fn test_relax_reaches_minimum_and_tracks_energy() {
        let mut rng = StdRng::seed_from_u64(3);
        let random = EnergyModel::random(30, &mut rng).unwrap();
        let model =
            EnergyModel::with_zero_bias(random.coupling().clone(), random.units().clone())
                .unwrap();

        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(4));
        let report = relaxer.relax(100_000, 10).unwrap();

        assert!(report.converged);
        assert!(relaxer.has_converged());
        assert!(report.trace.len() >= 2);

        // Running total never increases and ends at the true energy.
        assert!(report.trace.deltas().iter().all(|&d| d <= 1e-12));
        assert_abs_diff_eq!(
            report.trace.last().unwrap(),
            relaxer.model().total_energy(),
            epsilon = 1e-9
        );
    }

    /// Uncoupled units that all start against their field. A unit settles the
    /// first time it is picked, so the model converges only after every unit
    /// has been visited.
    fn uncoupled_model(n: usize) -> EnergyModel {
        EnergyModel::new(Array2::zeros((n, n)), Array1::ones(n), -Array1::ones(n)).unwrap()
    }

    #[test]
    fn test_trace_cadence_when_capped() {
        for (max_steps, interval) in [(250, 100), (300, 100), (1, 100), (99, 7)] {
            let mut relaxer =
                StochasticRelaxer::new(uncoupled_model(400), StdRng::seed_from_u64(12));
            let report = relaxer.relax(max_steps, interval).unwrap();

            assert!(!report.converged);
            assert_eq!(report.steps, max_steps);
            let expected = 1 + (max_steps + interval - 1) / interval;
            assert_eq!(
                report.trace.len(),
                expected,
                "max_steps={} interval={}",
                max_steps,
                interval
            );
        }
    }

    #[test]
    fn test_trace_cadence_when_converged() {
        for interval in [1, 3, 7, 50] {
            let rng = StdRng::seed_from_u64(interval as u64);
            let mut relaxer = StochasticRelaxer::new(uncoupled_model(5), rng);
            let report = relaxer.relax(100_000, interval).unwrap();

            assert!(report.converged);
            assert!(relaxer.model().units().iter().all(|&s| s == 1.0));
            // The loop stops right after a check, which happens at t % interval == 0.
            assert_eq!((report.steps - 1) % interval, 0);
            assert_eq!(report.trace.len(), 2 + (report.steps - 1) / interval);
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut rng = StdRng::seed_from_u64(8);
        let model = EnergyModel::random(25, &mut rng).unwrap();

        let mut a = StochasticRelaxer::new(model.clone(), StdRng::seed_from_u64(77));
        let mut b = StochasticRelaxer::new(model, StdRng::seed_from_u64(77));
        let ra = a.relax(2500, 100).unwrap();
        let rb = b.relax(2500, 100).unwrap();

        assert_eq!(ra.trace, rb.trace);
        assert_eq!(ra.steps, rb.steps);
        assert_eq!(a.model().units(), b.model().units());
    }

    #[test]
    fn test_zero_check_interval_rejected() {
        let model = golden_model(array![1.0, 1.0, 1.0, 1.0]);
        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(1));
        assert!(relaxer.relax(10, 0).is_err());
        assert!(relaxer
            .relax_with(&RelaxationConfig::default().check_interval(0))
            .is_err());
    }

    #[test]
    fn test_recall_normalizes_input() {
        let model = golden_model(array![1.0, 1.0, 1.0, 1.0]);
        let mut relaxer = StochasticRelaxer::new(model, StdRng::seed_from_u64(2));
        let report = relaxer
            .recall(&[1.0, 0.0, 1.0, 1.0], &RelaxationConfig::recall())
            .unwrap();

        assert!(report.converged);
        assert!(relaxer.has_converged());
        assert!(relaxer.model().units().iter().all(|&s| s == 1.0 || s == -1.0));
    }
}
