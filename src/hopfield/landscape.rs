//! Exhaustive energy landscape of a small network
//!
//! Every bipolar state is encoded as an integer, unit 0 in the most
//! significant bit, with -1 as bit 0 and +1 as bit 1. Edges follow the
//! single flips the relaxer would accept.

use std::collections::BTreeMap;

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::hopfield::model::EnergyModel;

/// Largest network that may be enumerated (2^20 states)
pub const MAX_LANDSCAPE_UNITS: usize = 20;

/// One state of the landscape
#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeNode {
    /// Total energy of the state
    pub energy: f64,
    /// States reachable by one downhill flip
    pub downhill: Vec<u32>,
}

/// All states of a network with their downhill transitions
#[derive(Debug, Clone)]
pub struct EnergyLandscape {
    dimension: usize,
    nodes: BTreeMap<u32, LandscapeNode>,
}

impl EnergyLandscape {
    /// Enumerate every state of `model`'s coupling and bias
    ///
    /// The model's own state is not changed.
    pub fn build(model: &EnergyModel) -> Result<Self> {
        let n = model.dimension();
        if n > MAX_LANDSCAPE_UNITS {
            return Err(Error::Config(format!(
                "landscape enumeration supports at most {} units, got {}",
                MAX_LANDSCAPE_UNITS, n
            )));
        }

        let mut probe = model.clone();
        let mut nodes = BTreeMap::new();

        for code in 0..(1u32 << n) {
            probe.set_state(decode_state(code, n))?;

            let downhill = (0..n)
                .filter(|&i| probe.local_field_energy(i) < 0.0)
                .map(|i| code ^ (1 << (n - 1 - i)))
                .collect();

            nodes.insert(
                code,
                LandscapeNode {
                    energy: probe.total_energy(),
                    downhill,
                },
            );
        }

        Ok(Self {
            dimension: n,
            nodes,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, code: u32) -> Option<&LandscapeNode> {
        self.nodes.get(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &LandscapeNode)> {
        self.nodes.iter().map(|(&code, node)| (code, node))
    }

    /// States with no downhill transition
    pub fn local_minima(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.downhill.is_empty())
            .map(|(&code, _)| code)
            .collect()
    }

    /// Total number of downhill edges
    pub fn transition_count(&self) -> usize {
        self.nodes.values().map(|node| node.downhill.len()).sum()
    }
}

/// Integer code of a bipolar state
pub fn encode_state(state: &[f64]) -> u32 {
    state
        .iter()
        .fold(0u32, |code, &s| (code << 1) | u32::from(s > 0.0))
}

/// Bipolar state of an integer code
pub fn decode_state(code: u32, n: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| {
        if (code >> (n - 1 - i)) & 1 == 1 {
            1.0
        } else {
            -1.0
        }
    })
}
