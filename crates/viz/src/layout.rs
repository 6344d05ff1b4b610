//! Force-directed (Fruchterman-Reingold) layout for the neural graph.
//!
//! Nodes repel each other with strength `k² / d` and every edge pulls its
//! endpoints together with `d² / k`, regardless of direction or weight. The
//! system is cooled linearly over a fixed number of iterations, then centred
//! on the origin and rescaled so the largest coordinate equals `scale`.

use bevy::math::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sim_snapshot::NeuralGraph;

use crate::config::NetworkViewConfig;

/// Minimum distance used in force terms, keeping coincident nodes finite.
const MIN_DISTANCE: f32 = 0.01;

/// Spring layout parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringLayout {
    /// Optimal distance between nodes.
    pub k: f32,
    /// Largest absolute coordinate after rescaling.
    pub scale: f32,
    /// Number of cooling iterations.
    pub iterations: usize,
    /// RNG seed for the initial positions; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::from_config(&NetworkViewConfig::default())
    }
}

impl SpringLayout {
    pub fn from_config(config: &NetworkViewConfig) -> Self {
        Self {
            k: config.k,
            scale: config.scale,
            iterations: config.iterations,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Computes one position per node, index-aligned with `graph.nodes()`.
    pub fn compute(&self, graph: &NeuralGraph) -> Vec<Vec2> {
        let n = graph.node_count();
        match n {
            0 => return Vec::new(),
            1 => return vec![Vec2::ZERO],
            _ => {}
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut positions: Vec<Vec2> = (0..n)
            .map(|_| Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()))
            .collect();

        let mut adjacent = vec![false; n * n];
        for edge in graph.edges() {
            adjacent[edge.source * n + edge.target] = true;
            adjacent[edge.target * n + edge.source] = true;
        }

        let k = if self.k > 0.0 { self.k } else { 1.0 };
        let mut temperature = 0.1 * spread(&positions);
        let cooling = temperature / (self.iterations as f32 + 1.0);

        for _ in 0..self.iterations {
            let displacement: Vec<Vec2> = (0..n)
                .map(|i| {
                    (0..n).filter(|&j| j != i).fold(Vec2::ZERO, |acc, j| {
                        let delta = positions[i] - positions[j];
                        let distance = delta.length().max(MIN_DISTANCE);
                        let attraction = if adjacent[i * n + j] { distance / k } else { 0.0 };
                        acc + delta * (k * k / (distance * distance) - attraction)
                    })
                })
                .collect();

            for (position, disp) in positions.iter_mut().zip(displacement) {
                let length = disp.length().max(MIN_DISTANCE);
                *position += disp * (temperature / length);
            }
            temperature -= cooling;
        }

        rescale(&mut positions, self.scale);
        positions
    }
}

/// Largest extent of the positions along either axis.
fn spread(positions: &[Vec2]) -> f32 {
    let (min, max) = positions.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    (max - min).max_element()
}

/// Centres positions on the origin and scales the largest coordinate to `scale`.
pub fn rescale(positions: &mut [Vec2], scale: f32) {
    if positions.is_empty() {
        return;
    }
    let mean = positions.iter().copied().sum::<Vec2>() / positions.len() as f32;
    let mut limit = 0.0f32;
    for position in positions.iter_mut() {
        *position -= mean;
        limit = limit.max(position.abs().max_element());
    }
    if limit > 0.0 {
        for position in positions.iter_mut() {
            *position *= scale / limit;
        }
    }
}
