//! Feed-forward network implementation for vehicle control.
//!
//! A network is an ordered stack of dense layers evaluated front to back
//! with support for the genetic operations of the evolution controller:
//! full re-randomization, and cloning-with-mutation from a donor snapshot.
//! There is no loss function and no back-propagation; weights only ever
//! change through mutation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::direction::Direction;

pub mod layer;

pub use layer::{Layer, squash};

/// Number of distance sensors, which is also the input-layer width.
pub const SENSOR_COUNT: usize = 5;

/// A fixed-topology feed-forward network.
///
/// Topology (layer count and widths) is set at construction and identical
/// across every network in a population; only weights and biases vary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network with random weights.
    ///
    /// `layer_sizes` lists the width of each layer, input first. The input
    /// layer must match the sensor count and the output layer the action
    /// count; anything else is a configuration error.
    pub fn new(layer_sizes: &[usize], weight_range: f32) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "a network needs at least an input and an output layer"
        );
        assert_eq!(
            layer_sizes[0], SENSOR_COUNT,
            "input layer width must match the sensor count"
        );
        assert_eq!(
            *layer_sizes.last().unwrap(),
            Direction::COUNT,
            "output layer width must match the action count"
        );

        let layers = (0..layer_sizes.len())
            .map(|i| {
                Layer::new_random(layer_sizes[i], layer_sizes.get(i + 1).copied(), weight_range)
            })
            .collect();

        Self { layers }
    }

    /// Creates a network from explicit layers.
    ///
    /// Useful for rebuilding a network from stored parameters. The layer
    /// stack must still describe a valid topology: sensor-count inputs,
    /// action-count outputs.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        assert!(
            layers.len() >= 2,
            "a network needs at least an input and an output layer"
        );
        assert_eq!(
            layers[0].len(),
            SENSOR_COUNT,
            "input layer width must match the sensor count"
        );
        assert_eq!(
            layers.last().unwrap().len(),
            Direction::COUNT,
            "output layer width must match the action count"
        );
        Self { layers }
    }

    /// Re-randomizes every weight and bias in `[-range, range]`.
    ///
    /// Used when a whole generation failed to score: there is no viable
    /// ancestor to breed from, so the population starts over.
    pub fn setup_weights(&mut self, range: f32) {
        for layer in &mut self.layers {
            layer.randomize(range);
        }
    }

    /// Chooses a driving action for the given sensor distances.
    ///
    /// Clears all accumulators, loads the raw distances into the input
    /// layer (no activation on load), propagates layer by layer and picks
    /// the highest-valued output neuron, ties going to the lowest index.
    /// Deterministic: identical weights and input always yield the same
    /// action.
    pub fn predict_move(&self, distances: &[i32; SENSOR_COUNT]) -> Direction {
        let mut accumulators = Array1::from_iter(distances.iter().map(|&d| d as f32));

        // Strict layer order: layer N is fully propagated before N+1 is read.
        for layer in &self.layers {
            if let Some(weights) = layer.weights() {
                accumulators = weights.dot(&layer.values(&accumulators));
            }
        }

        let output = self
            .layers
            .last()
            .expect("network has layers")
            .values(&accumulators);

        let mut best = 0;
        for index in 1..output.len() {
            if output[index] > output[best] {
                best = index;
            }
        }
        Direction::from_index(best)
    }

    /// Copies the donor's weights and biases, then perturbs each parameter
    /// independently with probability `rate` by uniform noise in
    /// `[-span, span]`.
    ///
    /// `rate = 0` produces an exact clone of the donor; `rate = 1` leaves no
    /// parameter untouched. Panics when the donor topology differs from
    /// this network's.
    pub fn mutate(&mut self, donor_layers: &[Layer], rate: f32, span: f32) {
        assert_eq!(
            self.layers.len(),
            donor_layers.len(),
            "layer count differs from donor - population topology must be uniform"
        );
        for (layer, donor) in self.layers.iter_mut().zip(donor_layers) {
            layer.mutate_from(donor, rate, span);
        }
    }

    /// A deep snapshot of the layers, sufficient for another network to
    /// clone from.
    ///
    /// The snapshot shares nothing with this network: breeding from it
    /// cannot mutate the live donor.
    pub fn layers(&self) -> Vec<Layer> {
        self.layers.clone()
    }
}
