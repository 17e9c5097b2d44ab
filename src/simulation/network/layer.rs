//! A single layer of a vehicle-control network.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The squashing function applied to a neuron's accumulated input.
///
/// A fast sigmoid approximation, bounded in (-1, 1).
#[inline]
pub fn squash(value: f32) -> f32 {
    value / (1.0 + value.abs())
}

/// One layer: per-neuron biases plus the dense weight matrix feeding the
/// next layer (`next_size` x `this_size`). The output layer has no weights.
///
/// Neurons are addressed by index and edges only run forward into the next
/// layer, so the graph is acyclic by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Outgoing weight matrix, `None` on the output layer.
    weights: Option<Array2<f32>>,
    /// Bias vector, one entry per neuron.
    biases: Array1<f32>,
}

impl Layer {
    /// Creates a layer from explicit parameters.
    ///
    /// `weights` is the outgoing matrix (`next_size` x `size`), or `None`
    /// for the output layer.
    pub fn new(weights: Option<Array2<f32>>, biases: Array1<f32>) -> Self {
        if let Some(weights) = &weights {
            assert_eq!(
                weights.ncols(),
                biases.len(),
                "outgoing weight columns must match the layer width"
            );
        }
        Self { weights, biases }
    }

    /// Creates a layer with random weights and biases in `[-range, range]`.
    ///
    /// `next_size` is `None` for the output layer.
    pub fn new_random(size: usize, next_size: Option<usize>, range: f32) -> Self {
        Self {
            weights: next_size
                .map(|next| Array2::random((next, size), Uniform::new(-range, range))),
            biases: Array1::random(size, Uniform::new(-range, range)),
        }
    }

    /// Number of neurons in this layer.
    pub fn len(&self) -> usize {
        self.biases.len()
    }

    /// Whether the layer is empty. Always false for a constructed network.
    pub fn is_empty(&self) -> bool {
        self.biases.is_empty()
    }

    /// The outgoing weight matrix, if this is not the output layer.
    pub fn weights(&self) -> Option<&Array2<f32>> {
        self.weights.as_ref()
    }

    /// The bias vector.
    pub fn biases(&self) -> &Array1<f32> {
        &self.biases
    }

    /// The values this layer emits for the given accumulated inputs.
    ///
    /// Each neuron emits `squash(accumulator) + bias`. The bias lands after
    /// the squashing, not before, and the sum itself is what propagates
    /// downstream; the signal is never squashed twice.
    #[inline]
    pub fn values(&self, accumulators: &Array1<f32>) -> Array1<f32> {
        accumulators.mapv(squash) + &self.biases
    }

    /// Re-randomizes every weight and bias in `[-range, range]`.
    pub fn randomize(&mut self, range: f32) {
        if let Some(weights) = &mut self.weights {
            *weights = Array2::random(weights.dim(), Uniform::new(-range, range));
        }
        self.biases = Array1::random(self.biases.len(), Uniform::new(-range, range));
    }

    /// Copies the donor's parameters, then perturbs each one independently
    /// with probability `rate` by uniform noise in `[-span, span]`.
    ///
    /// Panics when the donor's shape differs: a population's topology is
    /// uniform by invariant, and a mismatch is a programming error that must
    /// not be silently truncated or padded.
    pub fn mutate_from(&mut self, donor: &Layer, rate: f32, span: f32) {
        assert_eq!(
            self.biases.len(),
            donor.biases.len(),
            "layer width differs from donor - population topology must be uniform"
        );
        assert_eq!(
            self.weights.as_ref().map(|weights| weights.dim()),
            donor.weights.as_ref().map(|weights| weights.dim()),
            "weight shape differs from donor - population topology must be uniform"
        );

        let mut rng = rand::rng();

        self.biases.clone_from(&donor.biases);
        for bias in self.biases.iter_mut() {
            if rng.random::<f32>() < rate {
                *bias += rng.random_range(-span..span);
            }
        }

        if let (Some(weights), Some(donor_weights)) = (&mut self.weights, &donor.weights) {
            weights.clone_from(donor_weights);
            for weight in weights.iter_mut() {
                if rng.random::<f32>() < rate {
                    *weight += rng.random_range(-span..span);
                }
            }
        }
    }
}
