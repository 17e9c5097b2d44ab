#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::{Array1, Array2};

use raceway::simulation::direction::Direction;
use raceway::simulation::network::{Layer, Network, SENSOR_COUNT, squash};

/// A two-layer network whose output is decided entirely by the output
/// biases: all weights are zero, so the arg-max lands on `favoured`.
fn biased_network(favoured: usize) -> Network {
    let mut output_biases = Array1::zeros(Direction::COUNT);
    output_biases[favoured] = 1.0;

    Network::from_layers(vec![
        Layer::new(
            Some(Array2::zeros((Direction::COUNT, SENSOR_COUNT))),
            Array1::zeros(SENSOR_COUNT),
        ),
        Layer::new(None, output_biases),
    ])
}

fn forward_outputs_match(a: &Network, b: &Network, inputs: &[[i32; SENSOR_COUNT]]) -> bool {
    inputs
        .iter()
        .all(|input| a.predict_move(input) == b.predict_move(input))
}

#[test]
fn test_predict_is_deterministic() {
    let network = Network::new(&[5, 5, 5, 4], 1.0);
    let distances = [120, 40, 7, 300, 999];

    let first = network.predict_move(&distances);
    for _ in 0..20 {
        assert_eq!(network.predict_move(&distances), first);
    }
}

#[test]
fn test_each_output_neuron_maps_to_its_direction() {
    for (index, direction) in Direction::ALL.iter().enumerate() {
        let network = biased_network(index);
        assert_eq!(network.predict_move(&[10, 10, 10, 10, 10]), *direction);
    }
}

#[test]
fn test_ties_break_to_the_lowest_index() {
    // All weights and biases zero: every output neuron emits exactly 0.
    let network = Network::from_layers(vec![
        Layer::new(
            Some(Array2::zeros((Direction::COUNT, SENSOR_COUNT))),
            Array1::zeros(SENSOR_COUNT),
        ),
        Layer::new(None, Array1::zeros(Direction::COUNT)),
    ]);

    assert_eq!(network.predict_move(&[50, 60, 70, 80, 90]), Direction::Forward);
}

#[test]
fn test_bias_is_added_after_squashing() {
    // squash(1.0) = 0.5; with bias 0.5 the emitted value is exactly 1.0.
    // Squashing before adding the bias would give squash(1.5) = 0.6.
    let layer = Layer::new(None, Array1::from_vec(vec![0.5]));
    let values = layer.values(&Array1::from_vec(vec![1.0]));

    assert_eq!(values[0], 1.0);
}

#[test]
fn test_squash_is_bounded() {
    for value in [-1.0e6_f32, -3.0, -0.5, 0.0, 0.5, 3.0, 1.0e6] {
        let squashed = squash(value);
        assert!(squashed > -1.0 && squashed < 1.0);
    }
    assert_eq!(squash(0.0), 0.0);
}

#[test]
fn test_mutate_rate_zero_is_an_exact_clone() {
    let donor = Network::new(&[5, 8, 4], 1.0);
    let mut recipient = Network::new(&[5, 8, 4], 1.0);

    recipient.mutate(&donor.layers(), 0.0, 0.5);

    for (ours, theirs) in recipient.layers().iter().zip(donor.layers().iter()) {
        assert_eq!(ours.biases(), theirs.biases());
        assert_eq!(ours.weights(), theirs.weights());
    }

    let probes = [
        [0, 0, 0, 0, 0],
        [10, 20, 30, 40, 50],
        [1000, 1, 1000, 1, 1000],
        [5, 5, 5, 5, 5],
    ];
    assert!(forward_outputs_match(&recipient, &donor, &probes));
}

#[test]
fn test_mutate_rate_one_touches_every_parameter() {
    let donor = Network::new(&[5, 8, 4], 1.0);
    let mut recipient = Network::new(&[5, 8, 4], 1.0);

    recipient.mutate(&donor.layers(), 1.0, 0.5);

    for (ours, theirs) in recipient.layers().iter().zip(donor.layers().iter()) {
        for (a, b) in ours.biases().iter().zip(theirs.biases().iter()) {
            assert_ne!(a, b);
        }
        if let (Some(ours), Some(theirs)) = (ours.weights(), theirs.weights()) {
            for (a, b) in ours.iter().zip(theirs.iter()) {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
#[should_panic(expected = "population topology must be uniform")]
fn test_mutate_with_mismatched_topology_panics() {
    let donor = Network::new(&[5, 8, 4], 1.0);
    let mut recipient = Network::new(&[5, 3, 4], 1.0);

    recipient.mutate(&donor.layers(), 0.5, 0.5);
}

#[test]
fn test_setup_weights_stays_in_range() {
    let mut network = Network::new(&[5, 6, 4], 1.0);
    network.setup_weights(1.0);

    for layer in network.layers() {
        for bias in layer.biases() {
            assert!((-1.0..=1.0).contains(bias));
        }
        if let Some(weights) = layer.weights() {
            for weight in weights {
                assert!((-1.0..=1.0).contains(weight));
            }
        }
    }
}

#[test]
fn test_setup_weights_rerandomizes() {
    let mut network = Network::new(&[5, 8, 4], 1.0);
    let before = network.layers();

    network.setup_weights(1.0);

    let after = network.layers();
    let mut changed = 0;
    for (a, b) in before.iter().zip(after.iter()) {
        changed += a
            .biases()
            .iter()
            .zip(b.biases().iter())
            .filter(|(x, y)| x != y)
            .count();
    }
    assert!(changed > 0, "re-randomization should move the biases");
}

#[test]
fn test_layer_snapshot_is_a_deep_copy() {
    let network = Network::new(&[5, 5, 4], 1.0);
    let mut snapshot = network.layers();

    // Mutating the snapshot must not change the live network.
    let mut other = Network::new(&[5, 5, 4], 1.0);
    other.mutate(&snapshot, 1.0, 0.5);
    snapshot.clear();

    let distances = [10, 20, 30, 40, 50];
    let before = network.predict_move(&distances);
    assert_eq!(network.predict_move(&distances), before);
    assert_eq!(network.layers().len(), 3);
}
