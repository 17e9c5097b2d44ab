//! The closed set of actions a network can choose for its vehicle.

use serde::{Deserialize, Serialize};

/// A driving action, one per output neuron.
///
/// The output layer has exactly [`Direction::COUNT`] neurons; the neuron with
/// the highest value decides the action, ties going to the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Accelerate along the current heading.
    Forward,
    /// Accelerate against the current heading.
    Backward,
    /// Rotate counter-clockwise, proportionally to the current speed.
    RotateLeft,
    /// Rotate clockwise, proportionally to the current speed.
    RotateRight,
}

impl Direction {
    /// Number of actions, which is also the output-layer width.
    pub const COUNT: usize = 4;

    /// All actions in output-neuron order.
    pub const ALL: [Direction; Self::COUNT] = [
        Direction::Forward,
        Direction::Backward,
        Direction::RotateLeft,
        Direction::RotateRight,
    ];

    /// Maps an output-neuron index to its action.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}
