use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::network;

/// Simulation parameters that control vehicle and evolution behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Number of vehicles in the population.
    pub n_agents: usize,
    /// Network layer widths, input first. The first entry must equal the
    /// sensor count (5) and the last the action count (4).
    pub layer_sizes: Vec<usize>,
    /// Speed change applied per FORWARD/BACKWARD action.
    pub move_speed: f32,
    /// Speed magnitude cap.
    pub max_speed: f32,
    /// Degrees of rotation per unit of speed for ROTATE actions.
    pub rotate_speed_ratio: f32,
    /// Speed magnitude below which the vehicle does not translate.
    pub speed_deadband: f32,
    /// Fixed simulation tick duration in seconds.
    pub tick_seconds: f32,
    /// Vehicle body width in local units.
    pub body_width: f32,
    /// Vehicle body height in local units.
    pub body_height: f32,
    /// Hard cap on sensor ray march distance, in pixels.
    pub max_march: i32,
    /// Ticks between displacement-based stuck checks.
    pub stuck_check_interval: usize,
    /// Ticks without a score change before a vehicle counts as stuck.
    pub progress_check_moves: usize,
    /// Probability that any single weight or bias mutates during breeding.
    pub mutation_rate: f32,
    /// Half-width of the uniform noise added to a mutated parameter.
    pub mutation_span: f32,
    /// Half-width of the uniform range fresh weights are drawn from.
    pub weight_range: f32,
}

impl Default for Params {
    /// Defaults: 40 vehicles, a 5-5-5-4 network, 144 ticks per second.
    fn default() -> Self {
        let move_speed = 0.3;
        Self {
            n_agents: 40,
            layer_sizes: vec![network::SENSOR_COUNT, 5, 5, Direction::COUNT],
            move_speed,
            max_speed: move_speed * 4.0,
            rotate_speed_ratio: 2.5,
            speed_deadband: 0.1,
            tick_seconds: 1.0 / 144.0,
            body_width: 20.0,
            body_height: 40.0,
            max_march: 1000,
            stuck_check_interval: 100,
            progress_check_moves: 1000,
            mutation_rate: 0.1,
            mutation_span: 0.5,
            weight_range: 1.0,
        }
    }
}

impl Params {
    /// Displacement tolerance (per axis) for the stuck check.
    ///
    /// A vehicle that moved less than two speed increments in both axes
    /// since the last check is oscillating in place.
    pub fn stuck_tolerance(&self) -> f32 {
        self.move_speed * 2.0
    }
}
