//! Vehicle behavior, motion, collision and lifecycle management.
//!
//! An agent owns its pose, speed, lap progress and control network. Each
//! simulation tick it reads its distance sensors, asks the network for a
//! driving action, applies the action, and then checks collisions and
//! waypoint crossings. A crashed or stuck agent stays dead until the
//! evolution controller resets it.

use geo::Point;
use serde::{Deserialize, Serialize};

use super::clock::TickAccumulator;
use super::direction::Direction;
use super::geometry::{BodyFrame, OrientedBox, Pose, segments_intersect};
use super::network::Network;
use super::params::Params;
use super::progress::LapProgress;
use super::sensors::SensorArray;
use super::track::Track;

/// A simulated vehicle with a feed-forward control network.
///
/// Agents can:
/// - Accelerate forward/backward and rotate proportionally to their speed
/// - Sense the distance to the track boundary along five rays
/// - Cross waypoints and complete laps to raise their score
/// - Die on boundary contact or when stuck, until `reset()` revives them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier within the population.
    pub id: usize,
    /// The control network. Topology is shared by the whole population.
    pub network: Network,
    /// Current pose (position and rotation).
    pub pose: Pose,
    /// Body shape and track scale.
    pub frame: BodyFrame,
    /// Signed scalar speed along the heading.
    pub speed: f32,
    /// Waypoint and lap progress this life.
    pub progress: LapProgress,
    /// The five distance sensors.
    pub sensors: SensorArray,
    /// World-space bounding-box sample points.
    pub bounding_box: OrientedBox,
    /// Seconds survived since the last reset.
    pub time_alive: f32,
    dead: bool,
    move_count: usize,
    last_score: u32,
    previous_position: Point<f32>,
    clock: TickAccumulator,
}

impl Agent {
    /// Creates an agent at the track's start pose.
    pub fn new(id: usize, network: Network, track: &Track, params: &Params) -> Self {
        let pose = track.info.start_pose;
        let frame = BodyFrame {
            width: params.body_width,
            height: params.body_height,
            scale: track.info.scale,
        };
        let bounding_box = OrientedBox::compute(&pose, &frame);
        let mut sensors = SensorArray::new();
        sensors.update(&pose, &frame, track, params.max_march);

        Self {
            id,
            network,
            pose,
            frame,
            speed: 0.0,
            progress: LapProgress::new(track.info.waypoints.len()),
            sensors,
            bounding_box,
            time_alive: 0.0,
            dead: false,
            move_count: 0,
            last_score: 0,
            previous_position: pose.position,
            clock: TickAccumulator::new(params.tick_seconds),
        }
    }

    /// Banks `dt` seconds of elapsed time and runs the resulting whole
    /// ticks.
    ///
    /// Safe to call at any external cadence; the fixed timestep decouples
    /// the simulation rate from the caller's refresh rate. Not reentrant
    /// for the same agent, which is the only concurrency requirement.
    pub fn run(&mut self, track: &Track, params: &Params, dt: f32) {
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.step(track, params);
        }
    }

    /// Runs exactly one simulation tick.
    ///
    /// Dead agents ignore all input until [`reset`](Self::reset): pose,
    /// score and waypoint state stay frozen.
    pub fn step(&mut self, track: &Track, params: &Params) {
        if self.dead {
            return;
        }

        self.time_alive += self.clock.tick_seconds();

        let direction = self.network.predict_move(&self.sensors.lengths());
        self.apply_move(direction, track, params);

        self.move_count += 1;
        if self.move_count % params.stuck_check_interval == 0 {
            self.check_stuck(params);
        }
    }

    /// Applies one driving action, then moves and checks collisions.
    fn apply_move(&mut self, direction: Direction, track: &Track, params: &Params) {
        match direction {
            Direction::Forward => {
                self.speed = (self.speed + params.move_speed).min(params.max_speed);
            }
            Direction::Backward => {
                self.speed = (self.speed - params.move_speed).max(-params.max_speed);
            }
            // Rotation scales with speed: a stationary vehicle cannot spin.
            Direction::RotateLeft => {
                self.pose.rotate(-self.speed * params.rotate_speed_ratio);
            }
            Direction::RotateRight => {
                self.pose.rotate(self.speed * params.rotate_speed_ratio);
            }
        }

        // Below the deadband the vehicle does not translate, and geometry
        // and collision state keep their previous tick's values.
        if self.speed.abs() < params.speed_deadband {
            return;
        }

        self.pose.translate_along_heading(self.speed);

        self.bounding_box = OrientedBox::compute(&self.pose, &self.frame);
        self.sensors
            .update(&self.pose, &self.frame, track, params.max_march);
        self.check_boundary(track);
        self.check_waypoints(track);
    }

    /// Kills the agent when any bounding-box sample point has left the
    /// traversable surface. Off-image points count as boundary.
    fn check_boundary(&mut self, track: &Track) {
        for point in &self.bounding_box.points {
            let on_surface = track
                .image
                .pixel_at(*point)
                .is_some_and(|pixel| track.info.colors.is_traversable(pixel));
            if !on_surface {
                self.kill();
                break;
            }
        }
    }

    /// Tests the box edges against every unvisited waypoint, or checks for
    /// lap completion once all waypoints are visited.
    ///
    /// At most one waypoint is marked per tick; visiting order is free,
    /// only exhaustive coverage counts towards the lap.
    fn check_waypoints(&mut self, track: &Track) {
        if self.progress.is_complete() {
            self.advance_lap(track);
            return;
        }

        let edges = self.bounding_box.edges();
        'waypoints: for (index, waypoint) in track.info.waypoints.iter().enumerate() {
            if self.progress.is_visited(index) {
                continue;
            }
            for edge in &edges {
                if segments_intersect(waypoint, edge) {
                    self.progress.visit(index);
                    break 'waypoints;
                }
            }
        }
    }

    /// Completes the lap when the vehicle stands on the finish strip with
    /// every waypoint visited. Otherwise lap count and visited state are
    /// left untouched.
    fn advance_lap(&mut self, track: &Track) {
        if !self.progress.is_complete() {
            return;
        }

        for point in &self.bounding_box.points {
            if track.image.pixel_at(*point) == Some(track.info.colors.finish) {
                self.progress.advance_lap();
                return;
            }
        }
    }

    /// Periodic stuck detection.
    ///
    /// Combats vehicles spamming LEFT & RIGHT or FORWARD & BACKWARD in
    /// place: death when the displacement since the previous check stays
    /// inside the tolerance on both axes, or when the score has not moved
    /// across a full progress window.
    fn check_stuck(&mut self, params: &Params) {
        let tolerance = params.stuck_tolerance();
        let dx = (self.pose.position.x() - self.previous_position.x()).abs();
        let dy = (self.pose.position.y() - self.previous_position.y()).abs();
        if dx < tolerance && dy < tolerance {
            self.kill();
        }

        if self.move_count >= params.progress_check_moves {
            self.move_count = 0;

            if self.score() == self.last_score {
                self.kill();
            } else {
                self.last_score = self.score();
            }
        }

        self.previous_position = self.pose.position;
    }

    /// Marks the agent dead. Its time-alive stops accumulating and every
    /// further [`step`](Self::step) is a no-op until [`reset`](Self::reset).
    pub fn kill(&mut self) {
        self.dead = true;
    }

    /// Whether the agent is dead.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// The progress score, `(laps + 1) * (waypoints visited + 1)`.
    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    /// Revives the agent at the track's start pose.
    ///
    /// Clears speed, progress, counters and banked time while preserving
    /// the network object - only evolution changes its weights.
    pub fn reset(&mut self, track: &Track, params: &Params) {
        self.pose = track.info.start_pose;
        self.speed = 0.0;
        self.dead = false;
        self.time_alive = 0.0;
        self.move_count = 0;
        self.last_score = 0;
        self.progress.reset();
        self.previous_position = self.pose.position;
        self.clock.clear();

        self.bounding_box = OrientedBox::compute(&self.pose, &self.frame);
        self.sensors.invalidate();
        self.sensors
            .update(&self.pose, &self.frame, track, params.max_march);
    }
}
