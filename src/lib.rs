//! # Raceway - Neuro-evolution Driving Simulation
//!
//! A simulation of vehicles that learn to drive laps around a pixel-based
//! track. Each vehicle is steered by a small feed-forward network whose
//! weights are evolved across generations by cloning and mutating the best
//! performer - no gradients, no back-propagation.
//!
//! ## Features
//!
//! - Feed-forward networks with a fast sigmoid-like squashing function
//! - Five-ray distance sensors marched over the track's pixel buffer
//! - Waypoint and lap tracking with a multiplicative progress score
//! - Boundary-collision and stuck detection
//! - Elitist clone-and-mutate evolution with a dead-population escape
//! - Fixed-timestep stepping decoupled from any external refresh rate
//! - Parallel population updates with rayon, plus a worker-group runner
//! - Save/load of a full population state
//!
//! ## Core Modules
//!
//! - [`simulation::network`] - Network forward pass, mutation and cloning
//! - [`simulation::agent`] - Vehicle behavior and state machine
//! - [`simulation::sensors`] - Ray-cast distance sensors
//! - [`simulation::population`] - Generational evolution controller
//! - [`simulation::track`] - Track pixels, colours and metadata

/// Core simulation logic and data structures.
pub mod simulation {
    /// Vehicle behavior, motion, collision and lifecycle.
    pub mod agent;
    /// Fixed-timestep tick accumulator.
    pub mod clock;
    /// The closed set of actions a network can choose.
    pub mod direction;
    /// Pose transforms, oriented boxes and segment intersection.
    pub mod geometry;
    /// Feed-forward network implementation for vehicle control.
    pub mod network;
    /// Simulation parameters.
    pub mod params;
    /// Population stepping and generational evolution.
    pub mod population;
    /// Waypoint and lap progress bookkeeping.
    pub mod progress;
    /// Worker-group orchestration for driving a population on threads.
    pub mod runner;
    /// Distance-sensor ray marching against the track image.
    pub mod sensors;
    /// Track pixel buffer, colour classes and metadata.
    pub mod track;
}
