//! Distance-sensor ray marching against the track image.
//!
//! Five rays anchor to fixed offsets on the vehicle's body: front-centre,
//! the two front corners, and the two side midpoints. Each ray marches
//! outward in the body's local frame, transformed into world space sample
//! by sample, until it leaves the traversable surface or hits the march
//! cap. Near the body the march advances pixel by pixel; past an accuracy
//! threshold the step grows geometrically, trading far-field precision for
//! a bounded worst-case cost.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use serde::{Deserialize, Serialize};

use super::geometry::{BodyFrame, Pose};
use super::network::SENSOR_COUNT;
use super::track::Track;

/// A sensor ray in world space: origin and termination point.
pub type Ray = (Point<f32>, Point<f32>);

/// The five distance sensors of one vehicle, with their last readings.
///
/// Readings are cached against the pose they were computed for: a vehicle
/// that has not moved since the previous tick keeps its rays without
/// re-marching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorArray {
    rays: [Ray; SENSOR_COUNT],
    lengths: [i32; SENSOR_COUNT],
    cached_pose: Option<Pose>,
}

impl Default for SensorArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorArray {
    /// Creates an array with no readings yet.
    pub fn new() -> Self {
        let zero = Point::new(0.0, 0.0);
        Self {
            rays: [(zero, zero); SENSOR_COUNT],
            lengths: [0; SENSOR_COUNT],
            cached_pose: None,
        }
    }

    /// Recomputes all five rays for a pose, unless the pose is unchanged.
    pub fn update(&mut self, pose: &Pose, frame: &BodyFrame, track: &Track, max_march: i32) {
        if self.cached_pose.as_ref() == Some(pose) {
            return;
        }

        for index in 0..SENSOR_COUNT {
            let (ray, length) = march_ray(pose, frame, track, index, max_march);
            self.rays[index] = ray;
            self.lengths[index] = length;
        }
        self.cached_pose = Some(*pose);
    }

    /// Drops the cache so the next [`update`](Self::update) re-marches.
    pub fn invalidate(&mut self) {
        self.cached_pose = None;
    }

    /// The last ray readings in pixels, one per sensor.
    pub fn lengths(&self) -> [i32; SENSOR_COUNT] {
        self.lengths
    }

    /// The last world-space ray segments, for display.
    pub fn rays(&self) -> &[Ray; SENSOR_COUNT] {
        &self.rays
    }
}

/// Local-frame sample point of a ray at a given march distance.
///
/// The front rays march up and diagonally out of the body top; the side
/// rays march straight out of the left and right edges.
fn ray_local(frame: &BodyFrame, index: usize, march: i32) -> (f32, f32) {
    let m = march as f32;
    let w = frame.width;
    let h = frame.height;
    match index {
        // front-centre, straight ahead
        0 => (w * 0.5, -m),
        // front-right corner, diagonal
        1 => (w + m * 0.5, -m * 0.5),
        // front-left corner, diagonal
        2 => (-m * 0.5, -m * 0.5),
        // left-side midpoint, straight out
        3 => (-m, h * 0.5),
        // right-side midpoint, straight out
        4 => (w + m, h * 0.5),
        _ => unreachable!("sensor index out of range"),
    }
}

/// Marches one ray outward until it leaves the traversable surface or hits
/// the cap, returning the world-space ray and its integer pixel length.
///
/// Every sampled coordinate is clamped onto the image, and the reported
/// length is capped at `max_march`, so a reading always lies in
/// `[0, max_march]` even at image edges.
fn march_ray(
    pose: &Pose,
    frame: &BodyFrame,
    track: &Track,
    index: usize,
    max_march: i32,
) -> (Ray, i32) {
    let (ox, oy) = ray_local(frame, index, 0);
    let origin = frame.transform_point(pose, ox, oy);

    let accuracy_threshold = max_march / 50;
    let mut march: i32 = 0;
    let mut sample;

    loop {
        let (lx, ly) = ray_local(frame, index, march);
        let world = frame.transform_point(pose, lx, ly);
        sample = track
            .image
            .clamp_coords(world.x() as i32, world.y() as i32);

        if march >= max_march {
            break;
        }
        // Get less accurate the further out the march is
        march = if march >= accuracy_threshold {
            (march + march / 2).max(march + 1)
        } else {
            march + 1
        };

        if !track
            .info
            .colors
            .is_traversable(track.image.pixel(sample.0, sample.1))
        {
            break;
        }
    }

    let end = Point::new(sample.0 as f32, sample.1 as f32);
    let length = (Euclidean.distance(origin, end) as i32).min(max_march);
    ((origin, end), length)
}
