#![allow(missing_docs)]

use raceway::simulation::geometry::{BodyFrame, Pose};
use raceway::simulation::sensors::SensorArray;
use raceway::simulation::track::{Rgb, Track, TrackColors, TrackImage, TrackInfo, Waypoint};

use geo::coord;

const ROAD: Rgb = Rgb::new(128, 128, 128);
const GRASS: Rgb = Rgb::new(20, 96, 20);

fn colors() -> TrackColors {
    TrackColors {
        road: ROAD,
        line: Rgb::new(240, 240, 240),
        waypoint: Rgb::new(96, 96, 160),
        finish: Rgb::new(255, 255, 255),
    }
}

/// A track whose surface is decided per pixel by `paint`.
fn track_from_fn(
    width: u32,
    height: u32,
    start: Pose,
    paint: impl Fn(u32, u32) -> Rgb,
) -> Track {
    let image = TrackImage::from_fn(width, height, paint);
    let waypoints = vec![Waypoint::new(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 1.0, y: 0.0 },
    )];
    let info = TrackInfo::new(start, (1.0, 1.0), colors(), waypoints).unwrap();
    Track::new(image, info).unwrap()
}

fn frame() -> BodyFrame {
    BodyFrame {
        width: 10.0,
        height: 20.0,
        scale: (1.0, 1.0),
    }
}

#[test]
fn test_lengths_stay_within_the_march_cap() {
    // All-road image: every ray runs to an image edge or the cap.
    let pose = Pose::new(100.0, 100.0, 37.0);
    let track = track_from_fn(200, 200, pose, |_, _| ROAD);

    let mut sensors = SensorArray::new();
    sensors.update(&pose, &frame(), &track, 1000);

    for length in sensors.lengths() {
        assert!((0..=1000).contains(&length), "length {length} out of range");
    }
}

#[test]
fn test_lengths_stay_capped_on_a_huge_open_image() {
    // A wide-open surface larger than the cap in every direction.
    let pose = Pose::new(1500.0, 1500.0, 0.0);
    let track = track_from_fn(3000, 3000, pose, |_, _| ROAD);

    let mut sensors = SensorArray::new();
    sensors.update(&pose, &frame(), &track, 1000);

    for length in sensors.lengths() {
        assert!((0..=1000).contains(&length), "length {length} out of range");
    }
}

#[test]
fn test_front_ray_stops_at_a_wall() {
    // Grass above y = 50, road below: the forward ray hits the wall.
    let pose = Pose::new(100.0, 100.0, 0.0);
    let track = track_from_fn(200, 200, pose, |_, y| if y < 50 { GRASS } else { ROAD });

    let mut sensors = SensorArray::new();
    sensors.update(&pose, &frame(), &track, 1000);

    // The body front sits at y = 90, the wall 40 pixels ahead. The march
    // coarsens with distance, so allow a generous band around 40.
    let front = sensors.lengths()[0];
    assert!(
        (30..=70).contains(&front),
        "front ray measured {front}, expected close to 40"
    );
}

#[test]
fn test_blocked_vehicle_reads_near_zero() {
    // Start on grass: every ray terminates immediately.
    let pose = Pose::new(100.0, 100.0, 0.0);
    let track = track_from_fn(200, 200, pose, |_, _| GRASS);

    let mut sensors = SensorArray::new();
    sensors.update(&pose, &frame(), &track, 1000);

    for length in sensors.lengths() {
        assert!(length <= 2, "ray on blocked ground measured {length}");
    }
}

#[test]
fn test_unchanged_pose_reuses_cached_rays() {
    let pose = Pose::new(100.0, 100.0, 0.0);
    let open = track_from_fn(200, 200, pose, |_, _| ROAD);
    let blocked = track_from_fn(200, 200, pose, |_, _| GRASS);

    let mut sensors = SensorArray::new();
    sensors.update(&pose, &frame(), &open, 1000);
    let first = sensors.lengths();

    // Same pose, different surface: the cache answers, nothing re-marches.
    sensors.update(&pose, &frame(), &blocked, 1000);
    assert_eq!(sensors.lengths(), first);

    // A new pose misses the cache and picks up the blocked surface.
    let moved = Pose::new(101.0, 100.0, 0.0);
    sensors.update(&moved, &frame(), &blocked, 1000);
    assert!(sensors.lengths().iter().all(|&length| length <= 2));

    // Invalidation forces a re-march even at an unchanged pose.
    sensors.update(&moved, &frame(), &open, 1000);
    assert!(sensors.lengths().iter().all(|&length| length <= 2));
    sensors.invalidate();
    sensors.update(&moved, &frame(), &open, 1000);
    assert!(sensors.lengths()[0] > 2);
}
