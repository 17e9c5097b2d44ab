//! Headless demo: evolve a population of vehicles around a procedural
//! rectangular ring track and report progress per generation.

use geo::coord;

use raceway::simulation::geometry::Pose;
use raceway::simulation::params::Params;
use raceway::simulation::population::Population;
use raceway::simulation::track::{Rgb, Track, TrackColors, TrackImage, TrackInfo, Waypoint};

const GENERATIONS: u32 = 20;
const MAX_POLLS: usize = 2_000_000;

const GRASS: Rgb = Rgb::new(20, 96, 20);
const ROAD: Rgb = Rgb::new(128, 128, 128);
const LINE: Rgb = Rgb::new(240, 240, 240);
const WAYPOINT: Rgb = Rgb::new(96, 96, 160);
const FINISH: Rgb = Rgb::new(255, 255, 255);

/// Builds a 400x400 ring track: a 100px-wide road band around a grass
/// centre, three waypoint segments crossing the band, and a finish strip
/// on the bottom straight.
fn build_ring_track() -> Result<Track, Box<dyn std::error::Error>> {
    let image = TrackImage::from_fn(400, 400, |x, y| {
        let in_outer = (40..360).contains(&x) && (40..360).contains(&y);
        let in_inner = (140..260).contains(&x) && (140..260).contains(&y);
        if !in_outer || in_inner {
            GRASS
        } else if (180..188).contains(&x) && (260..360).contains(&y) {
            FINISH
        } else {
            ROAD
        }
    });

    let waypoints = vec![
        // right straight
        Waypoint::new(coord! { x: 260.0, y: 200.0 }, coord! { x: 360.0, y: 200.0 }),
        // top straight
        Waypoint::new(coord! { x: 200.0, y: 40.0 }, coord! { x: 200.0, y: 140.0 }),
        // left straight
        Waypoint::new(coord! { x: 40.0, y: 200.0 }, coord! { x: 140.0, y: 200.0 }),
    ];

    let colors = TrackColors {
        road: ROAD,
        line: LINE,
        waypoint: WAYPOINT,
        finish: FINISH,
    };

    // Start on the bottom straight facing the direction of travel (+x).
    let info = TrackInfo::new(Pose::new(220.0, 310.0, 90.0), (1.0, 1.0), colors, waypoints)?;

    Track::new(image, info)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = Params::default();
    let track = build_ring_track()?;

    let mut population = Population::new(&track, &params);
    println!(
        "Created {} vehicles on a {}x{} track with {} waypoints",
        population.agents.len(),
        track.image.width(),
        track.image.height(),
        track.info.waypoints.len()
    );

    for _ in 0..MAX_POLLS {
        if population.generation >= GENERATIONS {
            break;
        }
        population.run(&track, &params, 0.05);
    }

    println!(
        "Finished after {} generations, {} vehicles alive",
        population.generation,
        population.alive_count()
    );

    population.save_to_file("population.json")?;
    println!("Saved population state to population.json");

    Ok(())
}
