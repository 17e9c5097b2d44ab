//! Worker-group orchestration for driving a population on threads.
//!
//! Partitions the population into disjoint, statically assigned groups and
//! steps each group from its own worker thread on a wall-clock cadence.
//! Workers never share an agent, and the whole track is read-only, so the
//! only synchronization point is the generation boundary: a worker retires
//! once its group is fully dead (or a stop was requested), and joining all
//! workers is what lets the evolution controller observe a consistent
//! all-dead population rather than a partial, stale view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::agent::Agent;
use super::params::Params;
use super::population::Population;
use super::track::Track;

/// Drives the population generation after generation until `stop` is set.
///
/// Shutdown is cooperative: workers check the flag between ticks and the
/// call returns only after every worker has reached its join point.
pub fn run(
    population: &mut Population,
    track: &Track,
    params: &Params,
    num_groups: usize,
    stop: &AtomicBool,
) {
    if population.agents.is_empty() {
        return;
    }

    while !stop.load(Ordering::Relaxed) {
        run_generation(population, track, params, num_groups, stop);

        // A stop request can end a generation early, leaving survivors;
        // evolution only runs on a genuinely finished generation.
        if population.all_dead() {
            population.evolve(track, params);
        }
    }
}

/// Steps the population until every agent is dead or `stop` is set.
///
/// Each worker owns a disjoint chunk of agents and feeds them real elapsed
/// time; the per-agent fixed-timestep accumulator turns that into whole
/// simulation ticks regardless of the polling cadence.
pub fn run_generation(
    population: &mut Population,
    track: &Track,
    params: &Params,
    num_groups: usize,
    stop: &AtomicBool,
) {
    let group_size = population.agents.len().div_ceil(num_groups.max(1));
    if group_size == 0 {
        return;
    }

    let pause = Duration::from_secs_f32(params.tick_seconds * 0.5);

    thread::scope(|scope| {
        for group in population.agents.chunks_mut(group_size) {
            scope.spawn(move || {
                let mut last = Instant::now();
                while !stop.load(Ordering::Relaxed) && !group.iter().all(Agent::is_dead) {
                    let now = Instant::now();
                    let dt = now.duration_since(last).as_secs_f32();
                    last = now;

                    for agent in group.iter_mut() {
                        agent.run(track, params, dt);
                    }

                    thread::sleep(pause);
                }
            });
        }
    });
}
