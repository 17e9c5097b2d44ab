//! Population stepping and generational evolution.
//!
//! The population owns every agent and plays the role of evolution
//! controller: it steps agents in parallel with rayon, observes when the
//! whole generation has died, and then rewrites the population's networks
//! from the winner before reviving everyone.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::network::Network;
use super::params::Params;
use super::track::Track;

/// The lowest score any agent can have: zero laps, zero waypoints.
///
/// A winning score at this floor means nobody ever made progress.
pub const MIN_SCORE: u32 = 1;

/// The full set of agents simulated between evolution updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    /// All agents, dead or alive.
    pub agents: Vec<Agent>,
    /// Completed generation count.
    pub generation: u32,
}

impl Population {
    /// Creates a population of freshly seeded agents at the track start.
    pub fn new(track: &Track, params: &Params) -> Self {
        let agents = (0..params.n_agents)
            .map(|id| {
                let network = Network::new(&params.layer_sizes, params.weight_range);
                Agent::new(id, network, track, params)
            })
            .collect();

        Self {
            agents,
            generation: 0,
        }
    }

    /// Advances every agent by `dt` seconds of elapsed time, in parallel,
    /// then runs evolution if the generation has ended.
    ///
    /// The parallel phase only ever touches disjoint agents; the join
    /// before the all-dead check is what guarantees evolution never acts
    /// on a partial view of the population.
    pub fn run(&mut self, track: &Track, params: &Params, dt: f32) {
        self.agents
            .par_iter_mut()
            .for_each(|agent| agent.run(track, params, dt));

        if self.all_dead() {
            self.evolve(track, params);
        }
    }

    /// Whether every agent in the population is dead.
    pub fn all_dead(&self) -> bool {
        !self.agents.is_empty() && self.agents.iter().all(Agent::is_dead)
    }

    /// Number of agents still alive.
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|agent| !agent.is_dead()).count()
    }

    /// The current best agent: highest score, ties broken by the lower
    /// time-alive.
    pub fn best(&self) -> Option<&Agent> {
        if self.agents.is_empty() {
            return None;
        }
        Some(&self.agents[self.winner_index()])
    }

    fn winner_index(&self) -> usize {
        let mut winner = 0;
        for index in 1..self.agents.len() {
            let challenger = &self.agents[index];
            let current = &self.agents[winner];
            let better = challenger.score() > current.score()
                || (challenger.score() == current.score()
                    && challenger.time_alive < current.time_alive);
            if better {
                winner = index;
            }
        }
        winner
    }

    /// Runs one generation update. Callers must ensure every agent is dead.
    ///
    /// The winner keeps its network untouched while every other agent
    /// clones and mutates it. When even the winner never scored, the whole
    /// population re-randomizes instead - there is no ancestor worth
    /// breeding from. Either way all agents are revived at the start pose.
    pub fn evolve(&mut self, track: &Track, params: &Params) {
        self.generation += 1;

        let winner = self.winner_index();

        if self.agents[winner].score() <= MIN_SCORE {
            println!(
                "generation {}: no agent made progress, re-seeding all networks",
                self.generation
            );
            for agent in &mut self.agents {
                agent.network.setup_weights(params.weight_range);
                agent.reset(track, params);
            }
            return;
        }

        println!(
            "generation {}: best agent {} scored {} in {:.1}s",
            self.generation,
            self.agents[winner].id,
            self.agents[winner].score(),
            self.agents[winner].time_alive
        );

        let donor_layers = self.agents[winner].network.layers();
        for (index, agent) in self.agents.iter_mut().enumerate() {
            if index != winner {
                agent
                    .network
                    .mutate(&donor_layers, params.mutation_rate, params.mutation_span);
            }
            agent.reset(track, params);
        }
    }

    /// Saves the population state to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a population state from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let population = serde_json::from_str(&json)?;
        Ok(population)
    }
}
