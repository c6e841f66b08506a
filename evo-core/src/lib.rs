//! Deterministic evolutionary grid simulation.
//!
//! A population of creatures lives on a bounded 2-D grid. Each carries
//! a bit-packed genome that compiles into a small recurrent network
//! wiring sensors to actions. Every tick each creature senses, thinks,
//! and acts; at the end of a generation a survival challenge decides
//! who breeds. All randomness flows through one seeded generator, so a
//! run is a pure function of configuration and seed.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use evo_config::SimConfig;
use evo_types::{CreatureId, CreatureInfo, GenerationSummary, SimStats};

mod action;
mod brain;
mod creature;
mod genome;
mod grid;
mod pheromone;
mod selection;
mod sense;
mod spawn;
mod turn;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use brain::{Brain, Connection, NUM_ACTIONS, NUM_SENSORS};
pub use creature::Creature;
pub use genome::{crossover, mutate_gene, mutate_genome, random_gene, random_genome, similarity};
pub use grid::World;
pub use pheromone::PheromoneField;
pub use sense::Sensor;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The simulation driver. Owns the grid, the population, and the one
/// random generator every stochastic decision draws from.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    seed: u64,
    rng: ChaCha8Rng,
    world: World,
    creatures: Vec<Creature>,
    next_creature_id: u64,
    generation_number: u32,
    step_number: u32,
    running: bool,
    survivor_count: u32,
    last_summary: Option<GenerationSummary>,
    stats: SimStats,
    window_started: Instant,
    updates_in_window: u32,
    updates_per_second: u32,
}

impl Simulation {
    /// Builds a paused simulation with barriers laid out and the
    /// initial population placed. Rejects an invalid configuration
    /// before any state is constructed.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        evo_config::validate_config(&config).map_err(SimError::InvalidConfig)?;

        let world = World::new(config.world.width, config.world.height);
        let mut sim = Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            world,
            creatures: Vec::new(),
            next_creature_id: 0,
            generation_number: 0,
            step_number: 0,
            running: false,
            survivor_count: 0,
            last_summary: None,
            stats: SimStats::default(),
            window_started: Instant::now(),
            updates_in_window: 0,
            updates_per_second: 0,
            config,
        };
        sim.world
            .initialize_barriers(sim.config.barriers.barrier_type, &mut sim.rng);
        sim.spawn_initial_population();
        sim.refresh_stats();
        sim.debug_assert_consistent_state();
        Ok(sim)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rebuilds the run from scratch under the current seed: same
    /// barriers, same initial population, same everything.
    pub fn reset(&mut self) {
        self.pause();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.world = World::new(self.config.world.width, self.config.world.height);
        self.world
            .initialize_barriers(self.config.barriers.barrier_type, &mut self.rng);
        self.creatures.clear();
        self.next_creature_id = 0;
        self.generation_number = 0;
        self.step_number = 0;
        self.survivor_count = 0;
        self.last_summary = None;
        self.spawn_initial_population();
        self.refresh_stats();
        self.debug_assert_consistent_state();
    }

    /// Adopts a new seed and resets.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Advances one tick while running; a no-op when paused.
    pub fn update(&mut self) {
        if self.running {
            self.advance_tick();
        }
    }

    /// Advances exactly one tick while paused; a no-op when running.
    pub fn step(&mut self) {
        if !self.running {
            self.advance_tick();
        }
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn generation(&self) -> u32 {
        self.generation_number
    }

    pub fn step_number(&self) -> u32 {
        self.step_number
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn last_generation_summary(&self) -> Option<GenerationSummary> {
        self.last_summary
    }

    pub fn creature_at(&self, x: i32, y: i32) -> Option<&Creature> {
        let id = self.world.creature_at(x, y)?;
        self.creature_by_id(id)
    }

    pub fn creature_info_at(&self, x: i32, y: i32) -> Option<CreatureInfo> {
        self.creature_at(x, y).map(Creature::info)
    }

    fn creature_by_id(&self, id: CreatureId) -> Option<&Creature> {
        // Ids are handed out in insertion order, so the vector is
        // sorted by id within a generation.
        self.creatures
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.creatures[i])
    }

    /// Every occupied grid cell must point at a live creature whose
    /// stored coordinates match that cell.
    pub(crate) fn debug_assert_consistent_state(&self) {
        if cfg!(debug_assertions) {
            for y in 0..self.world.height() {
                for x in 0..self.world.width() {
                    let Some(id) = self.world.creature_at(x, y) else {
                        continue;
                    };
                    let creature = self
                        .creature_by_id(id)
                        .unwrap_or_else(|| panic!("cell ({x}, {y}) references unknown {id:?}"));
                    debug_assert_eq!(
                        (creature.x, creature.y),
                        (x, y),
                        "creature {id:?} position desynced from grid"
                    );
                }
            }
        }
    }
}
