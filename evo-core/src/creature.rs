use evo_types::{CreatureId, CreatureInfo, Genome};

use crate::brain::Brain;

pub const DEFAULT_RESPONSIVENESS: f32 = 0.5;
pub const DEFAULT_OSC_PERIOD: u32 = 35;

/// One individual: its genome, compiled brain, position, and the
/// per-life state its actions can adjust.
#[derive(Debug, Clone)]
pub struct Creature {
    pub id: CreatureId,
    pub genome: Genome,
    pub brain: Brain,
    pub x: i32,
    pub y: i32,
    pub birth_x: i32,
    pub birth_y: i32,
    pub age: u32,
    pub alive: bool,
    /// Unit-ish heading of the last successful move; (0, 0) until the
    /// creature has moved at least once.
    pub last_move_dir: (i32, i32),
    pub responsiveness: f32,
    pub osc_period: u32,
    pub long_probe_dist: u32,
}

impl Creature {
    pub(crate) fn new(
        id: CreatureId,
        genome: Genome,
        max_internal_neurons: usize,
        long_probe_dist: u32,
    ) -> Self {
        let brain = Brain::compile(&genome, max_internal_neurons);
        Self {
            id,
            genome,
            brain,
            x: 0,
            y: 0,
            birth_x: 0,
            birth_y: 0,
            age: 0,
            alive: true,
            last_move_dir: (0, 0),
            responsiveness: DEFAULT_RESPONSIVENESS,
            osc_period: DEFAULT_OSC_PERIOD,
            long_probe_dist,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.last_move_dir != (0, 0)
    }

    /// Euclidean distance from the birth cell, used by the migration
    /// challenge.
    pub fn migration_distance(&self) -> f32 {
        let dx = (self.x - self.birth_x) as f32;
        let dy = (self.y - self.birth_y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn info(&self) -> CreatureInfo {
        CreatureInfo {
            x: self.x,
            y: self.y,
            age: self.age,
            genome_length: self.genome.len(),
            neurons: self.brain.neuron_count(),
            connections: self.brain.connection_count(),
            responsiveness: self.responsiveness,
            osc_period: self.osc_period,
            long_probe_dist: self.long_probe_dist,
            color: self.genome.genetic_color(),
        }
    }
}
