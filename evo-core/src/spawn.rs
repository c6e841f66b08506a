use evo_types::{CreatureId, Genome};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::creature::Creature;
use crate::genome::{crossover, mutate_genome, random_genome};
use crate::Simulation;

const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Builds the next generation's genomes from the survivor pool. Every
/// offspring picks a uniform random first parent; with more than one
/// survivor a second parent joins by coin flip and the pair crosses
/// over, otherwise the parent genome is cloned. Each offspring is then
/// mutated. An empty pool restarts the run with fresh random genomes.
pub(crate) fn next_generation(
    survivors: &[&Genome],
    target: usize,
    gene_count: usize,
    mutation_rate: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<Genome> {
    if survivors.is_empty() {
        return (0..target).map(|_| random_genome(gene_count, rng)).collect();
    }

    let mut offspring = Vec::with_capacity(target);
    for _ in 0..target {
        let parent1 = survivors[rng.random_range(0..survivors.len())];
        let mut genome = if survivors.len() > 1 && rng.random::<f32>() < 0.5 {
            let parent2 = survivors[rng.random_range(0..survivors.len())];
            crossover(parent1, parent2, rng)
        } else {
            parent1.clone()
        };
        mutate_genome(&mut genome, mutation_rate, rng);
        offspring.push(genome);
    }
    offspring
}

impl Simulation {
    pub(crate) fn make_creature(&mut self, genome: Genome) -> Creature {
        let id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;
        Creature::new(
            id,
            genome,
            self.config.genome.max_internal_neurons as usize,
            self.config.sensors.long_probe_distance,
        )
    }

    pub(crate) fn spawn_initial_population(&mut self) {
        for _ in 0..self.config.population.initial_size {
            let genome = random_genome(self.config.genome.gene_count as usize, &mut self.rng);
            let creature = self.make_creature(genome);
            self.creatures.push(creature);
            self.place_creature_randomly(self.creatures.len() - 1);
        }
    }

    /// Draws random cells until one is free of barriers and tenants, up
    /// to a fixed attempt budget. In a critically crowded arena the
    /// final draw only avoids barriers, so the newcomer may shadow an
    /// earlier tenant's grid reference; an unlucky final draw onto a
    /// barrier leaves the creature off the grid entirely.
    pub(crate) fn place_creature_randomly(&mut self, idx: usize) {
        let width = self.world.width();
        let height = self.world.height();

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = self.rng.random_range(0..width);
            let y = self.rng.random_range(0..height);
            if !self.world.is_barrier(x, y) && self.world.creature_at(x, y).is_none() {
                self.settle_creature(idx, x, y);
                return;
            }
        }

        let x = self.rng.random_range(0..width);
        let y = self.rng.random_range(0..height);
        if !self.world.is_barrier(x, y) {
            self.settle_creature(idx, x, y);
        }
    }

    fn settle_creature(&mut self, idx: usize, x: i32, y: i32) {
        let creature = &mut self.creatures[idx];
        creature.x = x;
        creature.y = y;
        creature.birth_x = x;
        creature.birth_y = y;
        self.world.place_creature(creature.id, x, y);
    }
}
