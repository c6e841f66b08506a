use std::time::{Duration, Instant};

use evo_types::{GenerationSummary, Genome};

use crate::{action, selection, sense, spawn, Simulation};

impl Simulation {
    /// One simulation tick. Creatures act strictly in index order, each
    /// seeing the grid as already modified by lower-indexed creatures,
    /// so a contested cell goes to the first mover. After all creatures
    /// have acted the pheromone field decays and the step counter
    /// advances, rolling the generation over when it hits the limit.
    pub(crate) fn advance_tick(&mut self) {
        for idx in 0..self.creatures.len() {
            if !self.creatures[idx].alive {
                continue;
            }
            self.creatures[idx].age += 1;
            let sensors = sense::compute(
                idx,
                &self.creatures,
                &self.world,
                &self.config,
                &mut self.rng,
            );
            let outputs = self.creatures[idx].brain.evaluate(&sensors);
            action::execute(
                &outputs,
                &mut self.creatures[idx],
                &mut self.world,
                &self.config,
                &mut self.rng,
            );
        }

        if self.config.pheromones.enabled {
            self.world.pheromones.decay(self.config.pheromones.decay_rate);
        }

        self.step_number += 1;
        if self.step_number >= self.config.simulation.steps_per_generation {
            self.end_generation();
        }

        self.refresh_stats();
        self.record_update();
        self.debug_assert_consistent_state();
    }

    /// Scores the closing generation, then replaces the population with
    /// offspring bred from the survivors and scatters them across a
    /// cleared grid.
    fn end_generation(&mut self) {
        let challenge = self.config.selection.challenge_type;
        let survivor_indices: Vec<usize> = (0..self.creatures.len())
            .filter(|&i| selection::passes(&self.creatures[i], &self.world, challenge))
            .collect();

        self.survivor_count = survivor_indices.len() as u32;
        self.last_summary = Some(self.summarize_generation(&survivor_indices));

        let survivor_genomes: Vec<&Genome> = survivor_indices
            .iter()
            .map(|&i| &self.creatures[i].genome)
            .collect();
        let offspring = spawn::next_generation(
            &survivor_genomes,
            self.config.population.initial_size as usize,
            self.config.genome.gene_count as usize,
            self.config.genome.mutation_rate,
            &mut self.rng,
        );

        self.world.clear();
        self.generation_number += 1;
        self.step_number = 0;
        self.creatures.clear();
        for genome in offspring {
            let creature = self.make_creature(genome);
            self.creatures.push(creature);
        }
        for idx in 0..self.creatures.len() {
            self.place_creature_randomly(idx);
        }
    }

    fn summarize_generation(&self, survivor_indices: &[usize]) -> GenerationSummary {
        let population = self.creatures.len();
        let mut total_length = 0usize;
        let mut total_neurons = 0usize;
        let mut total_connections = 0usize;
        for creature in &self.creatures {
            total_length += creature.genome.len();
            total_neurons += creature.brain.neuron_count();
            total_connections += creature.brain.connection_count();
        }

        let denom = population.max(1) as f32;
        GenerationSummary {
            generation: self.generation_number,
            population: population as u32,
            survivors: survivor_indices.len() as u32,
            survival_rate: survivor_indices.len() as f32 / denom,
            avg_genome_length: total_length as f32 / denom,
            avg_neurons: total_neurons as f32 / denom,
            avg_connections: total_connections as f32 / denom,
        }
    }

    pub(crate) fn refresh_stats(&mut self) {
        let mut alive = 0u32;
        let mut total_length = 0usize;
        for creature in self.creatures.iter().filter(|c| c.alive) {
            alive += 1;
            total_length += creature.genome.len();
        }
        let avg_genome_length = if alive == 0 {
            0
        } else {
            (total_length as f32 / alive as f32).round() as u32
        };

        self.stats = evo_types::SimStats {
            population: alive,
            survivors: self.survivor_count,
            generation: self.generation_number,
            step: self.step_number,
            avg_genome_length,
            updates_per_second: self.updates_per_second,
        };
    }

    /// Wall-clock updates-per-second over a one-second window. Display
    /// only; never feeds back into simulation state.
    fn record_update(&mut self) {
        self.updates_in_window += 1;
        let now = Instant::now();
        if now.duration_since(self.window_started) >= Duration::from_secs(1) {
            self.updates_per_second = self.updates_in_window;
            self.updates_in_window = 0;
            self.window_started = now;
        }
    }
}
