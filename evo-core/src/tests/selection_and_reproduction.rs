use evo_types::{CreatureId, Genome};

use crate::creature::Creature;
use crate::grid::World;
use crate::selection;
use crate::spawn;
use crate::tests::support;
use crate::Simulation;

fn creature_at(x: i32, y: i32) -> Creature {
    let mut creature = Creature::new(CreatureId(0), Genome::default(), 5, 16);
    creature.x = x;
    creature.y = y;
    creature.birth_x = x;
    creature.birth_y = y;
    creature
}

#[test]
fn center_disk_challenge_passes_by_distance_from_center() {
    let world = World::new(129, 129);

    // Radius is a third of the width: 43 cells from (64.5, 64.5).
    assert!(selection::passes(&creature_at(64, 64), &world, 6));
    assert!(selection::passes(&creature_at(64 + 40, 64), &world, 6));
    assert!(!selection::passes(&creature_at(0, 0), &world, 6));
    assert!(!selection::passes(&creature_at(128, 64), &world, 6));
}

#[test]
fn dead_creatures_never_pass() {
    let world = World::new(32, 32);
    let mut creature = creature_at(16, 16);
    assert!(selection::passes(&creature, &world, 999), "unknown ids default to pass");
    creature.alive = false;
    assert!(!selection::passes(&creature, &world, 999));
}

#[test]
fn positional_challenges_split_the_arena() {
    let world = World::new(64, 64);

    // Right half.
    assert!(selection::passes(&creature_at(33, 10), &world, 1));
    assert!(!selection::passes(&creature_at(32, 10), &world, 1));

    // Left eighth.
    assert!(selection::passes(&creature_at(7, 10), &world, 3));
    assert!(!selection::passes(&creature_at(8, 10), &world, 3));

    // Against any wall.
    assert!(selection::passes(&creature_at(0, 30), &world, 11));
    assert!(selection::passes(&creature_at(30, 63), &world, 11));
    assert!(!selection::passes(&creature_at(1, 30), &world, 11));

    // East or west eighth.
    assert!(selection::passes(&creature_at(56, 10), &world, 14));
    assert!(!selection::passes(&creature_at(30, 10), &world, 14));

    // Square corner pockets.
    assert!(selection::passes(&creature_at(2, 2), &world, 8));
    assert!(selection::passes(&creature_at(60, 60), &world, 8));
    assert!(!selection::passes(&creature_at(2, 30), &world, 8));
}

#[test]
fn social_challenge_needs_company_away_from_the_border() {
    let mut world = World::new(64, 64);
    let creature = creature_at(30, 30);

    // Alone: too few neighbors.
    assert!(!selection::passes(&creature, &world, 4));

    world.place_creature(CreatureId(10), 31, 30);
    world.place_creature(CreatureId(11), 29, 30);
    assert!(selection::passes(&creature, &world, 4));

    // The border disqualifies outright.
    let mut world = World::new(64, 64);
    let edge = creature_at(0, 30);
    world.place_creature(CreatureId(10), 1, 30);
    world.place_creature(CreatureId(11), 0, 29);
    assert!(!selection::passes(&edge, &world, 4));
}

#[test]
fn migration_challenge_measures_distance_from_birth() {
    let world = World::new(64, 64);
    let mut creature = creature_at(10, 10);

    // Threshold is 0.2 * 64 = 12.8 cells.
    creature.x = 22;
    assert!(!selection::passes(&creature, &world, 13));
    creature.x = 23;
    assert!(selection::passes(&creature, &world, 13));
}

#[test]
fn breeding_clones_single_survivors_when_mutation_is_off() {
    let mut rng = support::rng(6);
    let parent = crate::random_genome(10, &mut rng);

    let offspring = spawn::next_generation(&[&parent], 8, 10, 0.0, &mut rng);
    assert_eq!(offspring.len(), 8);
    for genome in &offspring {
        assert_eq!(genome, &parent);
    }
}

#[test]
fn breeding_mixes_two_survivors() {
    let mut rng = support::rng(6);
    let a = crate::random_genome(10, &mut rng);
    let b = crate::random_genome(10, &mut rng);

    let offspring = spawn::next_generation(&[&a, &b], 50, 10, 0.0, &mut rng);
    assert_eq!(offspring.len(), 50);
    // With equal-length parents every child keeps the parent length,
    // and with mutation off each gene is traceable to a parent.
    for genome in &offspring {
        assert_eq!(genome.len(), 10);
        for (i, gene) in genome.genes.iter().enumerate() {
            assert!(gene == &a.genes[i] || gene == &b.genes[i]);
        }
    }
    // Coin-flip crossover should have produced at least one child that
    // is neither pure clone.
    assert!(offspring.iter().any(|g| g != &a && g != &b));
}

#[test]
fn extinction_restarts_with_fresh_random_genomes() {
    let mut rng = support::rng(6);
    let offspring = spawn::next_generation(&[], 50, 24, 0.001, &mut rng);
    assert_eq!(offspring.len(), 50);
    for genome in &offspring {
        assert_eq!(genome.len(), 24);
    }
}

#[test]
fn generation_rollover_breeds_and_rescatters() {
    let mut config = support::small_config();
    config.simulation.steps_per_generation = 3;
    let mut sim = Simulation::new(config.clone(), 11).expect("valid config");

    sim.start();
    for _ in 0..3 {
        sim.update();
    }

    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.step_number(), 0);
    let stats = sim.stats();
    // The unknown challenge id lets the whole population through.
    assert_eq!(stats.survivors, config.population.initial_size);
    assert_eq!(stats.population, config.population.initial_size);

    let summary = sim.last_generation_summary().expect("summary after rollover");
    assert_eq!(summary.generation, 0);
    assert_eq!(summary.survivors, config.population.initial_size);
    assert!((summary.survival_rate - 1.0).abs() < 1e-6);
    assert!(summary.avg_genome_length > 0.0);
}

#[test]
fn total_wipeout_still_refills_the_population() {
    // A lone creature can never satisfy the social challenge, so every
    // generation goes extinct and restarts from random genomes.
    let mut config = support::small_config();
    config.population.initial_size = 1;
    config.selection.challenge_type = 4;
    config.simulation.steps_per_generation = 2;

    let mut sim = Simulation::new(config, 13).expect("valid config");
    sim.start();
    for _ in 0..4 {
        sim.update();
    }

    assert_eq!(sim.generation(), 2);
    let stats = sim.stats();
    assert_eq!(stats.survivors, 0);
    assert_eq!(stats.population, 1, "extinction refills to the target size");
}
