use evo_types::CreatureId;

use crate::creature::Creature;
use crate::grid::World;
use crate::tests::support;
use crate::{action, sense, Simulation};

#[test]
fn identical_seeds_produce_identical_runs() {
    let config = support::small_config();
    let mut a = Simulation::new(config.clone(), 77).expect("valid config");
    let mut b = Simulation::new(config, 77).expect("valid config");

    a.start();
    b.start();
    // Two full generations plus a few ticks into the third.
    for _ in 0..25 {
        a.update();
        b.update();
    }

    assert_eq!(a.generation(), b.generation());
    assert_eq!(a.step_number(), b.step_number());
    for (ca, cb) in a.creatures().iter().zip(b.creatures()) {
        assert_eq!(ca.genome, cb.genome);
        assert_eq!((ca.x, ca.y), (cb.x, cb.y));
        assert_eq!(ca.last_move_dir, cb.last_move_dir);
        assert_eq!(ca.age, cb.age);
    }

    let sa = a.stats();
    let sb = b.stats();
    assert_eq!(sa.population, sb.population);
    assert_eq!(sa.survivors, sb.survivors);
    assert_eq!(sa.avg_genome_length, sb.avg_genome_length);
}

#[test]
fn different_seeds_diverge() {
    let config = support::small_config();
    let a = Simulation::new(config.clone(), 1).expect("valid config");
    let b = Simulation::new(config, 2).expect("valid config");

    let pa: Vec<(i32, i32)> = a.creatures().iter().map(|c| (c.x, c.y)).collect();
    let pb: Vec<(i32, i32)> = b.creatures().iter().map(|c| (c.x, c.y)).collect();
    assert_ne!(pa, pb);
}

#[test]
fn hardwired_eastward_walker_advances_one_cell_per_tick() {
    // Two genes: the forward barrier probe (which reads 1.0 before the
    // first move and stays 1.0 in an open arena) drives both the
    // responsiveness setter and the eastward move at full weight. The
    // setter runs before the final damping, so the very first tick
    // already clears the movement threshold.
    let config = support::small_config();
    let genome = support::genome_of(&[
        support::sensor_to_action(15, 7, i16::MAX),
        support::sensor_to_action(15, 9, i16::MAX),
    ]);

    let mut world = World::new(10, 10);
    let mut creature = Creature::new(CreatureId(0), genome, 5, 16);
    creature.x = 2;
    creature.y = 5;
    creature.birth_x = 2;
    creature.birth_y = 5;
    world.place_creature(creature.id, 2, 5);

    let mut creatures = vec![creature];
    let mut rng = support::rng(123);
    for tick in 1..=5 {
        let sensors = sense::compute(0, &creatures, &world, &config, &mut rng);
        let outputs = creatures[0].brain.evaluate(&sensors);
        action::execute(&outputs, &mut creatures[0], &mut world, &config, &mut rng);
        assert_eq!(
            (creatures[0].x, creatures[0].y),
            (2 + tick, 5),
            "one cell east per tick"
        );
    }
    assert_eq!(creatures[0].last_move_dir, (1, 0));
    assert_eq!(world.creature_at(7, 5), Some(CreatureId(0)));

    // Five more ticks pin the walker against the east wall: the urge
    // persists but the boundary blocks the move.
    for _ in 0..5 {
        let sensors = sense::compute(0, &creatures, &world, &config, &mut rng);
        let outputs = creatures[0].brain.evaluate(&sensors);
        action::execute(&outputs, &mut creatures[0], &mut world, &config, &mut rng);
    }
    assert_eq!((creatures[0].x, creatures[0].y), (9, 5));
    assert_eq!(world.creature_at(9, 5), Some(CreatureId(0)));
}
