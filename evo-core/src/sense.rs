use evo_config::SimConfig;
use evo_types::CreatureId;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::brain::NUM_SENSORS;
use crate::creature::Creature;
use crate::genome;
use crate::grid::World;

/// Sensor slots in wire order. A gene's source number is reduced modulo
/// `COUNT` into this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    LocX,
    LocY,
    BoundaryDistX,
    BoundaryDist,
    BoundaryDistY,
    GeneticSimFwd,
    LastMoveDirX,
    LastMoveDirY,
    LongProbePopFwd,
    LongProbeBarFwd,
    Population,
    PopulationFwd,
    PopulationLr,
    Oscillator,
    Age,
    BarrierFwd,
    BarrierLr,
    Random,
    Signal,
    SignalFwd,
    SignalLr,
}

impl Sensor {
    pub const COUNT: usize = NUM_SENSORS;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Left/right probes look 90 degrees clockwise from the heading.
fn perpendicular(dir: (i32, i32)) -> (i32, i32) {
    (-dir.1, dir.0)
}

/// Fills the full sensor vector for the creature at `idx`. All sensors
/// produce values in [0, 1]. The random sensor draws from the shared
/// generator, so sensing order is part of the deterministic schedule.
pub fn compute(
    idx: usize,
    creatures: &[Creature],
    world: &World,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> [f32; NUM_SENSORS] {
    let creature = &creatures[idx];
    let mut sensors = [0.0f32; NUM_SENSORS];

    let size_x = world.width() as f32;
    let size_y = world.height() as f32;
    let x = creature.x as f32;
    let y = creature.y as f32;

    sensors[Sensor::LocX.index()] = x / (size_x - 1.0).max(1.0);
    sensors[Sensor::LocY.index()] = y / (size_y - 1.0).max(1.0);

    let dist_x = x.min(size_x - 1.0 - x);
    let dist_y = y.min(size_y - 1.0 - y);
    sensors[Sensor::BoundaryDistX.index()] = dist_x / (size_x / 2.0);
    sensors[Sensor::BoundaryDist.index()] = dist_x.min(dist_y) / (size_x.min(size_y) / 2.0);
    sensors[Sensor::BoundaryDistY.index()] = dist_y / (size_y / 2.0);

    sensors[Sensor::GeneticSimFwd.index()] = genetic_similarity_fwd(creature, creatures, world);

    sensors[Sensor::LastMoveDirX.index()] = (creature.last_move_dir.0 as f32 + 1.0) / 2.0;
    sensors[Sensor::LastMoveDirY.index()] = (creature.last_move_dir.1 as f32 + 1.0) / 2.0;

    sensors[Sensor::LongProbePopFwd.index()] = long_probe_population(creature, world);
    sensors[Sensor::LongProbeBarFwd.index()] =
        barrier_probe(creature, world, creature.last_move_dir, creature.long_probe_dist);

    sensors[Sensor::Population.index()] = population_density(creature, world, config);
    sensors[Sensor::PopulationFwd.index()] =
        population_toward(creature, world, config, creature.last_move_dir);
    sensors[Sensor::PopulationLr.index()] =
        population_toward(creature, world, config, perpendicular(creature.last_move_dir));

    sensors[Sensor::Oscillator.index()] = oscillator(creature);
    sensors[Sensor::Age.index()] =
        creature.age as f32 / config.simulation.steps_per_generation as f32;

    let short_probe = config.sensors.short_probe_barrier_distance;
    sensors[Sensor::BarrierFwd.index()] =
        barrier_probe(creature, world, creature.last_move_dir, short_probe);
    sensors[Sensor::BarrierLr.index()] =
        barrier_probe(creature, world, perpendicular(creature.last_move_dir), short_probe);

    sensors[Sensor::Random.index()] = rng.random::<f32>();

    let sensor_radius = config.pheromones.sensor_radius;
    sensors[Sensor::Signal.index()] =
        world
            .pheromones
            .average_in_radius(creature.x, creature.y, sensor_radius);
    sensors[Sensor::SignalFwd.index()] = signal_toward(creature, world, creature.last_move_dir, sensor_radius);
    sensors[Sensor::SignalLr.index()] =
        signal_toward(creature, world, perpendicular(creature.last_move_dir), sensor_radius);

    sensors
}

fn creature_by_id(creatures: &[Creature], id: CreatureId) -> Option<&Creature> {
    // Creatures are appended with strictly increasing ids, so the
    // vector stays sorted by id for the whole generation.
    creatures
        .binary_search_by_key(&id, |c| c.id)
        .ok()
        .map(|i| &creatures[i])
}

/// Similarity with the creature one cell ahead, zero when the cell is
/// empty, out of bounds, or the heading points at the creature itself.
fn genetic_similarity_fwd(creature: &Creature, creatures: &[Creature], world: &World) -> f32 {
    let nx = creature.x + creature.last_move_dir.0;
    let ny = creature.y + creature.last_move_dir.1;
    if !world.in_bounds(nx, ny) {
        return 0.0;
    }
    let Some(id) = world.creature_at(nx, ny) else {
        return 0.0;
    };
    if id == creature.id {
        return 0.0;
    }
    match creature_by_id(creatures, id) {
        Some(other) => genome::similarity(&creature.genome, &other.genome),
        None => 0.0,
    }
}

/// Fraction of the forward probe line that is empty. The walk stops at
/// the first barrier or boundary; occupied cells are stepped over but
/// not counted.
fn long_probe_population(creature: &Creature, world: &World) -> f32 {
    let dir = creature.last_move_dir;
    if dir == (0, 0) {
        return 0.0;
    }

    let distance = creature.long_probe_dist;
    let mut empty = 0u32;
    for i in 1..=distance as i32 {
        let nx = creature.x + dir.0 * i;
        let ny = creature.y + dir.1 * i;
        if !world.in_bounds(nx, ny) || world.is_barrier(nx, ny) {
            break;
        }
        if world.creature_at(nx, ny).is_none() {
            empty += 1;
        }
    }
    empty as f32 / distance as f32
}

/// Normalized distance to the first barrier (or boundary) along `dir`;
/// 1.0 when the probe runs clear or the creature has never moved.
fn barrier_probe(creature: &Creature, world: &World, dir: (i32, i32), distance: u32) -> f32 {
    if dir == (0, 0) {
        return 1.0;
    }
    for i in 1..=distance as i32 {
        let nx = creature.x + dir.0 * i;
        let ny = creature.y + dir.1 * i;
        if !world.in_bounds(nx, ny) || world.is_barrier(nx, ny) {
            return i as f32 / distance as f32;
        }
    }
    1.0
}

/// Occupied fraction of the in-bounds disk around the creature. The
/// creature's own cell is part of the disk, so the density is never
/// zero for a placed creature.
fn population_density(creature: &Creature, world: &World, config: &SimConfig) -> f32 {
    let radius = config.sensors.population_sensor_radius;
    let radius_sq = radius * radius;
    let reach = radius.ceil() as i32;
    let mut occupied = 0u32;
    let mut total = 0u32;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f32 > radius_sq {
                continue;
            }
            let nx = creature.x + dx;
            let ny = creature.y + dy;
            if !world.in_bounds(nx, ny) {
                continue;
            }
            total += 1;
            if world.creature_at(nx, ny).is_some() {
                occupied += 1;
            }
        }
    }

    if total == 0 {
        return 0.0;
    }
    occupied as f32 / total as f32
}

/// Inverse-squared-distance crowding along `dir` within the population
/// sensor radius, clamped to 1.0. Zero before the first move.
fn population_toward(creature: &Creature, world: &World, config: &SimConfig, dir: (i32, i32)) -> f32 {
    if creature.last_move_dir == (0, 0) {
        return 0.0;
    }

    let radius = config.sensors.population_sensor_radius;
    let radius_sq = radius * radius;
    let reach = radius.ceil() as i32;
    let mut sum = 0.0f32;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let dist_sq = dx * dx + dy * dy;
            if dist_sq == 0 || dist_sq as f32 > radius_sq {
                continue;
            }
            if dx * dir.0 + dy * dir.1 <= 0 {
                continue;
            }
            let nx = creature.x + dx;
            let ny = creature.y + dy;
            if world.in_bounds(nx, ny) && world.creature_at(nx, ny).is_some() {
                sum += 1.0 / dist_sq as f32;
            }
        }
    }

    sum.min(1.0)
}

/// Raised-cosine wave over the creature's oscillator period: 0 at the
/// start of each period, 1 at the midpoint.
fn oscillator(creature: &Creature) -> f32 {
    let phase = (creature.age % creature.osc_period) as f32 / creature.osc_period as f32;
    (-(phase * 2.0 * std::f32::consts::PI).cos() + 1.0) / 2.0
}

fn signal_toward(creature: &Creature, world: &World, dir: (i32, i32), radius: f32) -> f32 {
    if creature.last_move_dir == (0, 0) {
        return 0.0;
    }
    world
        .pheromones
        .directional_signal(creature.x, creature.y, dir, radius)
}
