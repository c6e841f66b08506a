use evo_config::SimConfig;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::brain::NUM_ACTIONS;
use crate::creature::Creature;
use crate::grid::World;

/// Action slots in wire order. A gene's sink number is reduced modulo
/// `COUNT` into this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveX,
    MoveY,
    MoveForward,
    MoveRl,
    MoveRandom,
    SetOscillatorPeriod,
    SetLongProbeDist,
    SetResponsiveness,
    EmitSignal,
    MoveEast,
    MoveWest,
    MoveNorth,
    MoveSouth,
    MoveLeft,
    MoveRight,
    MoveReverse,
}

impl Action {
    pub const COUNT: usize = NUM_ACTIONS;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Applies one tick's worth of action outputs, in slot order. Movement
/// contributions accumulate into a single displacement that is damped
/// by responsiveness and then quantized; parameter setters take effect
/// immediately, so a responsiveness change influences this very tick's
/// damping and emission chance.
pub fn execute(
    outputs: &[f32; NUM_ACTIONS],
    creature: &mut Creature,
    world: &mut World,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) {
    let mut move_x = 0.0f32;
    let mut move_y = 0.0f32;

    move_x += outputs[Action::MoveX.index()].tanh();
    move_y += outputs[Action::MoveY.index()].tanh();

    let forward = outputs[Action::MoveForward.index()];
    if forward > 0.5 {
        move_x += creature.last_move_dir.0 as f32 * forward.tanh();
        move_y += creature.last_move_dir.1 as f32 * forward.tanh();
    }

    let (perp_x, perp_y) = (
        -creature.last_move_dir.1 as f32,
        creature.last_move_dir.0 as f32,
    );
    let side = outputs[Action::MoveRl.index()].tanh();
    move_x += perp_x * side;
    move_y += perp_y * side;

    // Short-circuit keeps the draw count tied to the output level: no
    // generator advance unless the urge fires.
    if outputs[Action::MoveRandom.index()] > 0.5 && rng.random::<f32>() < 0.1 {
        move_x += (rng.random::<f32>() - 0.5) * 2.0;
        move_y += (rng.random::<f32>() - 0.5) * 2.0;
    }

    let osc = outputs[Action::SetOscillatorPeriod.index()];
    if osc.abs() > 0.5 {
        let period = (1.0 + 1.5 + (7.0 * osc.tanh()).exp()).floor() as i64;
        creature.osc_period = period.clamp(2, 2048) as u32;
    }

    let probe = outputs[Action::SetLongProbeDist.index()];
    if probe.abs() > 0.5 {
        let dist = (1.0 + probe.tanh() * 32.0).floor() as i64;
        creature.long_probe_dist = dist.clamp(1, 32) as u32;
    }

    let resp = outputs[Action::SetResponsiveness.index()];
    if resp.abs() > 0.5 {
        creature.responsiveness = resp.tanh().abs();
    }

    if config.pheromones.enabled
        && outputs[Action::EmitSignal.index()] > 0.5
        && rng.random::<f32>() < creature.responsiveness
    {
        world.pheromones.emit(
            creature.x,
            creature.y,
            config.pheromones.emission_amount,
            config.pheromones.emission_radius,
        );
    }

    move_x += outputs[Action::MoveEast.index()].tanh();
    move_x -= outputs[Action::MoveWest.index()].tanh();
    move_y += outputs[Action::MoveNorth.index()].tanh();
    move_y -= outputs[Action::MoveSouth.index()].tanh();

    let left = outputs[Action::MoveLeft.index()].tanh();
    move_x += perp_x * left;
    move_y += perp_y * left;

    let right = outputs[Action::MoveRight.index()].tanh();
    move_x -= perp_x * right;
    move_y -= perp_y * right;

    let reverse = outputs[Action::MoveReverse.index()];
    if reverse > 0.5 {
        move_x -= creature.last_move_dir.0 as f32 * reverse.tanh();
        move_y -= creature.last_move_dir.1 as f32 * reverse.tanh();
    }

    move_x *= creature.responsiveness;
    move_y *= creature.responsiveness;

    let step_x = if move_x.abs() > 0.5 {
        move_x.signum() as i32
    } else {
        0
    };
    let step_y = if move_y.abs() > 0.5 {
        move_y.signum() as i32
    } else {
        0
    };

    if step_x != 0 || step_y != 0 {
        try_move(creature, step_x, step_y, world);
    }
}

/// Moves one cell when the destination is in bounds, clear of barriers,
/// and unoccupied; otherwise the creature stays put and keeps its old
/// heading. A blocked diagonal is not decomposed into its components.
fn try_move(creature: &mut Creature, dx: i32, dy: i32, world: &mut World) {
    let nx = creature.x + dx;
    let ny = creature.y + dy;

    if !world.in_bounds(nx, ny) || world.is_barrier(nx, ny) || world.creature_at(nx, ny).is_some() {
        return;
    }

    world.remove_creature(creature.id, creature.x, creature.y);
    creature.x = nx;
    creature.y = ny;
    creature.last_move_dir = (dx, dy);
    world.place_creature(creature.id, nx, ny);
}
