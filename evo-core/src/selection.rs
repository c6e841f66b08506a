use crate::creature::Creature;
use crate::grid::World;

/// Survival test applied at the end of a generation. Unknown challenge
/// ids let everyone through; dead creatures never pass any challenge.
pub fn passes(creature: &Creature, world: &World, challenge_type: u32) -> bool {
    if !creature.alive {
        return false;
    }

    let size_x = world.width() as f32;
    let size_y = world.height() as f32;
    let x = creature.x as f32;
    let y = creature.y as f32;

    match challenge_type {
        // Disk in the upper-left quadrant.
        0 => {
            let dx = x - size_x / 4.0;
            let dy = y - size_y / 4.0;
            let radius = size_x / 4.0;
            dx * dx + dy * dy <= radius * radius
        }
        // Right half.
        1 => x > size_x / 2.0,
        // Right quarter.
        2 => x > 3.0 * size_x / 4.0,
        // Left eighth.
        3 => x < size_x / 8.0,
        // Social: off the border with 2..=22 neighbors in radius 1.5.
        4 => {
            let on_border = creature.x == 0
                || creature.x == world.width() - 1
                || creature.y == 0
                || creature.y == world.height() - 1;
            if on_border {
                return false;
            }
            let count = world.neighbors(creature.x, creature.y, 1.5).len();
            (2..=22).contains(&count)
        }
        // Center disk, radius a third of the width.
        5 | 6 => {
            let dx = x - size_x / 2.0;
            let dy = y - size_y / 2.0;
            (dx * dx + dy * dy).sqrt() <= size_x / 3.0
        }
        // Sparse center: inside the quarter-width disk with 5..=8
        // neighbors in radius 1.5.
        7 => {
            let dx = x - size_x / 2.0;
            let dy = y - size_y / 2.0;
            if (dx * dx + dy * dy).sqrt() > size_x / 4.0 {
                return false;
            }
            let count = world.neighbors(creature.x, creature.y, 1.5).len();
            (5..=8).contains(&count)
        }
        // Square corner pockets, an eighth of the width on a side.
        8 => {
            let corner = size_x / 8.0;
            let near_left = x < corner;
            let near_right = x >= size_x - corner;
            let near_top = y < corner;
            let near_bottom = y >= size_y - corner;
            (near_left || near_right) && (near_top || near_bottom)
        }
        // Round corner pockets, radius a quarter of the width.
        9 => {
            let corner = size_x / 4.0;
            let fx = size_x - 1.0 - x;
            let fy = size_y - 1.0 - y;
            (x * x + y * y).sqrt() <= corner
                || (fx * fx + y * y).sqrt() <= corner
                || (x * x + fy * fy).sqrt() <= corner
                || (fx * fx + fy * fy).sqrt() <= corner
        }
        // Touching any wall.
        11 => {
            creature.x == 0
                || creature.x == world.width() - 1
                || creature.y == 0
                || creature.y == world.height() - 1
        }
        // Migration: far enough from the birth cell.
        13 => creature.migration_distance() >= size_x.min(size_y) * 0.2,
        // East or west eighth.
        14 => x < size_x / 8.0 || x >= 7.0 * size_x / 8.0,
        _ => true,
    }
}
