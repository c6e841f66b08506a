use evo_types::{Cell, CreatureId};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::pheromone::PheromoneField;

/// The 2-D arena. Holds one flat cell vector, the barrier list used to
/// rebuild cells between generations, and the pheromone field.
#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    barriers: Vec<(i32, i32)>,
    pub pheromones: PheromoneField,
}

impl World {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Cell::Empty; width as usize * height as usize],
            barriers: Vec::new(),
            pheromones: PheromoneField::new(width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Out-of-bounds coordinates read as barriers, so probes and
    /// movement treat the world edge like a wall.
    pub fn is_barrier(&self, x: i32, y: i32) -> bool {
        match self.cell_index(x, y) {
            Some(idx) => self.cells[idx] == Cell::Barrier,
            None => true,
        }
    }

    pub fn creature_at(&self, x: i32, y: i32) -> Option<CreatureId> {
        let idx = self.cell_index(x, y)?;
        match self.cells[idx] {
            Cell::Occupied(id) => Some(id),
            _ => None,
        }
    }

    pub fn place_creature(&mut self, id: CreatureId, x: i32, y: i32) {
        if let Some(idx) = self.cell_index(x, y) {
            self.cells[idx] = Cell::Occupied(id);
        }
    }

    /// Clears the cell only when it still holds `id`. A stale remove
    /// after a crowded-spawn overwrite must not evict the new tenant.
    pub fn remove_creature(&mut self, id: CreatureId, x: i32, y: i32) {
        if let Some(idx) = self.cell_index(x, y) {
            if self.cells[idx] == Cell::Occupied(id) {
                self.cells[idx] = Cell::Empty;
            }
        }
    }

    pub fn place_barrier(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.cell_index(x, y) {
            self.cells[idx] = Cell::Barrier;
            self.barriers.push((x, y));
        }
    }

    pub fn clear_barriers(&mut self) {
        for &(x, y) in &self.barriers {
            let idx = y as usize * self.width as usize + x as usize;
            if self.cells[idx] == Cell::Barrier {
                self.cells[idx] = Cell::Empty;
            }
        }
        self.barriers.clear();
    }

    pub fn barrier_cells(&self) -> &[(i32, i32)] {
        &self.barriers
    }

    /// Lays down one of the fixed barrier layouts. Unknown kinds and
    /// kind 0 leave the arena open. Layouts with random placement draw
    /// from the shared generator.
    pub fn initialize_barriers(&mut self, kind: u32, rng: &mut ChaCha8Rng) {
        self.clear_barriers();
        let (w, h) = (self.width, self.height);
        match kind {
            1 => {
                // Vertical wall with a gap above and below.
                let x = w / 2;
                for y in h / 4..h - h / 4 {
                    self.place_barrier(x, y);
                    self.place_barrier(x + 1, y);
                }
            }
            2 => {
                // Vertical wall at a random x, away from the edges.
                let x = rng.random_range(0..(w - 40).max(1)) + 20;
                for y in h / 4..h - h / 4 {
                    self.place_barrier(x, y);
                    self.place_barrier(x + 1, y);
                }
            }
            3 => {
                // Five square blocks: corners plus center.
                let spots = [(0.2, 0.2), (0.8, 0.2), (0.5, 0.5), (0.2, 0.8), (0.8, 0.8)];
                for (fx, fy) in spots {
                    let cx = (w as f32 * fx) as i32;
                    let cy = (h as f32 * fy) as i32;
                    for dy in -3..=3 {
                        for dx in -3..=3 {
                            self.place_barrier(cx + dx, cy + dy);
                        }
                    }
                }
            }
            4 => {
                // Horizontal ledge in the east half.
                let y = (h as f32 * 0.7) as i32;
                for x in (w as f32 * 0.6) as i32..w - 5 {
                    self.place_barrier(x, y);
                    self.place_barrier(x, y + 1);
                }
            }
            5 => {
                // Single round island at a random interior position.
                let cx = rng.random_range(0..(w - 40).max(1)) + 20;
                let cy = rng.random_range(0..(h - 40).max(1)) + 20;
                self.place_disk(cx, cy, 3);
            }
            6 => {
                // Column of round spots down the middle.
                for i in 0..5 {
                    self.place_disk(w / 2, (i + 1) * h / 6, 5);
                }
            }
            _ => {}
        }
    }

    fn place_disk(&mut self, cx: i32, cy: i32, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.place_barrier(cx + dx, cy + dy);
                }
            }
        }
    }

    /// Creatures within the Euclidean radius of the center, center cell
    /// excluded.
    pub fn neighbors(&self, cx: i32, cy: i32, radius: f32) -> Vec<CreatureId> {
        let radius_sq = radius * radius;
        let reach = radius.ceil() as i32;
        let mut found = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if (dx * dx + dy * dy) as f32 > radius_sq {
                    continue;
                }
                if let Some(id) = self.creature_at(cx + dx, cy + dy) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Occupied-cell count within the Euclidean radius, center included.
    pub fn count_creatures_in_radius(&self, cx: i32, cy: i32, radius: f32) -> usize {
        let radius_sq = radius * radius;
        let reach = radius.ceil() as i32;
        let mut count = 0;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 > radius_sq {
                    continue;
                }
                if self.creature_at(cx + dx, cy + dy).is_some() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Empties every occupied cell and the pheromone field. Barriers
    /// stay, so the layout persists across generations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            if matches!(cell, Cell::Occupied(_)) {
                *cell = Cell::Empty;
            }
        }
        self.pheromones.clear();
    }
}
