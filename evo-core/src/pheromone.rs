/// Scalar signal field over the grid. Values live in [0, 255]; emission
/// saturates at the top and decay floors at zero, so no boundary
/// condition is ever signaled to the caller.
#[derive(Debug, Clone)]
pub struct PheromoneField {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl PheromoneField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            data: vec![0; width as usize * height as usize],
        }
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Out-of-bounds cells read as zero.
    pub fn value_at(&self, x: i32, y: i32) -> u8 {
        self.cell_index(x, y).map_or(0, |idx| self.data[idx])
    }

    /// Deposits `amount` at the epicenter and half that (rounded up) at
    /// every other cell within the Euclidean radius. Purely additive.
    pub fn emit(&mut self, x: i32, y: i32, amount: u8, radius: f32) {
        let radius_sq = radius * radius;
        let reach = radius.ceil() as i32;
        let spread = amount.div_ceil(2);

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq > radius_sq {
                    continue;
                }
                let Some(idx) = self.cell_index(x + dx, y + dy) else {
                    continue;
                };
                let deposit = if dx == 0 && dy == 0 { amount } else { spread };
                self.data[idx] = self.data[idx].saturating_add(deposit);
            }
        }
    }

    /// Subtracts `rate` from every cell, flooring at zero. Applied once
    /// per simulation tick.
    pub fn decay(&mut self, rate: u8) {
        for cell in &mut self.data {
            *cell = cell.saturating_sub(rate);
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Mean of normalized values over the full disk. Out-of-bounds cells
    /// contribute zero but still count toward the denominator.
    pub fn average_in_radius(&self, x: i32, y: i32, radius: f32) -> f32 {
        let radius_sq = radius * radius;
        let reach = radius.ceil() as i32;
        let mut sum = 0.0f32;
        let mut count = 0u32;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq > radius_sq {
                    continue;
                }
                sum += f32::from(self.value_at(x + dx, y + dy));
                count += 1;
            }
        }

        if count == 0 {
            return 0.0;
        }
        sum / (count as f32 * 255.0)
    }

    /// Inverse-squared-distance weighted mean over the half-disk whose
    /// offsets point along `dir` (positive dot product), center excluded,
    /// normalized by the weight sum and the value range.
    pub fn directional_signal(&self, x: i32, y: i32, dir: (i32, i32), radius: f32) -> f32 {
        let radius_sq = radius * radius;
        let reach = radius.ceil() as i32;
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq > radius_sq || dist_sq == 0.0 {
                    continue;
                }
                if dx * dir.0 + dy * dir.1 <= 0 {
                    continue;
                }
                let weight = 1.0 / dist_sq;
                sum += f32::from(self.value_at(x + dx, y + dy)) * weight;
                weight_sum += weight;
            }
        }

        if weight_sum == 0.0 {
            return 0.0;
        }
        sum / (weight_sum * 255.0)
    }
}
