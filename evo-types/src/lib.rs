use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u64);

/// Where a connection draws its input from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Sensor,
    Neuron,
}

/// Where a connection delivers its weighted value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SinkKind {
    Neuron,
    Action,
}

/// A single connection descriptor, bit-packed into 32 bits:
/// bit 31 source kind, bits 30-24 source number, bit 23 sink kind,
/// bits 22-16 sink number, bits 15-0 weight as two's complement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gene {
    pub source_kind: SourceKind,
    pub source_num: u8,
    pub sink_kind: SinkKind,
    pub sink_num: u8,
    pub weight: i16,
}

impl Gene {
    /// Number of source/sink slots addressable by the 7-bit number fields.
    pub const NUM_SPACE: u8 = 128;

    pub fn encode(&self) -> u32 {
        let mut value = 0u32;
        value |= u32::from(matches!(self.source_kind, SourceKind::Neuron)) << 31;
        value |= u32::from(self.source_num & 0x7F) << 24;
        value |= u32::from(matches!(self.sink_kind, SinkKind::Action)) << 23;
        value |= u32::from(self.sink_num & 0x7F) << 16;
        value |= u32::from(self.weight as u16);
        value
    }

    pub fn decode(value: u32) -> Self {
        Self {
            source_kind: if value >> 31 & 0x1 == 0 {
                SourceKind::Sensor
            } else {
                SourceKind::Neuron
            },
            source_num: (value >> 24 & 0x7F) as u8,
            sink_kind: if value >> 23 & 0x1 == 0 {
                SinkKind::Neuron
            } else {
                SinkKind::Action
            },
            sink_num: (value >> 16 & 0x7F) as u8,
            weight: (value & 0xFFFF) as u16 as i16,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("0x{:08X}", self.encode())
    }
}

/// Ordered sequence of genes defining one individual's neural wiring.
/// Fixed at creation; crossover may give offspring a different length
/// than either parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Genome {
    pub genes: Vec<Gene>,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn to_hex_string(&self) -> String {
        self.genes
            .iter()
            .map(Gene::to_hex)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Hashes a few structural genome properties into an RGB color so
    /// related genomes render similarly. Display-only; never feeds back
    /// into the simulation.
    pub fn genetic_color(&self) -> [u8; 3] {
        if self.genes.is_empty() {
            return [0x88, 0x88, 0x88];
        }

        let mut bits = (self.genes.len() & 1) as u32;
        let first = &self.genes[0];
        bits |= u32::from(matches!(first.source_kind, SourceKind::Neuron)) << 1;
        bits |= u32::from(matches!(first.sink_kind, SinkKind::Action)) << 2;
        if self.genes.len() > 1 {
            let last = &self.genes[self.genes.len() - 1];
            bits |= u32::from(matches!(last.source_kind, SourceKind::Neuron)) << 3;
            bits |= u32::from(matches!(last.sink_kind, SinkKind::Action)) << 4;
        }
        if self.genes.len() > 2 {
            let mid = &self.genes[self.genes.len() / 2];
            bits |= u32::from(mid.source_num & 0x7) << 5;
        }

        let mut r = (bits & 0x07) as f32 * 32.0;
        let mut g = (bits >> 3 & 0x07) as f32 * 32.0;
        let mut b = (bits >> 6 & 0x03) as f32 * 64.0;

        let brightness = r + g + b;
        if brightness < 128.0 && brightness > 0.0 {
            let factor = 128.0 / brightness;
            r = (r * factor).min(255.0);
            g = (g * factor).min(255.0);
            b = (b * factor).min(255.0);
        }

        [r as u8, g as u8, b as u8]
    }
}

/// One grid cell: empty, a barrier, or a creature reference by id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Barrier,
    Occupied(CreatureId),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SimStats {
    pub population: u32,
    pub survivors: u32,
    pub generation: u32,
    pub step: u32,
    pub avg_genome_length: u32,
    pub updates_per_second: u32,
}

/// Per-creature inspection payload surfaced through the driver API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatureInfo {
    pub x: i32,
    pub y: i32,
    pub age: u32,
    pub genome_length: usize,
    pub neurons: usize,
    pub connections: usize,
    pub responsiveness: f32,
    pub osc_period: u32,
    pub long_probe_dist: u32,
    pub color: [u8; 3],
}

/// End-of-generation summary computed before reproduction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GenerationSummary {
    pub generation: u32,
    pub population: u32,
    pub survivors: u32,
    pub survival_rate: f32,
    pub avg_genome_length: f32,
    pub avg_neurons: f32,
    pub avg_connections: f32,
}
