use evo_config::SimConfig;
use evo_types::{Gene, Genome, SinkKind, SourceKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A small open arena where every creature survives, so tests control
/// exactly which behaviors fire.
pub fn small_config() -> SimConfig {
    let mut config = evo_config::default_config();
    config.world.width = 32;
    config.world.height = 32;
    config.population.initial_size = 20;
    config.genome.gene_count = 8;
    config.simulation.steps_per_generation = 10;
    // Unknown challenge id: everyone passes.
    config.selection.challenge_type = 999;
    config.barriers.barrier_type = 0;
    config
}

pub fn gene(
    source_kind: SourceKind,
    source_num: u8,
    sink_kind: SinkKind,
    sink_num: u8,
    weight: i16,
) -> Gene {
    Gene {
        source_kind,
        source_num,
        sink_kind,
        sink_num,
        weight,
    }
}

pub fn sensor_to_action(sensor: u8, action: u8, weight: i16) -> Gene {
    gene(SourceKind::Sensor, sensor, SinkKind::Action, action, weight)
}

pub fn sensor_to_neuron(sensor: u8, neuron: u8, weight: i16) -> Gene {
    gene(SourceKind::Sensor, sensor, SinkKind::Neuron, neuron, weight)
}

pub fn neuron_to_action(neuron: u8, action: u8, weight: i16) -> Gene {
    gene(SourceKind::Neuron, neuron, SinkKind::Action, action, weight)
}

pub fn genome_of(genes: &[Gene]) -> Genome {
    Genome::new(genes.to_vec())
}
