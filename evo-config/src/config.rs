use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldSection {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PopulationSection {
    pub initial_size: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenomeSection {
    pub gene_count: u32,
    pub mutation_rate: f32,
    pub max_internal_neurons: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationSection {
    pub steps_per_generation: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelectionSection {
    pub challenge_type: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BarrierSection {
    pub barrier_type: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PheromoneSection {
    pub enabled: bool,
    pub decay_rate: u8,
    pub emission_amount: u8,
    pub emission_radius: f32,
    pub sensor_radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorSection {
    pub population_sensor_radius: f32,
    pub long_probe_distance: u32,
    pub short_probe_barrier_distance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub world: WorldSection,
    pub population: PopulationSection,
    pub genome: GenomeSection,
    pub simulation: SimulationSection,
    pub selection: SelectionSection,
    pub barriers: BarrierSection,
    pub pheromones: PheromoneSection,
    pub sensors: SensorSection,
}

impl Default for SimConfig {
    fn default() -> Self {
        default_config()
    }
}

pub fn sim_config_from_toml_str(raw: &str) -> Result<SimConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn default_config() -> SimConfig {
    sim_config_from_toml_str(include_str!("../default.toml"))
        .expect("default config TOML must deserialize")
}

pub fn load_config_from_path(path: &Path) -> Result<SimConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    sim_config_from_toml_str(&raw)
        .context("config TOML failed schema deserialization")
        .with_context(|| format!("failed to parse config from {}", path.display()))
}

pub fn validate_config(config: &SimConfig) -> Result<(), String> {
    if config.world.width == 0 || config.world.height == 0 {
        return Err("world.width and world.height must be greater than zero".to_owned());
    }
    if config.population.initial_size == 0 {
        return Err("population.initial_size must be greater than zero".to_owned());
    }
    if config.genome.gene_count == 0 {
        return Err("genome.gene_count must be greater than zero".to_owned());
    }
    if !(0.0..=1.0).contains(&config.genome.mutation_rate) {
        return Err("genome.mutation_rate must be within [0, 1]".to_owned());
    }
    if config.genome.max_internal_neurons == 0 {
        return Err("genome.max_internal_neurons must be greater than zero".to_owned());
    }
    if config.simulation.steps_per_generation == 0 {
        return Err("simulation.steps_per_generation must be greater than zero".to_owned());
    }
    if !config.pheromones.emission_radius.is_finite() || config.pheromones.emission_radius < 0.0 {
        return Err("pheromones.emission_radius must be finite and >= 0".to_owned());
    }
    if !config.pheromones.sensor_radius.is_finite() || config.pheromones.sensor_radius <= 0.0 {
        return Err("pheromones.sensor_radius must be finite and greater than zero".to_owned());
    }
    if !config.sensors.population_sensor_radius.is_finite()
        || config.sensors.population_sensor_radius <= 0.0
    {
        return Err(
            "sensors.population_sensor_radius must be finite and greater than zero".to_owned(),
        );
    }
    if !(1..=32).contains(&config.sensors.long_probe_distance) {
        return Err("sensors.long_probe_distance must be within [1, 32]".to_owned());
    }
    if config.sensors.short_probe_barrier_distance == 0 {
        return Err("sensors.short_probe_barrier_distance must be greater than zero".to_owned());
    }
    Ok(())
}

/// Reads a single value addressed by a dotted path such as
/// `"genome.mutation_rate"`.
pub fn get_path(config: &SimConfig, path: &str) -> Option<toml::Value> {
    let root = toml::Value::try_from(config).ok()?;
    let mut current = root;
    for key in path.split('.') {
        current = current.as_table()?.get(key)?.clone();
    }
    Some(current)
}

/// Writes a single value addressed by a dotted path, returning the
/// updated config. Fails when the path does not exist or the value does
/// not fit the schema.
pub fn set_path(config: &SimConfig, path: &str, value: toml::Value) -> Result<SimConfig> {
    let mut root = toml::Value::try_from(config).context("serialize config for path update")?;

    let mut keys = path.split('.').collect::<Vec<_>>();
    let leaf = keys
        .pop()
        .ok_or_else(|| anyhow!("config path must not be empty"))?;

    let mut target = &mut root;
    for key in keys {
        target = target
            .as_table_mut()
            .and_then(|table| table.get_mut(key))
            .ok_or_else(|| anyhow!("unknown config table {key:?} in path {path:?}"))?;
    }
    let table = target
        .as_table_mut()
        .ok_or_else(|| anyhow!("config path {path:?} does not address a table entry"))?;
    if !table.contains_key(leaf) {
        return Err(anyhow!("unknown config key {leaf:?} in path {path:?}"));
    }
    table.insert(leaf.to_owned(), value);

    root.try_into()
        .with_context(|| format!("value for {path:?} does not fit the config schema"))
}

/// Parses a `path=value` override as used by CLI flags. The value is
/// interpreted as TOML, so `true`, `1.5`, `12`, and `"text"` all work.
pub fn parse_path_assignment(assignment: &str) -> Result<(String, toml::Value)> {
    let (path, raw_value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected PATH=VALUE, got {assignment:?}"))?;
    let wrapped: toml::Value = toml::from_str(&format!("value = {raw_value}"))
        .with_context(|| format!("failed to parse override value {raw_value:?} as TOML"))?;
    let value = wrapped
        .as_table()
        .and_then(|table| table.get("value"))
        .cloned()
        .ok_or_else(|| anyhow!("failed to extract override value from {raw_value:?}"))?;
    Ok((path.trim().to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let config = default_config();
        assert_eq!(config.world.width, 128);
        assert_eq!(config.genome.gene_count, 24);
        validate_config(&config).expect("default config should validate");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = default_config();
        let raw = toml::to_string(&config).expect("serialize config");
        let parsed = sim_config_from_toml_str(&raw).expect("deserialize config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn validation_rejects_zero_dimensions_and_bad_rates() {
        let mut config = default_config();
        config.world.width = 0;
        assert!(validate_config(&config)
            .expect_err("zero width should be rejected")
            .contains("world.width"));

        let mut config = default_config();
        config.genome.mutation_rate = 1.5;
        assert!(validate_config(&config)
            .expect_err("out of range rate should be rejected")
            .contains("mutation_rate"));

        let mut config = default_config();
        config.sensors.long_probe_distance = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn dotted_path_reads_nested_values() {
        let config = default_config();
        assert_eq!(
            get_path(&config, "world.width").and_then(|v| v.as_integer()),
            Some(128)
        );
        assert_eq!(
            get_path(&config, "pheromones.enabled").and_then(|v| v.as_bool()),
            Some(true)
        );
        assert_eq!(get_path(&config, "world.depth"), None);
    }

    #[test]
    fn dotted_path_writes_and_rejects_unknown_keys() {
        let config = default_config();
        let updated = set_path(&config, "genome.mutation_rate", toml::Value::Float(0.01))
            .expect("valid path should update");
        assert!((updated.genome.mutation_rate - 0.01).abs() < f32::EPSILON);

        assert!(set_path(&config, "genome.unknown_knob", toml::Value::Integer(1)).is_err());
        assert!(set_path(&config, "world.width", toml::Value::String("wide".into())).is_err());
    }

    #[test]
    fn path_assignment_parses_toml_scalars() {
        let (path, value) = parse_path_assignment("pheromones.enabled=false").expect("parse");
        assert_eq!(path, "pheromones.enabled");
        assert_eq!(value, toml::Value::Boolean(false));

        let (_, value) = parse_path_assignment("genome.mutation_rate=0.05").expect("parse");
        assert_eq!(value, toml::Value::Float(0.05));

        assert!(parse_path_assignment("no-equals-sign").is_err());
    }
}
