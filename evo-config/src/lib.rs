mod config;

pub use config::{
    default_config, get_path, load_config_from_path, parse_path_assignment,
    set_path, sim_config_from_toml_str, validate_config, BarrierSection, GenomeSection,
    PheromoneSection, PopulationSection, SelectionSection, SensorSection, SimConfig,
    SimulationSection, WorldSection,
};
