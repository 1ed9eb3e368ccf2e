// Configuration loading - simulation cadence, probabilities, bind address
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_position_interval_ms")]
    pub position_interval_ms: u64,
    #[serde(default = "default_ridership_interval_ms")]
    pub ridership_interval_ms: u64,
    #[serde(default = "default_delay_probability")]
    pub delay_probability: f64,
    #[serde(default = "default_wrong_bus_probability")]
    pub wrong_bus_probability: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            position_interval_ms: default_position_interval_ms(),
            ridership_interval_ms: default_ridership_interval_ms(),
            delay_probability: default_delay_probability(),
            wrong_bus_probability: default_wrong_bus_probability(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_position_interval_ms() -> u64 {
    2000
}

fn default_ridership_interval_ms() -> u64 {
    3500
}

fn default_delay_probability() -> f64 {
    0.02
}

fn default_wrong_bus_probability() -> f64 {
    0.05
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{name} must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

/// Load `config/simulation.toml` when present; every setting has a default,
/// so a missing file just runs the stock simulation.
pub fn load_service_config() -> Result<ServiceConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/simulation").required(false))
        .build()?;
    parse_config(settings)
}

fn parse_config(settings: config::Config) -> Result<ServiceConfig, ConfigError> {
    let cfg: ServiceConfig = settings.try_deserialize()?;
    validate_probability(
        "simulation.delay_probability",
        cfg.simulation.delay_probability,
    )?;
    validate_probability(
        "simulation.wrong_bus_probability",
        cfg.simulation.wrong_bus_probability,
    )?;
    Ok(cfg)
}

fn validate_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<ServiceConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?;
        parse_config(settings)
    }

    #[test]
    fn test_defaults() {
        let cfg = from_toml("").unwrap();
        assert_eq!(cfg.simulation.position_interval_ms, 2000);
        assert_eq!(cfg.simulation.ridership_interval_ms, 3500);
        assert_eq!(cfg.simulation.delay_probability, 0.02);
        assert_eq!(cfg.simulation.wrong_bus_probability, 0.05);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let cfg = from_toml(
            r#"
            bind_addr = "127.0.0.1:9090"

            [simulation]
            position_interval_ms = 500
            delay_probability = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9090");
        assert_eq!(cfg.simulation.position_interval_ms, 500);
        assert_eq!(cfg.simulation.delay_probability, 0.5);
        // Untouched settings keep their defaults.
        assert_eq!(cfg.simulation.ridership_interval_ms, 3500);
    }

    #[test]
    fn test_probability_out_of_range_is_rejected() {
        let err = from_toml("[simulation]\ndelay_probability = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityOutOfRange { value, .. } if value == 1.5
        ));
    }
}
