//! Configuration structures for the door episode toolkit
//!
//! This module contains the command line surface, the simulation configuration
//! document and its validation logic.

use super::timestamp::serde_timestamp;
use super::ConfigFormat;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default location of the simulation configuration document
pub const DEFAULT_CONFIG_PATH: &str = "config/simulation_config.yaml";

/// Default location of the generated event table
pub const DEFAULT_EVENTS_OUTPUT: &str = "data/simulated_data.csv";

/// Default location of the extracted episode feature table
pub const DEFAULT_EPISODES_OUTPUT: &str = "data/episode_data.csv";

/// Seed used when neither the document nor the command line provides one
pub const DEFAULT_SEED: u64 = 42;

/// Scenario whose episodes never emit a door-close event
pub const DOOR_LEFT_OPEN_SCENARIO: &str = "door_left_open";

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "door-episodes",
    version,
    about = "Door Episodes - synthesizes door-access event logs and extracts episode features",
    long_about = "Generates labeled door-access event logs from weighted scenarios and reconstructs door-open episodes from an event log into a per-episode feature table.

EXAMPLES:
    # Generate the default dataset
    door-episodes simulate

    # Generate 5000 episodes with a custom configuration
    door-episodes simulate --config my-config.yaml --episodes 5000

    # Print the built-in configuration as a template
    door-episodes simulate --print-config > my-config.yaml

    # Validate configuration without generating
    door-episodes simulate --config my-config.yaml --dry-run

    # Extract episode features from an event log
    door-episodes extract --data data/simulated_data.csv

CONFIGURATION:
    Values are resolved in this order:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: YAML (.yaml, .yml), JSON (.json)"
)]
pub struct CliArgs {
    /// Pipeline to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true, help = "Emit log lines as JSON")]
    pub log_json: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, help = "Directory for daily rolling log files")]
    pub log_dir: Option<String>,
}

/// Available pipelines
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a synthetic door-access event table
    Simulate(SimulateArgs),
    /// Reconstruct episodes from an event table and write their features
    Extract(ExtractArgs),
}

/// Arguments for the generation pipeline
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Configuration file path (YAML or JSON)"
    )]
    pub config: String,

    /// Override total number of episodes
    #[arg(
        long,
        help = "Override total number of episodes",
        long_help = "Total number of synthetic episodes to generate. Overrides simulation.num_episodes. Must be greater than 0."
    )]
    pub episodes: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results (default: 42)")]
    pub seed: Option<u64>,

    /// Output path for the event table
    #[arg(short, long, default_value = DEFAULT_EVENTS_OUTPUT, help = "Output path for the event table")]
    pub output: String,

    /// Validate configuration without generating
    #[arg(long, help = "Validate configuration without generating events")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in YAML format and exit")]
    pub print_config: bool,
}

/// Arguments for the extraction pipeline
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Path to the event table
    #[arg(long, help = "Path to the extracted data file")]
    pub data: String,

    /// Output path for the episode feature table
    #[arg(
        short,
        long,
        default_value = DEFAULT_EPISODES_OUTPUT,
        help = "Output path for the episode feature table"
    )]
    pub output: String,
}

/// Inclusive range of episode durations in whole seconds
///
/// Stored in documents as a two-element sequence `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct DurationRange {
    /// Shortest duration
    pub min: u32,
    /// Longest duration
    pub max: u32,
}

impl DurationRange {
    /// Create a new range
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl From<(u32, u32)> for DurationRange {
    fn from((min, max): (u32, u32)) -> Self {
        Self { min, max }
    }
}

impl From<DurationRange> for (u32, u32) {
    fn from(range: DurationRange) -> Self {
        (range.min, range.max)
    }
}

/// Parameters of one synthetic scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Episode duration range in seconds
    pub duration_range: DurationRange,
    /// Tailgating flag stamped on every event of the episode
    #[serde(deserialize_with = "deserialize_flag")]
    pub tailgating_detected: bool,
    /// Human feedback label
    #[serde(default)]
    pub human_feedback: Option<String>,
    /// Human explanation of the feedback
    #[serde(default)]
    pub human_logic: Option<String>,
}

/// Global simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// First calendar day episodes may fall on
    #[serde(with = "serde_timestamp")]
    pub start_date: NaiveDateTime,
    /// Number of episodes to generate
    pub num_episodes: usize,
    /// Random seed for reproducible results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Configuration for the door-access simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Global settings
    pub simulation: SimulationSettings,
    /// Relative selection weight per scenario
    pub scenario_weights: BTreeMap<String, f64>,
    /// Parameters per scenario
    pub scenario_configs: BTreeMap<String, ScenarioConfig>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .yaml, .yml, .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Episode count is invalid
    #[error("Episode count must be greater than 0, got {0}")]
    InvalidEpisodeCount(usize),

    /// No scenario weights were provided
    #[error("At least one scenario weight is required")]
    NoScenarios,

    /// A weight is negative or not a finite number
    #[error("Invalid weight for scenario '{scenario}': {weight} (must be a finite number >= 0)")]
    InvalidWeight {
        /// Scenario name
        scenario: String,
        /// The offending weight
        weight: f64,
    },

    /// Every weight is zero
    #[error("All scenario weights are zero")]
    AllWeightsZero,

    /// A selectable scenario has no parameters
    #[error("Scenario '{0}' has a positive weight but no entry in scenario_configs")]
    MissingScenarioConfig(String),

    /// Duration range is invalid
    #[error("Invalid duration range for scenario '{scenario}': [{min}, {max}] (need 2 <= min <= max)")]
    InvalidDurationRange {
        /// Scenario name
        scenario: String,
        /// Configured minimum
        min: u32,
        /// Configured maximum
        max: u32,
    },
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let start_date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();

        let scenario = |min, max, tailgating, feedback: &str, logic: &str| ScenarioConfig {
            duration_range: DurationRange::new(min, max),
            tailgating_detected: tailgating,
            human_feedback: Some(feedback.to_string()),
            human_logic: Some(logic.to_string()),
        };

        let mut scenario_weights = BTreeMap::new();
        scenario_weights.insert("normal_entry".to_string(), 0.6);
        scenario_weights.insert("tailgating".to_string(), 0.2);
        scenario_weights.insert(DOOR_LEFT_OPEN_SCENARIO.to_string(), 0.1);
        scenario_weights.insert("quick_pass".to_string(), 0.1);

        let mut scenario_configs = BTreeMap::new();
        scenario_configs.insert(
            "normal_entry".to_string(),
            scenario(5, 60, false, "Normal", "Single badge holder entered and the door closed promptly."),
        );
        scenario_configs.insert(
            "tailgating".to_string(),
            scenario(
                10,
                90,
                true,
                "Suspicious",
                "Door stayed open long enough for a second person to follow without badging.",
            ),
        );
        scenario_configs.insert(
            DOOR_LEFT_OPEN_SCENARIO.to_string(),
            scenario(200, 600, false, "Suspicious", "Door was opened and never closed."),
        );
        scenario_configs.insert(
            "quick_pass".to_string(),
            scenario(2, 10, false, "Normal", "Brief pass-through; the door closed within seconds."),
        );

        Self {
            simulation: SimulationSettings { start_date, num_episodes: 1000, seed: None },
            scenario_weights,
            scenario_configs,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed simulate arguments
    ///
    /// Loads the document named by `--config` and applies command line overrides.
    pub fn from_cli_args(args: &SimulateArgs) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(&args.config)?;
        Self::apply_cli_overrides(&mut config, args);
        Ok(config)
    }

    /// Load configuration from a file (YAML or JSON)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ConfigFormat::from_extension(ext)
                .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))?,
            None => return Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        };

        let content = fs::read_to_string(path)?;
        Self::from_str_with_format(&content, format)
    }

    /// Parse configuration text in the given format
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: &SimulateArgs) {
        if let Some(value) = args.episodes {
            config.simulation.num_episodes = value;
        }
        if let Some(value) = args.seed {
            config.simulation.seed = Some(value);
        }
    }

    /// Print configuration as YAML
    pub fn print_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Seed the random source is built from
    pub fn effective_seed(&self) -> u64 {
        self.simulation.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Look up the parameters of a scenario
    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenario_configs.get(name)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.simulation.num_episodes == 0 {
            return Err(ConfigValidationError::InvalidEpisodeCount(self.simulation.num_episodes));
        }

        if self.scenario_weights.is_empty() {
            return Err(ConfigValidationError::NoScenarios);
        }

        for (scenario, &weight) in &self.scenario_weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigValidationError::InvalidWeight {
                    scenario: scenario.clone(),
                    weight,
                });
            }
        }

        if self.scenario_weights.values().all(|&weight| weight == 0.0) {
            return Err(ConfigValidationError::AllWeightsZero);
        }

        for (scenario, &weight) in &self.scenario_weights {
            if weight > 0.0 && !self.scenario_configs.contains_key(scenario) {
                return Err(ConfigValidationError::MissingScenarioConfig(scenario.clone()));
            }
        }

        for (scenario, params) in &self.scenario_configs {
            let DurationRange { min, max } = params.duration_range;
            if min < 2 || min > max {
                return Err(ConfigValidationError::InvalidDurationRange {
                    scenario: scenario.clone(),
                    min,
                    max,
                });
            }
        }

        Ok(())
    }
}

/// Accept `true`/`false` as well as numeric `0`/`1` flags
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagValue {
        Bool(bool),
        Int(i64),
    }

    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(value) => Ok(value),
        FlagValue::Int(0) => Ok(false),
        FlagValue::Int(1) => Ok(true),
        FlagValue::Int(other) => {
            Err(serde::de::Error::custom(format!("flag must be 0 or 1, got {}", other)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const SAMPLE_YAML: &str = r#"
simulation:
  start_date: "2024-02-01 00:00:00"
  num_episodes: 250
scenario_weights:
  normal: 3
  door_left_open: 1
  retired: 0
scenario_configs:
  normal:
    duration_range: [5, 30]
    tailgating_detected: 0
    human_feedback: "Normal"
    human_logic: "Routine entry"
  door_left_open:
    duration_range: [200, 400]
    tailgating_detected: 1
    human_feedback: null
    human_logic: "Never closed"
"#;

    fn simulate_args(config: &str) -> SimulateArgs {
        SimulateArgs {
            config: config.to_string(),
            episodes: None,
            seed: None,
            output: DEFAULT_EVENTS_OUTPUT.to_string(),
            dry_run: false,
            print_config: false,
        }
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.simulation.num_episodes, 1000);
        assert_eq!(config.simulation.start_date.to_string(), "2024-01-01 00:00:00");
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.effective_seed(), DEFAULT_SEED);
        assert_eq!(config.scenario_weights.len(), 4);
        assert!(config.scenario(DOOR_LEFT_OPEN_SCENARIO).is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing() {
        let config = SimulationConfig::from_str_with_format(SAMPLE_YAML, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.simulation.num_episodes, 250);
        assert_eq!(config.scenario_weights["normal"], 3.0);
        assert_eq!(config.scenario_weights["retired"], 0.0);

        let normal = config.scenario("normal").unwrap();
        assert_eq!(normal.duration_range, DurationRange::new(5, 30));
        assert!(!normal.tailgating_detected);
        assert_eq!(normal.human_feedback.as_deref(), Some("Normal"));

        let left_open = config.scenario("door_left_open").unwrap();
        assert!(left_open.tailgating_detected);
        assert!(left_open.human_feedback.is_none());

        // Zero-weight scenario without parameters is allowed
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flag_accepts_booleans() {
        let yaml = SAMPLE_YAML.replace("tailgating_detected: 0", "tailgating_detected: true");
        let config = SimulationConfig::from_str_with_format(&yaml, ConfigFormat::Yaml).unwrap();
        assert!(config.scenario("normal").unwrap().tailgating_detected);

        let yaml = SAMPLE_YAML.replace("tailgating_detected: 0", "tailgating_detected: 7");
        assert!(SimulationConfig::from_str_with_format(&yaml, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn test_missing_required_key_is_error() {
        let yaml = SAMPLE_YAML.replace("  num_episodes: 250\n", "");
        let result = SimulationConfig::from_str_with_format(&yaml, ConfigFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        temp_file.write_all(SAMPLE_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.simulation.num_episodes, 250);
    }

    #[test]
    fn test_json_config_file_loading() {
        let json = serde_json::to_string(&SimulationConfig::default()).unwrap();
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_config_file_not_found() {
        let result = SimulationConfig::from_file("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        let result = SimulationConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut temp_file = Builder::new().suffix(".yml").tempfile().unwrap();
        temp_file.write_all(SAMPLE_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let mut args = simulate_args(temp_file.path().to_str().unwrap());
        args.episodes = Some(12);
        args.seed = Some(7);

        let config = SimulationConfig::from_cli_args(&args).unwrap();
        assert_eq!(config.simulation.num_episodes, 12);
        assert_eq!(config.effective_seed(), 7);
    }

    #[test]
    fn test_print_yaml_round_trips() {
        let config = SimulationConfig::default();
        let yaml = config.print_yaml().unwrap();
        assert!(yaml.contains("2024-01-01 00:00:00"));
        let back = SimulationConfig::from_str_with_format(&yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validation_episode_count() {
        let mut config = SimulationConfig::default();
        config.simulation.num_episodes = 0;

        match config.validate() {
            Err(ConfigValidationError::InvalidEpisodeCount(0)) => {}
            other => panic!("Expected InvalidEpisodeCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_weights() {
        let mut config = SimulationConfig::default();
        config.scenario_weights.insert("tailgating".to_string(), -1.0);
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidWeight { .. })));

        let mut config = SimulationConfig::default();
        for weight in config.scenario_weights.values_mut() {
            *weight = 0.0;
        }
        assert!(matches!(config.validate(), Err(ConfigValidationError::AllWeightsZero)));

        let mut config = SimulationConfig::default();
        config.scenario_weights.clear();
        assert!(matches!(config.validate(), Err(ConfigValidationError::NoScenarios)));
    }

    #[test]
    fn test_validation_missing_scenario_config() {
        let mut config = SimulationConfig::default();
        config.scenario_weights.insert("ghost".to_string(), 0.5);

        match config.validate() {
            Err(ConfigValidationError::MissingScenarioConfig(name)) => assert_eq!(name, "ghost"),
            other => panic!("Expected MissingScenarioConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_duration_range() {
        let mut config = SimulationConfig::default();
        config.scenario_configs.get_mut("quick_pass").unwrap().duration_range =
            DurationRange::new(1, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidDurationRange { min: 1, max: 10, .. })
        ));

        let mut config = SimulationConfig::default();
        config.scenario_configs.get_mut("normal_entry").unwrap().duration_range =
            DurationRange::new(60, 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_subcommand_parsing() {
        let cli = CliArgs::try_parse_from(["test", "simulate", "--episodes", "50"]).unwrap();
        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.episodes, Some(50));
                assert_eq!(args.config, DEFAULT_CONFIG_PATH);
                assert_eq!(args.output, DEFAULT_EVENTS_OUTPUT);
            }
            other => panic!("Expected simulate subcommand, got {:?}", other),
        }

        let cli = CliArgs::try_parse_from(["test", "extract", "--data", "in.csv", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.data, "in.csv");
                assert_eq!(args.output, DEFAULT_EPISODES_OUTPUT);
            }
            other => panic!("Expected extract subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_requires_data() {
        assert!(CliArgs::try_parse_from(["test", "extract"]).is_err());
    }
}
