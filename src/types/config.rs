//! Configuration structures for the VLAN fixture generator
//!
//! This module contains the command line arguments, the partial JSON
//! configuration file, and the merged generator configuration with its
//! validation logic.

use super::{ClassPolicy, OutputFormat};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generation::record::{DEFAULT_VLAN_ID_MIN, VLAN_ID_MAX, VLAN_ID_MIN};

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vlan-config-faker",
    version,
    about = "VLAN Config Faker - Generates reproducible VLAN/RFC 1918 network fixtures",
    long_about = "Generates VLAN records (VLAN ID, private /24 network, department, WAN uplink) for firewall and router configuration tests. Every batch has unique VLAN IDs and non-overlapping networks, and the same seed always reproduces the same batch.

EXAMPLES:
    # Generate 10 records as CSV on stdout
    vlan-config-faker generate

    # Reproducible batch written to a file
    vlan-config-faker generate --count 500 --seed 42 --output vlans.csv

    # JSON output using only class C networks
    vlan-config-faker generate --count 50 --format json --class-policy class-c

    # Use a configuration file
    vlan-config-faker generate --config fixtures.json

    # Generate configuration template
    vlan-config-faker generate --print-config > fixtures.json

    # Check an existing fixture file
    vlan-config-faker validate --input vlans.csv

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Suppress progress and summary output
    #[arg(short, long, global = true, help = "Suppress progress and summary output")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a batch of VLAN records
    Generate(GenerateArgs),
    /// Check a CSV fixture file against the batch invariants
    Validate(ValidateArgs),
}

/// Arguments of the `generate` subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of records to generate
    #[arg(
        short = 'n',
        long,
        help = "Number of VLAN records to generate",
        long_help = "Number of VLAN records to generate. Must be greater than 0 and fit in the VLAN range. Default: 10"
    )]
    pub count: Option<usize>,

    /// Random seed for reproducible results
    #[arg(
        short,
        long,
        help = "Random seed for reproducible results",
        long_help = "Random seed. The same seed and settings always produce the same records. When omitted a seed is drawn and reported so the run can be replayed."
    )]
    pub seed: Option<u64>,

    /// Lowest VLAN ID to assign
    #[arg(long, help = "Lowest VLAN ID (1-4094, default 10)")]
    pub vlan_id_min: Option<u16>,

    /// Highest VLAN ID to assign
    #[arg(long, help = "Highest VLAN ID (1-4094, default 4094)")]
    pub vlan_id_max: Option<u16>,

    /// How each record's address class is chosen
    #[arg(
        long,
        help = "Address class policy",
        long_help = "How the RFC 1918 class of each network is chosen: 'weighted' (80/12/8), 'weighted:A,B,C' with custom weights, 'round-robin', or a single class such as 'class-a'. Default: weighted"
    )]
    pub class_policy: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        help = "Output format (csv, json or jsonl)",
        long_help = "Output format for generated records. Supported formats: csv, json, jsonl. Default: csv"
    )]
    pub format: Option<String>,

    /// Output file; stdout when omitted
    #[arg(short, long, help = "Output file path (default: stdout)")]
    pub output: Option<String>,

    /// Overwrite an existing output file
    #[arg(long, help = "Overwrite the output file if it exists")]
    pub force: bool,

    /// Dry run mode - validate configuration without generating
    #[arg(long, help = "Validate configuration without generating records")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Arguments of the `validate` subcommand
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// CSV fixture file to check
    #[arg(short, long, help = "CSV fixture file to validate")]
    pub input: String,

    /// Lowest permitted VLAN ID
    #[arg(long, default_value_t = DEFAULT_VLAN_ID_MIN, help = "Lowest permitted VLAN ID")]
    pub vlan_id_min: u16,

    /// Highest permitted VLAN ID
    #[arg(long, default_value_t = VLAN_ID_MAX, help = "Highest permitted VLAN ID")]
    pub vlan_id_max: u16,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of records to generate
    pub count: Option<usize>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Lowest VLAN ID to assign
    pub vlan_id_min: Option<u16>,

    /// Highest VLAN ID to assign
    pub vlan_id_max: Option<u16>,

    /// Address class policy
    pub class_policy: Option<ClassPolicy>,

    /// Output format
    pub output_format: Option<String>,

    /// Output file path
    pub output: Option<String>,

    /// Overwrite an existing output file
    pub force: Option<bool>,
}

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records to generate
    pub count: usize,

    /// Random seed; `None` draws a fresh seed at run time
    pub seed: Option<u64>,

    /// Lowest VLAN ID to assign
    pub vlan_id_min: u16,

    /// Highest VLAN ID to assign
    pub vlan_id_max: u16,

    /// Address class policy
    pub class_policy: ClassPolicy,

    /// Output format name
    pub output_format: String,

    /// Output file path, stdout when `None`
    pub output: Option<String>,

    /// Overwrite an existing output file
    pub force: bool,
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

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A command line value could not be parsed
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidArgument {
        /// Name of the argument
        field: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Validation errors for generator configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Record count is invalid
    #[error("Record count must be greater than 0, got {0}")]
    InvalidCount(usize),

    /// VLAN range is invalid
    #[error("Invalid VLAN range: {0}-{1} (must satisfy 1 <= min <= max <= 4094)")]
    InvalidVlanRange(u16, u16),

    /// All class weights are zero
    #[error("Class policy {0} gives every address class a weight of 0")]
    EmptyClassWeights(ClassPolicy),

    /// Output format is not recognised
    #[error("Unknown output format: {0} (supported: csv, json, jsonl)")]
    UnknownOutputFormat(String),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 10,
            seed: None,
            vlan_id_min: DEFAULT_VLAN_ID_MIN,
            vlan_id_max: VLAN_ID_MAX,
            class_policy: ClassPolicy::default(),
            output_format: "csv".to_string(),
            output: None,
            force: false,
        }
    }
}

impl GeneratorConfig {
    /// Create configuration from parsed `generate` arguments
    pub fn from_generate_args(args: &GenerateArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(config_path) => Self::from_file(config_path)?,
            None => Self::default(),
        };

        // CLI takes precedence over the file
        config.apply_cli_overrides(args)?;
        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    pub fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            count: config_file.count.unwrap_or(defaults.count),
            seed: config_file.seed.or(defaults.seed),
            vlan_id_min: config_file.vlan_id_min.unwrap_or(defaults.vlan_id_min),
            vlan_id_max: config_file.vlan_id_max.unwrap_or(defaults.vlan_id_max),
            class_policy: config_file.class_policy.unwrap_or(defaults.class_policy),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            output: config_file.output.or(defaults.output),
            force: config_file.force.unwrap_or(defaults.force),
        }
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, args: &GenerateArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.count {
            self.count = value;
        }
        if let Some(value) = args.seed {
            self.seed = Some(value);
        }
        if let Some(value) = args.vlan_id_min {
            self.vlan_id_min = value;
        }
        if let Some(value) = args.vlan_id_max {
            self.vlan_id_max = value;
        }
        if let Some(value) = &args.class_policy {
            self.class_policy = value.parse().map_err(|reason| ConfigError::InvalidArgument {
                field: "class_policy".to_string(),
                value: value.clone(),
                reason,
            })?;
        }
        if let Some(value) = &args.format {
            self.output_format = value.clone();
        }
        if let Some(value) = &args.output {
            self.output = Some(value.clone());
        }
        if args.force {
            self.force = true;
        }
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.count == 0 {
            return Err(ConfigValidationError::InvalidCount(self.count));
        }

        if self.vlan_id_min < VLAN_ID_MIN
            || self.vlan_id_max > VLAN_ID_MAX
            || self.vlan_id_min > self.vlan_id_max
        {
            return Err(ConfigValidationError::InvalidVlanRange(self.vlan_id_min, self.vlan_id_max));
        }

        if self.class_policy.total_weight() == 0 {
            return Err(ConfigValidationError::EmptyClassWeights(self.class_policy));
        }

        self.get_output_format()?;
        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, ConfigValidationError> {
        self.output_format
            .parse()
            .map_err(|_| ConfigValidationError::UnknownOutputFormat(self.output_format.clone()))
    }

    /// Seed for this run and whether it was freshly drawn from OS entropy
    pub fn resolve_seed(&self) -> (u64, bool) {
        match self.seed {
            Some(seed) => (seed, false),
            None => (rand::random(), true),
        }
    }

    /// Number of VLAN IDs in the configured range
    pub fn vlan_space(&self) -> usize {
        if self.vlan_id_min > self.vlan_id_max {
            0
        } else {
            usize::from(self.vlan_id_max - self.vlan_id_min) + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressClass;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();

        assert_eq!(config.count, 10);
        assert!(config.seed.is_none());
        assert_eq!(config.vlan_id_min, 10);
        assert_eq!(config.vlan_id_max, 4094);
        assert_eq!(config.class_policy, ClassPolicy::Weighted { a: 80, b: 12, c: 8 });
        assert_eq!(config.output_format, "csv");
        assert!(config.output.is_none());
        assert!(!config.force);
        assert_eq!(config.vlan_space(), 4085);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "count": 250,
            "seed": 12345,
            "vlan_id_min": 100,
            "class_policy": { "mode": "only", "class": "B" },
            "output_format": "json"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = GeneratorConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.count, 250);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.vlan_id_min, 100);
        assert_eq!(config.vlan_id_max, 4094);
        assert_eq!(config.class_policy, ClassPolicy::Only { class: AddressClass::B });
        assert_eq!(config.get_output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_config_file_errors() {
        let missing = GeneratorConfig::from_file("/nonexistent/fixtures.json");
        assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

        let toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(toml.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));

        let broken = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(broken.path(), "{ not json").unwrap();
        assert!(matches!(GeneratorConfig::from_file(broken.path()), Err(ConfigError::JsonError(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let args = GenerateArgs {
            count: Some(80),
            seed: Some(54321),
            vlan_id_max: Some(2000),
            class_policy: Some("round-robin".to_string()),
            format: Some("jsonl".to_string()),
            force: true,
            ..Default::default()
        };

        let config = GeneratorConfig::from_generate_args(&args).unwrap();

        assert_eq!(config.count, 80);
        assert_eq!(config.seed, Some(54321));
        assert_eq!(config.vlan_id_max, 2000);
        assert_eq!(config.class_policy, ClassPolicy::RoundRobin);
        assert_eq!(config.get_output_format().unwrap(), OutputFormat::JsonLines);
        assert!(config.force);
        // Default values should remain for non-overridden fields
        assert_eq!(config.vlan_id_min, 10);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_invalid_class_policy_argument() {
        let args = GenerateArgs { class_policy: Some("class-z".to_string()), ..Default::default() };
        match GeneratorConfig::from_generate_args(&args) {
            Err(ConfigError::InvalidArgument { field, value, .. }) => {
                assert_eq!(field, "class_policy");
                assert_eq!(value, "class-z");
            }
            other => panic!("Expected InvalidArgument error, got {:?}", other),
        }
    }

    #[test]
    fn test_generator_config_validation_success() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_generator_config_validation_count() {
        let config = GeneratorConfig { count: 0, ..Default::default() };
        match config.validate() {
            Err(ConfigValidationError::InvalidCount(0)) => {}
            _ => panic!("Expected InvalidCount error"),
        }
    }

    #[test]
    fn test_generator_config_validation_vlan_range() {
        for (min, max) in [(0, 100), (200, 100), (10, 4095)] {
            let config = GeneratorConfig { vlan_id_min: min, vlan_id_max: max, ..Default::default() };
            match config.validate() {
                Err(ConfigValidationError::InvalidVlanRange(a, b)) => {
                    assert_eq!((a, b), (min, max));
                }
                _ => panic!("Expected InvalidVlanRange error for {}-{}", min, max),
            }
        }
    }

    #[test]
    fn test_generator_config_validation_weights_and_format() {
        let config = GeneratorConfig {
            class_policy: ClassPolicy::Weighted { a: 0, b: 0, c: 0 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigValidationError::EmptyClassWeights(_))));

        let config = GeneratorConfig { output_format: "xml".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::UnknownOutputFormat(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.json");
        let config = GeneratorConfig {
            count: 33,
            seed: Some(9),
            class_policy: ClassPolicy::RoundRobin,
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        let reloaded = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
        assert!(config.print_json().unwrap().contains("\"round_robin\""));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = CliArgs::try_parse_from([
            "vlan-config-faker",
            "generate",
            "--count",
            "5",
            "--seed",
            "7",
            "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.count, Some(5));
                assert_eq!(args.seed, Some(7));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli =
            CliArgs::try_parse_from(["vlan-config-faker", "validate", "--input", "a.csv"]).unwrap();
        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.input, "a.csv");
                assert_eq!((args.vlan_id_min, args.vlan_id_max), (10, 4094));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resolve_seed() {
        let fixed = GeneratorConfig { seed: Some(7), ..GeneratorConfig::default() };
        assert_eq!(fixed.resolve_seed(), (7, false));

        let (_, drawn) = GeneratorConfig::default().resolve_seed();
        assert!(drawn);
    }
}
