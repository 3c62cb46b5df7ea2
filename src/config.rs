use crate::core::{DEFAULT_MAX_MATCHES, DEFAULT_MIN_SCORE};
use crate::models::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSettings {
    #[serde(default = "default_network_path")]
    pub path: PathBuf,
    /// Optional `{"users": [..]}` file; generated profiles are used when absent
    #[serde(default)]
    pub profiles_path: Option<PathBuf>,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            path: default_network_path(),
            profiles_path: None,
        }
    }
}

fn default_network_path() -> PathBuf {
    PathBuf::from("data/sydney_network.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_matches: default_max_matches(),
        }
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_max_matches() -> usize { DEFAULT_MAX_MATCHES }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_route_weight")]
    pub route: f64,
    #[serde(default = "default_reverse_route_weight")]
    pub reverse_route: f64,
    #[serde(default = "default_time_weight")]
    pub time: f64,
    #[serde(default = "default_proximity_weight")]
    pub proximity: f64,
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            route: default_route_weight(),
            reverse_route: default_reverse_route_weight(),
            time: default_time_weight(),
            proximity: default_proximity_weight(),
            interest: default_interest_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            route: config.route,
            reverse_route: config.reverse_route,
            time: config.time,
            proximity: config.proximity,
            interest: config.interest,
        }
    }
}

fn default_route_weight() -> f64 { 0.35 }
fn default_reverse_route_weight() -> f64 { 0.25 }
fn default_time_weight() -> f64 { 0.25 }
fn default_proximity_weight() -> f64 { 0.15 }
fn default_interest_weight() -> f64 { 0.20 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_generator_count")]
    pub count: usize,
    /// Fixed seed for reproducible runs; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            count: default_generator_count(),
            seed: None,
        }
    }
}

fn default_generator_count() -> usize { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COMMUTE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMMUTE__MATCHING__MIN_SCORE -> matching.min_score
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COMMUTE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
