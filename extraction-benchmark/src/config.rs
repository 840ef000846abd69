//! Configuration management for the extraction benchmark
//!
//! Loads scoring, output and extractor settings from TOML files and provides
//! runtime access.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// External extractors, keyed by scraper name
    #[serde(default)]
    pub extractors: IndexMap<String, ExtractorConfig>,
}

/// Scoring settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Above this many optional paragraphs only keep-all and drop-all are scored
    #[serde(default)]
    pub max_optional_paragraphs: OptionalParagraphCap,
    /// Scorers to run; empty runs every registered scorer
    #[serde(default)]
    pub scorers: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    #[serde(default = "default_true")]
    pub write_summary_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            write_summary_json: true,
        }
    }
}

/// One external extraction program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub command: String,
    /// Arguments; `{url}`, `{publisher}` and `{crawl_date}` are substituted per article
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub output: OutputMode,
    /// Field holding the paragraphs when `output = "json_field"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// How an extractor's stdout is turned into paragraphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One paragraph per line
    #[default]
    Lines,
    /// A JSON array of strings
    JsonArray,
    /// A JSON object with an array of strings under `field`
    JsonField,
}

/// Optional-paragraph cap: a number or `unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CapRepr", into = "CapRepr")]
pub enum OptionalParagraphCap {
    Limit(usize),
    Unlimited,
}

impl OptionalParagraphCap {
    /// Cap as understood by the scorers (`None` never caps)
    pub fn as_option(self) -> Option<usize> {
        match self {
            OptionalParagraphCap::Limit(limit) => Some(limit),
            OptionalParagraphCap::Unlimited => None,
        }
    }
}

impl Default for OptionalParagraphCap {
    fn default() -> Self {
        OptionalParagraphCap::Limit(4)
    }
}

impl fmt::Display for OptionalParagraphCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionalParagraphCap::Limit(limit) => write!(f, "{}", limit),
            OptionalParagraphCap::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl FromStr for OptionalParagraphCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unlimited") {
            return Ok(OptionalParagraphCap::Unlimited);
        }
        s.parse::<usize>()
            .map(OptionalParagraphCap::Limit)
            .map_err(|_| format!("expected a non-negative integer or 'unlimited', got '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CapRepr {
    Limit(usize),
    Keyword(String),
}

impl TryFrom<CapRepr> for OptionalParagraphCap {
    type Error = String;

    fn try_from(value: CapRepr) -> Result<Self, Self::Error> {
        match value {
            CapRepr::Limit(limit) => Ok(OptionalParagraphCap::Limit(limit)),
            CapRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl From<OptionalParagraphCap> for CapRepr {
    fn from(cap: OptionalParagraphCap) -> Self {
        match cap {
            OptionalParagraphCap::Limit(limit) => CapRepr::Limit(limit),
            OptionalParagraphCap::Unlimited => CapRepr::Keyword("unlimited".to_string()),
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_results_dir() -> String { "results".to_string() }

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        let config_paths = [
            "config/benchmark.toml",
            "../config/benchmark.toml",
            "extraction-benchmark/config/benchmark.toml",
        ];

        for path in &config_paths {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path);
                    return config;
                }
                Err(ConfigError::Io(_)) => {}
                Err(e) => tracing::warn!("Ignoring {}: {}", path, e),
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Configuration written by `init-config`: defaults plus example extractors
    pub fn sample() -> Self {
        let mut extractors = IndexMap::new();
        extractors.insert(
            "trafilatura".to_string(),
            ExtractorConfig {
                command: "trafilatura".to_string(),
                args: vec!["--no-comments".to_string(), "--no-tables".to_string()],
                output: OutputMode::Lines,
                field: None,
                enabled: true,
            },
        );
        extractors.insert(
            "fundus".to_string(),
            ExtractorConfig {
                command: "python3".to_string(),
                args: vec![
                    "scripts/extract_fundus.py".to_string(),
                    "--publisher".to_string(),
                    "{publisher}".to_string(),
                    "--crawl-date".to_string(),
                    "{crawl_date}".to_string(),
                ],
                output: OutputMode::JsonField,
                field: Some("body".to_string()),
                enabled: false,
            },
        );

        Self {
            extractors,
            ..Self::default()
        }
    }

    /// Enabled extractors in configuration order
    pub fn enabled_extractors(&self) -> Vec<(&str, &ExtractorConfig)> {
        self.extractors
            .iter()
            .filter(|(_, extractor)| extractor.enabled)
            .map(|(name, extractor)| (name.as_str(), extractor))
            .collect()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
