//! Analysis configuration: strictness presets, threshold overrides, and the
//! density formula knobs. All values are validated up front so configuration
//! mistakes surface before any text is touched.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by configuration validation. Always fatal to the call.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("unknown level '{0}', expected one of: relaxed, standard, strict, academic")]
    UnknownLevel(String),
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ValueOutOfRange { name: &'static str, value: f64 },
    #[error("density weights must not all be zero")]
    ZeroWeights,
    #[error("grade band edges must be strictly ascending within (0.0, 1.0): {0:?}")]
    InvalidGradeBands(Vec<f64>),
    #[error("hedge threshold must be at least 1")]
    ZeroHedgeThreshold,
}

/// Strictness presets. Each level carries a default minimum density and a
/// jargon sensitivity; both can be overridden per field on [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Relaxed,
    Standard,
    Strict,
    Academic,
}

impl Level {
    pub fn default_min_density(&self) -> f64 {
        match self {
            Level::Relaxed => 0.30,
            Level::Standard => 0.50,
            Level::Strict => 0.65,
            Level::Academic => 0.75,
        }
    }

    /// Jargon ratio above which an unexplained sentence is flagged.
    pub fn jargon_threshold(&self) -> f64 {
        match self {
            Level::Relaxed => 0.40,
            Level::Standard => 0.30,
            Level::Strict => 0.25,
            Level::Academic => 0.20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Relaxed => "relaxed",
            Level::Standard => "standard",
            Level::Strict => "strict",
            Level::Academic => "academic",
        }
    }
}

impl FromStr for Level {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Level::Relaxed),
            "standard" => Ok(Level::Standard),
            "strict" => Ok(Level::Strict),
            "academic" => Ok(Level::Academic),
            other => Err(ConfigurationError::UnknownLevel(other.to_string())),
        }
    }
}

/// Weights for the three density components. Defaults follow the calculator:
/// content 0.4, unique concepts 0.3, precision 0.3.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityWeights {
    pub content: f64,
    pub unique: f64,
    pub precision: f64,
}

impl Default for DensityWeights {
    fn default() -> Self {
        Self {
            content: 0.4,
            unique: 0.3,
            precision: 0.3,
        }
    }
}

/// Per-severity penalty weights applied in the precision component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 0.02,
            medium: 0.05,
            high: 0.10,
        }
    }
}

/// The five grade bands are fixed in name; their edges are configuration so
/// they can be recalibrated empirically without a code change.
pub const GRADE_NAMES: [&str; 5] = ["vapor", "thin", "adequate", "dense", "crystalline"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBands {
    /// Four ascending edges partitioning [0, 1] into five bands.
    pub edges: [f64; 4],
}

impl Default for GradeBands {
    fn default() -> Self {
        Self {
            edges: [0.2, 0.4, 0.6, 0.8],
        }
    }
}

impl GradeBands {
    pub fn grade(&self, density: f64) -> &'static str {
        let idx = self.edges.iter().filter(|&&edge| density >= edge).count();
        GRADE_NAMES[idx]
    }
}

/// Full analysis configuration. `Default` gives the standard preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub level: Level,
    /// Overrides the level's default minimum density when set.
    pub min_density: Option<f64>,
    /// Domain vocabulary exempt from vagueness and jargon checks.
    pub domain_terms: Vec<String>,
    /// Extra weasel terms matched on word boundaries.
    pub additional_weasels: Vec<String>,
    /// Extra filler phrases matched on word boundaries.
    pub additional_fillers: Vec<String>,
    /// When non-empty, only paragraphs under these section headers are analyzed.
    pub sections: Vec<String>,
    pub severity_weights: SeverityWeights,
    pub density_weights: DensityWeights,
    pub grade_bands: GradeBands,
    /// Hedges per clause at or above which a HEDGE_STACK flag fires.
    pub hedge_threshold: usize,
    /// Cap on the flag penalty inside the precision component.
    pub penalty_cap: f64,
    /// Characters of display context kept on each side of a flagged span.
    pub context_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Standard,
            min_density: None,
            domain_terms: Vec::new(),
            additional_weasels: Vec::new(),
            additional_fillers: Vec::new(),
            sections: Vec::new(),
            severity_weights: SeverityWeights::default(),
            density_weights: DensityWeights::default(),
            grade_bands: GradeBands::default(),
            hedge_threshold: 3,
            penalty_cap: 0.5,
            context_window: 40,
        }
    }
}

impl Config {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Effective minimum density: explicit override, else the level default.
    pub fn min_density(&self) -> f64 {
        self.min_density
            .unwrap_or_else(|| self.level.default_min_density())
    }

    /// Validate every numeric field. Runs before analysis starts; any error
    /// here is fatal to the call.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_unit_range("min_density", self.min_density.unwrap_or(0.0))?;
        check_unit_range("penalty_cap", self.penalty_cap)?;
        check_unit_range("severity_weights.low", self.severity_weights.low)?;
        check_unit_range("severity_weights.medium", self.severity_weights.medium)?;
        check_unit_range("severity_weights.high", self.severity_weights.high)?;
        check_unit_range("density_weights.content", self.density_weights.content)?;
        check_unit_range("density_weights.unique", self.density_weights.unique)?;
        check_unit_range("density_weights.precision", self.density_weights.precision)?;

        let weight_sum = self.density_weights.content
            + self.density_weights.unique
            + self.density_weights.precision;
        if weight_sum <= 0.0 {
            return Err(ConfigurationError::ZeroWeights);
        }

        if self.hedge_threshold == 0 {
            return Err(ConfigurationError::ZeroHedgeThreshold);
        }

        let edges = &self.grade_bands.edges;
        let ascending = edges.windows(2).all(|w| w[0] < w[1]);
        let in_range = edges.iter().all(|&e| e > 0.0 && e < 1.0);
        if !ascending || !in_range {
            return Err(ConfigurationError::InvalidGradeBands(edges.to_vec()));
        }

        Ok(())
    }

    pub fn is_domain_term(&self, word: &str) -> bool {
        self.domain_terms
            .iter()
            .any(|t| t.eq_ignore_ascii_case(word))
    }
}

fn check_unit_range(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(ConfigurationError::ValueOutOfRange { name, value });
    }
    Ok(())
}
