// Configuration loading and parsing (config/pitchcall.toml).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::RecommendError;
use crate::outcome::OutcomeKind;

/// Name of the single config file under `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "pitchcall.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Where the historical pitch table lives and which seasons to keep.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub path: String,
    /// Drop rows from seasons before this year. Absent or `None` keeps every
    /// season; the shipped defaults opt into 2021 onward.
    #[serde(default)]
    pub min_year: Option<i32>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            path: "data/statcast.csv".into(),
            min_year: None,
        }
    }
}

/// Everything the recommendation engine needs besides the data itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Batted balls slower than this (mph) count as weak contact.
    #[serde(default = "default_weak_contact_mph")]
    pub weak_contact_mph: f64,
    /// Pseudo-count pulling small samples toward the table-wide score.
    /// Zero disables smoothing.
    #[serde(default = "default_prior_strength")]
    pub prior_strength: f64,
    #[serde(default)]
    pub weights: ScoringWeights,
}

fn default_weak_contact_mph() -> f64 {
    80.0
}

fn default_prior_strength() -> f64 {
    10.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            weak_contact_mph: default_weak_contact_mph(),
            prior_strength: default_prior_strength(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Per-outcome weights for the weighted success score.
///
/// The defaults sum to 1.0 so the score reads as a rate, but any vector of
/// non-negative finite weights is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoringWeights {
    pub strikeout: f64,
    pub swinging_strike: f64,
    pub called_strike: f64,
    pub foul: f64,
    pub weak_contact: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            strikeout: 0.35,
            swinging_strike: 0.25,
            called_strike: 0.15,
            foul: 0.10,
            weak_contact: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Build weights from a slice ordered like [`OutcomeKind::SCORED`].
    pub fn from_slice(values: &[f64]) -> Result<Self, RecommendError> {
        let [strikeout, swinging_strike, called_strike, foul, weak_contact] = values else {
            return Err(RecommendError::InvalidWeights {
                field: "weights".into(),
                message: format!(
                    "expected {} weights, got {}",
                    OutcomeKind::SCORED.len(),
                    values.len()
                ),
            });
        };
        let weights = ScoringWeights {
            strikeout: *strikeout,
            swinging_strike: *swinging_strike,
            called_strike: *called_strike,
            foul: *foul,
            weak_contact: *weak_contact,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Weight for a scored kind; unscored kinds weigh nothing.
    pub fn weight_for(&self, kind: OutcomeKind) -> f64 {
        match kind {
            OutcomeKind::Strikeout => self.strikeout,
            OutcomeKind::SwingingStrike => self.swinging_strike,
            OutcomeKind::CalledStrike => self.called_strike,
            OutcomeKind::Foul => self.foul,
            OutcomeKind::WeakContact => self.weak_contact,
            OutcomeKind::Hit | OutcomeKind::Ball | OutcomeKind::Other => 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        OutcomeKind::SCORED.iter().map(|&k| self.weight_for(k)).sum()
    }

    /// Every weight must be finite and non-negative.
    pub fn validate(&self) -> Result<(), RecommendError> {
        for kind in OutcomeKind::SCORED {
            let w = self.weight_for(kind);
            if !w.is_finite() || w < 0.0 {
                return Err(RecommendError::InvalidWeights {
                    field: format!("weights.{}", kind.label()),
                    message: format!("must be a finite value >= 0, got {w}"),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/pitchcall.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` handles that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/pitchcall.toml` to `config/` unless the user already has
/// a copy. Returns whether a copy was made.
pub fn ensure_config_file(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(false);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE} nor defaults/{CONFIG_FILE} found in {}; \
                 run from the project root",
                base_dir.display()
            ),
        });
    }

    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;
    info!("copied {} to {}", source.display(), target.display());
    Ok(true)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    let scoring = &config.scoring;
    if !scoring.weak_contact_mph.is_finite() || scoring.weak_contact_mph <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "scoring.weak_contact_mph".into(),
            message: format!("must be > 0, got {}", scoring.weak_contact_mph),
        });
    }
    if !scoring.prior_strength.is_finite() || scoring.prior_strength < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "scoring.prior_strength".into(),
            message: format!("must be >= 0, got {}", scoring.prior_strength),
        });
    }

    if let Err(RecommendError::InvalidWeights { field, message }) = scoring.weights.validate() {
        return Err(ConfigError::ValidationError {
            field: format!("scoring.{field}"),
            message,
        });
    }

    let sum = scoring.weights.sum();
    if (sum - 1.0).abs() > 1e-6 {
        warn!("scoring weights sum to {sum:.4}, scores will not read as rates");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SHIPPED_DEFAULTS: &str = include_str!("../../../defaults/pitchcall.toml");

    fn write_config(dir: &Path, body: &str) {
        let config_dir = dir.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), body).unwrap();
    }

    #[test]
    fn shipped_defaults_match_builtin_defaults() {
        let config = parse_config(SHIPPED_DEFAULTS, Path::new("defaults/pitchcall.toml"))
            .expect("shipped defaults should parse");
        validate(&config).expect("shipped defaults should validate");

        assert_eq!(config.data.path, DataConfig::default().path);
        assert_eq!(config.data.min_year, Some(2021));
        assert_eq!(config.scoring.weights, ScoringWeights::default());
        assert!((config.scoring.weak_contact_mph - 80.0).abs() < f64::EPSILON);
        assert!((config.scoring.prior_strength - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scoring_section_is_optional() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "[data]\npath = \"pitches.csv\"\n");

        let config = load_config_from(tmp.path()).expect("should load without [scoring]");
        assert_eq!(config.data.min_year, DataConfig::default().min_year);
        assert_eq!(config.scoring.weights, ScoringWeights::default());
    }

    #[test]
    fn custom_weights_need_not_sum_to_one() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(
            tmp.path(),
            r#"
[data]
path = "pitches.csv"

[scoring.weights]
strikeout = 3.0
swinging_strike = 2.0
called_strike = 1.0
foul = 0.5
weak_contact = 0.0
"#,
        );

        let config = load_config_from(tmp.path()).expect("should accept any non-negative weights");
        assert!((config.scoring.weights.sum() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_weight() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(
            tmp.path(),
            r#"
[data]
path = "pitches.csv"

[scoring.weights]
strikeout = 0.5
swinging_strike = -0.1
called_strike = 0.2
foul = 0.2
weak_contact = 0.2
"#,
        );

        match load_config_from(tmp.path()) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "scoring.weights.swinging_strike");
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(
            tmp.path(),
            "[data]\npath = \"pitches.csv\"\n\n[scoring]\nweak_contact_mph = 0.0\n",
        );

        match load_config_from(tmp.path()) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "scoring.weak_contact_mph");
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        match load_config_from(tmp.path()) {
            Err(ConfigError::FileNotFound { path }) => {
                assert!(path.ends_with("config/pitchcall.toml"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "[data\npath = ");
        assert!(matches!(
            load_config_from(tmp.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn absent_min_year_matches_builtin_default() {
        let config =
            parse_config("[data]\npath = \"pitches.csv\"\n", Path::new("pitchcall.toml")).unwrap();
        assert_eq!(config.data.min_year, DataConfig::default().min_year);
        assert_eq!(config.data.min_year, None);
    }

    #[test]
    fn ensure_config_file_copies_once() {
        let tmp = tempfile::tempdir().unwrap();
        let defaults = tmp.path().join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        fs::write(defaults.join(CONFIG_FILE), SHIPPED_DEFAULTS).unwrap();

        assert!(ensure_config_file(tmp.path()).unwrap());
        let target = tmp.path().join("config").join(CONFIG_FILE);
        assert_eq!(fs::read_to_string(&target).unwrap(), SHIPPED_DEFAULTS);

        // Second run leaves the user's copy alone.
        fs::write(&target, "[data]\npath = \"mine.csv\"\n").unwrap();
        assert!(!ensure_config_file(tmp.path()).unwrap());
        assert_eq!(load_config_from(tmp.path()).unwrap().data.path, "mine.csv");
    }

    #[test]
    fn ensure_config_file_ignores_other_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let defaults = tmp.path().join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        fs::write(defaults.join(CONFIG_FILE), SHIPPED_DEFAULTS).unwrap();
        fs::write(defaults.join("notes.txt"), "scratch").unwrap();

        assert!(ensure_config_file(tmp.path()).unwrap());
        assert!(!tmp.path().join("config").join("notes.txt").exists());
    }

    #[test]
    fn ensure_config_file_with_existing_config_needs_no_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "[data]\npath = \"pitches.csv\"\n");
        assert!(!ensure_config_file(tmp.path()).unwrap());
    }

    #[test]
    fn ensure_config_file_without_any_source_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            ensure_config_file(tmp.path()),
            Err(ConfigError::DefaultsCopyError { .. })
        ));
    }

    #[test]
    fn weights_from_slice_checks_length() {
        assert!(ScoringWeights::from_slice(&[0.2; 5]).is_ok());
        assert!(matches!(
            ScoringWeights::from_slice(&[0.25; 4]),
            Err(RecommendError::InvalidWeights { .. })
        ));
        assert!(matches!(
            ScoringWeights::from_slice(&[0.2, 0.2, f64::NAN, 0.2, 0.2]),
            Err(RecommendError::InvalidWeights { .. })
        ));
    }
}
