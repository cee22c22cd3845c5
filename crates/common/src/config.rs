//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandsignError, HandsignResult};

/// Highest valid landmark index in a hand frame.
const MAX_LANDMARK_INDEX: usize = 20;

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture rule table.
    pub classifier: ClassifierConfig,

    /// Event rate limiting.
    pub debounce: DebounceConfig,

    /// Live capture defaults.
    pub capture: CaptureDefaults,

    /// Dataset preparation parameters.
    pub dataset: DatasetConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Ordered gesture rule table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub rules: Vec<GestureRuleConfig>,
}

/// One "vertical line" rule over a subset of landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureRuleConfig {
    /// Rule name, used in logs.
    pub name: String,

    /// Gesture label emitted when the rule matches.
    pub label: String,

    /// Landmark indices forming the line.
    pub indices: Vec<usize>,

    /// Maximum horizontal spread (exclusive).
    pub x_tolerance: f64,

    /// Minimum vertical spread (exclusive).
    pub y_min_range: f64,

    /// Optional extra requirement that all other landmarks are folded down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fold: Option<FoldConfig>,
}

/// Parameters for the "others folded" predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Landmarks exempt from the fold check.
    pub except: Vec<usize>,

    /// A landmark with `y < threshold` counts as still extended.
    pub threshold: f64,
}

/// How the debouncer shares its "last announced" timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebounceScope {
    /// One timer across all gesture labels.
    #[default]
    Shared,
    /// One timer per gesture label.
    PerLabel,
}

/// Debounce parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Minimum seconds between two announcements on the same channel.
    pub interval_secs: f64,

    #[serde(default)]
    pub scope: DebounceScope,
}

/// Live capture defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureDefaults {
    /// Where collection sessions persist their records.
    pub store_path: PathBuf,

    /// Seconds between fingertip coordinate reports in the log.
    pub report_interval_secs: f64,
}

/// Dataset preparation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Fraction of records held out for testing, in (0, 1).
    pub test_fraction: f64,

    /// Shuffle seed.
    pub seed: u64,

    /// Annotation value that maps to label 1.
    pub positive_tag: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handsign=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                GestureRuleConfig {
                    name: "four_fingertip_line".to_string(),
                    label: "four-finger-gesture".to_string(),
                    indices: vec![8, 12, 16, 20],
                    x_tolerance: 0.05,
                    y_min_range: 0.06,
                    fold: None,
                },
                GestureRuleConfig {
                    name: "two_fingertip_line".to_string(),
                    label: "two-finger-gesture".to_string(),
                    indices: vec![8, 12],
                    x_tolerance: 0.06,
                    y_min_range: 0.15,
                    fold: None,
                },
            ],
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            interval_secs: 4.0,
            scope: DebounceScope::Shared,
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("hand_data.json"),
            report_interval_secs: 5.0,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            positive_tag: "four-finger-gesture".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file means defaults. A file that exists but does not parse
    /// or validate is an error.
    pub fn load() -> HandsignResult<Self> {
        Self::load_or_default(config_file_path())
    }

    /// Load config from `path`, or defaults if no file exists there.
    pub fn load_or_default(path: impl AsRef<Path>) -> HandsignResult<Self> {
        match Self::load_from(path) {
            Err(HandsignError::NotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> HandsignResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| HandsignError::from_read(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| HandsignError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HandsignResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> HandsignResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| HandsignError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| HandsignError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| HandsignError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reject values no rule or stage can work with.
    pub fn validate(&self) -> HandsignResult<()> {
        for rule in &self.classifier.rules {
            rule.validate()?;
        }

        if !(self.debounce.interval_secs > 0.0) {
            return Err(HandsignError::config(format!(
                "debounce interval must be positive, got {}",
                self.debounce.interval_secs
            )));
        }

        if !(self.capture.report_interval_secs > 0.0) {
            return Err(HandsignError::config(format!(
                "report interval must be positive, got {}",
                self.capture.report_interval_secs
            )));
        }

        validate_test_fraction(self.dataset.test_fraction)
    }
}

impl GestureRuleConfig {
    /// Check indices and tolerances of a single rule.
    pub fn validate(&self) -> HandsignResult<()> {
        validate_indices(&self.indices)?;
        if !(self.x_tolerance > 0.0) {
            return Err(HandsignError::config(format!(
                "rule '{}': x_tolerance must be positive, got {}",
                self.name, self.x_tolerance
            )));
        }
        if !(self.y_min_range >= 0.0) {
            return Err(HandsignError::config(format!(
                "rule '{}': y_min_range must be non-negative, got {}",
                self.name, self.y_min_range
            )));
        }
        if let Some(fold) = &self.fold {
            if let Some(&index) = fold.except.iter().find(|&&i| i > MAX_LANDMARK_INDEX) {
                return Err(HandsignError::InvalidIndex { index });
            }
            if !fold.threshold.is_finite() {
                return Err(HandsignError::config(format!(
                    "rule '{}': fold threshold must be finite",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Indices must be non-empty and within the 21-point skeleton.
pub fn validate_indices(indices: &[usize]) -> HandsignResult<()> {
    if indices.is_empty() {
        return Err(HandsignError::EmptyIndexSet);
    }
    match indices.iter().find(|&&i| i > MAX_LANDMARK_INDEX) {
        Some(&index) => Err(HandsignError::InvalidIndex { index }),
        None => Ok(()),
    }
}

/// A test fraction must lie strictly between 0 and 1.
pub fn validate_test_fraction(test_fraction: f64) -> HandsignResult<()> {
    if test_fraction > 0.0 && test_fraction < 1.0 {
        Ok(())
    } else {
        Err(HandsignError::config(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handsign").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_rules() {
        let config = AppConfig::default();
        let rules = &config.classifier.rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].indices, vec![8, 12, 16, 20]);
        assert_eq!(rules[0].x_tolerance, 0.05);
        assert_eq!(rules[0].y_min_range, 0.06);
        assert_eq!(rules[1].indices, vec![8, 12]);
        assert_eq!(rules[1].x_tolerance, 0.06);
        assert_eq!(rules[1].y_min_range, 0.15);
        assert_eq!(config.debounce.interval_secs, 4.0);
        assert_eq!(config.debounce.scope, DebounceScope::Shared);
        assert_eq!(config.dataset.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "debounce": { "interval_secs": 2.5, "scope": "per_label" } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.debounce.interval_secs, 2.5);
        assert_eq!(config.debounce.scope, DebounceScope::PerLabel);
        assert_eq!(config.classifier, ClassifierConfig::default());
        assert_eq!(config.dataset, DatasetConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut config = AppConfig::default();
        config.classifier.rules[0].indices = vec![8, 21];
        assert!(matches!(
            config.validate(),
            Err(HandsignError::InvalidIndex { index: 21 })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_fraction_and_interval() {
        let mut config = AppConfig::default();
        config.dataset.test_fraction = 1.0;
        assert!(matches!(config.validate(), Err(HandsignError::Config { .. })));

        let mut config = AppConfig::default();
        config.debounce.interval_secs = 0.0;
        assert!(matches!(config.validate(), Err(HandsignError::Config { .. })));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join("handsign_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.dataset.positive_tag = "thanks".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_default_only_falls_back_when_missing() {
        let dir = std::env::temp_dir().join("handsign_test_config_fallback");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        assert_eq!(AppConfig::load_or_default(&path).unwrap(), AppConfig::default());

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &path,
            r#"{ "classifier": { "rules": [ { "name": "bad", "label": "x",
                 "indices": [8, 12, 16, 21], "x_tolerance": 0.05, "y_min_range": 0.06 } ] },
               "debounce": { "interval_secs": 1.0 } }"#,
        )
        .unwrap();
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(HandsignError::InvalidIndex { index: 21 })
        ));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(HandsignError::Parse { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_path_is_not_found() {
        let path = std::env::temp_dir().join("handsign_missing_config/config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(HandsignError::NotFound { .. })
        ));
    }
}
