//! Detector configuration loading
//!
//! Loads configuration from `~/.config/silent-struggle/config.toml` (or the
//! `SILENT_STRUGGLE_CONFIG` env var). A missing file means defaults.
//!
//! ```toml
//! [vocabulary]
//! phrases = ["okay", "fine"]   # replaces the canonical phrases
//! extra_phrases = ["meh"]      # appended to the active phrases
//!
//! [output]
//! export_path = "silent_struggle_analysis.csv"
//! comment_width = 60
//! color = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{DetectorError, Result};
use crate::vocabulary::HedgeVocabulary;

/// Narrowest comment column the terminal table will render.
pub const MIN_COMMENT_WIDTH: usize = 8;

/// Root configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DetectorConfig {
    /// Hedge vocabulary settings
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Report and export settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Hedge vocabulary configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct VocabularyConfig {
    /// Replaces the canonical phrases when set
    #[serde(default)]
    pub phrases: Option<Vec<String>>,

    /// Appended to whichever phrase set is active
    #[serde(default)]
    pub extra_phrases: Vec<String>,
}

/// Output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Default destination for `export`
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Display columns given to comments in the terminal table
    #[serde(default = "default_comment_width")]
    pub comment_width: usize,

    /// Colorize terminal output when stdout supports it
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("silent_struggle_analysis.csv")
}

fn default_comment_width() -> usize {
    60
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            comment_width: default_comment_width(),
            color: default_color(),
        }
    }
}

impl DetectorConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "SILENT_STRUGGLE_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "config.toml";

    /// Load configuration
    ///
    /// Resolution order:
    /// 1. `explicit` path (a `--config` flag), which must exist
    /// 2. `SILENT_STRUGGLE_CONFIG` environment variable
    /// 3. `~/.config/silent-struggle/config.toml`
    ///
    /// For 2 and 3, a missing file yields the default configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let path = Self::resolve_config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DetectorError::config_with_source(
                format!("failed to read config at {}", path.display()),
                e,
            )
        })?;

        let cfg = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: DetectorConfig = toml::from_str(contents)
            .map_err(|e| DetectorError::config_with_source("failed to parse config", e))?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("silent-struggle")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    fn validate(&self) -> Result<()> {
        if self.output.comment_width < MIN_COMMENT_WIDTH {
            return Err(DetectorError::config(format!(
                "output.comment_width must be at least {MIN_COMMENT_WIDTH}, got {}",
                self.output.comment_width
            )));
        }

        if self.hedge_vocabulary().is_empty() {
            tracing::warn!(
                "hedge vocabulary is empty; no feedback will be flagged as a silent struggle"
            );
        }

        Ok(())
    }

    /// Hedge vocabulary described by this configuration
    pub fn hedge_vocabulary(&self) -> HedgeVocabulary {
        let base = match &self.vocabulary.phrases {
            Some(phrases) => HedgeVocabulary::new(phrases),
            None => HedgeVocabulary::canonical(),
        };
        base.with_extra(&self.vocabulary.extra_phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use crate::vocabulary::CANONICAL_HEDGE_PHRASES;

    #[test]
    fn test_default_config() {
        let cfg = DetectorConfig::default();
        assert_eq!(
            cfg.output.export_path,
            PathBuf::from("silent_struggle_analysis.csv")
        );
        assert_eq!(cfg.output.comment_width, 60);
        assert!(cfg.output.color);
        assert_eq!(cfg.hedge_vocabulary(), HedgeVocabulary::canonical());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let cfg = DetectorConfig::parse("").expect("should parse");
        assert_eq!(cfg.output.comment_width, 60);
        assert_eq!(cfg.hedge_vocabulary().len(), CANONICAL_HEDGE_PHRASES.len());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [vocabulary]
            phrases = ["Meh", "so-so"]
            extra_phrases = ["could be better"]

            [output]
            export_path = "/tmp/report.csv"
            comment_width = 40
            color = false
        "#;

        let cfg = DetectorConfig::parse(toml).expect("should parse");
        assert_eq!(cfg.output.export_path, PathBuf::from("/tmp/report.csv"));
        assert_eq!(cfg.output.comment_width, 40);
        assert!(!cfg.output.color);

        let vocab = cfg.hedge_vocabulary();
        assert_eq!(vocab.phrases(), &["meh", "so-so", "could be better"]);
        assert!(!vocab.contains_hedge("okay"));
    }

    #[test]
    fn test_extra_phrases_extend_canonical() {
        let cfg = DetectorConfig::parse("[vocabulary]\nextra_phrases = [\"meh\"]\n")
            .expect("should parse");
        let vocab = cfg.hedge_vocabulary();
        assert_eq!(vocab.len(), CANONICAL_HEDGE_PHRASES.len() + 1);
        assert!(vocab.contains_hedge("okay"));
        assert!(vocab.contains_hedge("MEH"));
    }

    #[test]
    fn test_empty_vocabulary_is_allowed() {
        let cfg = DetectorConfig::parse("[vocabulary]\nphrases = []\n").expect("should parse");
        assert!(cfg.hedge_vocabulary().is_empty());
    }

    #[test]
    fn test_narrow_comment_width_rejected() {
        let err = DetectorConfig::parse("[output]\ncomment_width = 3\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigError);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = DetectorConfig::parse("[output\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigError);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DetectorConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ConfigError);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ncolor = false\n").unwrap();

        let cfg = DetectorConfig::load(Some(&path)).unwrap();
        assert!(!cfg.output.color);
    }
}
