//! Assessment configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::estimator::DEFAULT_MATCH_PROBABILITY;

/// Tunables for a test session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Question count from which confidence is computed on every submission.
    #[serde(default = "default_confidence_trigger")]
    pub confidence_trigger: usize,
    /// Confidence at or above which the current band becomes the final level.
    #[serde(default = "default_finalize_threshold")]
    pub finalize_threshold: f64,
    /// P(correct) assumed for an examinee whose level equals the current band.
    #[serde(default = "default_match_probability")]
    pub match_probability: f64,
    /// Question counts at which the session pauses for continue/quit.
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<usize>,
    /// Name recorded on responses when the caller gives none.
    #[serde(default)]
    pub examinee: String,
    /// Where reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_confidence_trigger() -> usize {
    15
}
fn default_finalize_threshold() -> f64 {
    0.90
}
fn default_match_probability() -> f64 {
    DEFAULT_MATCH_PROBABILITY
}
fn default_checkpoints() -> Vec<usize> {
    vec![15, 20]
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./bandwise-results")
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            confidence_trigger: default_confidence_trigger(),
            finalize_threshold: default_finalize_threshold(),
            match_probability: default_match_probability(),
            checkpoints: default_checkpoints(),
            examinee: String::new(),
            output_dir: default_output_dir(),
        }
    }
}

impl AssessmentConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.confidence_trigger >= 1,
            "confidence_trigger must be at least 1"
        );
        anyhow::ensure!(
            self.match_probability > 0.0 && self.match_probability < 1.0,
            "match_probability must be strictly between 0 and 1, got {}",
            self.match_probability
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.finalize_threshold),
            "finalize_threshold must be between 0 and 1, got {}",
            self.finalize_threshold
        );
        anyhow::ensure!(
            !self.checkpoints.is_empty(),
            "checkpoints must have at least one value"
        );
        anyhow::ensure!(
            self.checkpoints.iter().all(|&c| c >= 1),
            "checkpoints must be at least 1"
        );
        Ok(())
    }

    /// Whether a session pauses after `total_questions` answers.
    pub fn is_checkpoint(&self, total_questions: usize) -> bool {
        self.checkpoints.contains(&total_questions)
    }
}

/// Load config from an explicit path, or search the default location.
///
/// `BANDWISE_EXAMINEE` and `BANDWISE_OUTPUT_DIR` override the file.
pub fn load_config_from(path: Option<&Path>) -> Result<AssessmentConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from("bandwise.toml")).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AssessmentConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AssessmentConfig::default(),
    };

    if let Ok(name) = std::env::var("BANDWISE_EXAMINEE") {
        config.examinee = name;
    }
    if let Ok(dir) = std::env::var("BANDWISE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.validate()?;
    tracing::debug!(?config, "loaded assessment config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AssessmentConfig::default();
        assert_eq!(config.confidence_trigger, 15);
        assert_eq!(config.checkpoints, vec![15, 20]);
        assert!((config.finalize_threshold - 0.9).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn checkpoints_are_exact_milestones() {
        let config = AssessmentConfig::default();
        assert!(config.is_checkpoint(15));
        assert!(config.is_checkpoint(20));
        assert!(!config.is_checkpoint(16));
        assert!(!config.is_checkpoint(25));
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
examinee = "Ada"
checkpoints = [10, 30]
"#;
        let config: AssessmentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.examinee, "Ada");
        assert_eq!(config.checkpoints, vec![10, 30]);
        assert_eq!(config.confidence_trigger, 15);
    }

    #[test]
    fn validate_rejects_bad_probability() {
        let config = AssessmentConfig {
            match_probability: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = AssessmentConfig {
            checkpoints: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandwise.toml");
        std::fs::write(&path, "confidence_trigger = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.confidence_trigger, 5);

        let missing = dir.path().join("nope.toml");
        assert!(load_config_from(Some(&missing)).is_err());
    }

    #[test]
    fn examinee_is_taken_literally() {
        std::env::set_var("_BANDWISE_SELF_REF", "${_BANDWISE_SELF_REF}");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandwise.toml");
        std::fs::write(&path, "examinee = \"${_BANDWISE_SELF_REF}\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_BANDWISE_SELF_REF");
        if std::env::var("BANDWISE_EXAMINEE").is_err() {
            assert_eq!(config.examinee, "${_BANDWISE_SELF_REF}");
        }
    }
}
