//! Session report with JSON persistence.
//!
//! This is the archive handed to reporting collaborators when a session
//! ends: the response log plus the outcome of the assessment.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::level::Level;
use crate::log::ResponseLog;
use crate::session::{Phase, TestSession};

/// A finished (or paused) session, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Examinee name from the configuration, if any.
    #[serde(default)]
    pub examinee: String,
    pub initial_band: Level,
    /// Band at the time of export.
    pub band: Level,
    pub total_questions: usize,
    pub confidence: f64,
    pub final_level: Option<Level>,
    pub phase: Phase,
    /// Every response, oldest first.
    pub responses: ResponseLog,
}

impl SessionReport {
    /// Capture the current state of a session.
    pub fn from_session(session: &TestSession) -> Self {
        let state = session.state();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            examinee: session.config().examinee.clone(),
            initial_band: state.initial_band(),
            band: state.band(),
            total_questions: state.total_questions(),
            confidence: state.confidence(),
            final_level: state.final_level(),
            phase: state.phase(),
            responses: state.log().clone(),
        }
    }

    /// Fraction of answers that were correct, or `0.0` for an empty log.
    pub fn accuracy(&self) -> f64 {
        if self.responses.is_empty() {
            return 0.0;
        }
        let correct = self.responses.iter().filter(|r| r.correct).count();
        correct as f64 / self.responses.len() as f64
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_session() -> TestSession {
        let mut session = TestSession::create(Some(1)).unwrap();
        for i in 0..16 {
            session.submit_answer("Ada", i % 4 != 0).unwrap();
        }
        session.quit();
        session
    }

    #[test]
    fn captures_session_state() {
        let session = finished_session();
        let report = SessionReport::from_session(&session);
        assert_eq!(report.initial_band, Level::A2);
        assert_eq!(report.total_questions, 16);
        assert_eq!(report.responses.len(), 16);
        assert_eq!(report.phase, Phase::Terminated);
        assert!((report.accuracy() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn json_roundtrip() {
        let report = SessionReport::from_session(&finished_session());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.responses, report.responses);
        assert_eq!(loaded.final_level, report.final_level);
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let err = SessionReport::load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read report"));
    }
}
