//! Test session controller.
//!
//! A [`TestSession`] owns one examinee's [`TestState`] and runs the submit
//! cycle: log the response, advance the count, move the band, pick the next
//! difficulty, recompute confidence once enough answers exist, and pause at
//! checkpoint milestones.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::band::{BandMove, BandTracker};
use crate::config::AssessmentConfig;
use crate::error::AssessError;
use crate::estimator::{BandMatchModel, ConfidenceEstimator, Posterior};
use crate::level::Level;
use crate::log::{Response, ResponseLog};
use crate::table::{DifficultyCode, DifficultyTable};

/// Confidence strictly above which the advisory is [`Advisory::High`].
pub const HIGH_ADVISORY_ABOVE: f64 = 0.90;
/// Inclusive bounds of the [`Advisory::Moderate`] band.
pub const MODERATE_ADVISORY_RANGE: std::ops::RangeInclusive<f64> = 0.60..=0.89;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Accepting answers.
    Testing,
    /// Paused at a milestone; the caller should offer continue or quit.
    Checkpoint,
    /// Quit. No further answers are accepted.
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Testing => write!(f, "testing"),
            Phase::Checkpoint => write!(f, "checkpoint"),
            Phase::Terminated => write!(f, "terminated"),
        }
    }
}

/// Advice shown at a checkpoint, derived from confidence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advisory {
    /// Confident enough that the examinee may stop.
    High,
    /// Fairly confident; about five more questions are suggested.
    Moderate,
    /// Not confident; keep going.
    Low,
}

impl Advisory {
    /// Map a confidence value to an advisory tier.
    ///
    /// Values in `(0.89, 0.90]` are not covered by the moderate range and
    /// fall through to [`Advisory::Low`].
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > HIGH_ADVISORY_ABOVE {
            Advisory::High
        } else if MODERATE_ADVISORY_RANGE.contains(&confidence) {
            Advisory::Moderate
        } else {
            Advisory::Low
        }
    }

    /// Text for the examinee.
    pub fn message(self) -> &'static str {
        match self {
            Advisory::High => "We are 90% sure of this but you can continue if you like.",
            Advisory::Moderate => {
                "We are pretty sure about this, but maybe you should do another 5 questions."
            }
            Advisory::Low => "But we are really not sure yet. Please answer a few more questions.",
        }
    }
}

/// Information surfaced when a milestone is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub question_count: usize,
    pub band: Level,
    pub confidence: f64,
    pub advisory: Advisory,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You have answered {} questions. We think your level is '{}'. {}",
            self.question_count,
            self.band,
            self.advisory.message()
        )
    }
}

/// Result of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Difficulty of the question to present next.
    pub next_difficulty: DifficultyCode,
    /// Band after this answer.
    pub band: Level,
    pub band_move: BandMove,
    /// Confidence after this answer (unchanged below the trigger count).
    pub confidence: f64,
    /// Set when this answer reached a checkpoint milestone.
    pub checkpoint: Option<Checkpoint>,
    /// `true` if this answer fixed the final level.
    pub finalized: bool,
}

/// Mutable single-examinee state. Only [`TestSession`] mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestState {
    initial_band: Level,
    tracker: BandTracker,
    total_questions: usize,
    history: Vec<bool>,
    current_difficulty: DifficultyCode,
    confidence: f64,
    posterior: Option<Posterior>,
    final_level: Option<Level>,
    phase: Phase,
    log: ResponseLog,
}

impl TestState {
    fn new(initial_band: Level, table: &DifficultyTable) -> Self {
        Self {
            initial_band,
            tracker: BandTracker::new(initial_band),
            total_questions: 0,
            history: Vec::new(),
            current_difficulty: table.get_difficulty(initial_band, 0),
            confidence: 0.0,
            posterior: None,
            final_level: None,
            phase: Phase::Testing,
            log: ResponseLog::new(),
        }
    }

    pub fn initial_band(&self) -> Level {
        self.initial_band
    }

    pub fn band(&self) -> Level {
        self.tracker.band()
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// Correctness flags, oldest first.
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    pub fn current_difficulty(&self) -> DifficultyCode {
        self.current_difficulty
    }

    /// Last computed confidence; `0.0` until the trigger count is reached.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Last computed posterior, if any.
    pub fn posterior(&self) -> Option<&Posterior> {
        self.posterior.as_ref()
    }

    pub fn final_level(&self) -> Option<Level> {
        self.final_level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn log(&self) -> &ResponseLog {
        &self.log
    }
}

/// Read-only view of a session for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub band: Level,
    pub total_questions: usize,
    pub confidence: f64,
    pub final_level: Option<Level>,
    pub phase: Phase,
    pub current_difficulty: DifficultyCode,
    pub log: ResponseLog,
}

/// Runs one examinee's adaptive test.
#[derive(Debug, Clone)]
pub struct TestSession {
    config: AssessmentConfig,
    table: DifficultyTable,
    estimator: ConfidenceEstimator<BandMatchModel>,
    state: TestState,
}

impl TestSession {
    /// Create a session with default settings.
    ///
    /// `initial_band` is a level index; `None` picks one uniformly at random.
    pub fn create(initial_band: Option<usize>) -> Result<Self, AssessError> {
        let initial = initial_band.map(Level::from_index).transpose()?;
        Ok(Self::with_config(AssessmentConfig::default(), initial))
    }

    /// Create a session with explicit settings.
    pub fn with_config(config: AssessmentConfig, initial_band: Option<Level>) -> Self {
        let initial = initial_band.unwrap_or_else(|| BandTracker::random().band());
        let table = DifficultyTable::new();
        let estimator = ConfidenceEstimator::new(BandMatchModel {
            match_probability: config.match_probability,
        });
        let state = TestState::new(initial, &table);
        tracing::debug!(initial_band = %initial, "session created");
        Self {
            config,
            table,
            estimator,
            state,
        }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn state(&self) -> &TestState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            band: self.state.band(),
            total_questions: self.state.total_questions,
            confidence: self.state.confidence,
            final_level: self.state.final_level,
            phase: self.state.phase,
            current_difficulty: self.state.current_difficulty,
            log: self.state.log.clone(),
        }
    }

    /// Record one answer and advance the session.
    ///
    /// Submitting while at a checkpoint implicitly continues the test.
    /// An empty `name` falls back to the configured examinee.
    pub fn submit_answer(&mut self, name: &str, correct: bool) -> Result<SubmitOutcome, AssessError> {
        if self.state.phase == Phase::Terminated {
            return Err(AssessError::SessionClosed);
        }

        let name = if name.is_empty() {
            self.config.examinee.clone()
        } else {
            name.to_string()
        };
        let state = &mut self.state;

        state.log.append(Response {
            name,
            question_count: state.total_questions + 1,
            difficulty: state.current_difficulty,
            correct,
            confidence: state.confidence,
        });
        state.history.push(correct);
        state.total_questions += 1;

        let band_move = state.tracker.observe(&state.history);
        let band = state.tracker.band();
        state.current_difficulty = self.table.get_difficulty(band, state.total_questions);

        let mut finalized = false;
        if state.total_questions >= self.config.confidence_trigger {
            let posterior = match self.estimator.estimate(&self.table, &state.history, band) {
                Ok(estimate) => estimate.posterior,
                Err(err) => {
                    tracing::warn!(%err, question = state.total_questions, "falling back to uniform prior");
                    Posterior::uniform()
                }
            };
            state.confidence = posterior.mass(band);
            state.posterior = Some(posterior);

            if state.final_level.is_none() && state.confidence >= self.config.finalize_threshold {
                state.final_level = Some(band);
                finalized = true;
                tracing::info!(level = %band, confidence = state.confidence, "final level set");
            }
        }

        let checkpoint = if self.config.is_checkpoint(state.total_questions) {
            state.phase = Phase::Checkpoint;
            let checkpoint = Checkpoint {
                question_count: state.total_questions,
                band,
                confidence: state.confidence,
                advisory: Advisory::from_confidence(state.confidence),
            };
            tracing::info!(
                question = checkpoint.question_count,
                band = %band,
                advisory = ?checkpoint.advisory,
                "checkpoint reached"
            );
            Some(checkpoint)
        } else {
            state.phase = Phase::Testing;
            None
        };

        Ok(SubmitOutcome {
            next_difficulty: state.current_difficulty,
            band,
            band_move,
            confidence: state.confidence,
            checkpoint,
            finalized,
        })
    }

    /// Leave a checkpoint and keep testing.
    pub fn continue_test(&mut self) -> Result<(), AssessError> {
        match self.state.phase {
            Phase::Terminated => Err(AssessError::SessionClosed),
            _ => {
                self.state.phase = Phase::Testing;
                Ok(())
            }
        }
    }

    /// End the session. Further submissions fail with
    /// [`AssessError::SessionClosed`].
    pub fn quit(&mut self) {
        if self.state.phase != Phase::Terminated {
            tracing::info!(questions = self.state.total_questions, "session quit");
        }
        self.state.phase = Phase::Terminated;
    }

    pub fn is_closed(&self) -> bool {
        self.state.phase == Phase::Terminated
    }
}
