//! Bayesian confidence estimation over the six levels.
//!
//! Each call starts from a uniform prior and multiplies in one likelihood
//! factor per answered question, so the posterior is rebuilt from the whole
//! history rather than filtered incrementally. Products are accumulated in
//! log space; long histories would otherwise underflow to zero.

use serde::{Deserialize, Serialize};

use crate::error::AssessError;
use crate::level::Level;
use crate::table::{DifficultyTable, DifficultyTier};

/// Default probability of a correct answer when the candidate level matches
/// the current band.
pub const DEFAULT_MATCH_PROBABILITY: f64 = 0.8;

/// Probability model for a single observed answer.
pub trait LikelihoodModel {
    /// P(correct | true level is `candidate`), given the engine's current
    /// band and the tier the candidate's table assigns to this slot.
    fn p_correct(&self, candidate: Level, current_band: Level, tier: DifficultyTier) -> f64;

    /// P(observed | candidate).
    fn p_observed(
        &self,
        correct: bool,
        candidate: Level,
        current_band: Level,
        tier: DifficultyTier,
    ) -> f64 {
        let p = self.p_correct(candidate, current_band, tier);
        if correct {
            p
        } else {
            1.0 - p
        }
    }
}

/// Favours the current band with a fixed probability and treats every other
/// level alike. The tier is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandMatchModel {
    pub match_probability: f64,
}

impl Default for BandMatchModel {
    fn default() -> Self {
        Self {
            match_probability: DEFAULT_MATCH_PROBABILITY,
        }
    }
}

impl LikelihoodModel for BandMatchModel {
    fn p_correct(&self, candidate: Level, current_band: Level, _tier: DifficultyTier) -> f64 {
        if candidate == current_band {
            self.match_probability
        } else {
            1.0 - self.match_probability
        }
    }
}

/// A probability distribution over the six levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posterior {
    masses: [f64; Level::COUNT],
}

impl Posterior {
    /// The uniform distribution.
    pub fn uniform() -> Self {
        Self {
            masses: [1.0 / Level::COUNT as f64; Level::COUNT],
        }
    }

    /// Normalize unnormalized log-weights with the log-sum-exp trick.
    ///
    /// Fails with [`AssessError::DegenerateDistribution`] when every weight is
    /// `-inf` (zero mass) or any weight is NaN.
    pub fn from_log_weights(log_weights: [f64; Level::COUNT]) -> Result<Self, AssessError> {
        if log_weights.iter().any(|w| w.is_nan()) {
            return Err(AssessError::DegenerateDistribution);
        }
        let max = log_weights
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(AssessError::DegenerateDistribution);
        }

        let mut masses = log_weights.map(|w| (w - max).exp());
        let total: f64 = masses.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(AssessError::DegenerateDistribution);
        }
        for m in &mut masses {
            *m /= total;
        }
        Ok(Self { masses })
    }

    /// Mass assigned to `level`.
    pub fn mass(&self, level: Level) -> f64 {
        self.masses[level.index()]
    }

    /// All masses, lowest level first.
    pub fn masses(&self) -> &[f64; Level::COUNT] {
        &self.masses
    }

    /// Level with the largest mass. Ties go to the lower level.
    pub fn most_likely(&self) -> Level {
        let mut best = Level::MIN;
        for level in Level::ALL {
            if self.mass(level) > self.mass(best) {
                best = level;
            }
        }
        best
    }
}

/// Result of one estimator run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub posterior: Posterior,
    /// Posterior mass at the band the estimate was computed for.
    pub confidence: f64,
}

/// Computes the posterior and the confidence in the current band.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceEstimator<M = BandMatchModel> {
    model: M,
}

impl<M: LikelihoodModel> ConfidenceEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Compute the posterior over levels for `history` given `current_band`.
    pub fn estimate(
        &self,
        table: &DifficultyTable,
        history: &[bool],
        current_band: Level,
    ) -> Result<Estimate, AssessError> {
        let log_prior = (1.0 / Level::COUNT as f64).ln();
        let mut log_weights = [log_prior; Level::COUNT];

        for (i, &correct) in history.iter().enumerate() {
            for candidate in Level::ALL {
                let tier = table.get_difficulty(candidate, i).tier();
                let p = self.model.p_observed(correct, candidate, current_band, tier);
                log_weights[candidate.index()] += p.ln();
            }
        }

        let posterior = Posterior::from_log_weights(log_weights)?;
        Ok(Estimate {
            confidence: posterior.mass(current_band),
            posterior,
        })
    }
}
