//! Band-adjustment state machine.
//!
//! After every answer, once at least two exist, the last two correctness
//! flags are inspected. Both correct promotes, both wrong demotes, mixed
//! holds. The window slides by one answer, so three correct answers in a
//! row promote twice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AssessError;
use crate::level::Level;

/// Outcome of a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandMove {
    Promoted,
    Demoted,
    Held,
}

/// Holds the current estimated band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTracker {
    band: Level,
}

impl BandTracker {
    /// Start at a known band.
    pub fn new(initial: Level) -> Self {
        Self { band: initial }
    }

    /// Start at a band given by raw index.
    pub fn from_index(index: usize) -> Result<Self, AssessError> {
        Ok(Self::new(Level::from_index(index)?))
    }

    /// Start at a uniformly random band.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Start at a uniformly random band drawn from `rng`.
    pub fn random_with<R: Rng>(rng: &mut R) -> Self {
        Self::new(Level::ALL[rng.random_range(0..Level::COUNT)])
    }

    /// Current band.
    pub fn band(&self) -> Level {
        self.band
    }

    /// Apply the transition rule to the full answer history.
    ///
    /// With fewer than two answers this is a no-op.
    pub fn observe(&mut self, history: &[bool]) -> BandMove {
        let [.., prev, last] = history else {
            return BandMove::Held;
        };
        let from = self.band;
        let step = match (*prev, *last) {
            (true, true) => {
                self.band = from.promoted();
                BandMove::Promoted
            }
            (false, false) => {
                self.band = from.demoted();
                BandMove::Demoted
            }
            _ => BandMove::Held,
        };
        tracing::debug!(from = %from, to = %self.band, ?step, "band transition");
        step
    }
}
