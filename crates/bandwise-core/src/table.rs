//! Difficulty lookup table.
//!
//! Every level owns an 11-slot cycle of difficulty codes: 3 low, 4 medium and
//! 4 high. Codes are contiguous across levels, so level `n` uses
//! `3n` (low), `3n + 1` (medium) and `3n + 2` (high), giving 18 distinct codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AssessError;
use crate::level::Level;

/// Length of the per-level question cycle.
pub const SLOTS_PER_LEVEL: usize = 11;

const LOW_SLOTS: usize = 3;
const MEDIUM_SLOTS: usize = 4;

/// Difficulty tier of a slot within a level's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Low,
    Medium,
    High,
}

impl DifficultyTier {
    /// Tier for a slot in `0..SLOTS_PER_LEVEL`.
    pub fn for_slot(slot: usize) -> Self {
        match slot % SLOTS_PER_LEVEL {
            s if s < LOW_SLOTS => DifficultyTier::Low,
            s if s < LOW_SLOTS + MEDIUM_SLOTS => DifficultyTier::Medium,
            _ => DifficultyTier::High,
        }
    }

    fn offset(self) -> u8 {
        match self {
            DifficultyTier::Low => 0,
            DifficultyTier::Medium => 1,
            DifficultyTier::High => 2,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Low => write!(f, "low"),
            DifficultyTier::Medium => write!(f, "medium"),
            DifficultyTier::High => write!(f, "high"),
        }
    }
}

/// Identifier of the difficulty of a presented question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyCode(pub u8);

impl DifficultyCode {
    fn new(level: Level, tier: DifficultyTier) -> Self {
        DifficultyCode(level.index() as u8 * 3 + tier.offset())
    }

    /// The level this code belongs to.
    ///
    /// Codes past the top level fail with [`AssessError::OutOfRange`].
    pub fn level(self) -> Result<Level, AssessError> {
        Level::from_index((self.0 / 3) as usize)
    }

    /// The tier this code encodes.
    pub fn tier(self) -> DifficultyTier {
        match self.0 % 3 {
            0 => DifficultyTier::Low,
            1 => DifficultyTier::Medium,
            _ => DifficultyTier::High,
        }
    }
}

impl fmt::Display for DifficultyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable table of difficulty codes for every level and slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyTable {
    rows: [[DifficultyCode; SLOTS_PER_LEVEL]; Level::COUNT],
}

impl DifficultyTable {
    /// Build the standard table.
    pub fn new() -> Self {
        let mut rows = [[DifficultyCode(0); SLOTS_PER_LEVEL]; Level::COUNT];
        for level in Level::ALL {
            for (slot, code) in rows[level.index()].iter_mut().enumerate() {
                *code = DifficultyCode::new(level, DifficultyTier::for_slot(slot));
            }
        }
        Self { rows }
    }

    /// Difficulty for `level` at `question_number`, reduced modulo 11.
    pub fn get_difficulty(&self, level: Level, question_number: usize) -> DifficultyCode {
        self.rows[level.index()][question_number % SLOTS_PER_LEVEL]
    }

    /// Same as [`get_difficulty`](Self::get_difficulty) but for a raw level index.
    pub fn get_difficulty_at(
        &self,
        level_index: usize,
        question_number: usize,
    ) -> Result<DifficultyCode, AssessError> {
        let level = Level::from_index(level_index)?;
        Ok(self.get_difficulty(level, question_number))
    }

    /// The full 11-slot cycle for a level.
    pub fn row(&self, level: Level) -> &[DifficultyCode; SLOTS_PER_LEVEL] {
        &self.rows[level.index()]
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::new()
    }
}
