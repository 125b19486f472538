//! The six ordered proficiency levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssessError;

/// A proficiency level, ordered from lowest (`A1`) to highest (`C2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    /// Number of levels.
    pub const COUNT: usize = 6;

    /// All levels, lowest first.
    pub const ALL: [Level; Level::COUNT] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    /// The lowest level.
    pub const MIN: Level = Level::A1;

    /// The highest level.
    pub const MAX: Level = Level::C2;

    /// Look up a level by its ordinal index.
    pub fn from_index(index: usize) -> Result<Self, AssessError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(AssessError::OutOfRange {
                index,
                max: Self::COUNT - 1,
            })
    }

    /// Ordinal index in `0..=5`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label such as `"B1"`.
    pub fn label(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }

    /// The next level up, saturating at `C2`.
    pub fn promoted(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::COUNT - 1)]
    }

    /// The next level down, saturating at `A1`.
    pub fn demoted(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts a label (`"b2"`, `"B2"`) or an index (`"3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Level::from_index(index).map_err(|e| e.to_string());
        }
        match trimmed.to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::B1.to_string(), "B1");
        assert_eq!("c2".parse::<Level>().unwrap(), Level::C2);
        assert_eq!(" A2 ".parse::<Level>().unwrap(), Level::A2);
        assert_eq!("3".parse::<Level>().unwrap(), Level::B2);
        assert!("D1".parse::<Level>().is_err());
        assert!("6".parse::<Level>().is_err());
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(Level::from_index(i).unwrap(), *level);
            assert_eq!(level.index(), i);
        }
        assert_eq!(
            Level::from_index(6),
            Err(AssessError::OutOfRange { index: 6, max: 5 })
        );
    }

    #[test]
    fn promotion_and_demotion_saturate() {
        assert_eq!(Level::A1.demoted(), Level::A1);
        assert_eq!(Level::A1.promoted(), Level::A2);
        assert_eq!(Level::C2.promoted(), Level::C2);
        assert_eq!(Level::C2.demoted(), Level::C1);
        assert!(Level::A1 < Level::C2);
    }
}
