//! Score bands
//!
//! Maps a final score onto one of four feedback bands.

use crate::{QuizError, Result};

/// Result feedback band, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResultBand {
    /// No correct answers
    Zero,
    /// Some correct answers, below the high threshold
    Low,
    /// At or above the high threshold, below perfect
    High,
    /// At or above the perfect threshold
    Perfect,
}

impl ResultBand {
    /// Band ordinal, 0 (lowest) to 3 (highest)
    pub fn index(&self) -> usize {
        match self {
            ResultBand::Zero => 0,
            ResultBand::Low => 1,
            ResultBand::High => 2,
            ResultBand::Perfect => 3,
        }
    }

    /// Feedback line for the result screen
    pub fn feedback(&self) -> &'static str {
        match self {
            ResultBand::Zero => "Not a single one. Even Filch knows more magic.",
            ResultBand::Low => "A few right. Wormtail would be proud.",
            ResultBand::High => "Well done, you could pass as Harry himself.",
            ResultBand::Perfect => "Flawless. Dumbledore tips his hat.",
        }
    }
}

/// Score thresholds for the four bands
///
/// `0 → Zero`, `1..high_from → Low`, `high_from..perfect_from → High`,
/// `perfect_from.. → Perfect`. The `Low` band is empty when `high_from == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBands {
    high_from: usize,
    perfect_from: usize,
}

impl ScoreBands {
    /// Explicit thresholds, validated against the bank size
    pub fn new(high_from: usize, perfect_from: usize, total: usize) -> Result<Self> {
        if high_from == 0 {
            return Err(QuizError::ConfigError(
                "high band threshold must be at least 1".to_string(),
            ));
        }
        if high_from > perfect_from {
            return Err(QuizError::ConfigError(format!(
                "high band threshold {} exceeds perfect threshold {}",
                high_from, perfect_from
            )));
        }
        if perfect_from > total {
            return Err(QuizError::ConfigError(format!(
                "perfect band threshold {} exceeds question count {}",
                perfect_from, total
            )));
        }
        Ok(Self {
            high_from,
            perfect_from,
        })
    }

    /// Thresholds scaled to a bank of `total` questions
    ///
    /// Perfect needs every answer right, high needs at least half (rounded
    /// up). For 10 questions this is 5 and 10.
    pub fn for_total(total: usize) -> Self {
        let total = total.max(1);
        Self {
            high_from: total.div_ceil(2).max(1),
            perfect_from: total,
        }
    }

    pub fn high_from(&self) -> usize {
        self.high_from
    }

    pub fn perfect_from(&self) -> usize {
        self.perfect_from
    }

    /// Band for a final score
    pub fn band_for(&self, score: usize) -> ResultBand {
        if score == 0 {
            ResultBand::Zero
        } else if score < self.high_from {
            ResultBand::Low
        } else if score < self.perfect_from {
            ResultBand::High
        } else {
            ResultBand::Perfect
        }
    }
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self::for_total(10)
    }
}
