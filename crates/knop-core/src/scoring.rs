//! Session scoring: accuracy percentage and qualitative band.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the "excellent" band, in percent.
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the "good" band, in percent.
pub const GOOD_THRESHOLD: f64 = 60.0;

/// Qualitative label for a session's accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyBand {
    Excellent,
    Good,
    NeedsPractice,
}

impl AccuracyBand {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= EXCELLENT_THRESHOLD {
            AccuracyBand::Excellent
        } else if accuracy >= GOOD_THRESHOLD {
            AccuracyBand::Good
        } else {
            AccuracyBand::NeedsPractice
        }
    }

    /// Encouragement shown with the session summary.
    pub fn message(&self) -> &'static str {
        match self {
            AccuracyBand::Excellent => "Outstanding! You did really well!",
            AccuracyBand::Good => "Nice work! Keep it up!",
            AccuracyBand::NeedsPractice => "Don't give up! A bit more practice will help.",
        }
    }
}

impl fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccuracyBand::Excellent => write!(f, "excellent"),
            AccuracyBand::Good => write!(f, "good"),
            AccuracyBand::NeedsPractice => write!(f, "needs practice"),
        }
    }
}

/// Outcome of a completed session. Invariant: `correct <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub total: usize,
    pub correct: usize,
    /// Percentage in `0.0..=100.0`.
    pub accuracy: f64,
    pub band: AccuracyBand,
}

/// Score a session. `total == 0` yields accuracy 0 and the lowest band.
pub fn score(correct: usize, total: usize) -> SessionResult {
    debug_assert!(correct <= total, "correct ({correct}) exceeds total ({total})");
    let accuracy = if total > 0 {
        correct as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    SessionResult {
        total,
        correct,
        accuracy,
        band: AccuracyBand::from_accuracy(accuracy),
    }
}
