//! Variable scoring
//!
//! Maps a raw variable value onto a 0-100 score through a [`ThresholdTable`],
//! then maps the score onto a [`RiskLevel`] through fixed score breakpoints.
//! The two bucketings are independent: the value step scores (10/35/65/85/100)
//! land in the level bands (≤25/≤50/≤75/>75) one-to-one only by construction
//! of the step values.

use crate::risk::config::ThresholdTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score breakpoints separating variable risk levels
pub mod level_breakpoints {
    /// Highest score still rated low
    pub const LOW: f64 = 25.0;
    /// Highest score still rated moderate
    pub const MODERATE: f64 = 50.0;
    /// Highest score still rated high
    pub const HIGH: f64 = 75.0;
}

/// Per-variable risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score ≤ 25
    Low,
    /// Score in (25, 50]
    Moderate,
    /// Score in (50, 75]
    High,
    /// Score > 75
    Extreme,
}

impl RiskLevel {
    /// Level for a 0-100 score
    pub fn from_score(score: f64) -> Self {
        if score <= level_breakpoints::LOW {
            RiskLevel::Low
        } else if score <= level_breakpoints::MODERATE {
            RiskLevel::Moderate
        } else if score <= level_breakpoints::HIGH {
            RiskLevel::High
        } else {
            RiskLevel::Extreme
        }
    }

    /// High or extreme; these levels raise alerts and variable advice
    pub fn is_elevated(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Extreme)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// Score and level for one variable value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableScore {
    /// 0-100 score
    pub score: f64,
    /// Level derived from the score
    pub level: RiskLevel,
}

/// Step score of a value against a threshold table
pub fn step_score(value: f64, table: &ThresholdTable) -> f64 {
    if value <= table.low {
        10.0
    } else if value <= table.moderate {
        35.0
    } else if value <= table.high {
        65.0
    } else if value <= table.extreme {
        85.0
    } else {
        100.0
    }
}

/// Score a value and derive its level
pub fn score(value: f64, table: &ThresholdTable) -> VariableScore {
    let score = step_score(value, table);
    VariableScore {
        score,
        level: RiskLevel::from_score(score),
    }
}

/// Score relative humidity for grid cells
///
/// The score is the humidity itself clamped to [0, 100]; the level uses its
/// own breakpoints (>80 high, >60 moderate) rather than the score bands.
pub fn score_humidity(humidity: f64) -> VariableScore {
    let level = if humidity > 80.0 {
        RiskLevel::High
    } else if humidity > 60.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    VariableScore {
        score: humidity.clamp(0.0, 100.0),
        level,
    }
}
