//! Risk scoring constants
//!
//! Threshold tables and weights are fixed, documented constants. Hosts may
//! construct a custom [`RiskConfig`] but the core never loads one at runtime.

use serde::{Deserialize, Serialize};

/// Four ascending breakpoints separating the score steps of one variable
///
/// A value at or below `low` scores 10, at or below `moderate` 35, at or
/// below `high` 65, at or below `extreme` 85, and anything above scores 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Upper bound of the lowest step
    pub low: f64,
    /// Upper bound of the moderate step
    pub moderate: f64,
    /// Upper bound of the high step
    pub high: f64,
    /// Upper bound of the extreme step
    pub extreme: f64,
}

impl ThresholdTable {
    /// Create a table; breakpoints must be ascending
    pub const fn new(low: f64, moderate: f64, high: f64, extreme: f64) -> Self {
        ThresholdTable {
            low,
            moderate,
            high,
            extreme,
        }
    }
}

/// Default threshold tables for glacier danger variables
pub mod thresholds {
    use super::ThresholdTable;

    /// Air temperature (°C)
    pub const TEMPERATURE: ThresholdTable = ThresholdTable::new(5.0, 10.0, 15.0, 20.0);

    /// Wind speed (km/h)
    pub const WIND: ThresholdTable = ThresholdTable::new(30.0, 50.0, 70.0, 100.0);

    /// Precipitation (mm)
    pub const PRECIPITATION: ThresholdTable = ThresholdTable::new(10.0, 30.0, 50.0, 80.0);

    /// Shortwave irradiance (W/m²)
    pub const SOLAR_RADIATION: ThresholdTable = ThresholdTable::new(200.0, 400.0, 600.0, 800.0);

    /// Snowfall (cm)
    pub const SNOW: ThresholdTable = ThresholdTable::new(5.0, 15.0, 30.0, 50.0);
}

/// Default variable weights; the five point-forecast weights sum to 1.0
pub mod weights {
    /// Air temperature weight
    pub const TEMPERATURE: f64 = 0.30;
    /// Wind speed weight
    pub const WIND: f64 = 0.15;
    /// Precipitation weight
    pub const PRECIPITATION: f64 = 0.20;
    /// Solar radiation weight
    pub const SOLAR_RADIATION: f64 = 0.25;
    /// Snowfall weight
    pub const SNOW: f64 = 0.10;
    /// Relative humidity weight, grid cells only (not renormalised)
    pub const HUMIDITY: f64 = 0.10;
}

/// Threshold table and weight for one scored variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    /// Score step breakpoints
    pub thresholds: ThresholdTable,
    /// Contribution to the weighted total
    pub weight: f64,
}

/// Point-forecast risk engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Air temperature
    pub temperature: VariableConfig,
    /// Wind speed
    pub wind: VariableConfig,
    /// Precipitation
    pub precipitation: VariableConfig,
    /// Solar radiation
    pub solar_radiation: VariableConfig,
    /// Snowfall
    pub snow: VariableConfig,
    /// How long a point evaluation stays valid (hours)
    pub validity_hours: i64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            temperature: VariableConfig {
                thresholds: thresholds::TEMPERATURE,
                weight: weights::TEMPERATURE,
            },
            wind: VariableConfig {
                thresholds: thresholds::WIND,
                weight: weights::WIND,
            },
            precipitation: VariableConfig {
                thresholds: thresholds::PRECIPITATION,
                weight: weights::PRECIPITATION,
            },
            solar_radiation: VariableConfig {
                thresholds: thresholds::SOLAR_RADIATION,
                weight: weights::SOLAR_RADIATION,
            },
            snow: VariableConfig {
                thresholds: thresholds::SNOW,
                weight: weights::SNOW,
            },
            validity_hours: 24,
        }
    }
}

/// Monitoring-grid evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Weight of the humidity variable layered onto the point weights
    pub humidity_weight: f64,
    /// How long a cell evaluation stays valid (hours)
    pub validity_hours: i64,
    /// Half-width in degrees of the box within which a grid cell supersedes
    /// a point evaluation when merging
    pub merge_tolerance: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            humidity_weight: weights::HUMIDITY,
            validity_hours: 6,
            merge_tolerance: 0.5,
        }
    }
}
