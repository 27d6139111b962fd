//! Risk evaluation output contract
//!
//! A [`RiskEvaluation`] is created per call and never mutated. It carries the
//! scored variables, the weighted total, the traffic-light global level,
//! trend and confidence, and the alert and recommendation text shown to
//! operators.

use crate::core_types::observation::Location;
use crate::risk::grid::{CellExplanation, CellPriority, CellRiskClass};
use crate::risk::scorer::{level_breakpoints, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological variable contributing to glacier risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    /// Air temperature (°C)
    Temperature,
    /// Wind speed (km/h)
    Wind,
    /// Precipitation (mm)
    Precipitation,
    /// Shortwave irradiance (W/m²)
    SolarRadiation,
    /// Snowfall (cm)
    Snow,
    /// Relative humidity (%), grid cells only
    Humidity,
}

impl VariableKind {
    /// Operator-facing name
    pub fn display_name(self) -> &'static str {
        match self {
            VariableKind::Temperature => "Temperature",
            VariableKind::Wind => "Wind",
            VariableKind::Precipitation => "Precipitation",
            VariableKind::SolarRadiation => "Solar radiation",
            VariableKind::Snow => "Snow",
            VariableKind::Humidity => "Humidity",
        }
    }

    /// Field advice issued when this variable reaches high or extreme
    pub fn advice(self) -> &'static [&'static str] {
        match self {
            VariableKind::Temperature => &[
                "Monitor glacial melt",
                "Assess serac stability",
            ],
            VariableKind::Wind => &[
                "Secure mobile equipment",
                "Suspend reconnaissance flights",
            ],
            VariableKind::Precipitation => &[
                "Monitor river discharge",
                "Assess debris-flow risk",
            ],
            VariableKind::SolarRadiation => &[
                "Protect sensitive equipment",
                "Monitor glacial lake formation",
            ],
            VariableKind::Snow => &[
                "Assess avalanche risk",
                "Inspect access roads and routes",
            ],
            VariableKind::Humidity => &[],
        }
    }

    /// Narrative for a forecast-derived value at a given level
    pub fn describe(self, value: f64, level: RiskLevel) -> String {
        match (self, level) {
            (VariableKind::Temperature, RiskLevel::Extreme) => {
                format!("Critical temperature of {:.1}°C - accelerated glacial melt", value)
            }
            (VariableKind::Temperature, RiskLevel::High) => {
                format!("High temperature of {:.1}°C - significant melt", value)
            }
            (VariableKind::Temperature, RiskLevel::Moderate) => {
                format!("Moderate temperature of {:.1}°C - normal melt", value)
            }
            (VariableKind::Temperature, RiskLevel::Low) => {
                format!("Normal temperature of {:.1}°C - stable conditions", value)
            }
            (VariableKind::Wind, RiskLevel::Extreme) => {
                format!("Extreme winds of {:.1} km/h - dangerous conditions", value)
            }
            (VariableKind::Wind, RiskLevel::High) => {
                format!("Strong winds of {:.1} km/h - caution required", value)
            }
            (VariableKind::Wind, RiskLevel::Moderate) => {
                format!("Moderate winds of {:.1} km/h - normal conditions", value)
            }
            (VariableKind::Wind, RiskLevel::Low) => {
                format!("Light winds of {:.1} km/h - ideal conditions", value)
            }
            (VariableKind::Precipitation, RiskLevel::Extreme) => {
                format!("Extreme precipitation of {:.1} mm - flood risk", value)
            }
            (VariableKind::Precipitation, RiskLevel::High) => {
                format!("Heavy precipitation of {:.1} mm - rising discharge", value)
            }
            (VariableKind::Precipitation, RiskLevel::Moderate) => {
                format!("Moderate precipitation of {:.1} mm - normal conditions", value)
            }
            (VariableKind::Precipitation, RiskLevel::Low) => {
                format!("Light precipitation of {:.1} mm - stable conditions", value)
            }
            (VariableKind::SolarRadiation, RiskLevel::Extreme) => {
                format!("Extreme radiation of {:.0} W/m² - intense melt", value)
            }
            (VariableKind::SolarRadiation, RiskLevel::High) => {
                format!("High radiation of {:.0} W/m² - moderate melt", value)
            }
            (VariableKind::SolarRadiation, RiskLevel::Moderate) => {
                format!("Moderate radiation of {:.0} W/m² - normal melt", value)
            }
            (VariableKind::SolarRadiation, RiskLevel::Low) => {
                format!("Low radiation of {:.0} W/m² - minimal melt", value)
            }
            (VariableKind::Snow, RiskLevel::Extreme) => {
                format!("Extreme snowfall of {:.1} cm - avalanche risk", value)
            }
            (VariableKind::Snow, RiskLevel::High) => {
                format!("Heavy snowfall of {:.1} cm - significant accumulation", value)
            }
            (VariableKind::Snow, RiskLevel::Moderate) => {
                format!("Moderate snowfall of {:.1} cm - normal accumulation", value)
            }
            (VariableKind::Snow, RiskLevel::Low) => {
                format!("Light snowfall of {:.1} cm - stable conditions", value)
            }
            (VariableKind::Humidity, _) => format!("Relative humidity: {:.1}%", value),
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One scored variable inside an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVariable {
    /// Which variable
    pub kind: VariableKind,
    /// Representative raw value in the variable's unit
    pub value: f64,
    /// Contribution weight to the total score
    pub weight: f64,
    /// 0-100 score
    pub score: f64,
    /// Level derived from the score
    pub level: RiskLevel,
    /// Operator-facing narrative
    pub description: String,
}

impl RiskVariable {
    /// Operator-facing name
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Weighted contribution to the total score
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// Sum of weighted variable scores
pub fn weighted_total(variables: &[RiskVariable]) -> f64 {
    variables.iter().map(RiskVariable::contribution).sum()
}

/// Traffic-light danger level of a whole evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GlobalRiskLevel {
    /// Total ≤ 25
    Green,
    /// Total in (25, 50]
    Yellow,
    /// Total in (50, 75]
    Orange,
    /// Total > 75
    Red,
}

impl GlobalRiskLevel {
    /// Level for a weighted total score
    pub fn from_total(total: f64) -> Self {
        if total <= level_breakpoints::LOW {
            GlobalRiskLevel::Green
        } else if total <= level_breakpoints::MODERATE {
            GlobalRiskLevel::Yellow
        } else if total <= level_breakpoints::HIGH {
            GlobalRiskLevel::Orange
        } else {
            GlobalRiskLevel::Red
        }
    }

    /// Standing operational recommendations for this level
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            GlobalRiskLevel::Red => &[
                "Evacuate non-essential personnel immediately",
                "Activate emergency protocols",
                "Continuous 24/7 monitoring",
                "Alert nearby communities",
            ],
            GlobalRiskLevel::Orange => &[
                "Increase monitoring frequency",
                "Prepare response teams",
                "Restrict activities in the risk zone",
            ],
            GlobalRiskLevel::Yellow => &[
                "Maintain heightened vigilance",
                "Check safety equipment",
            ],
            GlobalRiskLevel::Green => &["Continue routine monitoring"],
        }
    }

    /// Level-wide alert, if this level raises one
    pub fn alert(self) -> Option<&'static str> {
        match self {
            GlobalRiskLevel::Red => {
                Some("MAXIMUM ALERT: Extremely dangerous conditions for glaciers")
            }
            GlobalRiskLevel::Orange => Some("HIGH ALERT: Dangerous conditions detected"),
            GlobalRiskLevel::Yellow | GlobalRiskLevel::Green => None,
        }
    }
}

impl fmt::Display for GlobalRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GlobalRiskLevel::Green => "green",
            GlobalRiskLevel::Yellow => "yellow",
            GlobalRiskLevel::Orange => "orange",
            GlobalRiskLevel::Red => "red",
        };
        f.write_str(label)
    }
}

/// Expected direction of risk over the forecast window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Temperatures falling
    Improving,
    /// No significant change
    Stable,
    /// Temperatures rising
    Worsening,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Worsening => "worsening",
        };
        f.write_str(label)
    }
}

/// Monitoring-cell context attached to grid evaluations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellContext {
    /// Cell identifier
    pub cell_id: String,
    /// Operational priority of the cell's comuna
    pub priority: CellPriority,
    /// Points-heuristic risk class
    pub risk_class: CellRiskClass,
    /// Narrative explanation, absent when the cell had no data
    pub explanation: Option<CellExplanation>,
}

/// Complete risk assessment for one location or monitoring cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEvaluation {
    /// Evaluated location
    pub location: Location,
    /// Observation or evaluation time
    pub timestamp: DateTime<Utc>,
    /// Scored variables
    pub variables: Vec<RiskVariable>,
    /// Weighted sum of variable scores
    pub total_score: f64,
    /// Traffic-light level of the total score
    pub global_level: GlobalRiskLevel,
    /// Confidence in percent (0 when no data was available)
    pub confidence: f64,
    /// Direction of risk over the forecast window
    pub trend: Trend,
    /// Operator alerts
    pub alerts: Vec<String>,
    /// De-duplicated recommendations
    pub recommendations: Vec<String>,
    /// Expiry of this evaluation
    pub valid_until: DateTime<Utc>,
    /// Monitoring-cell details for grid evaluations
    pub cell: Option<CellContext>,
}

impl RiskEvaluation {
    /// Whether the evaluation is still valid at `at`
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at <= self.valid_until
    }

    /// The scored variable of a given kind
    pub fn variable(&self, kind: VariableKind) -> Option<&RiskVariable> {
        self.variables.iter().find(|v| v.kind == kind)
    }

    /// True when produced from unavailable input
    pub fn is_no_data(&self) -> bool {
        self.confidence == 0.0
    }
}
