//! Glacier risk evaluation
//!
//! - [`scorer`]: value → score → level bucketing
//! - [`engine`]: point-forecast evaluation
//! - [`grid`]: monitoring-cell evaluation and merge with point results

pub mod config;
pub mod engine;
pub mod evaluation;
pub mod grid;
pub mod scorer;

pub use config::{GridConfig, RiskConfig, ThresholdTable, VariableConfig};
pub use engine::{ForecastStatistics, RiskScoringEngine};
pub use evaluation::{
    CellContext, GlobalRiskLevel, RiskEvaluation, RiskVariable, Trend, VariableKind,
};
pub use grid::{
    CellExplanation, CellPriority, CellRiskClass, GridRiskEvaluator, GridSummary, MonitoringCell,
    MonitoringGrid,
};
pub use scorer::{RiskLevel, VariableScore};
