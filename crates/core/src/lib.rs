//! Glacier Risk and Melt Simulation Core Library
//!
//! Turns meteorological observations for Patagonian glaciers into two derived
//! artifacts: a multi-factor risk evaluation per glacier site or monitoring
//! cell, and a one-year melt simulation with its cultural, environmental and
//! urban impact.
//!
//! ## Pipelines
//!
//! - Forecast or observation → [`RiskScoringEngine`] / [`GridRiskEvaluator`]
//!   → [`RiskEvaluation`]
//! - [`GlacierProfile`] + target year → [`ClimateProjector`] →
//!   [`MeltSimulationEngine`] → [`MeltSimulationResult`] → [`ImpactAnalyzer`]
//!   → [`ImpactAnalysis`]
//!
//! Every component is pure and synchronous. Hosts that run requests
//! concurrently keep the freshest answer with [`sequencing::LatestResult`].

// Core types and data contracts
pub mod core_types;

// Risk evaluation
pub mod risk;

// Melt simulation and impact analysis
pub mod melt;

pub mod error;
pub mod sequencing;

// Re-export core types
pub use core_types::{
    patagonian_glacier_sites, ClimateBaseline, ClimateStation, ForecastSeries, GlacierClassification,
    GlacierProfile, Location, TemperatureBaseline, WeatherObservation,
};

// Re-export risk types
pub use risk::{
    GlobalRiskLevel, GridConfig, GridRiskEvaluator, MonitoringGrid, RiskConfig, RiskEvaluation,
    RiskLevel, RiskScoringEngine,
};

// Re-export melt types
pub use melt::{
    simulate_and_analyze, ClimateProjector, ImpactAnalysis, ImpactAnalyzer, ImpactSeverity,
    MeltSimulationEngine, MeltSimulationInput, MeltSimulationResult, ProjectionConfig,
    SimulationParameters, TargetYear,
};

pub use error::{FieldViolation, GlacierSimError, MeltValidationError};
pub use sequencing::{LatestResult, ResultObserver, ResultRepository, SequenceCounter, Sequenced};
