//! Glacier melt simulation and impact analysis
//!
//! - [`projector`]: climate projection onto a target year, with manual overrides
//! - [`engine`]: degree-day volume loss for one simulated year
//! - [`impact`]: cultural, environmental and urban consequences
//! - [`settlements`], [`catalog`]: reference data used by the impact analysis

pub mod catalog;
pub mod engine;
pub mod impact;
pub mod projector;
pub mod settlements;

pub use catalog::{RegionCatalog, RegionalHeritage};
pub use engine::{
    MeltBranch, MeltFactors, MeltModel, MeltSimulationEngine, MeltSimulationInput,
    MeltSimulationResult, TargetYear,
};
pub use impact::{
    CulturalImpact, EnvironmentalImpact, ImpactAnalysis, ImpactAnalyzer, ImpactSeverity,
    UrbanImpact,
};
pub use projector::{
    ClimateProjector, HumidityShift, ParameterField, ProjectedClimate, ProjectionConfig,
    SimulationParameters,
};
pub use settlements::{NearbySettlement, Settlement, SettlementRegistry};

use crate::core_types::glacier::GlacierProfile;
use crate::error::GlacierSimError;

/// Simulate one year of loss for `glacier` and analyze its impact
///
/// # Errors
///
/// Returns [`GlacierSimError::InvalidInput`] when the inputs fail validation.
pub fn simulate_and_analyze(
    engine: &MeltSimulationEngine,
    analyzer: &ImpactAnalyzer,
    glacier: &GlacierProfile,
    input: &MeltSimulationInput,
) -> Result<(MeltSimulationResult, ImpactAnalysis), GlacierSimError> {
    let result = engine.simulate(glacier.volume, input)?;
    let analysis = analyzer.analyze(glacier, &result);
    Ok((result, analysis))
}
