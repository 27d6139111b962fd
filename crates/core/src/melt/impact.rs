//! Cultural, environmental and urban impact of simulated glacier loss
//!
//! Severity per dimension:
//! - Cultural and environmental: share of the volume lost (>70% critical,
//!   >40% high, >20% moderate)
//! - Urban: absolute volume lost (>1 km³ critical, >0.5 km³ high,
//!   >0.1 km³ moderate), plus settlements within 300 km
//!
//! The overall severity is the worst of the three.

use crate::core_types::glacier::GlacierProfile;
use crate::melt::catalog::RegionCatalog;
use crate::melt::engine::MeltSimulationResult;
use crate::melt::settlements::{NearbySettlement, SettlementRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Impact severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactSeverity {
    /// Minimal impact
    Low,
    /// Noticeable impact
    Moderate,
    /// Significant impact
    High,
    /// Severe impact
    Critical,
}

impl ImpactSeverity {
    /// Severity from the share of volume lost (%)
    pub fn from_percent_lost(percent: f64) -> Self {
        match percent {
            p if p > 70.0 => ImpactSeverity::Critical,
            p if p > 40.0 => ImpactSeverity::High,
            p if p > 20.0 => ImpactSeverity::Moderate,
            _ => ImpactSeverity::Low,
        }
    }

    /// Severity from the absolute volume lost (km³)
    pub fn from_volume_lost(km3: f64) -> Self {
        match km3 {
            v if v > 1.0 => ImpactSeverity::Critical,
            v if v > 0.5 => ImpactSeverity::High,
            v if v > 0.1 => ImpactSeverity::Moderate,
            _ => ImpactSeverity::Low,
        }
    }

    /// High or critical
    pub fn is_severe(self) -> bool {
        self >= ImpactSeverity::High
    }
}

impl fmt::Display for ImpactSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImpactSeverity::Low => "low",
            ImpactSeverity::Moderate => "moderate",
            ImpactSeverity::High => "high",
            ImpactSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Impact on heritage and traditional practices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalImpact {
    /// Severity
    pub severity: ImpactSeverity,
    /// Narrative
    pub description: String,
    /// Culturally significant sites affected
    pub affected_sites: Vec<String>,
    /// Indigenous and historic communities of the region
    pub indigenous_communities: Vec<String>,
    /// Intangible heritage at risk
    pub affected_heritage: Vec<String>,
}

/// Impact on ecosystems and water
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    /// Severity
    pub severity: ImpactSeverity,
    /// Narrative
    pub description: String,
    /// Ecosystems affected
    pub affected_ecosystems: Vec<String>,
    /// Species at risk
    pub species_at_risk: Vec<String>,
    /// Habitats losing connectivity
    pub fragmented_habitats: Vec<String>,
    /// Expected change in water quality
    pub water_quality: String,
}

/// Impact on settlements and infrastructure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrbanImpact {
    /// Severity
    pub severity: ImpactSeverity,
    /// Narrative
    pub description: String,
    /// Settlements within reach, nearest first
    pub nearby_settlements: Vec<NearbySettlement>,
    /// Total population of the nearby settlements
    pub affected_population: u64,
    /// Infrastructure at risk
    pub infrastructure_at_risk: Vec<String>,
    /// Water resources affected
    pub water_resources: Vec<String>,
    /// Additional meltwater (litres)
    pub meltwater_liters: f64,
}

/// Combined impact analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    /// Cultural block
    pub cultural: CulturalImpact,
    /// Environmental block
    pub environmental: EnvironmentalImpact,
    /// Urban block
    pub urban: UrbanImpact,
    /// Recommended actions
    pub recommendations: Vec<String>,
    /// Worst severity across the three blocks
    pub overall: ImpactSeverity,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

const CULTURAL_RECOMMENDATIONS: &[&str] = &[
    "Urgently document cultural practices and traditional knowledge related to glaciers",
    "Create digital archives of glacial cultural heritage for future generations",
    "Involve indigenous communities in monitoring and conservation programs",
];

const ENVIRONMENTAL_RECOMMENDATIONS: &[&str] = &[
    "Implement intensive monitoring of indicator species and water quality",
    "Create biological corridors connecting fragmented habitats",
    "Establish conservation areas in critical transition zones",
];

const URBAN_RECOMMENDATIONS: &[&str] = &[
    "Develop evacuation plans and early warning systems",
    "Reinforce critical infrastructure and drainage systems",
    "Implement adaptive water management",
];

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Continuous satellite monitoring of glacier retreat",
    "International coordination for transboundary basin management",
    "Education programs on climate change and adaptation",
];

/// Derives impact analyses from melt results
#[derive(Debug, Clone, Default)]
pub struct ImpactAnalyzer {
    settlements: SettlementRegistry,
    catalog: RegionCatalog,
}

impl ImpactAnalyzer {
    /// Analyzer over custom settlement and region data
    pub fn new(settlements: SettlementRegistry, catalog: RegionCatalog) -> Self {
        ImpactAnalyzer {
            settlements,
            catalog,
        }
    }

    /// Analyze the impact of `result` on the glacier's surroundings
    pub fn analyze(&self, glacier: &GlacierProfile, result: &MeltSimulationResult) -> ImpactAnalysis {
        let percent_lost = result.percent_lost();
        let region = glacier.region.as_deref().unwrap_or_default();

        let cultural = self.cultural(percent_lost, region);
        let environmental = self.environmental(percent_lost);
        let urban = self.urban(
            *result.volume_lost,
            result.volume_lost.to_liters(),
            glacier.location.latitude,
            glacier.location.longitude,
        );

        let overall = cultural
            .severity
            .max(environmental.severity)
            .max(urban.severity);
        let recommendations =
            recommendations(cultural.severity, environmental.severity, urban.severity);

        tracing::debug!(
            "Impact for {}: {:.2}% lost, cultural={}, environmental={}, urban={}, overall={}",
            glacier.name(),
            percent_lost,
            cultural.severity,
            environmental.severity,
            urban.severity,
            overall
        );

        ImpactAnalysis {
            cultural,
            environmental,
            urban,
            recommendations,
            overall,
        }
    }

    fn cultural(&self, percent_lost: f64, region: &str) -> CulturalImpact {
        let heritage = self.catalog.heritage_for(region);
        let mut affected_sites = heritage.sites;
        let severity = ImpactSeverity::from_percent_lost(percent_lost);

        let (description, affected_heritage) = match severity {
            ImpactSeverity::Critical => (
                "Critical glacier loss gravely threatens the region's cultural heritage and ancestral navigation and survival traditions.",
                strings(&[
                    "Traditional navigation routes",
                    "Ancestral knowledge of the ice",
                    "Sacred sites related to glaciers",
                ]),
            ),
            ImpactSeverity::High => (
                "Significant glacier retreat disrupts traditional cultural practices and alters the historic cultural landscape.",
                strings(&["Patagonian cultural landscapes", "Historic exploration routes"]),
            ),
            ImpactSeverity::Moderate => {
                affected_sites.extend(strings(&[
                    "Historic viewpoints",
                    "Traditional navigation landmarks",
                ]));
                (
                    "Visible glacier changes begin to alter the cultural context and traditional territorial references.",
                    Vec::new(),
                )
            }
            ImpactSeverity::Low => (
                "Cultural impact is minimal; monitoring is recommended to preserve long-term heritage.",
                Vec::new(),
            ),
        };

        CulturalImpact {
            severity,
            description: description.to_string(),
            affected_sites,
            indigenous_communities: heritage.communities,
            affected_heritage,
        }
    }

    fn environmental(&self, percent_lost: f64) -> EnvironmentalImpact {
        let severity = ImpactSeverity::from_percent_lost(percent_lost);
        let mut species_at_risk = self.catalog.species().to_vec();

        let (description, fragmented_habitats, water_quality) = match severity {
            ImpactSeverity::Critical => {
                species_at_risk.extend(strings(&[
                    "Glacial aquatic invertebrates",
                    "Specialised mosses and lichens",
                ]));
                (
                    "Collapse of the glacial ecosystem with massive loss of unique habitats and irreversible change to the regional hydrological network.",
                    strings(&[
                        "Glacial biological corridors",
                        "Climate refuge zones",
                        "High mountain ecosystems",
                    ]),
                    "Severe deterioration from massive sedimentation and changes in water temperature",
                )
            }
            ImpactSeverity::High => (
                "Significant fragmentation of glacial habitats and altered hydrological patterns affecting regional biodiversity.",
                strings(&[
                    "Glacier-forest transition zones",
                    "Meltwater-fed wetlands",
                ]),
                "Increased sediment load and thermal variability in watercourses",
            ),
            ImpactSeverity::Moderate => (
                "Changes in freshwater availability and gradual modification of local microclimates.",
                Vec::new(),
                "Seasonal changes in water flow and temperature",
            ),
            ImpactSeverity::Low => (
                "Limited environmental impact; indicator species and water quality still require monitoring.",
                Vec::new(),
                "Minimal changes in water quality",
            ),
        };

        EnvironmentalImpact {
            severity,
            description: description.to_string(),
            affected_ecosystems: self.catalog.ecosystems().to_vec(),
            species_at_risk,
            fragmented_habitats,
            water_quality: water_quality.to_string(),
        }
    }

    fn urban(&self, volume_lost: f64, meltwater_liters: f64, latitude: f64, longitude: f64) -> UrbanImpact {
        let nearby_settlements = self.settlements.nearby(latitude, longitude);
        let affected_population = nearby_settlements
            .iter()
            .map(|s| u64::from(s.population))
            .sum();
        let severity = ImpactSeverity::from_volume_lost(volume_lost);

        let (description, infrastructure_at_risk, water_resources) = match severity {
            ImpactSeverity::Critical => (
                format!(
                    "Critical flood risk with {:.2e} litres of additional meltwater. Preventive evacuation recommended.",
                    meltwater_liters
                ),
                strings(&[
                    "Water treatment plants",
                    "Coastal bridges and roads",
                    "Ports and piers",
                    "Low-lying housing",
                ]),
                strings(&[
                    "Urban drinking water systems",
                    "Municipal reservoirs",
                    "Port infrastructure",
                ]),
            ),
            ImpactSeverity::High => (
                format!(
                    "High risk of localised flooding with {:.2e} additional litres. Intensive monitoring required.",
                    meltwater_liters
                ),
                strings(&[
                    "Urban drainage systems",
                    "Access roads",
                    "Tourism infrastructure",
                ]),
                strings(&["Local river basins", "Irrigation systems"]),
            ),
            ImpactSeverity::Moderate => (
                "Moderate increase in water flow requiring adjustments to local water management."
                    .to_string(),
                strings(&["Sewer systems", "Adventure tourism infrastructure"]),
                strings(&["Local streams", "Rural water intakes"]),
            ),
            ImpactSeverity::Low => (
                "Minimal urban impact; preventive monitoring of watercourses is recommended."
                    .to_string(),
                Vec::new(),
                strings(&["Water quality monitoring"]),
            ),
        };

        UrbanImpact {
            severity,
            description,
            nearby_settlements,
            affected_population,
            infrastructure_at_risk,
            water_resources,
            meltwater_liters,
        }
    }
}

/// Per-dimension recommendations for severe dimensions, then the general ones
fn recommendations(
    cultural: ImpactSeverity,
    environmental: ImpactSeverity,
    urban: ImpactSeverity,
) -> Vec<String> {
    [
        (cultural, CULTURAL_RECOMMENDATIONS),
        (environmental, ENVIRONMENTAL_RECOMMENDATIONS),
        (urban, URBAN_RECOMMENDATIONS),
    ]
    .into_iter()
    .filter(|(severity, _)| severity.is_severe())
    .flat_map(|(_, list)| list.iter())
    .chain(GENERAL_RECOMMENDATIONS.iter())
    .map(ToString::to_string)
    .collect()
}
