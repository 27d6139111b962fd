//! Monitoring-grid risk evaluation
//!
//! The regional grid feed delivers one [`WeatherObservation`] snapshot per
//! monitoring cell. Each cell is scored with the point-forecast variables on
//! its current values plus relative humidity, and additionally classified by
//! a points heuristic ([`CellRiskClass`]) that drives cell-specific alerts
//! and recommendations.
//!
//! Grid results supersede point evaluations that fall inside a cell's
//! bounding box when the two are merged.

use crate::core_types::observation::{Location, WeatherObservation};
use crate::risk::config::{GridConfig, RiskConfig};
use crate::risk::engine::{no_data_variables, scored, NO_DATA_RECOMMENDATIONS};
use crate::risk::evaluation::{
    weighted_total, CellContext, GlobalRiskLevel, RiskEvaluation, RiskVariable, Trend,
    VariableKind,
};
use crate::risk::scorer;
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Comunas with the highest operational priority
pub const HIGH_PRIORITY_COMUNAS: [&str; 3] = ["Coyhaique", "Aysén", "Chile Chico"];

/// Comunas with medium operational priority
pub const MEDIUM_PRIORITY_COMUNAS: [&str; 3] = ["Río Ibáñez", "Cochrane", "O'Higgins"];

/// Comunas with the densest glacier coverage (2 risk points)
pub const GLACIER_DENSE_COMUNAS: [&str; 3] = ["Cochrane", "O'Higgins", "Tortel"];

/// Comunas with moderate glacier exposure (1 risk point)
pub const GLACIER_EXPOSED_COMUNAS: [&str; 3] = ["Coyhaique", "Aysén", "Chile Chico"];

/// Alert raised for a cell without data
pub const NO_CELL_DATA_ALERT: &str = "Weather data unavailable for this cell";

/// Operational priority of a monitoring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellPriority {
    /// Routine coverage
    Low,
    /// Elevated coverage
    Medium,
    /// Continuous coverage
    High,
}

impl CellPriority {
    /// Priority assigned to a comuna
    pub fn for_comuna(comuna: &str) -> Self {
        if HIGH_PRIORITY_COMUNAS.contains(&comuna) {
            CellPriority::High
        } else if MEDIUM_PRIORITY_COMUNAS.contains(&comuna) {
            CellPriority::Medium
        } else {
            CellPriority::Low
        }
    }
}

/// Points-heuristic risk class of a monitoring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellRiskClass {
    /// Fewer than 1 point
    Low,
    /// 1-2 points
    Moderate,
    /// 3-4 points
    High,
    /// 5 points or more
    Critical,
}

impl CellRiskClass {
    /// Class for an accumulated point count
    pub fn from_points(points: u32) -> Self {
        match points {
            5.. => CellRiskClass::Critical,
            3..=4 => CellRiskClass::High,
            1..=2 => CellRiskClass::Moderate,
            0 => CellRiskClass::Low,
        }
    }
}

impl fmt::Display for CellRiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CellRiskClass::Low => "low",
            CellRiskClass::Moderate => "moderate",
            CellRiskClass::High => "high",
            CellRiskClass::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Risk points for a cell's current conditions
///
/// | Factor | Points |
/// |---|---|
/// | Temperature ≥25 / >20 / >15 / >10 °C, or < -5 °C | 4 / 3 / 2 / 1, or 1 |
/// | Precipitation >50 / >30 / >20 / >10 mm | 4 / 3 / 2 / 1 |
/// | Humidity >95 / >85 % | 2 / 1 |
/// | Comuna glacier-dense / glacier-exposed | 2 / 1 |
pub fn cell_risk_points(temperature: f64, precipitation: f64, humidity: f64, comuna: &str) -> u32 {
    let temp_points = if temperature >= 25.0 {
        4
    } else if temperature > 20.0 {
        3
    } else if temperature > 15.0 {
        2
    } else if temperature > 10.0 || temperature < -5.0 {
        1
    } else {
        0
    };

    let precip_points = if precipitation > 50.0 {
        4
    } else if precipitation > 30.0 {
        3
    } else if precipitation > 20.0 {
        2
    } else {
        u32::from(precipitation > 10.0)
    };

    let humidity_points = if humidity > 95.0 {
        2
    } else {
        u32::from(humidity > 85.0)
    };

    let comuna_points = if GLACIER_DENSE_COMUNAS.contains(&comuna) {
        2
    } else {
        u32::from(GLACIER_EXPOSED_COMUNAS.contains(&comuna))
    };

    temp_points + precip_points + humidity_points + comuna_points
}

/// Threshold and combination alerts for a cell's current conditions
pub fn cell_alerts(temperature: f64, precipitation: f64, humidity: f64) -> Vec<String> {
    let mut alerts = Vec::new();

    if temperature > 25.0 {
        alerts.push("CRITICAL: Extreme temperature (>25°C) - accelerated glacier melt");
    } else if temperature > 20.0 {
        alerts.push("HIGH: Very high temperature (>20°C) - significant melt risk");
    } else if temperature > 15.0 {
        alerts.push("MODERATE: High temperature (>15°C) - monitor melt");
    }

    if precipitation > 50.0 {
        alerts.push("CRITICAL: Torrential precipitation (>50mm) - flash flood risk");
    } else if precipitation > 30.0 {
        alerts.push("HIGH: Heavy rain (>30mm) - possible critical rise in discharge");
    } else if precipitation > 20.0 {
        alerts.push("MODERATE: Moderate-heavy rain (>20mm) - watch water levels");
    }

    if humidity > 95.0 {
        alerts.push("HIGH: Atmospheric saturation (>95%) - dense fog, no visibility");
    } else if humidity > 90.0 {
        alerts.push("MODERATE: Very high humidity (>90%) - possible fog formation");
    }

    if temperature > 15.0 && precipitation > 20.0 {
        alerts.push("CRITICAL: High temperature with heavy rain - accelerated melt and flooding");
    }
    if temperature > 10.0 && precipitation > 30.0 && humidity > 90.0 {
        alerts.push("EMERGENCY: Combined extreme conditions - preventive evacuation recommended");
    }

    if temperature > 18.0 {
        alerts.push("GLACIER: Critical temperature for glacier stability - monitor calving");
    }
    if precipitation > 25.0 && temperature > 5.0 {
        alerts.push("ICEBERG: Conditions favour iceberg calving");
    }

    alerts.into_iter().map(String::from).collect()
}

/// Narrative explanation of a cell's risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellExplanation {
    /// Factor dominating the cell's risk
    pub dominant_factor: String,
    /// Consequence for nearby glaciers
    pub glacier_risk: String,
    /// Class-level field recommendations
    pub recommendations: Vec<String>,
}

/// Explain a cell's conditions and class
pub fn explain_cell(
    temperature: f64,
    precipitation: f64,
    wind: f64,
    class: CellRiskClass,
) -> CellExplanation {
    let dominant_factor = if temperature > 25.0 && precipitation > 30.0 {
        "Critical combination of extreme temperature and torrential rain"
    } else if temperature > 25.0 {
        "Extremely high temperature for Patagonia"
    } else if precipitation > 50.0 {
        "Torrential rain with high flood risk"
    } else if wind > 60.0 {
        "Hurricane-force winds able to drift ice"
    } else if temperature > 20.0 {
        "Elevated temperature accelerating melt"
    } else {
        "Conditions within normal parameters"
    };

    let (glacier_risk, recommendations): (&str, &[&str]) = match class {
        CellRiskClass::Critical => (
            "Risk of glacier collapse and massive iceberg calving",
            &[
                "Evacuate areas near glaciers immediately",
                "Suspend all boating activity",
                "Continuous water-level monitoring",
                "Activate emergency protocols",
            ],
        ),
        CellRiskClass::High => (
            "Significant melt acceleration with possible instability",
            &[
                "Keep a safe distance from glaciers",
                "Restrict navigation in critical zones",
                "Monitor every 2 hours",
                "Prepare evacuation plans",
            ],
        ),
        CellRiskClass::Moderate => (
            "Accelerated melt within manageable ranges",
            &[
                "Take care during activities near glaciers",
                "Regular monitoring every 6 hours",
                "Report visible changes in glaciers",
            ],
        ),
        CellRiskClass::Low => (
            "Glacier stability within normal parameters",
            &[
                "Maintain routine monitoring",
                "Conditions favourable for normal activities",
            ],
        ),
    };

    CellExplanation {
        dominant_factor: dominant_factor.to_string(),
        glacier_risk: glacier_risk.to_string(),
        recommendations: recommendations.iter().map(ToString::to_string).collect(),
    }
}

/// Fixed-inventory monitoring cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCell {
    /// Unique cell identifier
    pub id: String,
    /// Grid label (e.g. `"Coyhaique_1"`)
    pub grid_id: String,
    /// Comuna containing the cell
    pub comuna: String,
    /// Administrative region
    pub region: String,
    /// Cell centre latitude
    pub latitude: f64,
    /// Cell centre longitude
    pub longitude: f64,
    /// Operational priority
    pub priority: CellPriority,
}

impl MonitoringCell {
    /// Cell whose priority derives from its comuna
    pub fn new(
        id: impl Into<String>,
        grid_id: impl Into<String>,
        comuna: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let comuna = comuna.into();
        MonitoringCell {
            id: id.into(),
            grid_id: grid_id.into(),
            priority: CellPriority::for_comuna(&comuna),
            comuna,
            region: region.into(),
            latitude,
            longitude,
        }
    }

    /// Centre of the cell, named after its grid label
    pub fn location(&self) -> Location {
        Location::new(format!("Zone {}", self.grid_id), self.latitude, self.longitude)
    }
}

/// Cell inventory of the monitoring grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonitoringGrid {
    cells: Vec<MonitoringCell>,
}

impl MonitoringGrid {
    /// Grid over an explicit inventory
    pub fn new(cells: Vec<MonitoringCell>) -> Self {
        MonitoringGrid { cells }
    }

    /// Three-cell inventory used when the full grid is unavailable
    pub fn fallback() -> Self {
        let mut chile_chico =
            MonitoringCell::new("fallback_3", "Chile_Chico_1", "Chile Chico", "Aysén", -46.54, -71.72);
        chile_chico.priority = CellPriority::Medium;

        MonitoringGrid::new(vec![
            MonitoringCell::new("fallback_1", "Coyhaique_1", "Coyhaique", "Aysén", -45.57, -72.07),
            MonitoringCell::new("fallback_2", "Aysen_1", "Aysén", "Aysén", -45.40, -72.69),
            chile_chico,
        ])
    }

    /// Inventory, or the fallback inventory when empty
    pub fn or_fallback(self) -> Self {
        if self.cells.is_empty() {
            warn!("monitoring grid inventory empty, using fallback cells");
            MonitoringGrid::fallback()
        } else {
            self
        }
    }

    /// All cells
    pub fn cells(&self) -> &[MonitoringCell] {
        &self.cells
    }

    /// Cell by identifier
    pub fn get(&self, id: &str) -> Option<&MonitoringCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the inventory has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Aggregate statistics over a set of grid evaluations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    /// Number of evaluated cells
    pub total_cells: usize,
    /// Cell count per risk class
    pub distribution: BTreeMap<CellRiskClass, usize>,
    /// Cells raising at least one alert
    pub cells_with_alerts: usize,
    /// Rounded percentage of cells raising alerts
    pub percent_with_alerts: u32,
}

/// Risk evaluator over the monitoring-grid inventory
#[derive(Debug, Clone, Default)]
pub struct GridRiskEvaluator {
    risk: RiskConfig,
    grid: GridConfig,
}

impl GridRiskEvaluator {
    /// Evaluator with custom configurations
    pub fn new(risk: RiskConfig, grid: GridConfig) -> Self {
        GridRiskEvaluator { risk, grid }
    }

    /// Evaluate one cell; `None` yields the no-data cell evaluation
    pub fn evaluate_cell_at(
        &self,
        cell: &MonitoringCell,
        observation: Option<&WeatherObservation>,
        now: DateTime<Utc>,
    ) -> RiskEvaluation {
        let Some(obs) = observation else {
            warn!(cell = %cell.id, "no observation for cell, returning no-data evaluation");
            return self.no_data_cell(cell, now);
        };

        let temperature = *obs.temperature;
        let precipitation = *obs.precipitation;
        let humidity = *obs.humidity;
        let wind = *obs.wind_speed;

        let variables = self.cell_variables(obs);
        let total_score = weighted_total(&variables);
        let global_level = GlobalRiskLevel::from_total(total_score);

        let points = cell_risk_points(temperature, precipitation, humidity, &cell.comuna);
        let risk_class = CellRiskClass::from_points(points);
        debug!(cell = %cell.id, points, class = %risk_class, total_score, "cell evaluated");

        RiskEvaluation {
            location: cell.location(),
            timestamp: obs.timestamp,
            variables,
            total_score,
            global_level,
            confidence: cell_confidence(obs),
            trend: cell_trend(obs),
            alerts: cell_alerts(temperature, precipitation, humidity),
            recommendations: cell_recommendations(obs, risk_class, cell.priority),
            valid_until: now + Duration::hours(self.grid.validity_hours),
            cell: Some(CellContext {
                cell_id: cell.id.clone(),
                priority: cell.priority,
                risk_class,
                explanation: Some(explain_cell(temperature, precipitation, wind, risk_class)),
            }),
        }
    }

    /// Evaluate every cell of a grid in parallel
    ///
    /// Observations are matched to cells by `cell_id`; cells without a
    /// matching observation get the no-data evaluation. Output order follows
    /// the inventory.
    pub fn evaluate_grid_at(
        &self,
        grid: &MonitoringGrid,
        observations: &[WeatherObservation],
        now: DateTime<Utc>,
    ) -> Vec<RiskEvaluation> {
        let by_cell: FxHashMap<&str, &WeatherObservation> = observations
            .iter()
            .filter_map(|o| o.cell_id.as_deref().map(|id| (id, o)))
            .collect();

        grid.cells()
            .par_iter()
            .map(|cell| self.evaluate_cell_at(cell, by_cell.get(cell.id.as_str()).copied(), now))
            .collect()
    }

    /// Grid results followed by every point result not covered by a cell
    ///
    /// A point result is covered when some grid result lies strictly within
    /// the merge tolerance in both latitude and longitude.
    pub fn merge_with_global(
        &self,
        grid_results: Vec<RiskEvaluation>,
        global_results: Vec<RiskEvaluation>,
    ) -> Vec<RiskEvaluation> {
        let tolerance = self.grid.merge_tolerance;
        let uncovered: Vec<RiskEvaluation> = global_results
            .into_iter()
            .filter(|g| {
                let covered = grid_results
                    .iter()
                    .any(|c| c.location.within_box(&g.location, tolerance));
                if covered {
                    debug!(location = %g.location.name, "point evaluation superseded by grid cell");
                }
                !covered
            })
            .collect();

        let mut merged = grid_results;
        merged.extend(uncovered);
        merged
    }

    /// Class distribution and alert coverage of grid evaluations
    pub fn summarize(evaluations: &[RiskEvaluation]) -> GridSummary {
        let mut distribution = BTreeMap::new();
        for class in evaluations
            .iter()
            .filter_map(|e| e.cell.as_ref().map(|c| c.risk_class))
        {
            *distribution.entry(class).or_insert(0) += 1;
        }

        let total_cells = evaluations.len();
        let cells_with_alerts = evaluations.iter().filter(|e| !e.alerts.is_empty()).count();
        let percent_with_alerts = if total_cells > 0 {
            (cells_with_alerts as f64 / total_cells as f64 * 100.0).round() as u32
        } else {
            0
        };

        GridSummary {
            total_cells,
            distribution,
            cells_with_alerts,
            percent_with_alerts,
        }
    }

    fn cell_variables(&self, obs: &WeatherObservation) -> Vec<RiskVariable> {
        let c = &self.risk;
        let humidity = scorer::score_humidity(*obs.humidity);

        let mut temperature = scored(VariableKind::Temperature, *obs.temperature, &c.temperature);
        temperature.description = format!(
            "Current temperature: {:.1}°C (max: {:.1}°C)",
            *obs.temperature, *obs.temperature_max
        );
        let mut wind = scored(VariableKind::Wind, *obs.wind_speed, &c.wind);
        wind.description = format!(
            "Wind: {:.1} km/h from {:.0}°",
            *obs.wind_speed, *obs.wind_direction
        );
        let mut precipitation = scored(VariableKind::Precipitation, *obs.precipitation, &c.precipitation);
        precipitation.description = format!("Precipitation: {:.1} mm", *obs.precipitation);
        let mut radiation = scored(VariableKind::SolarRadiation, *obs.solar_radiation, &c.solar_radiation);
        radiation.description = format!("Solar radiation: {:.1} W/m²", *obs.solar_radiation);
        let mut snow = scored(VariableKind::Snow, *obs.snowfall, &c.snow);
        snow.description = format!("Snowfall: {:.1} cm", *obs.snowfall);

        vec![
            temperature,
            wind,
            precipitation,
            radiation,
            snow,
            RiskVariable {
                kind: VariableKind::Humidity,
                value: *obs.humidity,
                weight: self.grid.humidity_weight,
                score: humidity.score,
                level: humidity.level,
                description: VariableKind::Humidity.describe(*obs.humidity, humidity.level),
            },
        ]
    }

    fn no_data_cell(&self, cell: &MonitoringCell, now: DateTime<Utc>) -> RiskEvaluation {
        let c = &self.risk;
        let variables = no_data_variables(&[
            (VariableKind::Temperature, c.temperature.weight),
            (VariableKind::Wind, c.wind.weight),
            (VariableKind::Precipitation, c.precipitation.weight),
            (VariableKind::SolarRadiation, c.solar_radiation.weight),
            (VariableKind::Snow, c.snow.weight),
            (VariableKind::Humidity, self.grid.humidity_weight),
        ]);

        RiskEvaluation {
            location: cell.location(),
            timestamp: now,
            variables,
            total_score: 0.0,
            global_level: GlobalRiskLevel::Green,
            confidence: 0.0,
            trend: Trend::Stable,
            alerts: vec![NO_CELL_DATA_ALERT.to_string()],
            recommendations: NO_DATA_RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
            valid_until: now + Duration::hours(self.grid.validity_hours),
            cell: Some(CellContext {
                cell_id: cell.id.clone(),
                priority: cell.priority,
                risk_class: CellRiskClass::Low,
                explanation: None,
            }),
        }
    }
}

/// Confidence of a cell snapshot: 100 less penalties for zero or missing
/// readings, never below 50
pub fn cell_confidence(obs: &WeatherObservation) -> f64 {
    let mut confidence: f64 = 100.0;
    if *obs.temperature == 0.0 {
        confidence -= 20.0;
    }
    if *obs.wind_speed == 0.0 {
        confidence -= 15.0;
    }
    if *obs.solar_radiation == 0.0 {
        confidence -= 15.0;
    }
    if !obs.precipitation.is_finite() {
        confidence -= 10.0;
    }
    confidence.max(50.0)
}

/// Trend of a cell snapshot relative to its period extremes
pub fn cell_trend(obs: &WeatherObservation) -> Trend {
    let current = *obs.temperature;
    if current > *obs.temperature_max * 0.8 {
        Trend::Worsening
    } else if current < *obs.temperature_min * 1.2 {
        Trend::Improving
    } else {
        Trend::Stable
    }
}

/// Cell-specific field recommendations
pub fn cell_recommendations(
    obs: &WeatherObservation,
    class: CellRiskClass,
    priority: CellPriority,
) -> Vec<String> {
    let temperature = *obs.temperature;
    let mut recs = Vec::new();

    if class == CellRiskClass::Critical {
        recs.push("Suspend tourist activity on glaciers");
        recs.push("Intensify calving monitoring");
    }
    if temperature > 2.0 {
        recs.push("Monitor river discharge for accelerated melt");
    }
    if *obs.wind_speed > 40.0 {
        recs.push("Navigation caution - possible iceberg drift");
    }
    if priority == CellPriority::High {
        recs.push("Priority zone - maintain continuous watch");
    }
    if *obs.precipitation > 20.0 && temperature > 0.0 {
        recs.push("Rain on ice - calving risk");
    }

    recs.into_iter().map(String::from).collect()
}
