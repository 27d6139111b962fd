//! Point-forecast glacier risk engine
//!
//! Reduces a short-range forecast to one representative value per variable,
//! scores each against its threshold table and combines them into a weighted
//! total with a traffic-light level.
//!
//! Representative statistics:
//! - Temperature: mean of (3-day maximum, current)
//! - Wind: maximum of (3-day maximum, current)
//! - Precipitation and snow: 3-day totals
//! - Solar radiation: mean of positive readings over the next 24 hours
//!
//! The engine never fails. Missing input yields a well-formed no-data
//! evaluation with zero confidence.

use crate::core_types::observation::{ForecastSeries, Location, WeatherObservation};
use crate::risk::config::{RiskConfig, VariableConfig};
use crate::risk::evaluation::{
    weighted_total, GlobalRiskLevel, RiskEvaluation, RiskVariable, Trend, VariableKind,
};
use crate::risk::scorer::{self, RiskLevel};
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// Forecast days aggregated for temperature, wind, precipitation and snow
pub const FORECAST_WINDOW_DAYS: usize = 3;

/// Hourly readings averaged for solar radiation
pub const RADIATION_WINDOW_HOURS: usize = 24;

/// Narrative used for every variable of a no-data evaluation
pub const NO_DATA_DESCRIPTION: &str = "Data unavailable - no connection to weather provider";

/// Alert raised by a no-data evaluation
pub const NO_DATA_ALERT: &str = "Weather data unavailable";

/// Recommendations of a no-data evaluation
pub const NO_DATA_RECOMMENDATIONS: [&str; 2] = [
    "Check the weather data feed",
    "Contact the system administrator",
];

/// Representative value of each tracked variable for one forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStatistics {
    /// Mean of 3-day maximum and current temperature (°C)
    pub temperature: f64,
    /// Maximum of 3-day maximum and current wind (km/h)
    pub wind: f64,
    /// 3-day precipitation total (mm)
    pub precipitation: f64,
    /// Mean positive irradiance over 24 hours (W/m²)
    pub solar_radiation: f64,
    /// 3-day snowfall total (cm)
    pub snow: f64,
}

impl ForecastStatistics {
    /// Reduce a forecast to representative values
    pub fn from_forecast(forecast: &ForecastSeries) -> Self {
        let days = forecast.leading_days(FORECAST_WINDOW_DAYS);
        let current_temp = *forecast.current.temperature;
        let current_wind = *forecast.current.wind_speed;

        let max_temp = days
            .iter()
            .map(|d| *d.temperature_max)
            .reduce(f64::max)
            .unwrap_or(current_temp);
        let max_wind = days
            .iter()
            .map(|d| *d.wind_speed_max)
            .fold(current_wind, f64::max);
        let precipitation: f64 = days.iter().map(|d| *d.precipitation_total).sum();
        let snow: f64 = days.iter().map(|d| *d.snowfall_total).sum();

        let positive: Vec<f64> = forecast
            .leading_hours(RADIATION_WINDOW_HOURS)
            .iter()
            .map(|h| *h.solar_radiation)
            .filter(|r| *r > 0.0)
            .collect();
        let solar_radiation = if positive.is_empty() {
            0.0
        } else {
            positive.iter().sum::<f64>() / positive.len() as f64
        };

        ForecastStatistics {
            temperature: (max_temp + current_temp) / 2.0,
            wind: max_wind,
            precipitation,
            solar_radiation,
            snow,
        }
    }
}

/// Multi-factor risk engine for point forecasts
#[derive(Debug, Clone, Default)]
pub struct RiskScoringEngine {
    config: RiskConfig,
}

impl RiskScoringEngine {
    /// Engine with a custom configuration
    pub fn new(config: RiskConfig) -> Self {
        RiskScoringEngine { config }
    }

    /// Active configuration
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluate a location now
    pub fn evaluate(&self, location: &Location, forecast: Option<&ForecastSeries>) -> RiskEvaluation {
        self.evaluate_at(location, forecast, Utc::now())
    }

    /// Evaluate a location at an explicit evaluation time
    ///
    /// `None` yields the no-data evaluation.
    pub fn evaluate_at(
        &self,
        location: &Location,
        forecast: Option<&ForecastSeries>,
        now: DateTime<Utc>,
    ) -> RiskEvaluation {
        let Some(forecast) = forecast else {
            warn!(location = %location.name, "no forecast available, returning no-data evaluation");
            return self.no_data_evaluation(location, now);
        };

        let stats = ForecastStatistics::from_forecast(forecast);
        let variables = vec![
            scored(VariableKind::Temperature, stats.temperature, &self.config.temperature),
            scored(VariableKind::Wind, stats.wind, &self.config.wind),
            scored(VariableKind::Precipitation, stats.precipitation, &self.config.precipitation),
            scored(VariableKind::SolarRadiation, stats.solar_radiation, &self.config.solar_radiation),
            scored(VariableKind::Snow, stats.snow, &self.config.snow),
        ];

        let total_score = weighted_total(&variables);
        let global_level = GlobalRiskLevel::from_total(total_score);
        let alerts = alerts_for(&variables, global_level);
        let recommendations = recommendations_for(&variables, global_level);

        debug!(
            location = %location.name,
            total_score,
            level = %global_level,
            "risk evaluated"
        );

        RiskEvaluation {
            location: location.clone(),
            timestamp: now,
            variables,
            total_score,
            global_level,
            confidence: forecast_confidence(forecast.horizon_days()),
            trend: forecast_trend(forecast),
            alerts,
            recommendations,
            valid_until: now + Duration::hours(self.config.validity_hours),
            cell: None,
        }
    }

    /// Evaluate a single snapshot as a one-day forecast
    pub fn evaluate_observation_at(
        &self,
        observation: &WeatherObservation,
        now: DateTime<Utc>,
    ) -> RiskEvaluation {
        let forecast = ForecastSeries::from(observation);
        self.evaluate_at(&observation.location, Some(&forecast), now)
    }

    /// Evaluate many sites in parallel; output order matches input order
    pub fn evaluate_sites_at(
        &self,
        sites: &[(Location, Option<ForecastSeries>)],
        now: DateTime<Utc>,
    ) -> Vec<RiskEvaluation> {
        sites
            .par_iter()
            .map(|(location, forecast)| self.evaluate_at(location, forecast.as_ref(), now))
            .collect()
    }

    /// Well-formed evaluation for a location without weather data
    pub fn no_data_evaluation(&self, location: &Location, now: DateTime<Utc>) -> RiskEvaluation {
        let c = &self.config;
        let variables = no_data_variables(&[
            (VariableKind::Temperature, c.temperature.weight),
            (VariableKind::Wind, c.wind.weight),
            (VariableKind::Precipitation, c.precipitation.weight),
            (VariableKind::SolarRadiation, c.solar_radiation.weight),
            (VariableKind::Snow, c.snow.weight),
        ]);

        RiskEvaluation {
            location: location.clone(),
            timestamp: now,
            variables,
            total_score: 0.0,
            global_level: GlobalRiskLevel::Green,
            confidence: 0.0,
            trend: Trend::Stable,
            alerts: vec![NO_DATA_ALERT.to_string()],
            recommendations: NO_DATA_RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
            valid_until: now + Duration::hours(c.validity_hours),
            cell: None,
        }
    }
}

/// Score one representative value into a variable with its narrative
pub(crate) fn scored(kind: VariableKind, value: f64, config: &VariableConfig) -> RiskVariable {
    let result = scorer::score(value, &config.thresholds);
    RiskVariable {
        kind,
        value,
        weight: config.weight,
        score: result.score,
        level: result.level,
        description: kind.describe(value, result.level),
    }
}

/// Zero-valued variables carrying the no-data narrative
pub(crate) fn no_data_variables(kinds: &[(VariableKind, f64)]) -> Vec<RiskVariable> {
    kinds
        .iter()
        .map(|&(kind, weight)| RiskVariable {
            kind,
            value: 0.0,
            weight,
            score: 0.0,
            level: RiskLevel::Low,
            description: NO_DATA_DESCRIPTION.to_string(),
        })
        .collect()
}

/// Confidence for a forecast horizon: 85, less 10 beyond 3 days, less a
/// further 15 beyond 7 days, never below 60
pub fn forecast_confidence(horizon_days: usize) -> f64 {
    let mut confidence: f64 = 85.0;
    if horizon_days > 3 {
        confidence -= 10.0;
    }
    if horizon_days > 7 {
        confidence -= 15.0;
    }
    confidence.max(60.0)
}

/// Trend from the day-0 to day-2 maximum temperature change
pub fn forecast_trend(forecast: &ForecastSeries) -> Trend {
    let initial = forecast
        .daily
        .first()
        .map_or(*forecast.current.temperature, |d| *d.temperature_max);
    let later = forecast.daily.get(2).map_or(initial, |d| *d.temperature_max);

    let change = later - initial;
    if change > 2.0 {
        Trend::Worsening
    } else if change < -2.0 {
        Trend::Improving
    } else {
        Trend::Stable
    }
}

/// One alert per high or extreme variable, then the level-wide alert
pub fn alerts_for(variables: &[RiskVariable], level: GlobalRiskLevel) -> Vec<String> {
    let mut alerts: Vec<String> = variables
        .iter()
        .filter_map(|v| match v.level {
            RiskLevel::Extreme => Some(format!(
                "CRITICAL ALERT: {} at extreme level ({:.1})",
                v.name(),
                v.value
            )),
            RiskLevel::High => Some(format!(
                "HIGH ALERT: {} at high level ({:.1})",
                v.name(),
                v.value
            )),
            RiskLevel::Low | RiskLevel::Moderate => None,
        })
        .collect();

    if let Some(alert) = level.alert() {
        alerts.push(alert.to_string());
    }
    alerts
}

/// Level recommendations followed by advice for elevated variables,
/// de-duplicated keeping first occurrence
pub fn recommendations_for(variables: &[RiskVariable], level: GlobalRiskLevel) -> Vec<String> {
    let advice = variables
        .iter()
        .filter(|v| v.level.is_elevated())
        .flat_map(|v| v.kind.advice().iter().copied());

    let mut seen = FxHashSet::default();
    level
        .recommendations()
        .iter()
        .copied()
        .chain(advice)
        .filter(|r| seen.insert(*r))
        .map(ToString::to_string)
        .collect()
}
