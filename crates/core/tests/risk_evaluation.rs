//! End-to-end risk evaluation: point forecasts, monitoring grid and merge
use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use glacier_sim_core::core_types::units::{
    Celsius, Centimeters, Degrees, KilometersPerHour, Millimeters, Percent, WattsPerSquareMeter,
};
use glacier_sim_core::risk::engine::NO_DATA_ALERT;
use glacier_sim_core::risk::{CellRiskClass, MonitoringCell, Trend};
use glacier_sim_core::{
    patagonian_glacier_sites, ForecastSeries, GlobalRiskLevel, GridRiskEvaluator, Location,
    MonitoringGrid, RiskScoringEngine, WeatherObservation,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(clippy::too_many_arguments)]
fn observation(
    location: Location,
    cell_id: Option<&str>,
    temperature: f64,
    temperature_max: f64,
    wind: f64,
    precipitation: f64,
    humidity: f64,
    radiation: f64,
    snow: f64,
) -> WeatherObservation {
    WeatherObservation {
        location,
        cell_id: cell_id.map(ToString::to_string),
        timestamp: Utc.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap(),
        temperature: Celsius::new(temperature),
        temperature_min: Celsius::new(temperature - 5.0),
        temperature_max: Celsius::new(temperature_max),
        precipitation: Millimeters::new(precipitation),
        humidity: Percent::new(humidity),
        wind_speed: KilometersPerHour::new(wind),
        wind_direction: Degrees::new(250.0),
        solar_radiation: WattsPerSquareMeter::new(radiation),
        snowfall: Centimeters::new(snow),
        uv_index: 6.0,
    }
}

#[test]
fn test_extreme_conditions_score_red() {
    let engine = RiskScoringEngine::default();
    let site = Location::new("Glaciar San Rafael", -46.7, -73.8);
    let obs = observation(site, None, 25.0, 27.0, 120.0, 100.0, 60.0, 900.0, 60.0);
    let now = obs.timestamp;

    let eval = engine.evaluate_observation_at(&obs, now);

    assert_relative_eq!(eval.total_score, 100.0, epsilon = 1e-9);
    assert_eq!(eval.global_level, GlobalRiskLevel::Red);
    assert_eq!(eval.confidence, 85.0, "one-day forecast keeps base confidence");
    assert_eq!(eval.trend, Trend::Stable);
    assert!(eval.variables.iter().all(|v| v.score == 100.0));
    assert_eq!(
        eval.alerts.iter().filter(|a| a.starts_with("CRITICAL ALERT")).count(),
        5
    );
    assert!(eval.alerts.iter().any(|a| a.starts_with("MAXIMUM ALERT")));
    assert_eq!(eval.valid_until, now + Duration::hours(24));
}

#[test]
fn test_calm_conditions_score_green() {
    let engine = RiskScoringEngine::default();
    let site = Location::new("Glaciar Tyndall", -50.9, -73.4);
    let obs = observation(site, None, 2.0, 3.0, 10.0, 0.0, 60.0, 100.0, 0.0);

    let eval = engine.evaluate_observation_at(&obs, obs.timestamp);

    assert_relative_eq!(eval.total_score, 10.0, epsilon = 1e-9);
    assert_eq!(eval.global_level, GlobalRiskLevel::Green);
    assert!(eval.alerts.is_empty());
    assert!(!eval.recommendations.is_empty());
}

#[test]
fn test_missing_forecast_yields_no_data_evaluation() {
    let engine = RiskScoringEngine::default();
    let site = Location::new("Campo de Hielo Sur", -49.3, -73.0);
    let eval = engine.evaluate(&site, None);

    assert_eq!(eval.confidence, 0.0);
    assert!(eval.variables.iter().all(|v| v.score == 0.0));
    assert_eq!(eval.global_level, GlobalRiskLevel::Green);
    assert_eq!(eval.trend, Trend::Stable);
    assert!(eval.alerts.iter().any(|a| a == NO_DATA_ALERT));
    assert!(eval.is_no_data());
}

#[test]
fn test_site_batch_preserves_order() {
    let engine = RiskScoringEngine::default();
    let now = Utc::now();
    let sites: Vec<(Location, Option<ForecastSeries>)> = patagonian_glacier_sites()
        .into_iter()
        .enumerate()
        .map(|(i, site)| {
            let forecast = (i % 2 == 0).then(|| {
                ForecastSeries::from(&observation(
                    site.clone(),
                    None,
                    8.0,
                    11.0,
                    45.0,
                    20.0,
                    85.0,
                    350.0,
                    4.0,
                ))
            });
            (site, forecast)
        })
        .collect();

    let results = engine.evaluate_sites_at(&sites, now);

    assert_eq!(results.len(), sites.len());
    for (i, (result, (site, _))) in results.iter().zip(&sites).enumerate() {
        assert_eq!(result.location.name, site.name);
        assert_eq!(result.is_no_data(), i % 2 == 1, "site {} no-data mismatch", site.name);
        assert!((0.0..=100.0).contains(&result.total_score));
    }
}

#[test]
fn test_cochrane_cell_is_critical() {
    let evaluator = GridRiskEvaluator::default();
    let cell = MonitoringCell::new("cell_42", "Cochrane_3", "Cochrane", "Aysén", -47.26, -72.57);
    let obs = observation(
        cell.location(),
        Some("cell_42"),
        25.0,
        26.0,
        20.0,
        60.0,
        70.0,
        500.0,
        0.0,
    );
    let now = obs.timestamp;

    let eval = evaluator.evaluate_cell_at(&cell, Some(&obs), now);
    let context = eval.cell.as_ref().expect("grid evaluation carries cell context");

    assert_eq!(context.risk_class, CellRiskClass::Critical);
    assert_eq!(eval.variables.len(), 6);
    let weight_sum: f64 = eval.variables.iter().map(|v| v.weight).sum();
    assert_relative_eq!(weight_sum, 1.1, epsilon = 1e-9);
    assert_eq!(eval.valid_until, now + Duration::hours(6));
    assert!(eval.is_valid_at(now + Duration::hours(5)));
    assert!(!eval.is_valid_at(now + Duration::hours(7)));
}

#[test]
fn test_grid_evaluation_summary_and_merge() {
    let evaluator = GridRiskEvaluator::default();
    let engine = RiskScoringEngine::default();
    let grid = MonitoringGrid::fallback();
    let now = Utc::now();

    // Only the first cell reports
    let first = &grid.cells()[0];
    let observations = vec![observation(
        first.location(),
        Some(first.id.as_str()),
        22.0,
        24.0,
        30.0,
        35.0,
        92.0,
        400.0,
        0.0,
    )];
    let cells = evaluator.evaluate_grid_at(&grid, &observations, now);

    assert_eq!(cells.len(), grid.len());
    assert!(!cells[0].is_no_data());
    assert!(cells[1..].iter().all(|c| c.is_no_data()));

    let summary = GridRiskEvaluator::summarize(&cells);
    assert_eq!(summary.total_cells, 3);
    assert_eq!(summary.distribution.values().sum::<usize>(), 3);
    assert!(summary.cells_with_alerts >= 1);

    // A site next to Coyhaique is covered by the first cell, a far one is not
    let near = engine.evaluate(&Location::new("Near Coyhaique", -45.6, -72.0), None);
    let far = engine.evaluate(&Location::new("Glaciar Grey", -51.0, -73.2), None);
    let merged = evaluator.merge_with_global(cells, vec![near, far]);

    assert_eq!(merged.len(), 4);
    assert_eq!(merged[3].location.name, "Glaciar Grey");
}

#[test]
fn test_evaluation_serializes() {
    let engine = RiskScoringEngine::default();
    let eval = engine.evaluate(&Location::at(-46.8, -73.5), None);
    let json = serde_json::to_string(&eval).unwrap();
    assert!(json.contains("\"global_level\""));
    assert!(json.contains(NO_DATA_ALERT));
}
