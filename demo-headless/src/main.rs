use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use glacier_sim_core::core_types::units::{
    Celsius, CelsiusDelta, Centimeters, CubicKilometers, Degrees, KilometersPerHour, Millimeters,
    Percent, WattsPerSquareMeter,
};
use glacier_sim_core::core_types::Elevation;
use glacier_sim_core::melt::projector::AVAILABLE_YEARS;
use glacier_sim_core::melt::{HumidityShift, ParameterField};
use glacier_sim_core::risk::GridSummary;
use glacier_sim_core::{
    patagonian_glacier_sites, simulate_and_analyze, ClimateBaseline, ClimateProjector,
    ClimateStation, ForecastSeries, GlacierClassification, GlacierProfile, GridRiskEvaluator,
    ImpactAnalysis, ImpactAnalyzer, Location, MeltSimulationEngine, MeltSimulationResult,
    MonitoringGrid, ProjectionConfig, RiskEvaluation, RiskScoringEngine, SimulationParameters,
    TemperatureBaseline, WeatherObservation,
};
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Glacier risk and melt simulation demo
#[derive(Parser, Debug)]
#[command(name = "glacier-sim-demo")]
#[command(about = "Patagonian glacier risk evaluation and melt simulation demo", long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the reference glacier sites from one weather snapshot
    Risk {
        #[command(flatten)]
        weather: WeatherArgs,

        /// Simulate a weather feed outage
        #[arg(long)]
        no_data: bool,
    },

    /// Evaluate the fallback monitoring grid and merge with site results
    Grid {
        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Simulate one year of melt for a preset glacier
    Melt(MeltArgs),
}

/// Melt simulation options
#[derive(clap::Args, Debug)]
struct MeltArgs {
    /// Preset glacier
    #[arg(short, long, value_enum, default_value_t = GlacierPreset::SanRafael)]
    glacier: GlacierPreset,

    /// Projection year
    #[arg(short, long, default_value_t = 2050)]
    year: i32,

    /// Override the glacier volume in km³
    #[arg(long)]
    volume: Option<f64>,

    /// Override the degree-day factor
    #[arg(long)]
    ddf: Option<f64>,

    /// Override the climate multiplier
    #[arg(long)]
    climate_multiplier: Option<f64>,

    /// Humidity shift direction (increase, decrease or a numeric seed)
    #[arg(long, default_value = "increase")]
    humidity_shift: String,

    /// Run every available projection year
    #[arg(long)]
    all_years: bool,
}

/// Weather snapshot applied to every site or cell
#[derive(clap::Args, Debug)]
struct WeatherArgs {
    /// Temperature in °C
    #[arg(short, long, default_value_t = 12.0)]
    temperature: f64,

    /// Precipitation in mm
    #[arg(short, long, default_value_t = 15.0)]
    precipitation: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 80.0)]
    humidity: f64,

    /// Wind speed in km/h
    #[arg(short, long, default_value_t = 35.0)]
    wind_speed: f64,

    /// Solar radiation in W/m²
    #[arg(short, long, default_value_t = 450.0)]
    radiation: f64,

    /// Snowfall in cm
    #[arg(short, long, default_value_t = 0.0)]
    snow: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GlacierPreset {
    SanRafael,
    OHiggins,
    Exploradores,
    Grey,
}

impl GlacierPreset {
    fn profile(self) -> GlacierProfile {
        let (id, name, lat, lon, volume, area, class, region, comuna) = match self {
            GlacierPreset::SanRafael => (
                "CL104100",
                "Glaciar San Rafael",
                -46.68,
                -73.85,
                180.0,
                722.0,
                "Glaciar efluente",
                "Aysén del General Carlos Ibáñez del Campo",
                "Aysén",
            ),
            GlacierPreset::OHiggins => (
                "CL104200",
                "Glaciar O'Higgins",
                -48.90,
                -73.15,
                160.0,
                820.0,
                "Glaciar efluente",
                "Aysén del General Carlos Ibáñez del Campo",
                "O'Higgins",
            ),
            GlacierPreset::Exploradores => (
                "CL104300",
                "Glaciar Exploradores",
                -46.50,
                -73.18,
                12.0,
                86.0,
                "Glaciar de valle",
                "Aysén del General Carlos Ibáñez del Campo",
                "Río Ibáñez",
            ),
            GlacierPreset::Grey => (
                "CL112100",
                "Glaciar Grey",
                -50.98,
                -73.23,
                45.0,
                270.0,
                "Glaciar de valle",
                "Magallanes y de la Antártica Chilena",
                "Torres del Paine",
            ),
        };

        GlacierProfile {
            id: id.to_string(),
            location: Location::new(name, lat, lon),
            volume: CubicKilometers::new(volume),
            area,
            elevation: Elevation::default(),
            classification: GlacierClassification::from_label(class),
            orientation: None,
            region: Some(region.to_string()),
            comuna: Some(comuna.to_string()),
        }
    }
}

fn climate_stations() -> Vec<ClimateStation> {
    let station = |name: &str, lat: f64, lon: f64, current: f64, delta: f64| ClimateStation {
        location: Location::new(name, lat, lon),
        temperature: Some(TemperatureBaseline {
            current: Celsius::new(current),
            baseline_year: Celsius::new(current),
            reference_year: Celsius::new(current + delta),
            delta: CelsiusDelta::new(delta),
        }),
        climate: Some(ClimateBaseline::default()),
    };
    vec![
        station("Coyhaique", -45.5752, -72.0662, 9.1, 2.4),
        station("Puerto Aysén", -45.4014, -72.6925, 9.6, 2.2),
        station("Cochrane", -47.2644, -72.5733, 8.2, 2.6),
        station("Villa O'Higgins", -48.4651, -72.5733, 7.0, 2.7),
        station("Puerto Natales", -51.7236, -72.5084, 6.9, 2.3),
    ]
}

fn observation(location: Location, cell_id: Option<String>, w: &WeatherArgs) -> WeatherObservation {
    WeatherObservation {
        location,
        cell_id,
        timestamp: Utc::now(),
        temperature: Celsius::new(w.temperature),
        temperature_min: Celsius::new(w.temperature - 4.0),
        temperature_max: Celsius::new(w.temperature + 3.0),
        precipitation: Millimeters::new(w.precipitation),
        humidity: Percent::new(w.humidity),
        wind_speed: KilometersPerHour::new(w.wind_speed),
        wind_direction: Degrees::new(270.0),
        solar_radiation: WattsPerSquareMeter::new(w.radiation),
        snowfall: Centimeters::new(w.snow),
        uv_index: 4.0,
    }
}

fn parse_humidity_shift(value: &str) -> Result<HumidityShift, Box<dyn Error>> {
    match value.to_lowercase().as_str() {
        "increase" => Ok(HumidityShift::Increase),
        "decrease" => Ok(HumidityShift::Decrease),
        other => Ok(HumidityShift::Seeded(other.parse()?)),
    }
}

fn print_evaluation(e: &RiskEvaluation) {
    println!(
        "{:<28} {:>5.1}  {:<7} conf {:>3.0}%  {:?}",
        e.location.name,
        e.total_score,
        e.global_level.to_string(),
        e.confidence,
        e.trend
    );
    for alert in &e.alerts {
        println!("    ! {}", alert);
    }
}

fn print_summary(summary: &GridSummary) {
    println!(
        "\nGrid: {} cells, {} with alerts ({}%)",
        summary.total_cells, summary.cells_with_alerts, summary.percent_with_alerts
    );
    for (class, count) in &summary.distribution {
        println!("  {:<10} {}", class.to_string(), count);
    }
}

fn print_melt(glacier: &GlacierProfile, result: &MeltSimulationResult, impact: &ImpactAnalysis) {
    println!("=== {} ({}) ===", glacier.name(), glacier.classification);
    println!(
        "Volume: {:.3} → {:.3} km³ (lost {:.4} km³, {:.2}%)",
        *result.initial_volume,
        *result.new_volume,
        *result.volume_lost,
        result.percent_lost()
    );
    println!(
        "Final temperature: {:.1}°C, melt season {} days, climate factor {:.2}, branch {:?}",
        *result.final_temperature,
        result.factors.melt_season_days,
        result.factors.climate_factor,
        result.branch
    );
    println!(
        "Impact: cultural {}, environmental {}, urban {} → overall {}",
        impact.cultural.severity,
        impact.environmental.severity,
        impact.urban.severity,
        impact.overall
    );
    for s in &impact.urban.nearby_settlements {
        println!(
            "  {:<20} {:>6.1} km  pop {:>6}  {}",
            s.name, *s.distance, s.population, s.risk
        );
    }
    println!("Recommendations:");
    for r in &impact.recommendations {
        println!("  - {}", r);
    }
}

fn run_risk(weather: &WeatherArgs, no_data: bool, json: bool) -> Result<(), Box<dyn Error>> {
    let engine = RiskScoringEngine::default();
    let now = Utc::now();
    let sites: Vec<_> = patagonian_glacier_sites()
        .into_iter()
        .map(|site| {
            let forecast =
                (!no_data).then(|| ForecastSeries::from(&observation(site.clone(), None, weather)));
            (site, forecast)
        })
        .collect();

    let evaluations = engine.evaluate_sites_at(&sites, now);
    if json {
        println!("{}", serde_json::to_string_pretty(&evaluations)?);
    } else {
        println!("=== Glacier site risk ===\n");
        evaluations.iter().for_each(print_evaluation);
        if let Some(first) = evaluations.first() {
            println!("\nValid until {}", first.valid_until.format("%Y-%m-%d %H:%M UTC"));
        }
    }
    Ok(())
}

fn run_grid(weather: &WeatherArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let evaluator = GridRiskEvaluator::default();
    let engine = RiskScoringEngine::default();
    let now = Utc::now();
    let grid = MonitoringGrid::fallback();

    let observations: Vec<_> = grid
        .cells()
        .iter()
        .map(|cell| observation(cell.location(), Some(cell.id.clone()), weather))
        .collect();
    let cell_results = evaluator.evaluate_grid_at(&grid, &observations, now);
    let summary = GridRiskEvaluator::summarize(&cell_results);

    let site_results: Vec<_> = patagonian_glacier_sites()
        .iter()
        .map(|site| engine.evaluate_observation_at(&observation(site.clone(), None, weather), now))
        .collect();
    let merged = evaluator.merge_with_global(cell_results, site_results);

    if json {
        println!("{}", serde_json::to_string_pretty(&merged)?);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== Monitoring grid + glacier sites ===\n");
        merged.iter().for_each(print_evaluation);
        print_summary(&summary);
        let stale = merged.iter().filter(|e| !e.is_valid_at(now + Duration::hours(12))).count();
        println!("{} evaluations expire within 12 hours", stale);
    }
    Ok(())
}

fn run_melt(args: &MeltArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut glacier = args.glacier.profile();
    if let Some(v) = args.volume {
        glacier.volume = CubicKilometers::new(v);
    }

    let config = ProjectionConfig {
        humidity_shift: parse_humidity_shift(&args.humidity_shift)?,
        ..ProjectionConfig::default()
    };
    let projector = ClimateProjector::for_glacier(&glacier, &climate_stations(), config);
    let mut params = SimulationParameters::new(projector);
    let engine = MeltSimulationEngine::default();
    let analyzer = ImpactAnalyzer::default();

    let years: Vec<i32> = if args.all_years {
        AVAILABLE_YEARS.to_vec()
    } else {
        vec![args.year]
    };

    tracing::info!("Simulating {} over {} year(s)", glacier.name(), years.len());

    // Overrides survive year selection
    if let Some(v) = args.ddf {
        params.override_field(ParameterField::Ddf, v);
    }
    if let Some(v) = args.climate_multiplier {
        params.override_field(ParameterField::ClimateMultiplier, v);
    }

    for year in years {
        params.select_year(year);

        let (result, impact) = simulate_and_analyze(&engine, &analyzer, &glacier, params.input())?;
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "input": params.input(),
                    "result": result,
                    "impact": impact,
                })
            );
        } else {
            println!("\n--- Year {} ---", params.input().target_year);
            print_melt(&glacier, &result, &impact);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    match &args.command {
        Command::Risk { weather, no_data } => run_risk(weather, *no_data, args.json),
        Command::Grid { weather } => run_grid(weather, args.json),
        Command::Melt(melt) => run_melt(melt, args.json),
    }
}
