//! Melt pipeline: climate projection, simulation and impact analysis
use approx::assert_relative_eq;
use glacier_sim_core::core_types::glacier::Elevation;
use glacier_sim_core::core_types::units::{Celsius, CelsiusDelta, CubicKilometers, Percent};
use glacier_sim_core::melt::projector::AVAILABLE_YEARS;
use glacier_sim_core::melt::{MeltBranch, ParameterField};
use glacier_sim_core::{
    simulate_and_analyze, ClimateBaseline, ClimateProjector, ClimateStation, GlacierClassification,
    GlacierProfile, GlacierSimError, ImpactAnalyzer, ImpactSeverity, Location,
    MeltSimulationEngine, MeltSimulationInput, ProjectionConfig, SimulationParameters, TargetYear,
    TemperatureBaseline,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn san_rafael() -> GlacierProfile {
    GlacierProfile {
        id: "CL104003".to_string(),
        location: Location::new("Glaciar San Rafael", -46.7, -73.8),
        volume: CubicKilometers::new(25.0),
        area: 760.0,
        elevation: Elevation {
            mean: Some(1200.0),
            min: Some(0.0),
            max: Some(3900.0),
        },
        classification: GlacierClassification::Outlet,
        orientation: Some("W".to_string()),
        region: Some("Aysén".to_string()),
        comuna: Some("Aysén".to_string()),
    }
}

fn stations() -> Vec<ClimateStation> {
    vec![
        ClimateStation {
            location: Location::new("Puerto Aysén", -45.40, -72.69),
            temperature: Some(TemperatureBaseline {
                current: Celsius::new(9.4),
                baseline_year: Celsius::new(8.9),
                reference_year: Celsius::new(11.3),
                delta: CelsiusDelta::new(2.4),
            }),
            climate: Some(ClimateBaseline {
                precipitation: 2300.0,
                humidity: Percent::new(84.0),
                solar_radiation: Percent::new(62.0),
                ..ClimateBaseline::default()
            }),
        },
        ClimateStation {
            location: Location::new("Punta Arenas", -53.16, -70.92),
            temperature: None,
            climate: None,
        },
    ]
}

#[test]
fn test_projected_pipeline_for_every_year() {
    let glacier = san_rafael();
    let projector = ClimateProjector::for_glacier(&glacier, &stations(), ProjectionConfig::default());
    assert_eq!(projector.base_temperature(), Celsius::new(1.4));

    let engine = MeltSimulationEngine::default();
    let analyzer = ImpactAnalyzer::default();

    let mut previous_loss = 0.0;
    for year in AVAILABLE_YEARS {
        let input = projector.input_for(year);
        let (result, analysis) = simulate_and_analyze(&engine, &analyzer, &glacier, &input)
            .unwrap_or_else(|e| panic!("{year}: {e}"));

        assert_eq!(result.initial_volume, glacier.volume);
        assert_relative_eq!(
            *result.new_volume,
            *glacier.volume - *result.volume_lost,
            epsilon = 1e-12
        );
        assert!(*result.volume_lost <= *glacier.volume * 0.9 + 1e-12);
        assert!(
            *result.volume_lost > previous_loss,
            "{year}: loss should grow with the projection horizon"
        );
        previous_loss = *result.volume_lost;

        assert!(analysis.overall >= analysis.cultural.severity);
        assert!(analysis.overall >= analysis.environmental.severity);
        assert!(analysis.overall >= analysis.urban.severity);
        assert!(!analysis.recommendations.is_empty());
        assert!(!analysis.urban.nearby_settlements.is_empty());
    }
}

#[test]
fn test_override_then_year_change_keeps_manual_value() {
    let glacier = san_rafael();
    let projector = ClimateProjector::for_glacier(&glacier, &stations(), ProjectionConfig::default());
    let mut params = SimulationParameters::new(projector);
    let engine = MeltSimulationEngine::default();

    params.override_field(ParameterField::ClimateMultiplier, 1.0);
    assert_eq!(params.input().target_year, TargetYear::Unspecified);
    let unspecified = engine.simulate(glacier.volume, params.input()).unwrap();

    params.select_year(2070);
    assert_eq!(params.input().target_year, TargetYear::Year(2070));
    assert_eq!(params.input().climate_multiplier, 1.0);
    let projected = engine.simulate(glacier.volume, params.input()).unwrap();

    assert!(projected.volume_lost > unspecified.volume_lost);

    params.reset();
    assert!(!params.is_overridden(ParameterField::ClimateMultiplier));
    assert!(params.input().climate_multiplier > 1.0);
}

#[test]
fn test_invalid_input_surfaces_as_crate_error() {
    let glacier = san_rafael();
    let input = MeltSimulationInput {
        ddf: 20.0,
        ..MeltSimulationInput::default()
    };

    let err = simulate_and_analyze(
        &MeltSimulationEngine::default(),
        &ImpactAnalyzer::default(),
        &glacier,
        &input,
    )
    .unwrap_err();

    let GlacierSimError::InvalidInput(validation) = &err;
    assert_eq!(validation.fields(), vec!["ddf"]);
    assert!(err.to_string().contains("ddf = 20 outside [1, 15]"));
}

#[test]
fn test_zero_volume_rejected() {
    let mut glacier = san_rafael();
    glacier.volume = CubicKilometers::new(0.0);

    let result = simulate_and_analyze(
        &MeltSimulationEngine::default(),
        &ImpactAnalyzer::default(),
        &glacier,
        &MeltSimulationInput::default(),
    );

    match result {
        Err(GlacierSimError::InvalidInput(e)) => assert_eq!(e.fields(), vec!["volume"]),
        Ok(_) => panic!("zero volume must not simulate"),
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let glacier = san_rafael();
    let config = ProjectionConfig {
        humidity_shift: glacier_sim_core::melt::HumidityShift::Seeded(7),
        ..ProjectionConfig::default()
    };
    let run = || {
        let projector = ClimateProjector::for_glacier(&glacier, &stations(), config);
        simulate_and_analyze(
            &MeltSimulationEngine::default(),
            &ImpactAnalyzer::default(),
            &glacier,
            &projector.input_for(2080),
        )
        .unwrap()
    };

    let (a, impact_a) = run();
    let (b, impact_b) = run();
    assert_eq!(a, b);
    assert_eq!(impact_a, impact_b);
}

#[test]
fn test_cold_small_glacier_keeps_floor() {
    let mut glacier = san_rafael();
    glacier.volume = CubicKilometers::new(0.1);
    let input = MeltSimulationInput {
        target_year: TargetYear::Unspecified,
        base_temperature: Celsius::new(-8.0),
        ..MeltSimulationInput::default()
    };

    let (result, analysis) = simulate_and_analyze(
        &MeltSimulationEngine::default(),
        &ImpactAnalyzer::default(),
        &glacier,
        &input,
    )
    .unwrap();

    assert_eq!(result.branch, MeltBranch::DetectableFloor);
    assert_eq!(*result.volume_lost, 0.002);
    assert_eq!(analysis.overall, ImpactSeverity::Low);
}
