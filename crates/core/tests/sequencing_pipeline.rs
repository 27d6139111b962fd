//! Out-of-order completion of concurrent requests
use glacier_sim_core::core_types::units::CubicKilometers;
use glacier_sim_core::melt::projector::AVAILABLE_YEARS;
use glacier_sim_core::{
    ClimateProjector, LatestResult, Location, MeltSimulationEngine, MeltSimulationResult,
    ProjectionConfig, ResultRepository, RiskEvaluation, RiskScoringEngine, SequenceCounter,
    Sequenced,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_latest_simulation_wins_regardless_of_completion_order() {
    let counter = SequenceCounter::new();
    let repo: LatestResult<MeltSimulationResult> = LatestResult::new();
    let projector = ClimateProjector::new(ProjectionConfig::default(), None, None, 4.5);
    let engine = MeltSimulationEngine::default();

    // Requests are numbered when issued, then finish in any order
    let requests: Vec<(u64, i32)> = AVAILABLE_YEARS
        .iter()
        .map(|&year| (counter.next_sequence(), year))
        .collect();

    thread::scope(|s| {
        for &(sequence, year) in requests.iter().rev() {
            let (repo, projector, engine) = (&repo, &projector, &engine);
            s.spawn(move || {
                let value = engine
                    .simulate(CubicKilometers::new(10.0), &projector.input_for(year))
                    .unwrap();
                repo.offer(Sequenced { sequence, value });
            });
        }
    });

    let latest = repo.latest().unwrap();
    let (last_sequence, last_year) = requests[requests.len() - 1];
    assert_eq!(latest.sequence, last_sequence);
    let expected = engine
        .simulate(CubicKilometers::new(10.0), &projector.input_for(last_year))
        .unwrap();
    assert_eq!(latest.value, expected);
}

#[test]
fn test_stale_evaluation_does_not_reach_observers() {
    let counter = SequenceCounter::new();
    let repo: LatestResult<RiskEvaluation> = LatestResult::new();
    let engine = RiskScoringEngine::default();
    let notified = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&notified);
    repo.subscribe(Arc::new(move |result: &Sequenced<RiskEvaluation>| {
        assert!(result.value.is_no_data());
        seen.fetch_add(1, Ordering::SeqCst);
    }));

    let site = Location::new("Glaciar Grey", -51.0, -73.2);
    let slow = counter.tag(engine.evaluate(&site, None));
    let fast = counter.tag(engine.evaluate(&site, None));

    assert!(repo.offer(fast.clone()));
    assert!(!repo.offer(slow));
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert_eq!(repo.latest(), Some(fast));
}
