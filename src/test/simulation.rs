use crate::city::{
    ActionKind, ActionOutcome, BuildPayload, City, CityAction, ClearPayload, ParkPayload, Point,
    RoadPayload,
};
use crate::generator::{CityGenerator, GeneratorOverrides};
use crate::rng::Seed;
use crate::sim::{CitySimulation, SimEvent, SimulationOptions, Stage};
use crate::spatial::Bounds;

pub(super) fn harbor_city() -> City {
    CityGenerator::default().generate(
        Some(Seed::from("harbor")),
        &GeneratorOverrides {
            width: Some(640.0),
            height: Some(640.0),
            ..Default::default()
        },
    )
}

pub(super) fn harbor_sim() -> CitySimulation {
    CitySimulation::new(harbor_city(), SimulationOptions::default())
}

#[test]
fn new_simulation_starts_from_city_capacity() {
    let city = harbor_city();
    let capacity = city.metadata.population_capacity;
    let sim = CitySimulation::new(city, SimulationOptions::default());

    assert_eq!(sim.population().capacity, capacity);
    assert_eq!(sim.population().total, (capacity as f64 * 0.4).round());
    assert_eq!(sim.time().day, 0);
    assert_eq!(sim.time().hour, 8.0);
    assert_eq!(sim.stage(), Stage::Village);
    assert_eq!(sim.citizens().len(), 150);
    assert!(sim.vehicles().is_empty());
}

#[test]
fn same_seed_runs_identically() {
    let mut a = harbor_sim();
    let mut b = harbor_sim();
    for _ in 0..50 {
        a.update(60.0);
        b.update(60.0);
    }
    let (sa, sb) = (a.snapshot(), b.snapshot());
    assert_eq!(sa, sb);
}

#[test]
fn update_advances_time_by_scaled_delta() {
    let mut sim = harbor_sim();
    sim.update(120.0);
    assert!((sim.time().elapsed_hours - 1.0).abs() < 1e-12);
    assert!((sim.time().hour - 9.0).abs() < 1e-12);

    sim.update(-30.0);
    sim.update(f64::NAN);
    assert!((sim.time().elapsed_hours - 1.0).abs() < 1e-12);
}

#[test]
fn day_rollover_recounts_homeless() {
    let mut sim = harbor_sim();
    sim.population.total = sim.population.capacity as f64 + 500.0;
    // 16 小时后跨过午夜
    sim.update(16.0 * 120.0 + 1.0);
    assert_eq!(sim.time().day, 1);
    assert_eq!(sim.population().homeless, 500.0);
    assert!((10.0..=120.0).contains(&sim.time().speed));
}

#[test]
fn stage_events_emitted_for_each_threshold_crossed() {
    let mut sim = harbor_sim();
    sim.population.capacity = 1_000_000;
    sim.population.total = 30_000.0;
    sim.update(1.0);

    assert_eq!(sim.stage(), Stage::City);
    let stages: Vec<Stage> = sim
        .snapshot()
        .events
        .into_iter()
        .filter_map(|e| match e {
            SimEvent::CityStage { stage, .. } => Some(stage),
            _ => None,
        })
        .collect();
    assert_eq!(stages, vec![Stage::Town, Stage::City]);
}

#[test]
fn snapshot_drains_events() {
    let mut sim = harbor_sim();
    let action = CityAction::new(
        "p1",
        ActionKind::Park(ParkPayload {
            position: Some(Point::ORIGIN),
            ..Default::default()
        }),
        "tester",
    );
    sim.apply_action(&action);
    assert_eq!(sim.pending_events(), 1);

    let first = sim.snapshot();
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].type_name(), "user-action");
    assert_eq!(sim.pending_events(), 0);

    let second = sim.snapshot();
    assert!(second.events.is_empty());
}

#[test]
fn snapshot_drains_events_pushed_by_update() {
    let mut sim = harbor_sim();
    sim.population.capacity = 1_000_000;
    sim.population.total = 30_000.0;
    sim.update(1.0);
    assert_eq!(sim.pending_events(), 2);

    let first = sim.snapshot();
    let kinds: Vec<&str> = first.events.iter().map(SimEvent::type_name).collect();
    assert_eq!(kinds, vec!["city-stage", "city-stage"]);
    assert_eq!(sim.pending_events(), 0);
    assert!(sim.snapshot().events.is_empty());
}

#[test]
fn huge_tick_runs_daily_maintenance_once() {
    let mut sim = CitySimulation::new(
        City::new(0.0, 0.0, 40.0, Seed::from("empty")),
        SimulationOptions {
            initial_citizens: 0,
            ..Default::default()
        },
    );
    sim.update(1e11);

    // 1e11 s × 30 / 3600 ≈ 8.33e8 小时
    assert_eq!(sim.time().day, 34_722_222);
    let speed = sim.time().speed;
    assert!((30.0 * 0.99..=30.0 * 1.01).contains(&speed), "speed {speed}");

    sim.update(1e300);
    assert_eq!(sim.time().day, u32::MAX);
}

#[test]
fn ignored_action_is_still_reported() {
    let mut sim = harbor_sim();
    let roads = sim.city().roads.len();
    let satisfaction = sim.population().satisfaction;
    let action = CityAction::new("b0", ActionKind::Build(BuildPayload::default()), "tester");

    assert_eq!(sim.apply_action(&action), ActionOutcome::Ignored);
    assert_eq!(sim.city().roads.len(), roads);
    assert_eq!(sim.population().satisfaction, satisfaction);
    let events = sim.snapshot().events;
    assert!(matches!(&events[..], [SimEvent::UserAction { action }] if action.id == "b0"));
}

#[test]
fn build_and_clear_keep_capacity_in_sync() {
    let mut sim = harbor_sim();
    let before = sim.population().capacity;
    let build = CityAction::new(
        "b1",
        ActionKind::Build(BuildPayload {
            position: Some(Point::new(5_000.0, 5_000.0)),
            population_capacity: Some(250),
            ..Default::default()
        }),
        "tester",
    );
    sim.apply_action(&build);
    assert_eq!(sim.population().capacity, before + 250);
    assert_eq!(sim.city().metadata.population_capacity, before + 250);

    let clear = CityAction::new(
        "c1",
        ActionKind::Clear(ClearPayload {
            position: Some(Point::new(5_000.0, 5_000.0)),
            radius: Some(1.0),
        }),
        "tester",
    );
    let ActionOutcome::Cleared(removed) = sim.apply_action(&clear) else {
        panic!("expected clear outcome");
    };
    assert_eq!(removed.population, 250);
    assert_eq!(sim.population().capacity, before);
}

#[test]
fn road_and_park_raise_satisfaction_and_totals_once() {
    let mut sim = harbor_sim();
    sim.population.satisfaction = 0.5;
    let road_length = sim.city().metadata.road_length;
    let green = sim.city().metadata.green_space;

    sim.apply_action(&CityAction::new(
        "r1",
        ActionKind::Road(RoadPayload {
            from: Some(Point::new(0.0, 0.0)),
            to: Some(Point::new(0.0, 80.0)),
            ..Default::default()
        }),
        "tester",
    ));
    sim.apply_action(&CityAction::new(
        "p1",
        ActionKind::Park(ParkPayload {
            position: Some(Point::ORIGIN),
            radius: Some(10.0),
            ..Default::default()
        }),
        "tester",
    ));

    assert!((sim.city().metadata.road_length - road_length - 80.0).abs() < 1e-9);
    assert!((sim.city().metadata.green_space - green - std::f64::consts::PI * 100.0).abs() < 1e-6);
    assert!((sim.population().satisfaction - 0.54).abs() < 1e-12);
}

#[test]
fn snapshot_truncates_agent_lists() {
    let mut sim = CitySimulation::new(
        harbor_city(),
        SimulationOptions {
            initial_citizens: 260,
            ..Default::default()
        },
    );
    sim.population.capacity = 1_000_000;
    sim.population.total = 60_000.0;
    sim.update(1.0);

    assert_eq!(sim.citizens().len(), 260);
    assert_eq!(sim.vehicles().len(), 500);
    let snap = sim.snapshot();
    assert_eq!(snap.citizens.len(), 200);
    assert_eq!(snap.vehicles.len(), 300);
    assert_eq!(snap.citizens[0].id, "citizen-0");

    let value = serde_json::to_value(&snap).expect("serialize snapshot");
    assert!(value["time"]["day"].is_number());
    assert!(value["vehicles"][0]["kind"].is_string());
}

#[test]
fn citizens_within_covers_whole_city() {
    let sim = harbor_sim();
    let everything = Bounds::new(-400.0, 400.0, -400.0, 400.0);
    assert_eq!(sim.citizens_within(&everything).len(), 150);
    assert!(sim
        .citizens_within(&Bounds::around(Point::new(10_000.0, 10_000.0), 5.0))
        .is_empty());

    let first = &sim.citizens()[0];
    let near = sim.citizens_within(&Bounds::around(first.position, 1.0));
    assert!(near.iter().any(|c| c.id == first.id));
}

#[test]
fn time_scale_control_clamps_to_zero() {
    let mut sim = harbor_sim();
    sim.set_time_scale(-5.0);
    assert_eq!(sim.time().speed, 0.0);
    sim.update(1_000.0);
    assert_eq!(sim.time().elapsed_hours, 0.0);
    sim.set_time_scale(60.0);
    assert_eq!(sim.time().speed, 60.0);
}

#[test]
fn forecast_request_mirrors_state() {
    let sim = harbor_sim();
    let request = sim.forecast_request();
    assert_eq!(request.population, sim.population().total);
    assert_eq!(request.capacity, sim.population().capacity);
    assert_eq!(request.gdp, 1200.0);
    assert_eq!(request.growth_rate, 0.015);
}

#[test]
fn history_records_first_snapshot_on_day_zero() {
    let mut sim = harbor_sim();
    sim.update(1.0);
    assert_eq!(sim.history().len(), 1);
    sim.update(1.0);
    assert_eq!(sim.history().len(), 1);
}

#[test]
fn city_without_buildings_still_simulates() {
    let city = City::new(200.0, 200.0, 40.0, Seed::from("empty"));
    let mut sim = CitySimulation::new(city, SimulationOptions::default());
    for c in sim.citizens() {
        assert_eq!(c.home, Point::ORIGIN);
    }
    for _ in 0..20 {
        sim.update(600.0);
    }
    assert!(sim.vehicles().is_empty());
    assert!(sim.population().total >= 200.0);
}

#[test]
fn citizens_within_whole_plane_returns_everyone() {
    let sim = harbor_sim();
    let everywhere = Bounds::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY);
    assert_eq!(sim.citizens_within(&everywhere).len(), sim.citizens().len());
}
