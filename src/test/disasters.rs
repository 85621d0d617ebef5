use crate::sim::{ActiveDisaster, CitizenState, DisasterKind, SimEvent, WeatherKind, tick_disasters};

use super::simulation::harbor_sim;

#[test]
fn templates_match_response_times() {
    assert_eq!(DisasterKind::Fire.response_time(), 3.0);
    assert_eq!(DisasterKind::Flood.response_time(), 6.0);
    assert_eq!(DisasterKind::TrafficJam.response_time(), 1.5);
    assert_eq!(DisasterKind::EconomicRecession.response_time(), 12.0);
    for kind in DisasterKind::ALL {
        assert!(kind.probability() > 0.0 && kind.probability() < 0.001);
    }
}

#[test]
fn countdown_resolves_exactly_once() {
    let mut active = vec![ActiveDisaster::new(0, DisasterKind::TrafficJam, 0)];
    let mut last = active[0].remaining;
    let mut resolved = 0;
    for _ in 0..10 {
        if let Some(d) = active.first() {
            assert!(d.remaining <= last);
            last = d.remaining;
        }
        resolved += tick_disasters(&mut active, 0.5).len();
    }
    assert_eq!(resolved, 1);
    assert!(active.is_empty());
}

#[test]
fn lifecycle_through_simulation() {
    let mut sim = harbor_sim();
    let disaster = sim.trigger_disaster(DisasterKind::TrafficJam);
    assert_eq!(disaster.remaining, 1.5);

    let mut previous = disaster.remaining;
    let mut resolved = 0;
    let mut started = 0;
    for _ in 0..10 {
        // 每 tick 0.5 小时
        sim.update(60.0);
        if let Some(d) = sim.disasters().iter().find(|d| d.id == disaster.id) {
            assert!(d.remaining < previous);
            previous = d.remaining;
        }
        for event in sim.snapshot().events {
            match event {
                SimEvent::Disaster { disaster: d } if d.id == disaster.id => started += 1,
                SimEvent::DisasterResolved { disaster: d } if d.id == disaster.id => resolved += 1,
                _ => {}
            }
        }
    }
    assert_eq!(started, 1);
    assert_eq!(resolved, 1);
    assert!(sim.disasters().iter().all(|d| d.id != disaster.id));
}

#[test]
fn flood_forces_heavy_rain() {
    let mut sim = harbor_sim();
    sim.trigger_disaster(DisasterKind::Flood);
    assert_eq!(sim.weather().current, WeatherKind::Rain);
    assert_eq!(sim.weather().intensity, 1.0);
}

#[test]
fn traffic_jam_adds_congestion() {
    let mut sim = harbor_sim();
    sim.traffic.congestion = 0.8;
    sim.trigger_disaster(DisasterKind::TrafficJam);
    assert_eq!(sim.traffic().congestion, 1.0);
}

#[test]
fn recession_hits_gdp_and_trend() {
    let mut sim = harbor_sim();
    sim.trigger_disaster(DisasterKind::EconomicRecession);
    assert!((sim.economy().gdp - 1200.0 * 0.97).abs() < 1e-9);
    assert_eq!(sim.economy().trend, -0.05);
}

#[test]
fn fire_lowers_satisfaction_when_city_has_buildings() {
    let mut sim = harbor_sim();
    assert!(!sim.city().buildings.is_empty());
    sim.population.satisfaction = 0.6;
    sim.trigger_disaster(DisasterKind::Fire);
    assert!((sim.population().satisfaction - 0.55).abs() < 1e-12);
    assert!((sim.economy().property_value_index - 0.98).abs() < 1e-12);
}

#[test]
fn every_fifth_citizen_evacuates() {
    let mut sim = harbor_sim();
    sim.trigger_disaster(DisasterKind::Fire);
    let safe_zone = sim
        .city()
        .parks
        .first()
        .map(|p| p.position)
        .unwrap_or(crate::city::Point::ORIGIN);
    for (i, citizen) in sim.citizens().iter().enumerate() {
        if i % 5 == 0 {
            assert_eq!(citizen.state, CitizenState::Evacuating);
            assert_eq!(citizen.destination, safe_zone);
        } else {
            assert_ne!(citizen.state, CitizenState::Evacuating);
        }
    }
}
