use crate::city::Point;
use crate::sim::{Citizen, CitizenId, CitizenState};

fn no_traffic(_: Point) -> (f64, f64) {
    (0.0, 0.0)
}

fn commuter() -> Citizen {
    Citizen::new(
        CitizenId(0),
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(0.0, 100.0),
        0.5,
    )
}

#[test]
fn morning_commute_heads_to_work() {
    let mut c = commuter();
    c.step(8.0, 1.0, no_traffic);
    assert_eq!(c.state, CitizenState::Commuting);
    assert_eq!(c.destination, Point::new(100.0, 0.0));
    assert_eq!(c.position, Point::new(40.0, 0.0));
    assert!((c.energy - 0.95).abs() < 1e-12);
}

#[test]
fn commuter_snaps_to_destination_when_close() {
    let mut c = commuter();
    for _ in 0..3 {
        c.step(8.0, 1.0, no_traffic);
    }
    assert_eq!(c.position, Point::new(100.0, 0.0));
}

#[test]
fn evening_commute_returns_home() {
    let mut c = commuter();
    c.step(8.0, 3.0, no_traffic);
    assert_eq!(c.position, Point::new(100.0, 0.0));
    c.step(10.0, 1.0, no_traffic);
    assert_eq!(c.state, CitizenState::Working);
    assert_eq!(c.destination, Point::new(100.0, 0.0));
    c.step(17.5, 1.0, no_traffic);
    assert_eq!(c.state, CitizenState::Commuting);
    assert_eq!(c.destination, Point::new(0.0, 0.0));
}

#[test]
fn working_restores_energy_and_satisfaction() {
    let mut c = commuter();
    c.energy = 0.5;
    c.step(12.0, 10.0, no_traffic);
    assert_eq!(c.state, CitizenState::Working);
    assert!((c.energy - 0.7).abs() < 1e-12);
    assert!((c.satisfaction - 0.6).abs() < 1e-12);
    c.step(12.0, 1_000.0, no_traffic);
    assert_eq!(c.energy, 1.0);
    assert_eq!(c.satisfaction, 1.0);
}

#[test]
fn leisure_goes_to_leisure_spot() {
    let mut c = commuter();
    c.step(20.0, 5.0, no_traffic);
    assert_eq!(c.state, CitizenState::Leisure);
    assert_eq!(c.position, Point::new(0.0, 100.0));
}

#[test]
fn evacuation_overrides_schedule_until_arrival() {
    let mut c = commuter();
    c.evacuate(Point::new(0.0, -200.0));
    c.step(12.0, 1.0, no_traffic);
    assert_eq!(c.state, CitizenState::Evacuating);
    assert_eq!(c.position, Point::new(0.0, -40.0));

    c.step(12.0, 10.0, no_traffic);
    assert_eq!(c.state, CitizenState::Evacuating);
    assert_eq!(c.position, Point::new(0.0, -200.0));

    // 抵达后的下一个 tick 交还给日程
    c.step(12.0, 0.1, no_traffic);
    assert_eq!(c.state, CitizenState::Working);
    assert_eq!(c.destination, Point::new(100.0, 0.0));
}

#[test]
fn avoidance_pushes_citizen_off_course() {
    let mut straight = commuter();
    let mut dodging = commuter();
    straight.step(8.0, 1.0, no_traffic);
    dodging.step(8.0, 1.0, |_| (0.0, 0.1));
    assert_eq!(dodging.position.x, straight.position.x);
    assert!((dodging.position.z - 4.0).abs() < 1e-12);
}
