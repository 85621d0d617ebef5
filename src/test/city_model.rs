use std::f64::consts::PI;

use crate::city::{
    Building, BuildingCategory, City, Footprint, Park, Point, RoadClass, RoadSegment,
};
use crate::rng::Seed;

pub(super) fn building(id: &str, at: Point, category: BuildingCategory, pop: u64, jobs: u64) -> Building {
    Building {
        id: id.to_string(),
        position: at,
        footprint: Footprint {
            width: 10.0,
            depth: 8.0,
        },
        height: 20.0,
        floors: 6,
        color: "#cccccc".to_string(),
        category,
        district_id: "district-0".to_string(),
        population_capacity: pop,
        job_capacity: jobs,
        quality: 0.5,
        style: "modern".to_string(),
    }
}

fn empty_city() -> City {
    City::new(400.0, 400.0, 40.0, Seed::from("model"))
}

#[test]
fn add_building_accumulates_capacity_and_park_area() {
    let mut city = empty_city();
    city.add_building(building("a", Point::ORIGIN, BuildingCategory::Apartment, 120, 0));
    city.add_building(building("b", Point::new(50.0, 0.0), BuildingCategory::Office, 0, 300));
    city.add_building(building("c", Point::new(90.0, 0.0), BuildingCategory::Park, 0, 0));

    assert_eq!(city.metadata.population_capacity, 120);
    assert_eq!(city.metadata.job_capacity, 300);
    assert_eq!(city.metadata.green_space, 80.0);
}

#[test]
fn add_road_and_park_update_totals() {
    let mut city = empty_city();
    city.add_road(RoadSegment::new(
        "r",
        Point::new(0.0, 0.0),
        Point::new(30.0, 40.0),
        8.0,
        2,
        RoadClass::Local,
    ));
    city.add_park(Park::new("p", Point::ORIGIN, 10.0, false));

    assert_eq!(city.roads[0].length, 50.0);
    assert_eq!(city.metadata.road_length, 50.0);
    assert!((city.metadata.green_space - PI * 100.0).abs() < 1e-9);
}

#[test]
fn remove_buildings_within_conserves_capacity() {
    let mut city = empty_city();
    city.add_building(building("near", Point::new(10.0, 0.0), BuildingCategory::Apartment, 100, 5));
    city.add_building(building("edge", Point::new(0.0, 40.0), BuildingCategory::Office, 0, 50));
    city.add_building(building("far", Point::new(200.0, 0.0), BuildingCategory::House, 4, 0));
    let before = city.metadata.clone();

    let removed = city.remove_buildings_within(Point::ORIGIN, 40.0);

    assert_eq!(removed.buildings, 2);
    assert_eq!(removed.population, 100);
    assert_eq!(removed.jobs, 55);
    assert_eq!(
        before.population_capacity - city.metadata.population_capacity,
        removed.population
    );
    assert_eq!(before.job_capacity - city.metadata.job_capacity, removed.jobs);
    assert_eq!(city.buildings.len(), 1);
    assert_eq!(city.buildings[0].id, "far");
}

#[test]
fn remove_from_empty_region_changes_nothing() {
    let mut city = empty_city();
    city.add_building(building("a", Point::ORIGIN, BuildingCategory::Apartment, 10, 0));
    let removed = city.remove_buildings_within(Point::new(300.0, 300.0), 5.0);
    assert_eq!(removed.buildings, 0);
    assert_eq!(city.metadata.population_capacity, 10);
}

#[test]
fn economic_score_averages_jobs_and_half_population() {
    let mut city = empty_city();
    city.recompute_economic_score();
    assert_eq!(city.metadata.economic_score, 0.0);

    city.add_building(building("a", Point::ORIGIN, BuildingCategory::Apartment, 100, 0));
    city.add_building(building("b", Point::ORIGIN, BuildingCategory::Office, 0, 30));
    city.recompute_economic_score();
    assert_eq!(city.metadata.economic_score, (50.0 + 30.0) / 2.0);
}

#[test]
fn city_serializes_snake_case() {
    let mut city = empty_city();
    city.add_building(building("a", Point::ORIGIN, BuildingCategory::Skyscraper, 1, 1));
    let value = serde_json::to_value(&city).expect("serialize city");
    assert_eq!(value["metadata"]["population_capacity"], 1);
    assert_eq!(value["buildings"][0]["category"], "skyscraper");
    assert_eq!(value["seed"], "model");
}
