use crate::city::{City, DistrictType, Point, RoadClass};
use crate::generator::{CityGenerator, CityGrid, GeneratorOverrides, collect_road_runs};
use crate::rng::Seed;

fn small_city() -> (City, CityGrid) {
    CityGenerator::default().generate_with_grid(
        Some(Seed::from("unit-test-seed")),
        &GeneratorOverrides {
            width: Some(160.0),
            height: Some(160.0),
            block_size: Some(40.0),
            ..Default::default()
        },
    )
}

#[test]
fn small_city_is_a_four_by_four_grid() {
    let (city, grid) = small_city();
    assert_eq!((grid.cols, grid.rows), (4, 4));
    assert_eq!(grid.cells().len(), 16);
    assert_eq!(city.cell_size, 40.0);
    assert_eq!(grid.get(0, 0).center(), Point::new(-60.0, -60.0));
    assert_eq!(grid.get(3, 3).center(), Point::new(60.0, 60.0));
}

#[test]
fn river_floods_every_cell_into_waterfront() {
    let (city, grid) = small_city();
    for cell in grid.cells() {
        assert_eq!(cell.district, DistrictType::Waterfront);
        assert!(cell.is_water || cell.is_road());
    }
    assert_eq!(city.water_bodies.len(), 1);
    assert_eq!(city.water_bodies[0].path.len(), 4);
    assert_eq!(city.water_bodies[0].width, 120.0);
}

#[test]
fn highways_bridge_the_river() {
    let (_, grid) = small_city();
    let highways: Vec<_> = grid
        .coords()
        .filter(|&(x, z)| grid.get(x, z).road == Some(RoadClass::Highway))
        .collect();
    assert_eq!(highways.len(), 7);
    assert_eq!(grid.cells().iter().filter(|c| c.is_road()).count(), 7);
    for (x, z) in highways {
        assert!(x == 2 || z == 2);
        assert!(!grid.get(x, z).is_water);
    }
}

#[test]
fn road_runs_stop_at_processed_intersection() {
    let (city, grid) = small_city();
    let runs = collect_road_runs(&grid);
    let cells: Vec<_> = runs.iter().map(|r| (r.cells.clone(), r.isolated)).collect();
    assert_eq!(
        cells,
        vec![
            (vec![(0, 2), (1, 2), (2, 2), (3, 2)], false),
            (vec![(2, 0), (2, 1)], false),
            (vec![(2, 3)], true),
        ]
    );

    assert_eq!(city.roads.len(), 3);
    assert_eq!(city.roads[0].length, 120.0);
    assert_eq!(city.roads[1].length, 40.0);
    assert!((city.roads[2].length - 40.0 * 2f64.sqrt()).abs() < 1e-9);
    let total = 160.0 + 40.0 * 2f64.sqrt();
    assert!((city.metadata.road_length - total).abs() < 1e-9);
}

#[test]
fn flooded_city_has_no_buildings_or_parks() {
    let (city, _) = small_city();
    assert!(city.buildings.is_empty());
    assert!(city.parks.is_empty());
    assert!(city.landmarks.is_empty());
    assert!(city.transit_lines.is_empty());
    assert_eq!(city.metadata.population_capacity, 0);
    assert_eq!(city.metadata.economic_score, 0.0);
}

#[test]
fn districts_cover_all_sixteen_cells() {
    let (city, grid) = small_city();
    assert!(!city.districts.is_empty());
    for cell in grid.cells() {
        assert!(cell.cluster < city.districts.len());
    }
    for district in &city.districts {
        assert!(district.boundary.min_x >= -60.0 && district.boundary.max_x <= 60.0);
        assert!(district.density >= 0.1);
    }
}
