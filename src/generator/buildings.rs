//! 阶段 6：建筑放置
//!
//! 每个空闲单元按分区加权表选出建筑类别；公园用地直接转成公园片区，
//! 市中心/商业单元以 plaza 概率成为广场地标。密度门限抑制低密度单元上的建筑。

use crate::city::{Building, BuildingCategory, DistrictType, Footprint, Landmark};
use crate::rng::{CityRng, NoiseField};

use super::districts::DistrictCluster;
use super::grid::CityGrid;
use super::options::GeneratorOptions;
use super::parks::ParkPatch;

const STYLES: [&str; 6] = [
    "modern",
    "artdeco",
    "brutalist",
    "classical",
    "futuristic",
    "loft",
];
const SKYLINE_PALETTE: [&str; 4] = ["#88c0d0", "#5e81ac", "#eceff4", "#4c566a"];
const LOWRISE_PALETTE: [&str; 4] = ["#d08770", "#ebcb8b", "#a3be8c", "#b48ead"];

/// 由类别、分区与街区大小推出的建筑物理属性
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BuildingAttributes {
    pub height: f64,
    pub floors: u32,
    pub footprint: Footprint,
    pub color: String,
    pub style: String,
    pub population_capacity: u64,
    pub job_capacity: u64,
}

pub(crate) struct PlacementResult {
    pub buildings: Vec<Building>,
    pub plazas: Vec<Landmark>,
}

pub(crate) fn select_category(district: DistrictType, rng: &mut CityRng) -> BuildingCategory {
    use BuildingCategory as C;
    let pick = |rng: &mut CityRng, p: f64, a: C, b: C| if rng.chance(p) { a } else { b };
    match district {
        DistrictType::Downtown => pick(rng, 0.6, C::Skyscraper, C::Office),
        DistrictType::Commercial => pick(rng, 0.5, C::Commercial, C::Office),
        DistrictType::Industrial => pick(rng, 0.6, C::Factory, C::Warehouse),
        DistrictType::Suburban => pick(rng, 0.5, C::House, C::Condo),
        DistrictType::Rural => pick(rng, 0.7, C::House, C::Warehouse),
        DistrictType::Waterfront => pick(rng, 0.5, C::Condo, C::Commercial),
        DistrictType::Parkland => C::Park,
        DistrictType::Residential => C::Apartment,
    }
}

pub(crate) fn estimate_population(category: BuildingCategory, floors: u32, footprint: Footprint) -> u64 {
    let area = footprint.area();
    let floors = floors as f64;
    let estimate = match category {
        BuildingCategory::Apartment | BuildingCategory::Condo => area * floors / 45.0,
        BuildingCategory::House => (area / 35.0).round().max(2.0),
        BuildingCategory::Skyscraper => area * floors / 60.0,
        _ => 0.0,
    };
    estimate.round().max(0.0) as u64
}

pub(crate) fn estimate_jobs(category: BuildingCategory, floors: u32, footprint: Footprint) -> u64 {
    let area = footprint.area();
    let floors = floors as f64;
    let estimate = match category {
        BuildingCategory::Office | BuildingCategory::Skyscraper => area * floors / 30.0,
        BuildingCategory::Commercial => area * floors / 45.0,
        BuildingCategory::Factory | BuildingCategory::Warehouse => area * floors / 60.0,
        _ => 0.0,
    };
    estimate.round().max(0.0) as u64
}

pub(crate) fn building_attributes(
    category: BuildingCategory,
    district: DistrictType,
    cell_size: f64,
    rng: &mut CityRng,
) -> BuildingAttributes {
    let height = (category.base_height() * (0.7 + rng.next_f64() * district.height_variance())).max(6.0);
    let floors = ((height / 3.5).round() as u32).max(1);
    let scale = if category == BuildingCategory::House {
        0.5
    } else {
        0.8
    };
    let footprint = Footprint {
        width: cell_size * scale,
        depth: cell_size * scale,
    };
    let palette = if category == BuildingCategory::Skyscraper {
        &SKYLINE_PALETTE
    } else {
        &LOWRISE_PALETTE
    };
    let color = rng.pick(palette).copied().unwrap_or("#999999").to_string();
    let style = rng.pick(&STYLES).copied().unwrap_or("modern").to_string();

    BuildingAttributes {
        height,
        floors,
        footprint,
        color,
        style,
        population_capacity: estimate_population(category, floors, footprint),
        job_capacity: estimate_jobs(category, floors, footprint),
    }
}

pub(crate) fn place_buildings(
    grid: &mut CityGrid,
    opts: &GeneratorOptions,
    clusters: &[DistrictCluster],
    base_noise: &NoiseField,
    parks: &mut Vec<ParkPatch>,
    rng: &mut CityRng,
) -> PlacementResult {
    let mut buildings = Vec::new();
    let mut plazas = Vec::new();
    let cell_size = grid.cell_size;

    for (x, z) in grid.coords() {
        let cell = grid.get_mut(x, z);
        if cell.is_road() || cell.is_water || cell.is_park {
            continue;
        }

        let category = select_category(cell.district, rng);
        if category == BuildingCategory::Park {
            cell.is_park = true;
            let center = cell.center();
            parks.push(ParkPatch {
                id: format!("park-{}", parks.len()),
                center,
                cells: vec![(x, z)],
                has_water: rng.chance(0.2),
            });
            continue;
        }

        if matches!(cell.district, DistrictType::Downtown | DistrictType::Commercial)
            && rng.chance(opts.plaza_probability)
        {
            plazas.push(Landmark {
                id: format!("plaza-{}", plazas.len()),
                position: cell.center(),
                name: format!("Plaza {}", plazas.len() + 1),
                description: "Public square".to_string(),
            });
            continue;
        }

        let density_gate = (cell.density + base_noise.sample(x as f64 * 0.1, z as f64 * 0.1)).max(0.2);
        if rng.next_f64() > density_gate {
            continue;
        }

        let attrs = building_attributes(category, cell.district, cell_size, rng);
        let district_id = clusters
            .get(cell.cluster)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| "district-0".to_string());
        let building = Building {
            id: format!("building-{}", buildings.len()),
            position: cell.center(),
            footprint: attrs.footprint,
            height: attrs.height,
            floors: attrs.floors,
            color: attrs.color,
            category,
            district_id,
            population_capacity: attrs.population_capacity,
            job_capacity: attrs.job_capacity,
            quality: 0.4 + rng.next_f64() * 0.6,
            style: attrs.style,
        };

        cell.building = Some(buildings.len());
        buildings.push(building);
    }

    PlacementResult { buildings, plazas }
}
