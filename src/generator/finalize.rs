//! 阶段 8：定稿
//!
//! 把生成期的中间结果物化为 City 上的实体，并计算经济评分。

use crate::city::{City, District, Park, TransitLine, WaterBody};

use super::buildings::PlacementResult;
use super::districts::DistrictCluster;
use super::grid::CityGrid;
use super::parks::ParkPatch;
use super::roads::{RoadRun, emit_road_segments};
use super::water::RiverDescriptor;

pub(crate) struct GenerationArtifacts {
    pub clusters: Vec<DistrictCluster>,
    pub river: RiverDescriptor,
    pub parks: Vec<ParkPatch>,
    pub runs: Vec<RoadRun>,
    pub placement: PlacementResult,
    pub transit: Vec<TransitLine>,
}

pub(crate) fn finalize_city(city: &mut City, grid: &CityGrid, artifacts: GenerationArtifacts) {
    let GenerationArtifacts {
        clusters,
        river,
        parks,
        runs,
        placement,
        transit,
    } = artifacts;

    for cluster in &clusters {
        city.add_district(District {
            id: cluster.id.clone(),
            kind: cluster.kind,
            boundary: cluster.boundary,
            density: cluster.density(),
            amenities: cluster.amenities(),
        });
    }

    emit_road_segments(city, grid, &runs);

    // 被道路覆盖的片区不再是公园
    for patch in parks {
        let live = patch
            .cells
            .iter()
            .filter(|&&(x, z)| grid.get(x, z).is_park)
            .count();
        if live == 0 {
            continue;
        }
        let radius = (live as f64).sqrt() * 10.0;
        city.add_park(Park::new(patch.id, patch.center, radius, patch.has_water));
    }

    if !river.path.is_empty() {
        city.add_water_body(WaterBody {
            id: "river-0".to_string(),
            path: river.path,
            width: river.width,
        });
    }

    for line in transit {
        city.add_transit_line(line);
    }

    let PlacementResult { buildings, plazas } = placement;
    for plaza in plazas {
        city.add_landmark(plaza);
    }
    for building in buildings {
        city.add_building(building);
    }

    city.recompute_economic_score();
}
