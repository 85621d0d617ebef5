//! 阶段 4：公园播种
//!
//! 非道路、非水域单元按概率播下单格公园；噪声高于阈值或位于公园用地时进入候选。

use crate::city::{DistrictType, Point};
use crate::rng::{CityRng, NoiseField};

use super::grid::CityGrid;
use super::options::GeneratorOptions;

/// 公园片区（半径在定稿时由单元数推出）
#[derive(Debug, Clone)]
pub(crate) struct ParkPatch {
    pub id: String,
    pub center: Point,
    pub cells: Vec<(usize, usize)>,
    pub has_water: bool,
}

pub(crate) fn place_parks(
    grid: &mut CityGrid,
    opts: &GeneratorOptions,
    park_noise: &NoiseField,
    rng: &mut CityRng,
) -> Vec<ParkPatch> {
    let probability = opts.park_probability.clamp(0.0, 1.0);
    let mut patches = Vec::new();

    for (x, z) in grid.coords() {
        let cell = grid.get_mut(x, z);
        if cell.is_water || cell.is_road() {
            continue;
        }

        let sample = park_noise.sample(x as f64 * 0.2, z as f64 * 0.2);
        let candidate = sample > 0.75 - probability || cell.district == DistrictType::Parkland;
        if candidate && rng.chance(probability) {
            cell.is_park = true;
            let center = cell.center();
            patches.push(ParkPatch {
                id: format!("park-{}", patches.len()),
                center,
                cells: vec![(x, z)],
                has_water: rng.chance(0.2),
            });
        }
    }

    patches
}
