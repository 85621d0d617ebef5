//! 阶段 2：分区分配
//!
//! 径向阈值阶梯 + 两个独立的多倍频噪声（"特征"与"变化"）决定每个单元的分区类型；
//! 单元再按 (类型, x / c, z / c) 聚类，每个聚类最终产出一条 District 记录。

use std::collections::HashMap;

use crate::city::{DistrictType, Point};
use crate::rng::NoiseField;
use crate::spatial::Bounds;

use super::grid::CityGrid;
use super::options::GeneratorOptions;

/// 一个分区聚类的累计量
#[derive(Debug, Clone)]
pub(crate) struct DistrictCluster {
    pub id: String,
    pub kind: DistrictType,
    pub boundary: Bounds,
    pub cell_count: usize,
    pub density_total: f64,
    pub amenities_total: f64,
}

impl DistrictCluster {
    pub fn density(&self) -> f64 {
        self.density_total / self.cell_count.max(1) as f64
    }

    pub fn amenities(&self) -> f64 {
        self.amenities_total / self.cell_count.max(1) as f64
    }
}

/// 径向阶梯分类
pub(crate) fn classify(
    distance: f64,
    character: f64,
    variation: f64,
    opts: &GeneratorOptions,
) -> DistrictType {
    let mut kind = if distance < 0.18 {
        DistrictType::Downtown
    } else if distance < 0.3 {
        if character > 0.2 {
            DistrictType::Commercial
        } else {
            DistrictType::Downtown
        }
    } else if distance < opts.suburb_start_radius {
        if character > 0.35 {
            DistrictType::Commercial
        } else {
            DistrictType::Residential
        }
    } else if distance < opts.rural_start_radius {
        if variation > 0.15 {
            DistrictType::Suburban
        } else {
            DistrictType::Industrial
        }
    } else if character > -0.2 {
        DistrictType::Rural
    } else {
        DistrictType::Parkland
    };

    // 商业飞地
    if kind == DistrictType::Residential && character.abs() > 0.55 && variation > 0.25 {
        kind = DistrictType::Commercial;
    }
    kind
}

pub(crate) fn assign_districts(
    grid: &mut CityGrid,
    opts: &GeneratorOptions,
    district_noise: &NoiseField,
    variation_noise: &NoiseField,
) -> Vec<DistrictCluster> {
    let max_distance = grid.half_width.hypot(grid.half_height).max(f64::EPSILON);
    let cluster_size = opts.district_cluster_size.max(1);
    let mut clusters: Vec<DistrictCluster> = Vec::new();
    let mut by_key: HashMap<(DistrictType, usize, usize), usize> = HashMap::new();

    for (x, z) in grid.coords() {
        let cell = grid.get_mut(x, z);
        let distance = cell.world_x.hypot(cell.world_z) / max_distance;
        let radial_bias = 1.0 - distance;
        let character = district_noise.layered(x as f64 * 0.05, z as f64 * 0.05, 5, 0.55, 1.8);
        let variation = variation_noise.layered(x as f64 * 0.09, z as f64 * 0.09, 3, 0.5, 2.1);

        let kind = classify(distance, character, variation, opts);
        cell.district = kind;
        cell.density = (radial_bias + character.abs() * 0.35).max(0.1);
        cell.amenities = (variation + 0.5).max(0.0);

        let key = (kind, x / cluster_size, z / cluster_size);
        let center = cell.center();
        let index = *by_key.entry(key).or_insert_with(|| {
            clusters.push(DistrictCluster {
                id: format!("district-{}", clusters.len()),
                kind,
                boundary: Bounds::around(center, 0.0),
                cell_count: 0,
                density_total: 0.0,
                amenities_total: 0.0,
            });
            clusters.len() - 1
        });

        let cluster = &mut clusters[index];
        cluster.boundary.include(Point::new(cell.world_x, cell.world_z));
        cluster.cell_count += 1;
        cluster.density_total += cell.density;
        cluster.amenities_total += cell.amenities;
        cell.cluster = index;
    }

    clusters
}
