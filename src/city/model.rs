//! 城市聚合根
//!
//! 所有增删都经由这里的方法进行，以便元数据与实体集合保持一致。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entities::{Building, District, Landmark, Park, RoadSegment, TransitLine, WaterBody};
use super::types::{BuildingCategory, Point};
use crate::rng::Seed;

/// 城市汇总指标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CityMetadata {
    pub population_capacity: u64,
    pub job_capacity: u64,
    pub green_space: f64,
    pub road_length: f64,
    pub economic_score: f64,
}

/// `remove_buildings_within` 的结果：被移除建筑的容量之和
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RemovedCapacity {
    pub buildings: usize,
    pub population: u64,
    pub jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub seed: Seed,
    pub districts: Vec<District>,
    pub roads: Vec<RoadSegment>,
    pub buildings: Vec<Building>,
    pub parks: Vec<Park>,
    pub water_bodies: Vec<WaterBody>,
    pub transit_lines: Vec<TransitLine>,
    pub landmarks: Vec<Landmark>,
    pub metadata: CityMetadata,
}

impl City {
    pub fn new(width: f64, height: f64, cell_size: f64, seed: Seed) -> Self {
        Self {
            width,
            height,
            cell_size,
            seed,
            districts: Vec::new(),
            roads: Vec::new(),
            buildings: Vec::new(),
            parks: Vec::new(),
            water_bodies: Vec::new(),
            transit_lines: Vec::new(),
            landmarks: Vec::new(),
            metadata: CityMetadata::default(),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn add_district(&mut self, district: District) {
        self.districts.push(district);
    }

    pub fn add_road(&mut self, road: RoadSegment) {
        self.metadata.road_length += road.length;
        self.roads.push(road);
    }

    pub fn add_building(&mut self, building: Building) {
        self.metadata.population_capacity += building.population_capacity;
        self.metadata.job_capacity += building.job_capacity;
        if building.category == BuildingCategory::Park {
            self.metadata.green_space += building.area();
        }
        self.buildings.push(building);
    }

    pub fn add_park(&mut self, park: Park) {
        self.metadata.green_space += park.area;
        self.parks.push(park);
    }

    pub fn add_water_body(&mut self, body: WaterBody) {
        self.water_bodies.push(body);
    }

    pub fn add_transit_line(&mut self, line: TransitLine) {
        self.transit_lines.push(line);
    }

    pub fn add_landmark(&mut self, landmark: Landmark) {
        self.landmarks.push(landmark);
    }

    /// 移除中心 `radius` 范围内（含边界）的所有建筑，并从元数据中减去它们的贡献。
    pub fn remove_buildings_within(&mut self, center: Point, radius: f64) -> RemovedCapacity {
        let mut removed = RemovedCapacity::default();
        let mut green_removed = 0.0;
        self.buildings.retain(|b| {
            if b.position.distance_to(center) > radius {
                return true;
            }
            removed.buildings += 1;
            removed.population += b.population_capacity;
            removed.jobs += b.job_capacity;
            if b.category == BuildingCategory::Park {
                green_removed += b.area();
            }
            false
        });

        self.metadata.population_capacity = self
            .metadata
            .population_capacity
            .saturating_sub(removed.population);
        self.metadata.job_capacity = self.metadata.job_capacity.saturating_sub(removed.jobs);
        self.metadata.green_space = (self.metadata.green_space - green_removed).max(0.0);

        debug!(
            buildings = removed.buildings,
            population = removed.population,
            jobs = removed.jobs,
            "移除建筑"
        );
        removed
    }

    /// 经济评分：每栋建筑 (jobs + 0.5·population) 的平均值；没有建筑时为 0。
    pub fn recompute_economic_score(&mut self) {
        if self.buildings.is_empty() {
            self.metadata.economic_score = 0.0;
            return;
        }
        let total: f64 = self
            .buildings
            .iter()
            .map(|b| b.job_capacity as f64 + b.population_capacity as f64 * 0.5)
            .sum();
        self.metadata.economic_score = total / self.buildings.len() as f64;
    }
}
