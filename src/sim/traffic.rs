//! 交通子系统
//!
//! 聚合流量/拥堵/公交使用率，加上沿路段行驶的车辆智能体。
//! 车辆位置保存在空间哈希中，供市民避让查询。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::city::{Point, RoadClass, RoadSegment};
use crate::rng::CityRng;
use crate::spatial::{Bounds, SpatialHash};

pub const VEHICLE_CELL_SIZE: f64 = 120.0;
pub const VEHICLE_RADIUS: f64 = 15.0;
pub const MAX_VEHICLES: usize = 500;
const PEOPLE_PER_VEHICLE: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Bus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficState {
    pub average_flow: f64,
    pub congestion: f64,
    pub transit_usage: f64,
}

impl Default for TrafficState {
    fn default() -> Self {
        Self {
            average_flow: 0.5,
            congestion: 0.2,
            transit_usage: 0.3,
        }
    }
}

/// 早晚高峰：[7, 9] 与 [16, 18]（闭区间）
pub fn rush_multiplier(hour: f64) -> f64 {
    if (7.0..=9.0).contains(&hour) || (16.0..=18.0).contains(&hour) {
        1.5
    } else {
        1.0
    }
}

impl TrafficState {
    pub fn step(&mut self, population: f64, road_length: f64, hour: f64, jammed: bool, delta_hours: f64) {
        let base = population / road_length.max(1.0) * 0.05;
        let penalty = if jammed { 0.5 } else { 1.0 };
        self.average_flow = (base * rush_multiplier(hour) * penalty).min(1.2);
        self.congestion = (self.average_flow - 0.3).clamp(0.0, 1.0);
        self.transit_usage =
            (self.transit_usage + (self.congestion - 0.2) * 0.05 * delta_hours).clamp(0.1, 0.9);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    /// 至少两个路点
    pub path: Vec<Point>,
    pub kind: VehicleKind,
    pub progress: f64,
    pub position: Point,
    pub speed: f64,
}

impl Vehicle {
    fn advance(&mut self, delta_hours: f64) {
        if self.path.len() < 2 {
            return;
        }
        self.progress = (self.progress + delta_hours * self.speed / 100.0).min(1.0);
        let segment = self.progress * (self.path.len() - 1) as f64;
        let index = (segment.floor() as usize).min(self.path.len() - 1);
        let local = segment - index as f64;
        let start = self.path[index];
        let end = self.path[(index + 1).min(self.path.len() - 1)];
        self.position = start.lerp(end, local);
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }
}

/// 在途车辆集合及其空间索引
#[derive(Debug, Clone)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    index: SpatialHash<VehicleId>,
    positions: HashMap<VehicleId, Point>,
    next_id: u64,
}

impl Default for Fleet {
    fn default() -> Self {
        Self {
            vehicles: Vec::new(),
            index: SpatialHash::new(VEHICLE_CELL_SIZE),
            positions: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Fleet {
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// 期望车辆数：人口 / 120，上限 500
    pub fn desired(population: f64) -> usize {
        ((population / PEOPLE_PER_VEHICLE).round().max(0.0) as usize).min(MAX_VEHICLES)
    }

    /// 补足车辆、推进所有车辆并移除已到达终点的车辆。
    pub fn step(&mut self, roads: &[RoadSegment], population: f64, rng: &mut CityRng, delta_hours: f64) {
        let desired = Self::desired(population);
        while self.vehicles.len() < desired {
            if !self.spawn(roads, rng) {
                break;
            }
        }

        let mut finished = 0usize;
        let index = &mut self.index;
        let positions = &mut self.positions;
        self.vehicles.retain_mut(|vehicle| {
            index.remove(vehicle.id, &Bounds::around(vehicle.position, VEHICLE_RADIUS));
            vehicle.advance(delta_hours);
            if vehicle.is_finished() {
                positions.remove(&vehicle.id);
                finished += 1;
                return false;
            }
            index.insert(vehicle.id, &Bounds::around(vehicle.position, VEHICLE_RADIUS));
            positions.insert(vehicle.id, vehicle.position);
            true
        });
        trace!(active = self.vehicles.len(), finished, "车辆推进");
    }

    /// 在随机路段上生成一辆车；城市没有道路时返回 false。
    fn spawn(&mut self, roads: &[RoadSegment], rng: &mut CityRng) -> bool {
        let Some(road) = rng.pick(roads) else {
            return false;
        };
        let highway = road.class == RoadClass::Highway;
        let kind = if !highway && rng.chance(0.2) {
            VehicleKind::Bus
        } else {
            VehicleKind::Car
        };
        let multiplier = if highway { 1.5 } else { 1.0 };
        let speed = (30.0 + rng.next_f64() * 15.0) * multiplier;

        let id = VehicleId(self.next_id);
        self.next_id += 1;
        let vehicle = Vehicle {
            id,
            path: vec![road.from, road.to],
            kind,
            progress: 0.0,
            position: road.from,
            speed,
        };
        self.index.insert(id, &Bounds::around(vehicle.position, VEHICLE_RADIUS));
        self.positions.insert(id, vehicle.position);
        self.vehicles.push(vehicle);
        true
    }

    /// 与 `bounds` 相交的车辆位置
    pub fn positions_within(&self, bounds: &Bounds) -> impl Iterator<Item = Point> + '_ {
        self.index
            .query_range(bounds)
            .into_iter()
            .filter_map(|id| self.positions.get(&id).copied())
    }
}
