//! 城市实体记录
//!
//! 纯数据；派生量（长度、面积）在构造时或按需计算。

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::types::{BuildingCategory, DistrictType, Footprint, Point, RoadClass, TransitMode};
use crate::spatial::Bounds;

/// 分区：一组同类网格单元的聚合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub kind: DistrictType,
    pub boundary: Bounds,
    /// 成员单元密度的平均值
    pub density: f64,
    /// 成员单元配套设施评分的平均值
    pub amenities: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub lanes: u32,
    pub class: RoadClass,
    /// 端点间欧氏距离
    pub length: f64,
}

impl RoadSegment {
    pub fn new(
        id: impl Into<String>,
        from: Point,
        to: Point,
        width: f64,
        lanes: u32,
        class: RoadClass,
    ) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            width,
            lanes,
            class,
            length: from.distance_to(to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub position: Point,
    pub footprint: Footprint,
    pub height: f64,
    pub floors: u32,
    pub color: String,
    pub category: BuildingCategory,
    pub district_id: String,
    pub population_capacity: u64,
    pub job_capacity: u64,
    pub quality: f64,
    pub style: String,
}

impl Building {
    pub fn area(&self) -> f64 {
        self.footprint.area()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Park {
    pub id: String,
    pub position: Point,
    pub radius: f64,
    pub has_water_feature: bool,
    /// π·r²
    pub area: f64,
}

impl Park {
    pub fn new(id: impl Into<String>, position: Point, radius: f64, has_water_feature: bool) -> Self {
        Self {
            id: id.into(),
            position,
            radius,
            has_water_feature,
            area: PI * radius * radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBody {
    pub id: String,
    pub path: Vec<Point>,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub position: Point,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitLine {
    pub id: String,
    pub path: Vec<Point>,
    pub stations: Vec<Station>,
    pub mode: TransitMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub position: Point,
    pub name: String,
    pub description: String,
}
