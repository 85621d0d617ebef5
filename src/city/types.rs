//! 基础值类型与分类枚举

use serde::{Deserialize, Serialize};

/// XZ 平面上的点（地面高度恒为 0）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    /// 线性插值，`t` 取 [0, 1]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.z + (other.z - self.z) * t,
        )
    }
}

/// 建筑占地（宽 × 深）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

impl Footprint {
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

/// 分区类型（8 种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictType {
    Downtown,
    Commercial,
    Residential,
    Industrial,
    Suburban,
    Rural,
    Parkland,
    Waterfront,
}

impl DistrictType {
    pub const ALL: [DistrictType; 8] = [
        DistrictType::Downtown,
        DistrictType::Commercial,
        DistrictType::Residential,
        DistrictType::Industrial,
        DistrictType::Suburban,
        DistrictType::Rural,
        DistrictType::Parkland,
        DistrictType::Waterfront,
    ];

    /// 该分区内建筑高度的随机幅度
    pub fn height_variance(self) -> f64 {
        match self {
            DistrictType::Downtown => 0.35,
            DistrictType::Commercial => 0.3,
            DistrictType::Residential => 0.2,
            DistrictType::Suburban => 0.15,
            DistrictType::Rural => 0.1,
            DistrictType::Industrial => 0.2,
            DistrictType::Waterfront => 0.25,
            DistrictType::Parkland => 0.1,
        }
    }
}

/// 建筑类别（10 种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCategory {
    Skyscraper,
    Office,
    Apartment,
    House,
    Condo,
    Factory,
    Warehouse,
    Civic,
    Commercial,
    Park,
}

impl BuildingCategory {
    /// 基准高度（米）
    pub fn base_height(self) -> f64 {
        match self {
            BuildingCategory::Skyscraper => 180.0,
            BuildingCategory::Office => 90.0,
            BuildingCategory::Apartment => 70.0,
            BuildingCategory::House => 12.0,
            BuildingCategory::Condo => 35.0,
            BuildingCategory::Factory => 24.0,
            BuildingCategory::Warehouse => 18.0,
            BuildingCategory::Civic => 28.0,
            BuildingCategory::Commercial => 22.0,
            BuildingCategory::Park => 4.0,
        }
    }

    /// 可以作为市民住所的类别
    pub fn is_housing(self) -> bool {
        matches!(
            self,
            BuildingCategory::House
                | BuildingCategory::Apartment
                | BuildingCategory::Condo
                | BuildingCategory::Skyscraper
        )
    }
}

/// 道路等级（5 级）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Highway,
    Arterial,
    Collector,
    Local,
    Transit,
}

impl RoadClass {
    pub fn lanes(self) -> u32 {
        match self {
            RoadClass::Highway => 6,
            RoadClass::Arterial => 4,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    Tram,
    Metro,
}
