//! 轴对齐包围盒（XZ 平面）

use serde::{Deserialize, Serialize};

use crate::city::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// 以点为中心、半边长为 `radius` 的正方形
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.x + radius,
            center.z - radius,
            center.z + radius,
        )
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_z <= other.max_z
            && other.min_z <= self.max_z
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    /// 扩展以包含某点
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }
}
