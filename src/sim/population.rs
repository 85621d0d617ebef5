//! 人口子系统
//!
//! 满意度随住房/就业比与绿地漂移；人口按 logistic 式增长加迁移项增长，
//! 增量不超过剩余容量，总数不低于下限。

use serde::{Deserialize, Serialize};

pub const POPULATION_FLOOR: f64 = 200.0;
const MIGRATION_PER_HOUR: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    pub total: f64,
    pub capacity: u64,
    pub growth_rate: f64,
    pub satisfaction: f64,
    pub homeless: f64,
    pub migration_flow: f64,
}

/// 满意度漂移所需的城市输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationInputs {
    pub job_capacity: u64,
    pub green_space: f64,
    pub city_area: f64,
}

impl PopulationState {
    pub fn new(capacity: u64) -> Self {
        Self {
            total: (capacity as f64 * 0.4).round(),
            capacity,
            growth_rate: 0.015,
            satisfaction: 0.6,
            homeless: 0.0,
            migration_flow: 0.0,
        }
    }

    pub fn drift_satisfaction(&mut self, inputs: &PopulationInputs, delta_hours: f64) {
        let housing_ratio = if self.capacity > 0 {
            self.total / self.capacity as f64
        } else {
            0.0
        };
        let job_ratio = if inputs.job_capacity > 0 {
            self.total * 0.6 / inputs.job_capacity as f64
        } else {
            0.0
        };
        let amenity = if inputs.city_area > 0.0 {
            inputs.green_space / inputs.city_area + 0.1
        } else {
            0.1
        };
        let delta = (1.0 - housing_ratio) * 0.1 + (1.0 - job_ratio) * 0.05 + amenity * 0.1;
        self.satisfaction = (self.satisfaction + delta * delta_hours).clamp(0.1, 1.0);
    }

    /// 按当前满意度增长，返回净增长量。
    pub fn grow(&mut self, delta_hours: f64) -> f64 {
        let headroom = (self.capacity as f64 - self.total).max(0.0);
        let organic = self.total * self.growth_rate * self.satisfaction * delta_hours;
        let migration = (self.satisfaction - 0.5) * MIGRATION_PER_HOUR * delta_hours;
        let net = headroom.min(organic + migration);

        self.total = (self.total + net).max(POPULATION_FLOOR);
        self.migration_flow = migration;
        net
    }

    /// 日常维护：超出容量的人口计为无家可归
    pub fn recount_homeless(&mut self) {
        self.homeless = (self.total - self.capacity as f64).max(0.0);
    }
}
