//! 经济子系统

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    pub gdp: f64,
    pub tax_revenue: f64,
    pub unemployment: f64,
    pub property_value_index: f64,
    pub trend: f64,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            gdp: 1200.0,
            tax_revenue: 15.0,
            unemployment: 0.08,
            property_value_index: 1.0,
            trend: 0.0,
        }
    }
}

impl EconomyState {
    pub fn step(&mut self, population: f64, capacity: u64, job_capacity: u64, delta_hours: f64) {
        let productivity = (population / (job_capacity as f64).max(1.0)).min(1.0);
        let demand = (population / (capacity as f64).max(1.0)).min(1.5);

        // 指数平滑
        self.trend = self.trend * 0.95 + (productivity - self.unemployment) * 0.02;
        self.property_value_index = (self.property_value_index + self.trend * delta_hours).max(0.5);
        self.gdp *= 1.0 + 0.002 * delta_hours + self.trend * 0.1;
        self.tax_revenue = self.gdp * 0.02;
        self.unemployment =
            (self.unemployment + (demand - 1.0) * 0.01 * delta_hours).clamp(0.0, 0.3);
    }
}
