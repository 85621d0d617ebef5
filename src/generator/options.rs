use serde::{Deserialize, Serialize};

/// 城市生成参数。
///
/// 距离类参数以世界单位表示，生成时再换算成网格单元数；
/// 退化取值（0/负数间距、越界概率）在使用处钳制，而不是预先校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub width: f64,
    pub height: f64,
    pub block_size: f64,
    pub district_cluster_size: usize,
    pub main_road_spacing: f64,
    pub secondary_road_spacing: f64,
    pub local_road_probability: f64,
    pub park_probability: f64,
    pub plaza_probability: f64,
    pub river_curviness: f64,
    pub river_width: f64,
    pub transit_spacing: f64,
    /// 归一化中心距离，超过后进入郊区环
    pub suburb_start_radius: f64,
    /// 归一化中心距离，超过后进入乡村环
    pub rural_start_radius: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1600.0,
            block_size: 40.0,
            district_cluster_size: 6,
            main_road_spacing: 240.0,
            secondary_road_spacing: 160.0,
            local_road_probability: 0.2,
            park_probability: 0.08,
            plaza_probability: 0.02,
            river_curviness: 0.25,
            river_width: 120.0,
            transit_spacing: 320.0,
            suburb_start_radius: 0.45,
            rural_start_radius: 0.7,
        }
    }
}

/// Partial options record; every field left as `None` keeps the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub block_size: Option<f64>,
    pub district_cluster_size: Option<usize>,
    pub main_road_spacing: Option<f64>,
    pub secondary_road_spacing: Option<f64>,
    pub local_road_probability: Option<f64>,
    pub park_probability: Option<f64>,
    pub plaza_probability: Option<f64>,
    pub river_curviness: Option<f64>,
    pub river_width: Option<f64>,
    pub transit_spacing: Option<f64>,
    pub suburb_start_radius: Option<f64>,
    pub rural_start_radius: Option<f64>,
}

impl GeneratorOptions {
    pub fn with_overrides(&self, o: &GeneratorOverrides) -> GeneratorOptions {
        GeneratorOptions {
            width: o.width.unwrap_or(self.width),
            height: o.height.unwrap_or(self.height),
            block_size: o.block_size.unwrap_or(self.block_size),
            district_cluster_size: o
                .district_cluster_size
                .unwrap_or(self.district_cluster_size),
            main_road_spacing: o.main_road_spacing.unwrap_or(self.main_road_spacing),
            secondary_road_spacing: o
                .secondary_road_spacing
                .unwrap_or(self.secondary_road_spacing),
            local_road_probability: o
                .local_road_probability
                .unwrap_or(self.local_road_probability),
            park_probability: o.park_probability.unwrap_or(self.park_probability),
            plaza_probability: o.plaza_probability.unwrap_or(self.plaza_probability),
            river_curviness: o.river_curviness.unwrap_or(self.river_curviness),
            river_width: o.river_width.unwrap_or(self.river_width),
            transit_spacing: o.transit_spacing.unwrap_or(self.transit_spacing),
            suburb_start_radius: o.suburb_start_radius.unwrap_or(self.suburb_start_radius),
            rural_start_radius: o.rural_start_radius.unwrap_or(self.rural_start_radius),
        }
    }

    /// 网格单元边长，至少为 1
    pub(crate) fn block(&self) -> f64 {
        if self.block_size.is_finite() && self.block_size >= 1.0 {
            self.block_size
        } else {
            1.0
        }
    }
}

/// 把世界距离换算成网格单元数（四舍五入），并保证不小于 `min`。
pub(crate) fn cells_for(distance: f64, block: f64, min: usize) -> usize {
    let cells = (distance / block).round();
    if cells.is_finite() && cells >= min as f64 {
        cells as usize
    } else {
        min
    }
}
