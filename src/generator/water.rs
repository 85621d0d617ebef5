//! 阶段 3：河流开凿
//!
//! 单条蜿蜒河流：每一列的河心行沿噪声扰动的路径移动，幅度由 curviness 缩放；
//! 河心上下 `width_cells` 行为水域，再外一行为河岸（仅改为滨水区，不淹没）。

use tracing::debug;

use crate::city::{DistrictType, Point};
use crate::rng::NoiseField;

use super::grid::CityGrid;
use super::options::{GeneratorOptions, cells_for};

#[derive(Debug, Clone, Default)]
pub(crate) struct RiverDescriptor {
    pub path: Vec<Point>,
    pub width: f64,
}

pub(crate) fn carve_water(
    grid: &mut CityGrid,
    opts: &GeneratorOptions,
    river_noise: &NoiseField,
) -> RiverDescriptor {
    let (cols, rows) = (grid.cols, grid.rows);
    if cols == 0 || rows == 0 {
        return RiverDescriptor::default();
    }

    // 带宽超过行数后已覆盖整列
    let width_cells = cells_for(opts.river_width, grid.cell_size, 2).min(rows) as i64;
    let curviness = if opts.river_curviness.is_finite() {
        opts.river_curviness
    } else {
        0.0
    };
    let mut path = Vec::with_capacity(cols);

    for x in 0..cols {
        let t = x as f64 / (cols.saturating_sub(1)).max(1) as f64;
        let base_row =
            rows as f64 / 2.0 + river_noise.sample(t * 1.2, 0.2) * rows as f64 * curviness;
        let center_row = (base_row.round() as i64).clamp(0, rows as i64 - 1);
        path.push(grid.get(x, center_row as usize).center());

        for offset in -width_cells..=width_cells {
            let z = center_row + offset;
            if z < 0 || z >= rows as i64 {
                continue;
            }
            let cell = grid.get_mut(x, z as usize);
            cell.is_water = true;
            cell.district = DistrictType::Waterfront;
        }

        for bank in [center_row - width_cells - 1, center_row + width_cells + 1] {
            if bank < 0 || bank >= rows as i64 {
                continue;
            }
            let cell = grid.get_mut(x, bank as usize);
            cell.district = DistrictType::Waterfront;
            cell.is_river_bank = true;
        }
    }

    debug!(columns = cols, width_cells, "🌊 河流开凿完成");
    RiverDescriptor {
        path,
        width: width_cells as f64 * grid.cell_size,
    }
}
