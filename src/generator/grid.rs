//! 生成期网格
//!
//! 每个单元记录世界坐标、分区归属、密度/配套标量，以及道路/水域/公园/建筑占用。
//! 网格只在生成期间存在，不挂到 `City` 上。

use tracing::warn;

use crate::city::{DistrictType, Point, RoadClass};

use super::options::GeneratorOptions;

/// 单元数上限；超过时生成空网格
const MAX_GRID_CELLS: usize = 1 << 22;

/// 沿一条边能放下的整块数；非有限或非正的尺寸为 0
fn cells_along(extent: f64, block: f64) -> usize {
    let cells = (extent / block).floor();
    if cells.is_finite() && cells > 0.0 {
        cells as usize
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridCell {
    pub world_x: f64,
    pub world_z: f64,
    pub district: DistrictType,
    /// 所属聚类（即 District 记录）的下标
    pub cluster: usize,
    pub density: f64,
    pub amenities: f64,
    pub road: Option<RoadClass>,
    pub is_water: bool,
    pub is_park: bool,
    pub is_river_bank: bool,
    /// 生成的建筑在建筑列表中的下标
    pub building: Option<usize>,
}

impl GridCell {
    pub fn is_road(&self) -> bool {
        self.road.is_some()
    }

    pub fn center(&self) -> Point {
        Point::new(self.world_x, self.world_z)
    }

    /// 没有任何占用（道路/水域/公园/建筑）
    pub fn is_free(&self) -> bool {
        !self.is_road() && !self.is_water && !self.is_park && self.building.is_none()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CityGrid {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
    pub half_width: f64,
    pub half_height: f64,
    /// 按列主序存放：下标 = x * rows + z
    cells: Vec<GridCell>,
}

impl CityGrid {
    /// 阶段 1：按城市尺寸与街区大小分配 cols×rows 网格，并计算各单元中心。
    pub fn new(opts: &GeneratorOptions) -> Self {
        let block = opts.block();
        let (mut cols, mut rows) = (cells_along(opts.width, block), cells_along(opts.height, block));
        if cols.checked_mul(rows).is_none_or(|n| n > MAX_GRID_CELLS) {
            warn!(cols, rows, "网格过大，按空网格处理");
            (cols, rows) = (0, 0);
        }
        let half_width = opts.width / 2.0;
        let half_height = opts.height / 2.0;

        let mut cells = Vec::with_capacity(cols * rows);
        for x in 0..cols {
            for z in 0..rows {
                cells.push(GridCell {
                    world_x: -half_width + block * (x as f64 + 0.5),
                    world_z: -half_height + block * (z as f64 + 0.5),
                    district: DistrictType::Residential,
                    cluster: 0,
                    density: 0.0,
                    amenities: 0.0,
                    road: None,
                    is_water: false,
                    is_park: false,
                    is_river_bank: false,
                    building: None,
                });
            }
        }

        Self {
            cols,
            rows,
            cell_size: block,
            half_width,
            half_height,
            cells,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> &GridCell {
        &self.cells[x * self.rows + z]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut GridCell {
        &mut self.cells[x * self.rows + z]
    }

    pub fn in_bounds(&self, x: i64, z: i64) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.cols && (z as usize) < self.rows
    }

    /// 按 x 主序遍历 `(x, z)` 坐标
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let rows = self.rows;
        (0..self.cols).flat_map(move |x| (0..rows).map(move |z| (x, z)))
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}
