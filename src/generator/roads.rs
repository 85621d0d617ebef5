//! 阶段 5：道路铺设，以及定稿时把道路单元合并为最少的路段
//!
//! 铺设顺序：先是穿过网格中心的一行一列高速公路（跨河处成为桥梁单元，覆盖公园），
//! 其余单元按主/次间距与局部噪声概率成为干道、集散路或支路；这些道路不会覆盖水域。

use tracing::debug;

use crate::city::{City, Point, RoadClass, RoadSegment};
use crate::rng::{CityRng, NoiseField};

use super::grid::CityGrid;
use super::options::{GeneratorOptions, cells_for};

const ARTERIAL_PROBABILITY: f64 = 0.85;
const COLLECTOR_PROBABILITY: f64 = 0.65;

/// 一段同级道路单元的连续序列
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoadRun {
    pub class: RoadClass,
    pub cells: Vec<(usize, usize)>,
    /// 没有同级邻居的孤立单元
    pub isolated: bool,
}

fn set_road(grid: &mut CityGrid, x: usize, z: usize, class: RoadClass) {
    let cell = grid.get_mut(x, z);
    cell.road = Some(class);
    // 道路优先：高速跨河成为桥梁，铺在公园上的道路移除该公园
    cell.is_water = false;
    cell.is_park = false;
}

/// 返回铺设的道路单元数
pub(crate) fn lay_roads(
    grid: &mut CityGrid,
    opts: &GeneratorOptions,
    variation_noise: &NoiseField,
    rng: &mut CityRng,
) -> usize {
    let (cols, rows) = (grid.cols, grid.rows);
    if cols == 0 || rows == 0 {
        return 0;
    }

    let main_spacing = cells_for(opts.main_road_spacing, grid.cell_size, 3);
    let secondary_spacing = cells_for(opts.secondary_road_spacing, grid.cell_size, 3);
    let local_probability = if opts.local_road_probability.is_finite() {
        opts.local_road_probability
    } else {
        0.0
    };
    let center_col = cols / 2;
    let center_row = rows / 2;

    for x in 0..cols {
        set_road(grid, x, center_row, RoadClass::Highway);
    }
    for z in 0..rows {
        set_road(grid, center_col, z, RoadClass::Highway);
    }

    for (x, z) in grid.coords() {
        let cell = grid.get(x, z);
        if cell.is_road() || cell.is_water {
            continue;
        }

        let major = x % main_spacing == 0 || z % main_spacing == 0;
        if major && rng.chance(ARTERIAL_PROBABILITY) {
            set_road(grid, x, z, RoadClass::Arterial);
            continue;
        }

        let secondary = x % secondary_spacing == 0 || z % secondary_spacing == 0;
        let local_chance =
            local_probability + variation_noise.sample(x as f64 * 0.2, z as f64 * 0.2).max(0.0);
        if secondary && rng.chance(COLLECTOR_PROBABILITY) {
            set_road(grid, x, z, RoadClass::Collector);
        } else if rng.chance(local_chance * 0.35) {
            set_road(grid, x, z, RoadClass::Local);
        }
    }

    let count = grid.cells().iter().filter(|c| c.is_road()).count();
    debug!(count, main_spacing, secondary_spacing, "🛣️  道路铺设完成");
    count
}

/// 把道路单元合并成路段。
///
/// x 主序扫描；对每个未处理的道路单元，取第一个（先 +x 后 +z）有未处理同级邻居的方向，
/// 一直走到等级变化、越界或遇到已处理单元为止。每个道路单元恰好属于一个 run。
pub(crate) fn collect_road_runs(grid: &CityGrid) -> Vec<RoadRun> {
    const DIRECTIONS: [(i64, i64); 2] = [(1, 0), (0, 1)];

    let mut processed = vec![false; grid.cols * grid.rows];
    let idx = |x: usize, z: usize| x * grid.rows + z;
    let mut runs = Vec::new();

    for (x, z) in grid.coords() {
        let Some(class) = grid.get(x, z).road else {
            continue;
        };
        if processed[idx(x, z)] {
            continue;
        }

        let continues = |cx: i64, cz: i64, processed: &[bool]| {
            grid.in_bounds(cx, cz)
                && grid.get(cx as usize, cz as usize).road == Some(class)
                && !processed[idx(cx as usize, cz as usize)]
        };

        let direction = DIRECTIONS
            .iter()
            .copied()
            .find(|&(dx, dz)| continues(x as i64 + dx, z as i64 + dz, &processed));

        let Some((dx, dz)) = direction else {
            processed[idx(x, z)] = true;
            runs.push(RoadRun {
                class,
                cells: vec![(x, z)],
                isolated: true,
            });
            continue;
        };

        let mut cells = Vec::new();
        let (mut cx, mut cz) = (x as i64, z as i64);
        while continues(cx, cz, &processed) {
            processed[idx(cx as usize, cz as usize)] = true;
            cells.push((cx as usize, cz as usize));
            cx += dx;
            cz += dz;
        }
        runs.push(RoadRun {
            class,
            cells,
            isolated: false,
        });
    }

    runs
}

/// 把 run 物化为 RoadSegment 并加入城市（同时累计道路总长）。
pub(crate) fn emit_road_segments(city: &mut City, grid: &CityGrid, runs: &[RoadRun]) {
    let block = grid.cell_size;
    for (i, run) in runs.iter().enumerate() {
        let id = format!("road-{i}");
        let Some(&(sx, sz)) = run.cells.first() else {
            continue;
        };
        let start = grid.get(sx, sz).center();

        let segment = if run.isolated {
            let half = block * 0.5;
            RoadSegment::new(
                id,
                Point::new(start.x - half, start.z - half),
                Point::new(start.x + half, start.z + half),
                block * 0.8,
                if run.class == RoadClass::Highway { 6 } else { 2 },
                run.class,
            )
        } else {
            let &(ex, ez) = run.cells.last().unwrap_or(&(sx, sz));
            let width = if run.class == RoadClass::Highway {
                block * 1.2
            } else {
                block * 0.8
            };
            RoadSegment::new(
                id,
                start,
                grid.get(ex, ez).center(),
                width,
                run.class.lanes(),
                run.class,
            )
        };
        city.add_road(segment);
    }
}
