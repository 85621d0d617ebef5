//! 阶段 7：公交线路推导
//!
//! 每隔 `spacing` 列扫描一次，该列上的道路单元依次连成线路，站点按固定子间隔布置。

use crate::city::{Station, TransitLine, TransitMode};
use crate::rng::CityRng;

use super::grid::CityGrid;
use super::options::{GeneratorOptions, cells_for};

/// 少于该点数的线路被丢弃
const MIN_LINE_POINTS: usize = 4;

pub(crate) fn derive_transit_lines(
    grid: &CityGrid,
    opts: &GeneratorOptions,
    rng: &mut CityRng,
) -> Vec<TransitLine> {
    let spacing = cells_for(opts.transit_spacing, grid.cell_size, 5);
    let step = (spacing / 2).max(1);
    let mut lines = Vec::new();

    // 间距远大于网格时 `x + spacing` 会溢出，改用饱和减法比较
    let last = grid.cols.saturating_sub(spacing);
    let mut x = spacing;
    while x < last {
        let line_id = lines.len();
        let mut path = Vec::new();
        let mut stations = Vec::new();

        for z in (0..grid.rows).step_by(step) {
            let cell = grid.get(x, z);
            if !cell.is_road() {
                continue;
            }
            path.push(cell.center());
            if z % spacing == 0 {
                stations.push(Station {
                    position: cell.center(),
                    name: format!("Station {line_id}-{}", stations.len()),
                });
            }
        }

        if path.len() >= MIN_LINE_POINTS {
            let mode = if rng.chance(0.5) {
                TransitMode::Tram
            } else {
                TransitMode::Metro
            };
            lines.push(TransitLine {
                id: format!("transit-{line_id}"),
                path,
                stations,
                mode,
            });
        }
        x += spacing;
    }

    lines
}
