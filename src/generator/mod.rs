//! 城市生成器
//!
//! 多阶段流水线：网格 → 分区 → 河流 → 公园 → 道路 → 建筑 → 公交 → 定稿。
//! 每个阶段消费并扩展同一张可变网格；所有随机决策都来自种子派生的随机流/噪声，
//! 因此整条流水线是 (seed, options) 的纯函数。

// 子模块声明
mod buildings;
mod districts;
mod finalize;
mod grid;
mod options;
mod parks;
mod roads;
mod transit;
mod water;

// 重新导出公共接口
pub use options::{GeneratorOptions, GeneratorOverrides};

pub(crate) use grid::CityGrid;
pub(crate) use roads::collect_road_runs;

#[cfg(test)]
pub(crate) use buildings::{building_attributes, estimate_jobs, estimate_population, select_category};
#[cfg(test)]
pub(crate) use districts::classify;

use tracing::{debug, info};

use crate::city::City;
use crate::rng::{CityRng, NoiseField, Seed};

use finalize::{GenerationArtifacts, finalize_city};

/// 生成用的随机流集合：主随机流 + 五个命名噪声子流
struct GenerationStreams {
    rng: CityRng,
    base: NoiseField,
    district: NoiseField,
    variation: NoiseField,
    park: NoiseField,
    river: NoiseField,
}

impl GenerationStreams {
    fn new(seed: &Seed) -> Self {
        Self {
            rng: CityRng::from_seed(seed),
            base: NoiseField::for_stream(seed, "base"),
            district: NoiseField::for_stream(seed, "district"),
            variation: NoiseField::for_stream(seed, "variation"),
            park: NoiseField::for_stream(seed, "park"),
            river: NoiseField::for_stream(seed, "river"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CityGenerator {
    options: GeneratorOptions,
}

impl CityGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// 生成城市。`seed` 为 None 时使用新的随机种子。
    pub fn generate(&self, seed: Option<Seed>, overrides: &GeneratorOverrides) -> City {
        self.generate_with_grid(seed, overrides).0
    }

    /// 同 `generate`，额外返回生成期网格（供 crate 内测试检查单元分类）。
    #[tracing::instrument(skip(self, overrides))]
    pub(crate) fn generate_with_grid(
        &self,
        seed: Option<Seed>,
        overrides: &GeneratorOverrides,
    ) -> (City, CityGrid) {
        let options = self.options.with_overrides(overrides);
        let seed = seed.unwrap_or_else(Seed::random);
        info!(seed = %seed, width = options.width, height = options.height, "🏙️  开始生成城市");

        let mut streams = GenerationStreams::new(&seed);
        let mut city = City::new(options.width, options.height, options.block(), seed);

        let mut grid = CityGrid::new(&options);
        debug!(cols = grid.cols, rows = grid.rows, "网格初始化");

        let clusters =
            districts::assign_districts(&mut grid, &options, &streams.district, &streams.variation);
        debug!(clusters = clusters.len(), "分区分配完成");

        let river = water::carve_water(&mut grid, &options, &streams.river);
        let mut parks = parks::place_parks(&mut grid, &options, &streams.park, &mut streams.rng);
        debug!(parks = parks.len(), "公园播种完成");

        roads::lay_roads(&mut grid, &options, &streams.variation, &mut streams.rng);
        let placement = buildings::place_buildings(
            &mut grid,
            &options,
            &clusters,
            &streams.base,
            &mut parks,
            &mut streams.rng,
        );
        debug!(
            buildings = placement.buildings.len(),
            plazas = placement.plazas.len(),
            "建筑放置完成"
        );

        let transit = transit::derive_transit_lines(&grid, &options, &mut streams.rng);
        let runs = collect_road_runs(&grid);

        finalize_city(
            &mut city,
            &grid,
            GenerationArtifacts {
                clusters,
                river,
                parks,
                runs,
                placement,
                transit,
            },
        );

        info!(
            districts = city.districts.len(),
            roads = city.roads.len(),
            buildings = city.buildings.len(),
            parks = city.parks.len(),
            transit_lines = city.transit_lines.len(),
            population_capacity = city.metadata.population_capacity,
            job_capacity = city.metadata.job_capacity,
            "✅ 城市生成完成"
        );
        (city, grid)
    }
}
