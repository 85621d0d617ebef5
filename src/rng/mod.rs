//! 确定性随机数与噪声场
//!
//! 生成与仿真中的每一个随机决策都来自这里：
//! - `CityRng`：显式持有 32 位状态的伪随机流（mulberry32 混合）
//! - `NoiseField`：按流名播种的相干噪声，支持多倍频叠加
//!
//! 相同的种子在任意平台上都得到逐位一致的结果。

// 子模块声明
mod noise;
mod prng;
mod seed;

// 重新导出公共接口
pub use noise::NoiseField;
pub use prng::CityRng;
pub use seed::{Seed, hash_seed};
