//! 空间索引模块
//!
//! 均匀网格空间哈希：城市实体的静态查找与仿真智能体每 tick 的邻居查询共用一套实现。

mod bounds;
mod hash;

pub use bounds::Bounds;
pub use hash::SpatialHash;
