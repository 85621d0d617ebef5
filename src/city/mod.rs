//! 城市数据模型
//!
//! 生成器产出、仿真与用户操作就地修改的实体图。
//! 元数据总量始终等于各实体贡献之和，在每次增删时增量维护。

// 子模块声明
mod action;
mod entities;
mod model;
mod types;

// 重新导出公共接口
pub use action::{
    ActionKind, ActionOutcome, BuildPayload, CityAction, ClearPayload, ParkPayload, RoadPayload,
};
pub use entities::{Building, District, Landmark, Park, RoadSegment, Station, TransitLine, WaterBody};
pub use model::{City, CityMetadata, RemovedCapacity};
pub use types::{BuildingCategory, DistrictType, Footprint, Point, RoadClass, TransitMode};
