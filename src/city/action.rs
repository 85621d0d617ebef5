//! 用户编辑操作
//!
//! `CityAction` 由编辑来源（本地 UI 或远端协作）创建，对 City 与 Simulation 各应用一次。
//! 缺省的可选字段回落到固定默认值；缺少必需字段（位置/端点）的操作静默忽略。

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::entities::{Building, Park, RoadSegment};
use super::model::{City, RemovedCapacity};
use super::types::{BuildingCategory, Footprint, Point, RoadClass};

const DEFAULT_BUILD_FOOTPRINT: Footprint = Footprint {
    width: 40.0,
    depth: 32.0,
};
const DEFAULT_ROAD_LENGTH: f64 = 100.0;
const DEFAULT_PARK_RADIUS: f64 = 45.0;
const DEFAULT_CLEAR_RADIUS: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityAction {
    pub id: String,
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(default)]
    pub author: String,
    /// 创建时间（Unix 毫秒）
    #[serde(default)]
    pub timestamp: u64,
}

impl CityAction {
    pub fn new(id: impl Into<String>, kind: ActionKind, author: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            id: id.into(),
            kind,
            author: author.into(),
            timestamp,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ActionKind::Build(_) => "build",
            ActionKind::Road(_) => "road",
            ActionKind::Park(_) => "park",
            ActionKind::Clear(_) => "clear",
        }
    }
}

/// 操作类型及其载荷：JSON 中为 `"type"` + `"payload"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ActionKind {
    Build(BuildPayload),
    Road(RoadPayload),
    Park(ParkPayload),
    Clear(ClearPayload),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPayload {
    pub position: Option<Point>,
    pub footprint: Option<Footprint>,
    pub height: Option<f64>,
    pub floors: Option<u32>,
    pub color: Option<String>,
    pub category: Option<BuildingCategory>,
    pub district_id: Option<String>,
    pub population_capacity: Option<u64>,
    pub job_capacity: Option<u64>,
    pub quality: Option<f64>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadPayload {
    pub from: Option<Point>,
    pub to: Option<Point>,
    /// 覆盖端点距离作为道路长度
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub lanes: Option<u32>,
    #[serde(rename = "type")]
    pub class: Option<RoadClass>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkPayload {
    pub position: Option<Point>,
    pub radius: Option<f64>,
    pub has_water_feature: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearPayload {
    pub position: Option<Point>,
    pub radius: Option<f64>,
}

/// 操作对城市产生的实际效果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    Built {
        population_capacity: u64,
        job_capacity: u64,
    },
    RoadAdded {
        length: f64,
    },
    ParkAdded {
        area: f64,
    },
    Cleared(RemovedCapacity),
    /// 载荷缺少必需字段，什么也没做
    Ignored,
}

impl City {
    /// 把一个操作应用到城市实体与元数据上。
    pub fn apply_action(&mut self, action: &CityAction) -> ActionOutcome {
        let outcome = match &action.kind {
            ActionKind::Build(p) => self.apply_build(&action.id, p),
            ActionKind::Road(p) => self.apply_road(&action.id, p),
            ActionKind::Park(p) => self.apply_park(&action.id, p),
            ActionKind::Clear(p) => self.apply_clear(p),
        };
        debug!(id = %action.id, kind = action.type_name(), ?outcome, "应用用户操作");
        outcome
    }

    fn apply_build(&mut self, id: &str, p: &BuildPayload) -> ActionOutcome {
        let Some(position) = p.position else {
            return ActionOutcome::Ignored;
        };
        let district_id = p
            .district_id
            .clone()
            .or_else(|| self.districts.first().map(|d| d.id.clone()))
            .unwrap_or_else(|| "district-0".to_string());
        let building = Building {
            id: format!("user-building-{id}"),
            position,
            footprint: p.footprint.unwrap_or(DEFAULT_BUILD_FOOTPRINT),
            height: p.height.unwrap_or(60.0),
            floors: p.floors.unwrap_or(16),
            color: p.color.clone().unwrap_or_else(|| "#60a5fa".to_string()),
            category: p.category.unwrap_or(BuildingCategory::Apartment),
            district_id,
            population_capacity: p.population_capacity.unwrap_or(0),
            job_capacity: p.job_capacity.unwrap_or(0),
            quality: p.quality.unwrap_or(0.7),
            style: p.style.clone().unwrap_or_else(|| "custom".to_string()),
        };
        let outcome = ActionOutcome::Built {
            population_capacity: building.population_capacity,
            job_capacity: building.job_capacity,
        };
        self.add_building(building);
        outcome
    }

    fn apply_road(&mut self, id: &str, p: &RoadPayload) -> ActionOutcome {
        let (Some(from), Some(to)) = (p.from, p.to) else {
            return ActionOutcome::Ignored;
        };
        let mut road = RoadSegment::new(
            format!("user-road-{id}"),
            from,
            to,
            p.width.unwrap_or(20.0),
            p.lanes.unwrap_or(2),
            p.class.unwrap_or(RoadClass::Local),
        );
        let length = p.length.unwrap_or(road.length);
        road.length = if length.is_finite() && length > 0.0 {
            length
        } else {
            DEFAULT_ROAD_LENGTH
        };
        let outcome = ActionOutcome::RoadAdded {
            length: road.length,
        };
        self.add_road(road);
        outcome
    }

    fn apply_park(&mut self, id: &str, p: &ParkPayload) -> ActionOutcome {
        let Some(position) = p.position else {
            return ActionOutcome::Ignored;
        };
        let radius = p
            .radius
            .filter(|r| r.is_finite() && *r >= 0.0)
            .unwrap_or(DEFAULT_PARK_RADIUS);
        let park = Park::new(
            format!("user-park-{id}"),
            position,
            radius,
            p.has_water_feature.unwrap_or(false),
        );
        let outcome = ActionOutcome::ParkAdded { area: park.area };
        self.add_park(park);
        outcome
    }

    fn apply_clear(&mut self, p: &ClearPayload) -> ActionOutcome {
        let Some(position) = p.position else {
            return ActionOutcome::Ignored;
        };
        let radius = p
            .radius
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_CLEAR_RADIUS);
        ActionOutcome::Cleared(self.remove_buildings_within(position, radius))
    }
}
