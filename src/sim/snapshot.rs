//! 对外快照
//!
//! 渲染端/前端每 tick 读取的数据：各子系统状态的拷贝、前 200 个市民与前 300 辆车。

use serde::{Deserialize, Serialize};

use crate::city::Point;

use super::citizen::{Citizen, CitizenState};
use super::disaster::ActiveDisaster;
use super::economy::EconomyState;
use super::event::SimEvent;
use super::history::HistoryPoint;
use super::population::PopulationState;
use super::stage::Stage;
use super::time::TimeState;
use super::traffic::{TrafficState, Vehicle, VehicleKind};
use super::weather::WeatherState;

pub const SNAPSHOT_CITIZENS: usize = 200;
pub const SNAPSHOT_VEHICLES: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenView {
    pub id: String,
    pub position: Point,
    pub state: CitizenState,
}

impl From<&Citizen> for CitizenView {
    fn from(c: &Citizen) -> Self {
        Self {
            id: format!("citizen-{}", c.id.0),
            position: c.position,
            state: c.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: String,
    pub position: Point,
    pub kind: VehicleKind,
}

impl From<&Vehicle> for VehicleView {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: format!("vehicle-{}", v.id.0),
            position: v.position,
            kind: v.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub time: TimeState,
    pub population: PopulationState,
    pub economy: EconomyState,
    pub traffic: TrafficState,
    pub weather: WeatherState,
    pub stage: Stage,
    pub disasters: Vec<ActiveDisaster>,
    pub history: Vec<HistoryPoint>,
    pub citizens: Vec<CitizenView>,
    pub vehicles: Vec<VehicleView>,
    pub events: Vec<SimEvent>,
}

/// 交给外部预测工作者的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub population: f64,
    pub capacity: u64,
    pub satisfaction: f64,
    pub gdp: f64,
    pub trend: f64,
    pub growth_rate: f64,
}
