//! 城市仿真模块
//!
//! tick 驱动的仿真：聚合子系统（时间/人口/经济/交通/天气/阶段/灾害/历史）
//! 加上市民与车辆智能体，外加用户编辑操作的唯一入口。

// 子模块声明
mod citizen;
mod disaster;
mod economy;
mod event;
mod history;
mod population;
mod simulation;
mod snapshot;
mod stage;
mod time;
mod traffic;
mod weather;

// 重新导出公共接口
pub use citizen::{Citizen, CitizenId, CitizenState, scheduled_state};
pub use disaster::{ActiveDisaster, DisasterKind};
pub use economy::EconomyState;
pub use event::{EventQueue, SimEvent};
pub use history::{History, HistoryPoint};
pub use population::{POPULATION_FLOOR, PopulationInputs, PopulationState};
pub use simulation::{CitySimulation, SimulationOptions};
pub use snapshot::{CitizenView, ForecastRequest, SimulationSnapshot, VehicleView};
pub use stage::Stage;
pub use time::TimeState;
pub use traffic::{TrafficState, Vehicle, VehicleId, VehicleKind, rush_multiplier};
pub use weather::{WeatherKind, WeatherState};

#[cfg(test)]
pub(crate) use disaster::tick_disasters;
#[cfg(test)]
pub(crate) use traffic::Fleet;
