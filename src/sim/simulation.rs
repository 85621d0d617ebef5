//! 城市仿真器
//!
//! 持有一个 City，按固定顺序推进各子系统：
//! 时间 → 人口 → 经济 → 天气 → 交通/车辆 → 市民 → 灾害倒计时 → 历史 → 随机灾害。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::city::{ActionOutcome, City, CityAction, Point};
use crate::rng::{CityRng, Seed};
use crate::spatial::Bounds;

use super::citizen::{Citizen, Crowd};
use super::disaster::{ActiveDisaster, DisasterKind, tick_disasters};
use super::economy::EconomyState;
use super::event::{EventQueue, SimEvent};
use super::history::{History, HistoryPoint};
use super::population::{PopulationInputs, PopulationState};
use super::snapshot::{
    CitizenView, ForecastRequest, SNAPSHOT_CITIZENS, SNAPSHOT_VEHICLES, SimulationSnapshot,
    VehicleView,
};
use super::stage::Stage;
use super::time::TimeState;
use super::traffic::{Fleet, TrafficState};
use super::weather::{WeatherKind, WeatherState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// 每墙钟秒对应的仿真秒
    pub time_scale: f64,
    pub initial_citizens: usize,
    /// 缺省时使用城市种子
    pub seed: Option<Seed>,
    pub history_limit: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            time_scale: 30.0,
            initial_citizens: 150,
            seed: None,
            history_limit: 104,
        }
    }
}

pub struct CitySimulation {
    pub(crate) city: City,
    pub(crate) rng: CityRng,
    pub(crate) time: TimeState,
    pub(crate) population: PopulationState,
    pub(crate) economy: EconomyState,
    pub(crate) traffic: TrafficState,
    pub(crate) weather: WeatherState,
    pub(crate) stage: Stage,
    pub(crate) disasters: Vec<ActiveDisaster>,
    pub(crate) history: History,
    pub(crate) events: EventQueue,
    pub(crate) crowd: Crowd,
    pub(crate) fleet: Fleet,
    next_disaster_id: u64,
}

impl CitySimulation {
    pub fn new(city: City, options: SimulationOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| city.seed.clone());
        let mut rng = CityRng::substream(&seed, "sim");
        let crowd = Crowd::populate(&city, options.initial_citizens, &mut rng);
        let population = PopulationState::new(city.metadata.population_capacity);

        info!(
            seed = %seed,
            citizens = crowd.len(),
            population = population.total,
            capacity = population.capacity,
            "🚦 仿真初始化"
        );

        Self {
            city,
            rng,
            time: TimeState::new(options.time_scale),
            population,
            economy: EconomyState::default(),
            traffic: TrafficState::default(),
            weather: WeatherState::default(),
            stage: Stage::Village,
            disasters: Vec::new(),
            history: History::new(options.history_limit),
            events: EventQueue::default(),
            crowd,
            fleet: Fleet::default(),
            next_disaster_id: 0,
        }
    }

    /// 推进一个 tick。非有限或负的 `delta_seconds` 按 0 处理。
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, delta_seconds: f64) {
        let delta_hours = self.time.delta_hours(delta_seconds);

        // 一个 tick 跨越多天时日常维护也只跑一次
        if self.time.advance(delta_hours) > 0 {
            self.daily_maintenance();
        }

        self.update_population(delta_hours);
        self.economy.step(
            self.population.total,
            self.population.capacity,
            self.city.metadata.job_capacity,
            delta_hours,
        );
        self.weather.step(&mut self.rng, delta_hours);

        let jammed = self
            .disasters
            .iter()
            .any(|d| d.kind == DisasterKind::TrafficJam);
        self.traffic.step(
            self.population.total,
            self.city.metadata.road_length,
            self.time.hour,
            jammed,
            delta_hours,
        );
        self.fleet
            .step(&self.city.roads, self.population.total, &mut self.rng, delta_hours);
        self.crowd.step(self.time.hour, delta_hours, &self.fleet);

        for disaster in tick_disasters(&mut self.disasters, delta_hours) {
            info!(id = disaster.id, kind = ?disaster.kind, "✅ 灾害结束");
            self.events.push(SimEvent::DisasterResolved { disaster });
        }

        self.record_history();
        self.maybe_trigger_disasters(delta_hours);
    }

    fn daily_maintenance(&mut self) {
        self.population.recount_homeless();
        let sample = self.rng.next_f64();
        self.time.perturb_speed(sample);
        debug!(
            day = self.time.day,
            homeless = self.population.homeless,
            speed = self.time.speed,
            "日常维护"
        );
    }

    fn update_population(&mut self, delta_hours: f64) {
        let inputs = PopulationInputs {
            job_capacity: self.city.metadata.job_capacity,
            green_space: self.city.metadata.green_space,
            city_area: self.city.area(),
        };
        self.population.drift_satisfaction(&inputs, delta_hours);
        self.population.grow(delta_hours);

        while let Some(next) = self.stage.next() {
            if self.population.total < next.threshold() {
                break;
            }
            self.stage = next;
            info!(stage = ?next, population = self.population.total, "🏙️  城市阶段提升");
            self.events.push(SimEvent::CityStage {
                stage: next,
                description: next.description().to_string(),
                day: self.time.day,
            });
        }
    }

    fn record_history(&mut self) {
        if !self.history.is_due(self.time.day) {
            return;
        }
        self.history.record(HistoryPoint {
            day: self.time.day,
            population: self.population.total,
            capacity: self.population.capacity,
            satisfaction: self.population.satisfaction,
            gdp: self.economy.gdp,
            unemployment: self.economy.unemployment,
            congestion: self.traffic.congestion,
            stage: self.stage,
        });
    }

    fn maybe_trigger_disasters(&mut self, delta_hours: f64) {
        for kind in DisasterKind::ALL {
            if self.rng.next_f64() < kind.probability() * delta_hours {
                self.trigger_disaster(kind);
            }
        }
    }

    /// 立即触发一场灾害并施加其一次性影响；每第 5 个市民开始疏散。
    pub fn trigger_disaster(&mut self, kind: DisasterKind) -> ActiveDisaster {
        let disaster = ActiveDisaster::new(self.next_disaster_id, kind, self.time.day);
        self.next_disaster_id += 1;
        self.disasters.push(disaster.clone());
        self.events.push(SimEvent::Disaster {
            disaster: disaster.clone(),
        });

        match kind {
            DisasterKind::Fire => {
                if self.rng.index(self.city.buildings.len()).is_some() {
                    self.population.satisfaction = (self.population.satisfaction - 0.05).max(0.1);
                    self.economy.property_value_index *= 0.98;
                }
            }
            DisasterKind::Flood => {
                self.weather.current = WeatherKind::Rain;
                self.weather.intensity = 1.0;
            }
            DisasterKind::TrafficJam => {
                self.traffic.congestion = (self.traffic.congestion + 0.3).min(1.0);
            }
            DisasterKind::EconomicRecession => {
                self.economy.trend -= 0.05;
                self.economy.gdp *= 0.97;
            }
        }

        let safe_zone = self
            .city
            .parks
            .first()
            .map(|p| p.position)
            .unwrap_or(Point::ORIGIN);
        let evacuated = self.crowd.evacuate_every_fifth(safe_zone);
        info!(
            id = disaster.id,
            kind = ?kind,
            impact = kind.impact(),
            evacuated,
            "⚠️  灾害发生"
        );
        disaster
    }

    /// 应用用户操作：先修改城市，再同步人口容量/满意度，并记录 `user-action` 事件。
    pub fn apply_action(&mut self, action: &CityAction) -> ActionOutcome {
        let outcome = self.city.apply_action(action);
        match outcome {
            ActionOutcome::Built { .. } | ActionOutcome::Cleared(_) => {
                self.population.capacity = self.city.metadata.population_capacity;
            }
            ActionOutcome::RoadAdded { .. } => {
                self.population.satisfaction = (self.population.satisfaction + 0.01).min(1.0);
            }
            ActionOutcome::ParkAdded { .. } => {
                self.population.satisfaction = (self.population.satisfaction + 0.03).min(1.0);
            }
            ActionOutcome::Ignored => {
                debug!(id = %action.id, kind = action.type_name(), "操作缺少必需字段，已忽略");
            }
        }
        self.events.push(SimEvent::UserAction {
            action: action.clone(),
        });
        outcome
    }

    /// 拷贝当前状态并取走所有待处理事件。
    pub fn snapshot(&mut self) -> SimulationSnapshot {
        SimulationSnapshot {
            time: self.time.clone(),
            population: self.population.clone(),
            economy: self.economy.clone(),
            traffic: self.traffic.clone(),
            weather: self.weather.clone(),
            stage: self.stage,
            disasters: self.disasters.clone(),
            history: self.history.to_vec(),
            citizens: self
                .crowd
                .citizens()
                .iter()
                .take(SNAPSHOT_CITIZENS)
                .map(CitizenView::from)
                .collect(),
            vehicles: self
                .fleet
                .vehicles()
                .iter()
                .take(SNAPSHOT_VEHICLES)
                .map(VehicleView::from)
                .collect(),
            events: self.events.drain(),
        }
    }

    pub fn forecast_request(&self) -> ForecastRequest {
        ForecastRequest {
            population: self.population.total,
            capacity: self.population.capacity,
            satisfaction: self.population.satisfaction,
            gdp: self.economy.gdp,
            trend: self.economy.trend,
            growth_rate: self.population.growth_rate,
        }
    }

    /// 调整时间倍率（负数与 NaN 按 0 处理）
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time.speed = if scale.is_nan() { 0.0 } else { scale.max(0.0) };
    }

    pub fn citizens_within(&self, bounds: &Bounds) -> Vec<&Citizen> {
        self.crowd.within(bounds)
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn into_city(self) -> City {
        self.city
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn population(&self) -> &PopulationState {
        &self.population
    }

    pub fn economy(&self) -> &EconomyState {
        &self.economy
    }

    pub fn traffic(&self) -> &TrafficState {
        &self.traffic
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn disasters(&self) -> &[ActiveDisaster] {
        &self.disasters
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn citizens(&self) -> &[Citizen] {
        self.crowd.citizens()
    }

    pub fn vehicles(&self) -> &[super::traffic::Vehicle] {
        self.fleet.vehicles()
    }

    /// 尚未被 `snapshot` 取走的事件数
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
