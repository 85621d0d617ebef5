//! 市民智能体
//!
//! 每个市民按一天中的小时在家/通勤/工作/休闲之间切换；
//! 疏散状态覆盖日程，直到抵达安全区后的下一个 tick 才恢复。

use serde::{Deserialize, Serialize};

use crate::city::{City, Point};
use crate::rng::CityRng;
use crate::spatial::{Bounds, SpatialHash};

use super::traffic::Fleet;

pub const CITIZEN_CELL_SIZE: f64 = 80.0;
pub const CITIZEN_RADIUS: f64 = 5.0;
/// 每仿真小时的步行距离
pub const WALK_SPEED: f64 = 40.0;
const AVOIDANCE_RANGE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CitizenId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenState {
    Home,
    Commuting,
    Working,
    Leisure,
    Evacuating,
}

/// 日程表：[7,9) 与 [17,19) 通勤，[9,17) 工作，[19,22) 休闲，其余在家
pub fn scheduled_state(hour: f64) -> CitizenState {
    if (7.0..9.0).contains(&hour) || (17.0..19.0).contains(&hour) {
        CitizenState::Commuting
    } else if (9.0..17.0).contains(&hour) {
        CitizenState::Working
    } else if (19.0..22.0).contains(&hour) {
        CitizenState::Leisure
    } else {
        CitizenState::Home
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    pub home: Point,
    pub workplace: Point,
    pub leisure: Point,
    pub state: CitizenState,
    pub position: Point,
    pub destination: Point,
    pub energy: f64,
    pub satisfaction: f64,
}

impl Citizen {
    pub fn new(id: CitizenId, home: Point, workplace: Point, leisure: Point, satisfaction: f64) -> Self {
        Self {
            id,
            home,
            workplace,
            leisure,
            state: CitizenState::Home,
            position: home,
            destination: home,
            energy: 1.0,
            satisfaction,
        }
    }

    pub fn evacuate(&mut self, safe_zone: Point) {
        self.state = CitizenState::Evacuating;
        self.destination = safe_zone;
    }

    fn resolve_destination(&self) -> Point {
        match self.state {
            CitizenState::Commuting => {
                if self.destination == self.home {
                    self.workplace
                } else {
                    self.home
                }
            }
            CitizenState::Working => self.workplace,
            CitizenState::Leisure => self.leisure,
            CitizenState::Home | CitizenState::Evacuating => self.home,
        }
    }

    /// 推进一个 tick。`avoid` 返回当前位置附近车辆产生的排斥向量。
    pub fn step(&mut self, hour: f64, delta_hours: f64, avoid: impl Fn(Point) -> (f64, f64)) {
        if self.state == CitizenState::Evacuating {
            if self.position != self.destination {
                self.move_towards(delta_hours, &avoid);
                return;
            }
            // 已抵达安全区，交还给日程
        }

        let scheduled = scheduled_state(hour);
        if scheduled != self.state {
            self.state = scheduled;
            self.destination = self.resolve_destination();
        }

        if matches!(self.state, CitizenState::Commuting | CitizenState::Leisure) {
            self.move_towards(delta_hours, &avoid);
        }

        match self.state {
            CitizenState::Working => {
                self.energy = (self.energy + delta_hours * 0.02).min(1.0);
                self.satisfaction = (self.satisfaction + delta_hours * 0.01).min(1.0);
            }
            CitizenState::Commuting => {
                self.energy = (self.energy - delta_hours * 0.05).max(0.0);
            }
            _ => {}
        }
    }

    fn move_towards(&mut self, delta_hours: f64, avoid: &impl Fn(Point) -> (f64, f64)) {
        let step = WALK_SPEED * delta_hours;
        let target = self.destination;
        let distance = self.position.distance_to(target);
        if distance == 0.0 || distance < step {
            self.position = target;
            return;
        }
        let (nx, nz) = (
            (target.x - self.position.x) / distance,
            (target.z - self.position.z) / distance,
        );
        let (ax, az) = avoid(self.position);
        self.position.x += (nx + ax) * step;
        self.position.z += (nz + az) * step;
    }
}

/// 附近车辆的反平方排斥：只计 1 < d² < 900 的车辆
pub fn avoidance(from: Point, fleet: &Fleet) -> (f64, f64) {
    fleet
        .positions_within(&Bounds::around(from, AVOIDANCE_RANGE))
        .fold((0.0, 0.0), |(ax, az), vehicle| {
            let dx = from.x - vehicle.x;
            let dz = from.z - vehicle.z;
            let dist_sq = dx * dx + dz * dz;
            if dist_sq > 1.0 && dist_sq < 900.0 {
                (ax + dx / dist_sq, az + dz / dist_sq)
            } else {
                (ax, az)
            }
        })
}

/// 市民群体及其空间索引
#[derive(Debug, Clone)]
pub struct Crowd {
    citizens: Vec<Citizen>,
    index: SpatialHash<CitizenId>,
}

impl Crowd {
    /// 从城市的住宅/工作地/休闲点中抽取 `count` 个市民。
    ///
    /// 住宅缺失时退回任意建筑，再退回原点；工作地与休闲点缺失时退回住宅。
    pub fn populate(city: &City, count: usize, rng: &mut CityRng) -> Self {
        let mut housing: Vec<Point> = city
            .buildings
            .iter()
            .filter(|b| b.category.is_housing())
            .map(|b| b.position)
            .collect();
        if housing.is_empty() {
            housing = city.buildings.iter().map(|b| b.position).collect();
        }
        let workplaces: Vec<Point> = city
            .buildings
            .iter()
            .filter(|b| b.job_capacity > 0)
            .map(|b| b.position)
            .collect();
        let leisure_spots: Vec<Point> = city
            .parks
            .iter()
            .map(|p| p.position)
            .chain(city.landmarks.iter().map(|l| l.position))
            .collect();

        let mut crowd = Self {
            citizens: Vec::with_capacity(count),
            index: SpatialHash::new(CITIZEN_CELL_SIZE),
        };
        for i in 0..count {
            let home = rng.pick(&housing).copied().unwrap_or(Point::ORIGIN);
            let work = rng.pick(&workplaces).copied().unwrap_or(home);
            let leisure = rng.pick(&leisure_spots).copied().unwrap_or(home);
            let satisfaction = 0.5 + rng.next_f64() * 0.5;
            let citizen = Citizen::new(CitizenId(i as u32), home, work, leisure, satisfaction);
            crowd
                .index
                .insert(citizen.id, &Bounds::around(citizen.position, CITIZEN_RADIUS));
            crowd.citizens.push(citizen);
        }
        crowd
    }

    pub fn citizens(&self) -> &[Citizen] {
        &self.citizens
    }

    pub fn len(&self) -> usize {
        self.citizens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
    }

    pub fn step(&mut self, hour: f64, delta_hours: f64, fleet: &Fleet) {
        for citizen in &mut self.citizens {
            self.index
                .remove(citizen.id, &Bounds::around(citizen.position, CITIZEN_RADIUS));
            citizen.step(hour, delta_hours, |from| avoidance(from, fleet));
            self.index
                .insert(citizen.id, &Bounds::around(citizen.position, CITIZEN_RADIUS));
        }
    }

    /// 每第 5 个市民（下标 0, 5, 10, ...）前往安全区
    pub fn evacuate_every_fifth(&mut self, safe_zone: Point) -> usize {
        let mut count = 0;
        for citizen in self.citizens.iter_mut().step_by(5) {
            citizen.evacuate(safe_zone);
            count += 1;
        }
        count
    }

    /// 包围盒与 `bounds` 相交的市民（先取候选桶，再做精确相交过滤）
    pub fn within(&self, bounds: &Bounds) -> Vec<&Citizen> {
        self.index
            .query_range(bounds)
            .into_iter()
            .filter_map(|id| self.citizens.get(id.0 as usize))
            .filter(|c| Bounds::around(c.position, CITIZEN_RADIUS).intersects(bounds))
            .collect()
    }
}
