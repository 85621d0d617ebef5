//! 天气马尔可夫链
//!
//! 计时器归零时按转移表重新抽取目标天气；强度向 1（目标不同）或 0 缓动，
//! 超过 0.8 时当前天气切换为目标。

use serde::{Deserialize, Serialize};

use crate::rng::CityRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    Clear,
    Rain,
    Fog,
    Snow,
}

/// 每种天气的出边及权重
const TRANSITIONS: [(WeatherKind, &[(WeatherKind, f64)]); 4] = [
    (
        WeatherKind::Clear,
        &[
            (WeatherKind::Rain, 0.4),
            (WeatherKind::Fog, 0.2),
            (WeatherKind::Snow, 0.1),
            (WeatherKind::Clear, 0.3),
        ],
    ),
    (
        WeatherKind::Rain,
        &[
            (WeatherKind::Clear, 0.4),
            (WeatherKind::Fog, 0.2),
            (WeatherKind::Snow, 0.15),
            (WeatherKind::Rain, 0.25),
        ],
    ),
    (
        WeatherKind::Fog,
        &[
            (WeatherKind::Clear, 0.5),
            (WeatherKind::Rain, 0.3),
            (WeatherKind::Fog, 0.2),
        ],
    ),
    (
        WeatherKind::Snow,
        &[
            (WeatherKind::Clear, 0.35),
            (WeatherKind::Fog, 0.25),
            (WeatherKind::Snow, 0.4),
        ],
    ),
];

impl WeatherKind {
    pub fn transitions(self) -> &'static [(WeatherKind, f64)] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, edges)| *edges)
            .unwrap_or(&[])
    }

    /// 按权重抽取下一个天气；累加未命中（浮点误差）时保持当前天气。
    pub fn sample_next(self, rng: &mut CityRng) -> WeatherKind {
        let edges = self.transitions();
        let total: f64 = edges.iter().map(|(_, w)| w).sum();
        let sample = rng.next_f64() * total;
        let mut acc = 0.0;
        for &(to, weight) in edges {
            acc += weight;
            if sample <= acc {
                return to;
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: WeatherKind,
    pub target: WeatherKind,
    pub intensity: f64,
    pub transition_timer: f64,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: WeatherKind::Clear,
            target: WeatherKind::Clear,
            intensity: 0.0,
            transition_timer: 0.0,
        }
    }
}

impl WeatherState {
    pub fn step(&mut self, rng: &mut CityRng, delta_hours: f64) {
        self.transition_timer -= delta_hours;
        if self.transition_timer <= 0.0 {
            self.target = self.current.sample_next(rng);
            self.transition_timer = 12.0 + rng.next_f64() * 12.0;
        }

        let goal = if self.target == self.current { 0.0 } else { 1.0 };
        let ease = (0.1 * delta_hours).min(1.0);
        self.intensity += (goal - self.intensity) * ease;
        if self.intensity > 0.8 {
            self.current = self.target;
            self.intensity = 0.4;
        }
    }
}
