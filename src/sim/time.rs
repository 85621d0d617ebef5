//! 仿真时间
//!
//! 墙钟秒数乘以时间倍率换算成仿真小时；小时按 24 取模，跨越午夜时日计数加一。

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: f64 = 24.0;
pub const MIN_TIME_SCALE: f64 = 10.0;
pub const MAX_TIME_SCALE: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeState {
    /// 累计仿真小时
    pub elapsed_hours: f64,
    pub day: u32,
    /// 当日小时，[0, 24)
    pub hour: f64,
    /// 时间倍率：每墙钟秒对应的仿真秒
    pub speed: f64,
}

impl TimeState {
    pub fn new(speed: f64) -> Self {
        Self {
            elapsed_hours: 0.0,
            day: 0,
            hour: 8.0,
            speed,
        }
    }

    /// 一个 tick 对应的仿真小时数；非有限或负数的输入按 0 处理。
    pub fn delta_hours(&self, delta_seconds: f64) -> f64 {
        let hours = delta_seconds / 3600.0 * self.speed;
        if hours.is_finite() && hours > 0.0 {
            hours
        } else {
            0.0
        }
    }

    /// 推进时间，返回跨越的天数。天数饱和到 `u32::MAX`。
    pub fn advance(&mut self, delta_hours: f64) -> u32 {
        self.elapsed_hours += delta_hours;
        let next = self.hour + delta_hours;
        let days = (next / HOURS_PER_DAY).floor() as u32;
        self.hour = next.rem_euclid(HOURS_PER_DAY);
        self.day = self.day.saturating_add(days);
        days
    }

    /// 日常维护中对时间倍率的小幅随机扰动，结果钳制在 [10, 120]。
    pub fn perturb_speed(&mut self, sample: f64) {
        self.speed = (self.speed * (1.0 + (sample - 0.5) * 0.02)).clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }
}
