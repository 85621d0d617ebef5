//! 灾害
//!
//! 四类灾害模板；触发后持续 `response_time` 小时，倒计时归零时恰好结束一次。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterKind {
    Fire,
    Flood,
    TrafficJam,
    EconomicRecession,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 4] = [
        DisasterKind::Fire,
        DisasterKind::Flood,
        DisasterKind::TrafficJam,
        DisasterKind::EconomicRecession,
    ];

    /// 每仿真小时的触发概率
    pub fn probability(self) -> f64 {
        match self {
            DisasterKind::Fire => 0.0002,
            DisasterKind::Flood => 0.00015,
            DisasterKind::TrafficJam => 0.0005,
            DisasterKind::EconomicRecession => 0.0001,
        }
    }

    /// 持续时长（小时）
    pub fn response_time(self) -> f64 {
        match self {
            DisasterKind::Fire => 3.0,
            DisasterKind::Flood => 6.0,
            DisasterKind::TrafficJam => 1.5,
            DisasterKind::EconomicRecession => 12.0,
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            DisasterKind::Fire => "localized",
            DisasterKind::Flood => "river",
            DisasterKind::TrafficJam => "roads",
            DisasterKind::EconomicRecession => "economy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDisaster {
    pub id: u64,
    pub kind: DisasterKind,
    /// 剩余小时
    pub remaining: f64,
    pub started_at_day: u32,
}

impl ActiveDisaster {
    pub fn new(id: u64, kind: DisasterKind, day: u32) -> Self {
        Self {
            id,
            kind,
            remaining: kind.response_time(),
            started_at_day: day,
        }
    }
}

/// 倒计时所有进行中的灾害，返回本 tick 结束的灾害。
pub fn tick_disasters(active: &mut Vec<ActiveDisaster>, delta_hours: f64) -> Vec<ActiveDisaster> {
    let mut resolved = Vec::new();
    active.retain_mut(|d| {
        d.remaining -= delta_hours;
        if d.remaining <= 0.0 {
            resolved.push(d.clone());
            false
        } else {
            true
        }
    });
    resolved
}
