//! 城市规模阶段
//!
//! 五个按人口阈值划分的阶段；每越过一个阈值前进一级。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Village,
    Town,
    City,
    Metropolis,
    Megalopolis,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Village,
        Stage::Town,
        Stage::City,
        Stage::Metropolis,
        Stage::Megalopolis,
    ];

    /// 进入该阶段所需的人口
    pub fn threshold(self) -> f64 {
        match self {
            Stage::Village => 500.0,
            Stage::Town => 5_000.0,
            Stage::City => 25_000.0,
            Stage::Metropolis => 75_000.0,
            Stage::Megalopolis => 200_000.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Village => "village",
            Stage::Town => "town",
            Stage::City => "city",
            Stage::Metropolis => "metropolis",
            Stage::Megalopolis => "megalopolis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Village => "Humble beginnings with dirt roads.",
            Stage::Town => "Organised neighborhoods emerge.",
            Stage::City => "Downtown skyline takes shape.",
            Stage::Metropolis => "Transit-heavy urban core.",
            Stage::Megalopolis => "Futuristic super city.",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Village => Some(Stage::Town),
            Stage::Town => Some(Stage::City),
            Stage::City => Some(Stage::Metropolis),
            Stage::Metropolis => Some(Stage::Megalopolis),
            Stage::Megalopolis => None,
        }
    }
}
