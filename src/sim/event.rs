//! 仿真事件队列
//!
//! 阶段提升、灾害开始/结束与用户操作都会入队；`drain` 一次性取走全部事件。
//! 队列只服务一个消费者。

use serde::{Deserialize, Serialize};

use crate::city::CityAction;

use super::disaster::ActiveDisaster;
use super::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SimEvent {
    CityStage {
        stage: Stage,
        description: String,
        day: u32,
    },
    Disaster {
        disaster: ActiveDisaster,
    },
    DisasterResolved {
        disaster: ActiveDisaster,
    },
    UserAction {
        action: CityAction,
    },
}

impl SimEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::CityStage { .. } => "city-stage",
            SimEvent::Disaster { .. } => "disaster",
            SimEvent::DisasterResolved { .. } => "disaster-resolved",
            SimEvent::UserAction { .. } => "user-action",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueue {
    pending: Vec<SimEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push(event);
    }

    /// 取走全部待处理事件（按入队顺序），队列随之清空。
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.pending.iter()
    }
}
