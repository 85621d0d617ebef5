//! 滚动历史
//!
//! 每 7 天记录一次聚合快照；超过上限时丢弃最旧的记录。

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::stage::Stage;

pub const HISTORY_INTERVAL_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub day: u32,
    pub population: f64,
    pub capacity: u64,
    pub satisfaction: f64,
    pub gdp: f64,
    pub unemployment: f64,
    pub congestion: f64,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    points: VecDeque<HistoryPoint>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            points: VecDeque::new(),
            limit,
        }
    }

    /// 本日是否应记录：首条记录落在 7 的倍数日，之后每隔 7 天一条。
    pub fn is_due(&self, day: u32) -> bool {
        match self.points.back() {
            None => day % HISTORY_INTERVAL_DAYS == 0,
            Some(last) => day >= last.day.saturating_add(HISTORY_INTERVAL_DAYS),
        }
    }

    pub fn record(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.limit {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }
}
