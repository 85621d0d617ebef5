//! 场景文件格式

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::city::CityAction;
use crate::generator::GeneratorOverrides;
use crate::rng::Seed;
use crate::sim::SimulationOptions;

pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scenario schema_version {found} (expected {})", SUPPORTED_SCHEMA_VERSION)]
    UnsupportedSchema { found: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    /// 缺省时由运行方生成随机种子
    #[serde(default)]
    pub seed: Option<Seed>,
    #[serde(default)]
    pub generator: GeneratorOverrides,
    #[serde(default)]
    pub simulation: SimulationOptions,
    #[serde(default)]
    pub run: RunSpec,
    #[serde(default)]
    pub actions: Vec<ScheduledAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSpec {
    pub ticks: u64,
    /// 每个 tick 的墙钟秒数
    pub delta_seconds: f64,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            ticks: 600,
            delta_seconds: 0.5,
        }
    }
}

/// 在第 `at_tick` 个 tick 推进之前应用的操作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub at_tick: u64,
    pub action: CityAction,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            seed: None,
            generator: GeneratorOverrides::default(),
            simulation: SimulationOptions::default(),
            run: RunSpec::default(),
            actions: Vec::new(),
        }
    }
}

impl ScenarioSpec {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScenarioError> {
        let spec: ScenarioSpec = serde_json::from_str(raw)?;
        if spec.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema {
                found: spec.schema_version,
            });
        }
        Ok(spec)
    }
}
