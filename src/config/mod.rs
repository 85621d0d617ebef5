//! 场景配置
//!
//! JSON 场景文件：种子、生成器覆盖项、仿真选项、运行参数与按 tick 排定的用户操作。

// 子模块声明
mod runner;
mod scenario;

// 重新导出公共接口
pub use runner::{ScenarioRun, run_scenario};
pub use scenario::{RunSpec, SUPPORTED_SCHEMA_VERSION, ScenarioError, ScenarioSpec, ScheduledAction};
