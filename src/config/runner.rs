//! 场景执行：生成城市，逐 tick 推进仿真，并在排定的 tick 之前应用操作。

use tracing::{info, warn};

use crate::city::ActionOutcome;
use crate::generator::CityGenerator;
use crate::rng::Seed;
use crate::sim::CitySimulation;

use super::scenario::ScenarioSpec;

/// 运行结束后的仿真与操作统计
pub struct ScenarioRun {
    pub simulation: CitySimulation,
    pub applied_actions: usize,
    pub ignored_actions: usize,
    /// `at_tick` 超出运行长度而未执行的操作
    pub skipped_actions: usize,
}

#[tracing::instrument(skip(generator, spec), fields(ticks = spec.run.ticks))]
pub fn run_scenario(generator: &CityGenerator, spec: &ScenarioSpec) -> ScenarioRun {
    let seed = spec.seed.clone().unwrap_or_else(Seed::random);
    let city = generator.generate(Some(seed), &spec.generator);
    let mut simulation = CitySimulation::new(city, spec.simulation.clone());

    // 同一 tick 的操作保持文件中的顺序
    let mut schedule: Vec<_> = spec.actions.iter().collect();
    schedule.sort_by_key(|s| s.at_tick);
    let mut pending = schedule.into_iter().peekable();

    let mut applied_actions = 0;
    let mut ignored_actions = 0;
    info!(ticks = spec.run.ticks, delta_seconds = spec.run.delta_seconds, "▶️  开始运行场景");
    for tick in 0..spec.run.ticks {
        while let Some(scheduled) = pending.next_if(|s| s.at_tick <= tick) {
            match simulation.apply_action(&scheduled.action) {
                ActionOutcome::Ignored => ignored_actions += 1,
                _ => applied_actions += 1,
            }
        }
        simulation.update(spec.run.delta_seconds);
    }

    let skipped_actions = pending.count();
    if skipped_actions > 0 {
        warn!(skipped_actions, "部分操作排在运行结束之后，未执行");
    }
    info!(
        day = simulation.time().day,
        population = simulation.population().total,
        stage = ?simulation.stage(),
        "✅ 场景运行完成"
    );

    ScenarioRun {
        simulation,
        applied_actions,
        ignored_actions,
        skipped_actions,
    }
}
