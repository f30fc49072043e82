//! Workload cost/outcome projection: given a difficulty mix and volume
//! assumptions, what would each model's success rate, latency and monthly
//! bill look like, and which of two candidates wins overall.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::model::ModelRecord;
use crate::pricing::cost_per_million;

/// Success rate assumed for a level bucket that exists but has no recorded
/// runs, in percent.
const ASSUMED_SUCCESS_PCT: f64 = 50.0;

/// Per-level tallies aggregated from a model's rollouts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LevelStats {
    pub success: u32,
    pub total: u32,
    pub avg_time_ms: f64,
}

impl LevelStats {
    pub fn success_pct(&self) -> f64 {
        if self.total == 0 {
            return ASSUMED_SUCCESS_PCT;
        }
        f64::from(self.success) / f64::from(self.total) * 100.0
    }
}

/// A model's historical performance grouped by difficulty level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLevelStats {
    pub model: String,
    pub name: String,
    pub provider: String,
    pub levels: BTreeMap<Level, LevelStats>,
    pub overall_success_pct: f64,
    pub avg_time_ms: f64,
}

impl ModelLevelStats {
    pub fn from_model(model: &ModelRecord) -> Self {
        let mut levels: BTreeMap<Level, LevelStats> = BTreeMap::new();
        let mut total_success = 0u32;
        let mut total_count = 0u32;
        let mut total_time = 0.0;

        for ex in &model.examples {
            let Some(info) = &ex.info else { continue };
            let entry = levels.entry(info.level).or_default();
            entry.total += 1;
            entry.avg_time_ms += ex.generation_ms;
            if ex.is_success() {
                entry.success += 1;
                total_success += 1;
            }
            total_count += 1;
            total_time += ex.generation_ms;
        }
        for stats in levels.values_mut() {
            if stats.total > 0 {
                stats.avg_time_ms /= f64::from(stats.total);
            }
        }

        Self {
            model: model.model.clone(),
            name: model.name.clone(),
            provider: model.provider.clone(),
            levels,
            overall_success_pct: if total_count > 0 {
                f64::from(total_success) / f64::from(total_count) * 100.0
            } else {
                0.0
            },
            avg_time_ms: if total_count > 0 {
                total_time / f64::from(total_count)
            } else {
                0.0
            },
        }
    }
}

/// Weights per difficulty level. They need not sum to 100; [`Self::normalize`]
/// rescales them. A level absent from the map (or with zero weight)
/// contributes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifficultyMix(pub BTreeMap<Level, f64>);

impl DifficultyMix {
    pub fn uniform() -> Self {
        Self(Level::ALL.iter().map(|l| (*l, 100.0 / 6.0)).collect())
    }

    pub fn total_weight(&self) -> f64 {
        self.0.values().sum()
    }

    /// Rescales weights to sum to 100, rounding each level to the nearest
    /// integer percentage. A zero total is left untouched rather than
    /// dividing by it.
    pub fn normalize(&mut self) {
        let total = self.total_weight();
        if total == 0.0 {
            return;
        }
        for weight in self.0.values_mut() {
            *weight = (*weight / total * 100.0).round();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadProfile {
    pub monthly_queries: u64,
    pub avg_tokens_per_query: u64,
    pub mix: DifficultyMix,
}

/// Projected outcome of running one model against a workload.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Projection {
    /// Weighted success rate in percent.
    pub success_rate: f64,
    /// Projected monthly spend in dollars.
    pub monthly_cost: f64,
    /// Weighted average generation time in milliseconds.
    pub avg_latency_ms: f64,
}

/// Projects success rate, latency and monthly cost for one model.
///
/// Levels with positive weight but no history for this model fall back to
/// the assumed 50% success rate and contribute no latency; a zero total
/// weight yields 0 rather than NaN. Cost depends only on volume and the
/// price table, never on the mix.
pub fn project(model: &ModelRecord, profile: &WorkloadProfile) -> Projection {
    let stats = ModelLevelStats::from_model(model);
    project_from_stats(&stats, profile)
}

/// Same as [`project`] but reuses precomputed level stats, since callers
/// typically recompute projections on every slider change.
pub fn project_from_stats(stats: &ModelLevelStats, profile: &WorkloadProfile) -> Projection {
    let mut weighted_success = 0.0;
    let mut weighted_time = 0.0;
    let mut total_weight = 0.0;

    for (level, weight) in &profile.mix.0 {
        if *weight > 0.0 {
            match stats.levels.get(level) {
                Some(level_stats) => {
                    weighted_success += level_stats.success_pct() * weight;
                    weighted_time += level_stats.avg_time_ms * weight;
                }
                None => weighted_success += ASSUMED_SUCCESS_PCT * weight,
            }
            total_weight += weight;
        }
    }

    let (success_rate, avg_latency_ms) = if total_weight > 0.0 {
        (weighted_success / total_weight, weighted_time / total_weight)
    } else {
        (0.0, 0.0)
    };
    let price = cost_per_million(&stats.model);
    let monthly_cost =
        (profile.monthly_queries as f64) * (profile.avg_tokens_per_query as f64) * price
            / 1_000_000.0;

    Projection {
        success_rate,
        monthly_cost,
        avg_latency_ms,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    HigherAccuracy,
    LowerCost,
    BetterOverallValue,
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinReason::HigherAccuracy => f.write_str("higher accuracy"),
            WinReason::LowerCost => f.write_str("lower cost"),
            WinReason::BetterOverallValue => f.write_str("better overall value"),
        }
    }
}

/// Side-by-side projection of two models with a composite recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub a: Projection,
    pub b: Projection,
    /// Model id of the composite winner. Ties go to the first model.
    pub winner: String,
    pub winner_name: String,
    pub reason: WinReason,
}

fn composite(p: &Projection) -> f64 {
    p.success_rate * 2.0 - p.monthly_cost * 0.5 - p.avg_latency_ms / 10_000.0
}

/// Compares two models under the same workload and picks the one maximizing
/// `success×2 − cost×0.5 − latency/10000`.
pub fn compare(a: &ModelRecord, b: &ModelRecord, profile: &WorkloadProfile) -> Comparison {
    let pa = project(a, profile);
    let pb = project(b, profile);
    let a_wins = composite(&pa) >= composite(&pb);
    let (winner, loser_proj, winner_proj) = if a_wins {
        (a, &pb, &pa)
    } else {
        (b, &pa, &pb)
    };
    let reason = if winner_proj.success_rate > loser_proj.success_rate {
        WinReason::HigherAccuracy
    } else if winner_proj.monthly_cost < loser_proj.monthly_cost {
        WinReason::LowerCost
    } else {
        WinReason::BetterOverallValue
    };
    tracing::debug!(winner = %winner.model, %reason, "workload comparison");
    Comparison {
        a: pa,
        b: pb,
        winner: winner.model.clone(),
        winner_name: winner.name.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(level: &str, correctness: f64, generation_ms: f64) -> serde_json::Value {
        serde_json::json!({
            "example_id": 0,
            "task": "t",
            "reward": correctness,
            "answer": "a",
            "info": {"expected": 1.0, "level": level, "task_id": format!("{level}_t")},
            "score_correctness": correctness,
            "score_efficiency": 0.5,
            "generation_ms": generation_ms,
        })
    }

    fn model(id: &str, examples: Vec<serde_json::Value>) -> ModelRecord {
        serde_json::from_value(serde_json::json!({
            "model": id,
            "provider": id.split('/').next().unwrap(),
            "name": id,
            "examples": examples,
        }))
        .unwrap()
    }

    #[test]
    fn level_stats_group_and_average() {
        let m = model(
            "qwen/qwen3-max",
            vec![
                example("L1", 0.9, 1000.0),
                example("L1", 0.2, 3000.0),
                example("L5", 0.8, 5000.0),
            ],
        );
        let stats = ModelLevelStats::from_model(&m);
        let l1 = &stats.levels[&Level::L1];
        assert_eq!(l1.success, 1);
        assert_eq!(l1.total, 2);
        assert_eq!(l1.avg_time_ms, 2000.0);
        assert_eq!(stats.overall_success_pct, 2.0 / 3.0 * 100.0);
        assert_eq!(stats.avg_time_ms, 3000.0);
    }

    #[test]
    fn zero_weight_mix_projects_zero_rates_but_full_cost() {
        let m = model("qwen/qwen3-max", vec![example("L1", 0.9, 1000.0)]);
        let profile = WorkloadProfile {
            monthly_queries: 10_000,
            avg_tokens_per_query: 500,
            mix: DifficultyMix(Level::ALL.iter().map(|l| (*l, 0.0)).collect()),
        };
        let p = project(&m, &profile);
        assert_eq!(p.success_rate, 0.0);
        assert_eq!(p.avg_latency_ms, 0.0);
        // qwen3-max is $1.0/M: 10000 * 500 * 1.0 / 1e6 = $5.00.
        assert_eq!(p.monthly_cost, 5.0);
    }

    #[test]
    fn cost_is_independent_of_the_mix() {
        let m = model(
            "openai/gpt-5.2",
            vec![example("L1", 0.9, 1000.0), example("L6", 0.1, 9000.0)],
        );
        let base = WorkloadProfile {
            monthly_queries: 200_000,
            avg_tokens_per_query: 1000,
            mix: DifficultyMix::uniform(),
        };
        let skewed = WorkloadProfile {
            mix: DifficultyMix([(Level::L6, 100.0)].into_iter().collect()),
            ..base.clone()
        };
        assert_eq!(project(&m, &base).monthly_cost, project(&m, &skewed).monthly_cost);
        // gpt-5.2 is $10/M: 200000 * 1000 * 10 / 1e6 = $2000.
        assert_eq!(project(&m, &base).monthly_cost, 2000.0);
    }

    #[test]
    fn levels_missing_from_history_use_the_assumed_rate() {
        let m = model("qwen/qwen3-max", vec![example("L1", 1.0, 1000.0)]);
        let profile = WorkloadProfile {
            monthly_queries: 1000,
            avg_tokens_per_query: 100,
            mix: DifficultyMix(
                [(Level::L1, 50.0), (Level::L6, 50.0)].into_iter().collect(),
            ),
        };
        // L6 has no history: assumed 50% success, zero latency contribution.
        let p = project(&m, &profile);
        assert_eq!(p.success_rate, 75.0);
        assert_eq!(p.avg_latency_ms, 500.0);
    }

    #[test]
    fn normalize_rescales_to_100_and_is_idempotent_on_uniform() {
        let mut mix = DifficultyMix(
            [(Level::L1, 20.0), (Level::L2, 20.0), (Level::L3, 40.0)]
                .into_iter()
                .collect(),
        );
        mix.normalize();
        assert_eq!(mix.0[&Level::L1], 25.0);
        assert_eq!(mix.0[&Level::L3], 50.0);
        assert_eq!(mix.total_weight(), 100.0);

        let mut uniform = DifficultyMix(
            [(Level::L1, 25.0), (Level::L2, 25.0), (Level::L3, 25.0), (Level::L4, 25.0)]
                .into_iter()
                .collect(),
        );
        uniform.normalize();
        let snapshot = uniform.clone();
        uniform.normalize();
        assert_eq!(uniform.0, snapshot.0);
    }

    #[test]
    fn normalize_leaves_zero_total_untouched() {
        let mut mix = DifficultyMix([(Level::L1, 0.0)].into_iter().collect());
        mix.normalize();
        assert_eq!(mix.0[&Level::L1], 0.0);
    }

    #[test]
    fn comparison_prefers_accuracy_then_cost() {
        let strong = model(
            "qwen/qwen3-max",
            vec![example("L1", 1.0, 1000.0), example("L1", 1.0, 1000.0)],
        );
        let weak = model(
            "deepseek/deepseek-v3.2-speciale",
            vec![example("L1", 0.1, 1000.0), example("L1", 0.1, 1000.0)],
        );
        let profile = WorkloadProfile {
            monthly_queries: 10_000,
            avg_tokens_per_query: 500,
            mix: DifficultyMix([(Level::L1, 100.0)].into_iter().collect()),
        };
        let cmp = compare(&strong, &weak, &profile);
        assert_eq!(cmp.winner, "qwen/qwen3-max");
        assert_eq!(cmp.reason, WinReason::HigherAccuracy);

        // Identical accuracy and latency: the cheaper model wins on cost.
        let pricey = model("openai/gpt-5.2", vec![example("L1", 1.0, 1000.0)]);
        let cheap = model(
            "deepseek/deepseek-v3.2-speciale",
            vec![example("L1", 1.0, 1000.0)],
        );
        let cmp = compare(&pricey, &cheap, &profile);
        assert_eq!(cmp.winner, "deepseek/deepseek-v3.2-speciale");
        assert_eq!(cmp.reason, WinReason::LowerCost);
    }

    #[test]
    fn tie_goes_to_the_first_model() {
        let a = model("acme/a", vec![example("L1", 1.0, 1000.0)]);
        let b = model("acme/b", vec![example("L1", 1.0, 1000.0)]);
        let profile = WorkloadProfile {
            monthly_queries: 1000,
            avg_tokens_per_query: 100,
            mix: DifficultyMix([(Level::L1, 100.0)].into_iter().collect()),
        };
        let cmp = compare(&a, &b, &profile);
        assert_eq!(cmp.winner, "acme/a");
        assert_eq!(cmp.reason, WinReason::BetterOverallValue);
    }
}
