//! Cross-model task analysis: which tasks are hardest, where each model is
//! weakest, and which tasks a set of models have all attempted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::model::ModelRecord;

/// One model's attempt at a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAttempt {
    pub model: String,
    pub name: String,
    pub provider: String,
    pub succeeded: bool,
}

/// Success/failure tallies for one task across all models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDifficulty {
    pub task_id: String,
    pub level: Level,
    pub success: u32,
    pub fail: u32,
    pub total: u32,
    pub attempts: Vec<TaskAttempt>,
}

impl TaskDifficulty {
    pub fn success_rate_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.success) / f64::from(self.total) * 100.0
    }
}

/// Tallies every rollout with task info into per-task difficulty stats,
/// keyed by task id.
pub fn task_difficulty(models: &[ModelRecord]) -> BTreeMap<String, TaskDifficulty> {
    let mut stats: BTreeMap<String, TaskDifficulty> = BTreeMap::new();
    for model in models {
        for ex in &model.examples {
            let Some(info) = &ex.info else { continue };
            let entry = stats
                .entry(info.task_id.clone())
                .or_insert_with(|| TaskDifficulty {
                    task_id: info.task_id.clone(),
                    level: info.level,
                    success: 0,
                    fail: 0,
                    total: 0,
                    attempts: Vec::new(),
                });
            let succeeded = ex.is_success();
            entry.total += 1;
            if succeeded {
                entry.success += 1;
            } else {
                entry.fail += 1;
            }
            entry.attempts.push(TaskAttempt {
                model: model.model.clone(),
                name: model.name.clone(),
                provider: model.provider.clone(),
                succeeded,
            });
        }
    }
    stats
}

/// The tasks with the lowest success rate, ascending. Tasks with fewer than
/// `min_attempts` rollouts are excluded as statistically meaningless.
pub fn hardest_tasks(
    models: &[ModelRecord],
    min_attempts: u32,
    limit: usize,
) -> Vec<TaskDifficulty> {
    let mut tasks: Vec<TaskDifficulty> = task_difficulty(models)
        .into_values()
        .filter(|t| t.total >= min_attempts)
        .collect();
    tasks.sort_by(|a, b| {
        a.success_rate_pct()
            .partial_cmp(&b.success_rate_pct())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tasks.truncate(limit);
    tasks
}

/// A model's weakest difficulty level: the one with the lowest success rate
/// among levels it has rollouts for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeakness {
    pub model: String,
    pub name: String,
    pub weakest_level: Level,
    pub weakest_rate_pct: f64,
}

pub fn model_weaknesses(models: &[ModelRecord]) -> Vec<ModelWeakness> {
    models
        .iter()
        .filter_map(|model| {
            let stats = crate::workload::ModelLevelStats::from_model(model);
            stats
                .levels
                .iter()
                .map(|(level, ls)| {
                    let rate = if ls.total > 0 {
                        f64::from(ls.success) / f64::from(ls.total) * 100.0
                    } else {
                        0.0
                    };
                    (*level, rate)
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(level, rate)| ModelWeakness {
                    model: model.model.clone(),
                    name: model.name.clone(),
                    weakest_level: level,
                    weakest_rate_pct: rate,
                })
        })
        .collect()
}

/// A task attempted by every model in a selection, for side-by-side replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonTask {
    pub task_id: String,
    pub level: Level,
}

/// Task ids present (with info) in every one of the given models' rollouts.
/// Fewer than two models means nothing to race: returns empty.
pub fn common_tasks(models: &[&ModelRecord]) -> Vec<CommonTask> {
    if models.len() < 2 {
        return Vec::new();
    }
    let task_sets: Vec<BTreeSet<&str>> = models
        .iter()
        .map(|m| {
            m.examples
                .iter()
                .filter_map(|e| e.info.as_ref())
                .map(|i| i.task_id.as_str())
                .collect()
        })
        .collect();

    task_sets[0]
        .iter()
        .filter(|task| task_sets.iter().all(|set| set.contains(*task)))
        .filter_map(|task| {
            models[0]
                .examples
                .iter()
                .filter_map(|e| e.info.as_ref())
                .find(|i| i.task_id == *task)
                .map(|i| CommonTask {
                    task_id: i.task_id.clone(),
                    level: i.level,
                })
        })
        .collect()
}
