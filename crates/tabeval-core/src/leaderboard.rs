//! Final-25 leaderboard views: model ranking and template-level breakdowns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::model::{Final25Data, Final25Model, TaskRecord, TemplateStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    Combined,
    Bank,
    Road,
    AvgReward,
}

/// Ranks final-25 models descending by the chosen key, optionally dropping
/// models that were not evaluated on both task families.
pub fn rank_models(
    data: &Final25Data,
    sort: LeaderboardSort,
    include_incomplete: bool,
) -> Vec<&Final25Model> {
    let mut models: Vec<&Final25Model> = data
        .models
        .iter()
        .filter(|m| include_incomplete || m.complete)
        .collect();
    let key = |m: &Final25Model| match sort {
        LeaderboardSort::Combined => m.combined.pct,
        LeaderboardSort::Bank => m.bank.pct,
        LeaderboardSort::Road => m.road.pct,
        LeaderboardSort::AvgReward => m.avg_reward,
    };
    models.sort_by(|a, b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    models
}

/// Coarse banding of template accuracy, mirroring the dashboard's color
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyBand {
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

pub fn difficulty_band(pct: f64) -> DifficultyBand {
    if pct >= 50.0 {
        DifficultyBand::Easy
    } else if pct >= 30.0 {
        DifficultyBand::Moderate
    } else if pct >= 15.0 {
        DifficultyBand::Hard
    } else {
        DifficultyBand::VeryHard
    }
}

/// Templates where fewer than one in five attempts succeed.
pub fn hard_template_count(stats: &[TemplateStats]) -> usize {
    stats.iter().filter(|t| t.pct < 20.0).count()
}

/// Groups tasks by template tag, preserving task order within a template.
pub fn tasks_by_template(tasks: &[TaskRecord]) -> BTreeMap<String, Vec<&TaskRecord>> {
    let mut groups: BTreeMap<String, Vec<&TaskRecord>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.template.clone()).or_default().push(task);
    }
    groups
}

/// How many tasks of each difficulty level a template covers.
pub fn template_level_distribution(tasks: &[TaskRecord]) -> BTreeMap<String, BTreeMap<Level, u32>> {
    let mut dist: BTreeMap<String, BTreeMap<Level, u32>> = BTreeMap::new();
    for task in tasks {
        *dist
            .entry(task.template.clone())
            .or_default()
            .entry(task.level)
            .or_insert(0) += 1;
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Final25Data {
        serde_json::from_value(serde_json::json!({
            "models": [
                {
                    "model": "a/x", "provider": "a", "name": "X", "displayName": "X",
                    "bank": {"correct": 2, "total": 10, "partial": 1, "pct": 20.0},
                    "road": {"correct": 4, "total": 5, "partial": 0, "pct": 80.0},
                    "combined": {"correct": 6, "total": 15, "partial": 1, "pct": 40.0},
                    "avgReward": 0.40, "complete": true
                },
                {
                    "model": "b/y", "provider": "b", "name": "Y", "displayName": "Y",
                    "bank": {"correct": 6, "total": 10, "partial": 0, "pct": 60.0},
                    "road": {"correct": 1, "total": 5, "partial": 0, "pct": 20.0},
                    "combined": {"correct": 7, "total": 15, "partial": 0, "pct": 46.7},
                    "avgReward": 0.35, "complete": true
                },
                {
                    "model": "c/z", "provider": "c", "name": "Z", "displayName": "Z",
                    "bank": {"correct": 9, "total": 10, "partial": 0, "pct": 90.0},
                    "road": {"correct": 0, "total": 0, "partial": 0, "pct": 0.0},
                    "combined": {"correct": 9, "total": 10, "partial": 0, "pct": 90.0},
                    "avgReward": 0.90, "complete": false
                }
            ],
            "tasks": [
                {"id": "t1", "dataset": "bank", "level": "L4", "template": "nested_extrema", "goal": "g"},
                {"id": "t2", "dataset": "bank", "level": "L5", "template": "nested_extrema", "goal": "g"},
                {"id": "t3", "dataset": "road", "level": "L5", "template": "chain_conversion", "goal": "g"}
            ],
            "templateStats": [
                {"template": "nested_extrema", "tasks": 2, "correct": 2, "total": 18, "pct": 11.1},
                {"template": "chain_conversion", "tasks": 1, "correct": 5, "total": 9, "pct": 55.6}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn ranking_sorts_by_selected_key() {
        let data = fixture();
        let by_combined = rank_models(&data, LeaderboardSort::Combined, true);
        assert_eq!(by_combined[0].model, "c/z");
        let by_road = rank_models(&data, LeaderboardSort::Road, true);
        assert_eq!(by_road[0].model, "a/x");
        let by_reward = rank_models(&data, LeaderboardSort::AvgReward, true);
        assert_eq!(by_reward[0].model, "c/z");
    }

    #[test]
    fn incomplete_models_can_be_excluded() {
        let data = fixture();
        let complete_only = rank_models(&data, LeaderboardSort::Combined, false);
        assert_eq!(complete_only.len(), 2);
        assert!(complete_only.iter().all(|m| m.complete));
    }

    #[test]
    fn bands_follow_the_dashboard_scale() {
        assert_eq!(difficulty_band(55.0), DifficultyBand::Easy);
        assert_eq!(difficulty_band(30.0), DifficultyBand::Moderate);
        assert_eq!(difficulty_band(15.0), DifficultyBand::Hard);
        assert_eq!(difficulty_band(14.9), DifficultyBand::VeryHard);
    }

    #[test]
    fn template_views_group_and_count() {
        let data = fixture();
        assert_eq!(hard_template_count(&data.template_stats), 1);
        let groups = tasks_by_template(&data.tasks);
        assert_eq!(groups["nested_extrema"].len(), 2);
        let dist = template_level_distribution(&data.tasks);
        assert_eq!(dist["nested_extrema"][&Level::L4], 1);
        assert_eq!(dist["nested_extrema"][&Level::L5], 1);
    }
}
