//! Conjunctive model filtering with a secondary sort key.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ModelRecord;

/// Predicate set applied with AND semantics. An empty provider set means no
/// provider restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelFilter {
    #[serde(default)]
    pub providers: BTreeSet<String>,
    /// Minimum aggregate correctness, in percent (0..=100).
    #[serde(default)]
    pub min_correctness: f64,
    /// Minimum number of recorded runs.
    #[serde(default)]
    pub min_runs: u32,
}

impl ModelFilter {
    pub fn matches(&self, model: &ModelRecord) -> bool {
        if !self.providers.is_empty() && !self.providers.contains(&model.provider) {
            return false;
        }
        if model.correctness() * 100.0 < self.min_correctness {
            return false;
        }
        model.total_runs >= self.min_runs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Correctness,
    Efficiency,
    AvgReward,
}

impl SortKey {
    fn value(&self, model: &ModelRecord) -> f64 {
        match self {
            SortKey::Correctness => model.correctness(),
            SortKey::Efficiency => model.efficiency(),
            SortKey::AvgReward => model.avg_reward,
        }
    }
}

/// Returns the models satisfying every predicate, sorted descending by the
/// given key. Ties keep input order (stable sort). An empty result is a
/// valid output, not a failure.
pub fn filter_models<'a>(
    models: &'a [ModelRecord],
    filter: &ModelFilter,
    sort: SortKey,
) -> Vec<&'a ModelRecord> {
    let mut out: Vec<&ModelRecord> = models.iter().filter(|m| filter.matches(m)).collect();
    out.sort_by(|a, b| {
        sort.value(b)
            .partial_cmp(&sort.value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, provider: &str, correctness: f64, runs: u32) -> ModelRecord {
        serde_json::from_value(serde_json::json!({
            "model": id,
            "provider": provider,
            "name": id,
            "totalRuns": runs,
            "avgReward": correctness * 4.0,
            "metrics": {"score_correctness": correctness, "score_efficiency": 1.0 - correctness},
        }))
        .unwrap()
    }

    fn nine_model_fleet() -> Vec<ModelRecord> {
        vec![
            model("qwen/a", "qwen", 0.61, 40),
            model("qwen/b", "qwen", 0.55, 40),
            model("anthropic/c", "anthropic", 0.71, 40),
            model("google/d", "google", 0.43, 40),
            model("google/e", "google", 0.28, 40),
            model("openai/f", "openai", 0.52, 40),
            model("openai/g", "openai", 0.49, 40),
            model("deepseek/h", "deepseek", 0.12, 40),
            model("ensemble", "ensemble", 0.66, 40),
        ]
    }

    #[test]
    fn provider_allow_list_selects_exactly_matching_models() {
        let fleet = nine_model_fleet();
        let filter = ModelFilter {
            providers: ["qwen".to_string(), "anthropic".to_string()].into(),
            min_correctness: 0.0,
            min_runs: 0,
        };
        let out = filter_models(&fleet, &filter, SortKey::Correctness);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|m| m.provider == "qwen" || m.provider == "anthropic"));
    }

    #[test]
    fn empty_provider_set_means_no_restriction() {
        let fleet = nine_model_fleet();
        let out = filter_models(&fleet, &ModelFilter::default(), SortKey::Correctness);
        assert_eq!(out.len(), fleet.len());
    }

    #[test]
    fn conjunctive_thresholds_apply_together() {
        let fleet = nine_model_fleet();
        let filter = ModelFilter {
            providers: BTreeSet::new(),
            min_correctness: 50.0,
            min_runs: 41,
        };
        assert!(filter_models(&fleet, &filter, SortKey::Correctness).is_empty());
    }

    #[test]
    fn result_is_subset_and_filter_is_idempotent() {
        let fleet = nine_model_fleet();
        let filter = ModelFilter {
            providers: BTreeSet::new(),
            min_correctness: 45.0,
            min_runs: 0,
        };
        let once = filter_models(&fleet, &filter, SortKey::Correctness);
        assert!(once.len() < fleet.len());
        let owned: Vec<ModelRecord> = once.iter().map(|m| (*m).clone()).collect();
        let twice = filter_models(&owned, &filter, SortKey::Correctness);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.model, b.model);
        }
    }

    #[test]
    fn sort_keys_order_descending() {
        let fleet = nine_model_fleet();
        let by_corr = filter_models(&fleet, &ModelFilter::default(), SortKey::Correctness);
        for pair in by_corr.windows(2) {
            assert!(pair[0].correctness() >= pair[1].correctness());
        }
        let by_eff = filter_models(&fleet, &ModelFilter::default(), SortKey::Efficiency);
        for pair in by_eff.windows(2) {
            assert!(pair[0].efficiency() >= pair[1].efficiency());
        }
        let by_reward = filter_models(&fleet, &ModelFilter::default(), SortKey::AvgReward);
        for pair in by_reward.windows(2) {
            assert!(pair[0].avg_reward >= pair[1].avg_reward);
        }
    }
}
