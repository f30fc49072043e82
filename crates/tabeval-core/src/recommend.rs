//! Scenario matching: ranks models against a four-dimension user profile.
//!
//! Each dimension contributes an independently-capped 25-point sub-score, so
//! totals always land in [0,100]. A model with no data for a dimension simply
//! scores 0 there; nothing in this module can fail.

use serde::{Deserialize, Serialize};

use crate::model::ModelRecord;
use crate::pricing::{cost_tier, CostTier};

pub const STATELESS_SINGLE_CSV: &str = "stateless_singleCsv";
pub const STATEFUL_MULTI_CSV: &str = "stateful_multiCsv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataShape {
    Single,
    Multi,
}

/// What the user told the scenario builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProfile {
    pub budget: CostTier,
    /// 0 = all speed, 100 = all accuracy. Above 60 prioritizes accuracy,
    /// below 40 prioritizes speed, anything between is balanced.
    pub accuracy_weight: u8,
    pub complexity: Complexity,
    pub data_shape: DataShape,
}

/// One ranked match. `score` is the rounded presentation value; `score_raw`
/// keeps the exact sum for downstream math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub model: String,
    pub name: String,
    pub score: u32,
    pub score_raw: f64,
    /// Up to three human-readable justifications, in sub-score order.
    pub reasons: Vec<String>,
}

fn mean_mode_reward(model: &ModelRecord, key_fragment: &str) -> Option<f64> {
    let rewards: Vec<f64> = model
        .modes
        .iter()
        .filter(|(key, _)| key.contains(key_fragment))
        .map(|(_, stats)| stats.reward)
        .collect();
    if rewards.is_empty() {
        return None;
    }
    Some(rewards.iter().sum::<f64>() / rewards.len() as f64)
}

fn score_model(model: &ModelRecord, profile: &ScenarioProfile) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    // Budget match (25 points). Mid-budget buyers accept anything below
    // premium; premium buyers accept any tier.
    let tier = cost_tier(&model.model);
    if profile.budget == tier {
        score += 25.0;
        reasons.push("Matches your budget".to_string());
    } else if (profile.budget == CostTier::Mid && tier != CostTier::High)
        || profile.budget == CostTier::High
    {
        score += 15.0;
    }

    // Accuracy vs speed (25 points).
    let correctness = model.correctness() * 100.0;
    let efficiency = model.efficiency() * 100.0;
    if profile.accuracy_weight > 60 {
        score += (correctness / 4.0).min(25.0);
        if correctness > 50.0 {
            reasons.push("High accuracy".to_string());
        }
    } else if profile.accuracy_weight < 40 {
        score += (efficiency / 4.0).min(25.0);
        if efficiency > 70.0 {
            reasons.push("Fast execution".to_string());
        }
    } else {
        score += ((correctness + efficiency) / 8.0).min(25.0);
        reasons.push("Balanced performance".to_string());
    }

    // Complexity match (25 points), judged on mode performance.
    match profile.complexity {
        Complexity::Easy => {
            if model.modes.contains_key(STATELESS_SINGLE_CSV) {
                score += 25.0;
                reasons.push("Good for simple tasks".to_string());
            }
        }
        Complexity::Hard => {
            if let Some(stats) = model.modes.get(STATEFUL_MULTI_CSV) {
                score += (stats.reward * 8.0).min(25.0);
                if stats.reward > 2.5 {
                    reasons.push("Handles complex tasks".to_string());
                }
            }
        }
        Complexity::Medium => score += 20.0,
    }

    // Data-shape match (25 points): mean reward over matching modes.
    match profile.data_shape {
        DataShape::Single => {
            if let Some(avg) = mean_mode_reward(model, "singleCsv") {
                score += (avg * 8.0).min(25.0);
            }
        }
        DataShape::Multi => {
            if let Some(avg) = mean_mode_reward(model, "multiCsv") {
                score += (avg * 8.0).min(25.0);
                if avg > 2.5 {
                    reasons.push("Multi-CSV capable".to_string());
                }
            }
        }
    }

    reasons.truncate(3);
    (score, reasons)
}

/// Scores every model against the profile and ranks descending.
pub fn recommend(models: &[ModelRecord], profile: &ScenarioProfile) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = models
        .iter()
        .map(|model| {
            let (score_raw, reasons) = score_model(model, profile);
            Recommendation {
                model: model.model.clone(),
                name: model.name.clone(),
                score: score_raw.round() as u32,
                score_raw,
                reasons,
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.score_raw
            .partial_cmp(&a.score_raw)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}
