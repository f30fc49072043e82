//! Typed views of the two static fixture collections: the per-model
//! benchmark-run dataset and the final-25 task-level dataset.
//!
//! All of these are created once at load time and never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// One role-tagged message of a prompt or completion transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

/// Task metadata attached to a rollout. Absent for warmup/untracked runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleInfo {
    pub expected: f64,
    pub level: Level,
    pub task_id: String,
}

/// A single evaluation rollout of one model on one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub example_id: u64,
    pub task: String,
    pub reward: f64,
    pub answer: String,
    pub info: Option<ExampleInfo>,
    #[serde(default)]
    pub prompt: Vec<Turn>,
    #[serde(default)]
    pub completion: Vec<Turn>,
    /// In [0,1]; strictly above [`crate::SUCCESS_THRESHOLD`] counts as solved.
    pub score_correctness: f64,
    /// In [0,1].
    pub score_efficiency: f64,
    /// Wall-clock generation time for the full rollout.
    pub generation_ms: f64,
}

impl Example {
    pub fn is_success(&self) -> bool {
        self.score_correctness > crate::SUCCESS_THRESHOLD
    }
}

/// Aggregate stats for one evaluation mode (e.g. `stateless_singleCsv`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeStats {
    pub reward: f64,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    pub runs: u32,
}

/// One benchmarked model with its aggregate metrics, per-mode breakdown and
/// raw rollouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Unique `provider/model-name` identifier.
    pub model: String,
    pub provider: String,
    pub name: String,
    #[serde(default)]
    pub total_runs: u32,
    #[serde(default)]
    pub avg_reward: f64,
    #[serde(default)]
    pub best_reward: f64,
    #[serde(default)]
    pub modes: BTreeMap<String, ModeStats>,
    /// Named aggregate scores in [0,1]: `score_correctness`,
    /// `score_efficiency`, `score_notes_usage`, `score_code_quality`.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl ModelRecord {
    pub fn metric(&self, key: &str) -> f64 {
        self.metrics.get(key).copied().unwrap_or(0.0)
    }

    pub fn correctness(&self) -> f64 {
        self.metric("score_correctness")
    }

    pub fn efficiency(&self) -> f64 {
        self.metric("score_efficiency")
    }
}

/// The full benchmark-run collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkData {
    pub models: Vec<ModelRecord>,
}

impl BenchmarkData {
    pub fn model(&self, id: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|m| m.model == id)
    }
}

/// Which of the two task families a final-25 task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetTag {
    Bank,
    Road,
}

impl std::fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetTag::Bank => f.write_str("bank"),
            DatasetTag::Road => f.write_str("road"),
        }
    }
}

/// One task of the final-25 set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub dataset: DatasetTag,
    pub level: Level,
    pub template: String,
    pub goal: String,
}

/// Aggregate accuracy for one task template across all models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStats {
    pub template: String,
    pub tasks: u32,
    pub correct: u32,
    pub total: u32,
    pub pct: f64,
}

/// Correct/partial tallies for one task family (or the combined view).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DatasetScore {
    pub correct: u32,
    pub total: u32,
    pub partial: u32,
    pub pct: f64,
}

/// One rollout row in the final-25 dataset. Answers are kept as raw JSON
/// since tasks mix numeric and textual expected values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Final25Rollout {
    pub task_id: String,
    pub dataset: DatasetTag,
    pub score_correctness: f64,
    pub score_efficiency: f64,
    pub reward: f64,
    pub answer: serde_json::Value,
    pub expected: serde_json::Value,
}

/// One model's final-25 results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Final25Model {
    pub model: String,
    pub provider: String,
    pub name: String,
    pub display_name: String,
    pub bank: DatasetScore,
    pub road: DatasetScore,
    pub combined: DatasetScore,
    #[serde(default)]
    pub avg_reward: f64,
    #[serde(default)]
    pub has_bank: bool,
    #[serde(default)]
    pub has_road: bool,
    /// True when the model was evaluated on both task families in full.
    pub complete: bool,
    #[serde(default)]
    pub rollouts: Vec<Final25Rollout>,
}

/// Anomaly records shipped with the fixture (as opposed to the heuristics in
/// [`crate::insights`], which are computed on the fly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnomaly {
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Final25Summary {
    pub total_tasks: u32,
    pub bank_tasks: u32,
    pub road_tasks: u32,
    pub models_complete: u32,
    pub models_partial: u32,
    pub templates: u32,
    #[serde(default)]
    pub levels: Vec<Level>,
}

/// The final-25 task-level collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Final25Data {
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub summary: Final25Summary,
    pub models: Vec<Final25Model>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub template_stats: Vec<TemplateStats>,
    #[serde(default)]
    pub anomalies: Vec<StoredAnomaly>,
}
