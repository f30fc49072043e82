//! Analytics core for the tabular LLM benchmark.
//!
//! Every entry point is a pure function of `(dataset, parameters)`: callers
//! load the static fixtures once via [`dataset`] and recompute derived views
//! on each parameter change. Nothing here mutates the dataset or performs I/O
//! outside of the loader.

pub mod dataset;
pub mod filter;
pub mod insights;
pub mod leaderboard;
pub mod level;
pub mod model;
pub mod pricing;
pub mod recommend;
pub mod report;
pub mod tasks;
pub mod workload;

pub use dataset::DatasetError;
pub use level::Level;
pub use model::{BenchmarkData, Example, Final25Data, ModelRecord, TaskRecord, TemplateStats};

/// Universal success threshold: a rollout counts as solved when its
/// correctness score is strictly above this.
pub const SUCCESS_THRESHOLD: f64 = 0.5;
