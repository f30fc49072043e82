use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tabeval_core::filter::SortKey;
use tabeval_core::leaderboard::LeaderboardSort;
use tabeval_core::level::Level;
use tabeval_core::pricing::CostTier;
use tabeval_core::recommend::{Complexity, DataShape};

#[derive(Parser)]
#[command(
    name = "tabeval",
    version,
    about = "Explore tabular LLM benchmark results: filter models, match scenarios, project workloads"
)]
pub struct Cli {
    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter and sort the benchmark models
    Filter(FilterArgs),
    /// Rank models against a usage scenario
    Recommend(RecommendArgs),
    /// Project cost and outcomes for two models under a workload
    Compare(CompareArgs),
    /// Final-25 leaderboard
    Leaderboard(LeaderboardArgs),
    /// Hardest tasks across all models
    Tasks(TasksArgs),
    /// Anomaly report over the final-25 results
    Anomalies(AnomaliesArgs),
}

#[derive(Args)]
pub struct FilterArgs {
    /// Path to the benchmark fixture JSON.
    #[arg(long, env = "TABEVAL_DATA")]
    pub data: PathBuf,
    /// Allowed providers; repeat for several. Empty means no restriction.
    #[arg(long = "provider")]
    pub providers: Vec<String>,
    /// Minimum aggregate correctness, percent.
    #[arg(long, default_value_t = 0.0)]
    pub min_correctness: f64,
    /// Minimum recorded runs.
    #[arg(long, default_value_t = 0)]
    pub min_runs: u32,
    #[arg(long, value_enum, default_value = "correctness")]
    pub sort: SortArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Correctness,
    Efficiency,
    AvgReward,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Correctness => SortKey::Correctness,
            SortArg::Efficiency => SortKey::Efficiency,
            SortArg::AvgReward => SortKey::AvgReward,
        }
    }
}

#[derive(Args)]
pub struct RecommendArgs {
    #[arg(long, env = "TABEVAL_DATA")]
    pub data: PathBuf,
    #[arg(long, value_enum)]
    pub budget: BudgetArg,
    /// 0 = all speed, 100 = all accuracy.
    #[arg(long, default_value_t = 50)]
    pub accuracy_weight: u8,
    #[arg(long, value_enum)]
    pub complexity: ComplexityArg,
    #[arg(long, value_enum)]
    pub data_shape: DataShapeArg,
    /// How many recommendations to print.
    #[arg(long, default_value_t = 3)]
    pub top: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BudgetArg {
    Low,
    Mid,
    High,
}

impl From<BudgetArg> for CostTier {
    fn from(value: BudgetArg) -> Self {
        match value {
            BudgetArg::Low => CostTier::Low,
            BudgetArg::Mid => CostTier::Mid,
            BudgetArg::High => CostTier::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ComplexityArg {
    Easy,
    Medium,
    Hard,
}

impl From<ComplexityArg> for Complexity {
    fn from(value: ComplexityArg) -> Self {
        match value {
            ComplexityArg::Easy => Complexity::Easy,
            ComplexityArg::Medium => Complexity::Medium,
            ComplexityArg::Hard => Complexity::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DataShapeArg {
    Single,
    Multi,
}

impl From<DataShapeArg> for DataShape {
    fn from(value: DataShapeArg) -> Self {
        match value {
            DataShapeArg::Single => DataShape::Single,
            DataShapeArg::Multi => DataShape::Multi,
        }
    }
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(long, env = "TABEVAL_DATA")]
    pub data: PathBuf,
    /// First model id (provider/model-name).
    pub model_a: String,
    /// Second model id.
    pub model_b: String,
    #[arg(long, default_value_t = 10_000)]
    pub monthly_queries: u64,
    #[arg(long, default_value_t = 500)]
    pub avg_tokens: u64,
    /// Difficulty weights as LEVEL=WEIGHT, e.g. --weight L1=20. Repeatable;
    /// omitted levels get zero. Defaults to a uniform mix.
    #[arg(long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(Level, f64)>,
    /// Rescale weights to sum to 100 before projecting.
    #[arg(long)]
    pub normalize: bool,
}

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Path to the final-25 fixture JSON.
    #[arg(long, env = "TABEVAL_FINAL25")]
    pub final25: PathBuf,
    #[arg(long, value_enum, default_value = "combined")]
    pub sort: LeaderboardSortArg,
    /// Include models missing one of the task families.
    #[arg(long)]
    pub include_incomplete: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LeaderboardSortArg {
    Combined,
    Bank,
    Road,
    AvgReward,
}

impl From<LeaderboardSortArg> for LeaderboardSort {
    fn from(value: LeaderboardSortArg) -> Self {
        match value {
            LeaderboardSortArg::Combined => LeaderboardSort::Combined,
            LeaderboardSortArg::Bank => LeaderboardSort::Bank,
            LeaderboardSortArg::Road => LeaderboardSort::Road,
            LeaderboardSortArg::AvgReward => LeaderboardSort::AvgReward,
        }
    }
}

#[derive(Args)]
pub struct TasksArgs {
    #[arg(long, env = "TABEVAL_DATA")]
    pub data: PathBuf,
    /// Ignore tasks with fewer attempts than this.
    #[arg(long, default_value_t = 2)]
    pub min_attempts: u32,
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Args)]
pub struct AnomaliesArgs {
    #[arg(long, env = "TABEVAL_FINAL25")]
    pub final25: PathBuf,
}

fn parse_weight(raw: &str) -> Result<(Level, f64), String> {
    let (level, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LEVEL=WEIGHT, got `{raw}`"))?;
    let level = Level::parse(level).ok_or_else(|| format!("unknown level `{level}`"))?;
    let weight: f64 = weight
        .parse()
        .map_err(|e| format!("bad weight `{weight}`: {e}"))?;
    if weight < 0.0 {
        return Err(format!("weight must be non-negative, got {weight}"));
    }
    Ok((level, weight))
}
