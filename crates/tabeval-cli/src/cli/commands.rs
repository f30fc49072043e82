use anyhow::{bail, Context};

use tabeval_core::filter::{filter_models, ModelFilter};
use tabeval_core::insights::detect_anomalies;
use tabeval_core::leaderboard::rank_models;
use tabeval_core::recommend::{recommend, ScenarioProfile};
use tabeval_core::report;
use tabeval_core::tasks::hardest_tasks;
use tabeval_core::workload::{compare, DifficultyMix, WorkloadProfile};
use tabeval_core::{BenchmarkData, Final25Data};

use super::args::{
    AnomaliesArgs, Cli, Command, CompareArgs, FilterArgs, LeaderboardArgs, RecommendArgs,
    TasksArgs,
};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Filter(args) => run_filter(args, cli.json),
        Command::Recommend(args) => run_recommend(args, cli.json),
        Command::Compare(args) => run_compare(args, cli.json),
        Command::Leaderboard(args) => run_leaderboard(args, cli.json),
        Command::Tasks(args) => run_tasks(args, cli.json),
        Command::Anomalies(args) => run_anomalies(args, cli.json),
    }
}

fn run_filter(args: FilterArgs, json: bool) -> anyhow::Result<i32> {
    let data = BenchmarkData::from_path(&args.data).context("loading benchmark fixture")?;
    let filter = ModelFilter {
        providers: args.providers.into_iter().collect(),
        min_correctness: args.min_correctness,
        min_runs: args.min_runs,
    };
    let models = filter_models(&data.models, &filter, args.sort.into());
    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        print!("{}", report::render_model_table(&models));
    }
    Ok(0)
}

fn run_recommend(args: RecommendArgs, json: bool) -> anyhow::Result<i32> {
    if args.accuracy_weight > 100 {
        bail!("--accuracy-weight must be within 0..=100");
    }
    let data = BenchmarkData::from_path(&args.data).context("loading benchmark fixture")?;
    let profile = ScenarioProfile {
        budget: args.budget.into(),
        accuracy_weight: args.accuracy_weight,
        complexity: args.complexity.into(),
        data_shape: args.data_shape.into(),
    };
    let recs = recommend(&data.models, &profile);
    if json {
        let top: Vec<_> = recs.iter().take(args.top).collect();
        println!("{}", serde_json::to_string_pretty(&top)?);
    } else {
        print!("{}", report::render_recommendations(&recs, args.top));
    }
    Ok(0)
}

fn run_compare(args: CompareArgs, json: bool) -> anyhow::Result<i32> {
    let data = BenchmarkData::from_path(&args.data).context("loading benchmark fixture")?;
    let model_a = data
        .model(&args.model_a)
        .with_context(|| format!("unknown model `{}`", args.model_a))?;
    let model_b = data
        .model(&args.model_b)
        .with_context(|| format!("unknown model `{}`", args.model_b))?;

    let mut mix = if args.weights.is_empty() {
        DifficultyMix::uniform()
    } else {
        DifficultyMix(args.weights.into_iter().collect())
    };
    if args.normalize {
        mix.normalize();
    }
    let profile = WorkloadProfile {
        monthly_queries: args.monthly_queries,
        avg_tokens_per_query: args.avg_tokens,
        mix,
    };
    let result = compare(model_a, model_b, &profile);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_comparison(model_a, model_b, &result));
    }
    Ok(0)
}

fn run_leaderboard(args: LeaderboardArgs, json: bool) -> anyhow::Result<i32> {
    let data = Final25Data::from_path(&args.final25).context("loading final-25 fixture")?;
    let models = rank_models(&data, args.sort.into(), args.include_incomplete);
    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        print!("{}", report::render_leaderboard(&models));
    }
    Ok(0)
}

fn run_tasks(args: TasksArgs, json: bool) -> anyhow::Result<i32> {
    let data = BenchmarkData::from_path(&args.data).context("loading benchmark fixture")?;
    let tasks = hardest_tasks(&data.models, args.min_attempts, args.limit);
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        print!("{}", report::render_hardest_tasks(&tasks));
    }
    Ok(0)
}

fn run_anomalies(args: AnomaliesArgs, json: bool) -> anyhow::Result<i32> {
    let data = Final25Data::from_path(&args.final25).context("loading final-25 fixture")?;
    let anomalies = detect_anomalies(&data);
    if json {
        println!("{}", serde_json::to_string_pretty(&anomalies)?);
    } else {
        print!("{}", report::render_anomalies(&anomalies));
    }
    Ok(0)
}
