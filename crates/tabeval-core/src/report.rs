//! Plain-text rendering of derived views for the CLI. Each renderer returns
//! a `String` so callers decide where it goes; JSON output goes through the
//! result types' serde derives instead.

use std::fmt::Write as _;

use crate::insights::Anomaly;
use crate::model::{Final25Model, ModelRecord};
use crate::recommend::Recommendation;
use crate::tasks::TaskDifficulty;
use crate::workload::Comparison;

pub fn render_model_table(models: &[&ModelRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<40} {:<10} {:>8} {:>8} {:>8} {:>6}",
        "model", "provider", "corr%", "eff%", "reward", "runs"
    );
    for m in models {
        let _ = writeln!(
            out,
            "{:<40} {:<10} {:>8.1} {:>8.1} {:>8.2} {:>6}",
            m.model,
            m.provider,
            m.correctness() * 100.0,
            m.efficiency() * 100.0,
            m.avg_reward,
            m.total_runs
        );
    }
    out
}

pub fn render_recommendations(recs: &[Recommendation], limit: usize) -> String {
    let mut out = String::new();
    for (idx, rec) in recs.iter().take(limit).enumerate() {
        let _ = writeln!(out, "#{} {} — {}% match", idx + 1, rec.name, rec.score);
        for reason in &rec.reasons {
            let _ = writeln!(out, "     - {}", reason);
        }
    }
    out
}

pub fn render_comparison(a: &ModelRecord, b: &ModelRecord, cmp: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>12} {:>12}",
        "", "success%", "monthly $", "latency ms"
    );
    for (label, model, p) in [("A", a, &cmp.a), ("B", b, &cmp.b)] {
        let _ = writeln!(
            out,
            "{:<12} {:>10.1} {:>12.2} {:>12.0}  ({})",
            label, p.success_rate, p.monthly_cost, p.avg_latency_ms, model.name
        );
    }
    let _ = writeln!(
        out,
        "Recommendation: {} for {} given your workload.",
        cmp.winner_name, cmp.reason
    );
    out
}

pub fn render_leaderboard(models: &[&Final25Model]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<24} {:>10} {:>8} {:>8} {:>8}",
        "#", "model", "combined%", "bank%", "road%", "reward"
    );
    for (idx, m) in models.iter().enumerate() {
        let marker = if m.complete { "" } else { " (partial)" };
        let _ = writeln!(
            out,
            "{:<4} {:<24} {:>10.1} {:>8.1} {:>8.1} {:>8.2}{}",
            idx + 1,
            m.display_name,
            m.combined.pct,
            m.bank.pct,
            m.road.pct,
            m.avg_reward,
            marker
        );
    }
    out
}

pub fn render_hardest_tasks(tasks: &[TaskDifficulty]) -> String {
    let mut out = String::new();
    for t in tasks {
        let _ = writeln!(
            out,
            "{:<28} {}  {:>5.1}% solved ({}/{} attempts)",
            t.task_id,
            t.level,
            t.success_rate_pct(),
            t.success,
            t.total
        );
    }
    out
}

pub fn render_anomalies(anomalies: &[Anomaly]) -> String {
    let mut out = String::new();
    for a in anomalies {
        let _ = writeln!(out, "[{:?}] {}", a.severity, a.title);
        let _ = writeln!(out, "    {}", a.description);
        if !a.insight.is_empty() {
            let _ = writeln!(out, "    insight: {}", a.insight);
        }
    }
    out
}
