//! Anomaly heuristics over the final-25 results: cheap pattern checks that
//! surface models behaving unlike the rest of the field.

use serde::{Deserialize, Serialize};

use crate::model::{DatasetTag, Final25Data, Final25Model};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub model: String,
    pub kind: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub insight: String,
}

fn domain_gap(model: &Final25Model) -> Option<Anomaly> {
    let gap = (model.bank.pct - model.road.pct).abs();
    if gap <= 30.0 {
        return None;
    }
    let (stronger, weaker) = if model.road.pct > model.bank.pct {
        (DatasetTag::Road, DatasetTag::Bank)
    } else {
        (DatasetTag::Bank, DatasetTag::Road)
    };
    let insight = match stronger {
        DatasetTag::Road => {
            "May struggle with the bank dataset's percentage format or subscription rate concept"
        }
        DatasetTag::Bank => "May have difficulty with road safety metrics or spatial reasoning",
    };
    Some(Anomaly {
        model: model.model.clone(),
        kind: "domain_gap".to_string(),
        severity: if gap > 40.0 {
            Severity::High
        } else {
            Severity::Medium
        },
        title: format!("{}: {:.0}% Domain Gap", model.display_name, gap),
        description: format!(
            "Performs {:.1}% better on {} than {} tasks",
            gap, stronger, weaker
        ),
        insight: insight.to_string(),
    })
}

fn partial_credits(model: &Final25Model) -> Option<Anomaly> {
    if model.combined.partial < 5 {
        return None;
    }
    Some(Anomaly {
        model: model.model.clone(),
        kind: "partial_credits".to_string(),
        severity: if model.combined.partial >= 10 {
            Severity::High
        } else {
            Severity::Medium
        },
        title: format!(
            "{}: {} Partial Credits",
            model.display_name, model.combined.partial
        ),
        description: "Got close but made scale errors (100x) or rounding mistakes".to_string(),
        insight: "Consider adding explicit formatting instructions in prompts to reduce 100x scale errors"
            .to_string(),
    })
}

fn low_performance(model: &Final25Model) -> Option<Anomaly> {
    if model.combined.pct >= 15.0 {
        return None;
    }
    Some(Anomaly {
        model: model.model.clone(),
        kind: "low_performance".to_string(),
        severity: Severity::High,
        title: format!("{}: {}% Overall", model.display_name, model.combined.pct),
        description: "Significantly underperforming compared to other models".to_string(),
        insight: "May need task-specific fine-tuning or better system prompts for analytical tasks"
            .to_string(),
    })
}

fn bank_struggle(model: &Final25Model) -> Option<Anomaly> {
    if model.bank.partial < 3 || model.bank.pct >= 30.0 {
        return None;
    }
    Some(Anomaly {
        model: model.model.clone(),
        kind: "bank_struggle".to_string(),
        severity: Severity::Medium,
        title: format!("{}: Bank Format Issues", model.display_name),
        description: format!(
            "Low bank accuracy ({}%) with {} partial credits",
            model.bank.pct, model.bank.partial
        ),
        insight: "Likely giving answers as decimals (0.35) instead of percentages (35%)"
            .to_string(),
    })
}

/// Runs all heuristics over complete models, then merges the fixture's
/// stored anomalies, deduplicated by (model, kind).
pub fn detect_anomalies(data: &Final25Data) -> Vec<Anomaly> {
    let mut anomalies: Vec<Anomaly> = Vec::new();
    for model in data.models.iter().filter(|m| m.complete) {
        anomalies.extend(domain_gap(model));
        anomalies.extend(partial_credits(model));
        anomalies.extend(low_performance(model));
        anomalies.extend(bank_struggle(model));
    }

    for stored in &data.anomalies {
        let known = data.models.iter().any(|m| m.model == stored.model);
        let duplicate = anomalies
            .iter()
            .any(|a| a.model == stored.model && a.kind == stored.kind);
        if known && !duplicate {
            anomalies.push(Anomaly {
                model: stored.model.clone(),
                kind: stored.kind.clone(),
                severity: Severity::Medium,
                title: stored.description.clone(),
                description: stored.description.clone(),
                insight: String::new(),
            });
        }
    }
    anomalies
}
