use super::views::{AssessmentInsights, AssessmentSummary, DomainScoreEntry};
use crate::assessment::benchmark::BenchmarkPosition;
use crate::assessment::catalog::RiskLevel;
use crate::assessment::maturity::MaturityLevel;

/// Number of gaps promoted into recommended actions.
const TOP_GAPS: usize = 3;

pub fn insights(summary: &AssessmentSummary) -> AssessmentInsights {
    let answered: Vec<&DomainScoreEntry> = summary
        .domains
        .iter()
        .filter(|entry| entry.answered > 0)
        .collect();

    // Ties keep the earlier domain in catalog order.
    let weakest = answered.iter().copied().reduce(|lowest, entry| {
        if entry.score < lowest.score {
            entry
        } else {
            lowest
        }
    });
    let strongest = answered.iter().copied().reduce(|highest, entry| {
        if entry.score > highest.score {
            entry
        } else {
            highest
        }
    });

    let unassessed_domains: Vec<String> = summary
        .domains
        .iter()
        .filter(|entry| entry.answered == 0)
        .map(|entry| entry.domain.clone())
        .collect();

    let critical_gaps = count_risk(summary, RiskLevel::Critical);
    let high_gaps = count_risk(summary, RiskLevel::High);

    let mut observations = Vec::new();
    if summary.answered == 0 {
        observations
            .push("No questions answered yet; the overall score is not meaningful".to_string());
    } else {
        observations.push(format!(
            "{} of {} questions answered ({:.0}% complete)",
            summary.answered, summary.total, summary.completion
        ));
        observations.push(format!(
            "Overall maturity {:.1}% ({})",
            summary.overall, summary.maturity_label
        ));

        if let Some(benchmark) = &summary.benchmark {
            let detail = match benchmark.position {
                BenchmarkPosition::AtPar => format!(
                    "In line with the industry average of {:.1}%",
                    benchmark.average
                ),
                BenchmarkPosition::Above | BenchmarkPosition::Below => format!(
                    "{:+.1} points against the industry average of {:.1}%",
                    benchmark.delta, benchmark.average
                ),
            };
            observations.push(detail);
        }
    }

    if critical_gaps > 0 {
        observations.push(format!(
            "{} critical-risk gap{} need immediate attention",
            critical_gaps,
            if critical_gaps == 1 { "" } else { "s" }
        ));
    }

    let mut recommended_actions: Vec<String> = summary
        .gaps
        .iter()
        .take(TOP_GAPS)
        .map(|gap| {
            format!(
                "Remediate {} ({}, {} risk): {}",
                gap.question_id, gap.domain, gap.risk_label, gap.prompt
            )
        })
        .collect();

    if let Some(entry) = weakest {
        if entry.maturity < MaturityLevel::Managed {
            recommended_actions.push(format!(
                "Prioritize {}, currently {:.1}% ({})",
                entry.domain, entry.score, entry.maturity_label
            ));
        }
    }

    if summary.answered > 0 && !unassessed_domains.is_empty() {
        recommended_actions.push(format!(
            "Complete the remaining domain{} to firm up the overall score: {}",
            if unassessed_domains.len() == 1 { "" } else { "s" },
            unassessed_domains.join(", ")
        ));
    }

    if recommended_actions.is_empty() && summary.answered > 0 {
        recommended_actions.push(
            "No gaps at or below the threshold; re-assess after the next change cycle".to_string(),
        );
    }

    AssessmentInsights {
        strongest_domain: strongest.map(|entry| entry.domain.clone()),
        weakest_domain: weakest.map(|entry| entry.domain.clone()),
        unassessed_domains,
        critical_gaps,
        high_gaps,
        observations,
        recommended_actions,
    }
}

fn count_risk(summary: &AssessmentSummary, risk: RiskLevel) -> usize {
    summary.gaps.iter().filter(|gap| gap.risk == risk).count()
}
