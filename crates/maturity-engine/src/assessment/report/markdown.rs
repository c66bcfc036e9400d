use super::combined::CombinedScore;
use super::export::ReportMetadata;
use super::summary::AssessmentReport;
use crate::assessment::maturity::classify;
use crate::assessment::responses::Score;
use crate::assessment::scoring::DomainScoreResult;

const NEXT_STEPS: [&str; 5] = [
    "Review identified gaps and prioritize remediation",
    "Develop a detailed implementation roadmap",
    "Establish the governance framework",
    "Plan a phased migration approach",
    "Define success metrics and KPIs",
];

/// Renders a self-contained Markdown report for one assessment.
pub fn render_markdown(report: &AssessmentReport, metadata: &ReportMetadata) -> String {
    render_markdown_document(std::slice::from_ref(report), metadata, None)
}

/// Renders one Markdown document over several catalog reports. Anything other than exactly one
/// report gets a combined score section; `narrative` is inserted verbatim before the next steps.
pub fn render_markdown_document(
    reports: &[AssessmentReport],
    metadata: &ReportMetadata,
    narrative: Option<&str>,
) -> String {
    let heading = match reports {
        [report] => format!("# {} Assessment Report", report.title),
        _ => "# Enterprise Assessment Report".to_string(),
    };
    let mut lines = vec![
        heading,
        String::new(),
        format!(
            "Generated: {}",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];
    if let Some(organization) = &metadata.organization {
        lines.push(format!("Organization: {organization}"));
    }
    if let Some(assessor) = &metadata.assessor {
        lines.push(format!("Assessor: {assessor}"));
    }

    if let [report] = reports {
        push_assessment(&mut lines, report);
    } else {
        push_combined(&mut lines, reports);
        for report in reports {
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
            lines.push(format!("# {}", report.title));
            push_assessment(&mut lines, report);
        }
    }

    if let Some(text) = narrative.map(str::trim).filter(|text| !text.is_empty()) {
        lines.push(String::new());
        lines.push("## Analysis & Recommendations".to_string());
        lines.push(String::new());
        lines.push(text.to_string());
    }

    lines.push(String::new());
    lines.push("## Next Steps".to_string());
    lines.push(String::new());
    lines.extend(
        NEXT_STEPS
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{}. {}", index + 1, step)),
    );
    lines.push(String::new());

    lines.join("\n")
}

fn push_combined(lines: &mut Vec<String>, reports: &[AssessmentReport]) {
    let combined = CombinedScore::from_reports(reports);
    lines.push(String::new());
    lines.push(format!("## Combined Score: {:.1}%", combined.overall));
    lines.push(format!("### Maturity Level: {}", combined.maturity_label));
    lines.push(String::new());

    let assessed: Vec<&str> = reports
        .iter()
        .filter(|report| report.result.answered > 0)
        .map(|report| report.title.as_str())
        .collect();
    if assessed.is_empty() {
        lines.push("No catalog has answered questions yet.".to_string());
    } else {
        lines.push(format!("Mean of the assessed catalogs: {}.", assessed.join(", ")));
    }
}

fn push_assessment(lines: &mut Vec<String>, report: &AssessmentReport) {
    lines.push(String::new());
    lines.push(format!(
        "## Overall Maturity Score: {:.1}%",
        report.result.overall
    ));
    lines.push(format!("### Maturity Level: {}", report.maturity.label()));
    lines.push(String::new());
    lines.push(format!(
        "{} of {} questions answered ({:.0}% complete).",
        report.result.answered,
        report.result.total,
        report.result.completion()
    ));

    if let Some(benchmark) = &report.benchmark {
        lines.push(String::new());
        lines.push(format!(
            "Industry benchmark: {:.1}% ({:+.1} points, {}).",
            benchmark.benchmark,
            benchmark.delta,
            benchmark.position.label().to_lowercase()
        ));
    }

    lines.push(String::new());
    lines.push("## Domain Scores".to_string());
    lines.push(String::new());
    lines.push("| Domain | Weight | Answered | Score | Maturity |".to_string());
    lines.push("| --- | --- | --- | --- | --- |".to_string());
    lines.extend(report.result.domains.iter().map(domain_row));

    lines.push(String::new());
    lines.push("## Gaps".to_string());
    lines.push(String::new());
    if report.gaps.is_empty() {
        lines.push(format!(
            "No answered questions score at or below {}.",
            report.gap_threshold
        ));
    } else {
        lines.push("| Risk | Question | Domain | Score | Current answer |".to_string());
        lines.push("| --- | --- | --- | --- | --- |".to_string());
        for gap in &report.gaps {
            lines.push(format!(
                "| {} | {} {} | {} | {} | {} |",
                gap.risk.label(),
                gap.question_id,
                escape_cell(&gap.prompt),
                escape_cell(&gap.domain),
                gap.score,
                gap.answer.as_deref().map(escape_cell).unwrap_or_default()
            ));
        }
    }

    lines.push(String::new());
    lines.push("## Response Details".to_string());
    if report.answers.is_empty() {
        lines.push(String::new());
        lines.push("No questions answered yet.".to_string());
        return;
    }
    for entry in report.result.domains.iter().filter(|entry| entry.is_answered()) {
        lines.push(String::new());
        lines.push(format!(
            "### {} ({:.1}%, {})",
            entry.domain,
            entry.score,
            classify(entry.score).label()
        ));
        lines.push(String::new());
        for detail in report.answers_for(&entry.domain) {
            lines.push(format!("- **{}** {}", detail.question_id, detail.prompt));
            lines.push(format!(
                "  - Answer: {}",
                detail.answer.as_deref().unwrap_or("-")
            ));
            lines.push(format!("  - Score: {}/{}", detail.score, Score::MAX));
        }
    }
}

fn domain_row(entry: &DomainScoreResult) -> String {
    let score = if entry.is_answered() {
        format!("{:.1}%", entry.score)
    } else {
        "-".to_string()
    };
    format!(
        "| {} | {:.2} | {}/{} | {} | {} |",
        escape_cell(&entry.domain),
        entry.weight,
        entry.answered,
        entry.total,
        score,
        classify(entry.score).label()
    )
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
