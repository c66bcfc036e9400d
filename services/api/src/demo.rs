use crate::infra::{load_registry, parse_focus, parse_gap_threshold};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use maturity_engine::assessment::catalog::{standard, Catalog, CatalogRegistry};
use maturity_engine::assessment::report::views::AssessmentSummary;
use maturity_engine::assessment::report::{
    render_markdown_document, AnalysisFocus, CombinedScore, ExportDocument, NarrativePrompt,
    ReportMetadata,
};
use maturity_engine::assessment::responses::{ResponseImporter, ResponseSet, Score};
use maturity_engine::assessment::AssessmentReport;
use maturity_engine::config::AppConfig;
use maturity_engine::error::AppError;
use std::fs;
use std::path::PathBuf;

/// Option index picked for each question of the demo, cycling through the catalog.
const DEMO_PATTERN: [usize; 7] = [3, 1, 4, 0, 2, 3, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Catalog key to score against, e.g. control-tower. Repeat once per --responses file.
    #[arg(long = "catalog", required = true)]
    pub(crate) catalogs: Vec<String>,
    /// Response file for the catalog in the same position: a JSON object of question id to
    /// score, or a `Question ID,Score` CSV
    #[arg(long = "responses", required = true)]
    pub(crate) responses: Vec<PathBuf>,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Organization name recorded in Markdown and JSON output
    #[arg(long)]
    pub(crate) organization: Option<String>,
    /// Assessor name recorded in Markdown and JSON output
    #[arg(long)]
    pub(crate) assessor: Option<String>,
    /// Highest score reported as a gap (1-5). Defaults to ASSESSMENT_GAP_THRESHOLD.
    #[arg(long, value_parser = parse_gap_threshold)]
    pub(crate) gap_threshold: Option<u8>,
    /// Append the narrative prompt input for this analysis focus (text and Markdown output)
    #[arg(long, value_parser = parse_focus)]
    pub(crate) focus: Option<AnalysisFocus>,
    /// Free-form organizational context for the narrative prompt
    #[arg(long, requires = "focus")]
    pub(crate) context: Option<String>,
    /// File with externally generated narrative text to embed in the report
    #[arg(long)]
    pub(crate) narrative: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Built-in catalog to demo (control-tower or golden-architecture)
    #[arg(long)]
    pub(crate) catalog: Option<String>,
    /// Analysis focus for the narrative prompt section
    #[arg(long, value_parser = parse_focus)]
    pub(crate) focus: Option<AnalysisFocus>,
}

fn configured_registry() -> Result<(CatalogRegistry, u8), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(&config.assessment)?;
    Ok((registry, config.assessment.gap_threshold))
}

pub(crate) fn run_catalog_list() -> Result<(), AppError> {
    let (registry, _) = configured_registry()?;
    println!("Registered catalogs");
    for catalog in registry.catalogs() {
        let benchmark = catalog
            .benchmark()
            .map(|average| format!(" | benchmark {average:.1}%"))
            .unwrap_or_default();
        println!(
            "- {} ({}): {} domains | {} questions{}",
            catalog.key(),
            catalog.title(),
            catalog.domains().len(),
            catalog.question_count(),
            benchmark
        );
    }
    Ok(())
}

pub(crate) fn run_catalog_show(key: &str) -> Result<(), AppError> {
    let (registry, _) = configured_registry()?;
    let catalog = registry
        .get(key)
        .ok_or_else(|| AppError::UnknownCatalog(key.to_string()))?;

    println!("{} [{}]", catalog.title(), catalog.key());
    for domain in catalog.domains() {
        println!("\n{} (weight {:.2})", domain.name, domain.weight);
        if let Some(description) = &domain.description {
            println!("  {description}");
        }
        if !domain.pillars.is_empty() {
            println!("  Pillars: {}", domain.pillars.join(", "));
        }
        for question in &domain.questions {
            println!(
                "  {} [{}] {}",
                question.id,
                question.risk.label(),
                question.prompt
            );
            for (index, option) in question.options.iter().enumerate() {
                println!("    {}. {} (score {})", index, option.label, option.score);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let (registry, default_threshold) = configured_registry()?;
    let output = render_assessment(&registry, default_threshold, &args, Utc::now())?;
    println!("{output}");
    Ok(())
}

/// Scores every catalog/response pair and renders them as one document in the requested format.
pub(crate) fn render_assessment(
    registry: &CatalogRegistry,
    default_threshold: u8,
    args: &AssessArgs,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    if args.catalogs.len() != args.responses.len() {
        return Err(AppError::Usage(format!(
            "{} --catalog values but {} --responses files; pass them in pairs",
            args.catalogs.len(),
            args.responses.len()
        )));
    }

    let threshold = args.gap_threshold.unwrap_or(default_threshold);
    let mut catalogs = Vec::with_capacity(args.catalogs.len());
    let mut response_sets = Vec::with_capacity(args.catalogs.len());
    let mut reports = Vec::with_capacity(args.catalogs.len());
    for (key, path) in args.catalogs.iter().zip(&args.responses) {
        let catalog = registry
            .get(key)
            .ok_or_else(|| AppError::UnknownCatalog(key.clone()))?;
        let responses = ResponseImporter::from_path(path)?;
        reports.push(AssessmentReport::build(catalog, &responses, threshold));
        catalogs.push(catalog);
        response_sets.push(responses);
    }

    let narrative = match &args.narrative {
        Some(path) => Some(fs::read_to_string(path)?.trim().to_string()),
        None => None,
    };

    let mut metadata = ReportMetadata::new(generated_at);
    metadata.organization = args.organization.clone();
    metadata.assessor = args.assessor.clone();

    let mut output = match args.format {
        OutputFormat::Text => {
            let mut sections: Vec<String> = catalogs
                .iter()
                .zip(&response_sets)
                .zip(&reports)
                .map(|((catalog, responses), report)| {
                    render_text_report(catalog, responses, report)
                })
                .collect();
            if reports.len() > 1 {
                let combined = CombinedScore::from_reports(&reports);
                sections.push(format!(
                    "\nCombined score {:.1}% | {}",
                    combined.overall, combined.maturity_label
                ));
            }
            if let Some(text) = &narrative {
                sections.push(format!("\nNarrative analysis\n{text}"));
            }
            sections.join("\n")
        }
        OutputFormat::Markdown => {
            render_markdown_document(&reports, &metadata, narrative.as_deref())
        }
        OutputFormat::Json => {
            let mut document = ExportDocument::new(metadata);
            for (responses, report) in response_sets.iter().zip(&reports) {
                document.push(responses, report);
            }
            if let Some(text) = narrative {
                document = document.with_narrative(text);
            }
            return Ok(document.to_json_pretty()?);
        }
    };

    if let Some(focus) = args.focus {
        let summaries: Vec<AssessmentSummary> =
            reports.iter().map(AssessmentReport::summary).collect();
        let prompt = NarrativePrompt::build_combined(&summaries, focus, args.context.as_deref());
        output.push_str(&format!(
            "\n\nNarrative prompt ({})\n{}",
            focus.label(),
            prompt.text
        ));
    }

    Ok(output)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let registry = CatalogRegistry::standard();
    let key = args
        .catalog
        .unwrap_or_else(|| standard::CONTROL_TOWER_KEY.to_string());
    let catalog = registry
        .get(&key)
        .ok_or_else(|| AppError::UnknownCatalog(key.clone()))?;

    println!("Maturity assessment demo");
    let responses = demo_responses(catalog);
    println!(
        "Sample response set answers {} of {} questions",
        responses.len(),
        catalog.question_count()
    );

    let report = AssessmentReport::build(
        catalog,
        &responses,
        maturity_engine::assessment::DEFAULT_GAP_THRESHOLD,
    );
    println!("{}", render_text_report(catalog, &responses, &report));

    let focus = args.focus.unwrap_or(AnalysisFocus::GapAnalysis);
    let prompt = NarrativePrompt::build(&report.summary(), focus);
    println!("\nNarrative prompt input ({})", focus.label());
    for line in prompt.text.lines() {
        println!("  {line}");
    }

    Ok(())
}

/// Deterministic partial answers; every fourth question is left unanswered.
fn demo_responses(catalog: &Catalog) -> ResponseSet {
    catalog
        .domains()
        .iter()
        .flat_map(|domain| domain.questions.iter())
        .enumerate()
        .filter(|(position, _)| position % 4 != 3)
        .filter_map(|(position, question)| {
            let index = DEMO_PATTERN[position % DEMO_PATTERN.len()];
            question
                .options
                .get(index)
                .or_else(|| question.options.last())
                .map(|option| (question.id.clone(), option.score))
        })
        .collect()
}

fn render_text_report(catalog: &Catalog, responses: &ResponseSet, report: &AssessmentReport) -> String {
    let summary = report.summary();
    let insights = summary.insights();

    let mut lines = vec![
        format!("\n{} [{}]", summary.title, summary.catalog),
        format!(
            "- Overall {:.1}% | {} | {} of {} answered ({:.0}% complete)",
            summary.overall,
            summary.maturity_label,
            summary.answered,
            summary.total,
            summary.completion
        ),
    ];
    if let Some(benchmark) = &summary.benchmark {
        lines.push(format!(
            "- Benchmark {:.1}% | delta {:+.1} | {}",
            benchmark.average, benchmark.delta, benchmark.position_label
        ));
    }

    lines.push("Domain scores:".to_string());
    for entry in &summary.domains {
        if entry.answered == 0 {
            lines.push(format!(
                "  - {} (weight {:.2}): not assessed, 0/{} answered",
                entry.domain, entry.weight, entry.total
            ));
            continue;
        }
        lines.push(format!(
            "  - {} (weight {:.2}): {:.1}% {} | {}/{} answered",
            entry.domain,
            entry.weight,
            entry.score,
            entry.maturity_label,
            entry.answered,
            entry.total
        ));
        for detail in report.answers_for(&entry.domain) {
            lines.push(format!(
                "      {} {} -> {} (score {}/{})",
                detail.question_id,
                detail.prompt,
                detail.answer.as_deref().unwrap_or("-"),
                detail.score,
                Score::MAX
            ));
        }
    }

    if summary.gaps.is_empty() {
        lines.push(format!("Gaps: none at or below {}", summary.gap_threshold));
    } else {
        lines.push(format!("Gaps (score <= {}):", summary.gap_threshold));
        for gap in &summary.gaps {
            lines.push(format!(
                "  - [{}] {} {} | score {}{}",
                gap.risk_label,
                gap.question_id,
                gap.prompt,
                gap.score,
                gap.answer
                    .as_deref()
                    .map(|answer| format!(" ({answer})"))
                    .unwrap_or_default()
            ));
        }
    }

    let ignored = responses.unknown_ids(catalog);
    if !ignored.is_empty() {
        lines.push(format!(
            "Ignored responses for unknown questions: {}",
            ignored.join(", ")
        ));
    }

    lines.push("Observations:".to_string());
    lines.extend(
        insights
            .observations
            .iter()
            .map(|observation| format!("  - {observation}")),
    );
    if !insights.recommended_actions.is_empty() {
        lines.push("Recommended actions:".to_string());
        lines.extend(
            insights
                .recommended_actions
                .iter()
                .map(|action| format!("  - {action}")),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;
    use std::path::Path;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn assess_args(pairs: &[(&str, &str)], format: OutputFormat) -> AssessArgs {
        AssessArgs {
            catalogs: pairs.iter().map(|(key, _)| key.to_string()).collect(),
            responses: pairs.iter().map(|(_, file)| fixture(file)).collect(),
            format,
            organization: None,
            assessor: None,
            gap_threshold: None,
            focus: None,
            context: None,
            narrative: None,
        }
    }

    fn render(args: &AssessArgs) -> Result<String, AppError> {
        let generated_at = Utc
            .with_ymd_and_hms(2024, 6, 3, 8, 15, 0)
            .single()
            .expect("valid timestamp");
        render_assessment(&CatalogRegistry::standard(), 2, args, generated_at)
    }

    fn render_json(args: &AssessArgs) -> Value {
        let output = render(args).expect("assessment renders");
        serde_json::from_str(&output).expect("json output")
    }

    #[test]
    fn csv_and_json_response_files_score_identically() {
        let from_csv = render_json(&assess_args(
            &[("control-tower", "control-tower.csv")],
            OutputFormat::Json,
        ));
        let from_json = render_json(&assess_args(
            &[("control-tower", "control-tower.json")],
            OutputFormat::Json,
        ));

        assert_eq!(
            from_csv["assessments"][0]["summary"],
            from_json["assessments"][0]["summary"]
        );
        assert_eq!(from_csv["assessments"][0]["responses"]["CT-LZ-001"], 4);
        assert!(from_csv["assessments"][0]["responses"]
            .get("CT-NET-001")
            .is_none());
        assert_eq!(from_csv["metadata"]["generated_at"], "2024-06-03T08:15:00Z");
        assert!(from_csv.get("combined").is_none());
    }

    #[test]
    fn gap_threshold_flag_overrides_configured_default() {
        let mut args = assess_args(&[("control-tower", "control-tower.json")], OutputFormat::Json);
        let gap_ids = |json: &Value| -> Vec<String> {
            json["assessments"][0]["summary"]["gaps"]
                .as_array()
                .expect("gap list")
                .iter()
                .filter_map(|gap| gap["question_id"].as_str().map(str::to_string))
                .collect()
        };

        let defaulted = render_json(&args);
        assert_eq!(defaulted["assessments"][0]["summary"]["gap_threshold"], 2);
        assert_eq!(gap_ids(&defaulted), vec!["CT-GOV-001"]);

        args.gap_threshold = Some(3);
        let widened = render_json(&args);
        assert_eq!(widened["assessments"][0]["summary"]["gap_threshold"], 3);
        assert_eq!(gap_ids(&widened), vec!["CT-GOV-001", "CT-LZ-002"]);
    }

    #[test]
    fn markdown_covers_both_catalogs_with_narrative() {
        let mut args = assess_args(
            &[
                ("control-tower", "control-tower.csv"),
                ("golden-architecture", "golden-architecture.json"),
            ],
            OutputFormat::Markdown,
        );
        args.organization = Some("Example Corp".to_string());
        args.narrative = Some(fixture("narrative.md"));

        let markdown = render(&args).expect("markdown renders");
        assert!(markdown.starts_with("# Enterprise Assessment Report"));
        assert!(markdown.contains("Organization: Example Corp"));
        assert!(markdown.contains("## Combined Score: "));
        assert!(markdown.contains("# Control Tower Migration Readiness\n"));
        assert!(markdown.contains("# Golden Architecture (Serverless) Maturity\n"));
        assert!(markdown.contains("  - Answer: Hardcoded secrets\n  - Score: 1/5"));
        assert!(markdown.contains(
            "## Analysis & Recommendations\n\nFederate workforce identity before enrolling the remaining accounts."
        ));
    }

    #[test]
    fn json_export_over_both_catalogs_carries_combined_score_and_narrative() {
        let mut args = assess_args(
            &[
                ("control-tower", "control-tower.json"),
                ("golden-architecture", "golden-architecture.json"),
            ],
            OutputFormat::Json,
        );
        args.narrative = Some(fixture("narrative.md"));

        let json = render_json(&args);
        let control_tower = json["assessments"][0]["summary"]["overall"]
            .as_f64()
            .expect("overall");
        let golden = json["assessments"][1]["summary"]["overall"]
            .as_f64()
            .expect("overall");
        let combined = json["combined"]["overall"].as_f64().expect("combined");
        assert!((combined - (control_tower + golden) / 2.0).abs() < 1e-9);
        assert_eq!(
            json["narrative"],
            "Federate workforce identity before enrolling the remaining accounts."
        );
    }

    #[test]
    fn text_output_includes_answers_and_contextual_prompt() {
        let mut args = assess_args(
            &[
                ("control-tower", "control-tower.json"),
                ("golden-architecture", "golden-architecture.json"),
            ],
            OutputFormat::Text,
        );
        args.focus = Some(AnalysisFocus::RiskAssessment);
        args.context = Some("Regulated workloads in two regions".to_string());

        let text = render(&args).expect("text renders");
        assert!(text.contains("CT-GOV-001 "));
        assert!(text.contains("(score 1/5)"));
        assert!(text.contains("\nCombined score "));
        assert!(text.contains("Narrative prompt (Risk Assessment)"));
        assert!(text.contains("Additional context: Regulated workloads in two regions"));
        assert!(text.contains("Golden Architecture (Serverless) Maturity:\nOverall score: "));
    }

    #[test]
    fn rejects_unpaired_or_unknown_catalogs() {
        let mut args = assess_args(&[("control-tower", "control-tower.csv")], OutputFormat::Text);
        args.catalogs.push("golden-architecture".to_string());
        assert!(matches!(render(&args), Err(AppError::Usage(_))));

        let args = assess_args(&[("data-platform", "control-tower.csv")], OutputFormat::Text);
        match render(&args) {
            Err(AppError::UnknownCatalog(key)) => assert_eq!(key, "data-platform"),
            other => panic!("expected unknown catalog, got {other:?}"),
        }
    }

    #[test]
    fn demo_responses_leave_gaps_in_coverage() {
        let catalog = standard::control_tower();
        let responses = demo_responses(&catalog);

        assert_eq!(responses.len(), 13);
        assert!(!responses.contains("CT-LZ-004"));
        assert!(responses.unknown_ids(&catalog).is_empty());

        let report = AssessmentReport::build(&catalog, &responses, 2);
        assert!(report.result.overall > 0.0);
        assert!(!report.gaps.is_empty());
    }

    #[test]
    fn demo_responses_cover_every_golden_architecture_domain() {
        let catalog = standard::golden_architecture();
        let responses = demo_responses(&catalog);
        let report = AssessmentReport::build(&catalog, &responses, 2);
        assert!(report
            .result
            .domains
            .iter()
            .all(|entry| entry.answered > 0));
    }
}
