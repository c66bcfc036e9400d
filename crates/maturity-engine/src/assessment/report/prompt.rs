use super::combined::CombinedScore;
use super::views::AssessmentSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of narrative requested from the external text-generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFocus {
    GapAnalysis,
    Roadmap,
    RiskAssessment,
    CostBenefit,
    Architecture,
    ComplianceMapping,
}

impl AnalysisFocus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::GapAnalysis,
            Self::Roadmap,
            Self::RiskAssessment,
            Self::CostBenefit,
            Self::Architecture,
            Self::ComplianceMapping,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GapAnalysis => "Gap Analysis & Prioritization",
            Self::Roadmap => "Implementation Roadmap",
            Self::RiskAssessment => "Risk Assessment",
            Self::CostBenefit => "Cost-Benefit Analysis",
            Self::Architecture => "Architecture Recommendations",
            Self::ComplianceMapping => "Compliance Mapping",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::GapAnalysis => "gap-analysis",
            Self::Roadmap => "roadmap",
            Self::RiskAssessment => "risk-assessment",
            Self::CostBenefit => "cost-benefit",
            Self::Architecture => "architecture",
            Self::ComplianceMapping => "compliance-mapping",
        }
    }

    fn instructions(self) -> &'static [&'static str] {
        match self {
            Self::GapAnalysis => &[
                "Group domains into critical gaps (below 40%), moderate gaps (40-60%), minor gaps (60-80%) and strengths (80% and above).",
                "For each gap give the root cause, business impact, remediation steps, effort as a T-shirt size and prerequisites.",
            ],
            Self::Roadmap => &[
                "Lay out a phased plan: foundation (months 1-3), core implementation (months 4-6) and optimization (months 7-12).",
                "List dependencies, risks and success metrics for each phase.",
            ],
            Self::RiskAssessment => &[
                "Analyze technical, operational, security, financial and timeline risks.",
                "Rate probability and impact as high, medium or low and give mitigation and contingency plans.",
            ],
            Self::CostBenefit => &[
                "Break down implementation, migration, ongoing operational and opportunity costs.",
                "Describe expected benefits, an ROI framework, break-even and total cost of ownership.",
            ],
            Self::Architecture => &[
                "Recommend account structure, guardrails, network topology and reference serverless patterns.",
                "Cover security, observability, delivery pipelines and disaster recovery as cross-cutting concerns.",
            ],
            Self::ComplianceMapping => &[
                "Map the gaps to SOC 2, PCI DSS, HIPAA, GDPR and the AWS Well-Architected pillars.",
                "For each framework list current gaps, controls that address them and evidence collection automation.",
            ],
        }
    }
}

impl fmt::Display for AnalysisFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAnalysisFocus(pub String);

impl fmt::Display for UnknownAnalysisFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown analysis focus '{}'", self.0)
    }
}

impl std::error::Error for UnknownAnalysisFocus {}

impl FromStr for AnalysisFocus {
    type Err = UnknownAnalysisFocus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ordered()
            .into_iter()
            .find(|focus| focus.slug() == normalized)
            .ok_or_else(|| UnknownAnalysisFocus(value.to_string()))
    }
}

/// Prompt input for an external narrative service. Carries scores and gaps only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativePrompt {
    pub focus: AnalysisFocus,
    pub text: String,
}

impl NarrativePrompt {
    pub fn build(summary: &AssessmentSummary, focus: AnalysisFocus) -> Self {
        Self::build_with_context(summary, focus, None)
    }

    /// Like [`NarrativePrompt::build`], adding free-form organizational context.
    pub fn build_with_context(
        summary: &AssessmentSummary,
        focus: AnalysisFocus,
        context: Option<&str>,
    ) -> Self {
        let mut lines = vec![
            format!("{} for the {} assessment.", focus.label(), summary.title),
            String::new(),
        ];
        push_summary(&mut lines, summary);
        Self::finish(lines, focus, context)
    }

    /// One prompt over several catalogs, led by their combined score.
    pub fn build_combined(
        summaries: &[AssessmentSummary],
        focus: AnalysisFocus,
        context: Option<&str>,
    ) -> Self {
        if let [summary] = summaries {
            return Self::build_with_context(summary, focus, context);
        }

        let titles: Vec<&str> = summaries
            .iter()
            .map(|summary| summary.title.as_str())
            .collect();
        let combined = CombinedScore::from_summaries(summaries);
        let mut lines = vec![
            format!(
                "{} for the {} assessments.",
                focus.label(),
                titles.join(" and ")
            ),
            String::new(),
            format!(
                "Combined score: {:.1}% ({}).",
                combined.overall, combined.maturity_label
            ),
        ];
        for summary in summaries {
            lines.push(String::new());
            lines.push(format!("{}:", summary.title));
            push_summary(&mut lines, summary);
        }
        Self::finish(lines, focus, context)
    }

    fn finish(mut lines: Vec<String>, focus: AnalysisFocus, context: Option<&str>) -> Self {
        lines.push(String::new());
        lines.push(format!(
            "Additional context: {}",
            context
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or("None provided")
        ));

        lines.push(String::new());
        lines.extend(focus.instructions().iter().map(|line| line.to_string()));

        Self {
            focus,
            text: lines.join("\n"),
        }
    }
}

fn push_summary(lines: &mut Vec<String>, summary: &AssessmentSummary) {
    lines.push(format!(
        "Overall score: {:.1}% ({}), {} of {} questions answered.",
        summary.overall, summary.maturity_label, summary.answered, summary.total
    ));

    if let Some(benchmark) = &summary.benchmark {
        lines.push(format!(
            "Industry average: {:.1}% (delta {:+.1}).",
            benchmark.average, benchmark.delta
        ));
    }

    lines.push(String::new());
    lines.push("Domain scores:".to_string());
    for entry in &summary.domains {
        if entry.answered == 0 {
            lines.push(format!("- {}: not assessed", entry.domain));
        } else {
            lines.push(format!(
                "- {}: {:.1}% ({}, weight {:.2}, {}/{} answered)",
                entry.domain,
                entry.score,
                entry.maturity_label,
                entry.weight,
                entry.answered,
                entry.total
            ));
        }
    }

    lines.push(String::new());
    if summary.gaps.is_empty() {
        lines.push(format!(
            "Gaps (score <= {}): none among answered questions.",
            summary.gap_threshold
        ));
    } else {
        lines.push(format!("Gaps (score <= {}):", summary.gap_threshold));
        for gap in &summary.gaps {
            lines.push(format!(
                "- [{}] {} {} ({}): score {}",
                gap.risk_label, gap.question_id, gap.prompt, gap.domain, gap.score
            ));
        }
    }
}
