use crate::assessment::benchmark::BenchmarkPosition;
use crate::assessment::catalog::RiskLevel;
use crate::assessment::maturity::MaturityLevel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScoreEntry {
    pub domain: String,
    pub score: f64,
    pub answered: usize,
    pub total: usize,
    pub weight: f64,
    pub maturity: MaturityLevel,
    pub maturity_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapView {
    pub question_id: String,
    pub domain: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub score: u8,
    pub risk: RiskLevel,
    pub risk_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkView {
    pub average: f64,
    pub delta: f64,
    pub position: BenchmarkPosition,
    pub position_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub catalog: String,
    pub title: String,
    pub overall: f64,
    pub maturity: MaturityLevel,
    pub maturity_label: &'static str,
    pub answered: usize,
    pub total: usize,
    pub completion: f64,
    pub gap_threshold: u8,
    pub domains: Vec<DomainScoreEntry>,
    pub gaps: Vec<GapView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_domain: Option<String>,
    pub unassessed_domains: Vec<String>,
    pub critical_gaps: usize,
    pub high_gaps: usize,
    pub observations: Vec<String>,
    pub recommended_actions: Vec<String>,
}
