use super::views::{
    AssessmentInsights, AssessmentSummary, BenchmarkView, DomainScoreEntry, GapView,
};
use crate::assessment::benchmark::BenchmarkComparison;
use crate::assessment::catalog::Catalog;
use crate::assessment::gaps::{find_gaps, Gap};
use crate::assessment::maturity::{classify, MaturityLevel};
use crate::assessment::responses::{ResponseSet, Score};
use crate::assessment::scoring::{aggregate, DomainScoreResult, OverallResult};
use serde::Serialize;
use tracing::debug;

/// One answered catalog question with the option it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerDetail {
    pub question_id: String,
    pub domain: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub score: Score,
}

/// Every derived result for one catalog and response set, computed once per read.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentReport {
    pub catalog_key: String,
    pub title: String,
    pub gap_threshold: u8,
    pub result: OverallResult,
    pub maturity: MaturityLevel,
    pub gaps: Vec<Gap>,
    pub benchmark: Option<BenchmarkComparison>,
    /// Answered questions in catalog order.
    pub answers: Vec<AnswerDetail>,
}

impl AssessmentReport {
    pub fn build(catalog: &Catalog, responses: &ResponseSet, gap_threshold: u8) -> Self {
        let unknown = responses.unknown_ids(catalog);
        if !unknown.is_empty() {
            debug!(
                catalog = catalog.key(),
                ignored = unknown.len(),
                ids = ?unknown,
                "ignoring responses for questions outside the catalog"
            );
        }

        let result = aggregate(responses, catalog);
        let maturity = classify(result.overall);
        let gaps = find_gaps(responses, catalog, gap_threshold);
        let benchmark = catalog
            .benchmark()
            .map(|average| BenchmarkComparison::new(result.overall, average));
        let answers = answer_details(catalog, responses);

        Self {
            catalog_key: catalog.key().to_string(),
            title: catalog.title().to_string(),
            gap_threshold,
            result,
            maturity,
            gaps,
            benchmark,
            answers,
        }
    }

    /// Answered questions of one domain, in catalog order.
    pub fn answers_for<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a AnswerDetail> {
        self.answers
            .iter()
            .filter(move |detail| detail.domain == domain)
    }

    pub fn summary(&self) -> AssessmentSummary {
        let domains = self
            .result
            .domains
            .iter()
            .map(DomainScoreResult::to_view)
            .collect();

        let gaps = self.gaps.iter().map(Gap::to_view).collect();

        let benchmark = self.benchmark.map(|comparison| BenchmarkView {
            average: comparison.benchmark,
            delta: comparison.delta,
            position: comparison.position,
            position_label: comparison.position.label(),
        });

        AssessmentSummary {
            catalog: self.catalog_key.clone(),
            title: self.title.clone(),
            overall: self.result.overall,
            maturity: self.maturity,
            maturity_label: self.maturity.label(),
            answered: self.result.answered,
            total: self.result.total,
            completion: self.result.completion(),
            gap_threshold: self.gap_threshold,
            domains,
            gaps,
            benchmark,
        }
    }
}

fn answer_details(catalog: &Catalog, responses: &ResponseSet) -> Vec<AnswerDetail> {
    catalog
        .domains()
        .iter()
        .flat_map(|domain| {
            domain.questions.iter().filter_map(move |question| {
                let score = responses.get(&question.id)?;
                Some(AnswerDetail {
                    question_id: question.id.clone(),
                    domain: domain.name.clone(),
                    prompt: question.prompt.clone(),
                    answer: question.option_label(score).map(str::to_string),
                    score,
                })
            })
        })
        .collect()
}

impl AssessmentSummary {
    pub fn insights(&self) -> AssessmentInsights {
        super::insights(self)
    }
}

impl DomainScoreResult {
    pub fn to_view(&self) -> DomainScoreEntry {
        let maturity = classify(self.score);
        DomainScoreEntry {
            domain: self.domain.clone(),
            score: self.score,
            answered: self.answered,
            total: self.total,
            weight: self.weight,
            maturity,
            maturity_label: maturity.label(),
        }
    }
}

impl Gap {
    pub fn to_view(&self) -> GapView {
        GapView {
            question_id: self.question_id.clone(),
            domain: self.domain.clone(),
            prompt: self.prompt.clone(),
            answer: self.answer.clone(),
            score: self.score.value(),
            risk: self.risk,
            risk_label: self.risk.label(),
        }
    }
}
