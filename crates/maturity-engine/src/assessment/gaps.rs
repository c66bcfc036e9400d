use super::catalog::{Catalog, RiskLevel};
use super::responses::{ResponseSet, Score};
use serde::Serialize;

/// Highest score still reported as a gap when no threshold is configured.
pub const DEFAULT_GAP_THRESHOLD: u8 = 2;

/// A low-scoring answered question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gap {
    pub question_id: String,
    pub domain: String,
    pub prompt: String,
    /// Label of the selected option, when one carries the stored score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub score: Score,
    pub risk: RiskLevel,
}

/// Answered catalog questions scoring at or below `threshold`, critical risk first and then
/// lowest score first. Ties keep catalog order.
pub fn find_gaps(responses: &ResponseSet, catalog: &Catalog, threshold: u8) -> Vec<Gap> {
    let mut gaps: Vec<Gap> = catalog
        .domains()
        .iter()
        .flat_map(|domain| {
            domain.questions.iter().filter_map(move |question| {
                let score = responses.get(&question.id)?;
                (score.value() <= threshold).then(|| Gap {
                    question_id: question.id.clone(),
                    domain: domain.name.clone(),
                    prompt: question.prompt.clone(),
                    answer: question.option_label(score).map(str::to_string),
                    score,
                    risk: question.risk,
                })
            })
        })
        .collect();

    gaps.sort_by_key(|gap| (gap.risk, gap.score));
    gaps
}
