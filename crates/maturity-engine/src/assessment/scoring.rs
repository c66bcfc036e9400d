use super::catalog::{Catalog, Domain};
use super::responses::{ResponseSet, Score};
use serde::Serialize;

/// Score of one domain over its answered questions only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScoreResult {
    pub domain: String,
    pub score: f64,
    pub answered: usize,
    pub total: usize,
    pub weight: f64,
}

impl DomainScoreResult {
    pub fn is_answered(&self) -> bool {
        self.answered > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    pub overall: f64,
    /// One entry per catalog domain, in catalog order.
    pub domains: Vec<DomainScoreResult>,
    pub answered: usize,
    pub total: usize,
}

impl OverallResult {
    pub fn domain(&self, name: &str) -> Option<&DomainScoreResult> {
        self.domains.iter().find(|entry| entry.domain == name)
    }

    /// Share of catalog questions answered, as a percentage.
    pub fn completion(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 * 100.0 / self.total as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answered == 0
    }
}

pub fn score_domain(responses: &ResponseSet, domain: &Domain) -> DomainScoreResult {
    let (total_points, answered) = domain
        .questions
        .iter()
        .filter_map(|question| responses.get(&question.id))
        .fold((0_u64, 0_usize), |(points, count), score| {
            (points + u64::from(score.value()), count + 1)
        });

    // Integer sum first keeps all-max and all-min domains at exactly 100 and 20.
    let score = if answered > 0 {
        (total_points as f64 * 100.0) / (answered as f64 * f64::from(Score::MAX))
    } else {
        0.0
    };

    DomainScoreResult {
        domain: domain.name.clone(),
        score: score.clamp(0.0, 100.0),
        answered,
        total: domain.questions.len(),
        weight: domain.weight,
    }
}

/// Weighted overall score, renormalized over the domains that have at least one answer.
pub fn aggregate(responses: &ResponseSet, catalog: &Catalog) -> OverallResult {
    let domains: Vec<DomainScoreResult> = catalog
        .domains()
        .iter()
        .map(|domain| score_domain(responses, domain))
        .collect();

    let answered_weight: f64 = domains
        .iter()
        .filter(|entry| entry.is_answered())
        .map(|entry| entry.weight)
        .sum();

    let overall = if answered_weight > 0.0 {
        domains
            .iter()
            .filter(|entry| entry.is_answered())
            .map(|entry| entry.score * (entry.weight / answered_weight))
            .sum::<f64>()
            .clamp(0.0, 100.0)
    } else {
        0.0
    };

    OverallResult {
        overall,
        answered: domains.iter().map(|entry| entry.answered).sum(),
        total: domains.iter().map(|entry| entry.total).sum(),
        domains,
    }
}
