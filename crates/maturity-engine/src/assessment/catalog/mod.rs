mod loader;
mod registry;
pub mod standard;

pub use loader::{
    CatalogDefinition, CatalogLoadError, DomainDefinition, OptionDefinition, QuestionDefinition,
};
pub use registry::CatalogRegistry;

use super::responses::Score;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Severity attached to a question; gaps are ordered critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    pub label: String,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub risk: RiskLevel,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Label of the first option carrying `score`, used when echoing an answer back.
    pub fn option_label(&self, score: Score) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.score == score)
            .map(|option| option.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Domain {
    pub name: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pillars: Vec<String>,
    pub questions: Vec<Question>,
}

/// Validated, read-only question catalog for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    key: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<f64>,
    domains: Vec<Domain>,
}

impl Catalog {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        domains: Vec<Domain>,
    ) -> Result<Self, CatalogError> {
        let key = key.into();
        if domains.is_empty() {
            return Err(CatalogError::Empty(key));
        }

        let mut domain_names = HashSet::new();
        let mut question_ids = HashSet::new();
        for domain in &domains {
            if !domain_names.insert(domain.name.as_str()) {
                return Err(CatalogError::DuplicateDomain(domain.name.clone()));
            }

            if !domain.weight.is_finite() || domain.weight <= 0.0 || domain.weight > 1.0 {
                return Err(CatalogError::InvalidWeight {
                    domain: domain.name.clone(),
                    weight: domain.weight,
                });
            }

            for question in &domain.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion(question.id.clone()));
                }

                if question.options.is_empty() {
                    return Err(CatalogError::NoOptions(question.id.clone()));
                }

                let mut labels = HashSet::new();
                for option in &question.options {
                    if !labels.insert(option.label.as_str()) {
                        return Err(CatalogError::DuplicateOption {
                            question_id: question.id.clone(),
                            label: option.label.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            key,
            title: title.into(),
            benchmark: None,
            domains,
        })
    }

    /// Attaches the industry reference average used by the benchmark comparison.
    pub fn with_benchmark(mut self, average: f64) -> Result<Self, CatalogError> {
        self.set_benchmark(average)?;
        Ok(self)
    }

    /// Replaces the industry reference average in place.
    pub fn set_benchmark(&mut self, average: f64) -> Result<(), CatalogError> {
        if !average.is_finite() || !(0.0..=100.0).contains(&average) {
            return Err(CatalogError::InvalidBenchmark(average));
        }
        self.benchmark = Some(average);
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn benchmark(&self) -> Option<f64> {
        self.benchmark
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.name == name)
    }

    pub fn question(&self, id: &str) -> Option<(&Domain, &Question)> {
        self.domains.iter().find_map(|domain| {
            domain
                .questions
                .iter()
                .find(|question| question.id == id)
                .map(|question| (domain, question))
        })
    }

    pub fn question_count(&self) -> usize {
        self.domains
            .iter()
            .map(|domain| domain.questions.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Empty(String),
    DuplicateDomain(String),
    InvalidWeight { domain: String, weight: f64 },
    DuplicateQuestion(String),
    NoOptions(String),
    DuplicateOption { question_id: String, label: String },
    InvalidBenchmark(f64),
    DuplicateCatalog(String),
    UnknownCatalog(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty(key) => write!(f, "catalog {} has no domains", key),
            CatalogError::DuplicateDomain(name) => write!(f, "domain {} is defined twice", name),
            CatalogError::InvalidWeight { domain, weight } => write!(
                f,
                "domain {} has weight {} outside (0, 1]",
                domain, weight
            ),
            CatalogError::DuplicateQuestion(id) => write!(f, "question {} is defined twice", id),
            CatalogError::NoOptions(id) => write!(f, "question {} has no answer options", id),
            CatalogError::DuplicateOption { question_id, label } => write!(
                f,
                "question {} lists option '{}' more than once",
                question_id, label
            ),
            CatalogError::InvalidBenchmark(value) => {
                write!(f, "benchmark average {} is outside 0..=100", value)
            }
            CatalogError::DuplicateCatalog(key) => {
                write!(f, "catalog {} is already registered", key)
            }
            CatalogError::UnknownCatalog(key) => write!(f, "catalog {} is not registered", key),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, score: u8) -> AnswerOption {
        AnswerOption {
            label: label.to_string(),
            score: Score::new(score).expect("valid score"),
        }
    }

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Prompt for {id}"),
            risk: RiskLevel::Medium,
            options: vec![option("None", 1), option("Some", 3), option("Full", 5)],
        }
    }

    fn domain(name: &str, weight: f64, ids: &[&str]) -> Domain {
        Domain {
            name: name.to_string(),
            weight,
            description: None,
            pillars: Vec::new(),
            questions: ids.iter().map(|id| question(id)).collect(),
        }
    }

    #[test]
    fn risk_levels_order_critical_first() {
        let mut levels = vec![
            RiskLevel::Low,
            RiskLevel::Critical,
            RiskLevel::Medium,
            RiskLevel::High,
        ];
        levels.sort();
        assert_eq!(levels, RiskLevel::ordered().to_vec());
    }

    #[test]
    fn accepts_weights_that_do_not_sum_to_one() {
        let catalog = Catalog::new(
            "ops",
            "Operations",
            vec![domain("A", 0.6, &["A-1"]), domain("B", 0.6, &["B-1", "B-2"])],
        )
        .expect("catalog builds");

        assert_eq!(catalog.question_count(), 3);
        let (owner, found) = catalog.question("B-2").expect("question present");
        assert_eq!(owner.name, "B");
        assert_eq!(found.id, "B-2");
    }

    #[test]
    fn rejects_duplicate_question_ids_across_domains() {
        let err = Catalog::new(
            "ops",
            "Operations",
            vec![domain("A", 0.5, &["Q-1"]), domain("B", 0.5, &["Q-1"])],
        )
        .expect_err("duplicate ids rejected");
        assert_eq!(err, CatalogError::DuplicateQuestion("Q-1".to_string()));
    }

    #[test]
    fn rejects_out_of_range_weights() {
        for weight in [0.0, -0.2, 1.5, f64::NAN] {
            let result = Catalog::new("ops", "Operations", vec![domain("A", weight, &["Q-1"])]);
            assert!(
                matches!(result, Err(CatalogError::InvalidWeight { .. })),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_questions_without_options() {
        let mut bare = domain("A", 1.0, &["Q-1"]);
        bare.questions[0].options.clear();
        let err = Catalog::new("ops", "Operations", vec![bare]).expect_err("no options");
        assert_eq!(err, CatalogError::NoOptions("Q-1".to_string()));
    }

    #[test]
    fn rejects_empty_catalog_and_bad_benchmark() {
        assert_eq!(
            Catalog::new("ops", "Operations", Vec::new()),
            Err(CatalogError::Empty("ops".to_string()))
        );

        let catalog = Catalog::new("ops", "Operations", vec![domain("A", 1.0, &["Q-1"])])
            .expect("catalog builds");
        assert_eq!(
            catalog.clone().with_benchmark(120.0),
            Err(CatalogError::InvalidBenchmark(120.0))
        );
        let catalog = catalog.with_benchmark(55.0).expect("benchmark in range");
        assert_eq!(catalog.benchmark(), Some(55.0));
    }

    #[test]
    fn option_label_finds_first_matching_score() {
        let question = question("Q-1");
        assert_eq!(
            question.option_label(Score::new(3).expect("valid")),
            Some("Some")
        );
        assert_eq!(question.option_label(Score::new(2).expect("valid")), None);
    }
}
