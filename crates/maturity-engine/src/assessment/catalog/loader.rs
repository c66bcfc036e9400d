use super::{AnswerOption, Catalog, CatalogError, Domain, Question, RiskLevel};
use crate::assessment::responses::Score;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog definition rejected: {0}")]
    Invalid(#[from] CatalogError),
}

/// Serialized shape of a catalog, as shipped in JSON configuration files.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefinition {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub benchmark: Option<f64>,
    pub domains: Vec<DomainDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainDefinition {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pillars: Vec<String>,
    pub questions: Vec<QuestionDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDefinition {
    pub id: String,
    #[serde(alias = "question")]
    pub prompt: String,
    pub risk: RiskLevel,
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionDefinition {
    pub label: String,
    pub score: Score,
}

impl CatalogDefinition {
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let domains = self
            .domains
            .into_iter()
            .map(|domain| Domain {
                name: domain.name,
                weight: domain.weight,
                description: domain.description,
                pillars: domain.pillars,
                questions: domain
                    .questions
                    .into_iter()
                    .map(|question| Question {
                        id: question.id,
                        prompt: question.prompt,
                        risk: question.risk,
                        options: question
                            .options
                            .into_iter()
                            .map(|option| AnswerOption {
                                label: option.label,
                                score: option.score,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let catalog = Catalog::new(self.key, self.title, domains)?;
        match self.benchmark {
            Some(average) => catalog.with_benchmark(average),
            None => Ok(catalog),
        }
    }
}

impl Catalog {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let definition: CatalogDefinition = serde_json::from_reader(reader)?;
        Ok(definition.into_catalog()?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DATA_PLATFORM: &str = r#"{
        "key": "data-platform",
        "title": "Data Platform Readiness",
        "benchmark": 48.5,
        "domains": [
            {
                "name": "Ingestion",
                "weight": 0.7,
                "pillars": ["Reliability"],
                "questions": [
                    {
                        "id": "DP-ING-001",
                        "question": "How are batch loads scheduled?",
                        "risk": "high",
                        "options": [
                            { "label": "Cron on a single host", "score": 1 },
                            { "label": "Managed orchestrator", "score": 4 },
                            { "label": "Event-driven with replay", "score": 5 }
                        ]
                    }
                ]
            },
            {
                "name": "Quality",
                "weight": 0.7,
                "questions": [
                    {
                        "id": "DP-QA-001",
                        "prompt": "How is data quality checked?",
                        "risk": "critical",
                        "options": [
                            { "label": "Not checked", "score": 1 },
                            { "label": "Automated contracts", "score": 5 }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn loads_definitions_with_variable_option_counts() {
        let catalog =
            Catalog::from_json_reader(Cursor::new(DATA_PLATFORM)).expect("definition loads");

        assert_eq!(catalog.key(), "data-platform");
        assert_eq!(catalog.benchmark(), Some(48.5));
        assert_eq!(catalog.question_count(), 2);

        let (domain, question) = catalog.question("DP-ING-001").expect("question present");
        assert_eq!(domain.name, "Ingestion");
        assert_eq!(domain.pillars, vec!["Reliability".to_string()]);
        assert_eq!(question.options.len(), 3);
        assert_eq!(question.prompt, "How are batch loads scheduled?");

        let (_, quality) = catalog.question("DP-QA-001").expect("question present");
        assert_eq!(quality.risk, RiskLevel::Critical);
        assert_eq!(quality.options.len(), 2);
    }

    #[test]
    fn rejects_option_scores_outside_scale() {
        let definition = DATA_PLATFORM.replace(r#""score": 1 }"#, r#""score": 0 }"#);
        match Catalog::from_json_reader(Cursor::new(definition)) {
            Err(CatalogLoadError::Json(err)) => assert!(err.to_string().contains("outside")),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn surfaces_validation_failures() {
        let definition = DATA_PLATFORM.replace("DP-QA-001", "DP-ING-001");
        match Catalog::from_json_reader(Cursor::new(definition)) {
            Err(CatalogLoadError::Invalid(CatalogError::DuplicateQuestion(id))) => {
                assert_eq!(id, "DP-ING-001")
            }
            other => panic!("expected duplicate question, got {other:?}"),
        }
    }
}
