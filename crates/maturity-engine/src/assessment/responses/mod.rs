//! Caller-owned answers to a catalog's questions.
//!
//! A question is unanswered exactly when its id is absent from the [`ResponseSet`]. There is no
//! sentinel score for "not assessed": clearing an answer removes the key, and a zero is rejected
//! as out of range rather than read as unanswered.

mod import;

pub use import::{ResponseImportError, ResponseImporter};

use super::catalog::Catalog;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Maturity score attached to a selected option, always within `Score::MIN..=Score::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    /// Every valid score, lowest first.
    pub const ALL: [Score; 5] = [Score(1), Score(2), Score(3), Score(4), Score(5)];

    pub fn new(value: u8) -> Result<Self, ResponseError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ResponseError::ScoreOutOfRange(i64::from(value)))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ResponseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ResponseError::ScoreOutOfRange(value))
            .and_then(Score::new)
    }
}

impl TryFrom<u8> for Score {
    type Error = ResponseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    ScoreOutOfRange(i64),
    UnknownQuestion(String),
    OptionOutOfRange {
        question_id: String,
        index: usize,
        options: usize,
    },
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::ScoreOutOfRange(value) => write!(
                f,
                "score {} is outside {}..={}",
                value,
                Score::MIN,
                Score::MAX
            ),
            ResponseError::UnknownQuestion(id) => {
                write!(f, "question {} is not part of the catalog", id)
            }
            ResponseError::OptionOutOfRange {
                question_id,
                index,
                options,
            } => write!(
                f,
                "option {} does not exist for question {} ({} options)",
                index, question_id, options
            ),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Sparse mapping of question id to the chosen score.
///
/// Deserializes from a JSON object of id to score and rejects an id that appears twice, matching
/// the CSV importer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<String, Score>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an answer, returning the score it replaced.
    pub fn record(&mut self, question_id: impl Into<String>, score: Score) -> Option<Score> {
        self.answers.insert(question_id.into(), score)
    }

    /// Marks a question as not assessed by dropping its answer.
    pub fn clear(&mut self, question_id: &str) -> Option<Score> {
        self.answers.remove(question_id)
    }

    /// Records the score of the option at `option_index` of a catalog question.
    pub fn select_option(
        &mut self,
        catalog: &Catalog,
        question_id: &str,
        option_index: usize,
    ) -> Result<Score, ResponseError> {
        let (_, question) = catalog
            .question(question_id)
            .ok_or_else(|| ResponseError::UnknownQuestion(question_id.to_owned()))?;

        let option = question.options.get(option_index).ok_or_else(|| {
            ResponseError::OptionOutOfRange {
                question_id: question_id.to_owned(),
                index: option_index,
                options: question.options.len(),
            }
        })?;

        self.answers.insert(question.id.clone(), option.score);
        Ok(option.score)
    }

    pub fn get(&self, question_id: &str) -> Option<Score> {
        self.answers.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Score)> + '_ {
        self.answers
            .iter()
            .map(|(question_id, score)| (question_id.as_str(), *score))
    }

    /// Ids that the catalog does not know about; scoring and gap analysis skip them.
    pub fn unknown_ids<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        self.answers
            .keys()
            .filter(|question_id| catalog.question(question_id).is_none())
            .map(String::as_str)
            .collect()
    }
}

impl<'de> Deserialize<'de> for ResponseSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResponseSetVisitor)
    }
}

struct ResponseSetVisitor;

impl<'de> Visitor<'de> for ResponseSetVisitor {
    type Value = ResponseSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of question id to score")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut answers = BTreeMap::new();
        while let Some((question_id, score)) = map.next_entry::<String, Score>()? {
            match answers.entry(question_id) {
                Entry::Vacant(slot) => {
                    slot.insert(score);
                }
                Entry::Occupied(slot) => {
                    return Err(de::Error::custom(format!(
                        "question {} is answered more than once",
                        slot.key()
                    )));
                }
            }
        }
        Ok(ResponseSet { answers })
    }
}

impl FromIterator<(String, Score)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (String, Score)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::standard;

    fn score(value: u8) -> Score {
        Score::new(value).expect("valid score")
    }

    #[test]
    fn score_rejects_values_outside_scale() {
        assert_eq!(Score::new(0), Err(ResponseError::ScoreOutOfRange(0)));
        assert_eq!(Score::new(6), Err(ResponseError::ScoreOutOfRange(6)));
        assert_eq!(Score::try_from(-3_i64), Err(ResponseError::ScoreOutOfRange(-3)));
        assert_eq!(Score::try_from(5_i64).map(Score::value), Ok(5));
    }

    #[test]
    fn clearing_an_answer_removes_the_key() {
        let mut responses = ResponseSet::new();
        responses.record("CT-LZ-001", score(4));
        assert!(responses.contains("CT-LZ-001"));

        assert_eq!(responses.clear("CT-LZ-001"), Some(score(4)));
        assert!(!responses.contains("CT-LZ-001"));
        assert!(responses.is_empty());
    }

    #[test]
    fn deserializing_rejects_zero_instead_of_treating_it_as_unanswered() {
        let err = serde_json::from_str::<ResponseSet>(r#"{"CT-LZ-001": 0}"#)
            .expect_err("zero must be rejected");
        assert!(err.to_string().contains("outside 1..=5"));

        let responses: ResponseSet =
            serde_json::from_str(r#"{"CT-LZ-001": 3, "CT-GOV-002": 5}"#).expect("valid set");
        assert_eq!(responses.get("CT-LZ-001"), Some(score(3)));
        assert_eq!(responses.len(), 2);
    }

    #[test]
    fn deserializing_rejects_repeated_question_ids() {
        let err = serde_json::from_str::<ResponseSet>(r#"{"CT-LZ-001": 1, "CT-LZ-001": 5}"#)
            .expect_err("repeated id must be rejected");
        assert!(err
            .to_string()
            .contains("question CT-LZ-001 is answered more than once"));

        let err = serde_json::from_str::<ResponseSet>(r#"["CT-LZ-001", 3]"#)
            .expect_err("arrays are not response sets");
        assert!(err.to_string().contains("a map of question id to score"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut responses = ResponseSet::new();
        responses.record("GA-API-001", score(2));
        let json = serde_json::to_value(&responses).expect("serializes");
        assert_eq!(json, serde_json::json!({ "GA-API-001": 2 }));
    }

    #[test]
    fn select_option_resolves_option_scores() {
        let catalog = standard::control_tower();
        let mut responses = ResponseSet::new();

        // Account-count question scores its options in descending order.
        let selected = responses
            .select_option(&catalog, "CT-LZ-004", 0)
            .expect("option exists");
        assert_eq!(selected, score(5));
        assert_eq!(responses.get("CT-LZ-004"), Some(score(5)));

        assert_eq!(
            responses.select_option(&catalog, "CT-LZ-004", 9),
            Err(ResponseError::OptionOutOfRange {
                question_id: "CT-LZ-004".to_string(),
                index: 9,
                options: 5,
            })
        );
        assert_eq!(
            responses.select_option(&catalog, "XX-999", 0),
            Err(ResponseError::UnknownQuestion("XX-999".to_string()))
        );
    }

    #[test]
    fn unknown_ids_lists_stale_answers() {
        let catalog = standard::control_tower();
        let mut responses = ResponseSet::new();
        responses.record("CT-LZ-001", score(3));
        responses.record("legacy_q_7", score(1));

        assert_eq!(responses.unknown_ids(&catalog), vec!["legacy_q_7"]);
    }
}
