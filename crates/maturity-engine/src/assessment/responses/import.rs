use super::{ResponseError, ResponseSet, Score};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid response JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question {question_id} has an invalid score: {source}")]
    InvalidScore {
        question_id: String,
        #[source]
        source: ResponseError,
    },
    #[error("question {question_id} has a non-numeric score '{value}'")]
    NonNumericScore { question_id: String, value: String },
    #[error("question {0} is answered more than once")]
    Duplicate(String),
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Reads response sets exported as CSV (`Question ID,Score`) or as a JSON object.
pub struct ResponseImporter;

impl ResponseImporter {
    /// Loads a file, choosing JSON for `.json` paths and CSV otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<ResponseSet, ResponseImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    /// Rows with a blank score are unanswered questions and are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<ResponseSet, ResponseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut responses = ResponseSet::new();

        for row in csv_reader.deserialize::<ResponseRow>() {
            let row = row?;
            let question_id = row.question_id.trim().to_string();
            let Some(raw_score) = row.score else {
                continue;
            };

            let value = raw_score.trim().parse::<i64>().map_err(|_| {
                ResponseImportError::NonNumericScore {
                    question_id: question_id.clone(),
                    value: raw_score.clone(),
                }
            })?;
            let score =
                Score::try_from(value).map_err(|source| ResponseImportError::InvalidScore {
                    question_id: question_id.clone(),
                    source,
                })?;

            if responses.record(question_id.clone(), score).is_some() {
                return Err(ResponseImportError::Duplicate(question_id));
            }
        }

        Ok(responses)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<ResponseSet, ResponseImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_import_skips_blank_scores() {
        let csv = "Question ID,Score\nCT-LZ-001,4\nCT-LZ-002,\n CT-GOV-001 , 2 \n";
        let responses =
            ResponseImporter::from_csv_reader(Cursor::new(csv)).expect("valid csv imports");

        assert_eq!(responses.len(), 2);
        assert_eq!(responses.get("CT-LZ-001").map(Score::value), Some(4));
        assert!(!responses.contains("CT-LZ-002"));
        assert_eq!(responses.get("CT-GOV-001").map(Score::value), Some(2));
    }

    #[test]
    fn csv_import_rejects_zero_scores() {
        let csv = "Question ID,Score\nCT-LZ-001,0\n";
        match ResponseImporter::from_csv_reader(Cursor::new(csv)) {
            Err(ResponseImportError::InvalidScore {
                question_id,
                source,
            }) => {
                assert_eq!(question_id, "CT-LZ-001");
                assert_eq!(source, ResponseError::ScoreOutOfRange(0));
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn csv_import_rejects_option_labels_in_score_column() {
        let csv = "Question ID,Score\nCT-LZ-001,Basic account separation\n";
        assert!(matches!(
            ResponseImporter::from_csv_reader(Cursor::new(csv)),
            Err(ResponseImportError::NonNumericScore { .. })
        ));
    }

    #[test]
    fn csv_import_rejects_duplicate_answers() {
        let csv = "Question ID,Score\nCT-LZ-001,3\nCT-LZ-001,4\n";
        match ResponseImporter::from_csv_reader(Cursor::new(csv)) {
            Err(ResponseImportError::Duplicate(id)) => assert_eq!(id, "CT-LZ-001"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn json_import_reads_plain_objects() {
        let json = r#"{ "GA-COMP-001": 5, "GA-SEC-002": 1 }"#;
        let responses =
            ResponseImporter::from_json_reader(Cursor::new(json)).expect("valid json imports");
        assert_eq!(responses.get("GA-SEC-002").map(Score::value), Some(1));
    }

    #[test]
    fn json_import_rejects_duplicate_answers_like_csv() {
        let json = r#"{ "CT-LZ-001": 1, "CT-LZ-001": 5 }"#;
        match ResponseImporter::from_json_reader(Cursor::new(json)) {
            Err(ResponseImportError::Json(err)) => {
                assert!(err.to_string().contains("CT-LZ-001 is answered more than once"))
            }
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_picks_format_by_extension() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

        let from_csv = ResponseImporter::from_path(fixtures.join("control-tower-responses.csv"))
            .expect("csv fixture imports");
        let from_json = ResponseImporter::from_path(fixtures.join("control-tower-responses.json"))
            .expect("json fixture imports");

        assert_eq!(from_csv, from_json);
        assert_eq!(from_json.len(), 6);
    }
}
