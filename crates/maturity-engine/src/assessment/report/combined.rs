use super::summary::AssessmentReport;
use super::views::AssessmentSummary;
use crate::assessment::maturity::{classify, MaturityLevel};
use serde::Serialize;

/// Cross-catalog headline score: the mean overall score of every catalog with at least one
/// answer. A single assessed catalog passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedScore {
    pub overall: f64,
    pub maturity: MaturityLevel,
    pub maturity_label: &'static str,
    /// Keys of the contributing catalogs, in input order.
    pub catalogs: Vec<String>,
}

impl CombinedScore {
    pub fn from_reports(reports: &[AssessmentReport]) -> Self {
        Self::from_scores(
            reports
                .iter()
                .filter(|report| report.result.answered > 0)
                .map(|report| (report.catalog_key.as_str(), report.result.overall)),
        )
    }

    pub fn from_summaries(summaries: &[AssessmentSummary]) -> Self {
        Self::from_scores(
            summaries
                .iter()
                .filter(|summary| summary.answered > 0)
                .map(|summary| (summary.catalog.as_str(), summary.overall)),
        )
    }

    fn from_scores<'a>(scores: impl Iterator<Item = (&'a str, f64)>) -> Self {
        let (catalogs, overalls): (Vec<String>, Vec<f64>) = scores
            .map(|(key, overall)| (key.to_string(), overall))
            .unzip();

        let overall = if overalls.is_empty() {
            0.0
        } else {
            overalls.iter().sum::<f64>() / overalls.len() as f64
        };
        let maturity = classify(overall);

        Self {
            overall,
            maturity,
            maturity_label: maturity.label(),
            catalogs,
        }
    }

    pub fn is_assessed(&self) -> bool {
        !self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::standard;
    use crate::assessment::gaps::DEFAULT_GAP_THRESHOLD;
    use crate::assessment::responses::{ResponseSet, Score};

    fn score(value: u8) -> Score {
        Score::new(value).expect("valid score")
    }

    fn reports(control_tower: &ResponseSet, golden: &ResponseSet) -> Vec<AssessmentReport> {
        vec![
            AssessmentReport::build(
                &standard::control_tower(),
                control_tower,
                DEFAULT_GAP_THRESHOLD,
            ),
            AssessmentReport::build(
                &standard::golden_architecture(),
                golden,
                DEFAULT_GAP_THRESHOLD,
            ),
        ]
    }

    #[test]
    fn averages_assessed_catalogs() {
        let mut control_tower = ResponseSet::new();
        control_tower.record("CT-LZ-001", score(4));
        let mut golden = ResponseSet::new();
        golden.record("GA-API-001", score(1));
        golden.record("GA-API-002", score(4));

        let reports = reports(&control_tower, &golden);
        assert_eq!(reports[0].result.overall, 80.0);
        assert_eq!(reports[1].result.overall, 50.0);

        let combined = CombinedScore::from_reports(&reports);
        assert_eq!(combined.overall, 65.0);
        assert_eq!(combined.maturity, MaturityLevel::Managed);
        assert_eq!(combined.catalogs, vec!["control-tower", "golden-architecture"]);

        let summaries: Vec<AssessmentSummary> =
            reports.iter().map(AssessmentReport::summary).collect();
        assert_eq!(CombinedScore::from_summaries(&summaries), combined);
    }

    #[test]
    fn unassessed_catalog_does_not_drag_the_mean_down() {
        let mut golden = ResponseSet::new();
        golden.record("GA-SEC-001", score(2));

        let combined = CombinedScore::from_reports(&reports(&ResponseSet::new(), &golden));
        assert_eq!(combined.overall, 40.0);
        assert_eq!(combined.maturity_label, "Developing");
        assert_eq!(combined.catalogs, vec!["golden-architecture"]);
    }

    #[test]
    fn nothing_answered_is_not_assessed() {
        let combined =
            CombinedScore::from_reports(&reports(&ResponseSet::new(), &ResponseSet::new()));
        assert_eq!(combined.overall, 0.0);
        assert_eq!(combined.maturity, MaturityLevel::NotAssessed);
        assert!(!combined.is_assessed());
    }
}
