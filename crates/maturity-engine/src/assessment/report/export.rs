use super::combined::CombinedScore;
use super::summary::AssessmentReport;
use super::views::AssessmentSummary;
use crate::assessment::responses::ResponseSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Caller-supplied context stamped onto exported reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
}

impl ReportMetadata {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            organization: None,
            assessor: None,
        }
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_assessor(mut self, assessor: impl Into<String>) -> Self {
        self.assessor = Some(assessor.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogExport {
    pub catalog: String,
    pub responses: ResponseSet,
    pub summary: AssessmentSummary,
}

/// Raw-data export: metadata plus the responses and computed summary of each catalog. With more
/// than one catalog the document also carries their combined score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub metadata: ReportMetadata,
    pub assessments: Vec<CatalogExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<CombinedScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl ExportDocument {
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            assessments: Vec::new(),
            combined: None,
            narrative: None,
        }
    }

    pub fn push(&mut self, responses: &ResponseSet, report: &AssessmentReport) {
        self.assessments.push(CatalogExport {
            catalog: report.catalog_key.clone(),
            responses: responses.clone(),
            summary: report.summary(),
        });

        if self.assessments.len() > 1 {
            let summaries: Vec<AssessmentSummary> = self
                .assessments
                .iter()
                .map(|assessment| assessment.summary.clone())
                .collect();
            self.combined = Some(CombinedScore::from_summaries(&summaries));
        }
    }

    /// Attaches externally generated narrative text verbatim.
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = Some(narrative.into());
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::standard;
    use crate::assessment::gaps::DEFAULT_GAP_THRESHOLD;
    use crate::assessment::responses::Score;
    use chrono::TimeZone;

    #[test]
    fn export_carries_metadata_responses_and_scores() {
        let generated_at = Utc
            .with_ymd_and_hms(2024, 3, 18, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let metadata = ReportMetadata::new(generated_at)
            .with_organization("Example Corp")
            .with_assessor("Platform Team");

        let catalog = standard::control_tower();
        let mut responses = ResponseSet::new();
        responses.record("CT-LZ-001", Score::new(4).expect("valid score"));
        let report = AssessmentReport::build(&catalog, &responses, DEFAULT_GAP_THRESHOLD);

        let mut document = ExportDocument::new(metadata);
        document.push(&responses, &report);

        let json = serde_json::to_value(&document).expect("serializes");
        assert_eq!(json["metadata"]["generated_at"], "2024-03-18T09:30:00Z");
        assert_eq!(json["metadata"]["organization"], "Example Corp");
        assert_eq!(json["assessments"][0]["catalog"], "control-tower");
        assert_eq!(json["assessments"][0]["responses"]["CT-LZ-001"], 4);
        assert_eq!(json["assessments"][0]["summary"]["overall"], 80.0);
        assert!(json.get("narrative").is_none());
        assert!(json.get("combined").is_none());
    }

    #[test]
    fn export_over_both_catalogs_carries_combined_score() {
        let generated_at = Utc
            .with_ymd_and_hms(2024, 3, 18, 9, 30, 0)
            .single()
            .expect("valid timestamp");

        let mut control_tower = ResponseSet::new();
        control_tower.record("CT-LZ-001", Score::new(4).expect("valid score"));
        let mut golden = ResponseSet::new();
        golden.record("GA-SEC-001", Score::new(3).expect("valid score"));

        let mut document = ExportDocument::new(ReportMetadata::new(generated_at))
            .with_narrative("Prioritize identity federation.");
        document.push(
            &control_tower,
            &AssessmentReport::build(
                &standard::control_tower(),
                &control_tower,
                DEFAULT_GAP_THRESHOLD,
            ),
        );
        document.push(
            &golden,
            &AssessmentReport::build(
                &standard::golden_architecture(),
                &golden,
                DEFAULT_GAP_THRESHOLD,
            ),
        );

        let json = serde_json::to_value(&document).expect("serializes");
        assert_eq!(json["assessments"][1]["catalog"], "golden-architecture");
        assert_eq!(json["combined"]["overall"], 70.0);
        assert_eq!(json["combined"]["maturity_label"], "Managed");
        assert_eq!(json["narrative"], "Prioritize identity federation.");
    }

    #[test]
    fn pretty_json_includes_narrative_when_attached() {
        let generated_at = Utc
            .with_ymd_and_hms(2024, 3, 18, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let document =
            ExportDocument::new(ReportMetadata::new(generated_at)).with_narrative("Focus on IAM.");

        let rendered = document.to_json_pretty().expect("renders");
        assert!(rendered.contains("\"narrative\": \"Focus on IAM.\""));
        assert!(!rendered.contains("organization"));
    }
}
