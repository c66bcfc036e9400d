mod combined;
mod export;
mod insights;
mod markdown;
mod prompt;
mod summary;
pub mod views;

pub use combined::CombinedScore;
pub use export::{CatalogExport, ExportDocument, ReportMetadata};
pub use insights::insights;
pub use markdown::{render_markdown, render_markdown_document};
pub use prompt::{AnalysisFocus, NarrativePrompt, UnknownAnalysisFocus};
pub use summary::{AnswerDetail, AssessmentReport};
