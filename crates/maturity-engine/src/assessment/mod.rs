//! Weighted maturity assessment: catalogs, responses and the pure scoring pipeline over them.

pub mod benchmark;
pub mod catalog;
pub mod gaps;
pub mod maturity;
pub mod report;
pub mod responses;
pub mod router;
pub mod scoring;

pub use benchmark::{compare, BenchmarkComparison, BenchmarkPosition};
pub use catalog::{Catalog, CatalogRegistry, Domain, Question, RiskLevel};
pub use gaps::{find_gaps, Gap, DEFAULT_GAP_THRESHOLD};
pub use maturity::{classify, MaturityLevel};
pub use report::{AssessmentReport, CombinedScore};
pub use responses::{ResponseSet, Score};
pub use scoring::{aggregate, score_domain, DomainScoreResult, OverallResult};
