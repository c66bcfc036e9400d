//! Scoring, gap analysis and reporting for weighted multiple-choice maturity assessments.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
