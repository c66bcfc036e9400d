use serde::Serialize;

/// Deltas within this many percentage points count as at par.
pub const AT_PAR_TOLERANCE: f64 = 0.05;

/// Signed distance of the overall score from the industry average.
pub fn compare(overall: f64, benchmark: f64) -> f64 {
    overall - benchmark
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkPosition {
    Above,
    AtPar,
    Below,
}

impl BenchmarkPosition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Above => "Above industry average",
            Self::AtPar => "At industry average",
            Self::Below => "Below industry average",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub overall: f64,
    pub benchmark: f64,
    pub delta: f64,
    pub position: BenchmarkPosition,
}

impl BenchmarkComparison {
    pub fn new(overall: f64, benchmark: f64) -> Self {
        let delta = compare(overall, benchmark);
        let position = if delta.abs() <= AT_PAR_TOLERANCE {
            BenchmarkPosition::AtPar
        } else if delta > 0.0 {
            BenchmarkPosition::Above
        } else {
            BenchmarkPosition::Below
        };

        Self {
            overall,
            benchmark,
            delta,
            position,
        }
    }
}
