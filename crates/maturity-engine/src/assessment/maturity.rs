use serde::Serialize;

/// Ordinal maturity band; the derived ordering is the rank, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    NotAssessed,
    Initial,
    Developing,
    Managed,
    Optimized,
}

impl MaturityLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::NotAssessed,
            Self::Initial,
            Self::Developing,
            Self::Managed,
            Self::Optimized,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAssessed => "Not Assessed",
            Self::Initial => "Initial",
            Self::Developing => "Developing",
            Self::Managed => "Managed",
            Self::Optimized => "Optimized",
        }
    }

    /// Inclusive lower bound of the band, in percent.
    pub const fn lower_bound(self) -> f64 {
        match self {
            Self::NotAssessed => 0.0,
            Self::Initial => 20.0,
            Self::Developing => 40.0,
            Self::Managed => 60.0,
            Self::Optimized => 80.0,
        }
    }
}

pub fn classify(score: f64) -> MaturityLevel {
    // NaN fails every comparison and lands in the lowest band.
    if score >= 80.0 {
        MaturityLevel::Optimized
    } else if score >= 60.0 {
        MaturityLevel::Managed
    } else if score >= 40.0 {
        MaturityLevel::Developing
    } else if score >= 20.0 {
        MaturityLevel::Initial
    } else {
        MaturityLevel::NotAssessed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_higher_band() {
        assert_eq!(classify(80.0), MaturityLevel::Optimized);
        assert_eq!(classify(79.999), MaturityLevel::Managed);
        assert_eq!(classify(60.0), MaturityLevel::Managed);
        assert_eq!(classify(40.0), MaturityLevel::Developing);
        assert_eq!(classify(20.0), MaturityLevel::Initial);
        assert_eq!(classify(19.99), MaturityLevel::NotAssessed);
    }

    #[test]
    fn total_over_the_real_line() {
        assert_eq!(classify(0.0), MaturityLevel::NotAssessed);
        assert_eq!(classify(-5.0), MaturityLevel::NotAssessed);
        assert_eq!(classify(f64::NAN), MaturityLevel::NotAssessed);
        assert_eq!(classify(f64::INFINITY), MaturityLevel::Optimized);
        assert_eq!(classify(100.0).label(), "Optimized");
    }

    #[test]
    fn lower_bounds_classify_into_their_own_band() {
        for level in MaturityLevel::ordered() {
            assert_eq!(classify(level.lower_bound()), level);
        }
        assert!(MaturityLevel::NotAssessed < MaturityLevel::Optimized);
    }
}
