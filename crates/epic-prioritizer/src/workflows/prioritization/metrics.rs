use serde::{Deserialize, Serialize};

use super::catalog::Category;
use super::domain::Assessment;
use super::scale::weight;

/// Secondary metrics computed from an assessment rather than rated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedMetric {
    Roi,
}

impl DerivedMetric {
    pub const fn ordered() -> [Self; 1] {
        [Self::Roi]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Roi => "roi",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Roi => "ROI (Revenue + Cost / Effort)",
        }
    }

    pub fn value(self, assessment: &Assessment) -> f64 {
        match self {
            Self::Roi => roi(assessment),
        }
    }
}

/// `(revenue weight + cost weight) / effort weight`.
///
/// The effort weight is floored at 1 so a zero-weight size can never divide by zero.
pub fn roi(assessment: &Assessment) -> f64 {
    let level_weight = |category| assessment.level(category).map(weight).unwrap_or(0);
    let numerator =
        u32::from(level_weight(Category::Revenue)) + u32::from(level_weight(Category::Cost));
    let effort = assessment.t_shirt_size.weight().max(1);
    f64::from(numerator) / f64::from(effort)
}
