//! Deterministic scoring and ranking of epic assessments.
//!
//! Everything in this module is a pure function of the assessments handed in: the
//! engine owns only the immutable category catalog and never touches storage.

pub mod catalog;
pub mod criteria;
pub mod domain;
pub mod metrics;
mod ranking;
pub mod report;
pub mod scale;
mod scoring;

#[cfg(test)]
mod tests;

pub use catalog::{Category, CategoryCatalog, CategoryDefinition, LevelGuidance, UnknownCategory};
pub use criteria::{CriteriaOrder, Criterion, CriterionParseError, RankingCriterion};
pub use domain::{Assessment, AssessmentDraft, AssessmentId, CategoryRating, CategoryRatings};
pub use metrics::{roi, DerivedMetric};
pub use ranking::rank;
pub use report::{
    DirectEntry, PrimaryRanking, PrioritizationReport, PrioritizationRequest, RankedEntry,
    RoiEntry,
};
pub use scale::{weight, Confidence, EffortSize, RatingLevel};
pub use scoring::{rank_by_score, score, ScoredAssessment};

/// Scorer bound to one catalog, shared by the service layer and the CLI.
#[derive(Debug, Clone, Default)]
pub struct PrioritizationEngine {
    catalog: CategoryCatalog,
}

impl PrioritizationEngine {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn score(&self, assessment: &Assessment) -> u32 {
        score(assessment, &self.catalog)
    }

    pub fn rank_by_score(&self, assessments: &[Assessment]) -> Vec<ScoredAssessment> {
        rank_by_score(assessments, &self.catalog)
    }

    pub fn rank(&self, assessments: &[Assessment], order: &CriteriaOrder) -> Vec<Assessment> {
        rank(assessments, order.as_slice())
    }

    /// Rank by one category first, breaking ties with the other categories in
    /// catalog order and finally by name.
    pub fn rank_by_primary(
        &self,
        assessments: &[Assessment],
        primary: Category,
    ) -> Vec<Assessment> {
        let order = CriteriaOrder::with_primary(&self.catalog, primary);
        rank(assessments, order.as_slice())
    }

    pub fn default_order(&self) -> CriteriaOrder {
        CriteriaOrder::standard(&self.catalog)
    }

    pub fn report(
        &self,
        assessments: &[Assessment],
        request: &PrioritizationRequest,
    ) -> PrioritizationReport {
        report::build_report(&self.catalog, assessments, request)
    }
}
