use serde::Serialize;

use super::catalog::CategoryCatalog;
use super::domain::Assessment;
use super::ranking::compare_names;
use super::scale::weight;

/// An assessment paired with its direct score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAssessment {
    pub assessment: Assessment,
    pub score: u32,
}

/// Unweighted sum of level weights across the catalog. Unrated categories add 0.
pub fn score(assessment: &Assessment, catalog: &CategoryCatalog) -> u32 {
    catalog
        .categories()
        .map(|category| u32::from(assessment.level(category).map(weight).unwrap_or(0)))
        .sum()
}

/// Highest score first. Equal scores fall back to the epic name ignoring case, then
/// the raw name, then the id.
pub fn rank_by_score(
    assessments: &[Assessment],
    catalog: &CategoryCatalog,
) -> Vec<ScoredAssessment> {
    let mut scored: Vec<ScoredAssessment> = assessments
        .iter()
        .map(|assessment| ScoredAssessment {
            score: score(assessment, catalog),
            assessment: assessment.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| compare_names(&a.assessment, &b.assessment))
    });

    scored
}
