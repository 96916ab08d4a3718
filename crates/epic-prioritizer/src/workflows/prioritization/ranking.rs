use std::cmp::Ordering;

use super::criteria::{Criterion, RankingCriterion};
use super::domain::Assessment;

/// Order assessments by the enabled criteria, in rank order.
///
/// The first criterion on which two assessments differ decides (higher value
/// first). Assessments tied on every enabled criterion are ordered by epic name
/// ignoring case, then by raw name and id, so the result never depends on input order.
pub fn rank(assessments: &[Assessment], criteria: &[RankingCriterion]) -> Vec<Assessment> {
    let active: Vec<Criterion> = criteria
        .iter()
        .filter(|criterion| criterion.enabled)
        .map(|criterion| criterion.key)
        .collect();

    let mut ranked = assessments.to_vec();
    ranked.sort_by(|a, b| compare(&active, a, b));
    ranked
}

pub(crate) fn compare(active: &[Criterion], a: &Assessment, b: &Assessment) -> Ordering {
    for criterion in active {
        let ordering = criterion.value(b).total_cmp(&criterion.value(a));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    compare_names(a, b)
}

/// Ascending epic name ignoring case, so "apple" sorts before "Banana". Names that
/// only differ in case fall back to the raw name, then the id.
pub(crate) fn compare_names(a: &Assessment, b: &Assessment) -> Ordering {
    a.epic_name
        .to_lowercase()
        .cmp(&b.epic_name.to_lowercase())
        .then_with(|| a.epic_name.cmp(&b.epic_name))
        .then_with(|| a.id.cmp(&b.id))
}
