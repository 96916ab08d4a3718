use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::prioritization::{
    Assessment, AssessmentDraft, AssessmentId, CategoryRatings, EffortSize, RatingLevel,
};

use RatingLevel::{High, Low, Mid};

pub(super) fn created_at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

/// Levels are given in catalog order: urgency, market impact, strategic, revenue, cost.
pub(super) fn assessment(
    id: &str,
    epic_name: &str,
    levels: [RatingLevel; 5],
    size: EffortSize,
) -> Assessment {
    let mut draft = AssessmentDraft::new(epic_name);
    draft.ratings = CategoryRatings::from_levels(levels);
    draft.t_shirt_size = size;
    Assessment::from_draft(AssessmentId(id.to_string()), draft, None, created_at(0))
}

pub(super) fn alpha() -> Assessment {
    assessment("a-alpha", "Alpha", [High, Mid, Low, Mid, Low], EffortSize::S)
}

pub(super) fn beta() -> Assessment {
    assessment("a-beta", "Beta", [Mid, Mid, Mid, Mid, Mid], EffortSize::M)
}

pub(super) fn gamma() -> Assessment {
    assessment("a-gamma", "Gamma", [Low, High, High, High, High], EffortSize::Xl)
}

pub(super) fn portfolio() -> Vec<Assessment> {
    vec![alpha(), beta(), gamma()]
}

pub(super) fn names(assessments: &[Assessment]) -> Vec<&str> {
    assessments
        .iter()
        .map(|assessment| assessment.epic_name.as_str())
        .collect()
}
