//! Optional second opinion on an assessment's levels from an external text generator.
//!
//! The generator sees the user's levels, notes, and overall considerations and answers
//! with one level per category. Scoring never depends on this step; it only produces
//! an adjusted draft the user may accept.

mod generator;
mod parser;
mod prompt;

pub use generator::{CommandTextGenerator, GeneratorError, TextGenerator};
pub use parser::{extract_json_object, parse_corroboration, ParseError};
pub use prompt::build_corroboration_prompt;

use serde::{Deserialize, Serialize};

use crate::workflows::prioritization::{AssessmentDraft, Category, CategoryRating, RatingLevel};

/// Levels proposed by the generator, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorroboratedLevels {
    pub urgency: RatingLevel,
    pub market_impact: RatingLevel,
    pub strategic: RatingLevel,
    pub revenue: RatingLevel,
    pub cost: RatingLevel,
}

impl CorroboratedLevels {
    pub fn level(&self, category: Category) -> RatingLevel {
        match category {
            Category::Urgency => self.urgency,
            Category::MarketImpact => self.market_impact,
            Category::Strategic => self.strategic,
            Category::Revenue => self.revenue,
            Category::Cost => self.cost,
        }
    }

    /// Adopt the proposed levels, keeping the user's notes, and report what moved.
    pub fn apply(&self, draft: &AssessmentDraft) -> CorroborationOutcome {
        let mut adjusted = draft.clone();
        let mut changes = Vec::new();

        for category in Category::ordered() {
            let proposed = self.level(category);
            let previous = draft.ratings.level(category);

            if previous != Some(proposed) {
                changes.push(LevelChange {
                    category,
                    from: previous,
                    to: proposed,
                });
            }

            let notes = draft
                .ratings
                .get(category)
                .map(|rating| rating.notes.clone())
                .unwrap_or_default();
            adjusted
                .ratings
                .set(category, CategoryRating::new(proposed).with_notes(notes));
        }

        CorroborationOutcome {
            draft: adjusted,
            changes,
        }
    }
}

/// One category whose level the generator changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelChange {
    pub category: Category,
    pub from: Option<RatingLevel>,
    pub to: RatingLevel,
}

/// Adjusted draft plus the list of changes, returned for the user to accept or discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorroborationOutcome {
    pub draft: AssessmentDraft,
    pub changes: Vec<LevelChange>,
}

/// Failures of the corroboration step, surfaced to callers as recoverable errors.
#[derive(Debug, thiserror::Error)]
pub enum CorroborationError {
    #[error("no text generator is configured for corroboration")]
    Disabled,
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_reports_changes_and_keeps_notes() {
        let mut draft = AssessmentDraft::new("Partner API");
        draft.ratings.set(
            Category::Urgency,
            CategoryRating::new(RatingLevel::Low).with_notes("contract renews in Q3"),
        );
        let levels = CorroboratedLevels {
            urgency: RatingLevel::High,
            market_impact: RatingLevel::Mid,
            strategic: RatingLevel::Mid,
            revenue: RatingLevel::Mid,
            cost: RatingLevel::Low,
        };

        let outcome = levels.apply(&draft);

        assert_eq!(
            outcome.changes,
            vec![
                LevelChange {
                    category: Category::Urgency,
                    from: Some(RatingLevel::Low),
                    to: RatingLevel::High,
                },
                LevelChange {
                    category: Category::Cost,
                    from: Some(RatingLevel::Mid),
                    to: RatingLevel::Low,
                },
            ]
        );
        let urgency = outcome
            .draft
            .ratings
            .get(Category::Urgency)
            .expect("urgency rated");
        assert_eq!(urgency.level, RatingLevel::High);
        assert_eq!(urgency.notes, "contract renews in Q3");
        assert_eq!(outcome.draft.epic_name, "Partner API");
    }

    #[test]
    fn apply_without_differences_reports_nothing() {
        let draft = AssessmentDraft::new("Steady");
        let levels = CorroboratedLevels {
            urgency: RatingLevel::Mid,
            market_impact: RatingLevel::Mid,
            strategic: RatingLevel::Mid,
            revenue: RatingLevel::Mid,
            cost: RatingLevel::Mid,
        };

        let outcome = levels.apply(&draft);

        assert!(outcome.changes.is_empty());
        assert_eq!(outcome.draft, draft);
    }
}
