use crate::workflows::prioritization::{AssessmentDraft, Category, RatingLevel};

/// Validation errors raised before a draft is stored or sent for corroboration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("epic name is required")]
    MissingEpicName,
    #[error("epic name must be {max} characters or less (found {found})")]
    EpicNameTooLong { max: usize, found: usize },
    #[error("a level is required for {0}")]
    MissingRating(Category),
    #[error("unrecognized level for {0}; expected high, mid, or low")]
    UnrecognizedLevel(Category),
    #[error("{0} cannot be rated N/A")]
    NotApplicableNotAllowed(Category),
    #[error("notes for {category} must be {max} characters or less (found {found})")]
    NotesTooLong {
        category: Category,
        max: usize,
        found: usize,
    },
    #[error("overall considerations must be {max} characters or less (found {found})")]
    OverallConsiderationsTooLong { max: usize, found: usize },
}

/// Field limits of the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeLimits {
    pub epic_name: usize,
    pub notes: usize,
    pub overall_considerations: usize,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            epic_name: 100,
            notes: 500,
            overall_considerations: 1000,
        }
    }
}

/// Guard responsible for turning user input into drafts the store will accept.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    limits: IntakeLimits,
}

impl IntakeGuard {
    pub fn with_limits(limits: IntakeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> IntakeLimits {
        self.limits
    }

    /// Validate a draft, returning it with the epic name and notes trimmed.
    pub fn validate(
        &self,
        mut draft: AssessmentDraft,
    ) -> Result<AssessmentDraft, IntakeViolation> {
        draft.epic_name = draft.epic_name.trim().to_string();
        if draft.epic_name.is_empty() {
            return Err(IntakeViolation::MissingEpicName);
        }
        let name_length = draft.epic_name.chars().count();
        if name_length > self.limits.epic_name {
            return Err(IntakeViolation::EpicNameTooLong {
                max: self.limits.epic_name,
                found: name_length,
            });
        }

        for category in Category::ordered() {
            let rating = draft
                .ratings
                .get_mut(category)
                .ok_or(IntakeViolation::MissingRating(category))?;

            match rating.level {
                RatingLevel::Unrecognized => {
                    return Err(IntakeViolation::UnrecognizedLevel(category));
                }
                RatingLevel::NotApplicable if !category.allows_not_applicable() => {
                    return Err(IntakeViolation::NotApplicableNotAllowed(category));
                }
                _ => {}
            }

            rating.notes = rating.notes.trim().to_string();
            let notes_length = rating.notes.chars().count();
            if notes_length > self.limits.notes {
                return Err(IntakeViolation::NotesTooLong {
                    category,
                    max: self.limits.notes,
                    found: notes_length,
                });
            }
        }

        let overall_length = draft.overall_considerations.chars().count();
        if overall_length > self.limits.overall_considerations {
            return Err(IntakeViolation::OverallConsiderationsTooLong {
                max: self.limits.overall_considerations,
                found: overall_length,
            });
        }

        Ok(draft)
    }
}
