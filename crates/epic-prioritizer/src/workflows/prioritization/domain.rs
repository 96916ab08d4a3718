use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::Category;
use super::scale::{Confidence, EffortSize, RatingLevel};

/// Opaque identifier assigned when an assessment is first stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl AssessmentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Level plus the free-text justification for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRating {
    pub level: RatingLevel,
    #[serde(default)]
    pub notes: String,
}

impl CategoryRating {
    pub fn new(level: RatingLevel) -> Self {
        Self {
            level,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// One rating slot per category. Slots are optional so records written by older
/// clients still load; an empty slot scores as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRatings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<CategoryRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_impact: Option<CategoryRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategic: Option<CategoryRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<CategoryRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CategoryRating>,
}

impl CategoryRatings {
    /// Every category rated at the same level, notes left empty.
    pub fn uniform(level: RatingLevel) -> Self {
        let mut ratings = Self::default();
        for category in Category::ordered() {
            ratings.set(category, CategoryRating::new(level));
        }
        ratings
    }

    /// Ratings given in catalog order: urgency, market impact, strategic, revenue, cost.
    pub fn from_levels(levels: [RatingLevel; 5]) -> Self {
        let mut ratings = Self::default();
        for (category, level) in Category::ordered().into_iter().zip(levels) {
            ratings.set(category, CategoryRating::new(level));
        }
        ratings
    }

    pub fn get(&self, category: Category) -> Option<&CategoryRating> {
        match category {
            Category::Urgency => self.urgency.as_ref(),
            Category::MarketImpact => self.market_impact.as_ref(),
            Category::Strategic => self.strategic.as_ref(),
            Category::Revenue => self.revenue.as_ref(),
            Category::Cost => self.cost.as_ref(),
        }
    }

    pub fn get_mut(&mut self, category: Category) -> Option<&mut CategoryRating> {
        match category {
            Category::Urgency => self.urgency.as_mut(),
            Category::MarketImpact => self.market_impact.as_mut(),
            Category::Strategic => self.strategic.as_mut(),
            Category::Revenue => self.revenue.as_mut(),
            Category::Cost => self.cost.as_mut(),
        }
    }

    pub fn set(&mut self, category: Category, rating: CategoryRating) {
        let slot = match category {
            Category::Urgency => &mut self.urgency,
            Category::MarketImpact => &mut self.market_impact,
            Category::Strategic => &mut self.strategic,
            Category::Revenue => &mut self.revenue,
            Category::Cost => &mut self.cost,
        };
        *slot = Some(rating);
    }

    pub fn level(&self, category: Category) -> Option<RatingLevel> {
        self.get(category).map(|rating| rating.level)
    }
}

/// Header fields and ratings as entered by a user (or adjusted by corroboration),
/// before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    pub epic_name: String,
    #[serde(default)]
    pub t_shirt_size: EffortSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(flatten)]
    pub ratings: CategoryRatings,
    #[serde(default)]
    pub overall_considerations: String,
}

impl AssessmentDraft {
    /// Blank draft matching the form defaults: size `m`, every category `mid`.
    pub fn new(epic_name: impl Into<String>) -> Self {
        Self {
            epic_name: epic_name.into(),
            t_shirt_size: EffortSize::default(),
            confidence: None,
            ratings: CategoryRatings::uniform(RatingLevel::Mid),
            overall_considerations: String::new(),
        }
    }
}

/// Persisted assessment of one epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub epic_name: String,
    #[serde(default)]
    pub t_shirt_size: EffortSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(flatten)]
    pub ratings: CategoryRatings,
    #[serde(default)]
    pub overall_considerations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Assessment {
    pub fn from_draft(
        id: AssessmentId,
        draft: AssessmentDraft,
        owner_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let AssessmentDraft {
            epic_name,
            t_shirt_size,
            confidence,
            ratings,
            overall_considerations,
        } = draft;

        Self {
            id,
            epic_name,
            t_shirt_size,
            confidence,
            ratings,
            overall_considerations,
            owner_id,
            created_at,
            updated_at: None,
        }
    }

    /// Replace every editable field. Identity, owner, and creation time are kept.
    pub fn apply_draft(&mut self, draft: AssessmentDraft, updated_at: DateTime<Utc>) {
        self.epic_name = draft.epic_name;
        self.t_shirt_size = draft.t_shirt_size;
        self.confidence = draft.confidence;
        self.ratings = draft.ratings;
        self.overall_considerations = draft.overall_considerations;
        self.updated_at = Some(updated_at);
    }

    pub fn to_draft(&self) -> AssessmentDraft {
        AssessmentDraft {
            epic_name: self.epic_name.clone(),
            t_shirt_size: self.t_shirt_size,
            confidence: self.confidence,
            ratings: self.ratings.clone(),
            overall_considerations: self.overall_considerations.clone(),
        }
    }

    pub fn level(&self, category: Category) -> Option<RatingLevel> {
        self.ratings.level(category)
    }
}
