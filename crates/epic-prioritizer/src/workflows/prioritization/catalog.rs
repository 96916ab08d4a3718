use super::scale::RatingLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value dimension an epic is rated on. The serialized key is stable across storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Urgency,
    MarketImpact,
    Strategic,
    Revenue,
    Cost,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Urgency,
            Self::MarketImpact,
            Self::Strategic,
            Self::Revenue,
            Self::Cost,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::MarketImpact => "marketImpact",
            Self::Strategic => "strategic",
            Self::Revenue => "revenue",
            Self::Cost => "cost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgency => "Level of Urgency",
            Self::MarketImpact => "Market Impact",
            Self::Strategic => "Strategic",
            Self::Revenue => "Maximise Revenue",
            Self::Cost => "Minimize Cost",
        }
    }

    /// Financial categories may be rated `na` when no business case exists.
    pub const fn allows_not_applicable(self) -> bool {
        matches!(self, Self::Revenue | Self::Cost)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|category| {
                category.key().eq_ignore_ascii_case(trimmed)
                    || category.key().replace('I', "_i").eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Guidance shown next to one level of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGuidance {
    pub level: RatingLevel,
    pub label: String,
    pub description: String,
}

/// Display identity and rating guidance for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub category: Category,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub guidance: Vec<LevelGuidance>,
}

impl CategoryDefinition {
    pub fn guidance_for(&self, level: RatingLevel) -> Option<&LevelGuidance> {
        self.guidance.iter().find(|entry| entry.level == level)
    }
}

/// Immutable, ordered table of categories handed to every scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    definitions: Vec<CategoryDefinition>,
}

impl CategoryCatalog {
    /// The catalog used by the product: all five categories in their canonical order.
    pub fn standard() -> Self {
        let definitions = Category::ordered()
            .into_iter()
            .map(|category| CategoryDefinition {
                category,
                label: category.label().to_string(),
                description: description_for(category).to_string(),
                guidance: RatingLevel::ordered()
                    .into_iter()
                    .map(|level| LevelGuidance {
                        level,
                        label: level.label().to_string(),
                        description: guidance_for(category, level).to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self { definitions }
    }

    pub fn definitions(&self) -> &[CategoryDefinition] {
        &self.definitions
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.definitions.iter().map(|definition| definition.category)
    }

    pub fn definition(&self, category: Category) -> Option<&CategoryDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.category == category)
    }

    pub fn label(&self, category: Category) -> &str {
        self.definition(category)
            .map(|definition| definition.label.as_str())
            .unwrap_or_else(|| category.label())
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn description_for(category: Category) -> &'static str {
    match category {
        Category::Strategic => {
            "Strategic topics which cannot only be allocated to a EUR impact (e.g. governance, basis for future business cases). Use for exceptions only."
        }
        Category::Revenue => {
            "Represented by business case: maintain or increase revenue compared to status quo, or avoid loss of current revenues in the future."
        }
        Category::Urgency | Category::MarketImpact | Category::Cost => "",
    }
}

fn guidance_for(category: Category, level: RatingLevel) -> &'static str {
    match (category, level) {
        (Category::Urgency, RatingLevel::High) => "Now - has to be resolved immediately",
        (Category::Urgency, RatingLevel::Mid) => "Soon - has to be resolved in next 6 months",
        (Category::Urgency, _) => "Later - has to be resolved in more than 6 months",
        (Category::MarketImpact, RatingLevel::High) => "Epic covering issues of global network.",
        (Category::MarketImpact, RatingLevel::Mid) => {
            "Epic covering issues of local network (>1 business region but not global)."
        }
        (Category::MarketImpact, _) => "Epic covering issues of local network (1 business region).",
        (Category::Strategic, RatingLevel::High) => {
            "Strategic decision (C-level request), e.g. improving scalability for new markets."
        }
        (Category::Strategic, RatingLevel::Mid) => "External dependencies (cross-domain level)",
        (Category::Strategic, _) => "Internal dependencies (domain level)",
        (Category::Revenue, RatingLevel::High) => {
            "Generates significant new revenue, substantially increases LTV, opens major new sales channels."
        }
        (Category::Revenue, RatingLevel::Mid) => {
            "Improves conversion rates/AOV, reduces churn, enhances up-sell/cross-sell opportunities."
        }
        (Category::Revenue, _) => {
            "Indirect or long-term revenue potential, no clear path to revenue impact."
        }
        (Category::Cost, RatingLevel::High) => {
            "Drastically reduces OpEx, avoids substantial CapEx, greatly improves resource efficiency."
        }
        (Category::Cost, RatingLevel::Mid) => {
            "Reduces some operational costs, optimizes processes, avoids minor future costs."
        }
        (Category::Cost, _) => {
            "Cost impact negligible or uncertain, may involve upfront costs with unclear savings."
        }
    }
}
