use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::catalog::{Category, CategoryCatalog};
use super::domain::Assessment;
use super::metrics::DerivedMetric;
use super::scale::weight;

/// Something assessments can be ordered by: a rated category or a derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Category(Category),
    Derived(DerivedMetric),
}

impl Criterion {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Category(category) => category.key(),
            Self::Derived(metric) => metric.key(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Category(category) => category.label(),
            Self::Derived(metric) => metric.label(),
        }
    }

    /// Numeric value used for ordering; larger ranks first.
    pub fn value(self, assessment: &Assessment) -> f64 {
        match self {
            Self::Category(category) => {
                f64::from(assessment.level(category).map(weight).unwrap_or(0))
            }
            Self::Derived(metric) => metric.value(assessment),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<Category> for Criterion {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl From<DerivedMetric> for Criterion {
    fn from(metric: DerivedMetric) -> Self {
        Self::Derived(metric)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriterionParseError {
    #[error("unknown ranking criterion '{0}'")]
    Unknown(String),
    #[error("ranking criterion '{0}' listed more than once")]
    Duplicate(String),
}

impl FromStr for Criterion {
    type Err = CriterionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(metric) = DerivedMetric::ordered()
            .into_iter()
            .find(|metric| metric.key().eq_ignore_ascii_case(trimmed))
        {
            return Ok(Self::Derived(metric));
        }

        trimmed
            .parse::<Category>()
            .map(Self::Category)
            .map_err(|_| CriterionParseError::Unknown(trimmed.to_string()))
    }
}

impl Serialize for Criterion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One slot of the user's ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingCriterion {
    pub key: Criterion,
    pub enabled: bool,
}

impl RankingCriterion {
    pub fn enabled(key: impl Into<Criterion>) -> Self {
        Self {
            key: key.into(),
            enabled: true,
        }
    }

    pub fn disabled(key: impl Into<Criterion>) -> Self {
        Self {
            key: key.into(),
            enabled: false,
        }
    }
}

/// Ordered, toggleable list of ranking criteria edited during a prioritization session.
///
/// Moves swap neighbours regardless of their enabled flag, so disabled entries keep
/// the position the user gave them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaOrder {
    criteria: Vec<RankingCriterion>,
}

impl CriteriaOrder {
    /// Every catalog category followed by every derived metric, all enabled.
    pub fn standard(catalog: &CategoryCatalog) -> Self {
        let criteria = catalog
            .categories()
            .map(Criterion::Category)
            .chain(DerivedMetric::ordered().into_iter().map(Criterion::Derived))
            .map(RankingCriterion::enabled)
            .collect();
        Self { criteria }
    }

    /// `primary` first, then the remaining catalog categories in order. Derived
    /// metrics are left out.
    pub fn with_primary(catalog: &CategoryCatalog, primary: Category) -> Self {
        let criteria = std::iter::once(primary)
            .chain(catalog.categories().filter(|category| *category != primary))
            .map(RankingCriterion::enabled)
            .collect();
        Self { criteria }
    }

    pub fn from_criteria(criteria: Vec<RankingCriterion>) -> Self {
        Self { criteria }
    }

    /// Parse a comma separated order such as `urgency,roi,!cost`.
    ///
    /// Listed criteria come first in the given order; a leading `!` disables one.
    /// Anything from the standard set that is not listed is appended disabled.
    pub fn parse(raw: &str, catalog: &CategoryCatalog) -> Result<Self, CriterionParseError> {
        let mut criteria: Vec<RankingCriterion> = Vec::new();

        for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            let (enabled, name) = match token.strip_prefix('!') {
                Some(rest) => (false, rest),
                None => (true, token),
            };
            let key: Criterion = name.parse()?;
            if criteria.iter().any(|existing| existing.key == key) {
                return Err(CriterionParseError::Duplicate(key.key().to_string()));
            }
            criteria.push(RankingCriterion { key, enabled });
        }

        for standard in Self::standard(catalog).criteria {
            if !criteria.iter().any(|existing| existing.key == standard.key) {
                criteria.push(RankingCriterion::disabled(standard.key));
            }
        }

        Ok(Self { criteria })
    }

    pub fn as_slice(&self) -> &[RankingCriterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Enabled criteria in rank order.
    pub fn active(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.criteria
            .iter()
            .filter(|criterion| criterion.enabled)
            .map(|criterion| criterion.key)
    }

    /// Swap with the previous entry; no-op for the first entry or an index out of range.
    pub fn move_up(&mut self, index: usize) {
        if index == 0 || index >= self.criteria.len() {
            return;
        }
        self.criteria.swap(index, index - 1);
    }

    /// Swap with the next entry; no-op for the last entry or an index out of range.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 >= self.criteria.len() {
            return;
        }
        self.criteria.swap(index, index + 1);
    }

    /// Flip the enabled flag of `key` without moving it. Unknown keys are ignored.
    pub fn toggle(&mut self, key: Criterion) {
        if let Some(criterion) = self
            .criteria
            .iter_mut()
            .find(|criterion| criterion.key == key)
        {
            criterion.enabled = !criterion.enabled;
        }
    }

    pub fn into_inner(self) -> Vec<RankingCriterion> {
        self.criteria
    }
}

impl Default for CriteriaOrder {
    fn default() -> Self {
        Self::standard(&CategoryCatalog::standard())
    }
}
