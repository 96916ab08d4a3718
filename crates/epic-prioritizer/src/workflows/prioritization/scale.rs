use serde::{Deserialize, Serialize};

/// Ordinal rating assigned to a single value category.
///
/// `NotApplicable` is only meaningful for the financial categories and carries no
/// weight. Levels that fail to parse land on `Unrecognized` so stored records with
/// unexpected values still score instead of aborting a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingLevel {
    Low,
    Mid,
    High,
    #[serde(rename = "na")]
    NotApplicable,
    #[serde(other)]
    Unrecognized,
}

impl RatingLevel {
    /// Levels offered for every category, highest first.
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Mid, Self::Low]
    }

    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Mid => 2,
            Self::High => 3,
            Self::NotApplicable | Self::Unrecognized => 0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
            Self::NotApplicable => "na",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
            Self::NotApplicable => "N/A",
            Self::Unrecognized => "Unrecognized",
        }
    }

    /// Parse a level as typed by a person or a model; whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "mid" | "medium" => Some(Self::Mid),
            "high" => Some(Self::High),
            "na" | "n/a" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

/// Numeric weight of a level. `na` and unrecognized levels weigh zero.
pub const fn weight(level: RatingLevel) -> u8 {
    level.weight()
}

/// T-shirt sized effort estimate for an epic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EffortSize {
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
}

impl EffortSize {
    pub const fn ordered() -> [Self; 5] {
        [Self::Xs, Self::S, Self::M, Self::L, Self::Xl]
    }

    pub const fn weight(self) -> u8 {
        match self {
            Self::Xs => 1,
            Self::S => 2,
            Self::M => 3,
            Self::L => 4,
            Self::Xl => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        }
    }
}

/// How sure the author is about the ratings. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Mid,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_weights_follow_the_scale() {
        assert_eq!(weight(RatingLevel::Low), 1);
        assert_eq!(weight(RatingLevel::Mid), 2);
        assert_eq!(weight(RatingLevel::High), 3);
        assert_eq!(weight(RatingLevel::NotApplicable), 0);
        assert_eq!(weight(RatingLevel::Unrecognized), 0);
    }

    #[test]
    fn not_applicable_is_distinct_from_low() {
        assert_ne!(RatingLevel::NotApplicable, RatingLevel::Low);
        assert!(weight(RatingLevel::NotApplicable) < weight(RatingLevel::Low));
    }

    #[test]
    fn unknown_levels_deserialize_as_unrecognized() {
        let level: RatingLevel = serde_json::from_str("\"critical\"").expect("lenient level");
        assert_eq!(level, RatingLevel::Unrecognized);

        let na: RatingLevel = serde_json::from_str("\"na\"").expect("na level");
        assert_eq!(na, RatingLevel::NotApplicable);
    }

    #[test]
    fn effort_weights_are_positive_and_ordered() {
        let weights: Vec<u8> = EffortSize::ordered().iter().map(|size| size.weight()).collect();
        assert_eq!(weights, vec![1, 2, 3, 4, 5]);
        assert_eq!(EffortSize::default(), EffortSize::M);

        let size: EffortSize = serde_json::from_str("\"xl\"").expect("size parses");
        assert_eq!(size, EffortSize::Xl);
    }

    #[test]
    fn parse_accepts_loose_input() {
        assert_eq!(RatingLevel::parse(" HIGH "), Some(RatingLevel::High));
        assert_eq!(RatingLevel::parse("medium"), Some(RatingLevel::Mid));
        assert_eq!(RatingLevel::parse("N/A"), Some(RatingLevel::NotApplicable));
        assert_eq!(RatingLevel::parse("urgent"), None);
    }
}
