use serde::Deserialize;

use super::CorroboratedLevels;
use crate::workflows::prioritization::{Category, RatingLevel};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("response did not contain a JSON object")]
    NoJson,
    #[error("response JSON could not be read: {0}")]
    InvalidJson(String),
    #[error("{category} was given '{value}'; expected high, mid, or low")]
    InvalidLevel { category: Category, value: String },
}

/// Locate the levels object in a completion.
///
/// A fenced block is used only when it is closed and holds an object; otherwise the
/// outermost braces of the whole response are tried, so a truncated or mislabeled
/// fence does not hide an object the generator also wrote inline.
pub fn extract_json_object(response: &str) -> Option<&str> {
    fenced_block(response, "```json")
        .or_else(|| fenced_block(response, "```"))
        .filter(|block| block.starts_with('{') && block.ends_with('}'))
        .or_else(|| outermost_braces(response))
}

fn fenced_block<'a>(response: &'a str, opening: &str) -> Option<&'a str> {
    let fence = response.find(opening)? + opening.len();
    // skip the info string
    let body = response[fence..]
        .find('\n')
        .map(|offset| fence + offset + 1)
        .unwrap_or(fence);
    let end = body + response[body..].find("```")?;
    Some(response[body..end].trim())
}

fn outermost_braces(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start < end).then(|| &response[start..=end])
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevels {
    urgency: String,
    market_impact: String,
    strategic: String,
    revenue: String,
    cost: String,
}

/// Parse a completion into five levels. Only high, mid, and low are accepted; the
/// generator is never allowed to mark a category N/A.
pub fn parse_corroboration(response: &str) -> Result<CorroboratedLevels, ParseError> {
    let json = extract_json_object(response).ok_or(ParseError::NoJson)?;
    let raw: RawLevels =
        serde_json::from_str(json).map_err(|err| ParseError::InvalidJson(err.to_string()))?;

    Ok(CorroboratedLevels {
        urgency: strict_level(Category::Urgency, &raw.urgency)?,
        market_impact: strict_level(Category::MarketImpact, &raw.market_impact)?,
        strategic: strict_level(Category::Strategic, &raw.strategic)?,
        revenue: strict_level(Category::Revenue, &raw.revenue)?,
        cost: strict_level(Category::Cost, &raw.cost)?,
    })
}

fn strict_level(category: Category, value: &str) -> Result<RatingLevel, ParseError> {
    match RatingLevel::parse(value) {
        Some(level @ (RatingLevel::High | RatingLevel::Mid | RatingLevel::Low)) => Ok(level),
        _ => Err(ParseError::InvalidLevel {
            category,
            value: value.to_string(),
        }),
    }
}
