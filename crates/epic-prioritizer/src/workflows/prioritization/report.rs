use serde::{Deserialize, Serialize};
use std::io::Write;

use super::catalog::{Category, CategoryCatalog};
use super::criteria::{CriteriaOrder, Criterion, RankingCriterion};
use super::domain::{Assessment, AssessmentId};
use super::metrics::{roi, DerivedMetric};
use super::ranking::rank;
use super::scale::EffortSize;
use super::scoring::rank_by_score;

/// Parameters of a prioritization view. Missing fields use the session defaults:
/// the standard criteria order and `urgency` as the primary category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<RankingCriterion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectEntry {
    pub rank: usize,
    pub id: AssessmentId,
    pub epic_name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub id: AssessmentId,
    pub epic_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiEntry {
    pub rank: usize,
    pub id: AssessmentId,
    pub epic_name: String,
    pub t_shirt_size: EffortSize,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryRanking {
    pub category: Category,
    pub label: String,
    pub entries: Vec<RankedEntry>,
}

/// Every ordering of one snapshot of assessments, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationReport {
    pub assessed: usize,
    pub direct: Vec<DirectEntry>,
    pub criteria: Vec<RankingCriterion>,
    pub ranked: Vec<RankedEntry>,
    pub primary: PrimaryRanking,
    pub roi: Vec<RoiEntry>,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    method: &'static str,
    rank: usize,
    id: &'a str,
    epic_name: &'a str,
    value: String,
}

impl PrioritizationReport {
    /// One CSV row per (method, epic), in rank order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv = csv::Writer::from_writer(writer);

        for entry in &self.direct {
            csv.serialize(CsvRow {
                method: "direct",
                rank: entry.rank,
                id: entry.id.as_str(),
                epic_name: &entry.epic_name,
                value: entry.score.to_string(),
            })?;
        }
        for entry in &self.ranked {
            csv.serialize(CsvRow {
                method: "criteria",
                rank: entry.rank,
                id: entry.id.as_str(),
                epic_name: &entry.epic_name,
                value: String::new(),
            })?;
        }
        for entry in &self.primary.entries {
            csv.serialize(CsvRow {
                method: "primary",
                rank: entry.rank,
                id: entry.id.as_str(),
                epic_name: &entry.epic_name,
                value: self.primary.category.key().to_string(),
            })?;
        }
        for entry in &self.roi {
            csv.serialize(CsvRow {
                method: "roi",
                rank: entry.rank,
                id: entry.id.as_str(),
                epic_name: &entry.epic_name,
                value: format!("{:.2}", entry.roi),
            })?;
        }

        csv.flush()?;
        Ok(())
    }
}

pub(crate) fn build_report(
    catalog: &CategoryCatalog,
    assessments: &[Assessment],
    request: &PrioritizationRequest,
) -> PrioritizationReport {
    let direct = rank_by_score(assessments, catalog)
        .into_iter()
        .enumerate()
        .map(|(index, scored)| DirectEntry {
            rank: index + 1,
            id: scored.assessment.id,
            epic_name: scored.assessment.epic_name,
            score: scored.score,
        })
        .collect();

    let criteria = match &request.criteria {
        Some(criteria) => criteria.clone(),
        None => CriteriaOrder::standard(catalog).into_inner(),
    };
    let ranked = ranked_entries(rank(assessments, &criteria));

    let primary_category = request.primary.unwrap_or(Category::Urgency);
    let primary_order = CriteriaOrder::with_primary(catalog, primary_category);
    let primary = PrimaryRanking {
        category: primary_category,
        label: catalog.label(primary_category).to_string(),
        entries: ranked_entries(rank(assessments, primary_order.as_slice())),
    };

    let roi_order = [RankingCriterion::enabled(Criterion::Derived(DerivedMetric::Roi))];
    let roi_entries = rank(assessments, &roi_order)
        .into_iter()
        .enumerate()
        .map(|(index, assessment)| RoiEntry {
            rank: index + 1,
            roi: roi(&assessment),
            id: assessment.id,
            epic_name: assessment.epic_name,
            t_shirt_size: assessment.t_shirt_size,
        })
        .collect();

    PrioritizationReport {
        assessed: assessments.len(),
        direct,
        criteria,
        ranked,
        primary,
        roi: roi_entries,
    }
}

fn ranked_entries(assessments: Vec<Assessment>) -> Vec<RankedEntry> {
    assessments
        .into_iter()
        .enumerate()
        .map(|(index, assessment)| RankedEntry {
            rank: index + 1,
            id: assessment.id,
            epic_name: assessment.epic_name,
        })
        .collect()
}
