use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MultifamilyError;
use crate::types::{with_metadata, AnalysisOutput, Money, Percent, Property};
use crate::MultifamilyResult;

/// One property's line in a side-by-side comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: Money,
    pub units: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_rate_pct: Option<Percent>,
    /// Recorded figure, or price/units when the record omits it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noi: Option<Money>,
}

/// Side-by-side comparison across candidate acquisitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub rows: Vec<ComparisonRow>,
    /// Property with the highest reported cap rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_cap_rate_id: Option<String>,
    /// Property with the lowest price per unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_price_per_unit_id: Option<String>,
}

/// Compare two or more candidate properties on their headline acquisition
/// metrics.
pub fn compare_properties(
    properties: &[Property],
) -> MultifamilyResult<AnalysisOutput<ComparisonReport>> {
    if properties.len() < 2 {
        return Err(MultifamilyError::InsufficientData(
            "Comparison requires at least two properties".into(),
        ));
    }

    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if properties.len() > 3 {
        warnings.push(format!(
            "Comparing {} properties; more than three side by side is hard to read",
            properties.len()
        ));
    }

    let rows: Vec<ComparisonRow> = properties
        .iter()
        .map(|p| ComparisonRow {
            id: p.id.clone(),
            name: p.name.clone(),
            location: p.location.clone(),
            price: p.price,
            units: p.units,
            cap_rate_pct: p.cap_rate_pct,
            price_per_unit: p.effective_price_per_unit(),
            noi: p.noi,
        })
        .collect();

    let best_cap_rate_id = rows
        .iter()
        .filter_map(|r| r.cap_rate_pct.map(|c| (r.id.clone(), c)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(id, _)| id);
    if best_cap_rate_id.is_none() {
        warnings.push("No property reports a cap rate — yield ranking unavailable".into());
    }

    let lowest_price_per_unit_id = rows
        .iter()
        .filter_map(|r| r.price_per_unit.map(|ppu| (r.id.clone(), ppu)))
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(id, _)| id);

    let report = ComparisonReport {
        rows,
        best_cap_rate_id,
        lowest_price_per_unit_id,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Acquisition Candidate Comparison",
        &properties,
        warnings,
        elapsed,
        report,
    ))
}
