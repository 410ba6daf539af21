use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MultifamilyError;
use crate::types::{with_metadata, AnalysisOutput, Money, Percent, Property};
use crate::MultifamilyResult;

/// Roll-up metrics across a set of held properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub property_count: usize,
    pub total_value: Money,
    pub total_units: u64,
    /// Sum of reported NOI; properties without one contribute zero and are
    /// named in the warnings
    pub total_noi: Money,
    /// Unweighted mean of the reported cap rates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cap_rate_pct: Option<Percent>,
    /// Cap rates weighted by property value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_weighted_cap_rate_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price_per_unit: Option<Money>,
}

/// Summarize a portfolio of properties into headline holdings metrics.
pub fn summarize_portfolio(
    properties: &[Property],
) -> MultifamilyResult<AnalysisOutput<PortfolioSummary>> {
    if properties.is_empty() {
        return Err(MultifamilyError::InsufficientData(
            "Portfolio summary requires at least one property".into(),
        ));
    }

    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut total_value = Decimal::ZERO;
    let mut total_units: u64 = 0;
    let mut total_noi = Decimal::ZERO;
    let mut cap_rate_sum = Decimal::ZERO;
    let mut cap_rate_count = 0u32;
    let mut weighted_cap_sum = Decimal::ZERO;
    let mut weighted_value = Decimal::ZERO;

    for property in properties {
        total_value += property.price;
        total_units += u64::from(property.units);

        match property.noi {
            Some(noi) => total_noi += noi,
            None => warnings.push(format!(
                "Property {} has no reported NOI — counted as zero",
                property.id
            )),
        }

        if let Some(cap) = property.cap_rate_pct {
            cap_rate_sum += cap;
            cap_rate_count += 1;
            weighted_cap_sum += cap * property.price;
            weighted_value += property.price;
        }
    }

    let average_cap_rate_pct = if cap_rate_count > 0 {
        Some(cap_rate_sum / Decimal::from(cap_rate_count))
    } else {
        warnings.push("No property reports a cap rate — averages unavailable".into());
        None
    };

    let value_weighted_cap_rate_pct = if weighted_value > Decimal::ZERO {
        Some(weighted_cap_sum / weighted_value)
    } else {
        None
    };

    let average_price_per_unit = if total_units > 0 {
        Some(total_value / Decimal::from(total_units))
    } else {
        None
    };

    if average_cap_rate_pct.is_some_and(|c| c < dec!(3)) {
        warnings.push("Average cap rate is below 3% — unusually low, verify market data".into());
    }

    let summary = PortfolioSummary {
        property_count: properties.len(),
        total_value,
        total_units,
        total_noi,
        average_cap_rate_pct,
        value_weighted_cap_rate_pct,
        average_price_per_unit,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Portfolio Holdings Summary",
        &properties,
        warnings,
        elapsed,
        summary,
    ))
}
