use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates expressed in percentage points (5.5 = 5.5%). Loan assumptions and
/// headline return figures use this form because that is how the calculator
/// contract states them.
pub type Percent = Decimal;

/// Multifamily asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    GardenStyle,
    MidRise,
    HighRise,
    Townhome,
}

/// One entry in a property's listing price history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Money,
    /// Change versus the previous entry, in percentage points
    pub change_pct: Percent,
}

/// One entry in a property's assessed tax history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecord {
    pub year: i32,
    pub amount: Money,
    pub change_pct: Percent,
}

/// A multifamily property record as supplied by the listing layer.
///
/// Only `price` and `noi` feed the investment engine; the remaining fields are
/// descriptive and flow through to portfolio and comparison reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    pub location: String,
    pub price: Money,
    pub units: u32,
    pub size_sqft: u64,
    /// Annual net operating income. Required for investment analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noi: Option<Money>,
    /// Capitalisation rate in percentage points (5.5 = 5.5%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_rate_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_history: Vec<PricePoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_history: Vec<TaxRecord>,
}

impl Property {
    /// Price per unit: the recorded figure, or `price / units` when absent.
    /// `None` for a zero-unit record.
    pub fn effective_price_per_unit(&self) -> Option<Money> {
        match self.price_per_unit {
            Some(ppu) => Some(ppu),
            None if self.units > 0 => Some(self.price / Decimal::from(self.units)),
            None => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: AnalysisMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> AnalysisOutput<T> {
    AnalysisOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: AnalysisMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
