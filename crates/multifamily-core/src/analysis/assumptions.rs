use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MultifamilyError;
use crate::types::{Money, Percent};
use crate::MultifamilyResult;

/// Loan and operating assumptions for an investment analysis.
///
/// An immutable value type: edits produce a new value and the analysis is
/// recomputed from scratch, never patched in place. Rate fields are in
/// percentage points (5.5 = 5.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAssumptions {
    pub down_payment_pct: Percent,
    pub interest_rate_pct: Percent,
    pub loan_term_years: u32,
    /// Absolute currency amount, not a percentage
    pub closing_costs: Money,
    pub vacancy_rate_pct: Percent,
    /// Operating expenses as a share of effective gross income. Strictly
    /// below 100: the gross-rent derivation divides by its complement.
    pub operating_expense_ratio_pct: Percent,
    /// Annual, may be negative
    pub property_appreciation_pct: Percent,
    /// Annual, may be negative
    pub rent_growth_pct: Percent,
    /// Annual, may be negative. Reserved: the current formula set does not
    /// consume it downstream.
    pub expense_growth_pct: Percent,
}

impl Default for LoanAssumptions {
    fn default() -> Self {
        Self {
            down_payment_pct: dec!(25),
            interest_rate_pct: dec!(5.5),
            loan_term_years: 30,
            closing_costs: Decimal::ZERO,
            vacancy_rate_pct: dec!(5),
            operating_expense_ratio_pct: dec!(45),
            property_appreciation_pct: dec!(3),
            rent_growth_pct: dec!(3),
            expense_growth_pct: dec!(2),
        }
    }
}

impl LoanAssumptions {
    /// Default assumptions with closing costs seeded at 3% of the purchase
    /// price, matching how a new analysis is pre-filled.
    pub fn defaults_for_price(price: Money) -> Self {
        Self {
            closing_costs: price * dec!(0.03),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> MultifamilyResult<()> {
        if self.down_payment_pct < Decimal::ZERO || self.down_payment_pct > dec!(100) {
            return Err(MultifamilyError::InvalidInput {
                field: "down_payment_pct".into(),
                reason: "Down payment must be between 0% and 100%".into(),
            });
        }
        if self.interest_rate_pct < Decimal::ZERO {
            return Err(MultifamilyError::InvalidInput {
                field: "interest_rate_pct".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.loan_term_years == 0 {
            return Err(MultifamilyError::InvalidLoanTerm {
                reason: "term must be at least 1 year".into(),
            });
        }
        if self.closing_costs < Decimal::ZERO {
            return Err(MultifamilyError::InvalidInput {
                field: "closing_costs".into(),
                reason: "Closing costs cannot be negative".into(),
            });
        }
        if self.vacancy_rate_pct < Decimal::ZERO || self.vacancy_rate_pct > dec!(100) {
            return Err(MultifamilyError::InvalidInput {
                field: "vacancy_rate_pct".into(),
                reason: "Vacancy rate must be between 0% and 100%".into(),
            });
        }
        if self.operating_expense_ratio_pct < Decimal::ZERO
            || self.operating_expense_ratio_pct >= dec!(100)
        {
            return Err(MultifamilyError::InvalidInput {
                field: "operating_expense_ratio_pct".into(),
                reason: "Operating expense ratio must be between 0% and 100% (exclusive)".into(),
            });
        }
        Ok(())
    }
}
