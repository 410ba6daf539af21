use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::assumptions::LoanAssumptions;
use crate::error::MultifamilyError;
use crate::types::{Money, Percent};
use crate::MultifamilyResult;

/// Operating cash flow and investor return ratios for one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingCashFlow {
    pub gross_potential_annual_rent: Money,
    pub effective_gross_income: Money,
    pub operating_expenses: Money,
    pub annual_debt_service: Money,
    pub annual_cash_flow: Money,
    pub down_payment: Money,
    pub total_investment: Money,
    /// `None` when total investment is zero: the ratio is undefined and the
    /// caller should present it as N/A rather than fail.
    pub cash_on_cash_return_pct: Option<Percent>,
}

/// Derive operating cash flow from NOI, working down from gross rent to
/// after-debt cash flow and the cash-on-cash return.
///
/// `down_payment` is computed once per analysis pass and shared with the
/// loan sizing, so the two never diverge through separate rounding.
///
/// Step 1 grosses NOI up by the expense-ratio complement and then annualizes
/// by 12, which treats the supplied NOI as a monthly figure even though the
/// record states it as annual. Kept verbatim for behavioral parity with the
/// shipped calculator; see DESIGN.md before changing it.
pub fn derive_cash_flow(
    noi: Money,
    monthly_mortgage_payment: Money,
    down_payment: Money,
    assumptions: &LoanAssumptions,
) -> MultifamilyResult<OperatingCashFlow> {
    let opex_ratio = assumptions.operating_expense_ratio_pct / dec!(100);
    let opex_complement = Decimal::ONE - opex_ratio;
    if opex_complement.is_zero() {
        return Err(MultifamilyError::DivisionByZero {
            context: "gross rent derivation (1 - operating expense ratio)".into(),
        });
    }

    let gross_potential_annual_rent = noi / opex_complement * dec!(12);
    let effective_gross_income =
        gross_potential_annual_rent * (Decimal::ONE - assumptions.vacancy_rate_pct / dec!(100));
    let operating_expenses = effective_gross_income * opex_ratio;
    let annual_debt_service = monthly_mortgage_payment * dec!(12);
    let annual_cash_flow = effective_gross_income - operating_expenses - annual_debt_service;

    let total_investment = down_payment + assumptions.closing_costs;

    let cash_on_cash_return_pct = if total_investment.is_zero() {
        None
    } else {
        Some(annual_cash_flow / total_investment * dec!(100))
    };

    Ok(OperatingCashFlow {
        gross_potential_annual_rent,
        effective_gross_income,
        operating_expenses,
        annual_debt_service,
        annual_cash_flow,
        down_payment,
        total_investment,
        cash_on_cash_return_pct,
    })
}
