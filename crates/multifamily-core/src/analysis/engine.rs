use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::assumptions::LoanAssumptions;
use crate::analysis::cash_flow::derive_cash_flow;
use crate::analysis::equity::project_equity;
use crate::error::MultifamilyError;
use crate::irr::{FixedStepIrr, IrrSolver};
use crate::mortgage;
use crate::time_value::compound;
use crate::types::{with_metadata, AnalysisOutput, Money, Percent, Property};
use crate::MultifamilyResult;

pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Complete underwriting picture for one property under one set of
/// assumptions. Recomputed fresh on every input change; never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub monthly_mortgage_payment: Money,
    pub annual_cash_flow: Money,
    /// `None` when the total investment is zero (all-debt, no closing costs)
    pub cash_on_cash_return_pct: Option<Percent>,
    pub total_investment: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub annual_debt_service: Money,
    pub projected_equity: Money,
    /// `None` for a zero-year horizon (no cash-flow series to discount)
    pub approximate_irr_pct: Option<Percent>,
    /// Years of cash flow to recover the initial investment; `None` when the
    /// annual cash flow is zero
    pub break_even_years: Option<Decimal>,
    pub horizon_years: u32,
}

/// Analyze a property purchase under the given loan assumptions.
///
/// Pure and deterministic: identical inputs produce bit-identical results.
/// Undefined ratios and a non-converged IRR surface as `None` fields plus
/// warnings, never as errors; errors are reserved for inputs the math cannot
/// run on at all (missing NOI, zero loan term, out-of-range percentages).
pub fn analyze_investment(
    property: &Property,
    assumptions: &LoanAssumptions,
    horizon_years: Option<u32>,
) -> MultifamilyResult<AnalysisOutput<InvestmentAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    assumptions.validate()?;

    if property.price <= Decimal::ZERO {
        return Err(MultifamilyError::MissingInput {
            field: "price".into(),
        });
    }
    let noi = match property.noi {
        Some(noi) if noi > Decimal::ZERO => noi,
        _ => {
            return Err(MultifamilyError::MissingInput {
                field: "noi".into(),
            })
        }
    };

    let horizon = horizon_years.unwrap_or(DEFAULT_HORIZON_YEARS);

    // Loan sizing happens exactly once; every downstream figure reuses it
    let down_payment = property.price * assumptions.down_payment_pct / dec!(100);
    let loan_amount = property.price - down_payment;

    let monthly_mortgage_payment = mortgage::monthly_payment(
        loan_amount,
        assumptions.interest_rate_pct,
        assumptions.loan_term_years,
    )?;

    let cash_flow = derive_cash_flow(noi, monthly_mortgage_payment, down_payment, assumptions)?;
    let equity = project_equity(property.price, loan_amount, assumptions, horizon)?;

    let approximate_irr_pct = if horizon == 0 {
        warnings.push("Zero-year horizon: IRR not computed".into());
        None
    } else {
        let series = build_irr_series(
            cash_flow.total_investment,
            cash_flow.annual_cash_flow,
            equity.projected_equity,
            assumptions.rent_growth_pct,
            horizon,
        );
        let estimate = FixedStepIrr::default().solve(&series)?;
        if !estimate.converged {
            warnings.push(format!(
                "IRR search did not converge after {} iterations; estimate is approximate",
                estimate.iterations
            ));
        }
        Some(estimate.rate * dec!(100))
    };

    let break_even_years = if cash_flow.annual_cash_flow.is_zero() {
        warnings.push("Annual cash flow is zero: break-even period is undefined".into());
        None
    } else {
        Some(cash_flow.total_investment / cash_flow.annual_cash_flow)
    };

    if cash_flow.cash_on_cash_return_pct.is_none() {
        warnings.push(
            "Total investment is zero — cash-on-cash return is undefined, shown as N/A".into(),
        );
    }
    if cash_flow.annual_cash_flow < Decimal::ZERO {
        warnings.push("Property is cash-flow negative under these assumptions".into());
    }
    if assumptions.vacancy_rate_pct > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            assumptions.vacancy_rate_pct
        ));
    }
    if assumptions.down_payment_pct < dec!(20) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — high leverage",
            dec!(100) - assumptions.down_payment_pct
        ));
    }

    let result = InvestmentAnalysis {
        monthly_mortgage_payment,
        annual_cash_flow: cash_flow.annual_cash_flow,
        cash_on_cash_return_pct: cash_flow.cash_on_cash_return_pct,
        total_investment: cash_flow.total_investment,
        down_payment,
        loan_amount,
        annual_debt_service: cash_flow.annual_debt_service,
        projected_equity: equity.projected_equity,
        approximate_irr_pct,
        break_even_years,
        horizon_years: horizon,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Multifamily Investment Analysis (Leveraged Cash Flow)",
        assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Yearly cash-flow series for the IRR search: the investment out at time 0,
/// operating cash flow compounding at the rent growth rate, and the equity
/// gain on exit added to the final year's flow.
fn build_irr_series(
    total_investment: Money,
    annual_cash_flow: Money,
    projected_equity: Money,
    rent_growth_pct: Percent,
    horizon: u32,
) -> Vec<Money> {
    let growth = rent_growth_pct / dec!(100);
    let mut series = Vec::with_capacity(horizon as usize + 1);
    series.push(-total_investment);
    for year in 0..horizon {
        series.push(annual_cash_flow * compound(growth, year));
    }
    if let Some(last) = series.last_mut() {
        *last += projected_equity - total_investment;
    }
    series
}
