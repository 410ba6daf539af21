use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::assumptions::LoanAssumptions;
use crate::mortgage;
use crate::time_value::compound;
use crate::types::Money;
use crate::MultifamilyResult;

/// Owner equity projected to a future horizon: appreciation on the full
/// property value plus principal retired through amortization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityProjection {
    pub appreciated_value: Money,
    pub principal_paid: Money,
    pub projected_equity: Money,
}

/// Project equity at `horizon_years`.
///
/// `loan_amount` must be the same figure used for the mortgage payment in
/// this analysis pass; recomputing it here with different rounding would let
/// the equity and cash-flow legs drift apart.
pub fn project_equity(
    price: Money,
    loan_amount: Money,
    assumptions: &LoanAssumptions,
    horizon_years: u32,
) -> MultifamilyResult<EquityProjection> {
    let appreciation = assumptions.property_appreciation_pct / dec!(100);
    let appreciated_value = price * compound(appreciation, horizon_years);

    // Past the loan term the schedule is exhausted and no further principal
    // accrues, so cap the elapsed time at the term.
    let elapsed = horizon_years.min(assumptions.loan_term_years);
    let principal_paid = mortgage::principal_paid(
        loan_amount,
        assumptions.interest_rate_pct,
        assumptions.loan_term_years,
        elapsed,
    )?;

    let projected_equity = appreciated_value - loan_amount + principal_paid;

    Ok(EquityProjection {
        appreciated_value,
        principal_paid,
        projected_equity,
    })
}
