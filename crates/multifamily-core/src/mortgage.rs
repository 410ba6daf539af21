use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MultifamilyError;
use crate::types::{Money, Percent, Rate};
use crate::MultifamilyResult;

/// Fixed-rate, fully amortizing monthly payment (principal and interest).
///
/// `annual_rate_pct` is in percentage points (5.5 = 5.5%); the monthly rate is
/// `annual_rate_pct / 1200`. A zero rate amortizes straight-line, since the
/// standard payment formula divides by zero there.
pub fn monthly_payment(
    loan_amount: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> MultifamilyResult<Money> {
    if term_years == 0 {
        return Err(MultifamilyError::InvalidLoanTerm {
            reason: "term must be at least 1 year".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(MultifamilyError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if loan_amount < Decimal::ZERO {
        return Err(MultifamilyError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }

    let payments = term_years * 12;
    let monthly_rate = monthly_rate(annual_rate_pct);

    if monthly_rate.is_zero() {
        return Ok(loan_amount / Decimal::from(payments));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..payments {
        compound *= Decimal::ONE + monthly_rate;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MultifamilyError::InvalidRate {
            context: "monthly payment".into(),
        });
    }

    Ok(loan_amount * monthly_rate * compound / denominator)
}

/// Cumulative principal retired after `elapsed_years` of on-schedule payments.
///
/// Walks the amortization schedule month by month (interest on the remaining
/// balance, remainder of the payment to principal) rather than using the
/// closed form, so the result matches a real schedule to the cent.
pub fn principal_paid(
    loan_amount: Money,
    annual_rate_pct: Percent,
    term_years: u32,
    elapsed_years: u32,
) -> MultifamilyResult<Money> {
    if elapsed_years > term_years {
        return Err(MultifamilyError::InvalidLoanTerm {
            reason: format!(
                "elapsed years ({elapsed_years}) cannot exceed the loan term ({term_years})"
            ),
        });
    }

    let payment = monthly_payment(loan_amount, annual_rate_pct, term_years)?;
    let rate = monthly_rate(annual_rate_pct);

    if rate.is_zero() {
        return Ok(payment * Decimal::from(elapsed_years * 12));
    }

    let mut balance = loan_amount;
    for _ in 0..(elapsed_years * 12) {
        let interest = balance * rate;
        let principal = payment - interest;
        balance -= principal;
    }

    Ok(loan_amount - balance)
}

fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(1200)
}
