use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::MultifamilyError;
use crate::types::{Money, Rate};
use crate::MultifamilyResult;

/// Net Present Value of a series of cash flows. `cash_flows[0]` is the
/// period-0 flow and is not discounted.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> MultifamilyResult<Money> {
    if rate <= dec!(-1) {
        return Err(MultifamilyError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(MultifamilyError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// `(1 + rate)^periods` by iterative multiplication. Exact for Decimal inputs
/// and deterministic, unlike a log/exp-based power.
pub fn compound(rate: Rate, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    let one_plus_r = Decimal::ONE + rate;
    for _ in 0..periods {
        factor *= one_plus_r;
    }
    factor
}
