use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MultifamilyError;
use crate::time_value::npv;
use crate::types::{Money, Rate};
use crate::MultifamilyResult;

/// Outcome of an IRR search. Non-convergence is reported, not raised: the
/// caller decides whether a rough rate is still worth showing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrrEstimate {
    /// Annualized rate as a decimal fraction (0.12 = 12%)
    pub rate: Rate,
    pub converged: bool,
    pub iterations: u32,
}

/// Root-finder for the internal rate of return of a yearly cash-flow series
/// (`cash_flows[0]` is the time-0 investment, normally negative).
///
/// The solver sits behind a trait so the default coarse search can be swapped
/// for a sharper method without touching the analysis contract.
pub trait IrrSolver {
    fn solve(&self, cash_flows: &[Money]) -> MultifamilyResult<IrrEstimate>;
}

/// Fixed-step IRR search: walk the rate up or down by a constant increment
/// depending on the sign of the NPV until it is near zero or the iteration
/// cap is hit.
///
/// Deliberately coarse: no bracketing, no convergence guarantee. It can
/// oscillate around a root or stall on a series with no sign change; either
/// way it terminates within `max_iterations` and reports `converged: false`.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepIrr {
    pub initial_guess: Rate,
    pub step: Rate,
    pub tolerance: Decimal,
    pub max_iterations: u32,
}

impl Default for FixedStepIrr {
    fn default() -> Self {
        Self {
            initial_guess: dec!(0.10),
            step: dec!(0.01),
            tolerance: dec!(0.0001),
            max_iterations: 100,
        }
    }
}

impl IrrSolver for FixedStepIrr {
    fn solve(&self, cash_flows: &[Money]) -> MultifamilyResult<IrrEstimate> {
        if cash_flows.len() < 2 {
            return Err(MultifamilyError::InsufficientData(
                "IRR requires at least 2 cash flows".into(),
            ));
        }

        let mut rate = self.initial_guess;

        for i in 0..self.max_iterations {
            let npv_val = npv(rate, cash_flows)?;
            if npv_val.abs() < self.tolerance {
                return Ok(IrrEstimate {
                    rate,
                    converged: true,
                    iterations: i,
                });
            }
            if npv_val > Decimal::ZERO {
                rate += self.step;
            } else {
                rate -= self.step;
            }
        }

        Ok(IrrEstimate {
            rate,
            converged: false,
            iterations: self.max_iterations,
        })
    }
}

/// Newton-Raphson IRR solver, clamped to (-99%, +10,000%) to guard against
/// divergence. Sharper than the fixed-step search on well-behaved series.
#[derive(Debug, Clone, Copy)]
pub struct NewtonRaphsonIrr {
    pub initial_guess: Rate,
    pub tolerance: Decimal,
    pub max_iterations: u32,
}

impl Default for NewtonRaphsonIrr {
    fn default() -> Self {
        Self {
            initial_guess: dec!(0.10),
            tolerance: dec!(0.0000001),
            max_iterations: 100,
        }
    }
}

impl IrrSolver for NewtonRaphsonIrr {
    fn solve(&self, cash_flows: &[Money]) -> MultifamilyResult<IrrEstimate> {
        if cash_flows.len() < 2 {
            return Err(MultifamilyError::InsufficientData(
                "IRR requires at least 2 cash flows".into(),
            ));
        }

        let mut rate = self.initial_guess;

        for i in 0..self.max_iterations {
            let mut npv_val = Decimal::ZERO;
            let mut dnpv = Decimal::ZERO;
            let one_plus_r = Decimal::ONE + rate;

            for (t, cf) in cash_flows.iter().enumerate() {
                let t_dec = Decimal::from(t as i64);
                let discount = one_plus_r.powd(t_dec);
                if discount.is_zero() {
                    continue;
                }
                npv_val += cf / discount;
                if t > 0 {
                    dnpv -= t_dec * cf / one_plus_r.powd(t_dec + Decimal::ONE);
                }
            }

            if npv_val.abs() < self.tolerance {
                return Ok(IrrEstimate {
                    rate,
                    converged: true,
                    iterations: i,
                });
            }

            if dnpv.is_zero() {
                // Flat NPV curve: no direction to move in
                return Ok(IrrEstimate {
                    rate,
                    converged: false,
                    iterations: i,
                });
            }

            rate -= npv_val / dnpv;

            if rate < dec!(-0.99) {
                rate = dec!(-0.99);
            } else if rate > dec!(100.0) {
                rate = dec!(100.0);
            }
        }

        Ok(IrrEstimate {
            rate,
            converged: false,
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_step_simple_case() {
        // Invest 100, receive 110 in 1 year => IRR = 10%; the initial guess
        // lands on the root immediately
        let cfs = vec![dec!(-100), dec!(110)];
        let est = FixedStepIrr::default().solve(&cfs).unwrap();
        assert!(est.converged);
        assert_eq!(est.rate, dec!(0.10));
        assert_eq!(est.iterations, 0);
    }

    #[test]
    fn test_fixed_step_walks_toward_root() {
        // Invest 1000, receive 1200 in 1 year => IRR = 20%; NPV at 10% is
        // positive so the search steps upward in 1% increments
        let cfs = vec![dec!(-1000), dec!(1200)];
        let est = FixedStepIrr::default().solve(&cfs).unwrap();
        assert!((est.rate - dec!(0.20)).abs() <= dec!(0.01));
    }

    #[test]
    fn test_fixed_step_terminates_on_monotonic_series() {
        // All-positive flows: NPV never crosses zero, the rate just climbs
        // until the cap. Must terminate and stay bounded.
        let cfs = vec![dec!(100), dec!(100), dec!(100)];
        let est = FixedStepIrr::default().solve(&cfs).unwrap();
        assert!(!est.converged);
        assert_eq!(est.iterations, 100);
        // 0.10 + 100 * 0.01
        assert_eq!(est.rate, dec!(1.10));
    }

    #[test]
    fn test_fixed_step_all_negative_series_bounded() {
        let cfs = vec![dec!(-100), dec!(-100), dec!(-100)];
        let est = FixedStepIrr::default().solve(&cfs).unwrap();
        assert!(!est.converged);
        // 0.10 - 100 * 0.01, still above -100%
        assert_eq!(est.rate, dec!(-0.90));
    }

    #[test]
    fn test_fixed_step_rejects_single_flow() {
        let result = FixedStepIrr::default().solve(&[dec!(-100)]);
        assert!(matches!(
            result,
            Err(MultifamilyError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_newton_raphson_simple_case() {
        let cfs = vec![dec!(-100), dec!(110)];
        let est = NewtonRaphsonIrr::default().solve(&cfs).unwrap();
        assert!(est.converged);
        assert!((est.rate - dec!(0.10)).abs() < dec!(0.001));
    }

    #[test]
    fn test_newton_raphson_multi_period() {
        // Invest 1000, receive 300/year for 5 years => IRR ~15.24%
        let cfs = vec![
            dec!(-1000),
            dec!(300),
            dec!(300),
            dec!(300),
            dec!(300),
            dec!(300),
        ];
        let est = NewtonRaphsonIrr::default().solve(&cfs).unwrap();
        assert!(est.converged);
        assert!(
            est.rate > dec!(0.14) && est.rate < dec!(0.17),
            "expected ~15.2%, got {}",
            est.rate
        );
    }

    #[test]
    fn test_solvers_agree_on_clean_series() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let fixed = FixedStepIrr::default().solve(&cfs).unwrap();
        let newton = NewtonRaphsonIrr::default().solve(&cfs).unwrap();
        // The fixed-step search resolves to within its step size
        assert!((fixed.rate - newton.rate).abs() <= dec!(0.01));
    }
}
