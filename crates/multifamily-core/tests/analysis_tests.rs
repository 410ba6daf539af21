use multifamily_core::analysis::{analyze_investment, LoanAssumptions};
use multifamily_core::time_value::compound;
use multifamily_core::types::{Property, PropertyType};
use multifamily_core::{mortgage, MultifamilyError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end underwriting scenario
// ===========================================================================

/// $10M garden-style deal: 25% down, 5.5% over 30 years, 5% vacancy,
/// 45% expense ratio, 3% appreciation, 5-year hold.
fn sample_deal() -> (Property, LoanAssumptions) {
    let property = Property {
        id: "p-1".into(),
        name: "Lakeview Commons".into(),
        property_type: PropertyType::GardenStyle,
        location: "Phoenix, AZ".into(),
        price: dec!(10_000_000),
        units: 120,
        size_sqft: 115_000,
        noi: Some(dec!(600_000)),
        cap_rate_pct: Some(dec!(6.0)),
        price_per_unit: None,
        listed: None,
        price_history: vec![],
        tax_history: vec![],
    };
    let assumptions = LoanAssumptions::defaults_for_price(property.price);
    (property, assumptions)
}

#[test]
fn test_end_to_end_scenario() {
    let (property, assumptions) = sample_deal();
    let out = analyze_investment(&property, &assumptions, Some(5)).unwrap();
    let r = &out.result;

    // Total investment: $2.5M down + 3% closing costs
    assert_eq!(r.total_investment, dec!(2_800_000));
    assert_eq!(r.loan_amount, dec!(7_500_000));

    // Payment on $7.5M at 5.5% over 30 years lands near $42,600/mo
    assert!(
        r.monthly_mortgage_payment > dec!(42_000) && r.monthly_mortgage_payment < dec!(43_000),
        "payment {} outside expected band",
        r.monthly_mortgage_payment
    );

    // Cash flow reproduces the derivation step by step
    let gross = dec!(600_000) / (Decimal::ONE - dec!(0.45)) * dec!(12);
    let egi = gross * (Decimal::ONE - dec!(0.05));
    let opex = egi * dec!(0.45);
    let debt_service = r.monthly_mortgage_payment * dec!(12);
    assert_eq!(r.annual_debt_service, debt_service);
    assert_eq!(r.annual_cash_flow, egi - opex - debt_service);

    // Cash-on-cash follows directly
    assert_eq!(
        r.cash_on_cash_return_pct,
        Some(r.annual_cash_flow / r.total_investment * dec!(100))
    );

    // Equity: appreciation on the full value, less the loan, plus principal
    let principal = mortgage::principal_paid(dec!(7_500_000), dec!(5.5), 30, 5).unwrap();
    let appreciated = dec!(10_000_000) * compound(dec!(0.03), 5);
    assert_eq!(r.projected_equity, appreciated - dec!(7_500_000) + principal);

    // IRR is present and bounded by the search (start 10%, 100 steps of 1%)
    let irr = r.approximate_irr_pct.unwrap();
    assert!(irr >= dec!(-90) && irr <= dec!(110), "IRR {irr} out of bounds");

    assert!(r.break_even_years.is_some());
}

#[test]
fn test_identical_inputs_identical_results() {
    let (property, assumptions) = sample_deal();
    let a = analyze_investment(&property, &assumptions, Some(5)).unwrap();
    let b = analyze_investment(&property, &assumptions, Some(5)).unwrap();

    assert_eq!(a.result.monthly_mortgage_payment, b.result.monthly_mortgage_payment);
    assert_eq!(a.result.annual_cash_flow, b.result.annual_cash_flow);
    assert_eq!(a.result.cash_on_cash_return_pct, b.result.cash_on_cash_return_pct);
    assert_eq!(a.result.total_investment, b.result.total_investment);
    assert_eq!(a.result.projected_equity, b.result.projected_equity);
    assert_eq!(a.result.approximate_irr_pct, b.result.approximate_irr_pct);
    assert_eq!(a.result.break_even_years, b.result.break_even_years);
}

// ===========================================================================
// Assumption edits produce fresh values
// ===========================================================================

#[test]
fn test_assumption_edit_recomputes() {
    let (property, base) = sample_deal();
    let tighter = LoanAssumptions {
        down_payment_pct: dec!(35),
        ..base.clone()
    };

    let low = analyze_investment(&property, &base, None).unwrap();
    let high = analyze_investment(&property, &tighter, None).unwrap();

    // More equity in: bigger investment, smaller loan, smaller payment
    assert!(high.result.total_investment > low.result.total_investment);
    assert!(high.result.loan_amount < low.result.loan_amount);
    assert!(high.result.monthly_mortgage_payment < low.result.monthly_mortgage_payment);
}

// ===========================================================================
// Edge cases and failure modes
// ===========================================================================

#[test]
fn test_zero_rate_loan_is_straight_line() {
    let (property, base) = sample_deal();
    let assumptions = LoanAssumptions {
        interest_rate_pct: dec!(0),
        ..base
    };
    let out = analyze_investment(&property, &assumptions, None).unwrap();

    // $7.5M over 360 months, exact
    assert_eq!(
        out.result.monthly_mortgage_payment,
        dec!(7_500_000) / dec!(360)
    );
}

#[test]
fn test_missing_noi_rejected() {
    let (mut property, assumptions) = sample_deal();
    property.noi = None;
    let result = analyze_investment(&property, &assumptions, None);
    assert!(matches!(result, Err(MultifamilyError::MissingInput { .. })));
}

#[test]
fn test_nonpositive_price_rejected() {
    let (mut property, assumptions) = sample_deal();
    property.price = dec!(0);
    let result = analyze_investment(&property, &assumptions, None);
    assert!(matches!(result, Err(MultifamilyError::MissingInput { .. })));
}

#[test]
fn test_zero_term_rejected() {
    let (property, base) = sample_deal();
    let assumptions = LoanAssumptions {
        loan_term_years: 0,
        ..base
    };
    let result = analyze_investment(&property, &assumptions, None);
    assert!(matches!(result, Err(MultifamilyError::InvalidLoanTerm { .. })));
}

#[test]
fn test_zero_horizon_equity_equals_down_payment() {
    let (property, assumptions) = sample_deal();
    let out = analyze_investment(&property, &assumptions, Some(0)).unwrap();
    assert_eq!(out.result.projected_equity, dec!(2_500_000));
    assert!(out.result.approximate_irr_pct.is_none());
}

#[test]
fn test_all_debt_deal_reports_undefined_cash_on_cash() {
    let (property, _) = sample_deal();
    let assumptions = LoanAssumptions {
        down_payment_pct: dec!(0),
        closing_costs: dec!(0),
        ..LoanAssumptions::default()
    };
    let out = analyze_investment(&property, &assumptions, None).unwrap();

    assert_eq!(out.result.total_investment, Decimal::ZERO);
    assert!(out.result.cash_on_cash_return_pct.is_none());
    assert!(!out.warnings.is_empty());
}

// ===========================================================================
// Output envelope
// ===========================================================================

#[test]
fn test_envelope_echoes_assumptions() {
    let (property, assumptions) = sample_deal();
    let out = analyze_investment(&property, &assumptions, None).unwrap();

    assert_eq!(
        out.assumptions.get("loan_term_years").and_then(|v| v.as_u64()),
        Some(30)
    );
    assert!(!out.metadata.version.is_empty());
}

#[test]
fn test_result_serializes_to_json() {
    let (property, assumptions) = sample_deal();
    let out = analyze_investment(&property, &assumptions, None).unwrap();
    let json = serde_json::to_string(&out).unwrap();
    assert!(json.contains("monthly_mortgage_payment"));
}
