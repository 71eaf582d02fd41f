use approx::assert_relative_eq;
use pencil_core::time_value::{irr_estimate, npv};
use pencil_core::underwriting::{
    amortization_schedule, calculate_metrics, monthly_payment, remaining_balance, DealParameters,
};
use pretty_assertions::assert_eq;

fn value_add_deal() -> DealParameters {
    DealParameters {
        io_period: 2.0,
        capex_year1: 50_000.0,
        capex_year2: 25_000.0,
        rehab_period: 6.0,
        rehab_vacancy: 50.0,
        ..DealParameters::default()
    }
}

// ===========================================================================
// Stabilised default deal
// ===========================================================================

#[test]
fn test_default_deal_loan() {
    let r = calculate_metrics(&DealParameters::default());
    assert_eq!(r.loan_amount, 1_312_500.0);
    assert_eq!(r.equity_investment, 437_500.0);
    assert_relative_eq!(r.monthly_payment, 8_862.093992687798, max_relative = 1e-10);
    assert_relative_eq!(r.annual_debt_service, 106_345.12791225358, max_relative = 1e-10);
}

#[test]
fn test_default_deal_exit() {
    let r = calculate_metrics(&DealParameters::default());
    // 300k * 1.02^5 / 6%
    assert_relative_eq!(r.exit_value, 5_520_404.016, max_relative = 1e-9);
    assert_relative_eq!(r.remaining_loan_balance, 1_188_628.3947939149, max_relative = 1e-9);
    assert_relative_eq!(r.net_sales_proceeds, 4_110_959.460566086, max_relative = 1e-9);
}

#[test]
fn test_default_deal_cash_flows() {
    let r = calculate_metrics(&DealParameters::default());
    assert_eq!(r.projected_cash_flows.len(), 6);
    assert_eq!(r.projected_cash_flows[0], -1_312_500.0);

    let expected = [
        193_654.872_087_746_4,
        199_654.872_087_746_4,
        205_774.872_087_746_4,
        212_017.272_087_746_4,
        4_329_343.980_653_833,
    ];
    for (actual, expected) in r.projected_cash_flows[1..].iter().zip(expected) {
        assert_relative_eq!(*actual, expected, max_relative = 1e-9);
    }
}

#[test]
fn test_default_deal_returns() {
    let r = calculate_metrics(&DealParameters::default());
    assert!(r.irr_converged);
    assert_relative_eq!(r.irr, 36.301870269520045, max_relative = 1e-6);
    assert_relative_eq!(r.cash_on_cash, 68.57142857142857, max_relative = 1e-12);
    assert_relative_eq!(r.dscr, 2.8210037064183417, max_relative = 1e-10);
    assert_relative_eq!(r.equity_multiple, 2.916530185908433, max_relative = 1e-10);
    assert_relative_eq!(r.npv, 2_016_148.2593395791, max_relative = 1e-9);
    assert_relative_eq!(r.break_even_occupancy, 0.5389169712196514, max_relative = 1e-10);
    assert_relative_eq!(r.cap_rate, 17.142857142857142, max_relative = 1e-12);
}

#[test]
fn test_reported_npv_uses_ten_percent() {
    let r = calculate_metrics(&DealParameters::default());
    assert_eq!(r.npv, npv(0.10, &r.projected_cash_flows));
}

#[test]
fn test_reported_irr_zeroes_npv() {
    let r = calculate_metrics(&DealParameters::default());
    let residual = npv(r.irr / 100.0, &r.projected_cash_flows);
    assert!(residual.abs() < 1e-3, "NPV at IRR was {residual}");
}

// ===========================================================================
// Value-add deal: IO window, capex and rehab drag
// ===========================================================================

#[test]
fn test_value_add_deal_cash_flows() {
    let r = calculate_metrics(&value_add_deal());
    let flows = &r.projected_cash_flows;
    // 300k * (1 - 0.5 * 0.5) - 50k capex - 1.3125M * 6.5% interest
    assert_relative_eq!(flows[1], 89_687.5, max_relative = 1e-12);
    assert_relative_eq!(flows[2], 195_687.5, max_relative = 1e-12);
    assert_relative_eq!(flows[3], 205_774.872_087_746_4, max_relative = 1e-9);
    assert_relative_eq!(flows[5], 4_274_935.58, max_relative = 1e-8);
}

#[test]
fn test_value_add_deal_returns() {
    let r = calculate_metrics(&value_add_deal());
    assert_relative_eq!(r.remaining_loan_balance, 1_243_036.7930218023, max_relative = 1e-9);
    assert_relative_eq!(r.irr, 34.09734680015418, max_relative = 1e-6);
    assert_relative_eq!(r.equity_multiple, 2.792840172648715, max_relative = 1e-10);
    assert_relative_eq!(r.npv, 1_884_570.3120121192, max_relative = 1e-9);
}

// ===========================================================================
// Conventions
// ===========================================================================

#[test]
fn holding_period_is_counted_in_years() {
    let params = DealParameters::default();
    let r = calculate_metrics(&params);

    let schedule = amortization_schedule(
        r.loan_amount,
        params.interest_rate,
        params.amortization,
        f64::from(params.holding_period),
        params.io_period,
    );
    assert_eq!(schedule.len(), 60);
    assert_eq!(r.projected_cash_flows.len(), params.holding_period as usize + 1);
    assert_eq!(
        r.remaining_loan_balance,
        remaining_balance(r.loan_amount, params.interest_rate, params.amortization, 5.0, 0.0)
    );
}

#[test]
fn test_calculation_is_deterministic() {
    let params = value_add_deal();
    let a = calculate_metrics(&params);
    let b = calculate_metrics(&params);
    assert_eq!(a.irr.to_bits(), b.irr.to_bits());
    assert_eq!(a.npv.to_bits(), b.npv.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_reference_mortgage_payment() {
    assert_relative_eq!(monthly_payment(100_000.0, 6.0, 30.0), 599.5505251527569, max_relative = 1e-12);
}

#[test]
fn test_reference_irrs() {
    let annuity = irr_estimate(&[-1000.0, 400.0, 400.0, 400.0]);
    assert!(annuity.converged);
    assert_relative_eq!(annuity.rate_pct, 9.701025713566882, max_relative = 1e-6);

    let five_year = irr_estimate(&[-1000.0, 300.0, 300.0, 300.0, 300.0, 300.0]);
    assert!(five_year.converged);
    assert_relative_eq!(five_year.rate_pct, 15.238237116630643, max_relative = 1e-6);
}

#[test]
fn test_results_serialize_in_camel_case() {
    let r = calculate_metrics(&DealParameters::default());
    let json = serde_json::to_value(&r).unwrap();
    for key in [
        "equityInvestment",
        "year1NOI",
        "netSalesProceeds",
        "breakEvenOccupancy",
        "projectedCashFlows",
        "capRate",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
