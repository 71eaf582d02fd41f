use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

const INITIAL_GUESS: f64 = 0.10;
const CONVERGENCE_THRESHOLD: f64 = 0.000001;
const MAX_IRR_ITERATIONS: u32 = 100;
/// The search stops once |NPV'| falls below this.
const DERIVATIVE_EPSILON: f64 = 1e-12;

/// Outcome of the Newton-Raphson IRR search.
///
/// `rate_pct` is always populated; `converged` tells the caller whether it is an
/// actual root or just the last iterate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrEstimate {
    pub rate_pct: Percent,
    pub converged: bool,
    pub iterations: u32,
}

/// Net Present Value of a series of cash flows. `rate` is a fraction (0.10 = 10%),
/// `cash_flows[0]` is undiscounted.
pub fn npv(rate: f64, cash_flows: &[Money]) -> Money {
    cash_flows
        .iter()
        .enumerate()
        .fold(0.0, |sum, (t, cf)| sum + cf / (1.0 + rate).powi(t as i32))
}

/// d(NPV)/dr = sum -t * CF_t / (1+r)^(t+1)
fn npv_derivative(rate: f64, cash_flows: &[Money]) -> f64 {
    cash_flows.iter().enumerate().fold(0.0, |sum, (t, cf)| {
        sum - (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1)
    })
}

/// Internal Rate of Return using Newton-Raphson, starting from 10%.
///
/// Never fails: when the derivative is (near) zero or the iteration cap is hit, the last
/// computed rate comes back with `converged = false`.
pub fn irr_estimate(cash_flows: &[Money]) -> IrrEstimate {
    let mut rate = INITIAL_GUESS;

    for i in 0..MAX_IRR_ITERATIONS {
        let value = npv(rate, cash_flows);
        if value.abs() < CONVERGENCE_THRESHOLD {
            return IrrEstimate {
                rate_pct: rate * 100.0,
                converged: true,
                iterations: i,
            };
        }

        let derivative = npv_derivative(rate, cash_flows);
        if !derivative.is_finite() || derivative.abs() < DERIVATIVE_EPSILON {
            return IrrEstimate {
                rate_pct: rate * 100.0,
                converged: false,
                iterations: i,
            };
        }

        rate -= value / derivative;
    }

    IrrEstimate {
        rate_pct: rate * 100.0,
        converged: false,
        iterations: MAX_IRR_ITERATIONS,
    }
}

/// IRR in percent. Best-effort: see [`irr_estimate`] for the convergence flag.
pub fn irr(cash_flows: &[Money]) -> Percent {
    irr_estimate(cash_flows).rate_pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![-1000.0, 300.0, 400.0, 500.0];
        let result = npv(0.10, &cfs);
        // -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result + 21.04).abs() < 0.01);
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![-100.0, 50.0, 50.0, 50.0];
        assert_eq!(npv(0.0, &cfs), 50.0);
    }

    #[test]
    fn test_irr_one_period() {
        let est = irr_estimate(&[-100.0, 110.0]);
        assert!(est.converged);
        assert_relative_eq!(est.rate_pct, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_irr_even_annuity() {
        // -1000, 400 x 3 => ~9.70%
        let rate = irr(&[-1000.0, 400.0, 400.0, 400.0]);
        assert_relative_eq!(rate, 9.701025713566882, max_relative = 1e-4);
    }

    #[test]
    fn test_irr_recovers_constructed_rate() {
        // Flows built so that NPV(12%) = 0
        let r: f64 = 0.12;
        let terminal =
            1000.0 * (1.0 + r).powi(3) - 200.0 * (1.0 + r).powi(2) - 300.0 * (1.0 + r);
        let flows = vec![-1000.0, 200.0, 300.0, terminal];
        let rate = irr(&flows);
        assert_relative_eq!(rate, 12.0, max_relative = 1e-4);
    }

    #[test]
    fn test_irr_no_sign_change_reports_not_converged() {
        // All positive flows have no real root
        let est = irr_estimate(&[100.0, 100.0, 100.0]);
        assert!(!est.converged);
    }

    #[test]
    fn test_irr_zero_derivative_stops_early() {
        // A single flow has zero derivative everywhere
        let est = irr_estimate(&[-100.0]);
        assert!(!est.converged);
        assert_eq!(est.iterations, 0);
        assert_eq!(est.rate_pct, 10.0);
    }

    #[test]
    fn test_irr_near_zero_derivative_stops_early() {
        // NPV'(10%) is about -8e-15: a Newton step would jump to ~1e14
        let est = irr_estimate(&[1.0, 1e-14]);
        assert!(!est.converged);
        assert_eq!(est.iterations, 0);
        assert_relative_eq!(est.rate_pct, 10.0, epsilon = 1e-9);
    }
}
