//! Black-Scholes-Merton pricing engine
//!
//! Closed-form European option prices and Greeks:
//!
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 − σ·√T
//! Call = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! Put  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
//! ```
//!
//! All functions are pure in their scalar inputs and fail fast with
//! [`BsmError::DegenerateInputs`] when the formula is undefined (T <= 0,
//! sigma <= 0, or non-positive spot/strike) instead of letting NaN/Inf
//! propagate. Every Greek derives d1/d2 from the same helper as the price,
//! so there is exactly one formula path.

use std::f64::consts::PI;

use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::{BsmError, BsmResult, Greeks, OptionType};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The d1/d2 intermediates, shared by the price and every Greek.
///
/// Errors with `DegenerateInputs` when the inputs make the formula
/// undefined, so callers can distinguish "no valid price" from "price is
/// zero".
pub fn d1_d2(spot: f64, strike: f64, maturity: f64, rate: f64, vol: f64) -> BsmResult<(f64, f64)> {
    if spot <= 0.0 || strike <= 0.0 {
        return Err(BsmError::degenerate(format!(
            "spot and strike must be positive (S={spot}, K={strike})"
        )));
    }
    if maturity <= 0.0 {
        return Err(BsmError::degenerate(format!(
            "time to maturity must be positive (T={maturity})"
        )));
    }
    if vol <= 0.0 {
        return Err(BsmError::degenerate(format!(
            "volatility must be positive (sigma={vol})"
        )));
    }

    let vol_sqrt_t = vol * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    Ok((d1, d2))
}

/// European option price
pub fn price(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> BsmResult<f64> {
    let (d1, d2) = d1_d2(spot, strike, maturity, rate, vol)?;
    let df = (-rate * maturity).exp();

    let price = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };

    Ok(price)
}

/// Delta: dV/dS
pub fn delta(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> BsmResult<f64> {
    let (d1, _) = d1_d2(spot, strike, maturity, rate, vol)?;

    let delta = match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    };

    Ok(delta)
}

/// Gamma: d²V/dS², identical for calls and puts
pub fn gamma(spot: f64, strike: f64, maturity: f64, rate: f64, vol: f64) -> BsmResult<f64> {
    let (d1, _) = d1_d2(spot, strike, maturity, rate, vol)?;
    Ok(norm_pdf(d1) / (spot * vol * maturity.sqrt()))
}

/// Vega: dV/dσ per unit vol, identical for calls and puts
pub fn vega(spot: f64, strike: f64, maturity: f64, rate: f64, vol: f64) -> BsmResult<f64> {
    let (d1, _) = d1_d2(spot, strike, maturity, rate, vol)?;
    Ok(spot * norm_pdf(d1) * maturity.sqrt())
}

/// Theta: dV/dt per year
pub fn theta(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> BsmResult<f64> {
    let (d1, d2) = d1_d2(spot, strike, maturity, rate, vol)?;
    let df = (-rate * maturity).exp();

    let decay = -spot * norm_pdf(d1) * vol / (2.0 * maturity.sqrt());

    let theta = match option_type {
        OptionType::Call => decay - rate * strike * df * norm_cdf(d2),
        OptionType::Put => decay + rate * strike * df * norm_cdf(-d2),
    };

    Ok(theta)
}

/// Rho: dV/dr per unit rate
pub fn rho(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> BsmResult<f64> {
    let (_, d2) = d1_d2(spot, strike, maturity, rate, vol)?;
    let df = (-rate * maturity).exp();

    let rho = match option_type {
        OptionType::Call => strike * maturity * df * norm_cdf(d2),
        OptionType::Put => -strike * maturity * df * norm_cdf(-d2),
    };

    Ok(rho)
}

/// All five Greeks in one pass
pub fn greeks(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> BsmResult<Greeks> {
    Ok(Greeks::new(
        delta(spot, strike, maturity, rate, vol, option_type)?,
        gamma(spot, strike, maturity, rate, vol)?,
        vega(spot, strike, maturity, rate, vol)?,
        theta(spot, strike, maturity, rate, vol, option_type)?,
        rho(spot, strike, maturity, rate, vol, option_type)?,
    ))
}

/// Price grid over spot × vol combinations, for sensitivity heatmaps.
///
/// Row i corresponds to `spots[i]`, column j to `vols[j]`. Cells are
/// independent, so callers may parallelize their own grids if they need to.
pub fn price_grid(
    spots: &[f64],
    vols: &[f64],
    strike: f64,
    maturity: f64,
    rate: f64,
    option_type: OptionType,
) -> BsmResult<Array2<f64>> {
    let mut grid = Array2::zeros((spots.len(), vols.len()));

    for (i, &spot) in spots.iter().enumerate() {
        for (j, &vol) in vols.iter().enumerate() {
            grid[[i, j]] = price(spot, strike, maturity, rate, vol, option_type)?;
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
    }

    #[test]
    fn test_atm_call() {
        // ATM call, 20% vol, 1 year, 5% rate: the textbook 10.4506
        let call = price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call).unwrap();
        assert_abs_diff_eq!(call, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_concrete_scenario() {
        // S=40, K=45, T=0.33, r=0.03, sigma=0.40
        let (s, k, t, r, v) = (40.0, 45.0, 0.33, 0.03, 0.40);

        let call = price(s, k, t, r, v, OptionType::Call).unwrap();
        let put = price(s, k, t, r, v, OptionType::Put).unwrap();
        assert_abs_diff_eq!(call, 2.0050, epsilon = 2e-3);
        assert_abs_diff_eq!(put, 6.5617, epsilon = 2e-3);

        assert_abs_diff_eq!(
            delta(s, k, t, r, v, OptionType::Call).unwrap(),
            0.3614,
            epsilon = 5e-4
        );
        assert_abs_diff_eq!(gamma(s, k, t, r, v).unwrap(), 0.040759, epsilon = 1e-4);
        assert_abs_diff_eq!(vega(s, k, t, r, v).unwrap(), 8.6084, epsilon = 5e-3);
    }

    #[test]
    fn test_put_call_parity() {
        // C - P = S - K*exp(-rT) across moneyness and maturity
        for (s, k, t, r, v) in [
            (100.0, 100.0, 1.0, 0.05, 0.2),
            (100.0, 80.0, 0.5, 0.03, 0.35),
            (40.0, 45.0, 0.33, 0.03, 0.40),
            (250.0, 300.0, 2.0, -0.01, 0.15),
        ] {
            let call = price(s, k, t, r, v, OptionType::Call).unwrap();
            let put = price(s, k, t, r, v, OptionType::Put).unwrap();
            let parity = s - k * (-r * t).exp();

            assert_abs_diff_eq!(call - put, parity, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let (s, k, t, r, v) = (100.0, 105.0, 0.75, 0.04, 0.25);
        let eps = 1e-4;

        for kind in [OptionType::Call, OptionType::Put] {
            let up = price(s + eps, k, t, r, v, kind).unwrap();
            let down = price(s - eps, k, t, r, v, kind).unwrap();
            let fd = (up - down) / (2.0 * eps);

            assert_abs_diff_eq!(delta(s, k, t, r, v, kind).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gamma_matches_finite_difference() {
        let (s, k, t, r, v) = (100.0, 105.0, 0.75, 0.04, 0.25);
        let h = 1e-2;

        let up = price(s + h, k, t, r, v, OptionType::Call).unwrap();
        let mid = price(s, k, t, r, v, OptionType::Call).unwrap();
        let down = price(s - h, k, t, r, v, OptionType::Call).unwrap();
        let fd = (up - 2.0 * mid + down) / (h * h);

        assert_abs_diff_eq!(gamma(s, k, t, r, v).unwrap(), fd, epsilon = 1e-6);
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let (s, k, t, r, v) = (100.0, 105.0, 0.75, 0.04, 0.25);
        let eps = 1e-4;

        let up = price(s, k, t, r, v + eps, OptionType::Call).unwrap();
        let down = price(s, k, t, r, v - eps, OptionType::Call).unwrap();
        let fd = (up - down) / (2.0 * eps);

        assert_abs_diff_eq!(vega(s, k, t, r, v).unwrap(), fd, epsilon = 1e-6);
    }

    #[test]
    fn test_theta_matches_finite_difference() {
        // Theta is the calendar-time derivative: -dV/dT
        let (s, k, t, r, v) = (100.0, 105.0, 0.75, 0.04, 0.25);
        let eps = 1e-4;

        for kind in [OptionType::Call, OptionType::Put] {
            let up = price(s, k, t + eps, r, v, kind).unwrap();
            let down = price(s, k, t - eps, r, v, kind).unwrap();
            let fd = -(up - down) / (2.0 * eps);

            assert_abs_diff_eq!(theta(s, k, t, r, v, kind).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rho_matches_finite_difference() {
        let (s, k, t, r, v) = (100.0, 105.0, 0.75, 0.04, 0.25);
        let eps = 1e-4;

        for kind in [OptionType::Call, OptionType::Put] {
            let up = price(s, k, t, r + eps, v, kind).unwrap();
            let down = price(s, k, t, r - eps, v, kind).unwrap();
            let fd = (up - down) / (2.0 * eps);

            assert_abs_diff_eq!(rho(s, k, t, r, v, kind).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let err = price(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));

        let err = price(100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));

        let err = gamma(-100.0, 100.0, 1.0, 0.05, 0.2).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));

        let err = vega(100.0, 100.0, -0.5, 0.05, 0.2).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));
    }

    #[test]
    fn test_greeks_bundle() {
        let (s, k, t, r, v) = (100.0, 100.0, 1.0, 0.05, 0.2);
        let g = greeks(s, k, t, r, v, OptionType::Call).unwrap();

        assert_abs_diff_eq!(g.delta, delta(s, k, t, r, v, OptionType::Call).unwrap());
        assert_abs_diff_eq!(g.gamma, gamma(s, k, t, r, v).unwrap());
        assert_abs_diff_eq!(g.vega, vega(s, k, t, r, v).unwrap());
        assert_abs_diff_eq!(g.theta, theta(s, k, t, r, v, OptionType::Call).unwrap());
        assert_abs_diff_eq!(g.rho, rho(s, k, t, r, v, OptionType::Call).unwrap());

        // Sanity on signs for a long call
        assert!(g.delta > 0.0 && g.delta < 1.0);
        assert!(g.gamma > 0.0);
        assert!(g.vega > 0.0);
        assert!(g.theta < 0.0);
        assert!(g.rho > 0.0);
    }

    #[test]
    fn test_price_grid() {
        let spots = [90.0, 100.0, 110.0];
        let vols = [0.15, 0.25];

        let grid = price_grid(&spots, &vols, 100.0, 0.5, 0.05, OptionType::Put).unwrap();
        assert_eq!(grid.dim(), (3, 2));

        for (i, &s) in spots.iter().enumerate() {
            for (j, &v) in vols.iter().enumerate() {
                let direct = price(s, 100.0, 0.5, 0.05, v, OptionType::Put).unwrap();
                assert_abs_diff_eq!(grid[[i, j]], direct);
            }
        }
    }

    #[test]
    fn test_price_grid_propagates_errors() {
        let err = price_grid(&[100.0], &[0.0], 100.0, 0.5, 0.05, OptionType::Call).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));
    }
}
