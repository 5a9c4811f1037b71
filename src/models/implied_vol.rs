//! Implied volatility
//!
//! Newton-Raphson inversion of the Black-Scholes price, and smile
//! extraction over a quote chain. The solver drives the pricing engine
//! through its public contract only; it never recomputes d1/d2 itself, so
//! the monotonicity in vol that Newton relies on is exactly what the engine
//! prices.

use crate::core::{
    BsmError, BsmResult, OptionQuote, OptionType, QuoteChain, SmileCurve, SmilePoint,
};
use crate::models::black_scholes::{price, vega};

/// Newton seed: 50% annualized vol, a reasonable mid-range start
const NEWTON_SEED: f64 = 0.5;
/// Absolute price-difference convergence tolerance
const PRICE_TOLERANCE: f64 = 1e-5;
/// Iteration cap before giving up
const MAX_ITERATIONS: usize = 100;
/// Below this vega the Newton step is numerically unstable
const MIN_VEGA: f64 = 1e-6;
/// Chains expiring within a day produce unreliable implied vols
const MIN_TIME_TO_EXPIRY: f64 = 1.0 / 365.25;

/// Solve for the volatility that reproduces `market_price`.
///
/// Returns `Ok(Some(vol))` on convergence and `Ok(None)` when the search
/// cannot be resolved to tolerance: iteration cap reached, vega collapsed
/// (near expiry or far from the money), or a Newton step left the positive
/// vol domain. `Ok(None)` is a legitimate outcome, not an error; `Err` is
/// reserved for inputs the engine cannot price at all.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    option_type: OptionType,
) -> BsmResult<Option<f64>> {
    let mut vol = NEWTON_SEED;

    for _ in 0..MAX_ITERATIONS {
        let diff = price(spot, strike, maturity, rate, vol, option_type)? - market_price;

        if diff.abs() < PRICE_TOLERANCE {
            return Ok(Some(vol));
        }

        let vega = vega(spot, strike, maturity, rate, vol)?;
        if vega.abs() < MIN_VEGA {
            tracing::debug!(vol, vega, "vega collapsed, implied vol unresolved");
            return Ok(None);
        }

        let next = vol - diff / vega;

        // The engine cannot price non-positive vol; continuing from here
        // would oscillate or diverge.
        if !next.is_finite() || next <= 0.0 {
            tracing::debug!(vol, next, "Newton step left the vol domain");
            return Ok(None);
        }

        vol = next;
    }

    tracing::debug!(vol, "implied vol did not converge within iteration cap");
    Ok(None)
}

/// Extract the implied-volatility smile from a quote chain.
///
/// Illiquid quotes are dropped before solving, and quotes whose vol cannot
/// be resolved are skipped, mirroring how a market-data page filters an
/// option chain before plotting a smile.
pub fn compute_smile(chain: &QuoteChain, rate: f64) -> BsmResult<SmileCurve> {
    if chain.time_to_expiry < MIN_TIME_TO_EXPIRY {
        return Err(BsmError::data(format!(
            "expiry {} is within one day, implied vol is unreliable",
            chain.expiry
        )));
    }

    let mut smile = SmileCurve::new(
        chain.underlying.clone(),
        chain.spot,
        chain.expiry,
        chain.time_to_expiry,
        rate,
    );

    for quote in chain.liquid_calls() {
        if let Some(point) = solve_point(chain, rate, quote)? {
            smile.calls.push(point);
        }
    }
    for quote in chain.liquid_puts() {
        if let Some(point) = solve_point(chain, rate, quote)? {
            smile.puts.push(point);
        }
    }

    tracing::info!(
        underlying = %chain.underlying,
        expiry = %chain.expiry,
        calls = smile.calls.len(),
        puts = smile.puts.len(),
        "computed smile"
    );

    Ok(smile)
}

fn solve_point(
    chain: &QuoteChain,
    rate: f64,
    quote: &OptionQuote,
) -> BsmResult<Option<SmilePoint>> {
    // Liquidity gate guarantees a price is present
    let Some(market_price) = quote.market_price() else {
        return Ok(None);
    };

    let solved = implied_volatility(
        market_price,
        chain.spot,
        quote.contract.strike,
        chain.time_to_expiry,
        rate,
        quote.contract.option_type,
    )?;

    Ok(solved.map(|implied_vol| SmilePoint {
        strike: quote.contract.strike,
        implied_vol,
        market_price,
    }))
}
