//! Volatility smile
//!
//! Per-expiry implied-volatility curve extracted from an option chain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One solved point on the smile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Strike price
    pub strike: f64,
    /// Implied volatility recovered from the market price
    pub implied_vol: f64,
    /// Market price the vol was solved from
    pub market_price: f64,
}

/// Implied-volatility smile for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmileCurve {
    /// Underlying symbol
    pub underlying: String,
    /// Spot price at snapshot time
    pub spot: f64,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Risk-free rate used for the inversion
    pub rate: f64,
    /// Solved call points, ascending by strike
    pub calls: Vec<SmilePoint>,
    /// Solved put points, ascending by strike
    pub puts: Vec<SmilePoint>,
}

impl SmileCurve {
    pub fn new(
        underlying: impl Into<String>,
        spot: f64,
        expiry: NaiveDate,
        time_to_expiry: f64,
        rate: f64,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            spot,
            expiry,
            time_to_expiry,
            rate,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Total number of solved points
    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    /// At-the-money vol: point whose strike is closest to spot, calls
    /// preferred over puts on a tie
    pub fn atm_vol(&self) -> Option<f64> {
        self.calls
            .iter()
            .chain(self.puts.iter())
            .min_by(|a, b| {
                let da = (a.strike - self.spot).abs();
                let db = (b.strike - self.spot).abs();
                da.partial_cmp(&db).unwrap()
            })
            .map(|p| p.implied_vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atm_vol() {
        let expiry = NaiveDate::from_ymd_opt(2026, 6, 19).unwrap();
        let mut smile = SmileCurve::new("SPY", 500.0, expiry, 0.5, 0.05);

        smile.calls.push(SmilePoint {
            strike: 490.0,
            implied_vol: 0.22,
            market_price: 18.0,
        });
        smile.calls.push(SmilePoint {
            strike: 505.0,
            implied_vol: 0.19,
            market_price: 11.0,
        });

        assert!((smile.atm_vol().unwrap() - 0.19).abs() < 1e-12);
        assert_eq!(smile.len(), 2);
        assert!(!smile.is_empty());
    }
}
