//! Option quote data
//!
//! Market snapshots for options: prices, size, and the liquidity gate used
//! before solving for implied volatility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::option::OptionContract;

/// Minimum traded volume for a quote to be considered liquid
pub const MIN_VOLUME: u64 = 50;
/// Minimum open interest for a quote to be considered liquid
pub const MIN_OPEN_INTEREST: u64 = 100;

/// Option market quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    /// The option contract
    pub contract: OptionContract,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    pub last: Option<f64>,
    /// Trading volume
    pub volume: Option<u64>,
    /// Open interest
    pub open_interest: Option<u64>,
    /// Quote timestamp
    pub timestamp: DateTime<Utc>,
}

impl OptionQuote {
    pub fn new(contract: OptionContract) -> Self {
        Self {
            contract,
            bid: None,
            ask: None,
            last: None,
            volume: None,
            open_interest: None,
            timestamp: Utc::now(),
        }
    }

    /// Mid price when both sides are quoted and positive
    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) if b > 0.0 && a > 0.0 => Some((b + a) / 2.0),
            _ => None,
        }
    }

    /// Market price estimate: mid when available, last otherwise
    /// (last covers quotes captured outside market hours).
    pub fn market_price(&self) -> Option<f64> {
        self.mid().or(self.last).filter(|p| *p > 0.0)
    }

    /// Is the quote liquid enough for implied-vol extraction?
    pub fn is_liquid(&self) -> bool {
        let has_volume = self.volume.map(|v| v > MIN_VOLUME).unwrap_or(false);
        let has_interest = self
            .open_interest
            .map(|oi| oi > MIN_OPEN_INTEREST)
            .unwrap_or(false);
        let has_price = self.market_price().is_some();

        has_volume && has_interest && has_price
    }
}

/// All quotes for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Underlying spot price
    pub spot: f64,
    /// Expiry date
    pub expiry: chrono::NaiveDate,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Call quotes by strike
    pub calls: Vec<OptionQuote>,
    /// Put quotes by strike
    pub puts: Vec<OptionQuote>,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, spot: f64, expiry: chrono::NaiveDate) -> Self {
        let today = Utc::now().date_naive();
        let tte = (expiry - today).num_days() as f64 / 365.25;

        Self {
            underlying: underlying.into(),
            spot,
            expiry,
            time_to_expiry: tte,
            calls: Vec::new(),
            puts: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add a call quote, keeping strikes sorted
    pub fn add_call(&mut self, quote: OptionQuote) {
        self.calls.push(quote);
        self.calls
            .sort_by(|a, b| a.contract.strike.partial_cmp(&b.contract.strike).unwrap());
    }

    /// Add a put quote, keeping strikes sorted
    pub fn add_put(&mut self, quote: OptionQuote) {
        self.puts.push(quote);
        self.puts
            .sort_by(|a, b| a.contract.strike.partial_cmp(&b.contract.strike).unwrap());
    }

    /// All strikes across both sides
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self
            .calls
            .iter()
            .map(|q| q.contract.strike)
            .chain(self.puts.iter().map(|q| q.contract.strike))
            .collect();
        strikes.sort_by(|a, b| a.partial_cmp(b).unwrap());
        strikes.dedup();
        strikes
    }

    /// Liquid call quotes
    pub fn liquid_calls(&self) -> Vec<&OptionQuote> {
        self.calls.iter().filter(|q| q.is_liquid()).collect()
    }

    /// Liquid put quotes
    pub fn liquid_puts(&self) -> Vec<&OptionQuote> {
        self.puts.iter().filter(|q| q.is_liquid()).collect()
    }
}
