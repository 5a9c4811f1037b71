//! Option contract definitions
//!
//! Vanilla European options: the kind enum and the contract specification.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::BsmError;

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        };
        f.pad(s)
    }
}

/// Boundary for untyped input (CLI arguments, persisted records). Anything
/// other than the two recognized kinds is a typed error, never a silent
/// default.
impl FromStr for OptionType {
    type Err = BsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(BsmError::invalid_kind(other)),
        }
    }
}

/// European vanilla option contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying symbol (e.g., "SPY", "NVDA")
    pub underlying: String,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiry: NaiveDate,
    /// Option kind (Call/Put)
    pub option_type: OptionType,
    /// Contract symbol (exchange-specific)
    pub symbol: Option<String>,
}

impl OptionContract {
    pub fn new(
        underlying: impl Into<String>,
        strike: f64,
        expiry: NaiveDate,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            strike,
            expiry,
            option_type,
            symbol: None,
        }
    }

    /// Time to expiry in years from given date (ACT/365.25)
    pub fn time_to_expiry(&self, from: NaiveDate) -> f64 {
        let days = (self.expiry - from).num_days();
        days as f64 / 365.25
    }

    /// Time to expiry from now
    pub fn time_to_expiry_now(&self) -> f64 {
        let today = Utc::now().date_naive();
        self.time_to_expiry(today)
    }

    /// Moneyness: K/S
    pub fn moneyness(&self, spot: f64) -> f64 {
        self.strike / spot
    }

    /// Is this option in the money?
    pub fn is_itm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Call => spot > self.strike,
            OptionType::Put => spot < self.strike,
        }
    }
}
