//! Scenario history
//!
//! Persists pricing scenarios (inputs plus the prices and Greeks they
//! produced) so a session can be restored or compared later.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{BsmError, BsmResult, OptionType};
use crate::models::black_scholes;

/// One saved pricing scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// When the scenario was saved
    pub timestamp: DateTime<Utc>,
    /// Spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to maturity in years (T)
    pub maturity: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Volatility (sigma)
    pub volatility: f64,
    /// Call price at these inputs
    pub call_price: f64,
    /// Put price at these inputs
    pub put_price: f64,
    /// Call delta
    pub call_delta: f64,
    /// Put delta
    pub put_delta: f64,
    /// Gamma (kind-free)
    pub gamma: f64,
    /// Vega (kind-free)
    pub vega: f64,
}

impl ScenarioRecord {
    /// Price both sides and capture the shared Greeks for the given inputs
    pub fn evaluate(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> BsmResult<Self> {
        Ok(Self {
            timestamp: Utc::now(),
            spot,
            strike,
            maturity,
            rate,
            volatility,
            call_price: black_scholes::price(
                spot,
                strike,
                maturity,
                rate,
                volatility,
                OptionType::Call,
            )?,
            put_price: black_scholes::price(
                spot,
                strike,
                maturity,
                rate,
                volatility,
                OptionType::Put,
            )?,
            call_delta: black_scholes::delta(
                spot,
                strike,
                maturity,
                rate,
                volatility,
                OptionType::Call,
            )?,
            put_delta: black_scholes::delta(
                spot,
                strike,
                maturity,
                rate,
                volatility,
                OptionType::Put,
            )?,
            gamma: black_scholes::gamma(spot, strike, maturity, rate, volatility)?,
            vega: black_scholes::vega(spot, strike, maturity, rate, volatility)?,
        })
    }
}

/// JSON-file backed scenario history
pub struct ScenarioStore {
    path: PathBuf,
}

impl ScenarioStore {
    /// Open a store at the given path, creating parent directories
    pub fn new(path: impl Into<PathBuf>) -> BsmResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(BsmError::IO)?;
            }
        }

        Ok(Self { path })
    }

    /// Append a scenario to the history
    pub fn save(&self, record: &ScenarioRecord) -> BsmResult<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());

        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| BsmError::serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(BsmError::IO)?;

        tracing::info!(path = ?self.path, total = records.len(), "saved scenario");
        Ok(())
    }

    /// All saved scenarios, newest first
    pub fn load(&self) -> BsmResult<Vec<ScenarioRecord>> {
        let mut records = self.read_all()?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    /// Remove all saved scenarios
    pub fn clear(&self) -> BsmResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(BsmError::IO)?;
        }
        Ok(())
    }

    fn read_all(&self) -> BsmResult<Vec<ScenarioRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).map_err(BsmError::IO)?;
        serde_json::from_str(&json).map_err(|e| BsmError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn test_evaluate_fills_both_sides() {
        let record = ScenarioRecord::evaluate(40.0, 45.0, 0.33, 0.03, 0.40).unwrap();

        // Parity ties the two sides together
        let parity = 40.0 - 45.0 * (-0.03_f64 * 0.33).exp();
        assert_abs_diff_eq!(record.call_price - record.put_price, parity, epsilon = 1e-8);
        assert_abs_diff_eq!(record.call_delta - record.put_delta, 1.0, epsilon = 1e-12);
        assert!(record.gamma > 0.0);
        assert!(record.vega > 0.0);
    }

    #[test]
    fn test_evaluate_rejects_degenerate_inputs() {
        let err = ScenarioRecord::evaluate(40.0, 45.0, 0.0, 0.03, 0.40).unwrap_err();
        assert!(matches!(err, BsmError::DegenerateInputs(_)));
    }

    #[test]
    fn test_store_round_trip_newest_first() {
        let temp_dir = tempdir().unwrap();
        let store = ScenarioStore::new(temp_dir.path().join("scenarios.json")).unwrap();

        let mut first = ScenarioRecord::evaluate(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        first.timestamp = Utc::now() - chrono::Duration::minutes(5);
        let second = ScenarioRecord::evaluate(40.0, 45.0, 0.33, 0.03, 0.40).unwrap();

        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_abs_diff_eq!(loaded[0].spot, 40.0);
        assert_abs_diff_eq!(loaded[1].spot, 100.0);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
