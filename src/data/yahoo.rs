//! Yahoo Finance data fetcher
//!
//! Fetches delayed spot quotes and option chains from Yahoo Finance's
//! unofficial API. Intended for personal/research use; data is delayed
//! ~15 minutes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{BsmError, BsmResult, OptionContract, OptionQuote, OptionType, QuoteChain};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        }
    }

    /// Get the latest spot price for a symbol
    pub fn get_quote(&self, symbol: &str) -> BsmResult<SpotQuote> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BsmError::network(e.to_string()))?
            .json()
            .map_err(|e| BsmError::data(format!("Failed to parse quote: {}", e)))?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| BsmError::data("No quote data returned"))?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price: result.regular_market_price,
            timestamp: Utc::now(),
        })
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> BsmResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BsmError::network(e.to_string()))?
            .json()
            .map_err(|e| BsmError::data(format!("Failed to parse options: {}", e)))?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| BsmError::data("No options data returned"))?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        Ok(expiries)
    }

    /// Get the option chain for a specific expiration
    pub fn get_option_chain(&self, symbol: &str, expiry: NaiveDate) -> BsmResult<QuoteChain> {
        let expiry_ts = expiry
            .and_hms_opt(16, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();

        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BsmError::network(e.to_string()))?
            .json()
            .map_err(|e| BsmError::data(format!("Failed to parse options: {}", e)))?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| BsmError::data("No options data returned"))?;

        let spot = chain_data.quote.regular_market_price;
        let mut chain = QuoteChain::new(symbol, spot, expiry);

        if let Some(options) = chain_data.options.first() {
            for call in &options.calls {
                if let Some(quote) = convert_quote(call, symbol, expiry, OptionType::Call) {
                    chain.add_call(quote);
                }
            }
            for put in &options.puts {
                if let Some(quote) = convert_quote(put, symbol, expiry, OptionType::Put) {
                    chain.add_put(quote);
                }
            }
        }

        tracing::info!(
            symbol,
            %expiry,
            calls = chain.calls.len(),
            puts = chain.puts.len(),
            "fetched option chain"
        );

        Ok(chain)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_quote(
    data: &YahooOptionData,
    underlying: &str,
    expiry: NaiveDate,
    option_type: OptionType,
) -> Option<OptionQuote> {
    let strike = data.strike?;

    let mut contract = OptionContract::new(underlying, strike, expiry, option_type);
    contract.symbol = data.contract_symbol.clone();

    let mut quote = OptionQuote::new(contract);
    quote.bid = data.bid;
    quote.ask = data.ask;
    quote.last = data.last_price;
    quote.volume = data.volume.and_then(|v| u64::try_from(v).ok());
    quote.open_interest = data.open_interest.and_then(|oi| u64::try_from(oi).ok());

    Some(quote)
}

/// Spot price quote
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates")]
    expiration_dates: Vec<i64>,
    quote: YahooQuoteData,
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionData>,
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
}
