//! # BSM Options - Black-Scholes-Merton Pricing Toolkit
//!
//! Prices European vanilla options under the Black-Scholes-Merton model,
//! computes the Greeks, and inverts market prices to implied volatility.
//!
//! ## Key Components
//!
//! - **Pricing Engine**: closed-form price and five Greeks from five scalar
//!   inputs, pure and stateless
//! - **Implied Volatility**: guarded Newton-Raphson root-finder driving the
//!   pricing engine, plus smile extraction over a quote chain
//! - **Data Fetching**: Yahoo Finance spot quotes and option chains behind
//!   a time-bounded local cache
//! - **Scenario History**: persisted pricing snapshots for later comparison
//!
//! ## Usage
//!
//! ```rust
//! use bsm_options::prelude::*;
//!
//! // Price an option and its Greeks
//! let call = price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let g = greeks(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//!
//! // Recover the vol implied by a market price
//! let iv = implied_volatility(call, 100.0, 100.0, 1.0, 0.05, OptionType::Call)
//!     .unwrap()
//!     .expect("converged");
//! assert!((iv - 0.2).abs() < 1e-4);
//! assert!(g.delta > 0.0);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - American-style early exercise
//! - Dividend adjustment
//! - Stochastic or local volatility modeling
//! - Real-time streaming market data

pub mod core;
pub mod data;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        BsmError, BsmResult, Greeks, OptionContract, OptionQuote, OptionType, QuoteChain,
        SmileCurve, SmilePoint,
    };

    // Data fetching and persistence
    pub use crate::data::{
        CacheConfig, CachedFetcher, DataCache, ScenarioRecord, ScenarioStore, SpotQuote,
        YahooClient,
    };

    // Pricing and implied vol
    pub use crate::models::{
        compute_smile, delta, gamma, greeks, implied_volatility, norm_cdf, norm_pdf, price,
        price_grid, rho, theta, vega,
    };
}

// Re-export main types at crate root
pub use crate::core::{BsmError, BsmResult};
