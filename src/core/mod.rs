//! Core data types for the BSM pricing toolkit
//!
//! Defines fundamental types:
//! - OptionType / OptionContract: kind, strike, expiry
//! - OptionQuote / QuoteChain: market snapshots and liquidity filtering
//! - Greeks: price sensitivities
//! - SmileCurve: per-expiry implied-volatility curve

pub mod error;
pub mod greeks;
pub mod option;
pub mod quote;
pub mod smile;

pub use error::*;
pub use greeks::*;
pub use option::*;
pub use quote::*;
pub use smile::*;
