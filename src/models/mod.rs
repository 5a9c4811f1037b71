//! Pricing models
//!
//! - Black-Scholes-Merton closed-form pricing and Greeks
//! - Newton-Raphson implied volatility and smile extraction

pub mod black_scholes;
pub mod implied_vol;

pub use black_scholes::*;
pub use implied_vol::*;
