//! Error types for the BSM pricing toolkit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsmError {
    /// T <= 0, sigma <= 0, or non-positive spot/strike: d1/d2 undefined.
    #[error("Degenerate inputs: {0}")]
    DegenerateInputs(String),

    /// An option-kind string at the boundary was neither "call" nor "put".
    #[error("Invalid option kind: {0:?} (expected \"call\" or \"put\")")]
    InvalidOptionKind(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BsmResult<T> = Result<T, BsmError>;

impl BsmError {
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInputs(msg.into())
    }

    pub fn invalid_kind(msg: impl Into<String>) -> Self {
        Self::InvalidOptionKind(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
