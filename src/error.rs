//! Caller-error signals. Unreachable vertices are not errors (they read as +inf).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BmsspError {
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: String, to: String, weight: f64 },
    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight { from: String, to: String, weight: f64 },
    #[error("source set is empty")]
    EmptySources,
    #[error("source {0} has no finite distance recorded")]
    UnseededSource(String),
    #[error("bound must be positive, got {0}")]
    InvalidBound(f64),
    #[error("invalid parameters: k={k}, t={t} (both must be >= 1)")]
    InvalidParams { k: usize, t: u32 },
    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(String),
    #[error("malformed CSR input: {0}")]
    MalformedCsr(&'static str),
    #[error("scenario parse failed: {0}")]
    Scenario(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BmsspError>;

/// Debug-renders a vertex for error payloads so the error type stays non-generic.
pub(crate) fn describe<V: std::fmt::Debug>(v: &V) -> String {
    format!("{v:?}")
}
