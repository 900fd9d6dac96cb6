//! Upstream API gateway.
//!
//! All Financial Modeling Prep requests funnel through [`FmpClient`]. The
//! client issues exactly one HTTP GET per call and normalizes every outcome
//! into an [`ApiResponse`]: either the parsed JSON payload, unchanged, or an
//! [`ErrorEnvelope`] that downstream formatters render as plain text.

mod client;
mod envelope;

pub use client::FmpClient;
pub use envelope::{ApiResponse, ErrorEnvelope, ErrorKind};
