//! Deterministic inference of performance and potential scores from HR attributes,
//! with rating-inflation detection against human-supplied ratings.

pub mod config;
pub mod error;
pub mod import;
pub mod ratings;
pub mod telemetry;
