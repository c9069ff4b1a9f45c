//! Metrics export and counter lookup adapters.

pub mod counters;
pub mod pushgateway;

pub use counters::RedisCounterStore;
pub use pushgateway::{PushgatewaySink, encode_report};
