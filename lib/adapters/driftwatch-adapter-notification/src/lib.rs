//! Alert delivery channels.

pub mod service;

pub use service::{FanoutAlertSink, LogAlertSink, NtfyAlertSink};
