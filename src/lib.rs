//! Data drift and schema compliance monitoring.
//!
//! The workspace crates are re-exported here so binaries and integration
//! tests can depend on a single facade.

pub use driftwatch_adapter_data as data;
pub use driftwatch_application as application;
pub use driftwatch_domain as domain;
pub use driftwatch_ports as ports;
pub use driftwatch_stats as stats;
pub use driftwatch_ui_terminal as terminal;
