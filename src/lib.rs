// Locust control client - library root
//
// Drives a running Locust server through its HTTP control API: start and
// stop load generation, poll aggregated statistics, and ramp the simulated
// user count up until a target throughput is reached.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod ramp;

pub use client::LocustClient;
pub use config::{ClientConfig, FieldNaming, HatchRateFormat, RampConfig};
pub use error::{ClientError, Result};
pub use models::{ErrorEntry, StatEntry, StatsResponse, SwarmResponse};
pub use ramp::{RampController, RampOutcome};
