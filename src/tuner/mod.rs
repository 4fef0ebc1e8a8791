//! Tuner module
//!
//! Talks to the HDHomeRun device itself:
//! - `/discover.json` for identity and the guide authorization token
//! - `/lineup.json` for the configured channels
//! - raw stream URL composition

pub mod gateway;
pub mod types;

pub use gateway::TunerGateway;
pub use types::{Channel, DeviceIdentity, DeviceInfo};
