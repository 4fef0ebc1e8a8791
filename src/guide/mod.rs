//! Guide module
//!
//! Fetches the remote program guide with the tuner's `DeviceAuth` token and
//! picks the program on air.

pub mod resolver;
pub mod types;

pub use resolver::ProgramResolver;
pub use types::Program;
