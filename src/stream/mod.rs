//! Stream module
//!
//! Composes the playback options for a channel: the transcoding-proxy URL,
//! the raw tuner URL and a device-info entry.

pub mod composer;

pub use composer::{StreamComposer, StreamDescriptor, StreamKind};
