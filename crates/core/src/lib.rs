//! cqparse Core Library
//!
//! Flattens the call quality stats embedded in a call record into a single
//! JSON object and derives synthetic audio level metrics from them.

pub mod error;
pub mod flatten;
pub mod input;
pub mod render;
pub mod synthetic;
pub mod types;

/// Version reported by the command line tool.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items at crate root
pub use error::{CqError, Result};
pub use flatten::{SYNTHETIC_DATA_KEY, coerce_value, flatten_call, flatten_entry};
pub use input::{read_call, read_input};
pub use render::{OutputStyle, render};
pub use synthetic::{INBOUND_RTP_KEY, MEDIA_SOURCE_KEY, inbound_rms, outbound_rms, rms, synthesize};
pub use types::{
    AudioTrack, CALL_QUALITY_TAG, Call, CallMetadata, InboundRtp, MediaSource, SyntheticData,
};
