#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Switching-activity computation and pin annotation.
pub mod activity;
/// In-memory description of one loaded capture.
pub mod capture;
/// Interface consumed from the low-level waveform decoder, and its
/// production implementation.
pub mod decoder;
/// Shared error and result types.
pub mod error;
/// Scope hierarchy tree and subtree flattening.
pub mod hierarchy;
/// Interfaces to the timing design database and power sink.
pub mod sta;
/// Enumerations, timescale decoding, and value representation.
pub mod types;
/// Chunked streaming of value changes into the capture.
pub mod values;

pub use activity::{
    ActivityConfig, ActivityReport, BusName, DEFAULT_CHUNK_SIZE, annotate_activities,
    parse_bus_name,
};
pub use capture::{Capture, Scope, Variable};
pub use decoder::{Decoder, FstDecoder, HierEvent, VarHandle};
pub use error::{Error, Result};
pub use hierarchy::{NodeId, ScopeNode, ScopeTree, read_hierarchy};
pub use sta::{ActivityOrigin, DesignDb, PinId, PowerSink, SdcClock, net_verilog_to_sta};
pub use types::*;
pub use values::{read_values_for, read_values_for_chunk};
